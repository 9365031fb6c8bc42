//! HTTP inbound adapter exposing the Koders REST endpoints.

use actix_web::web;

pub mod envelope;
pub mod error;
pub mod health;
pub mod koders;
pub mod schemas;
pub mod state;

pub use error::ApiResult;

use error::{json_error_handler, query_error_handler};
use koders::{create_koder, delete_koder, get_koder, home, list_koders, update_koder};

/// Register the Koders routes and their extractor error handlers.
///
/// Callers supply [`state::HttpState`] as application data.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use koders::inbound::http::{configure, state::HttpState};
/// use koders::outbound::memory::InMemoryKoderRepository;
///
/// let state = HttpState::from_repository(Arc::new(InMemoryKoderRepository::default()));
/// let _app = App::new()
///     .app_data(web::Data::new(state))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config =
        web::JsonConfig::default().error_handler(|err, req| json_error_handler(&err, req));
    let query_config =
        web::QueryConfig::default().error_handler(|err, req| query_error_handler(&err, req));

    cfg.app_data(json_config)
        .app_data(query_config)
        .service(home)
        .service(list_koders)
        .service(get_koder)
        .service(create_koder)
        .service(delete_koder)
        .service(update_koder);
}
