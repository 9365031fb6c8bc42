//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{KoderCommand, KoderQuery, KoderRepository};
use crate::domain::KoderService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub koders_query: Arc<dyn KoderQuery>,
    pub koders: Arc<dyn KoderCommand>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(koders_query: Arc<dyn KoderQuery>, koders: Arc<dyn KoderCommand>) -> Self {
        Self {
            koders_query,
            koders,
        }
    }

    /// Wire both driving ports to a [`KoderService`] over `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use koders::inbound::http::state::HttpState;
    /// use koders::outbound::memory::InMemoryKoderRepository;
    ///
    /// let state = HttpState::from_repository(Arc::new(InMemoryKoderRepository::default()));
    /// let _query = state.koders_query.clone();
    /// ```
    pub fn from_repository<R>(repository: Arc<R>) -> Self
    where
        R: KoderRepository + 'static,
    {
        let service = Arc::new(KoderService::new(repository));
        Self::new(service.clone(), service)
    }
}
