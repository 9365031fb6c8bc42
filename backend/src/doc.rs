//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers that describe domain types without coupling them
//! to utoipa. The document backs Swagger UI in debug builds and is exported
//! by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::koders::KoderPayload;
use crate::inbound::http::schemas::{
    EmptyBodyResponseSchema, KoderListResponseSchema, KoderResponseSchema, KoderSchema,
    MessageResponseSchema, SexSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Koders API",
        description = "CRUD interface over the Koders collection plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::koders::home,
        crate::inbound::http::koders::list_koders,
        crate::inbound::http::koders::get_koder,
        crate::inbound::http::koders::create_koder,
        crate::inbound::http::koders::delete_koder,
        crate::inbound::http::koders::update_koder,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        KoderPayload,
        KoderSchema,
        SexSchema,
        KoderResponseSchema,
        KoderListResponseSchema,
        MessageResponseSchema,
        EmptyBodyResponseSchema
    )),
    tags(
        (name = "koders", description = "Koder records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
