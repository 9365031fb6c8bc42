//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the failure envelope and a status
//! code. Extractor failures (malformed JSON, undecodable query strings) are
//! promoted to validation errors so they share the same envelope.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::envelope::ApiResponse;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationError | ErrorCode::StoreError => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::StoreError {
            error!(message = self.message(), "store operation failed");
        }
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::failure(self.message()))
    }
}

/// Error handler installed through [`actix_web::web::JsonConfig`].
pub fn json_error_handler(err: &JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "rejecting malformed JSON payload");
    Error::validation(err.to_string()).into()
}

/// Error handler installed through [`actix_web::web::QueryConfig`].
pub fn query_error_handler(err: &QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "rejecting undecodable query string");
    Error::validation(err.to_string()).into()
}
