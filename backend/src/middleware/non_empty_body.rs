//! Rejects requests whose JSON body carries no keys.
//!
//! The middleware buffers the payload, inspects it and either answers with
//! `400 {"message": "Object is Empty"}` or restores the buffered bytes so the
//! wrapped handler extracts them as usual. A request that is not declared as
//! JSON carries no parsed object and is answered the same way.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::web::Bytes;
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde_json::{Value, json};
use tracing::debug;

/// Message returned when a request body is empty.
pub const EMPTY_BODY_MESSAGE: &str = "Object is Empty";

/// Middleware short-circuiting requests without a payload.
///
/// A body counts as empty when it is blank, `{}` or `[]`, or when the
/// request's `Content-Type` is not JSON. JSON-typed bodies that fail to
/// parse pass through untouched so the handler's extractor can report them.
///
/// # Examples
/// ```
/// use actix_web::{App, HttpResponse, web};
/// use koders::middleware::RequireNonEmptyBody;
///
/// let _app = App::new().service(
///     web::resource("/koders")
///         .wrap(RequireNonEmptyBody)
///         .route(web::post().to(|| async { HttpResponse::Created().finish() })),
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireNonEmptyBody;

impl<S, B> Transform<S, ServiceRequest> for RequireNonEmptyBody
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireNonEmptyBodyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireNonEmptyBodyMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service wrapper produced by [`RequireNonEmptyBody`].
pub struct RequireNonEmptyBodyMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireNonEmptyBodyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let declared_json = is_json_content_type(
                req.headers()
                    .get(CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok()),
            );
            let body = req.extract::<Bytes>().await?;
            if !declared_json || is_empty_body(&body) {
                debug!(path = req.path(), declared_json, "rejecting request without payload");
                let response =
                    HttpResponse::BadRequest().json(json!({ "message": EMPTY_BODY_MESSAGE }));
                return Ok(req.into_response(response).map_into_right_body());
            }

            req.set_payload(Payload::from(body));
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// `application/json` or any `+json` media type, ignoring parameters.
fn is_json_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn is_empty_body(body: &[u8]) -> bool {
    if body.iter().all(u8::is_ascii_whitespace) {
        return true;
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map.is_empty(),
        Ok(Value::Array(items)) => items.is_empty(),
        _ => false,
    }
}
