//! Koders API handlers.
//!
//! ```text
//! GET    /                Welcome message
//! GET    /koders?sex=f    List records matching every query parameter
//! GET    /koders/{id}     Fetch one record
//! POST   /koders          Create a record from a non-empty JSON body
//! DELETE /koders/{id}     Remove a record
//! PATCH  /koders/{id}     Replace the supplied fields of a record
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::{DeleteOutcome, Error, KoderCastError, KoderDraft, KoderFilter, KoderId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::schemas::{
    KoderListResponseSchema, KoderResponseSchema, MessageResponseSchema,
};
use crate::inbound::http::state::HttpState;
use crate::middleware::{MarkerObserver, ObserverChain, RequireNonEmptyBody};

/// Body of `GET /`.
pub const WELCOME_MESSAGE: &str = "Welcome to the Koders API";
/// Failure message for identifiers with no stored record.
pub const KODER_NOT_FOUND_MESSAGE: &str = "The ID was non existant";
/// Confirmation returned by a successful delete.
pub const KODER_DELETED_MESSAGE: &str = "Koder was eliminated successfully";
/// Confirmation returned by a successful update.
pub const KODER_UPDATED_MESSAGE: &str = "Koder was updated successfully";
/// Marker logged for every single-record lookup.
pub const KODER_LOOKUP_MARKER: &str = "getting koder";

/// Koder fields accepted by `POST /koders` and `PATCH /koders/{id}`.
///
/// Every field is optional here; the record schema decides which are
/// required. Unknown keys are ignored. `age` is kept as raw JSON and cast
/// when the payload becomes a [`KoderDraft`], so `25`, `25.0` and `"25"`
/// are all accepted.
///
/// Example JSON:
/// `{"name":"Ana","age":25,"sex":"f"}`
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct KoderPayload {
    #[schema(example = "Ana")]
    pub name: Option<String>,
    #[schema(value_type = Option<i64>, example = 25)]
    pub age: Option<Value>,
    #[schema(example = "19G")]
    pub generation: Option<String>,
    #[schema(example = "backend")]
    pub module: Option<String>,
    #[schema(example = "f")]
    pub sex: Option<String>,
}

impl TryFrom<KoderPayload> for KoderDraft {
    type Error = KoderCastError;

    fn try_from(payload: KoderPayload) -> Result<Self, Self::Error> {
        let KoderPayload {
            name,
            age,
            generation,
            module,
            sex,
        } = payload;
        Ok(Self {
            name,
            age: age.as_ref().map(cast_age).transpose()?.flatten(),
            generation,
            module,
            sex,
        })
    }
}

/// Cast a JSON value to a whole-number age.
///
/// Integral numbers and numeric strings are accepted; a blank string counts
/// as absent.
fn cast_age(raw: &Value) -> Result<Option<i64>, KoderCastError> {
    let parsed = match raw {
        Value::Null => return Ok(None),
        Value::String(text) if text.trim().is_empty() => return Ok(None),
        Value::String(text) => whole_number(text.trim()),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(|float| whole_number(&float.to_string()))),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    };
    parsed.map(Some).ok_or_else(|| age_cast_error(raw))
}

/// Parse `12`, `12.0` or `1.2e1` into an integer; fractions yield `None`.
fn whole_number(text: &str) -> Option<i64> {
    text.parse::<i64>().ok().or_else(|| {
        // f64 Display drops a zero fraction, so integral values re-parse.
        text.parse::<f64>()
            .ok()
            .filter(|float| float.is_finite())
            .and_then(|float| float.to_string().parse::<i64>().ok())
    })
}

fn age_cast_error(raw: &Value) -> KoderCastError {
    let value_type = match raw {
        Value::String(text) => return KoderCastError::new("Number", "age", text.as_str()),
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::Array(_) => "Array",
        Value::Null | Value::Object(_) => "Object",
    };
    KoderCastError::new("Number", "age", raw.to_string()).with_value_type(value_type)
}

fn koder_lookup_observers() -> ObserverChain {
    ObserverChain::new().with(MarkerObserver::new(KODER_LOOKUP_MARKER))
}

fn not_found() -> Error {
    Error::not_found(KODER_NOT_FOUND_MESSAGE)
}

/// Welcome message.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message", body = String)),
    tags = ["koders"],
    operation_id = "home"
)]
#[get("/")]
pub async fn home() -> web::Json<&'static str> {
    web::Json(WELCOME_MESSAGE)
}

/// List Koders, optionally filtered by exact field values.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use koders::inbound::http::koders::list_koders;
///
/// let app = App::new().service(list_koders);
/// ```
#[utoipa::path(
    get,
    path = "/koders",
    params(
        ("id" = Option<String>, Query, description = "Record identifier; `_id` is accepted as an alias"),
        ("name" = Option<String>, Query, description = "Exact name"),
        ("age" = Option<i32>, Query, description = "Exact age"),
        ("generation" = Option<String>, Query, description = "Exact generation"),
        ("module" = Option<String>, Query, description = "Exact module"),
        ("sex" = Option<String>, Query, description = "One of f, m, o")
    ),
    responses(
        (status = 200, description = "Matching Koders", body = KoderListResponseSchema),
        (status = 400, description = "Uncastable filter value or store failure", body = MessageResponseSchema)
    ),
    tags = ["koders"],
    operation_id = "listKoders"
)]
#[get("/koders")]
pub async fn list_koders(
    state: web::Data<HttpState>,
    query: web::Query<Vec<(String, String)>>,
) -> ApiResult<HttpResponse> {
    let filter = KoderFilter::from_query(query.into_inner())?;
    let koders = state.koders_query.list(&filter).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(koders)))
}

/// Fetch a single Koder.
#[utoipa::path(
    get,
    path = "/koders/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Stored Koder", body = KoderResponseSchema),
        (status = 400, description = "Malformed identifier or store failure", body = MessageResponseSchema),
        (status = 404, description = "No record with that identifier", body = MessageResponseSchema)
    ),
    tags = ["koders"],
    operation_id = "getKoder"
)]
#[get("/koders/{id}", wrap = "koder_lookup_observers()")]
pub async fn get_koder(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = KoderId::parse(&path.into_inner())?;
    let koder = state
        .koders_query
        .get_by_id(&id)
        .await?
        .ok_or_else(not_found)?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(koder)))
}

/// Create a Koder.
#[utoipa::path(
    post,
    path = "/koders",
    request_body = KoderPayload,
    responses(
        (status = 201, description = "Created Koder", body = KoderResponseSchema),
        (
            status = 400,
            description = "Validation or store failure; an empty payload yields `{\"message\":\"Object is Empty\"}`",
            body = MessageResponseSchema
        )
    ),
    tags = ["koders"],
    operation_id = "createKoder"
)]
#[post("/koders", wrap = "RequireNonEmptyBody")]
pub async fn create_koder(
    state: web::Data<HttpState>,
    payload: web::Json<KoderPayload>,
) -> ApiResult<HttpResponse> {
    debug!(payload = ?payload, "creating koder");
    let draft = KoderDraft::try_from(payload.into_inner())?;
    let koder = state.koders.create(draft).await?;
    Ok(HttpResponse::Created().json(ApiResponse::data(koder)))
}

/// Delete a Koder.
#[utoipa::path(
    delete,
    path = "/koders/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Record removed", body = MessageResponseSchema),
        (status = 400, description = "Malformed identifier or store failure", body = MessageResponseSchema),
        (status = 404, description = "No record with that identifier", body = MessageResponseSchema)
    ),
    tags = ["koders"],
    operation_id = "deleteKoder"
)]
#[delete("/koders/{id}")]
pub async fn delete_koder(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = KoderId::parse(&path.into_inner())?;
    match state.koders.delete(&id).await? {
        DeleteOutcome::Deleted => {
            Ok(HttpResponse::Ok().json(ApiResponse::message(KODER_DELETED_MESSAGE)))
        }
        DeleteOutcome::NotFound => Err(not_found()),
    }
}

/// Replace the supplied fields of a Koder.
#[utoipa::path(
    patch,
    path = "/koders/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    request_body = KoderPayload,
    responses(
        (status = 200, description = "Record updated", body = MessageResponseSchema),
        (status = 400, description = "Validation or store failure", body = MessageResponseSchema),
        (status = 404, description = "No record with that identifier", body = MessageResponseSchema)
    ),
    tags = ["koders"],
    operation_id = "updateKoder"
)]
#[patch("/koders/{id}")]
pub async fn update_koder(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<KoderPayload>,
) -> ApiResult<HttpResponse> {
    let id = KoderId::parse(&path.into_inner())?;
    let draft = KoderDraft::try_from(payload.into_inner())?;
    let koder = state
        .koders
        .update(&id, draft)
        .await?
        .ok_or_else(not_found)?;
    debug!(?koder, "koder after update");
    Ok(HttpResponse::Ok().json(ApiResponse::message(KODER_UPDATED_MESSAGE)))
}
