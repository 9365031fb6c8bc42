//! OpenAPI schema definitions for domain types and response envelopes.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers below mirror their structure for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Sex`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Sex)]
pub enum SexSchema {
    #[schema(rename = "f")]
    Female,
    #[schema(rename = "m")]
    Male,
    #[schema(rename = "o")]
    Other,
}

/// OpenAPI schema for [`crate::domain::Koder`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Koder)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct KoderSchema {
    /// Identifier assigned at creation.
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Between 3 and 10 characters.
    #[schema(example = "Ana", min_length = 3, max_length = 10)]
    name: String,
    /// Between 18 and 100.
    #[schema(example = 25, minimum = 18, maximum = 100)]
    age: i32,
    #[schema(example = "19G")]
    generation: Option<String>,
    #[schema(example = "backend")]
    module: Option<String>,
    sex: Option<SexSchema>,
}

/// Success envelope carrying one Koder.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct KoderResponseSchema {
    #[schema(example = true)]
    success: bool,
    data: KoderSchema,
}

/// Success envelope carrying a list of Koders.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct KoderListResponseSchema {
    #[schema(example = true)]
    success: bool,
    data: Vec<KoderSchema>,
}

/// Envelope carrying only a message; used for confirmations and failures.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MessageResponseSchema {
    success: bool,
    #[schema(example = "The ID was non existant")]
    message: String,
}

/// Body returned when a create request carries no payload.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EmptyBodyResponseSchema {
    #[schema(example = "Object is Empty")]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn koder_schema_has_expected_name() {
        // utoipa replaces :: with . in schema names
        assert_eq!(KoderSchema::name(), "crate.domain.Koder");
        let schema_json = schema_to_json::<KoderSchema>();
        for field in ["id", "name", "age", "generation", "module", "sex"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }

    #[test]
    fn sex_schema_lists_short_codes() {
        let schema_json = schema_to_json::<SexSchema>();
        for code in ["\"f\"", "\"m\"", "\"o\""] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }
}
