//! Fixed JSON envelope wrapping every Koders API response.
//!
//! Successful responses carry either `data` or a confirmation `message`;
//! failures carry `success: false` and the failure `message`.

use serde::{Deserialize, Serialize};

/// Response body shared by all `/koders` routes.
///
/// # Examples
/// ```
/// use koders::inbound::http::envelope::ApiResponse;
///
/// let body = serde_json::to_value(ApiResponse::<()>::failure("The ID was non existant")).unwrap();
/// assert_eq!(
///     body,
///     serde_json::json!({"success": false, "message": "The ID was non existant"})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    /// Successful response carrying only a confirmation message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Failed response carrying the failure message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn data_envelope_omits_message() {
        let value = serde_json::to_value(ApiResponse::data(vec![1, 2])).expect("serialise");
        assert_eq!(value, json!({"success": true, "data": [1, 2]}));
    }

    #[rstest]
    fn message_envelope_omits_data() {
        let value = serde_json::to_value(ApiResponse::message("Koder was updated successfully"))
            .expect("serialise");
        assert_eq!(
            value,
            json!({"success": true, "message": "Koder was updated successfully"})
        );
    }
}
