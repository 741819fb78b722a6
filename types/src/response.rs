//! The uniform shape of a completed HTTP call.

use std::collections::BTreeMap;

use serde_json::Value;

/// Result of a completed call, regardless of status code.
///
/// A 404 or 500 is still an `ApiResponse` - the server answered. Only a call
/// that produced no response at all becomes a
/// [`CallError`](crate::CallError). Responses are transient, produced per
/// call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Protocol status phrase ("OK", "Not Found", ...).
    pub status_text: String,
    /// Response body, parsed as JSON when the content type allows.
    pub data: ResponseBody,
    /// Response headers (last value wins on duplicates).
    pub headers: BTreeMap<String, String>,
}

impl ApiResponse {
    /// True iff the status denotes success: `200 <= status < 300`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Best-effort human message from an error body: `data.message`, else
    /// `data.error`, else `"Unknown error"`.
    #[must_use]
    pub fn error_message(&self) -> String {
        if let ResponseBody::Json(value) = &self.data {
            for key in ["message", "error"] {
                if let Some(text) = value.get(key).and_then(Value::as_str) {
                    return text.to_string();
                }
            }
        }
        "Unknown error".to_string()
    }
}

/// Response payload: JSON when the server said so, raw text otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Render the body as a JSON value for display. Raw text is wrapped in a
    /// JSON string so the display surface always gets a valid document.
    #[must_use]
    pub fn to_display_value(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, data: ResponseBody) -> ApiResponse {
        ApiResponse {
            status,
            status_text: String::new(),
            data,
            headers: BTreeMap::new(),
        }
    }

    #[test]
    fn success_range_is_half_open() {
        assert!(response(200, ResponseBody::Text(String::new())).is_success());
        assert!(response(299, ResponseBody::Text(String::new())).is_success());
        assert!(!response(300, ResponseBody::Text(String::new())).is_success());
        assert!(!response(199, ResponseBody::Text(String::new())).is_success());
        assert!(!response(404, ResponseBody::Text(String::new())).is_success());
    }

    #[test]
    fn error_message_prefers_message_over_error() {
        let body = ResponseBody::Json(json!({"message": "m", "error": "e"}));
        assert_eq!(response(500, body).error_message(), "m");
    }

    #[test]
    fn error_message_falls_back_to_error_key() {
        let body = ResponseBody::Json(json!({"error": "boom"}));
        assert_eq!(response(500, body).error_message(), "boom");
    }

    #[test]
    fn error_message_defaults_when_body_is_opaque() {
        let body = ResponseBody::Text("<html>".to_string());
        assert_eq!(response(502, body).error_message(), "Unknown error");
        let body = ResponseBody::Json(json!({"detail": "x"}));
        assert_eq!(response(500, body).error_message(), "Unknown error");
    }
}
