//! Human-readable formatting and remediation hints for call failures.
//!
//! The report layer in the CLI combines these into the banner it shows: the
//! formatted message states what happened, the hint says what to do about it.

use mcpman_types::{ApiResponse, CallError, UnreachableKind};

/// Format a delivered-but-failed HTTP response:
/// `HTTP <status> <statusText>: <message>`, with the message lifted from the
/// body's `message` or `error` key when present.
#[must_use]
pub fn format_http_error(response: &ApiResponse) -> String {
    format!(
        "HTTP {} {}: {}",
        response.status,
        response.status_text,
        response.error_message()
    )
}

/// Format a call that produced no response at all.
#[must_use]
pub fn format_call_error(error: &CallError) -> String {
    match error {
        CallError::Unreachable { .. } => "Network error: Unable to reach server".to_string(),
        CallError::Request(detail) => format!("Request error: {detail}"),
    }
}

/// Remediation hint keyed by HTTP status, for statuses that have a known
/// usual cause.
#[must_use]
pub fn status_hint(status: u16) -> Option<&'static str> {
    match status {
        401 => Some("Please check your API key."),
        403 => Some("Access forbidden. Please check your permissions."),
        404 => Some("Endpoint not found."),
        500..=599 => Some("Server error occurred."),
        _ => None,
    }
}

/// Remediation hint keyed by transport failure cause.
#[must_use]
pub fn unreachable_hint(kind: UnreachableKind) -> &'static str {
    match kind {
        UnreachableKind::HostNotFound => "Server not found. Please check the URL.",
        UnreachableKind::ConnectionRefused => {
            "Connection refused. Please check if the server is running."
        }
        UnreachableKind::TimedOut => "Connection timed out. Please check your network connection.",
        UnreachableKind::Other => "Please check the URL and your network connection.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpman_types::ResponseBody;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn http_error_includes_status_phrase_and_body_message() {
        let response = ApiResponse {
            status: 404,
            status_text: "Not Found".to_string(),
            data: ResponseBody::Json(json!({"message": "no such tool"})),
            headers: BTreeMap::new(),
        };
        assert_eq!(
            format_http_error(&response),
            "HTTP 404 Not Found: no such tool"
        );
    }

    #[test]
    fn http_error_without_known_keys_says_unknown() {
        let response = ApiResponse {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            data: ResponseBody::Text("oops".to_string()),
            headers: BTreeMap::new(),
        };
        assert_eq!(
            format_http_error(&response),
            "HTTP 500 Internal Server Error: Unknown error"
        );
    }

    #[test]
    fn unreachable_formats_to_the_fixed_message() {
        let error = CallError::unreachable(UnreachableKind::ConnectionRefused, "refused");
        assert_eq!(
            format_call_error(&error),
            "Network error: Unable to reach server"
        );
    }

    #[test]
    fn request_error_carries_detail() {
        let error = CallError::Request("invalid header name \"x y\"".to_string());
        assert!(format_call_error(&error).starts_with("Request error: "));
    }

    #[test]
    fn hints_cover_the_documented_statuses() {
        assert!(status_hint(401).unwrap().contains("API key"));
        assert!(status_hint(403).unwrap().contains("forbidden"));
        assert!(status_hint(404).unwrap().contains("Endpoint"));
        assert!(status_hint(503).unwrap().contains("Server error"));
        assert!(status_hint(200).is_none());
        assert!(status_hint(418).is_none());
    }
}
