//! Maps failures onto display-surface banners.
//!
//! Every failure here is a non-blocking banner; nothing is fatal to the
//! process, and an aborted operation has already left state unchanged by the
//! time it is reported.

use mcpman_client::errors::{format_call_error, format_http_error, status_hint, unreachable_hint};
use mcpman_registry::RegistryError;
use mcpman_types::{ApiResponse, CallError, ValidationIssue};

use crate::surface::DisplaySurface;

/// Report validation failures as the full list of violations.
pub fn validation_failed(display: &dyn DisplaySurface, context: &str, issues: &[ValidationIssue]) {
    let mut message = format!("{context} validation failed:");
    for issue in issues {
        message.push_str("\n  - ");
        message.push_str(&issue.to_string());
    }
    display.error(&message);
}

/// Report a registry failure (duplicate name, not found, store trouble) as a
/// single message.
pub fn registry_failed(display: &dyn DisplaySurface, action: &str, error: &RegistryError) {
    tracing::error!(action, "Registry operation failed: {error}");
    display.error(&format!("Failed to {action}: {error}"));
}

/// Report a call that produced no HTTP response, with a remediation hint
/// keyed by the transport cause.
pub fn call_failed(display: &dyn DisplaySurface, server_name: &str, error: &CallError) {
    tracing::error!(server = server_name, "Call failed: {error}");

    let mut message = format!(
        "Failed to connect to server \"{server_name}\": {}",
        format_call_error(error)
    );
    if let CallError::Unreachable { kind, .. } = error {
        message.push(' ');
        message.push_str(unreachable_hint(*kind));
    }
    display.error(&message);
}

/// Report a delivered error status, with a remediation hint keyed by the
/// status code.
pub fn http_error(display: &dyn DisplaySurface, server_name: &str, response: &ApiResponse) {
    let mut message = format!(
        "Server \"{server_name}\" answered: {}",
        format_http_error(response)
    );
    if let Some(hint) = status_hint(response.status) {
        message.push(' ');
        message.push_str(hint);
    }
    display.warn(&message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpman_types::{ResponseBody, UnreachableKind};
    use serde_json::Value;
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct Recorder {
        banners: RefCell<Vec<(String, String)>>,
    }

    impl DisplaySurface for Recorder {
        fn info(&self, message: &str) {
            self.banners
                .borrow_mut()
                .push(("info".into(), message.into()));
        }
        fn warn(&self, message: &str) {
            self.banners
                .borrow_mut()
                .push(("warn".into(), message.into()));
        }
        fn error(&self, message: &str) {
            self.banners
                .borrow_mut()
                .push(("error".into(), message.into()));
        }
        fn show_json(&self, _title: &str, _value: &Value) {}
    }

    #[test]
    fn validation_report_lists_every_issue() {
        let recorder = Recorder::default();
        validation_failed(
            &recorder,
            "add server",
            &[ValidationIssue::NameRequired, ValidationIssue::UrlRequired],
        );

        let banners = recorder.banners.borrow();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].0, "error");
        assert!(banners[0].1.contains("server name is required"));
        assert!(banners[0].1.contains("server URL is required"));
    }

    #[test]
    fn unreachable_report_includes_cause_hint() {
        let recorder = Recorder::default();
        call_failed(
            &recorder,
            "prod",
            &CallError::unreachable(UnreachableKind::TimedOut, "elapsed"),
        );

        let banners = recorder.banners.borrow();
        assert!(banners[0].1.contains("prod"));
        assert!(banners[0].1.contains("timed out"));
    }

    #[test]
    fn http_error_report_hints_on_401() {
        let recorder = Recorder::default();
        let response = ApiResponse {
            status: 401,
            status_text: "Unauthorized".to_string(),
            data: ResponseBody::Text(String::new()),
            headers: BTreeMap::new(),
        };
        http_error(&recorder, "prod", &response);

        let banners = recorder.banners.borrow();
        assert_eq!(banners[0].0, "warn");
        assert!(banners[0].1.contains("HTTP 401 Unauthorized"));
        assert!(banners[0].1.contains("API key"));
    }
}
