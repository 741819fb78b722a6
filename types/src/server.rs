//! Server record definition and validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// One user-configured remote MCP server endpoint.
///
/// Records are identified by their `(name, url)` pair as fetched; there is no
/// synthetic ID. Name uniqueness across the registry is enforced by
/// `mcpman-registry`, not here.
///
/// Serializes with camelCase keys (`apiKey`) so the settings file stays
/// compatible with the original product's settings shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRecord {
    /// Display name, unique within the registry (case-sensitive).
    pub name: String,
    /// Base URL of the server; must parse as an absolute URL.
    pub url: String,
    /// Optional API key, sent as `Authorization: Bearer <key>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Optional fixed headers merged into every request to this server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl ServerRecord {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            api_key: None,
            headers: None,
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Check this record against the registry's field invariants.
    ///
    /// Returns every violation found, not just the first, so the caller can
    /// report the full list in one pass. An empty vec means the record is
    /// valid. Callers must not add or update a record that fails validation.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(ValidationIssue::NameRequired);
        }

        if self.url.trim().is_empty() {
            issues.push(ValidationIssue::UrlRequired);
        } else if Url::parse(&self.url).is_err() {
            issues.push(ValidationIssue::UrlInvalid(self.url.clone()));
        }

        issues
    }

    /// Identity match used by update/delete: exact `(name, url)` equality.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        self.name == other.name && self.url == other.url
    }
}

/// A single field-level validation failure on a [`ServerRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("server name is required")]
    NameRequired,
    #[error("server URL is required")]
    UrlRequired,
    #[error("server URL is not a valid absolute URL: {0}")]
    UrlInvalid(String),
}
