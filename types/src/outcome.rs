//! Tagged outcome for calls that never produced an HTTP response.
//!
//! Callers pattern-match on `Result<ApiResponse, CallError>` instead of
//! inspecting exception shapes: a delivered error status is `Ok`, a transport
//! failure is `Unreachable`, and a request that could not even be built or
//! sent is `Request`.

/// Why a call produced no HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    /// The request went out (or tried to) but no response came back:
    /// DNS failure, connection refused, or timeout.
    #[error("network error: unable to reach server")]
    Unreachable {
        kind: UnreachableKind,
        detail: String,
    },
    /// The request could not be constructed or sent for a non-transport
    /// reason (invalid URL, malformed header bytes). Never dispatched.
    #[error("request error: {0}")]
    Request(String),
}

impl CallError {
    #[must_use]
    pub fn unreachable(kind: UnreachableKind, detail: impl Into<String>) -> Self {
        Self::Unreachable {
            kind,
            detail: detail.into(),
        }
    }
}

/// Transport failure cause, used to pick a remediation hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreachableKind {
    /// DNS resolution failed.
    HostNotFound,
    /// TCP connection was refused.
    ConnectionRefused,
    /// The fixed request timeout elapsed.
    TimedOut,
    /// Some other transport-level failure.
    Other,
}
