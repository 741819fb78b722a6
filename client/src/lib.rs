//! Single-shot HTTP caller for mcpman servers.
//!
//! # Outcome model
//!
//! [`ApiClient::call`] returns `Result<ApiResponse, CallError>`:
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | `Ok(response)` | The server answered - any status, including 4xx/5xx |
//! | `Err(Unreachable)` | No response at all: DNS, refused connection, timeout |
//! | `Err(Request)` | The request could not be built or sent; never dispatched |
//!
//! An HTTP error status is data, not an error: callers inspect the returned
//! [`ApiResponse`](mcpman_types::ApiResponse) and pick remediation from
//! [`errors`].
//!
//! # Header precedence
//!
//! Headers are applied in a fixed order that callers rely on: the JSON
//! content type and the identifying `User-Agent` first, then the server's
//! custom headers, then - last, so nothing can shadow it - the
//! `Authorization: Bearer <key>` credential when the record carries an API
//! key.

pub mod errors;

mod client;

pub use client::{join_url, ApiClient, REQUEST_TIMEOUT};
