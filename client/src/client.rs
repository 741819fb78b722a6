//! Request construction and execution.

use std::error::Error as _;
use std::io;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;

use mcpman_types::{ApiResponse, CallError, Method, ResponseBody, ServerRecord, UnreachableKind};

/// Fixed per-request timeout. Exceeding it is a transport failure
/// (`Unreachable { TimedOut }`), never a returned response.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Identifying client header sent with every request (overridable by a
/// server's custom headers, unlike the bearer credential).
const CLIENT_USER_AGENT: &str = concat!("mcpman/", env!("CARGO_PKG_VERSION"));

/// Builds and executes one HTTP request per call against a [`ServerRecord`].
///
/// Holds a pooled `reqwest` client; cheap to clone. No retries, no caching,
/// no concurrency limit - the only per-call guarantee is the fixed timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl ApiClient {
    /// Build a client with the standard 30-second request timeout.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    /// Build a client with a custom request timeout (tests use short ones).
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { http, timeout })
    }

    /// Issue a single request against `server` and classify the outcome.
    ///
    /// The target URL is `server.url` joined with `endpoint` (exactly one
    /// separating slash). `body` is attached as the JSON payload only for
    /// POST/PUT; GET/DELETE never carry one.
    pub async fn call(
        &self,
        server: &ServerRecord,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<ApiResponse, CallError> {
        let url = join_url(&server.url, endpoint);
        let headers = build_headers(server).map_err(CallError::Request)?;

        tracing::debug!(%url, %method, "Calling server");

        let mut request = self
            .http
            .request(to_reqwest_method(method), &url)
            .timeout(self.timeout)
            .headers(headers);

        if method.allows_body() {
            if let Some(payload) = body {
                request = request.json(payload);
            }
        }

        let response = request.send().await.map_err(|e| classify_error(&e))?;
        read_response(response).await
    }

    /// Probe whether `server` is reachable. Never fails.
    ///
    /// Tries `GET /health` first: reachable if it answered 2xx. Otherwise
    /// falls back to `GET /`, where any status below 500 counts - a 404 from
    /// the root still proves something is listening.
    pub async fn test_connection(&self, server: &ServerRecord) -> bool {
        if let Ok(response) = self.call(server, "/health", Method::Get, None).await {
            if response.is_success() {
                return true;
            }
        }

        match self.call(server, "/", Method::Get, None).await {
            Ok(response) => (200..500).contains(&response.status),
            Err(_) => false,
        }
    }

    /// True iff `response` carries a success status (2xx).
    #[must_use]
    pub fn validate_response(&self, response: &ApiResponse) -> bool {
        response.is_success()
    }
}

/// Join a base URL and an endpoint with exactly one separating slash,
/// whatever combination of trailing/leading slashes the inputs carry.
#[must_use]
pub fn join_url(base: &str, endpoint: &str) -> String {
    let base = base.trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');
    format!("{base}/{endpoint}")
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Assemble request headers in precedence order: defaults, then the server's
/// custom headers, then the bearer credential last so custom headers can
/// never override authentication.
fn build_headers(server: &ServerRecord) -> Result<HeaderMap, String> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

    if let Some(custom) = &server.headers {
        for (name, value) in custom {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| format!("invalid header name \"{name}\": {e}"))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| format!("invalid value for header \"{name}\": {e}"))?;
            headers.insert(header_name, header_value);
        }
    }

    if let Some(key) = &server.api_key {
        let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| format!("API key is not a valid header value: {e}"))?;
        headers.insert(AUTHORIZATION, bearer);
    }

    Ok(headers)
}

/// Turn a delivered HTTP response into an [`ApiResponse`], parsing the body
/// as JSON when the content type allows.
async fn read_response(response: reqwest::Response) -> Result<ApiResponse, CallError> {
    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or_default().to_string();

    let mut headers = std::collections::BTreeMap::new();
    for (name, value) in response.headers() {
        if let Ok(text) = value.to_str() {
            headers.insert(name.as_str().to_string(), text.to_string());
        }
    }

    let is_json = headers
        .get("content-type")
        .is_some_and(|ct| ct.contains("json"));

    let text = response.text().await.map_err(|e| classify_error(&e))?;

    let data = if is_json {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    } else {
        ResponseBody::Text(text)
    };

    Ok(ApiResponse {
        status: status.as_u16(),
        status_text,
        data,
        headers,
    })
}

/// Classify a `reqwest` failure into the tagged outcome: builder problems are
/// `Request` (never dispatched), everything else is a transport failure with
/// a cause kind good enough to pick a remediation hint.
fn classify_error(error: &reqwest::Error) -> CallError {
    if error.is_builder() {
        return CallError::Request(error.to_string());
    }
    CallError::unreachable(unreachable_kind(error), error.to_string())
}

fn unreachable_kind(error: &reqwest::Error) -> UnreachableKind {
    if error.is_timeout() {
        return UnreachableKind::TimedOut;
    }

    // reqwest does not expose DNS-vs-refused directly; walk the source chain
    // for the underlying io error or resolver message.
    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(io_error) = cause.downcast_ref::<io::Error>() {
            match io_error.kind() {
                io::ErrorKind::ConnectionRefused => return UnreachableKind::ConnectionRefused,
                io::ErrorKind::TimedOut => return UnreachableKind::TimedOut,
                _ => {}
            }
        }
        let text = cause.to_string();
        if text.contains("dns error") || text.contains("failed to lookup address") {
            return UnreachableKind::HostNotFound;
        }
        if text.contains("Connection refused") {
            return UnreachableKind::ConnectionRefused;
        }
        source = cause.source();
    }

    UnreachableKind::Other
}
