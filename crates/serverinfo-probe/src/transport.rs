//! HTTP transport for probe requests.
//!
//! A transport performs exactly one GET and never fails past its own
//! boundary: network-level problems come back as [`FetchResult::Unreachable`].

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::time::Duration;
use tracing::debug;

/// Client identifier sent with every probe request.
pub const USER_AGENT: &str = "serverinfo-rest-tester/1.0";

/// Response body, classified by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ProbeBody {
    /// Body decoded as JSON.
    Json(serde_json::Value),

    /// Body kept verbatim (not JSON, or a failure description).
    Text(String),

    /// Empty body.
    Absent,
}

impl ProbeBody {
    /// Classify a raw response body.
    pub fn classify(raw: &str) -> Self {
        if raw.is_empty() {
            return ProbeBody::Absent;
        }
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value) => ProbeBody::Json(value),
            Err(e) => {
                debug!(error = %e, "Body is not JSON, keeping as text");
                ProbeBody::Text(raw.to_string())
            }
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ProbeBody::Json(_))
    }
}

/// Outcome of a single fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// The server answered with a status line (any code).
    Response { status: u16, body: ProbeBody },

    /// No HTTP response was obtained.
    Unreachable(String),
}

/// Performs one GET request per call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult;
}

/// reqwest-backed transport.
///
/// Idle connections are never kept, so each probe opens its own connection.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new transport with the fixed probe user agent.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(HttpTransport { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult {
        let response = match self.client.get(url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) => return FetchResult::Unreachable(describe_failure(&e, timeout)),
        };

        let status = response.status().as_u16();
        debug!(url = %url, status, "Received response");

        let body = match response.text().await {
            Ok(text) => ProbeBody::classify(&text),
            Err(e) => ProbeBody::Text(format!("Failed to read body: {}", error_chain(&e))),
        };

        FetchResult::Response { status, body }
    }
}

fn describe_failure(err: &reqwest::Error, timeout: Duration) -> String {
    if err.is_timeout() {
        format!("Connection failed: timed out after {}s", timeout.as_secs_f64())
    } else if err.is_connect() {
        format!("Connection failed: {}", error_chain(err))
    } else {
        format!("Request error: {}", error_chain(err))
    }
}

/// Render an error with its source chain, e.g. `a: b: c`.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
