//! Single-probe execution and outcome classification.

use crate::config::RunConfig;
use crate::probe::ProbeSpec;
use crate::transport::{FetchResult, Transport};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

pub use crate::transport::ProbeBody;

/// Status code recorded when no HTTP response was obtained.
pub const TRANSPORT_FAILURE: u16 = 0;

/// Result of a probe execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// Probe name.
    pub name: String,

    /// Request URL, for diagnostics.
    pub url: String,

    /// HTTP status code, or 0 on transport failure.
    pub status: u16,

    /// Classified body. Transport failures carry their description as text.
    pub body: ProbeBody,

    /// Whether the status code is 2xx.
    pub passed: bool,

    /// Whether the probe was appended outside the fixed catalog.
    pub extra: bool,

    /// Duration in milliseconds.
    pub duration_ms: u64,
}

impl ProbeOutcome {
    /// Build an outcome from a fetch result; `passed` is derived from the status.
    pub fn from_fetch(spec: &ProbeSpec, url: String, fetch: FetchResult, duration_ms: u64) -> Self {
        let (status, body) = match fetch {
            FetchResult::Response { status, body } => (status, body),
            FetchResult::Unreachable(description) => {
                (TRANSPORT_FAILURE, ProbeBody::Text(description))
            }
        };

        Self {
            name: spec.name.clone(),
            url,
            status,
            body,
            passed: is_success(status),
            extra: spec.extra,
            duration_ms,
        }
    }

    /// Whether no HTTP response was obtained.
    pub fn is_transport_failure(&self) -> bool {
        self.status == TRANSPORT_FAILURE
    }
}

/// Whether a status code lies in `[200, 300)`.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Executes one probe: build URL, fetch, classify.
pub struct ProbeRunner;

impl ProbeRunner {
    /// Execute a single probe and return its outcome.
    ///
    /// Never fails: transport problems are folded into a status-0 outcome.
    pub async fn execute_probe(
        transport: &dyn Transport,
        config: &RunConfig,
        spec: &ProbeSpec,
    ) -> ProbeOutcome {
        let start = Instant::now();
        let url = spec.request_url(config);

        info!(probe = %spec.name, url = %url, "Executing probe");

        let fetch = transport.fetch(&url, config.timeout).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        let outcome = ProbeOutcome::from_fetch(spec, url, fetch, duration_ms);

        if outcome.is_transport_failure() {
            warn!(probe = %outcome.name, duration_ms, "Probe could not reach the service");
        } else {
            info!(
                probe = %outcome.name,
                status = outcome.status,
                passed = outcome.passed,
                duration_ms,
                "Probe finished"
            );
        }

        outcome
    }
}
