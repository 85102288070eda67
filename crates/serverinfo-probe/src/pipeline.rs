//! Probe pipeline orchestration.

use crate::config::RunConfig;
use crate::probe::{catalog_for, ProbeSpec};
use crate::runner::{ProbeOutcome, ProbeRunner};
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// Service endpoints a run was aimed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTarget {
    pub base_url: String,
    pub api_base: String,
    /// Whether a token was configured. The value itself is never recorded.
    pub token_configured: bool,
}

impl RunTarget {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            base_url: config.base_url(),
            api_base: config.api_base(),
            token_configured: config.token().is_some(),
        }
    }
}

/// Result of a complete probe run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub target: RunTarget,

    /// Outcomes in execution order.
    pub outcomes: Vec<ProbeOutcome>,

    pub total: usize,
    pub passed: usize,
    pub failed: usize,

    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// Build a report from outcomes, deriving the tally.
    pub fn new(
        target: RunTarget,
        started_at: DateTime<Utc>,
        outcomes: Vec<ProbeOutcome>,
        duration_ms: u64,
    ) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.passed).count();
        let failed = total - passed;

        Self {
            run_id: Uuid::new_v4(),
            started_at,
            target,
            outcomes,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Whether every probe passed.
    pub fn success(&self) -> bool {
        self.failed == 0
    }

    /// Number of probes from the fixed catalog.
    pub fn catalog_len(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.extra).count()
    }
}

/// Probe pipeline orchestrator.
pub struct ProbePipeline;

impl ProbePipeline {
    /// Execute `probes` in order against `transport`.
    ///
    /// Probes run strictly one after another. A failed probe is recorded and
    /// the next one still runs.
    pub async fn run(
        transport: &dyn Transport,
        config: &RunConfig,
        probes: Vec<ProbeSpec>,
    ) -> RunReport {
        let start = Instant::now();
        let started_at = Utc::now();
        let target = RunTarget::from_config(config);

        info!(
            base_url = %target.base_url,
            probes = probes.len(),
            "Starting probe run"
        );

        let mut outcomes = Vec::with_capacity(probes.len());
        for spec in &probes {
            let outcome = ProbeRunner::execute_probe(transport, config, spec).await;
            outcomes.push(outcome);
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        let report = RunReport::new(target, started_at, outcomes, duration_ms);

        info!(
            run_id = %report.run_id,
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            duration_ms,
            "Probe run finished"
        );

        report
    }

    /// Run the catalog for `config`: the seven builtin probes, plus the
    /// player lookup when a player is configured.
    pub async fn run_catalog(transport: &dyn Transport, config: &RunConfig) -> RunReport {
        Self::run(transport, config, catalog_for(config)).await
    }

    /// Validate `config`, build an HTTP transport and run the catalog.
    ///
    /// Errors only on misconfiguration, before any probe is sent.
    pub async fn execute(config: &RunConfig) -> Result<RunReport> {
        config.validate()?;
        let transport = HttpTransport::new()?;
        Ok(Self::run_catalog(&transport, config).await)
    }
}
