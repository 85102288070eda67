//! serverinfo-probe - smoke tests for the serverinfo-rest HTTP API
//!
//! Provides a probe orchestration engine that:
//! - Builds authenticated probe URLs for a fixed endpoint catalog
//! - Executes each probe sequentially against a live service
//! - Classifies outcomes by status code and body shape
//! - Aggregates them into a report with an automation-friendly exit code

mod error;
pub mod config;
pub mod fakes;
pub mod pipeline;
pub mod probe;
pub mod report;
pub mod runner;
pub mod telemetry;
pub mod transport;
pub mod url;

// Re-export key types
pub use config::{RunConfig, Scheme};
pub use error::{ConfigError, ProbeError};
pub use pipeline::{ProbePipeline, RunReport, RunTarget};
pub use probe::{Anchor, BuiltinProbe, ProbeSpec};
pub use report::{ReportFormat, Reporter};
pub use runner::{ProbeBody, ProbeOutcome, ProbeRunner};
pub use telemetry::init_tracing;
pub use transport::{FetchResult, HttpTransport, Transport, USER_AGENT};
pub use url::build_url;

/// Result type for serverinfo-probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;
