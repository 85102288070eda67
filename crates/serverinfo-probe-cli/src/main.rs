//! serverinfo-probe - smoke-test CLI for the serverinfo-rest API
//!
//! Runs the probe catalog against a live service, prints the report on
//! stdout and exits 0 when every probe passed, 1 otherwise.
//!
//! ## Examples
//!
//! - `serverinfo-probe --host localhost --port 60202`
//! - `serverinfo-probe --host localhost --port 60202 --player Steve`
//! - `serverinfo-probe --host localhost --port 60202 --token your-secret-token`

use anyhow::{Context, Result};
use clap::Parser;
use serverinfo_probe::config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PREFIX, DEFAULT_TIMEOUT_SECS};
use serverinfo_probe::{ProbePipeline, ReportFormat, Reporter, RunConfig, Scheme};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, Level};

#[derive(Parser, Debug)]
#[command(name = "serverinfo-probe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Smoke-test a serverinfo-rest API endpoint", long_about = None)]
struct Cli {
    /// Server address
    #[arg(long, env = "SERVERINFO_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Server port
    #[arg(long, env = "SERVERINFO_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// API path prefix
    #[arg(long, env = "SERVERINFO_PREFIX", default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Player name to look up (adds the /player probe)
    #[arg(long, env = "SERVERINFO_PLAYER")]
    player: Option<String>,

    /// Access token, if the server has token authentication enabled
    #[arg(long, env = "SERVERINFO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "SERVERINFO_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// URL scheme (http or https)
    #[arg(long, default_value = "http")]
    scheme: Scheme,

    /// Report format (text or json)
    #[arg(long, default_value = "text")]
    format: ReportFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn to_config(&self) -> RunConfig {
        let mut config = RunConfig::new(&self.host, self.port)
            .with_scheme(self.scheme)
            .with_prefix(&self.prefix)
            .with_timeout(Duration::from_secs(self.timeout));
        if let Some(token) = &self.token {
            config = config.with_token(token);
        }
        if let Some(player) = &self.player {
            config = config.with_player(player);
        }
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    serverinfo_probe::init_tracing(cli.json, level);

    match run(&cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!(error = %e, "Probe run aborted");
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: &Cli) -> Result<u8> {
    let config = cli.to_config();

    let report = ProbePipeline::execute(&config)
        .await
        .context("Probe run could not start")?;

    let rendered = Reporter::render_as(&report, cli.format).context("Failed to render report")?;
    print!("{}", rendered);
    if cli.format == ReportFormat::Json {
        println!();
    }

    Ok(if Reporter::exit_code(&report) == 0 { 0 } else { 1 })
}
