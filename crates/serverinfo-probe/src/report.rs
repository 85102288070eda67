//! Report rendering and exit-code derivation.

use crate::error::ProbeError;
use crate::pipeline::RunReport;
use crate::runner::{ProbeBody, ProbeOutcome};
use crate::Result;
use std::fmt::Write;
use std::str::FromStr;

const RULE_WIDTH: usize = 60;
const SECTION_WIDTH: usize = 40;

/// Output format for a rendered report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{}' (expected text or json)", other)),
        }
    }
}

/// Renders a [`RunReport`] for humans or machines.
pub struct Reporter;

impl Reporter {
    /// Render in the requested format.
    pub fn render_as(report: &RunReport, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(Self::render(report)),
            ReportFormat::Json => Self::render_json(report),
        }
    }

    /// Render the human-readable report: header, one section per probe,
    /// then the tally.
    pub fn render(report: &RunReport) -> String {
        let mut out = String::new();

        push_banner(&mut out, "serverinfo-rest API smoke test");
        let _ = writeln!(out, "Base URL: {}", report.target.base_url);
        let _ = writeln!(out, "API Base: {}", report.target.api_base);
        if report.target.token_configured {
            let _ = writeln!(out, "Token: configured");
        }

        let catalog_len = report.catalog_len();
        let mut ordinal = 0;
        for outcome in &report.outcomes {
            let label = if outcome.extra {
                "[extra]".to_string()
            } else {
                ordinal += 1;
                format!("[{}/{}]", ordinal, catalog_len)
            };
            push_outcome(&mut out, &label, outcome);
        }

        out.push('\n');
        push_banner(&mut out, "Results");
        for outcome in &report.outcomes {
            let marker = if outcome.passed { "✓ PASS" } else { "✗ FAIL" };
            let _ = writeln!(out, "  {} - {}", marker, outcome.name);
        }

        out.push('\n');
        let _ = writeln!(out, "Total: {} probes", report.total);
        let _ = writeln!(out, "  passed: {}", report.passed);
        let _ = writeln!(out, "  failed: {}", report.failed);
        out.push('\n');

        if report.success() {
            let _ = writeln!(out, "All probes passed!");
        } else {
            let _ = writeln!(out, "{} probe(s) failed", report.failed);
        }

        out
    }

    /// Render the report as pretty-printed JSON.
    pub fn render_json(report: &RunReport) -> Result<String> {
        serde_json::to_string_pretty(report).map_err(ProbeError::from)
    }

    /// 0 when no probe failed, 1 otherwise.
    pub fn exit_code(report: &RunReport) -> i32 {
        if report.failed == 0 {
            0
        } else {
            1
        }
    }
}

fn push_banner(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "  {}", title);
    let _ = writeln!(out, "{}", rule);
}

fn push_outcome(out: &mut String, label: &str, outcome: &ProbeOutcome) {
    let _ = writeln!(out, "\n{} {}", label, outcome.name);
    let _ = writeln!(out, "{}", "-".repeat(SECTION_WIDTH));
    let _ = writeln!(out, "GET {}", redact_token(&outcome.url));

    if outcome.is_transport_failure() {
        let _ = writeln!(out, "✗ {}", body_text(&outcome.body));
        return;
    }

    let _ = writeln!(out, "Status: {}", outcome.status);
    let _ = writeln!(out, "{}", body_text(&outcome.body));
}

/// Mask the value of any `token` query fragment.
fn redact_token(url: &str) -> String {
    let Some((path, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let fragments: Vec<&str> = query
        .split('&')
        .map(|fragment| {
            if fragment.starts_with("token=") {
                "token=***"
            } else {
                fragment
            }
        })
        .collect();
    format!("{}?{}", path, fragments.join("&"))
}

fn body_text(body: &ProbeBody) -> String {
    match body {
        ProbeBody::Json(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        ProbeBody::Text(text) => text.clone(),
        ProbeBody::Absent => "(empty body)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::pipeline::RunTarget;
    use chrono::Utc;
    use serde_json::json;

    fn outcome(name: &str, status: u16, body: ProbeBody, extra: bool) -> ProbeOutcome {
        ProbeOutcome {
            name: name.to_string(),
            url: format!("http://localhost:60202/api/v1/{}", name),
            status,
            body,
            passed: (200..300).contains(&status),
            extra,
            duration_ms: 1,
        }
    }

    fn report(outcomes: Vec<ProbeOutcome>, config: &RunConfig) -> RunReport {
        RunReport::new(RunTarget::from_config(config), Utc::now(), outcomes, 10)
    }

    #[test]
    fn test_exit_code_all_passed() {
        let r = report(
            vec![outcome("health", 200, ProbeBody::Absent, false)],
            &RunConfig::default(),
        );
        assert_eq!(Reporter::exit_code(&r), 0);
    }

    #[test]
    fn test_exit_code_any_failure() {
        let r = report(
            vec![
                outcome("health", 200, ProbeBody::Absent, false),
                outcome("status", 500, ProbeBody::Absent, false),
            ],
            &RunConfig::default(),
        );
        assert_eq!(Reporter::exit_code(&r), 1);
    }

    #[test]
    fn test_exit_code_all_failed() {
        let r = report(
            vec![outcome("health", 0, ProbeBody::Text("refused".into()), false)],
            &RunConfig::default(),
        );
        assert_eq!(Reporter::exit_code(&r), 1);
    }

    #[test]
    fn test_render_sections_and_tally() {
        let r = report(
            vec![
                outcome(
                    "health",
                    200,
                    ProbeBody::Json(json!({"status": "healthy"})),
                    false,
                ),
                outcome("status", 401, ProbeBody::Text("denied".into()), false),
                outcome("Player Steve", 404, ProbeBody::Absent, true),
            ],
            &RunConfig::default().with_token("secret"),
        );

        let text = Reporter::render(&r);
        assert!(text.contains("Base URL: http://localhost:60202"));
        assert!(text.contains("API Base: http://localhost:60202/api/v1"));
        assert!(text.contains("Token: configured"));
        assert!(!text.contains("secret"));
        assert!(text.contains("[1/2] health"));
        assert!(text.contains("[2/2] status"));
        assert!(text.contains("[extra] Player Steve"));
        assert!(text.contains("\"status\": \"healthy\""));
        assert!(text.contains("Status: 401"));
        assert!(text.contains("denied"));
        assert!(text.contains("(empty body)"));
        assert!(text.contains("✓ PASS - health"));
        assert!(text.contains("✗ FAIL - status"));
        assert!(text.contains("Total: 3 probes"));
        assert!(text.contains("passed: 1"));
        assert!(text.contains("failed: 2"));
        assert!(text.contains("2 probe(s) failed"));
    }

    #[test]
    fn test_render_transport_failure() {
        let r = report(
            vec![outcome(
                "health",
                0,
                ProbeBody::Text("Connection failed: refused".into()),
                false,
            )],
            &RunConfig::default(),
        );

        let text = Reporter::render(&r);
        assert!(text.contains("✗ Connection failed: refused"));
        assert!(!text.contains("Status: 0"));
        assert!(!text.contains("Token: configured"));
    }

    #[test]
    fn test_redact_token() {
        assert_eq!(
            redact_token("http://h:1/api/v1/player?name=Steve&token=abc"),
            "http://h:1/api/v1/player?name=Steve&token=***"
        );
        assert_eq!(redact_token("http://h:1/"), "http://h:1/");
    }

    #[test]
    fn test_render_all_passed() {
        let r = report(
            vec![outcome("health", 200, ProbeBody::Absent, false)],
            &RunConfig::default(),
        );
        assert!(Reporter::render(&r).contains("All probes passed!"));
    }

    #[test]
    fn test_render_json() {
        let r = report(
            vec![outcome(
                "health",
                200,
                ProbeBody::Json(json!({"status": "ok"})),
                false,
            )],
            &RunConfig::default(),
        );

        let rendered = Reporter::render_as(&r, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["passed"], 1);
        assert_eq!(value["outcomes"][0]["status"], 200);
        assert_eq!(value["outcomes"][0]["body"]["kind"], "json");
        assert_eq!(value["outcomes"][0]["body"]["value"]["status"], "ok");
    }

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("text".parse::<ReportFormat>(), Ok(ReportFormat::Text));
        assert_eq!("JSON".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert!("yaml".parse::<ReportFormat>().is_err());
    }
}
