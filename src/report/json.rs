//! JSON report renderer.
//!
//! Machine-readable output for installers and CI pipelines.

use super::ReportRenderer;
use crate::checks::CheckResult;
use crate::runner::Verdict;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Renders a report as JSON.
pub struct JsonRenderer {
    generated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    generated_at: String,
    summary: &'a Verdict,
    checks: Vec<JsonCheck<'a>>,
}

#[derive(Serialize)]
struct JsonCheck<'a> {
    id: String,
    name: &'static str,
    status: &'static str,
    class: &'static str,
    passed: bool,
    critical: bool,
    message: &'a str,
    details: &'a str,
}

impl JsonRenderer {
    /// Create a renderer stamping reports with the current time.
    pub fn new() -> Self {
        Self { generated_at: None }
    }

    /// Stamp reports with a fixed time.
    pub fn at(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: Some(generated_at),
        }
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for JsonRenderer {
    fn render<W: Write>(
        &self,
        results: &[CheckResult],
        verdict: &Verdict,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let checks = results
            .iter()
            .map(|r| JsonCheck {
                id: r.id.to_string(),
                name: r.id.name(),
                status: r.status.as_str(),
                class: r.class().as_str(),
                passed: r.passed(),
                critical: r.critical,
                message: &r.message,
                details: &r.details,
            })
            .collect();

        let report = JsonReport {
            version: env!("CARGO_PKG_VERSION"),
            generated_at: self.generated_at.unwrap_or_else(Utc::now).to_rfc3339(),
            summary: verdict,
            checks,
        };

        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)?;
        Ok(())
    }
}
