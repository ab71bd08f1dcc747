//! Report renderers.
//!
//! A report is a summary block (driven only by the verdict) followed by one
//! entry per check, in checklist order.

pub mod html;
pub mod human;
pub mod json;

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

use crate::checks::CheckResult;
use crate::runner::Verdict;

pub use html::HtmlRenderer;
pub use human::HumanRenderer;
pub use json::JsonRenderer;

/// Output format for reports.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Terminal text
    #[default]
    Human,
    /// Machine-readable JSON
    Json,
    /// Self-contained HTML document
    Html,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            _ => Err(format!("unknown report format: {}", s)),
        }
    }
}

/// Trait for rendering check results.
pub trait ReportRenderer {
    /// Write a report for `results` to `writer`.
    fn render<W: Write>(
        &self,
        results: &[CheckResult],
        verdict: &Verdict,
        writer: &mut W,
    ) -> std::io::Result<()>;
}

/// Summary headline and explanation for a verdict.
pub fn summary_text(verdict: &Verdict) -> (&'static str, String) {
    if verdict.can_install {
        (
            "✓ Ready to Install",
            format!(
                "{} of {} checks passed. You can proceed with the installation.",
                verdict.passed, verdict.total
            ),
        )
    } else {
        (
            "✗ Cannot Install",
            format!(
                "{} critical requirement(s) not met. Please fix the issues below before proceeding.",
                verdict.critical_failures
            ),
        )
    }
}

/// Render a report in the given format into a string.
pub fn render_to_string(
    format: ReportFormat,
    use_color: bool,
    results: &[CheckResult],
    verdict: &Verdict,
) -> crate::error::Result<String> {
    let mut buffer = Vec::new();

    let rendered = match format {
        ReportFormat::Human => HumanRenderer::new(use_color).render(results, verdict, &mut buffer),
        ReportFormat::Json => JsonRenderer::new().render(results, verdict, &mut buffer),
        ReportFormat::Html => HtmlRenderer::new().render(results, verdict, &mut buffer),
    };

    rendered.map_err(|e| crate::error::PreinstallError::RenderFailed {
        format: format!("{:?}", format).to_lowercase(),
        message: e.to_string(),
    })?;

    String::from_utf8(buffer).map_err(|e| crate::error::PreinstallError::RenderFailed {
        format: format!("{:?}", format).to_lowercase(),
        message: e.to_string(),
    })
}
