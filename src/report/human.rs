//! Human-readable report renderer.
//!
//! Terminal output with optional color support.

use super::{summary_text, ReportRenderer};
use crate::checks::{CheckResult, Status};
use crate::runner::Verdict;
use crate::ui::PreinstallTheme;
use std::io::Write;

/// Renders a report for terminal display.
pub struct HumanRenderer {
    theme: PreinstallTheme,
}

impl HumanRenderer {
    /// Create a renderer; `use_color` enables ANSI styling.
    pub fn new(use_color: bool) -> Self {
        Self {
            theme: PreinstallTheme::for_color(use_color),
        }
    }
}

impl ReportRenderer for HumanRenderer {
    fn render<W: Write>(
        &self,
        results: &[CheckResult],
        verdict: &Verdict,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let theme = &self.theme;

        writeln!(writer, "{}", theme.format_header("System Requirements Check"))?;
        writeln!(writer)?;

        let (headline, detail) = summary_text(verdict);
        let headline_style = if verdict.can_install {
            &theme.success
        } else {
            &theme.error
        };
        writeln!(writer, "{}", headline_style.apply_to(headline))?;
        writeln!(writer, "{}", detail)?;
        writeln!(writer)?;

        for result in results {
            let style = if result.status == Status::Warn {
                &theme.warning
            } else {
                theme.class_style(result.class())
            };

            writeln!(
                writer,
                "  {} {}",
                theme.counter.apply_to(format!("[{:>2}]", result.id.position())),
                style.apply_to(&result.message)
            )?;
            if !result.details.is_empty() {
                writeln!(writer, "       {}", theme.dim.apply_to(&result.details))?;
            }
        }

        if verdict.advisories > 0 {
            writeln!(writer)?;
            writeln!(
                writer,
                "{}",
                theme.hint.apply_to(format!(
                    "{} advisory issue(s) found; installation can still proceed.",
                    verdict.advisories
                ))
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckId;

    fn render(results: &[CheckResult]) -> String {
        let verdict = Verdict::from_results(results);
        let mut out = Vec::new();
        HumanRenderer::new(false)
            .render(results, &verdict, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_ready_summary() {
        let out = render(&[CheckResult::pass(
            CheckId::OsVersion,
            "OS version: 10.0",
            "Supported OS version detected",
        )]);

        assert!(out.contains("✓ Ready to Install"));
        assert!(out.contains("1 of 1 checks passed."));
        assert!(out.contains("[ 1] ✓ OS version: 10.0"));
        assert!(out.contains("Supported OS version detected"));
    }

    #[test]
    fn renders_blocked_summary() {
        let out = render(&[CheckResult::fail(
            CheckId::Elevation,
            "Not running as Administrator",
            "",
        )]);

        assert!(out.contains("✗ Cannot Install"));
        assert!(out.contains("1 critical requirement(s) not met."));
        assert!(out.contains("[ 2] ✗ Not running as Administrator"));
    }

    #[test]
    fn notes_advisories() {
        let out = render(&[CheckResult::fail(
            CheckId::DatabasePath,
            "Database path does not exist",
            "",
        )]);

        assert!(out.contains("✓ Ready to Install"));
        assert!(out.contains("1 advisory issue(s) found"));
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let out = render(&[CheckResult::fail(CheckId::Port, "busy", "details")]);
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn preserves_result_order() {
        let out = render(&[
            CheckResult::pass(CheckId::Firewall, "first", ""),
            CheckResult::pass(CheckId::OsVersion, "second", ""),
        ]);
        assert!(out.find("first").unwrap() < out.find("second").unwrap());
    }
}
