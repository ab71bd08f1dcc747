//! HTML report renderer.
//!
//! Produces a single self-contained document with inline styles, suitable
//! for opening in a browser from an installer.

use super::{summary_text, ReportRenderer};
use crate::checks::{CheckResult, ReportClass};
use crate::runner::Verdict;
use std::io::Write;

const STYLE: &str = r#"        body { font-family: 'Segoe UI', Arial, sans-serif; margin: 20px; background: #f5f5f5; }
        h1 { color: #2c3e50; }
        .container { max-width: 900px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .check-item { margin: 15px 0; padding: 15px; border-left: 4px solid #ccc; background: #f9f9f9; }
        .passed { border-left-color: #27ae60; }
        .failed { border-left-color: #e74c3c; }
        .warning { border-left-color: #f39c12; }
        .message { font-weight: bold; margin-bottom: 5px; }
        .details { color: #666; font-size: 0.9em; }
        .summary { padding: 20px; margin: 20px 0; border-radius: 5px; }
        .summary.success { background: #d5f4e6; border: 1px solid #27ae60; }
        .summary.error { background: #fadbd8; border: 1px solid #e74c3c; }
        .critical { background: #fee; }
"#;

/// Renders a report as an HTML document.
pub struct HtmlRenderer {
    title: String,
}

impl HtmlRenderer {
    /// Create a renderer with the default title.
    pub fn new() -> Self {
        Self {
            title: "System Requirements Check".to_string(),
        }
    }

    /// Use a custom document title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    fn css_class(result: &CheckResult) -> &'static str {
        match result.class() {
            ReportClass::Passed => "passed",
            ReportClass::Blocking => "failed critical",
            ReportClass::Advisory => "warning",
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for HtmlRenderer {
    fn render<W: Write>(
        &self,
        results: &[CheckResult],
        verdict: &Verdict,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let title = escape(&self.title);

        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html>")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "    <meta charset='UTF-8'>")?;
        writeln!(writer, "    <title>{}</title>", title)?;
        writeln!(writer, "    <style>")?;
        write!(writer, "{}", STYLE)?;
        writeln!(writer, "    </style>")?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;
        writeln!(writer, "    <div class='container'>")?;
        writeln!(writer, "        <h1>{}</h1>", title)?;

        let (headline, detail) = summary_text(verdict);
        let summary_class = if verdict.can_install {
            "success"
        } else {
            "error"
        };
        writeln!(writer, "        <div class='summary {}'>", summary_class)?;
        writeln!(writer, "            <h2>{}</h2>", headline)?;
        writeln!(writer, "            <p>{}</p>", escape(&detail))?;
        writeln!(writer, "        </div>")?;

        writeln!(writer, "        <div style='margin-top: 30px;'>")?;
        for result in results {
            writeln!(
                writer,
                "            <div class='check-item {}' data-check='{}'>",
                Self::css_class(result),
                result.id
            )?;
            writeln!(
                writer,
                "                <div class='message'>{}</div>",
                escape(&result.message)
            )?;
            writeln!(
                writer,
                "                <div class='details'>{}</div>",
                escape(&result.details)
            )?;
            writeln!(writer, "            </div>")?;
        }
        writeln!(writer, "        </div>")?;

        writeln!(writer, "    </div>")?;
        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")?;

        Ok(())
    }
}

/// Escape text for HTML element content and single- or double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckId;

    fn render(results: &[CheckResult]) -> String {
        let verdict = Verdict::from_results(results);
        let mut out = Vec::new();
        HtmlRenderer::new()
            .render(results, &verdict, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_success_summary() {
        let html = render(&[
            CheckResult::pass(CheckId::OsVersion, "OS version: 10.0", "Supported"),
            CheckResult::warn(CheckId::CompanionTool, "cloudflared not found (optional)", ""),
        ]);

        assert!(html.contains("<div class='summary success'>"));
        assert!(html.contains("<h2>✓ Ready to Install</h2>"));
        assert!(html.contains(
            "<p>2 of 2 checks passed. You can proceed with the installation.</p>"
        ));
    }

    #[test]
    fn renders_error_summary() {
        let html = render(&[CheckResult::fail(
            CheckId::Port,
            "Port 8787 is already in use",
            "",
        )]);

        assert!(html.contains("<div class='summary error'>"));
        assert!(html.contains("<h2>✗ Cannot Install</h2>"));
        assert!(html.contains("1 critical requirement(s) not met."));
    }

    #[test]
    fn assigns_css_class_per_outcome() {
        let html = render(&[
            CheckResult::pass(CheckId::OsVersion, "a", ""),
            CheckResult::fail(CheckId::Elevation, "b", ""),
            CheckResult::fail(CheckId::ManagedRuntime, "c", ""),
        ]);

        assert!(html.contains("check-item passed' data-check='os-version'"));
        assert!(html.contains("check-item failed critical' data-check='elevation'"));
        assert!(html.contains("check-item warning' data-check='managed-runtime'"));
    }

    #[test]
    fn preserves_result_order() {
        let html = render(&[
            CheckResult::pass(CheckId::Port, "first entry", ""),
            CheckResult::pass(CheckId::OsVersion, "second entry", ""),
        ]);

        let first = html.find("first entry").unwrap();
        let second = html.find("second entry").unwrap();
        assert!(first < second);
    }

    #[test]
    fn escapes_message_and_details() {
        let html = render(&[CheckResult::fail(
            CheckId::DatabasePath,
            "Database path does not exist",
            "Path: C:\\<script>alert('x')</script> & more",
        )]);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
    }

    #[test]
    fn custom_title_is_used() {
        let verdict = Verdict::from_results(&[]);
        let mut out = Vec::new();
        HtmlRenderer::new()
            .with_title("Agent <Setup>")
            .render(&[], &verdict, &mut out)
            .unwrap();
        let html = String::from_utf8(out).unwrap();

        assert!(html.contains("<title>Agent &lt;Setup&gt;</title>"));
    }

    #[test]
    fn escape_leaves_plain_text() {
        assert_eq!(escape("✓ Port 8787 is available"), "✓ Port 8787 is available");
    }
}
