//! Overall installability verdict.

use serde::Serialize;

use crate::checks::{CheckResult, ReportClass};

/// Aggregate of a checklist run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Results whose condition is satisfied.
    pub passed: usize,
    /// Number of results.
    pub total: usize,
    /// Failed critical results.
    pub critical_failures: usize,
    /// Failed non-critical results.
    pub advisories: usize,
    /// Whether installation may proceed.
    pub can_install: bool,
}

impl Verdict {
    /// Tally a result sequence. Installation may proceed iff no critical
    /// check failed.
    pub fn from_results(results: &[CheckResult]) -> Self {
        let count = |class: ReportClass| results.iter().filter(|r| r.class() == class).count();

        let critical_failures = count(ReportClass::Blocking);
        let verdict = Self {
            passed: count(ReportClass::Passed),
            total: results.len(),
            critical_failures,
            advisories: count(ReportClass::Advisory),
            can_install: critical_failures == 0,
        };

        tracing::info!(
            "{} of {} checks passed, {} critical failure(s), {} advisory",
            verdict.passed,
            verdict.total,
            verdict.critical_failures,
            verdict.advisories
        );
        verdict
    }
}
