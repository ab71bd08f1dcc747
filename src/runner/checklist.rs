//! Checklist execution.

use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Instant;

use crate::checks::{probe_failed, run_check, CheckId, CheckResult};
use crate::config::CheckSettings;
use crate::facts::HostFacts;

/// Progress events emitted while the checklist runs.
#[derive(Debug)]
pub enum ChecklistProgress<'a> {
    /// A check is about to start (sequential mode only).
    CheckStarting {
        id: CheckId,
        index: usize,
        total: usize,
    },
    /// A check finished.
    CheckFinished { result: &'a CheckResult },
}

/// Runs the ten checks against one set of facts.
#[derive(Debug, Clone, Default)]
pub struct Checklist {
    settings: CheckSettings,
    parallel: bool,
}

impl Checklist {
    /// Create a checklist with the given parameters.
    pub fn new(settings: CheckSettings) -> Self {
        Self {
            settings,
            parallel: false,
        }
    }

    /// Run checks on one thread each instead of one after another.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The parameters checks are evaluated with.
    pub fn settings(&self) -> &CheckSettings {
        &self.settings
    }

    /// Run every check once. Results are always in declaration order.
    pub fn run(&self, facts: &dyn HostFacts) -> Vec<CheckResult> {
        self.run_with_progress(facts, |_| {})
    }

    /// Run every check once, reporting progress.
    pub fn run_with_progress(
        &self,
        facts: &dyn HostFacts,
        mut on_progress: impl FnMut(ChecklistProgress<'_>),
    ) -> Vec<CheckResult> {
        let start = Instant::now();

        let results = if self.parallel {
            let results = self.run_parallel(facts);
            for result in &results {
                on_progress(ChecklistProgress::CheckFinished { result });
            }
            results
        } else {
            let total = CheckId::ALL.len();
            let mut results = Vec::with_capacity(total);
            for (index, id) in CheckId::ALL.into_iter().enumerate() {
                on_progress(ChecklistProgress::CheckStarting { id, index, total });
                let result = self.run_one(id, facts);
                on_progress(ChecklistProgress::CheckFinished { result: &result });
                results.push(result);
            }
            results
        };

        tracing::debug!(
            "Ran {} checks in {:?} ({})",
            results.len(),
            start.elapsed(),
            if self.parallel { "parallel" } else { "sequential" }
        );
        results
    }

    fn run_parallel(&self, facts: &dyn HostFacts) -> Vec<CheckResult> {
        thread::scope(|scope| {
            let handles: Vec<_> = CheckId::ALL
                .into_iter()
                .map(|id| (id, scope.spawn(move || self.run_one(id, facts))))
                .collect();

            handles
                .into_iter()
                .map(|(id, handle)| {
                    handle.join().unwrap_or_else(|payload| {
                        probe_failed(id, &self.settings, &panic_message(payload.as_ref()))
                    })
                })
                .collect()
        })
    }

    /// Run one check, converting a panic into that check's probe failure.
    fn run_one(&self, id: CheckId, facts: &dyn HostFacts) -> CheckResult {
        tracing::debug!("Running check {} ({})", id, id.name());

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            run_check(id, &self.settings, facts)
        }))
        .unwrap_or_else(|payload| {
            let reason = format!("check panicked: {}", panic_message(payload.as_ref()));
            probe_failed(id, &self.settings, &reason)
        });

        tracing::debug!("Check {} finished: {}", id, result.message);
        result
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
