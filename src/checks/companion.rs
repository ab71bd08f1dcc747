//! Optional companion tool check.
//!
//! The tunnel client is not needed to install the agent, so this check
//! always passes; a missing, broken or hanging tool only produces an
//! advisory message.

use std::time::Duration;

use super::{CheckId, CheckResult};
use crate::config::CheckSettings;
use crate::facts::{HostFacts, ProbeError};

/// Check 10: the companion tool answers a version query within its timeout.
pub fn check_companion_tool(settings: &CheckSettings, facts: &dyn HostFacts) -> CheckResult {
    let id = CheckId::CompanionTool;
    let tool = &settings.companion_tool;
    let args: Vec<&str> = tool.args.iter().map(String::as_str).collect();
    let timeout = Duration::from_secs(tool.timeout_secs);

    let not_found = || {
        CheckResult::warn(
            id,
            &format!("{} not found (optional)", tool.program),
            tool.install_hint.clone(),
        )
    };

    match facts.run_tool(&tool.program, &args, timeout) {
        Ok(output) if output.succeeded() => CheckResult::pass(
            id,
            &format!("{} installed", tool.program),
            output.stdout.trim(),
        ),
        Ok(output) => {
            tracing::debug!("{} exited with {:?}", tool.program, output.exit_code);
            not_found()
        }
        Err(ProbeError::Timeout { .. }) => {
            tracing::warn!(
                "{} did not answer within {}s",
                tool.program,
                tool.timeout_secs
            );
            not_found()
        }
        Err(e) => {
            tracing::debug!("{} could not be run: {}", tool.program, e);
            not_found()
        }
    }
}
