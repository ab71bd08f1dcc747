//! Operating system and privilege checks.

use super::{probe_failed, CheckId, CheckResult};
use crate::config::CheckSettings;
use crate::facts::HostFacts;

/// Check 1: the OS major version meets the minimum.
pub fn check_os_version(settings: &CheckSettings, facts: &dyn HostFacts) -> CheckResult {
    let id = CheckId::OsVersion;
    let version = match facts.os_version() {
        Ok(v) => v,
        Err(e) => return probe_failed(id, settings, &e.to_string()),
    };

    tracing::debug!(
        "OS version {}.{}.{} ({})",
        version.major,
        version.minor,
        version.build,
        version.description
    );

    if version.major >= settings.min_os_major {
        CheckResult::pass(
            id,
            &format!("OS version: {}", version.description),
            "Supported OS version detected",
        )
    } else {
        CheckResult::fail(
            id,
            "Unsupported OS version",
            format!(
                "Current: {}. Required: major version {} or later (Windows 10 / Windows Server 2019+)",
                version.description, settings.min_os_major
            ),
        )
    }
}

/// Check 2: the process runs with administrative privileges.
pub fn check_elevation(settings: &CheckSettings, facts: &dyn HostFacts) -> CheckResult {
    let id = CheckId::Elevation;
    match facts.is_elevated() {
        Ok(true) => CheckResult::pass(
            id,
            "Running as Administrator",
            "Installer has required privileges",
        ),
        Ok(false) => CheckResult::fail(id, "Not running as Administrator", elevation_hint()),
        Err(e) => probe_failed(id, settings, &e.to_string()),
    }
}

fn elevation_hint() -> &'static str {
    if cfg!(windows) {
        "Please right-click the installer and select 'Run as Administrator'"
    } else {
        "Please run the installer as root"
    }
}
