//! Driver and runtime presence checks, read from the configuration store.

use std::path::Path;

use super::{keys, probe_failed, CheckId, CheckResult};
use crate::config::CheckSettings;
use crate::facts::{ConfigKey, HostFacts, ProbeError};

const DRIVER_DOWNLOAD: &str =
    "Download from: https://www.microsoft.com/en-us/download/details.aspx?id=14839";

const NATIVE_RUNTIME_DOWNLOAD: &str =
    "Download VC++ 2015-2022 x64 from: https://aka.ms/vs/17/release/vc_redist.x64.exe";

/// Outcome of scanning a list of candidate keys.
enum Scan<T> {
    Found(T),
    /// At least one key was readable, none matched.
    NotFound,
    /// Every lookup failed; carries the last error.
    Failed(ProbeError),
}

/// Try each candidate key in order until `accept` returns a value.
///
/// A lookup error on one key is logged and the next key is tried.
fn scan_keys<T>(
    facts: &dyn HostFacts,
    candidates: &[&str],
    mut accept: impl FnMut(&str, &ConfigKey) -> Option<T>,
) -> Scan<T> {
    let mut last_error = None;
    let mut readable = false;

    for key in candidates {
        match facts.config_key(key) {
            Ok(Some(values)) => {
                readable = true;
                if let Some(found) = accept(key, &values) {
                    return Scan::Found(found);
                }
            }
            Ok(None) => readable = true,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", key, e);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if !readable => Scan::Failed(e),
        _ => Scan::NotFound,
    }
}

/// Check 3: the legacy database ODBC driver is registered and its binary exists.
pub fn check_database_driver(settings: &CheckSettings, facts: &dyn HostFacts) -> CheckResult {
    let id = CheckId::DatabaseDriver;

    let scan = scan_keys(facts, &keys::DRIVER_KEYS, |key, values| {
        let driver = values.get_str("Driver").filter(|d| !d.is_empty())?;
        match facts.path_exists(Path::new(driver)) {
            Ok(true) => Some(driver.to_string()),
            Ok(false) => {
                tracing::debug!("{} points at missing driver {}", key, driver);
                None
            }
            Err(e) => {
                tracing::debug!("Cannot stat driver {}: {}", driver, e);
                None
            }
        }
    });

    match scan {
        Scan::Found(driver) => CheckResult::pass(
            id,
            "Visual FoxPro ODBC Driver installed",
            format!("Driver found: {}", driver),
        ),
        Scan::NotFound => {
            CheckResult::fail(id, "Visual FoxPro ODBC Driver NOT found", DRIVER_DOWNLOAD)
        }
        Scan::Failed(e) => probe_failed(id, settings, &e.to_string()),
    }
}

/// Check 4: the VC++ 2015-2022 x64 runtime reports itself installed.
pub fn check_native_runtime(settings: &CheckSettings, facts: &dyn HostFacts) -> CheckResult {
    let id = CheckId::NativeRuntime;

    let scan = scan_keys(facts, &keys::NATIVE_RUNTIME_KEYS, |_, values| {
        if values.get_int("Installed") == Some(1) {
            Some(values.get_str("Version").unwrap_or("Unknown").to_string())
        } else {
            None
        }
    });

    match scan {
        Scan::Found(version) => CheckResult::pass(
            id,
            "Visual C++ Redistributable installed",
            format!("Version: {}", version),
        ),
        Scan::NotFound => CheckResult::fail(
            id,
            "Visual C++ Redistributable NOT found",
            NATIVE_RUNTIME_DOWNLOAD,
        ),
        Scan::Failed(e) => probe_failed(id, settings, &e.to_string()),
    }
}

/// Check 5: .NET Framework 4.7.2 or later. Advisory only.
pub fn check_managed_runtime(settings: &CheckSettings, facts: &dyn HostFacts) -> CheckResult {
    let id = CheckId::ManagedRuntime;

    let values = match facts.config_key(keys::MANAGED_RUNTIME_KEY) {
        Ok(Some(values)) => values,
        Ok(None) => {
            return CheckResult::fail(
                id,
                ".NET Framework not detected",
                "Recommended for installer components",
            )
        }
        Err(e) => return probe_failed(id, settings, &e.to_string()),
    };

    let release = values.get_int("Release").unwrap_or(0);
    if release >= settings.min_managed_release {
        CheckResult::pass(
            id,
            ".NET Framework 4.7.2+ installed",
            format!("Release: {}", release),
        )
    } else {
        CheckResult::fail(
            id,
            ".NET Framework 4.7.2+ recommended",
            "Some features may not work properly",
        )
    }
}
