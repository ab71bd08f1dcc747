//! Readiness checks and the result model they share.
//!
//! Each check is a free function of the check settings and a
//! [`HostFacts`] provider, and produces exactly one [`CheckResult`]. Checks
//! never return errors: a failed probe becomes a result according to
//! [`probe_failed`].
//!
//! # Modules
//!
//! - [`keys`] - Configuration-store keys the checks read
//! - [`system`] - OS version and privilege checks
//! - [`runtime`] - Driver and runtime presence checks
//! - [`storage`] - Disk space and database directory checks
//! - [`network`] - Port availability and firewall checks
//! - [`companion`] - Optional companion tool check

pub mod companion;
pub mod keys;
pub mod network;
pub mod runtime;
pub mod storage;
pub mod system;

use std::fmt;
use std::str::FromStr;

use crate::config::{CheckSettings, FirewallPolicy};
use crate::facts::HostFacts;

/// Identifies one of the ten checks. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CheckId {
    OsVersion,
    Elevation,
    DatabaseDriver,
    NativeRuntime,
    ManagedRuntime,
    DiskSpace,
    DatabasePath,
    Port,
    Firewall,
    CompanionTool,
}

impl CheckId {
    /// Every check, in the order it runs and is reported.
    pub const ALL: [CheckId; 10] = [
        CheckId::OsVersion,
        CheckId::Elevation,
        CheckId::DatabaseDriver,
        CheckId::NativeRuntime,
        CheckId::ManagedRuntime,
        CheckId::DiskSpace,
        CheckId::DatabasePath,
        CheckId::Port,
        CheckId::Firewall,
        CheckId::CompanionTool,
    ];

    /// Stable machine-readable key.
    pub fn key(&self) -> &'static str {
        match self {
            CheckId::OsVersion => "os-version",
            CheckId::Elevation => "elevation",
            CheckId::DatabaseDriver => "database-driver",
            CheckId::NativeRuntime => "native-runtime",
            CheckId::ManagedRuntime => "managed-runtime",
            CheckId::DiskSpace => "disk-space",
            CheckId::DatabasePath => "database-path",
            CheckId::Port => "port",
            CheckId::Firewall => "firewall",
            CheckId::CompanionTool => "companion-tool",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            CheckId::OsVersion => "Operating system version",
            CheckId::Elevation => "Administrator privileges",
            CheckId::DatabaseDriver => "Visual FoxPro ODBC driver",
            CheckId::NativeRuntime => "Visual C++ Redistributable",
            CheckId::ManagedRuntime => ".NET Framework",
            CheckId::DiskSpace => "Free disk space",
            CheckId::DatabasePath => "Database directory",
            CheckId::Port => "Port availability",
            CheckId::Firewall => "Firewall",
            CheckId::CompanionTool => "Companion tool",
        }
    }

    /// Whether a failure of this check blocks installation.
    ///
    /// A property of the check, independent of any outcome.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            CheckId::OsVersion
                | CheckId::Elevation
                | CheckId::DatabaseDriver
                | CheckId::NativeRuntime
                | CheckId::DiskSpace
                | CheckId::Port
        )
    }

    /// 1-based position in the checklist.
    pub fn position(&self) -> usize {
        Self::ALL
            .iter()
            .position(|id| id == self)
            .map(|i| i + 1)
            .unwrap_or_default()
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CheckId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown check: {}", s))
    }
}

/// Outcome of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Condition satisfied.
    Pass,
    /// Condition satisfied, with a caveat worth reporting.
    Warn,
    /// Condition not satisfied.
    Fail,
}

impl Status {
    /// Lowercase name used in machine-readable output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Warn => "warn",
            Status::Fail => "fail",
        }
    }
}

/// How a result is presented and counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportClass {
    /// Passed (with or without a caveat).
    Passed,
    /// Failed, but never blocks installation.
    Advisory,
    /// Failed and blocks installation.
    Blocking,
}

impl ReportClass {
    /// Lowercase name used in machine-readable output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportClass::Passed => "passed",
            ReportClass::Advisory => "advisory",
            ReportClass::Blocking => "blocking",
        }
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Which check produced this result.
    pub id: CheckId,
    /// Outcome.
    pub status: Status,
    /// Copied from [`CheckId::is_critical`].
    pub critical: bool,
    /// Status line, starting with a status glyph.
    pub message: String,
    /// Current value, required threshold, remediation pointer or probe error.
    pub details: String,
}

impl CheckResult {
    /// Build a result; the glyph is chosen from status and criticality.
    pub fn new(id: CheckId, status: Status, message: &str, details: impl Into<String>) -> Self {
        let critical = id.is_critical();
        Self {
            id,
            status,
            critical,
            message: format!("{} {}", glyph(status, critical), message),
            details: details.into(),
        }
    }

    /// Condition satisfied.
    pub fn pass(id: CheckId, message: &str, details: impl Into<String>) -> Self {
        Self::new(id, Status::Pass, message, details)
    }

    /// Condition satisfied, with a caveat.
    pub fn warn(id: CheckId, message: &str, details: impl Into<String>) -> Self {
        Self::new(id, Status::Warn, message, details)
    }

    /// Condition not satisfied.
    pub fn fail(id: CheckId, message: &str, details: impl Into<String>) -> Self {
        Self::new(id, Status::Fail, message, details)
    }

    /// Whether the probed condition is satisfied.
    pub fn passed(&self) -> bool {
        self.status != Status::Fail
    }

    /// Presentation class.
    pub fn class(&self) -> ReportClass {
        match (self.passed(), self.critical) {
            (true, _) => ReportClass::Passed,
            (false, true) => ReportClass::Blocking,
            (false, false) => ReportClass::Advisory,
        }
    }

    /// Whether this result blocks installation.
    pub fn is_blocking(&self) -> bool {
        self.class() == ReportClass::Blocking
    }
}

/// Status glyph: `✓` pass, `⚠` caveat or advisory failure, `✗` blocking failure.
pub fn glyph(status: Status, critical: bool) -> &'static str {
    match status {
        Status::Pass => "✓",
        Status::Warn => "⚠",
        Status::Fail if critical => "✗",
        Status::Fail => "⚠",
    }
}

/// Run a single check.
pub fn run_check(id: CheckId, settings: &CheckSettings, facts: &dyn HostFacts) -> CheckResult {
    match id {
        CheckId::OsVersion => system::check_os_version(settings, facts),
        CheckId::Elevation => system::check_elevation(settings, facts),
        CheckId::DatabaseDriver => runtime::check_database_driver(settings, facts),
        CheckId::NativeRuntime => runtime::check_native_runtime(settings, facts),
        CheckId::ManagedRuntime => runtime::check_managed_runtime(settings, facts),
        CheckId::DiskSpace => storage::check_disk_space(settings, facts),
        CheckId::DatabasePath => storage::check_database_path(settings, facts),
        CheckId::Port => network::check_port(settings, facts),
        CheckId::Firewall => network::check_firewall(settings, facts),
        CheckId::CompanionTool => companion::check_companion_tool(settings, facts),
    }
}

/// Convert a probe failure into a result, following each check's policy.
///
/// Checks 1-8 report the condition as not met. The firewall and companion
/// tool checks stay passed with an advisory message, unless the firewall
/// policy is [`FirewallPolicy::Require`].
pub fn probe_failed(id: CheckId, settings: &CheckSettings, reason: &str) -> CheckResult {
    tracing::warn!("Probe failed for {}: {}", id, reason);

    let message = match id {
        CheckId::OsVersion => "Failed to check OS version".to_string(),
        CheckId::Elevation => "Failed to check privileges".to_string(),
        CheckId::DatabaseDriver => "Failed to check VFP ODBC Driver".to_string(),
        CheckId::NativeRuntime => "Failed to check VC++ Redistributable".to_string(),
        CheckId::ManagedRuntime => "Failed to check .NET Framework".to_string(),
        CheckId::DiskSpace => "Failed to check disk space".to_string(),
        CheckId::DatabasePath => "Cannot access database path".to_string(),
        CheckId::Port => format!("Failed to check port {}", settings.port),
        CheckId::Firewall => "Failed to check firewall status".to_string(),
        CheckId::CompanionTool => format!(
            "Failed to check {} (optional)",
            settings.companion_tool.program
        ),
    };

    let status = match id {
        CheckId::Firewall if settings.firewall_policy == FirewallPolicy::Require => Status::Fail,
        CheckId::Firewall | CheckId::CompanionTool => Status::Warn,
        _ => Status::Fail,
    };

    CheckResult::new(id, status, &message, reason)
}
