//! Fact providers: the narrow boundary between checks and the host.
//!
//! Checks never touch the host directly. Every raw fact they need (OS
//! version, elevation, configuration-store values, filesystem metadata, free
//! space, bound listeners, external tool output) comes through
//! [`HostFacts`]. Each method is a single blocking query with no side
//! effects, and reports failure as a [`ProbeError`].
//!
//! # Modules
//!
//! - [`system`] - [`SystemFacts`], backed by the real host
//! - [`fake`] - [`StaticFacts`], deterministic facts for tests and dry runs
//! - [`registry`] - Windows configuration-store reads through the registry API
//! - [`ports`] - Listener enumeration parsers (`/proc/net/tcp`, `netstat`)

pub mod fake;
pub mod ports;
pub mod registry;
pub mod system;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;

use crate::error::PreinstallError;

pub use fake::StaticFacts;
pub use system::SystemFacts;

/// First dotted version number in a string (`major.minor[.build]`).
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("VERSION_REGEX must compile")
});

/// A fact provider call that could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The fact cannot be obtained on this host.
    #[error("{fact} is not available on this platform")]
    Unavailable { fact: String },

    /// Filesystem or OS call failed.
    #[error("{context}: {message}")]
    Io { context: String, message: String },

    /// A helper program could not be started or failed.
    #[error("{0}")]
    Command(String),

    /// A helper program did not finish in time.
    #[error("{program} did not respond within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    /// Raw output could not be interpreted.
    #[error("Unexpected output: {0}")]
    Parse(String),
}

impl ProbeError {
    /// Wrap an I/O error with a short description of what was attempted.
    pub fn io(context: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            message: err.to_string(),
        }
    }

    /// A fact that the current platform cannot provide.
    pub fn unavailable(fact: impl Into<String>) -> Self {
        Self::Unavailable { fact: fact.into() }
    }
}

impl From<PreinstallError> for ProbeError {
    fn from(err: PreinstallError) -> Self {
        match err {
            PreinstallError::CommandTimedOut { command, timeout } => Self::Timeout {
                program: command,
                timeout,
            },
            other => Self::Command(other.to_string()),
        }
    }
}

/// Operating system version as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsVersion {
    /// Human-readable version string (e.g. `Microsoft Windows [Version 10.0.19045.3803]`).
    pub description: String,
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl OsVersion {
    /// Extract the first dotted version number from a description.
    ///
    /// Returns `None` if the string contains no `major.minor` pair.
    pub fn parse(description: &str) -> Option<Self> {
        let caps = VERSION_REGEX.captures(description)?;
        let number = |i: usize| {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(0)
        };

        Some(Self {
            description: description.trim().to_string(),
            major: number(1),
            minor: number(2),
            build: number(3),
        })
    }
}

/// A typed value from the configuration store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Str(String),
    Int(u64),
}

impl ConfigValue {
    /// The value as text, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// The value as an integer, if it is numeric.
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }
}

/// The named values stored under one configuration-store key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigKey {
    values: BTreeMap<String, ConfigValue>,
}

impl ConfigKey {
    /// Create an empty key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, replacing any previous value of the same name.
    pub fn with(mut self, name: &str, value: ConfigValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a value.
    pub fn insert(&mut self, name: &str, value: ConfigValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Look up a value by name. Names compare case-insensitively, as in the
    /// Windows registry.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.values
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// String value by name.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ConfigValue::as_str)
    }

    /// Integer value by name.
    pub fn get_int(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(ConfigValue::as_int)
    }

    /// Number of values under this key.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the key holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Captured result of running an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,
    /// Standard output.
    pub stdout: String,
}

impl ToolOutput {
    /// Output of a tool that exited with code 0.
    pub fn ok(stdout: &str) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.to_string(),
        }
    }

    /// Whether the tool exited with code 0.
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Raw host facts the checks are evaluated against.
///
/// Implementations must be shareable across threads so the checklist can
/// run checks concurrently.
pub trait HostFacts: Send + Sync {
    /// Operating system version.
    fn os_version(&self) -> Result<OsVersion, ProbeError>;

    /// Whether the current process runs with elevated rights.
    fn is_elevated(&self) -> Result<bool, ProbeError>;

    /// Open a key in the hierarchical configuration store.
    ///
    /// `Ok(None)` means the key does not exist.
    fn config_key(&self, key: &str) -> Result<Option<ConfigKey>, ProbeError>;

    /// Whether a file or directory exists at `path`.
    fn path_exists(&self, path: &Path) -> Result<bool, ProbeError>;

    /// Whether `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> Result<bool, ProbeError>;

    /// Top-level entries of a directory.
    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, ProbeError>;

    /// Bytes available to the current user on the volume holding `path`.
    fn available_space(&self, path: &Path) -> Result<u64, ProbeError>;

    /// TCP ports with an active listener on any local address.
    fn listening_ports(&self) -> Result<Vec<u16>, ProbeError>;

    /// Run an external program non-interactively, bounded by `timeout`.
    fn run_tool(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<ToolOutput, ProbeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_version_parses_windows_ver_output() {
        let v = OsVersion::parse("Microsoft Windows [Version 10.0.19045.3803]").unwrap();
        assert_eq!(v.major, 10);
        assert_eq!(v.minor, 0);
        assert_eq!(v.build, 19045);
        assert_eq!(v.description, "Microsoft Windows [Version 10.0.19045.3803]");
    }

    #[test]
    fn os_version_parses_two_part_version() {
        let v = OsVersion::parse("Windows 6.1").unwrap();
        assert_eq!(v.major, 6);
        assert_eq!(v.minor, 1);
        assert_eq!(v.build, 0);
    }

    #[test]
    fn os_version_parses_kernel_release() {
        let v = OsVersion::parse("Linux 6.8.0-45-generic").unwrap();
        assert_eq!(v.major, 6);
        assert_eq!(v.minor, 8);
    }

    #[test]
    fn os_version_rejects_text_without_numbers() {
        assert!(OsVersion::parse("unknown").is_none());
    }

    #[test]
    fn config_key_lookup_is_case_insensitive() {
        let key = ConfigKey::new().with("Driver", ConfigValue::Str("vfpodbc.dll".into()));
        assert_eq!(key.get_str("driver"), Some("vfpodbc.dll"));
        assert_eq!(key.get_str("DRIVER"), Some("vfpodbc.dll"));
    }

    #[test]
    fn config_value_type_accessors() {
        assert_eq!(ConfigValue::Int(1).as_int(), Some(1));
        assert_eq!(ConfigValue::Int(1).as_str(), None);
        assert_eq!(ConfigValue::Str("x".into()).as_str(), Some("x"));
        assert_eq!(ConfigValue::Str("1".into()).as_int(), None);
    }

    #[test]
    fn probe_error_from_timeout_keeps_limit() {
        let err: ProbeError = PreinstallError::CommandTimedOut {
            command: "cloudflared --version".into(),
            timeout: Duration::from_secs(5),
        }
        .into();
        assert_eq!(
            err,
            ProbeError::Timeout {
                program: "cloudflared --version".into(),
                timeout: Duration::from_secs(5),
            }
        );
        assert!(err.to_string().contains("5s"));
    }

    #[test]
    fn probe_timeout_shows_milliseconds() {
        let err = ProbeError::Timeout {
            program: "netstat -an".into(),
            timeout: Duration::from_millis(500),
        };
        assert_eq!(err.to_string(), "netstat -an did not respond within 500ms");
    }

    #[test]
    fn probe_error_from_command_failure() {
        let err: ProbeError = PreinstallError::CommandFailed {
            command: "netstat -an".into(),
            code: None,
        }
        .into();
        assert!(matches!(err, ProbeError::Command(_)));
        assert!(err.to_string().contains("netstat -an"));
    }

    #[test]
    fn tool_output_success() {
        assert!(ToolOutput::ok("v1").succeeded());
        let failed = ToolOutput {
            exit_code: Some(1),
            stdout: String::new(),
        };
        assert!(!failed.succeeded());
    }
}
