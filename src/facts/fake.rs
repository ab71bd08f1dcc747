//! Deterministic fact provider.
//!
//! `StaticFacts` answers every query from data configured up front, so check
//! logic (thresholds, messages, probe-failure policy) can be exercised
//! without touching the host.
//!
//! # Example
//!
//! ```
//! use preinstall::facts::{HostFacts, StaticFacts};
//!
//! let facts = StaticFacts::healthy().with_listener(8787);
//! assert!(facts.listening_ports().unwrap().contains(&8787));
//! assert!(facts.is_elevated().unwrap());
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{ConfigKey, ConfigValue, HostFacts, OsVersion, ProbeError, ToolOutput};
use crate::checks::keys;

/// Free space a healthy host reports (10 GiB).
const HEALTHY_FREE_SPACE: u64 = 10 * 1024 * 1024 * 1024;

/// Driver binary a healthy host has registered.
pub const HEALTHY_DRIVER_PATH: &str = r"C:\Windows\SysWOW64\vfpodbc.dll";

/// Fact provider backed by in-memory data.
#[derive(Debug, Clone)]
pub struct StaticFacts {
    os: Result<OsVersion, ProbeError>,
    elevated: Result<bool, ProbeError>,
    config: BTreeMap<String, Result<ConfigKey, ProbeError>>,
    files: BTreeSet<PathBuf>,
    dirs: BTreeMap<PathBuf, Result<Vec<PathBuf>, ProbeError>>,
    free_space: Result<u64, ProbeError>,
    ports: Result<Vec<u16>, ProbeError>,
    tools: BTreeMap<String, Result<ToolOutput, ProbeError>>,
}

impl Default for StaticFacts {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticFacts {
    /// A bare host: old OS, not elevated, empty configuration store, no
    /// files, no free space, no listeners, no tools.
    pub fn new() -> Self {
        Self {
            os: Ok(OsVersion {
                description: "Unknown 0.0".to_string(),
                major: 0,
                minor: 0,
                build: 0,
            }),
            elevated: Ok(false),
            config: BTreeMap::new(),
            files: BTreeSet::new(),
            dirs: BTreeMap::new(),
            free_space: Ok(0),
            ports: Ok(Vec::new()),
            tools: BTreeMap::new(),
        }
    }

    /// A host on which every check passes without caveats.
    pub fn healthy() -> Self {
        Self::new()
            .with_os_version("Microsoft Windows [Version 10.0.19045.3803]")
            .with_elevated(true)
            .with_config_value(
                keys::DRIVER_KEYS[0],
                "Driver",
                ConfigValue::Str(HEALTHY_DRIVER_PATH.to_string()),
            )
            .with_file(HEALTHY_DRIVER_PATH)
            .with_config_value(keys::NATIVE_RUNTIME_KEYS[0], "Installed", ConfigValue::Int(1))
            .with_config_value(
                keys::NATIVE_RUNTIME_KEYS[0],
                "Version",
                ConfigValue::Str("v14.38.33135.00".to_string()),
            )
            .with_config_value(keys::MANAGED_RUNTIME_KEY, "Release", ConfigValue::Int(528040))
            .with_config_value(keys::FIREWALL_KEY, "EnableFirewall", ConfigValue::Int(1))
            .with_available_space(HEALTHY_FREE_SPACE)
            .with_tool("cloudflared", ToolOutput::ok("cloudflared version 2024.6.1\n"))
    }

    /// Report this OS version string.
    ///
    /// Strings without a dotted number parse as version 0.0.
    pub fn with_os_version(mut self, description: &str) -> Self {
        self.os = Ok(OsVersion::parse(description).unwrap_or(OsVersion {
            description: description.to_string(),
            major: 0,
            minor: 0,
            build: 0,
        }));
        self
    }

    /// Fail the OS version probe.
    pub fn with_os_error(mut self, err: ProbeError) -> Self {
        self.os = Err(err);
        self
    }

    /// Report the elevation state.
    pub fn with_elevated(mut self, elevated: bool) -> Self {
        self.elevated = Ok(elevated);
        self
    }

    /// Fail the elevation probe.
    pub fn with_elevation_error(mut self, err: ProbeError) -> Self {
        self.elevated = Err(err);
        self
    }

    /// Create `key` (if needed) and set a value under it.
    pub fn with_config_value(mut self, key: &str, name: &str, value: ConfigValue) -> Self {
        let entry = self
            .config
            .entry(key.to_string())
            .or_insert_with(|| Ok(ConfigKey::new()));
        if entry.is_err() {
            *entry = Ok(ConfigKey::new());
        }
        if let Ok(k) = entry {
            k.insert(name, value);
        }
        self
    }

    /// Create an empty key.
    pub fn with_config_key(mut self, key: &str) -> Self {
        self.config
            .entry(key.to_string())
            .or_insert_with(|| Ok(ConfigKey::new()));
        self
    }

    /// Remove a key, so lookups report it as absent.
    pub fn without_config_key(mut self, key: &str) -> Self {
        self.config.remove(key);
        self
    }

    /// Make lookups of `key` fail.
    pub fn with_config_error(mut self, key: &str, err: ProbeError) -> Self {
        self.config.insert(key.to_string(), Err(err));
        self
    }

    /// Mark a file as present.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }

    /// Create a directory holding the given file names.
    pub fn with_dir(mut self, path: impl Into<PathBuf>, entries: &[&str]) -> Self {
        let path = path.into();
        let listing = entries.iter().map(|name| path.join(name)).collect();
        self.dirs.insert(path, Ok(listing));
        self
    }

    /// Create a directory whose listing fails.
    pub fn with_unreadable_dir(mut self, path: impl Into<PathBuf>, err: ProbeError) -> Self {
        self.dirs.insert(path.into(), Err(err));
        self
    }

    /// Report the free space on every volume.
    pub fn with_available_space(mut self, bytes: u64) -> Self {
        self.free_space = Ok(bytes);
        self
    }

    /// Fail the free-space probe.
    pub fn with_space_error(mut self, err: ProbeError) -> Self {
        self.free_space = Err(err);
        self
    }

    /// Add an active listener.
    pub fn with_listener(mut self, port: u16) -> Self {
        if let Ok(ports) = &mut self.ports {
            ports.push(port);
        }
        self
    }

    /// Fail listener enumeration.
    pub fn with_ports_error(mut self, err: ProbeError) -> Self {
        self.ports = Err(err);
        self
    }

    /// Make `program` available with the given output.
    pub fn with_tool(mut self, program: &str, output: ToolOutput) -> Self {
        self.tools.insert(program.to_string(), Ok(output));
        self
    }

    /// Make running `program` fail.
    pub fn with_tool_error(mut self, program: &str, err: ProbeError) -> Self {
        self.tools.insert(program.to_string(), Err(err));
        self
    }

    /// Remove `program`, so running it fails as if it were not installed.
    pub fn without_tool(mut self, program: &str) -> Self {
        self.tools.remove(program);
        self
    }
}

impl HostFacts for StaticFacts {
    fn os_version(&self) -> Result<OsVersion, ProbeError> {
        self.os.clone()
    }

    fn is_elevated(&self) -> Result<bool, ProbeError> {
        self.elevated.clone()
    }

    fn config_key(&self, key: &str) -> Result<Option<ConfigKey>, ProbeError> {
        match self.config.get(key) {
            Some(Ok(k)) => Ok(Some(k.clone())),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(None),
        }
    }

    fn path_exists(&self, path: &Path) -> Result<bool, ProbeError> {
        Ok(self.files.contains(path) || self.dirs.contains_key(path))
    }

    fn is_dir(&self, path: &Path) -> Result<bool, ProbeError> {
        Ok(self.dirs.contains_key(path))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, ProbeError> {
        match self.dirs.get(path) {
            Some(listing) => listing.clone(),
            None => Err(ProbeError::Io {
                context: format!("Cannot list {}", path.display()),
                message: "directory not found".to_string(),
            }),
        }
    }

    fn available_space(&self, _path: &Path) -> Result<u64, ProbeError> {
        self.free_space.clone()
    }

    fn listening_ports(&self) -> Result<Vec<u16>, ProbeError> {
        self.ports.clone()
    }

    fn run_tool(
        &self,
        program: &str,
        _args: &[&str],
        _timeout: Duration,
    ) -> Result<ToolOutput, ProbeError> {
        match self.tools.get(program) {
            Some(result) => result.clone(),
            None => Err(ProbeError::Command(format!(
                "Command failed with exit code None: {}",
                program
            ))),
        }
    }
}
