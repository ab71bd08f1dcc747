//! Configuration schema definitions.
//!
//! These structs map to the YAML configuration file format. Every field has
//! a default, so an empty or missing file yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::report::ReportFormat;

/// Port the agent listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 8787;

/// Root configuration structure for `.preinstall/config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreinstallConfig {
    /// Presentation settings
    pub settings: Settings,

    /// Check parameters and thresholds
    pub checks: CheckSettings,
}

/// Presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default output mode: verbose, normal, quiet, silent
    pub default_output: OutputMode,

    /// Default report format: human, json, html
    pub format: ReportFormat,

    /// Run checks concurrently
    #[serde(skip_serializing_if = "is_false")]
    pub parallel: bool,
}

fn is_false(v: &bool) -> bool {
    !v
}

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}

/// What a non-enabled firewall means for the firewall check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallPolicy {
    /// Report the state; the check always passes.
    #[default]
    Advisory,
    /// A disabled or unknown firewall fails the check (never blocking).
    Require,
}

/// Parameters the checks are evaluated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSettings {
    /// Port the agent will listen on
    pub port: u16,

    /// Directory holding the legacy database tables, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Minimum OS major version
    pub min_os_major: u32,

    /// Minimum free space on the install volume, in MiB
    pub min_free_space_mb: u64,

    /// Minimum .NET Framework release number (461808 = 4.7.2)
    pub min_managed_release: u64,

    /// Install directory whose volume is measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<PathBuf>,

    /// Firewall check policy
    pub firewall_policy: FirewallPolicy,

    /// Optional companion tool probe
    pub companion_tool: CompanionTool,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: None,
            min_os_major: 10,
            min_free_space_mb: 500,
            min_managed_release: 461_808,
            install_dir: None,
            firewall_policy: FirewallPolicy::default(),
            companion_tool: CompanionTool::default(),
        }
    }
}

/// External tool probed by the companion tool check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionTool {
    /// Program name or path
    pub program: String,

    /// Arguments for a version query
    pub args: Vec<String>,

    /// Seconds to wait before giving up
    pub timeout_secs: u64,

    /// Shown when the tool is missing
    pub install_hint: String,
}

impl Default for CompanionTool {
    fn default() -> Self {
        Self {
            program: "cloudflared".to_string(),
            args: vec!["--version".to_string()],
            timeout_secs: 5,
            install_hint:
                "Install cloudflared for Cloudflare Tunnel support: winget install Cloudflare.cloudflared"
                    .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mapping_yields_defaults() {
        let config: PreinstallConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, PreinstallConfig::default());
        assert_eq!(config.checks.port, 8787);
        assert_eq!(config.checks.min_free_space_mb, 500);
        assert_eq!(config.checks.min_managed_release, 461808);
        assert_eq!(config.checks.companion_tool.program, "cloudflared");
        assert_eq!(config.checks.companion_tool.timeout_secs, 5);
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
settings:
  default_output: quiet
  format: json
  parallel: true
checks:
  port: 9000
  database_path: D:\Data\Fox
  min_os_major: 11
  min_free_space_mb: 1024
  install_dir: D:\Agent
  firewall_policy: require
  companion_tool:
    program: cloudflared.exe
    args: ["version"]
    timeout_secs: 2
"#;
        let config: PreinstallConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.settings.default_output, OutputMode::Quiet);
        assert_eq!(config.settings.format, ReportFormat::Json);
        assert!(config.settings.parallel);
        assert_eq!(config.checks.port, 9000);
        assert_eq!(
            config.checks.database_path,
            Some(PathBuf::from(r"D:\Data\Fox"))
        );
        assert_eq!(config.checks.min_os_major, 11);
        assert_eq!(config.checks.firewall_policy, FirewallPolicy::Require);
        assert_eq!(config.checks.companion_tool.program, "cloudflared.exe");
        assert_eq!(config.checks.companion_tool.args, vec!["version"]);
        // unspecified fields keep their defaults
        assert_eq!(config.checks.min_managed_release, 461808);
        assert!(config
            .checks
            .companion_tool
            .install_hint
            .contains("winget install"));
    }

    #[test]
    fn rejects_unknown_firewall_policy() {
        let result: Result<PreinstallConfig, _> =
            serde_yaml::from_str("checks:\n  firewall_policy: maybe\n");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_out_of_range_port() {
        let result: Result<PreinstallConfig, _> = serde_yaml::from_str("checks:\n  port: 70000\n");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_without_unset_paths() {
        let yaml = serde_yaml::to_string(&PreinstallConfig::default()).unwrap();
        assert!(!yaml.contains("database_path"));
        assert!(!yaml.contains("parallel"));
        assert!(yaml.contains("port: 8787"));
    }
}
