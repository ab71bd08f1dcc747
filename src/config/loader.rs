//! Configuration file discovery and loading.
//!
//! Missing files are not an error: with nothing on disk the built-in
//! defaults apply.

use crate::config::merger::merge_configs;
use crate::config::schema::PreinstallConfig;
use crate::error::{PreinstallError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding configuration files, both per-user and per-project.
pub const CONFIG_DIR: &str = ".preinstall";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.preinstall/config.yml`)
/// 2. Project config (`.preinstall/config.yml`)
/// 3. Local overrides (`.preinstall/config.local.yml`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config: ~/.preinstall/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .preinstall/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .preinstall/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            user_global: Self::find_user_global(),
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// User global config plus one explicit file in place of the project
    /// layers.
    pub fn explicit(config_file: &Path) -> Self {
        Self {
            user_global: Self::find_user_global(),
            project: Some(config_file.to_path_buf()),
            project_local: None,
        }
    }

    fn find_user_global() -> Option<PathBuf> {
        existing(dirs::home_dir()?.join(CONFIG_DIR).join("config.yml"))
    }

    /// Returns all config paths in merge order.
    pub fn all(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for a `.preinstall` directory, falling back to `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Parse YAML content into a [`PreinstallConfig`].
pub fn parse_config(content: &str, source_path: &Path) -> Result<PreinstallConfig> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| PreinstallError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;
    from_value(merge_configs(&[value]), source_path)
}

/// Load a config file as a raw YAML value (for merging).
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist and
/// `ConfigParseError` if the YAML is invalid.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PreinstallError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PreinstallError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| PreinstallError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the given config layers.
pub fn load_with_paths(paths: &ConfigPaths) -> Result<PreinstallConfig> {
    let mut layers = Vec::new();
    for path in paths.all() {
        tracing::debug!("Loading config layer {}", path.display());
        layers.push(load_config_value(path)?);
    }

    let source = paths
        .all()
        .last()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("config.yml"));

    from_value(merge_configs(&layers), &source)
}

/// Load and merge all config files for a project.
///
/// Returns the defaults if no config file exists.
pub fn load_merged_config(project_root: &Path) -> Result<PreinstallConfig> {
    load_with_paths(&ConfigPaths::discover(project_root))
}

/// Load config with an optional explicit file.
///
/// An explicit file replaces the project layers and must exist.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<PreinstallConfig> {
    match config_override {
        Some(path) => load_with_paths(&ConfigPaths::explicit(path)),
        None => load_merged_config(project_root),
    }
}

fn from_value(value: serde_yaml::Value, source: &Path) -> Result<PreinstallConfig> {
    serde_yaml::from_value(value).map_err(|e| PreinstallError::ConfigParseError {
        path: source.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FirewallPolicy;
    use tempfile::TempDir;

    fn write_config(root: &Path, name: &str, content: &str) -> PathBuf {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn project_only(root: &Path) -> ConfigPaths {
        ConfigPaths {
            user_global: None,
            ..ConfigPaths::discover(root)
        }
    }

    #[test]
    fn discover_finds_project_and_local_config() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "checks:\n  port: 9000\n");
        write_config(temp.path(), "config.local.yml", "checks:\n  port: 9001\n");

        let paths = ConfigPaths::discover(temp.path());

        assert!(paths.project.is_some());
        assert!(paths.project_local.is_some());
    }

    #[test]
    fn discover_without_files_finds_nothing_in_project() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_none());
        assert!(paths.project_local.is_none());
    }

    #[test]
    fn no_config_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_with_paths(&project_only(temp.path())).unwrap();
        assert_eq!(config, PreinstallConfig::default());
    }

    #[test]
    fn local_config_overrides_project_config() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "config.yml",
            "checks:\n  port: 9000\n  firewall_policy: require\n",
        );
        write_config(temp.path(), "config.local.yml", "checks:\n  port: 9001\n");

        let config = load_with_paths(&project_only(temp.path())).unwrap();

        assert_eq!(config.checks.port, 9001);
        assert_eq!(config.checks.firewall_policy, FirewallPolicy::Require);
    }

    #[test]
    fn empty_config_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "");

        let config = load_with_paths(&project_only(temp.path())).unwrap();

        assert_eq!(config, PreinstallConfig::default());
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "config.yml", "checks: [unclosed");

        let err = load_with_paths(&project_only(temp.path())).unwrap_err();

        match err {
            PreinstallError::ConfigParseError { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "checks:\n  port: eighty\n");

        let result = load_with_paths(&project_only(temp.path()));

        assert!(matches!(
            result,
            Err(PreinstallError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");

        let err = load_config(temp.path(), Some(&missing)).unwrap_err();

        assert!(matches!(err, PreinstallError::ConfigNotFound { .. }));
    }

    #[test]
    fn explicit_file_replaces_project_layers() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "checks:\n  port: 9000\n");
        let explicit = temp.path().join("ci.yml");
        fs::write(&explicit, "checks:\n  min_free_space_mb: 100\n").unwrap();

        let paths = ConfigPaths {
            user_global: None,
            ..ConfigPaths::explicit(&explicit)
        };
        let config = load_with_paths(&paths).unwrap();

        assert_eq!(config.checks.port, 8787);
        assert_eq!(config.checks.min_free_space_mb, 100);
    }

    #[test]
    fn parse_config_reports_source_path() {
        let err = parse_config("settings: [", Path::new("inline.yml")).unwrap_err();
        assert!(err.to_string().contains("inline.yml"));
    }

    #[test]
    fn find_project_root_walks_up_to_config_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), Some(temp.path().to_path_buf()));
    }
}
