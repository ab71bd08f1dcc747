//! The agent's own JSON configuration file.
//!
//! When the agent is being reinstalled or upgraded, its existing config
//! already names the database directory and port. Only those two fields are
//! read; everything else in the file is ignored.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{CheckSettings, DEFAULT_PORT};
use crate::error::{PreinstallError, Result};

/// The fields of the agent config that seed check parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Legacy database directory; empty when not configured
    pub database_path: String,

    /// Port the agent listens on
    pub port: u16,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            database_path: String::new(),
            port: DEFAULT_PORT,
        }
    }
}

impl AgentConfig {
    /// Read and parse an agent config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PreinstallError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                PreinstallError::Io(e)
            }
        })?;

        serde_json::from_str(&content).map_err(|e| PreinstallError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Copy the database path and port into `settings`.
    pub fn apply(&self, settings: &mut CheckSettings) {
        if !self.database_path.is_empty() {
            settings.database_path = Some(PathBuf::from(&self.database_path));
        }
        settings.port = self.port;
    }
}
