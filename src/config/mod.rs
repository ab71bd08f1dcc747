//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//! - The agent's JSON config in [`agent`]
//!
//! # Example
//!
//! ```
//! use preinstall::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".preinstall");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "checks:\n  port: 9000\n").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.checks.port, 9000);
//! ```
//!
//! # Configuration File Locations
//!
//! Configuration is discovered and merged in this order:
//! 1. User global config (`~/.preinstall/config.yml`)
//! 2. Project config (`.preinstall/config.yml`)
//! 3. Local overrides (`.preinstall/config.local.yml`)
//!
//! An explicit `--config` file takes the place of 2 and 3.

pub mod agent;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use agent::AgentConfig;
pub use loader::{
    find_project_root, load_config, load_config_value, load_merged_config, load_with_paths,
    parse_config, ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{
    CheckSettings, CompanionTool, FirewallPolicy, OutputMode, PreinstallConfig, Settings,
    DEFAULT_PORT,
};
pub use validator::{validate, validate_config, ValidationError};
