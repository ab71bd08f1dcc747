//! Error types for preinstall operations.
//!
//! This module defines [`PreinstallError`], the error type used outside the
//! check pipeline (configuration, CLI, process execution), and a [`Result`]
//! type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Probe failures inside a check never surface here: each check converts its
//!   own [`ProbeError`](crate::facts::ProbeError) into a
//!   [`CheckResult`](crate::checks::CheckResult)
//! - Use `PreinstallError` for failures that stop the tool itself
//! - Use `anyhow::Error` (via `PreinstallError::Other`) for unexpected errors

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Core error type for preinstall operations.
#[derive(Debug, Error)]
pub enum PreinstallError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// External command could not be started or exited abnormally.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// External command did not finish within its time limit.
    #[error("Command timed out after {timeout:?}: {command}")]
    CommandTimedOut { command: String, timeout: Duration },

    /// Report could not be written.
    #[error("Failed to render {format} report: {message}")]
    RenderFailed { format: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for preinstall operations.
pub type Result<T> = std::result::Result<T, PreinstallError>;
