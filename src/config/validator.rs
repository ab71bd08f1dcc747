//! Configuration validation rules.
//!
//! - The agent port must be non-zero
//! - The companion tool needs a program name and a non-zero timeout
//! - The minimum free space must be non-zero

use crate::config::schema::PreinstallConfig;
use crate::error::{PreinstallError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every violation rather than stopping at the first one.
pub fn validate_config(config: &PreinstallConfig) -> Vec<ValidationError> {
    let checks = &config.checks;
    let mut errors = Vec::new();

    if checks.port == 0 {
        errors.push(ValidationError::new(
            "invalid-port",
            "checks.port must be between 1 and 65535",
        ));
    }

    if checks.min_free_space_mb == 0 {
        errors.push(ValidationError::new(
            "invalid-free-space",
            "checks.min_free_space_mb must be greater than 0",
        ));
    }

    let tool = &checks.companion_tool;
    if tool.program.trim().is_empty() {
        errors.push(ValidationError::new(
            "missing-program",
            "checks.companion_tool.program must not be empty",
        ));
    }

    if tool.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "invalid-timeout",
            format!(
                "checks.companion_tool.timeout_secs must be greater than 0 for '{}'",
                tool.program
            ),
        ));
    }

    errors
}

/// Validate and return a [`PreinstallError`] if invalid.
pub fn validate(config: &PreinstallConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(PreinstallError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
