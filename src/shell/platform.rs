//! Platform detection helpers.

#[cfg(windows)]
use std::time::Duration;

/// Host platform, as far as fact collection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Linux,
    Windows,
    Other,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }
}

/// Check if running in a CI environment.
///
/// Used to auto-detect CI and force non-interactive output in `main()`.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root/admin.
///
/// On Windows, `net session` only succeeds from an elevated token.
pub fn is_elevated() -> crate::error::Result<bool> {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        Ok(unsafe { libc::geteuid() == 0 })
    }

    #[cfg(windows)]
    {
        let options = super::CommandOptions::with_timeout(Duration::from_secs(10));
        super::run_program("net", &["session"], &options).map(|r| r.success)
    }

    #[cfg(not(any(unix, windows)))]
    {
        Err(crate::error::PreinstallError::Other(anyhow::anyhow!(
            "privilege detection is not supported on this platform"
        )))
    }
}
