//! Host-backed fact provider.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use sysinfo::System;

use super::{ports, ConfigKey, HostFacts, OsVersion, ProbeError, ToolOutput};
use crate::shell::{self, run_program, CommandOptions, Platform};

/// Time limit for helper programs such as `netstat`.
pub const HELPER_TIMEOUT: Duration = Duration::from_secs(10);

/// Windows reports its version as `<major> (<build>)`, e.g. `10 (19045)`.
static MAJOR_BUILD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:\.(\d+))?\s*\((\d+)\)").expect("MAJOR_BUILD must compile")
});

/// Facts read from the machine this process runs on.
#[derive(Debug, Clone)]
pub struct SystemFacts {
    platform: Platform,
}

impl Default for SystemFacts {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemFacts {
    /// Create a provider for the current platform.
    pub fn new() -> Self {
        Self {
            platform: Platform::current(),
        }
    }

    fn helper(&self, program: &str, args: &[&str]) -> Result<String, ProbeError> {
        let result = run_program(
            program,
            args,
            &CommandOptions::with_timeout(HELPER_TIMEOUT),
        )?;
        if !result.success {
            return Err(ProbeError::Command(format!(
                "{} exited with {:?}: {}",
                program,
                result.exit_code,
                result.stderr.trim()
            )));
        }
        Ok(result.stdout)
    }
}

/// Assemble an [`OsVersion`] from what the operating system reports.
///
/// `long_name` is the display name (`Windows 10 Pro`, `Linux 24.04 Ubuntu`).
/// Numbers come from `os_version` when it has the Windows `<major> (<build>)`
/// shape, otherwise from the first dotted number in `kernel` or `os_version`.
fn os_version_from(
    long_name: Option<String>,
    os_version: Option<String>,
    kernel: Option<String>,
) -> Option<OsVersion> {
    let windows = os_version.as_deref().and_then(|v| {
        let caps = MAJOR_BUILD.captures(v.trim())?;
        let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        Some((number(1)?, number(2).unwrap_or(0), number(3).unwrap_or(0)))
    });

    if let Some((major, minor, build)) = windows {
        let name = long_name.unwrap_or_else(|| format!("Windows {}", major));
        return Some(OsVersion {
            description: format!("{} (build {})", name, build),
            major,
            minor,
            build,
        });
    }

    let dotted = kernel
        .as_deref()
        .and_then(OsVersion::parse)
        .or_else(|| os_version.as_deref().and_then(OsVersion::parse))?;
    let (major, minor, build) = (dotted.major, dotted.minor, dotted.build);

    let description = match (long_name, kernel) {
        (Some(name), Some(kernel)) => format!("{} (kernel {})", name, kernel),
        (Some(name), None) => name,
        (None, Some(kernel)) => kernel,
        (None, None) => dotted.description,
    };

    Some(OsVersion {
        description,
        major,
        minor,
        build,
    })
}

impl HostFacts for SystemFacts {
    fn os_version(&self) -> Result<OsVersion, ProbeError> {
        let long_name = System::long_os_version().or_else(System::name);
        let os_version = System::os_version();
        let kernel = System::kernel_version();
        tracing::debug!(
            "OS reports name {:?}, version {:?}, kernel {:?}",
            long_name,
            os_version,
            kernel
        );

        if long_name.is_none() && os_version.is_none() && kernel.is_none() {
            return Err(ProbeError::unavailable("OS version"));
        }

        let raw = format!("{:?} / {:?}", os_version, kernel);
        os_version_from(long_name, os_version, kernel).ok_or(ProbeError::Parse(raw))
    }

    fn is_elevated(&self) -> Result<bool, ProbeError> {
        shell::is_elevated().map_err(ProbeError::from)
    }

    fn config_key(&self, key: &str) -> Result<Option<ConfigKey>, ProbeError> {
        super::registry::query_key(key)
    }

    fn path_exists(&self, path: &Path) -> Result<bool, ProbeError> {
        path.try_exists()
            .map_err(|e| ProbeError::io(format!("Cannot stat {}", path.display()), e))
    }

    fn is_dir(&self, path: &Path) -> Result<bool, ProbeError> {
        match std::fs::metadata(path) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ProbeError::io(
                format!("Cannot stat {}", path.display()),
                e,
            )),
        }
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, ProbeError> {
        let context = || format!("Cannot list {}", path.display());
        let entries = std::fs::read_dir(path).map_err(|e| ProbeError::io(context(), e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ProbeError::io(context(), e))?;
            paths.push(entry.path());
        }
        paths.sort();
        Ok(paths)
    }

    fn available_space(&self, path: &Path) -> Result<u64, ProbeError> {
        // The install directory may not exist yet; measure the volume of its
        // nearest existing ancestor.
        let existing = path
            .ancestors()
            .find(|p| !p.as_os_str().is_empty() && p.exists())
            .ok_or_else(|| {
                ProbeError::Io {
                    context: format!("Cannot resolve volume for {}", path.display()),
                    message: "no existing ancestor".to_string(),
                }
            })?;

        fs2::available_space(existing).map_err(|e| {
            ProbeError::io(
                format!("Cannot query free space on {}", existing.display()),
                e,
            )
        })
    }

    fn listening_ports(&self) -> Result<Vec<u16>, ProbeError> {
        match self.platform {
            Platform::Linux => {
                let mut ports = Vec::new();
                let mut read_any = false;
                for table in ["/proc/net/tcp", "/proc/net/tcp6"] {
                    match std::fs::read_to_string(table) {
                        Ok(content) => {
                            read_any = true;
                            ports.extend(ports::parse_proc_net_tcp(&content));
                        }
                        // tcp6 is absent when IPv6 is disabled
                        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                        Err(e) => return Err(ProbeError::io(format!("Cannot read {}", table), e)),
                    }
                }
                if !read_any {
                    return Err(ProbeError::unavailable("/proc/net/tcp"));
                }
                ports.sort_unstable();
                ports.dedup();
                Ok(ports)
            }
            Platform::Windows => {
                let output = self.helper("netstat", &["-an", "-p", "TCP"])?;
                Ok(ports::parse_netstat(&output))
            }
            _ => {
                let output = self.helper("netstat", &["-an"])?;
                Ok(ports::parse_netstat(&output))
            }
        }
    }

    fn run_tool(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<ToolOutput, ProbeError> {
        let result = run_program(program, args, &CommandOptions::with_timeout(timeout))?;
        Ok(ToolOutput {
            exit_code: result.exit_code,
            stdout: result.stdout,
        })
    }
}
