//! Disk space and database directory checks.

use std::path::{Path, PathBuf};

use super::{probe_failed, CheckId, CheckResult};
use crate::config::CheckSettings;
use crate::facts::HostFacts;

const MIB: u64 = 1024 * 1024;

/// Extension of the legacy database's table files.
const DATA_FILE_EXTENSION: &str = "dbf";

/// Directory the agent installs into when none is configured.
pub fn default_install_dir() -> PathBuf {
    if cfg!(windows) {
        std::env::var_os("ProgramFiles")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(r"C:\Program Files"))
    } else {
        PathBuf::from("/opt")
    }
}

/// Check 6: the install volume has enough free space.
pub fn check_disk_space(settings: &CheckSettings, facts: &dyn HostFacts) -> CheckResult {
    let id = CheckId::DiskSpace;
    let install_dir = settings
        .install_dir
        .clone()
        .unwrap_or_else(default_install_dir);

    let available = match facts.available_space(&install_dir) {
        Ok(bytes) => bytes,
        Err(e) => return probe_failed(id, settings, &e.to_string()),
    };

    let required = settings.min_free_space_mb.saturating_mul(MIB);
    let available_mb = available / MIB;
    let details = format!(
        "Required: {} MB, Available: {} MB",
        settings.min_free_space_mb, available_mb
    );

    tracing::debug!(
        "{} bytes free for {} (need {})",
        available,
        install_dir.display(),
        required
    );

    if available >= required {
        CheckResult::pass(
            id,
            &format!("Sufficient disk space: {} MB available", available_mb),
            details,
        )
    } else {
        CheckResult::fail(id, "Insufficient disk space", details)
    }
}

/// Check 7: the database directory exists and holds data files. Advisory only.
///
/// An unset path is not an error: the location is chosen later during
/// installation.
pub fn check_database_path(settings: &CheckSettings, facts: &dyn HostFacts) -> CheckResult {
    let id = CheckId::DatabasePath;

    let path = match settings
        .database_path
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty())
    {
        Some(path) => path,
        None => {
            return CheckResult::warn(
                id,
                "Database path not specified",
                "Will be configured during installation",
            )
        }
    };

    match facts.is_dir(path) {
        Ok(true) => {}
        Ok(false) => {
            return CheckResult::fail(
                id,
                "Database path does not exist",
                format!(
                    "Path: {} - Directory will be created if needed",
                    path.display()
                ),
            )
        }
        Err(e) => return probe_failed(id, settings, &e.to_string()),
    }

    let data_files = match count_data_files(facts, path) {
        Ok(n) => n,
        Err(e) => return probe_failed(id, settings, &e),
    };

    let details = format!("Path: {}", path.display());
    if data_files > 0 {
        CheckResult::pass(
            id,
            &format!("Database path valid: {} DBF files found", data_files),
            details,
        )
    } else {
        CheckResult::warn(id, "Database path exists but no DBF files found", details)
    }
}

/// Count top-level `*.dbf` files, comparing the extension case-insensitively.
fn count_data_files(facts: &dyn HostFacts, dir: &Path) -> Result<usize, String> {
    let entries = facts.list_dir(dir).map_err(|e| e.to_string())?;

    let mut count = 0;
    for entry in entries {
        let is_data_file = entry
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(DATA_FILE_EXTENSION));
        if is_data_file && !facts.is_dir(&entry).unwrap_or(false) {
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{ReportClass, Status};
    use crate::facts::{ProbeError, StaticFacts};

    fn with_database(path: &str) -> CheckSettings {
        CheckSettings {
            database_path: Some(PathBuf::from(path)),
            ..Default::default()
        }
    }

    #[test]
    fn exactly_minimum_space_passes() {
        let facts = StaticFacts::new().with_available_space(500 * MIB);
        let result = check_disk_space(&CheckSettings::default(), &facts);
        assert!(result.passed());
        assert_eq!(result.message, "✓ Sufficient disk space: 500 MB available");
        assert_eq!(result.details, "Required: 500 MB, Available: 500 MB");
    }

    #[test]
    fn one_byte_short_is_blocking() {
        let facts = StaticFacts::new().with_available_space(500 * MIB - 1);
        let result = check_disk_space(&CheckSettings::default(), &facts);
        assert_eq!(result.class(), ReportClass::Blocking);
        assert_eq!(result.message, "✗ Insufficient disk space");
        assert_eq!(result.details, "Required: 500 MB, Available: 499 MB");
    }

    #[test]
    fn minimum_space_is_configurable() {
        let settings = CheckSettings {
            min_free_space_mb: 2048,
            ..Default::default()
        };
        let facts = StaticFacts::new().with_available_space(1024 * MIB);
        let result = check_disk_space(&settings, &facts);
        assert!(!result.passed());
        assert_eq!(result.details, "Required: 2048 MB, Available: 1024 MB");
    }

    #[test]
    fn disk_probe_failure_is_blocking() {
        let facts = StaticFacts::new().with_space_error(ProbeError::unavailable("Volume info"));
        let result = check_disk_space(&CheckSettings::default(), &facts);
        assert_eq!(result.class(), ReportClass::Blocking);
        assert_eq!(result.message, "✗ Failed to check disk space");
    }

    #[test]
    fn default_install_dir_is_set() {
        assert!(!default_install_dir().as_os_str().is_empty());
    }

    #[test]
    fn unset_database_path_passes_with_warning() {
        let result = check_database_path(&CheckSettings::default(), &StaticFacts::new());
        assert!(result.passed());
        assert_eq!(result.status, Status::Warn);
        assert_eq!(result.message, "⚠ Database path not specified");
        assert_eq!(result.details, "Will be configured during installation");
    }

    #[test]
    fn empty_database_path_counts_as_unset() {
        let result = check_database_path(&with_database(""), &StaticFacts::new());
        assert_eq!(result.message, "⚠ Database path not specified");
    }

    #[test]
    fn database_directory_with_data_files_passes() {
        let facts =
            StaticFacts::new().with_dir("/srv/data", &["CUSTOMER.DBF", "orders.dbf", "orders.cdx"]);
        let result = check_database_path(&with_database("/srv/data"), &facts);
        assert!(result.passed());
        assert_eq!(result.status, Status::Pass);
        assert_eq!(result.message, "✓ Database path valid: 2 DBF files found");
        assert_eq!(result.details, "Path: /srv/data");
    }

    #[test]
    fn database_directory_without_data_files_warns() {
        let facts = StaticFacts::new().with_dir("/srv/data", &["readme.txt"]);
        let result = check_database_path(&with_database("/srv/data"), &facts);
        assert!(result.passed());
        assert_eq!(result.status, Status::Warn);
        assert_eq!(result.message, "⚠ Database path exists but no DBF files found");
    }

    #[test]
    fn subdirectory_named_like_data_file_is_ignored() {
        let facts = StaticFacts::new()
            .with_dir("/srv/data", &["archive.dbf"])
            .with_dir("/srv/data/archive.dbf", &[]);
        let result = check_database_path(&with_database("/srv/data"), &facts);
        assert_eq!(result.status, Status::Warn);
    }

    #[test]
    fn missing_database_directory_is_advisory() {
        let result = check_database_path(&with_database("/srv/missing"), &StaticFacts::new());
        assert_eq!(result.class(), ReportClass::Advisory);
        assert!(!result.critical);
        assert_eq!(result.message, "⚠ Database path does not exist");
        assert_eq!(
            result.details,
            "Path: /srv/missing - Directory will be created if needed"
        );
    }

    #[test]
    fn unreadable_database_directory_is_advisory() {
        let facts = StaticFacts::new().with_unreadable_dir(
            "/srv/data",
            ProbeError::Io {
                context: "Cannot list /srv/data".into(),
                message: "permission denied".into(),
            },
        );
        let result = check_database_path(&with_database("/srv/data"), &facts);
        assert_eq!(result.class(), ReportClass::Advisory);
        assert_eq!(result.message, "⚠ Cannot access database path");
        assert_eq!(result.details, "Cannot list /srv/data: permission denied");
    }
}
