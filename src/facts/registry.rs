//! Windows configuration-store (registry) reads.
//!
//! Keys are given relative to `HKEY_LOCAL_MACHINE` and read through the
//! registry API, so string data arrives as UTF-16 and is never subject to the
//! console code page. Off Windows the store is unavailable.

use std::io;

use super::{ConfigKey, ProbeError};

/// Hive every key is resolved against.
pub const HIVE: &str = r"HKEY_LOCAL_MACHINE";

/// Read every value stored directly under `key`.
///
/// Returns `Ok(None)` when the key does not exist. Any other failure, such as
/// access being denied, is an error.
#[cfg(windows)]
pub fn query_key(key: &str) -> Result<Option<ConfigKey>, ProbeError> {
    use winreg::enums::HKEY_LOCAL_MACHINE;
    use winreg::RegKey;

    read_key(&RegKey::predef(HKEY_LOCAL_MACHINE), key)
}

#[cfg(not(windows))]
pub fn query_key(_key: &str) -> Result<Option<ConfigKey>, ProbeError> {
    Err(ProbeError::unavailable("Configuration store"))
}

#[cfg(windows)]
fn read_key(root: &winreg::RegKey, key: &str) -> Result<Option<ConfigKey>, ProbeError> {
    use winreg::enums::KEY_READ;

    let path = key.trim_start_matches('\\');
    let Some(opened) = key_lookup(path, root.open_subkey_with_flags(path, KEY_READ))? else {
        tracing::debug!(r"Registry key not found: {}\{}", HIVE, path);
        return Ok(None);
    };

    let mut values = ConfigKey::new();
    for entry in opened.enum_values() {
        let (name, value) =
            entry.map_err(|e| ProbeError::io(format!(r"Cannot read {}\{}", HIVE, path), e))?;
        match convert_value(&value) {
            Some(converted) => values.insert(&name, converted),
            None => tracing::debug!("Skipping {} value {:?}", name, value.vtype),
        }
    }
    Ok(Some(values))
}

/// Map the outcome of opening `key` to found, absent, or failed.
///
/// Only a missing key is absence; every other error is reported so a denied
/// or broken lookup is never mistaken for "not installed".
#[cfg_attr(not(windows), allow(dead_code))]
fn key_lookup<K>(key: &str, opened: io::Result<K>) -> Result<Option<K>, ProbeError> {
    match opened {
        Ok(handle) => Ok(Some(handle)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ProbeError::io(format!(r"Cannot open {}\{}", HIVE, key), e)),
    }
}

#[cfg(windows)]
fn convert_value(value: &winreg::RegValue) -> Option<super::ConfigValue> {
    use super::ConfigValue;
    use winreg::enums::RegType::{REG_DWORD, REG_EXPAND_SZ, REG_QWORD, REG_SZ};
    use winreg::types::FromRegValue;

    match value.vtype {
        REG_DWORD => u32::from_reg_value(value)
            .ok()
            .map(|n| ConfigValue::Int(n.into())),
        REG_QWORD => u64::from_reg_value(value).ok().map(ConfigValue::Int),
        REG_SZ | REG_EXPAND_SZ => String::from_reg_value(value).ok().map(ConfigValue::Str),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_key_is_found() {
        let found = key_lookup("SOFTWARE\\ODBC", Ok(7)).unwrap();
        assert_eq!(found, Some(7));
    }

    #[test]
    fn missing_key_is_absent() {
        let opened: io::Result<()> = Err(io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(key_lookup("SOFTWARE\\ODBC", opened).unwrap(), None);
    }

    #[test]
    fn access_denied_is_an_error() {
        let opened: io::Result<()> = Err(io::Error::from(io::ErrorKind::PermissionDenied));

        let err = key_lookup("SOFTWARE\\Microsoft\\NET Framework Setup", opened).unwrap_err();

        match err {
            ProbeError::Io { context, .. } => {
                assert_eq!(
                    context,
                    r"Cannot open HKEY_LOCAL_MACHINE\SOFTWARE\Microsoft\NET Framework Setup"
                );
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn other_failures_are_errors() {
        let opened: io::Result<()> =
            Err(io::Error::other("The configuration registry key is invalid."));
        assert!(key_lookup("SOFTWARE\\X", opened).is_err());
    }

    #[cfg(not(windows))]
    #[test]
    fn store_is_unavailable_off_windows() {
        let err = query_key("SOFTWARE\\ODBC").unwrap_err();
        assert!(matches!(err, ProbeError::Unavailable { .. }));
    }

    #[cfg(windows)]
    mod windows {
        use super::super::*;
        use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};
        use winreg::RegKey;

        const SCRATCH: &str = r"Software\preinstall-tests\registry";

        #[test]
        fn missing_key_reads_as_none() {
            let found = query_key(r"SOFTWARE\preinstall-tests\does-not-exist").unwrap();
            assert!(found.is_none());
        }

        #[test]
        fn reads_current_version_key() {
            let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
            let key = read_key(&hklm, r"SOFTWARE\Microsoft\Windows NT\CurrentVersion")
                .unwrap()
                .unwrap();
            assert!(key.get_str("CurrentBuildNumber").is_some());
        }

        #[test]
        fn keeps_non_ascii_strings_and_integers() {
            let hkcu = RegKey::predef(HKEY_CURRENT_USER);
            let (scratch, _) = hkcu.create_subkey(SCRATCH).unwrap();
            scratch
                .set_value("Driver", &r"C:\Programme\Größe\vfpodbc.dll")
                .unwrap();
            scratch.set_value("Installed", &1u32).unwrap();
            scratch.set_value("Release", &528_040u64).unwrap();

            let key = read_key(&hkcu, SCRATCH).unwrap().unwrap();
            hkcu.delete_subkey_all(SCRATCH).ok();

            assert_eq!(key.get_str("Driver"), Some(r"C:\Programme\Größe\vfpodbc.dll"));
            assert_eq!(key.get_int("Installed"), Some(1));
            assert_eq!(key.get_int("Release"), Some(528_040));
        }
    }
}
