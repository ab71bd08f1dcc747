//! Configuration-store keys read by the checks, relative to
//! `HKEY_LOCAL_MACHINE`.

/// Visual FoxPro ODBC driver registration (native, then 32-bit view).
pub const DRIVER_KEYS: [&str; 2] = [
    r"SOFTWARE\ODBC\ODBCINST.INI\Microsoft Visual FoxPro Driver",
    r"SOFTWARE\WOW6432Node\ODBC\ODBCINST.INI\Microsoft Visual FoxPro Driver",
];

/// Visual C++ 2015-2022 x64 runtime registration.
pub const NATIVE_RUNTIME_KEYS: [&str; 2] = [
    r"SOFTWARE\Microsoft\VisualStudio\14.0\VC\Runtimes\x64",
    r"SOFTWARE\WOW6432Node\Microsoft\VisualStudio\14.0\VC\Runtimes\x64",
];

/// .NET Framework 4.x setup key.
pub const MANAGED_RUNTIME_KEY: &str = r"SOFTWARE\Microsoft\NET Framework Setup\NDP\v4\Full";

/// Standard-profile firewall policy.
pub const FIREWALL_KEY: &str =
    r"SYSTEM\CurrentControlSet\Services\SharedAccess\Parameters\FirewallPolicy\StandardProfile";
