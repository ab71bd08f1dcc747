//! Port availability and firewall checks.

use super::{keys, probe_failed, CheckId, CheckResult, Status};
use crate::config::{CheckSettings, FirewallPolicy};
use crate::facts::HostFacts;

/// Check 8: nothing is listening on the agent's port.
pub fn check_port(settings: &CheckSettings, facts: &dyn HostFacts) -> CheckResult {
    let id = CheckId::Port;
    let port = settings.port;

    match facts.listening_ports() {
        Ok(ports) if ports.contains(&port) => CheckResult::fail(
            id,
            &format!("Port {} is already in use", port),
            "Please choose a different port or stop the service using this port",
        ),
        Ok(_) => CheckResult::pass(
            id,
            &format!("Port {} is available", port),
            "Port is free and can be used",
        ),
        Err(e) => probe_failed(id, settings, &e.to_string()),
    }
}

/// Check 9: the host firewall is enabled.
///
/// Under [`FirewallPolicy::Advisory`] this check always passes. Under
/// [`FirewallPolicy::Require`] anything other than an enabled firewall
/// fails, which is still never blocking.
pub fn check_firewall(settings: &CheckSettings, facts: &dyn HostFacts) -> CheckResult {
    let id = CheckId::Firewall;
    let unmet = match settings.firewall_policy {
        FirewallPolicy::Advisory => Status::Warn,
        FirewallPolicy::Require => Status::Fail,
    };

    match facts.config_key(keys::FIREWALL_KEY) {
        Ok(Some(values)) if values.get_int("EnableFirewall").unwrap_or(0) == 1 => {
            CheckResult::pass(
                id,
                "Firewall is enabled",
                "Firewall rule will be created automatically for localhost access",
            )
        }
        Ok(Some(_)) => CheckResult::new(
            id,
            unmet,
            "Firewall is disabled",
            "Consider enabling firewall for security",
        ),
        Ok(None) => CheckResult::new(
            id,
            unmet,
            "Firewall status unknown",
            "Firewall policy is not configured on this host",
        ),
        Err(e) => probe_failed(id, settings, &e.to_string()),
    }
}
