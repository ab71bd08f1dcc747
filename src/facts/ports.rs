//! Listener enumeration parsers.
//!
//! Linux exposes the socket table under `/proc/net/tcp` and `/proc/net/tcp6`;
//! every other platform goes through `netstat -an`. Both parsers return the
//! sorted, de-duplicated set of local ports in the listening state.

use std::collections::BTreeSet;

/// Socket state code for `LISTEN` in `/proc/net/tcp`.
const TCP_LISTEN: &str = "0A";

/// Parse one `/proc/net/tcp`-format table.
///
/// ```text
///   sl  local_address rem_address   st tx_queue rx_queue ...
///    0: 0100007F:2253 00000000:0000 0A 00000000:00000000 ...
/// ```
pub fn parse_proc_net_tcp(content: &str) -> Vec<u16> {
    let mut ports = BTreeSet::new();

    for line in content.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 || fields[3] != TCP_LISTEN {
            continue;
        }
        let Some((_, port_hex)) = fields[1].rsplit_once(':') else {
            continue;
        };
        if let Ok(port) = u16::from_str_radix(port_hex, 16) {
            ports.insert(port);
        }
    }

    ports.into_iter().collect()
}

/// Parse `netstat -an` output from Windows or BSD-style systems.
///
/// Windows: `  TCP    0.0.0.0:8787     0.0.0.0:0     LISTENING`
/// macOS:   `tcp4  0  0  *.8787  *.*  LISTEN`
pub fn parse_netstat(output: &str) -> Vec<u16> {
    let mut ports = BTreeSet::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(proto) = fields.first() else {
            continue;
        };
        if !proto.to_ascii_lowercase().starts_with("tcp") {
            continue;
        }
        if !fields
            .iter()
            .any(|f| *f == "LISTEN" || *f == "LISTENING")
        {
            continue;
        }

        // Windows puts the local address right after the protocol; BSD
        // netstat has Recv-Q and Send-Q columns in between.
        let local = if proto.starts_with("TCP") {
            fields.get(1)
        } else {
            fields.get(3)
        };

        if let Some(port) = local.and_then(|addr| port_of(addr)) {
            ports.insert(port);
        }
    }

    ports.into_iter().collect()
}

/// Port suffix of `host:port`, `[::]:port` or `host.port`.
fn port_of(address: &str) -> Option<u16> {
    let (_, port) = address.rsplit_once([':', '.'])?;
    port.parse().ok()
}
