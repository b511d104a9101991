//! Connectivity probe.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Hosts tried in order; the first successful TCP connect wins.
pub const DEFAULT_PROBE_HOSTS: &[&str] = &[
    "1.1.1.1:53",
    "208.67.222.222:53",
    "114.114.114.114:53",
    "9.9.9.9:53",
    "www.baidu.com:80",
];

/// Connect timeout per resolved address.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Whether any of `hosts` accepts a TCP connection within `timeout`.
///
/// An empty host list disables the probe and counts as online.
pub fn is_online(hosts: &[String], timeout: Duration) -> bool {
    if hosts.is_empty() {
        return true;
    }
    hosts.iter().any(|host| probe(host, timeout))
}

fn probe(host: &str, timeout: Duration) -> bool {
    let addrs = match host.to_socket_addrs() {
        Ok(addrs) => addrs,
        Err(e) => {
            tracing::debug!("Could not resolve {}: {}", host, e);
            return false;
        }
    };

    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(_) => {
                tracing::debug!("Reached {}", addr);
                return true;
            }
            Err(e) => tracing::debug!("Probe {} failed: {}", addr, e),
        }
    }
    false
}
