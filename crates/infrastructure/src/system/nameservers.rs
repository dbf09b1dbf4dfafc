//! Nameserver discovery from the host's `resolv.conf`.

use ferrous_doh_domain::DEFAULT_DNS_PORT;
use resolv_conf::ScopedIp;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use tracing::warn;

pub const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

/// Used when the host lists no usable nameserver.
pub const FALLBACK_NAMESERVER: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_DNS_PORT);

/// The `nameserver` entries of a resolv.conf document, in order, on port 53.
/// A zone suffix on link-local IPv6 addresses (`fe80::1%eth0`) is dropped.
pub fn parse_nameservers(content: &[u8]) -> Result<Vec<SocketAddr>, resolv_conf::ParseError> {
    let config = resolv_conf::Config::parse(content)?;

    Ok(config
        .nameservers
        .into_iter()
        .map(|ip| {
            let ip = match ip {
                ScopedIp::V4(v4) => IpAddr::V4(v4),
                ScopedIp::V6(v6, _scope) => IpAddr::V6(v6),
            };
            SocketAddr::new(ip, DEFAULT_DNS_PORT)
        })
        .collect())
}

/// Reads the nameservers of `path`, falling back to `127.0.0.1:53` when the
/// file is unreadable, malformed or lists none.
pub fn load_nameservers(path: impl AsRef<Path>) -> Vec<SocketAddr> {
    let path = path.as_ref();
    let servers = match std::fs::read(path) {
        Ok(content) => parse_nameservers(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Failed to parse resolv.conf");
            Vec::new()
        }),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read resolv.conf");
            Vec::new()
        }
    };

    if servers.is_empty() {
        warn!(
            path = %path.display(),
            fallback = %FALLBACK_NAMESERVER,
            "No nameserver configured, using fallback"
        );
        return vec![FALLBACK_NAMESERVER];
    }

    servers
}
