use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

/// Sentinel selecting the host's own nameservers.
pub const INTERNAL_TARGET: &str = "internal";

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Represents an upstream server address that may or may not be resolved to an IP.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamAddr {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

impl UpstreamAddr {
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        match self {
            UpstreamAddr::Resolved(addr) => Some(*addr),
            UpstreamAddr::Unresolved { .. } => None,
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            UpstreamAddr::Resolved(addr) => addr.port(),
            UpstreamAddr::Unresolved { port, .. } => *port,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, UpstreamAddr::Unresolved { .. })
    }

    /// Returns (hostname, port) if this address is unresolved.
    pub fn unresolved_parts(&self) -> Option<(&str, u16)> {
        match self {
            UpstreamAddr::Unresolved { hostname, port } => Some((hostname, *port)),
            UpstreamAddr::Resolved(_) => None,
        }
    }
}

impl fmt::Display for UpstreamAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamAddr::Resolved(addr) => write!(f, "{}", addr),
            UpstreamAddr::Unresolved { hostname, port } => write!(f, "{}:{}", hostname, port),
        }
    }
}

/// Where queries are sent: the host's configured nameservers, or one literal
/// nameserver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolverTarget {
    Internal,
    Nameserver(UpstreamAddr),
}

impl ResolverTarget {
    pub fn is_internal(&self) -> bool {
        matches!(self, ResolverTarget::Internal)
    }
}

impl fmt::Display for ResolverTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverTarget::Internal => f.write_str(INTERNAL_TARGET),
            ResolverTarget::Nameserver(addr) => write!(f, "{}", addr),
        }
    }
}

impl FromStr for ResolverTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Resolver target cannot be empty".to_string());
        }
        if s.eq_ignore_ascii_case(INTERNAL_TARGET) {
            return Ok(ResolverTarget::Internal);
        }
        parse_upstream_addr(s).map(ResolverTarget::Nameserver)
    }
}

fn parse_host_port(s: &str) -> Option<(&str, u16)> {
    if s.starts_with('[') {
        let end = s.find(']')?;
        let host = &s[1..end];
        let rest = &s[end + 1..];
        let port_str = rest.strip_prefix(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    } else {
        let (host, port_str) = s.rsplit_once(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    }
}

fn is_hostname(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 253
        && s
            .split('.')
            .all(|label| !label.is_empty() && label.len() <= 63)
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_')
}

fn parse_upstream_addr(addr_str: &str) -> Result<UpstreamAddr, String> {
    if let Ok(addr) = addr_str.parse::<SocketAddr>() {
        return Ok(UpstreamAddr::Resolved(addr));
    }
    if let Ok(ip) = addr_str.parse::<IpAddr>() {
        return Ok(UpstreamAddr::Resolved(SocketAddr::new(ip, DEFAULT_DNS_PORT)));
    }
    if let Some((host, port)) = parse_host_port(addr_str) {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(UpstreamAddr::Resolved(SocketAddr::new(ip, port)));
        }
        if is_hostname(host) {
            return Ok(UpstreamAddr::Unresolved {
                hostname: host.into(),
                port,
            });
        }
    } else if is_hostname(addr_str) {
        return Ok(UpstreamAddr::Unresolved {
            hostname: addr_str.into(),
            port: DEFAULT_DNS_PORT,
        });
    }
    Err(format!(
        "Invalid resolver target '{}'. Expected 'internal', IP, IP:PORT or HOSTNAME:PORT",
        addr_str
    ))
}
