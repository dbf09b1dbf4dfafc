use ferrous_doh_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

/// Resolves a nameserver hostname to all its IP addresses (IPv4 + IPv6)
/// using the host's own resolver.
pub async fn resolve_all(
    hostname: &str,
    port: u16,
    timeout: Duration,
) -> Result<Vec<SocketAddr>, DomainError> {
    let target = format!("{}:{}", hostname, port);

    let addrs: Vec<SocketAddr> = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: target.clone(),
        })?
        .map_err(|e| DomainError::NoNameserver(format!("{}: {}", target, e)))?
        .collect();

    if addrs.is_empty() {
        return Err(DomainError::NoNameserver(format!(
            "no addresses found for {}",
            target
        )));
    }

    Ok(addrs)
}
