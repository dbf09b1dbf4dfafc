use super::transport::{lookup, Transport};
use crate::system::nameservers;
use async_trait::async_trait;
use ferrous_doh_application::codec::wire;
use ferrous_doh_application::ports::DnsResolver;
use ferrous_doh_domain::{DomainError, ResolverTarget, UpstreamAddr};
use hickory_proto::op::Message;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Forwards queries to the configured nameserver, or to the host's own
/// nameservers for [`ResolverTarget::Internal`].
///
/// All attempts of one resolution share `budget`: each candidate gets an
/// equal share of what is left, so a silent nameserver cannot starve the
/// ones after it.
pub struct UpstreamDnsResolver {
    system_nameservers: Arc<[SocketAddr]>,
    budget: Duration,
}

impl UpstreamDnsResolver {
    pub fn new(system_nameservers: Vec<SocketAddr>, budget: Duration) -> Self {
        Self {
            system_nameservers: system_nameservers.into(),
            budget,
        }
    }

    /// Reads the host nameservers once, from `/etc/resolv.conf`.
    pub fn from_system(budget: Duration) -> Self {
        Self::from_resolv_conf(nameservers::RESOLV_CONF_PATH, budget)
    }

    pub fn from_resolv_conf(path: impl AsRef<Path>, budget: Duration) -> Self {
        Self::new(nameservers::load_nameservers(path), budget)
    }

    pub fn system_nameservers(&self) -> &[SocketAddr] {
        &self.system_nameservers
    }

    async fn candidates(&self, target: &ResolverTarget) -> Result<Vec<SocketAddr>, DomainError> {
        match target {
            ResolverTarget::Internal => Ok(self.system_nameservers.to_vec()),
            ResolverTarget::Nameserver(UpstreamAddr::Resolved(addr)) => Ok(vec![*addr]),
            ResolverTarget::Nameserver(UpstreamAddr::Unresolved { hostname, port }) => {
                lookup::resolve_all(hostname, *port, self.budget).await
            }
        }
    }
}

#[async_trait]
impl DnsResolver for UpstreamDnsResolver {
    async fn resolve(
        &self,
        target: &ResolverTarget,
        query: &Message,
    ) -> Result<Message, DomainError> {
        let deadline = Instant::now() + self.budget;

        // Never reuse the client's id upstream: DoH clients send 0.
        let mut upstream_query = query.clone();
        let upstream_id = fastrand::u16(..);
        wire::set_message_id(&mut upstream_query, upstream_id);
        let query_bytes = wire::serialize_message(&upstream_query)?;

        let candidates = self.candidates(target).await?;
        let total = candidates.len();

        let mut last_error = None;
        for (index, server) in candidates.into_iter().enumerate() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                last_error = Some(DomainError::TransportTimeout {
                    server: server.to_string(),
                });
                break;
            }
            let attempt_timeout = remaining / (total - index) as u32;

            match query_server(server, &query_bytes, upstream_id, attempt_timeout).await {
                Ok(mut response) => {
                    wire::set_message_id(&mut response, query.id());
                    return Ok(response);
                }
                Err(e) => {
                    warn!(server = %server, error = %e, "Upstream attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DomainError::NoNameserver(target.to_string())))
    }

    fn describe(&self, target: &ResolverTarget) -> String {
        match target {
            ResolverTarget::Internal => {
                let servers: Vec<String> = self
                    .system_nameservers
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                format!("internal ({})", servers.join(", "))
            }
            other => other.to_string(),
        }
    }
}

/// One exchange with one server: UDP first, TCP when the answer is truncated.
pub async fn query_server(
    server: SocketAddr,
    query_bytes: &[u8],
    query_id: u16,
    timeout: Duration,
) -> Result<Message, DomainError> {
    let start = Instant::now();

    let udp = Transport::udp(server);
    let bytes = udp.send(query_bytes, timeout).await?;
    let message = parse_reply(server, &bytes, query_id)?;

    if !message.truncated() {
        return Ok(message);
    }

    let remaining = timeout
        .checked_sub(start.elapsed())
        .unwrap_or(Duration::from_millis(500));

    let tcp = Transport::tcp(server);
    debug!(
        server = %server,
        from = udp.protocol_name(),
        to = tcp.protocol_name(),
        "Response truncated (TC bit), retrying"
    );

    let bytes = tcp.send(query_bytes, remaining).await?;
    parse_reply(server, &bytes, query_id)
}

fn parse_reply(server: SocketAddr, bytes: &[u8], query_id: u16) -> Result<Message, DomainError> {
    let message = wire::parse_message(bytes)?;

    if message.id() != query_id {
        return Err(DomainError::TransportFailure {
            server: server.to_string(),
            reason: format!(
                "response id {} does not match query id {}",
                message.id(),
                query_id
            ),
        });
    }

    Ok(message)
}
