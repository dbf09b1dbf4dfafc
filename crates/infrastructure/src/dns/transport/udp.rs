//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is, without framing. A response with the TC bit set
//! must be retried over TCP by the caller.

use super::{failure, timeout_error, DnsTransport};
use async_trait::async_trait;
use ferrous_doh_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        let server = self.server_addr;
        let socket = UdpSocket::bind(self.bind_addr())
            .await
            .map_err(|e| failure(server, format!("failed to bind UDP socket: {e}")))?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send_to(message_bytes, server))
            .await
            .map_err(|_| timeout_error(server))?
            .map_err(|e| failure(server, format!("failed to send UDP query: {e}")))?;

        debug!(server = %server, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| timeout_error(server))?
                .map_err(|e| failure(server, format!("failed to receive UDP response: {e}")))?;

        if from_addr.ip() != server.ip() {
            warn!(
                expected = %server,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(server = %server, bytes_received, "UDP response received");

        Ok(recv_buf)
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
