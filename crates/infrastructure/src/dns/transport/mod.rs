pub mod lookup;
pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use ferrous_doh_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub fn udp(server_addr: SocketAddr) -> Self {
        Self::Udp(udp::UdpTransport::new(server_addr))
    }

    pub fn tcp(server_addr: SocketAddr) -> Self {
        Self::Tcp(tcp::TcpTransport::new(server_addr))
    }

    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(t) => t.protocol_name(),
            Self::Tcp(t) => t.protocol_name(),
        }
    }
}

pub(crate) fn timeout_error(server: SocketAddr) -> DomainError {
    DomainError::TransportTimeout {
        server: server.to_string(),
    }
}

pub(crate) fn failure(server: SocketAddr, reason: impl std::fmt::Display) -> DomainError {
    DomainError::TransportFailure {
        server: server.to_string(),
        reason: reason.to_string(),
    }
}
