//! TCP Transport for DNS queries (RFC 1035 §4.2.2)
//!
//! Each message is prefixed with its length as a big-endian `u16`.

use super::{failure, timeout_error, DnsTransport};
use async_trait::async_trait;
use ferrous_doh_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    async fn connect(&self, timeout: Duration) -> Result<TcpStream, DomainError> {
        let server = self.server_addr;
        let stream = tokio::time::timeout(timeout, TcpStream::connect(server))
            .await
            .map_err(|_| timeout_error(server))?
            .map_err(|e| failure(server, format!("connection refused: {e}")))?;

        stream
            .set_nodelay(true)
            .map_err(|e| failure(server, format!("failed to set TCP_NODELAY: {e}")))?;

        Ok(stream)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        let server = self.server_addr;
        let mut stream = self.connect(timeout).await?;

        tokio::time::timeout(timeout, send_with_length_prefix(&mut stream, message_bytes))
            .await
            .map_err(|_| timeout_error(server))?
            .map_err(|e| failure(server, e))?;

        debug!(server = %server, message_len = message_bytes.len(), "TCP query sent");

        let response_bytes = tokio::time::timeout(timeout, read_with_length_prefix(&mut stream))
            .await
            .map_err(|_| timeout_error(server))?
            .map_err(|e| failure(server, e))?;

        debug!(server = %server, response_len = response_bytes.len(), "TCP response received");

        Ok(response_bytes)
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> Result<(), std::io::Error>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("message of {} bytes exceeds TCP framing", message_bytes.len()),
        )
    })?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> Result<Vec<u8>, std::io::Error>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let response_len = u16::from_be_bytes(len_buf) as usize;

    let mut response = vec![0u8; response_len];
    stream.read_exact(&mut response).await?;

    Ok(response)
}
