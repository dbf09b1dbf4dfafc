use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Treat `X-Forwarded-Proto: https` as a secure connection. Only enable
    /// behind a TLS-terminating proxy that overwrites the header.
    #[serde(default)]
    pub trust_forwarded_proto: bool,
}

impl ServerConfig {
    /// Listen address. IPv6 literals are written bare (`::`), without brackets.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind_address.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid bind address {}: {}",
                self.bind_address, e
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            trust_forwarded_proto: false,
        }
    }
}

fn default_port() -> u16 {
    8053
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
