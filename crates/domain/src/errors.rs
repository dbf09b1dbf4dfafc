use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid record type: {0}")]
    InvalidRecordType(String),

    #[error("Invalid base64url payload: {0}")]
    InvalidBase64(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Resolver fault: {0}")]
    ResolverFault(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport failure with {server}: {reason}")]
    TransportFailure { server: String, reason: String },

    #[error("No nameserver available for {0}")]
    NoNameserver(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
