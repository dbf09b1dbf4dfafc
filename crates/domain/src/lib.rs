//! Ferrous DoH Domain Layer
pub mod config;
pub mod doh_request;
pub mod doh_response;
pub mod errors;
pub mod media_type;
pub mod resolver_config;
pub mod resolver_target;

pub use config::{CliOverrides, Config, ConfigError};
pub use doh_request::{DohRequest, HttpMethod};
pub use doh_response::DohResponse;
pub use errors::DomainError;
pub use media_type::ResponseFormat;
pub use resolver_config::ResolverConfig;
pub use resolver_target::{ResolverTarget, UpstreamAddr, DEFAULT_DNS_PORT, INTERNAL_TARGET};
