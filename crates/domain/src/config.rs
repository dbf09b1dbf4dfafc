//! Configuration module for Ferrous DoH
//!
//! - `root`: Main configuration and CLI overrides
//! - `server`: HTTP listener settings
//! - `resolver`: Upstream resolver, authority header and time budget
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod logging;
pub mod resolver;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::ResolverSettings;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
