use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverSettings;
use super::server::ServerConfig;
use crate::resolver_target::ResolverTarget;

const LOCAL_CONFIG_PATH: &str = "ferrous-doh.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-doh/config.toml";

/// Main configuration structure for Ferrous DoH
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream resolution configuration
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-doh.toml in current directory
    /// 3. /etc/ferrous-doh/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(String::from).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(target) = overrides.resolver {
            self.resolver.target = target;
        }
        if let Some(authority) = overrides.authority {
            self.resolver.authority = authority;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("HTTP port cannot be 0".to_string()));
        }

        self.server.socket_addr()?;

        if self.resolver.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Resolver query timeout cannot be 0".to_string(),
            ));
        }

        self.resolver
            .target
            .parse::<ResolverTarget>()
            .map_err(ConfigError::ResolverTarget)?;

        if !LoggingConfig::is_valid_level(&self.logging.level) {
            return Err(ConfigError::Validation(format!(
                "Invalid log level name: {}",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|path| std::path::Path::new(path).exists())
            .map(String::from)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub resolver: Option<String>,
    pub authority: Option<String>,
    pub log_level: Option<String>,
}
