use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

pub const DEFAULT_CONFIG_FILE: &str = "relay-dns.toml";

/// Main configuration structure for relay-dns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening socket and receive loop
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream resolver; empty means standalone mode
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. relay-dns.toml in current directory
    /// 3. Default configuration
    ///
    /// Command-line overrides are applied on top of whichever was loaded.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(listen) = overrides.listen_address {
            self.server.listen_address = listen;
        }
        if let Some(resolver) = overrides.resolver {
            self.upstream.resolver = resolver;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server
            .listen_address
            .parse::<SocketAddr>()
            .map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid listen address '{}': {}",
                    self.server.listen_address, e
                ))
            })?;

        if self.server.max_consecutive_recv_errors == 0 {
            return Err(ConfigError::Validation(
                "max_consecutive_recv_errors cannot be 0".to_string(),
            ));
        }

        self.upstream
            .resolver_addr()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if self.upstream.timeout_ms == Some(0) {
            return Err(ConfigError::Validation(
                "upstream timeout_ms cannot be 0; omit it to wait indefinitely".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub listen_address: Option<String>,
    pub resolver: Option<String>,
    pub log_level: Option<String>,
}
