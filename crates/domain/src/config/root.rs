use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG: &str = "stackdns.toml";
const SYSTEM_CONFIG: &str = "/etc/stackdns/config.toml";

/// Main configuration structure for stackdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. stackdns.toml in current directory
    /// 3. /etc/stackdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG).exists() {
            Self::from_file(LOCAL_CONFIG)?
        } else if std::path::Path::new(SYSTEM_CONFIG).exists() {
            Self::from_file(SYSTEM_CONFIG)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(workers) = overrides.workers {
            self.server.workers = workers;
        }
        if let Some(record_file) = overrides.record_file {
            self.dns.record_file = record_file;
        }
        if let Some(factory) = overrides.resolver_factory {
            self.dns.resolver_factory = Some(factory);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.workers == 0 {
            return Err(ConfigError::Validation(
                "At least one worker is required".to_string(),
            ));
        }

        if u32::try_from(self.dns.default_ttl).is_err() {
            return Err(ConfigError::Validation(format!(
                "default_ttl must be a non-negative 32-bit integer, got {}",
                self.dns.default_ttl
            )));
        }

        if self.dns.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "query_timeout must be greater than 0".to_string(),
            ));
        }

        let needs_upstream = !matches!(self.dns.resolver_factory.as_deref(), Some("static"));
        if needs_upstream && self.dns.upstream_servers.is_empty() {
            return Err(ConfigError::Validation(
                "Recursive resolution needs at least one upstream server".to_string(),
            ));
        }

        for server in &self.dns.upstream_servers {
            if server.parse::<SocketAddr>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "Invalid upstream server '{}', expected IP:PORT",
                    server
                )));
            }
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub workers: Option<usize>,
    pub record_file: Option<String>,
    pub resolver_factory: Option<String>,
    pub log_level: Option<String>,
}
