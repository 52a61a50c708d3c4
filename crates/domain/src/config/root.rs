use serde::{Deserialize, Serialize};

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::proc::ProcConfig;
use super::server::ServerConfig;

/// Main configuration structure for masqstat
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Exposition endpoint configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// dnsmasq statistics source
    #[serde(default)]
    pub dns: DnsConfig,

    /// proc file system sources
    #[serde(default)]
    pub proc: ProcConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. masqstat.toml in current directory
    /// 3. /etc/masqstat/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("masqstat.toml").exists() {
            Self::from_file("masqstat.toml")?
        } else if std::path::Path::new("/etc/masqstat/config.toml").exists() {
            Self::from_file("/etc/masqstat/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(listen) = overrides.listen_address {
            self.server.listen_address = listen;
        }
        if let Some(path) = overrides.telemetry_path {
            self.server.telemetry_path = path;
        }
        if let Some(server) = overrides.dns_server {
            self.dns.server = server;
        }
        if let Some(path) = overrides.proc_path {
            self.proc.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.listen_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "listen address '{}' is not a valid socket address",
                self.server.listen_address
            )));
        }

        if !self.server.telemetry_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "telemetry path '{}' must start with '/'",
                self.server.telemetry_path
            )));
        }

        if self.dns.server.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "DNS server '{}' is not a valid socket address (host:port)",
                self.dns.server
            )));
        }

        if self.dns.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "DNS timeout cannot be 0".to_string(),
            ));
        }

        for subsystem in &self.proc.net_stat_subsystems {
            // Subsystem names become path components under net/stat.
            if subsystem.is_empty() || subsystem.contains(['/', '\\', '.']) {
                return Err(ConfigError::Validation(format!(
                    "invalid net/stat subsystem name '{}'",
                    subsystem
                )));
            }
        }

        Ok(())
    }
}

/// Settings that may be overridden from the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub listen_address: Option<String>,
    pub telemetry_path: Option<String>,
    pub dns_server: Option<String>,
    pub proc_path: Option<String>,
    pub log_level: Option<String>,
}
