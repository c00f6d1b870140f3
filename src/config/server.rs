//! Server configuration: bind address, environment, log filter and CORS.

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

use super::error::ValidationError;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// IP literal to bind to (IPv4 or IPv6, without brackets)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment; production switches logs to JSON
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Rust log filter directive, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Origins allowed to open the signaling socket (comma-separated);
    /// any origin when unset
    pub cors_origins: Option<String>,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl ServerConfig {
    /// Socket address the relay listens on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ValidationError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Configured CORS origins, trimmed, blanks skipped
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        self.socket_addr()?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,classroom_signal=debug,tower_http=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let config = ServerConfig::default();

        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.environment, Environment::Development);
        assert!(config.log_level.contains("classroom_signal=debug"));
        assert!(config.cors_origins_list().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn ipv6_literal_binds_without_brackets() {
        let config = ServerConfig {
            host: "::1".to_string(),
            port: 9000,
            ..Default::default()
        };

        assert_eq!(config.socket_addr().unwrap().to_string(), "[::1]:9000");
    }

    #[test]
    fn hostnames_are_not_bind_addresses() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidHost(host)) if host == "localhost"
        ));
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPort)));
    }

    #[test]
    fn cors_origins_are_trimmed_and_blanks_skipped() {
        let config = ServerConfig {
            cors_origins: Some(" https://portal.school.example, ,http://localhost:5173,".to_string()),
            ..Default::default()
        };

        assert_eq!(
            config.cors_origins_list(),
            vec!["https://portal.school.example", "http://localhost:5173"]
        );
    }

    #[test]
    fn environment_names_are_lowercase() {
        let production: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(production, Environment::Production);
        assert!(serde_json::from_str::<Environment>("\"Production\"").is_err());
        assert!(serde_json::from_str::<Environment>("\"staging\"").is_err());

        let config = ServerConfig {
            environment: production,
            ..Default::default()
        };
        assert!(config.is_production());
    }
}
