//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Sources are layered, later ones overriding earlier:
//!
//! 1. Built-in defaults
//! 2. Optional TOML file named by `CLASSROOM_SIGNAL_CONFIG`
//! 3. Environment variables with the `CLASSROOM_SIGNAL` prefix, using `__`
//!    to separate nested values
//!
//! # Example
//!
//! ```no_run
//! use classroom_signal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Relay listening on {:?}", config.server.socket_addr());
//! ```

mod error;
mod relay;
mod server;

pub use error::{ConfigError, ValidationError};
pub use relay::RelayConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;
use std::path::Path;

/// Environment variable prefix for all settings.
pub const ENV_PREFIX: &str = "CLASSROOM_SIGNAL";

/// Environment variable naming an optional TOML config file.
pub const CONFIG_FILE_ENV: &str = "CLASSROOM_SIGNAL_CONFIG";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Signaling relay configuration (path, queue and frame limits)
    #[serde(default)]
    pub relay: RelayConfig,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the TOML file named by `CLASSROOM_SIGNAL_CONFIG`, if set
    /// 3. Applies environment variables with `CLASSROOM_SIGNAL` prefix
    ///
    /// # Environment Variable Format
    ///
    /// - `CLASSROOM_SIGNAL__SERVER__PORT=9000` -> `server.port = 9000`
    /// - `CLASSROOM_SIGNAL__RELAY__PATH=/signal` -> `relay.path = "/signal"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is unreadable or a value cannot be
    /// parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file = std::env::var(CONFIG_FILE_ENV).ok();
        Self::load_from(file.as_deref().map(Path::new))
    }

    /// Load configuration from an explicit file plus environment overrides.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.relay.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("CLASSROOM_SIGNAL__SERVER__PORT");
        env::remove_var("CLASSROOM_SIGNAL__SERVER__ENVIRONMENT");
        env::remove_var("CLASSROOM_SIGNAL__RELAY__PATH");
        env::remove_var("CLASSROOM_SIGNAL__RELAY__CHANNEL_CAPACITY");
    }

    #[test]
    fn test_load_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load_from(None);

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.relay.path, "/ws");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CLASSROOM_SIGNAL__SERVER__PORT", "3000");
        env::set_var("CLASSROOM_SIGNAL__RELAY__PATH", "/signal");
        env::set_var("CLASSROOM_SIGNAL__RELAY__CHANNEL_CAPACITY", "64");
        let result = AppConfig::load_from(None);
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.relay.path, "/signal");
        assert_eq!(config.relay.channel_capacity, 64);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CLASSROOM_SIGNAL__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load_from(None);
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_load_from_toml_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9100\ncors_origins = \"https://school.example\"\n\n[relay]\nmax_message_bytes = 131072\n"
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path())).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.cors_origins_list(), vec!["https://school.example"]);
        assert_eq!(config.relay.max_message_bytes, 131_072);
        assert_eq!(config.relay.path, "/ws");
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 9100\n").unwrap();
        env::set_var("CLASSROOM_SIGNAL__SERVER__PORT", "9200");
        let result = AppConfig::load_from(Some(file.path()));
        clear_env();

        assert_eq!(result.unwrap().server.port, 9200);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let result = AppConfig::load_from(Some(Path::new("/nonexistent/classroom-signal.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validate_rejects_bad_relay() {
        let config = AppConfig {
            relay: RelayConfig {
                channel_capacity: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidChannelCapacity(0))
        ));
    }
}
