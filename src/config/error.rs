//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind host: {0}")]
    InvalidHost(String),

    #[error("Invalid WebSocket path: {0:?} (must start with '/' and not be /health)")]
    InvalidPath(String),

    #[error("Channel capacity must be between 1 and 65536, got {0}")]
    InvalidChannelCapacity(usize),

    #[error("Max message size must be between 1 KiB and 16 MiB, got {0}")]
    InvalidMessageSize(usize),
}
