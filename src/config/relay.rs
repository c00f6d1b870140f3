//! Signaling relay configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Upper bound for a peer's outbound queue.
const MAX_CHANNEL_CAPACITY: usize = 65_536;
const MIN_MESSAGE_BYTES: usize = 1024;
const MAX_MESSAGE_BYTES: usize = 16 * 1024 * 1024;

/// Signaling relay configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Route the WebSocket endpoint is mounted on
    #[serde(default = "default_path")]
    pub path: String,

    /// Per-connection outbound queue size; frames beyond it are dropped
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Largest accepted inbound message/frame in bytes
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

impl RelayConfig {
    /// Validate relay configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.path.starts_with('/') || self.path == "/health" {
            return Err(ValidationError::InvalidPath(self.path.clone()));
        }
        if self.channel_capacity == 0 || self.channel_capacity > MAX_CHANNEL_CAPACITY {
            return Err(ValidationError::InvalidChannelCapacity(self.channel_capacity));
        }
        if !(MIN_MESSAGE_BYTES..=MAX_MESSAGE_BYTES).contains(&self.max_message_bytes) {
            return Err(ValidationError::InvalidMessageSize(self.max_message_bytes));
        }
        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            channel_capacity: default_channel_capacity(),
            max_message_bytes: default_max_message_bytes(),
        }
    }
}

fn default_path() -> String {
    "/ws".to_string()
}

fn default_channel_capacity() -> usize {
    256
}

fn default_max_message_bytes() -> usize {
    64 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RelayConfig::default();
        assert_eq!(config.path, "/ws");
        assert_eq!(config.channel_capacity, 256);
        assert_eq!(config.max_message_bytes, 65_536);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_relative_or_reserved_path() {
        for path in ["ws", "", "/health"] {
            let config = RelayConfig {
                path: path.to_string(),
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ValidationError::InvalidPath(_))));
        }
    }

    #[test]
    fn rejects_out_of_range_capacity() {
        let config = RelayConfig {
            channel_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RelayConfig {
            channel_capacity: 100_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_message_size() {
        let config = RelayConfig {
            max_message_bytes: 512,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RelayConfig {
            max_message_bytes: 32 * 1024 * 1024,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
