//! Identifier value objects for the signaling relay.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::SignalingError;

/// Opaque identifier of a signaling room.
///
/// Supplied by clients; the relay never interprets it beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Creates a RoomId, rejecting blank values.
    pub fn new(id: impl Into<String>) -> Result<Self, SignalingError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(SignalingError::EmptyField("roomId"));
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-supplied peer identifier, unique within its room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a ClientId, rejecting blank values.
    pub fn new(id: impl Into<String>) -> Result<Self, SignalingError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(SignalingError::EmptyField("clientId"));
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side identifier for one accepted WebSocket connection.
///
/// Never sent on the wire; it only tags log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Creates a new random ConnectionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
