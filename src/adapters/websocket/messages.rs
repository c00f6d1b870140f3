//! WebSocket message types for the signaling protocol.
//!
//! Defines the protocol between the relay and connected peers:
//! - Client → Server: join, offer, answer, ice
//! - Server → Client: joined, peer-joined, peer-left, relayed signals, errors
//!
//! Every frame is one JSON object tagged by a `type` field. Session
//! descriptions and ICE candidates are opaque `serde_json::Value`s that the
//! relay forwards without inspection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::signaling::{ClientId, Peer, Role, SignalingError};

// ============================================
// Client → Server Messages
// ============================================

/// Inbound message kinds, known before the body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Join,
    Offer,
    Answer,
    Ice,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Join => "join",
            MessageKind::Offer => "offer",
            MessageKind::Answer => "answer",
            MessageKind::Ice => "ice",
        }
    }

    /// Whether a decoded frame is tagged `join`, regardless of its body.
    pub fn is_join(value: &Value) -> bool {
        value.get("type").and_then(Value::as_str) == Some(MessageKind::Join.as_str())
    }

    /// Reads the `type` tag of a decoded JSON frame.
    pub fn of(value: &Value) -> Result<Self, SignalingError> {
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(SignalingError::MissingType)?;

        match tag {
            "join" => Ok(MessageKind::Join),
            "offer" => Ok(MessageKind::Offer),
            "answer" => Ok(MessageKind::Answer),
            "ice" => Ok(MessageKind::Ice),
            other => Err(SignalingError::UnknownType(other.to_string())),
        }
    }
}

/// All message types that can be received from a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Join(JoinRequest),
    Offer(SessionDescriptionRequest),
    Answer(SessionDescriptionRequest),
    Ice(IceCandidateRequest),
}

impl ClientMessage {
    /// Decodes a frame whose kind has already been determined.
    pub fn from_value(kind: MessageKind, value: Value) -> Result<Self, SignalingError> {
        serde_json::from_value(value)
            .map_err(|e| SignalingError::malformed(kind.as_str(), e.to_string()))
    }
}

/// Decodes a text frame into raw JSON; the kind is classified separately.
pub fn parse_frame(text: &str) -> Result<Value, SignalingError> {
    serde_json::from_str(text).map_err(|_| SignalingError::InvalidJson)
}

/// Request to join a room.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub room_id: String,
    pub client_id: String,
    /// Validated against [`Role`] after decoding for a clearer error.
    pub role: String,
}

/// `offer` or `answer` addressed to one peer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDescriptionRequest {
    /// Optional echo of the sender's room; must match when present.
    pub room_id: Option<String>,
    /// Optional echo of the sender's id; must match when present.
    pub client_id: Option<String>,
    pub target: String,
    pub sdp: Value,
}

/// ICE candidate addressed to one peer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidateRequest {
    pub room_id: Option<String>,
    pub client_id: Option<String>,
    pub target: String,
    pub candidate: Value,
}

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from the relay to a client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Join accepted.
    Joined(JoinedMessage),

    /// Another peer entered the room.
    PeerJoined(PeerJoinedMessage),

    /// A peer left the room.
    PeerLeft(PeerLeftMessage),

    /// Relayed session offer.
    Offer(SessionDescriptionMessage),

    /// Relayed session answer.
    Answer(SessionDescriptionMessage),

    /// Relayed ICE candidate.
    Ice(IceCandidateMessage),

    /// Protocol error, sent to the offending client only.
    Error(ErrorMessage),
}

impl ServerMessage {
    pub fn error(error: &SignalingError) -> Self {
        ServerMessage::Error(ErrorMessage {
            message: error.to_string(),
        })
    }

    /// Serializes the message into a text frame.
    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One member entry of a `joined` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerSummary {
    pub client_id: ClientId,
    pub role: Role,
}

impl From<&Peer> for PeerSummary {
    fn from(peer: &Peer) -> Self {
        Self {
            client_id: peer.client_id.clone(),
            role: peer.role,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedMessage {
    pub client_id: ClientId,
    pub role: Role,
    /// Full membership at admission time, including the joiner.
    pub peers: Vec<PeerSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerJoinedMessage {
    pub client_id: ClientId,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerLeftMessage {
    pub client_id: ClientId,
}

/// Relayed offer/answer; `client_id` is the sender.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDescriptionMessage {
    pub client_id: ClientId,
    pub target: ClientId,
    pub sdp: Value,
}

/// Relayed ICE candidate; `client_id` is the sender.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidateMessage {
    pub client_id: ClientId,
    pub target: ClientId,
    pub candidate: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}
