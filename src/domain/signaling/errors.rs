//! Error types for the signaling protocol.
//!
//! The `Display` text of a [`SignalingError`] is exactly the `message` field
//! of the `error` frame sent back to the offending client.

use thiserror::Error;

/// Coarse classification used for logging and close decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Wrong message for the current state, malformed payload, or role violation.
    Protocol,
    /// Target peer or room not found.
    Lookup,
    /// Room capacity rule violated on join.
    Capacity,
}

/// Errors reported to a client as an `error` frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalingError {
    #[error("invalid JSON message")]
    InvalidJson,

    #[error("message is missing a type")]
    MissingType,

    #[error("unknown message type: {0}")]
    UnknownType(String),

    #[error("malformed {kind} message: {reason}")]
    Malformed { kind: &'static str, reason: String },

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("role must be host or viewer, got {0:?}")]
    InvalidRole(String),

    #[error("binary frames are not supported")]
    BinaryFrame,

    #[error("join a room before sending signals")]
    NotJoined,

    #[error("already joined a room")]
    AlreadyJoined,

    #[error("only hosts can send offers")]
    OnlyHostsCanOffer,

    #[error("only viewers can send answers")]
    OnlyViewersCanAnswer,

    #[error("message identity does not match joined peer")]
    IdentityMismatch,

    #[error("target peer not found")]
    TargetNotFound,

    #[error("room already has a host")]
    HostAlreadyPresent,

    #[error("client id already in use in this room")]
    DuplicateClientId,
}

impl SignalingError {
    /// Creates a malformed-message error.
    pub fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        SignalingError::Malformed {
            kind,
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SignalingError::TargetNotFound => ErrorCategory::Lookup,
            SignalingError::HostAlreadyPresent | SignalingError::DuplicateClientId => {
                ErrorCategory::Capacity
            }
            _ => ErrorCategory::Protocol,
        }
    }

    /// Whether the connection must be closed after reporting this error.
    ///
    /// Only a second host is fatal: there is no state the rejected
    /// connection could continue in.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SignalingError::HostAlreadyPresent)
    }
}

/// Failure to push a frame into a peer's outbound queue.
///
/// Never surfaced to the sending client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("peer outbound queue is full")]
    QueueFull,

    #[error("peer connection is gone")]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_messages_match_protocol_text() {
        assert_eq!(
            SignalingError::NotJoined.to_string(),
            "join a room before sending signals"
        );
        assert_eq!(
            SignalingError::OnlyHostsCanOffer.to_string(),
            "only hosts can send offers"
        );
        assert_eq!(SignalingError::TargetNotFound.to_string(), "target peer not found");
    }

    #[test]
    fn only_duplicate_host_is_fatal() {
        assert!(SignalingError::HostAlreadyPresent.is_fatal());
        assert!(!SignalingError::DuplicateClientId.is_fatal());
        assert!(!SignalingError::TargetNotFound.is_fatal());
        assert!(!SignalingError::NotJoined.is_fatal());
        assert!(!SignalingError::InvalidJson.is_fatal());
    }

    #[test]
    fn categories() {
        assert_eq!(SignalingError::TargetNotFound.category(), ErrorCategory::Lookup);
        assert_eq!(SignalingError::HostAlreadyPresent.category(), ErrorCategory::Capacity);
        assert_eq!(SignalingError::OnlyViewersCanAnswer.category(), ErrorCategory::Protocol);
    }

    #[test]
    fn malformed_includes_kind_and_reason() {
        let err = SignalingError::malformed("offer", "missing field `target`");
        assert_eq!(err.to_string(), "malformed offer message: missing field `target`");
    }
}
