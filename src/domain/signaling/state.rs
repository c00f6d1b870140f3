//! Per-connection protocol state machine.
//!
//! ```text
//! Unjoined ──join──▶ Joined(room, client, role)
//!     │                     │
//!     └──reject/close──▶ Closed ◀──close──┘
//! ```

use super::{ClientId, Role, RoomId};

/// Identity a connection acquired through a successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedPeer {
    pub room_id: RoomId,
    pub client_id: ClientId,
    pub role: Role,
}

/// Lifecycle state of one signaling connection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Unjoined,
    Joined(JoinedPeer),
    /// Terminal.
    Closed,
}

impl ConnectionState {
    /// Returns the joined identity, if any.
    pub fn joined(&self) -> Option<&JoinedPeer> {
        match self {
            ConnectionState::Joined(peer) => Some(peer),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ConnectionState::Closed)
    }

    /// Moves to `Closed`, returning the state that was left.
    pub fn close(&mut self) -> ConnectionState {
        std::mem::replace(self, ConnectionState::Closed)
    }
}
