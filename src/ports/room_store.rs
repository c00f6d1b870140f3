//! RoomStore port - Registry of signaling rooms and their peers.
//!
//! The store is the single source of truth for "who is in which room with
//! which role". Session handlers never touch a room's peer map directly;
//! every read and mutation goes through this narrow interface.
//!
//! ## Lifecycle
//!
//! 1. First successful `add_peer` for a room id creates the room
//! 2. Later joins and relays read or extend it
//! 3. `remove_peer` of the last member deletes the room
//!
//! A room is never observable with zero peers.
//!
//! ## Notices
//!
//! Membership notices (`joined`, `peer-joined`, `peer-left`) are queued by
//! the store inside the critical section that changes membership. Every
//! member therefore sees changes in the order they were applied, and a
//! joiner's `joined` frame precedes any notice about later changes.

use async_trait::async_trait;

use crate::domain::signaling::{ClientId, Peer, RoomId, SignalingError};

/// Builds the admitted peer's reply from the room's full member list.
///
/// Runs while the store holds its lock, so it must not call back into the
/// store.
pub type WelcomeFrame<'a> = &'a (dyn Fn(&[Peer]) -> Option<String> + Send + Sync);

/// Frames queued while a join is applied.
#[derive(Clone, Copy, Default)]
pub struct JoinNotices<'a> {
    /// Sent to the admitted peer.
    pub welcome: Option<WelcomeFrame<'a>>,
    /// Sent to every other member.
    pub announce: Option<&'a str>,
}

impl JoinNotices<'_> {
    /// Admit without notifying anyone.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Result of a successful admission.
#[derive(Debug, Clone)]
pub struct Admission {
    /// Room membership right after the insert, including the new peer.
    pub peers: Vec<Peer>,
    /// True when the admitted peer is the room's host.
    pub host_admitted: bool,
}

/// Result of removing a peer.
#[derive(Debug, Clone)]
pub struct Departure {
    pub peer: Peer,
    /// Members left behind, taken under the same lock as the removal.
    pub remaining: Vec<Peer>,
}

/// Reasons a peer cannot be added to a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AdmissionError {
    /// The room already has a host and the peer asked to be one.
    #[error("room already has a host")]
    HostAlreadyPresent,

    /// Another peer in the room uses the same client id.
    #[error("client id already in use in this room")]
    DuplicateClientId,
}

impl From<AdmissionError> for SignalingError {
    fn from(e: AdmissionError) -> Self {
        match e {
            AdmissionError::HostAlreadyPresent => SignalingError::HostAlreadyPresent,
            AdmissionError::DuplicateClientId => SignalingError::DuplicateClientId,
        }
    }
}

/// Port for the concurrency-safe room registry.
///
/// Implementations must:
/// - Perform the host check and the insert of `add_peer` atomically, so
///   two concurrent host joins to one room cannot both succeed
/// - Delete a room in the same critical section that removes its last peer
/// - Queue notices without blocking, inside the critical section that
///   changes membership
/// - Return owned snapshots from `list_peers`, never live views
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Insert a peer, creating the room if absent.
    ///
    /// Nothing is queued when admission fails.
    async fn add_peer(
        &self,
        room_id: &RoomId,
        peer: Peer,
        notices: JoinNotices<'_>,
    ) -> Result<Admission, AdmissionError>;

    /// Remove a peer, deleting the room if it becomes empty, and queue
    /// `farewell` to the remaining members.
    ///
    /// Idempotent: returns `None` when the peer is already gone.
    async fn remove_peer(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
        farewell: Option<&str>,
    ) -> Option<Departure>;

    /// Point lookup used to target relays.
    async fn get_peer(&self, room_id: &RoomId, client_id: &ClientId) -> Option<Peer>;

    /// Snapshot of current membership (empty if the room does not exist).
    async fn list_peers(&self, room_id: &RoomId) -> Vec<Peer>;

    /// Whether the room currently has a host.
    async fn has_host(&self, room_id: &RoomId) -> bool;

    /// Number of live rooms.
    async fn room_count(&self) -> usize;

    /// Number of peers across all rooms.
    async fn peer_count(&self) -> usize;
}
