//! In-memory room store for signaling connections.
//!
//! Rooms are keyed by the client-supplied room id and hold the peers
//! currently connected to them.
//!
//! # Architecture
//!
//! ```text
//! Room: math-101         Room: art-7
//! ├── instructor (host)  └── instructor (host)
//! ├── student-a
//! └── student-b
//! ```
//!
//! Relays are point-to-point within one room. Membership notices are queued
//! to every affected peer before the write guard is released.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::signaling::{ClientId, Peer, RoomId};
use crate::ports::{Admission, AdmissionError, Departure, JoinNotices, RoomStore};

/// Peers of one room in join order. Rooms are small, so lookups scan.
#[derive(Debug, Default)]
struct Room {
    peers: Vec<Peer>,
}

impl Room {
    fn position(&self, client_id: &ClientId) -> Option<usize> {
        self.peers.iter().position(|p| &p.client_id == client_id)
    }

    fn has_host(&self) -> bool {
        self.peers.iter().any(|p| p.role.is_host())
    }
}

/// Queues a notice from inside the critical section. Never blocks.
fn notify(room_id: &RoomId, peer: &Peer, frame: String) {
    if let Err(e) = peer.handle.try_deliver(frame) {
        tracing::debug!(
            room_id = %room_id,
            client_id = %peer.client_id,
            error = %e,
            "Dropped membership notice"
        );
    }
}

/// Room registry guarded by a single store-wide lock.
///
/// # Thread Safety
///
/// Uses `RwLock` since relay lookups (reads) far outnumber joins and
/// leaves (writes). Every mutation, including the host check on join and
/// room deletion on last leave, happens under one write guard, so no
/// reader sees a half-updated room.
#[derive(Debug, Default)]
pub struct InMemoryRoomStore {
    rooms: RwLock<HashMap<RoomId, Room>>,
}

impl InMemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn add_peer(
        &self,
        room_id: &RoomId,
        peer: Peer,
        notices: JoinNotices<'_>,
    ) -> Result<Admission, AdmissionError> {
        let mut rooms = self.rooms.write().await;

        if let Some(room) = rooms.get(room_id) {
            if room.position(&peer.client_id).is_some() {
                return Err(AdmissionError::DuplicateClientId);
            }
            if peer.role.is_host() && room.has_host() {
                return Err(AdmissionError::HostAlreadyPresent);
            }
        }

        let host_admitted = peer.role.is_host();
        let room = rooms.entry(room_id.clone()).or_default();
        if let Some(frame) = notices.announce {
            for other in &room.peers {
                notify(room_id, other, frame.to_string());
            }
        }
        room.peers.push(peer);

        let welcome = notices.welcome.and_then(|welcome| welcome(room.peers.as_slice()));
        if let (Some(frame), Some(joiner)) = (welcome, room.peers.last()) {
            notify(room_id, joiner, frame);
        }

        Ok(Admission {
            peers: room.peers.clone(),
            host_admitted,
        })
    }

    async fn remove_peer(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
        farewell: Option<&str>,
    ) -> Option<Departure> {
        let mut rooms = self.rooms.write().await;

        let room = rooms.get_mut(room_id)?;
        let index = room.position(client_id)?;
        let peer = room.peers.remove(index);

        if let Some(frame) = farewell {
            for other in &room.peers {
                notify(room_id, other, frame.to_string());
            }
        }
        let remaining = room.peers.clone();

        if remaining.is_empty() {
            rooms.remove(room_id);
            tracing::debug!(room_id = %room_id, "Room emptied and removed");
        }

        Some(Departure { peer, remaining })
    }

    async fn get_peer(&self, room_id: &RoomId, client_id: &ClientId) -> Option<Peer> {
        let rooms = self.rooms.read().await;
        let room = rooms.get(room_id)?;
        room.position(client_id).map(|i| room.peers[i].clone())
    }

    async fn list_peers(&self, room_id: &RoomId) -> Vec<Peer> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .map(|room| room.peers.clone())
            .unwrap_or_default()
    }

    async fn has_host(&self, room_id: &RoomId) -> bool {
        self.rooms
            .read()
            .await
            .get(room_id)
            .map(Room::has_host)
            .unwrap_or(false)
    }

    async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    async fn peer_count(&self) -> usize {
        self.rooms.read().await.values().map(|r| r.peers.len()).sum()
    }
}
