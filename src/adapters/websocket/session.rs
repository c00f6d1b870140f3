//! Per-connection signaling session.
//!
//! Owns the protocol state machine for one connection and performs all
//! room mutations and relays on its behalf. The session is transport
//! agnostic: the WebSocket handler feeds it text frames and drains the
//! connection's outbound queue.
//!
//! # Message Flow
//! 1. `join` admits the peer, answers `joined`, broadcasts `peer-joined`
//! 2. `offer` (host only), `answer` (viewer only) and `ice` (either) are
//!    relayed point-to-point to `target` within the same room
//! 3. `close` removes the peer and broadcasts `peer-left`, exactly once

use std::sync::Arc;

use serde_json::Value;

use crate::domain::signaling::{
    ClientId, ConnectionId, ConnectionState, JoinedPeer, Peer, PeerHandle, Role, RoomId,
    SignalingError,
};
use crate::ports::{JoinNotices, RoomStore};

use super::messages::{
    parse_frame, ClientMessage, IceCandidateMessage, JoinRequest, JoinedMessage, MessageKind,
    PeerJoinedMessage, PeerLeftMessage, PeerSummary, ServerMessage, SessionDescriptionMessage,
};

/// What the transport should do after a frame was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFlow {
    Continue,
    /// Flush queued frames, then close the connection.
    Close,
}

/// Protocol state and routing for one signaling connection.
pub struct SignalingSession {
    store: Arc<dyn RoomStore>,
    outbound: PeerHandle,
    connection_id: ConnectionId,
    state: ConnectionState,
}

impl SignalingSession {
    /// Create a session whose own frames are pushed through `outbound`.
    pub fn new(
        store: Arc<dyn RoomStore>,
        outbound: PeerHandle,
        connection_id: ConnectionId,
    ) -> Self {
        Self {
            store,
            outbound,
            connection_id,
            state: ConnectionState::Unjoined,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Handle one inbound text frame.
    pub async fn handle_text(&mut self, text: &str) -> SessionFlow {
        if self.state.is_closed() {
            return SessionFlow::Close;
        }

        match self.process(text).await {
            Ok(()) => SessionFlow::Continue,
            Err(e) => self.reject(e),
        }
    }

    /// Handle an inbound binary frame, which the protocol does not use.
    pub fn handle_binary(&mut self) -> SessionFlow {
        if self.state.is_closed() {
            return SessionFlow::Close;
        }
        self.reject(SignalingError::BinaryFrame)
    }

    /// Tear down the session after a disconnect or transport error.
    ///
    /// Safe to call more than once and on sessions that never joined.
    pub async fn close(&mut self) {
        let ConnectionState::Joined(peer) = self.state.close() else {
            return;
        };

        let farewell = self.encode(&ServerMessage::PeerLeft(PeerLeftMessage {
            client_id: peer.client_id.clone(),
        }));
        let Some(departure) = self
            .store
            .remove_peer(&peer.room_id, &peer.client_id, farewell.as_deref())
            .await
        else {
            return;
        };

        tracing::info!(
            connection_id = %self.connection_id,
            room_id = %peer.room_id,
            client_id = %departure.peer.client_id,
            role = %departure.peer.role,
            remaining = departure.remaining.len(),
            "Peer left room"
        );
    }

    async fn process(&mut self, text: &str) -> Result<(), SignalingError> {
        let value = parse_frame(text)?;

        if self.state.joined().is_none() && !MessageKind::is_join(&value) {
            return Err(SignalingError::NotJoined);
        }

        let kind = MessageKind::of(&value)?;
        match ClientMessage::from_value(kind, value)? {
            ClientMessage::Join(req) => self.join(req).await,
            ClientMessage::Offer(req) => {
                let sender = self.sender(req.room_id.as_deref(), req.client_id.as_deref())?;
                if !sender.role.is_host() {
                    return Err(SignalingError::OnlyHostsCanOffer);
                }
                let target = target_id(req.target)?;
                let sdp = require_payload(req.sdp, "sdp")?;
                let message = ServerMessage::Offer(SessionDescriptionMessage {
                    client_id: sender.client_id.clone(),
                    target: target.clone(),
                    sdp,
                });
                self.relay(&sender, &target, &message).await
            }
            ClientMessage::Answer(req) => {
                let sender = self.sender(req.room_id.as_deref(), req.client_id.as_deref())?;
                if sender.role != Role::Viewer {
                    return Err(SignalingError::OnlyViewersCanAnswer);
                }
                let target = target_id(req.target)?;
                let sdp = require_payload(req.sdp, "sdp")?;
                let message = ServerMessage::Answer(SessionDescriptionMessage {
                    client_id: sender.client_id.clone(),
                    target: target.clone(),
                    sdp,
                });
                self.relay(&sender, &target, &message).await
            }
            ClientMessage::Ice(req) => {
                let sender = self.sender(req.room_id.as_deref(), req.client_id.as_deref())?;
                let target = target_id(req.target)?;
                let candidate = require_payload(req.candidate, "candidate")?;
                let message = ServerMessage::Ice(IceCandidateMessage {
                    client_id: sender.client_id.clone(),
                    target: target.clone(),
                    candidate,
                });
                self.relay(&sender, &target, &message).await
            }
        }
    }

    async fn join(&mut self, req: JoinRequest) -> Result<(), SignalingError> {
        if self.state.joined().is_some() {
            return Err(SignalingError::AlreadyJoined);
        }

        let room_id = RoomId::new(req.room_id)?;
        let client_id = ClientId::new(req.client_id)?;
        let role: Role = req.role.parse()?;

        // Fast rejection; add_peer repeats the check under its lock.
        if role.is_host() && self.store.has_host(&room_id).await {
            return Err(SignalingError::HostAlreadyPresent);
        }

        let announce = self.encode(&ServerMessage::PeerJoined(PeerJoinedMessage {
            client_id: client_id.clone(),
            role,
        }));
        let welcome = |members: &[Peer]| {
            self.encode(&ServerMessage::Joined(JoinedMessage {
                client_id: client_id.clone(),
                role,
                peers: members.iter().map(PeerSummary::from).collect(),
            }))
        };
        let notices = JoinNotices {
            welcome: Some(&welcome),
            announce: announce.as_deref(),
        };

        let peer = Peer::new(client_id.clone(), role, self.outbound.clone());
        let admission = self.store.add_peer(&room_id, peer, notices).await?;

        tracing::info!(
            connection_id = %self.connection_id,
            room_id = %room_id,
            client_id = %client_id,
            role = %role,
            host = admission.host_admitted,
            members = admission.peers.len(),
            "Peer joined room"
        );

        self.state = ConnectionState::Joined(JoinedPeer {
            room_id,
            client_id,
            role,
        });

        Ok(())
    }

    /// Resolve the joined sender, checking any identity echoed in the message.
    fn sender(
        &self,
        room_id: Option<&str>,
        client_id: Option<&str>,
    ) -> Result<JoinedPeer, SignalingError> {
        let joined = self.state.joined().ok_or(SignalingError::NotJoined)?;

        let room_matches = room_id.map_or(true, |r| r == joined.room_id.as_str());
        let client_matches = client_id.map_or(true, |c| c == joined.client_id.as_str());
        if !room_matches || !client_matches {
            return Err(SignalingError::IdentityMismatch);
        }

        Ok(joined.clone())
    }

    async fn relay(
        &self,
        sender: &JoinedPeer,
        target: &ClientId,
        message: &ServerMessage,
    ) -> Result<(), SignalingError> {
        let peer = self
            .store
            .get_peer(&sender.room_id, target)
            .await
            .ok_or(SignalingError::TargetNotFound)?;

        tracing::debug!(
            connection_id = %self.connection_id,
            room_id = %sender.room_id,
            from = %sender.client_id,
            to = %target,
            "Relaying signal"
        );

        if let Some(frame) = self.encode(message) {
            self.push(&peer, frame);
        }
        Ok(())
    }

    /// Report an error to this connection and decide whether it survives.
    fn reject(&mut self, error: SignalingError) -> SessionFlow {
        tracing::warn!(
            connection_id = %self.connection_id,
            category = ?error.category(),
            error = %error,
            "Rejected signaling message"
        );

        self.reply(&ServerMessage::error(&error));

        if error.is_fatal() {
            self.state.close();
            SessionFlow::Close
        } else {
            SessionFlow::Continue
        }
    }

    fn reply(&self, message: &ServerMessage) {
        let Some(frame) = self.encode(message) else {
            return;
        };
        if let Err(e) = self.outbound.try_deliver(frame) {
            tracing::debug!(
                connection_id = %self.connection_id,
                error = %e,
                "Dropped reply to own connection"
            );
        }
    }

    /// Best-effort delivery; failures are logged and swallowed.
    fn push(&self, peer: &Peer, frame: String) {
        if let Err(e) = peer.handle.try_deliver(frame) {
            tracing::debug!(
                connection_id = %self.connection_id,
                client_id = %peer.client_id,
                error = %e,
                "Dropped frame for peer"
            );
        }
    }

    fn encode(&self, message: &ServerMessage) -> Option<String> {
        match message.to_frame() {
            Ok(frame) => Some(frame),
            Err(e) => {
                tracing::error!(
                    connection_id = %self.connection_id,
                    error = %e,
                    "Failed to serialize server message"
                );
                None
            }
        }
    }
}

fn target_id(target: String) -> Result<ClientId, SignalingError> {
    ClientId::new(target).map_err(|_| SignalingError::EmptyField("target"))
}

fn require_payload(payload: Value, field: &'static str) -> Result<Value, SignalingError> {
    if payload.is_null() {
        return Err(SignalingError::EmptyField(field));
    }
    Ok(payload)
}
