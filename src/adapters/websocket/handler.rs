//! WebSocket upgrade handler for signaling connections.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Upgrade to WebSocket (non-upgrade requests are rejected with 4xx)
//! 2. Create the connection's outbound queue and session
//! 3. Pump inbound frames into the session and queued frames to the socket
//! 4. Tear down the session exactly once when the socket ends

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::config::RelayConfig;
use crate::domain::signaling::{ConnectionId, PeerHandle};
use crate::ports::RoomStore;

use super::session::{SessionFlow, SignalingSession};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct SignalingState {
    /// Shared room registry.
    pub store: Arc<dyn RoomStore>,
    /// Queue and frame limits.
    pub relay: RelayConfig,
}

impl SignalingState {
    pub fn new(store: Arc<dyn RoomStore>, relay: RelayConfig) -> Self {
        Self { store, relay }
    }
}

/// Handle WebSocket upgrade requests for the signaling relay.
///
/// Route: `GET {relay.path}` (default `/ws`)
///
/// The `WebSocketUpgrade` extractor rejects plain HTTP requests before any
/// protocol logic runs.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SignalingState>) -> Response {
    let limit = state.relay.max_message_bytes;
    ws.max_message_size(limit)
        .max_frame_size(limit)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection. Frames queued for this peer by
/// any session (including its own) are written in queue order.
async fn handle_socket(socket: WebSocket, state: SignalingState) {
    let connection_id = ConnectionId::new();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<String>(state.relay.channel_capacity);

    let mut session =
        SignalingSession::new(state.store.clone(), PeerHandle::new(tx), connection_id);

    tracing::info!(connection_id = %connection_id, "Signaling connection opened");

    loop {
        tokio::select! {
            // Queued frames → this client's WebSocket
            Some(frame) = rx.recv() => {
                if let Err(e) = sender.send(Message::Text(frame)).await {
                    tracing::debug!(connection_id = %connection_id, "Send error: {}", e);
                    break;
                }
            }

            // This client's WebSocket → session
            incoming = receiver.next() => {
                let flow = match incoming {
                    Some(Ok(Message::Text(text))) => session.handle_text(&text).await,
                    Some(Ok(Message::Binary(_))) => session.handle_binary(),
                    // WebSocket protocol ping/pong - answered by the transport
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => SessionFlow::Continue,
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::debug!(connection_id = %connection_id, "Client closed connection");
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::debug!(connection_id = %connection_id, "Receive error: {}", e);
                        break;
                    }
                };

                if flow == SessionFlow::Close {
                    flush_queued(&mut sender, &mut rx).await;
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    }

    // Cleanup: leave room and notify the remaining peers
    session.close().await;

    tracing::info!(connection_id = %connection_id, "Signaling connection closed");
}

/// Write whatever is already queued, e.g. the error preceding a close.
async fn flush_queued(sender: &mut SplitSink<WebSocket, Message>, rx: &mut mpsc::Receiver<String>) {
    while let Ok(frame) = rx.try_recv() {
        if sender.send(Message::Text(frame)).await.is_err() {
            break;
        }
    }
}

/// Create axum router for the signaling endpoint.
pub fn signaling_router(path: &str) -> axum::Router<SignalingState> {
    use axum::routing::get;

    axum::Router::new().route(path, get(ws_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::rooms::InMemoryRoomStore;

    #[test]
    fn signaling_state_shares_store() {
        let store: Arc<dyn RoomStore> = Arc::new(InMemoryRoomStore::new());
        let state = SignalingState::new(store.clone(), RelayConfig::default());

        assert!(Arc::ptr_eq(&state.store, &store));
        assert_eq!(state.relay.path, "/ws");
    }

    #[test]
    fn signaling_router_creates_route() {
        let _router = signaling_router("/ws");
    }
}
