//! Health endpoint reporting relay liveness and room occupancy.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::adapters::websocket::SignalingState;

/// Response body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub rooms: usize,
    pub peers: usize,
}

pub async fn health_handler(State(state): State<SignalingState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        rooms: state.store.room_count().await,
        peers: state.store.peer_count().await,
    })
}
