//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `websocket` - Signaling sessions over axum WebSockets, in-memory room store
//! - `http` - Router assembly and the health endpoint

pub mod http;
pub mod websocket;

pub use websocket::{InMemoryRoomStore, SignalingState};
