//! WebSocket adapters for the signaling relay.
//!
//! This module brokers WebRTC session setup between one host and any number
//! of viewers per room. It never touches media: SDP and ICE payloads are
//! forwarded as opaque JSON.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  text frames   ┌───────────────────┐
//! │ ws_handler   │ ─────────────▶ │ SignalingSession  │ (one per connection)
//! │ (axum)       │ ◀───────────── │  state machine    │
//! └──────────────┘  mpsc queue    └───────────────────┘
//!                                          │
//!                                          │ add/remove/get/list
//!                                          ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      InMemoryRoomStore                              │
//! │   Room: math-101            Room: art-7                             │
//! │   ├── instructor (host)     └── instructor (host)                   │
//! │   └── student-a                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - Wire protocol types
//! - [`rooms`] - In-memory room registry
//! - [`session`] - Per-connection protocol state machine and routing
//! - [`handler`] - Axum WebSocket upgrade handler

pub mod handler;
pub mod messages;
pub mod rooms;
pub mod session;

pub use handler::{signaling_router, ws_handler, SignalingState};
pub use messages::{ClientMessage, MessageKind, PeerSummary, ServerMessage};
pub use rooms::InMemoryRoomStore;
pub use session::{SessionFlow, SignalingSession};
