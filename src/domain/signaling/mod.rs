//! Signaling domain - rooms, peers, roles and the connection state machine.
//!
//! Nothing here knows about WebSockets or JSON; the adapters layer maps
//! these types onto the wire.

mod errors;
mod ids;
mod peer;
mod role;
mod state;

pub use errors::{DeliveryError, ErrorCategory, SignalingError};
pub use ids::{ClientId, ConnectionId, RoomId};
pub use peer::{Peer, PeerHandle};
pub use role::Role;
pub use state::{ConnectionState, JoinedPeer};
