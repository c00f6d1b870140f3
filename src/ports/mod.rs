//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Signaling Ports
//!
//! - `RoomStore` - Concurrency-safe registry of rooms and their peers

mod room_store;

pub use room_store::{Admission, AdmissionError, Departure, JoinNotices, RoomStore, WelcomeFrame};
