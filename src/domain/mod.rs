//! Domain layer - transport-independent signaling model.

pub mod signaling;
