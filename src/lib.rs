//! Classroom Signal - WebRTC signaling relay for live classroom streams
//!
//! This crate brokers peer-connection setup between one host (the instructor's
//! stream) and any number of viewers per room over WebSockets. It forwards
//! session descriptions and ICE candidates verbatim and never touches media.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
