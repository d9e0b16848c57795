//! # Ports Layer
//!
//! - **Inbound (Driving)**: what the HTTP gateway calls
//! - **Outbound (Driven)**: command pipe, heartbeat file, handshake callback, clock

pub mod inbound;
pub mod outbound;
