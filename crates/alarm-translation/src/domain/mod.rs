//! Domain layer for alarm translation.

pub mod classification;
pub mod command;
pub mod heartbeat;
pub mod labels;
pub mod payload;
pub mod status;
