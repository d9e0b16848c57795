//! Domain layer for the bridge runtime.

pub mod config;
pub mod error;
pub mod outcome;
