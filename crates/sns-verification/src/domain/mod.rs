//! # Domain Layer
//!
//! Pure verification logic with no I/O dependencies.

pub mod canonical;
pub mod certificate;
pub mod errors;
pub mod policy;
pub mod signature;
pub mod source_domain;
