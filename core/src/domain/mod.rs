//! Domain layer containing the entities of the OTP verification view.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
