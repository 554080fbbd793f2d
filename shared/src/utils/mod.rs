//! Common utility functions

pub mod destination;
pub mod validation;

// Re-export commonly used utilities
pub use destination::*;
pub use validation::*;
