//! # Ask IT On-boarding Core
//!
//! Domain layer of the on-boarding flow: the OTP verification session and
//! its controller, the sign-up form validation, the profile setup step, and
//! the contracts external backends implement.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
