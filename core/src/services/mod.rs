//! Business services of the on-boarding flow.

pub mod profile;
pub mod signup;
pub mod verification;

// Re-export commonly used types
pub use profile::{MediaPicker, ProfileSetup};
pub use signup::{FormValidationEngine, IdentityProvider, SignUpDetails, SignUpFormValidator};
pub use verification::{VerificationController, VerificationService};
