//! # Infrastructure Layer
//!
//! Concrete implementations of the on-boarding service contracts:
//! - **Verification**: the static reference backend and an in-memory backend
//!   generating one code per destination
//! - **Delivery**: code senders; a console mock stands in for an SMS gateway

use ob_core::errors::DeliveryError;

/// Delivery module - code senders
pub mod delivery;

/// Verification module - `VerificationService` backends and factory
pub mod verification;

pub use delivery::{CodeSender, MockCodeSender};
pub use verification::{
    create_verification_service, generate_code, InMemoryVerificationService, StaticCodeService,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Destination rejected before sending
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    /// Sender failed to hand the message over
    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl From<InfrastructureError> for DeliveryError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::InvalidDestination(destination) => {
                DeliveryError::InvalidDestination { destination }
            }
            InfrastructureError::Delivery(reason) => DeliveryError::Failed { reason },
        }
    }
}
