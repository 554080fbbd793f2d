//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{DeliveryError, OtpError, VerificationError};

use ob_shared::config::ConfigError;
use thiserror::Error;

/// Errors raised while constructing domain services
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type DomainResult<T> = Result<T, DomainError>;
