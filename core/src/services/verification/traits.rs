//! Contract a verification backend must satisfy

use async_trait::async_trait;

use crate::errors::{DeliveryError, VerificationError};

/// Backend that delivers and checks one-time passcodes
///
/// Implementations include:
/// - a static reference backend accepting one fixed code
/// - an in-memory backend generating a code per destination
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Deliver a new code to `destination`
    ///
    /// # Arguments
    ///
    /// * `destination` - Phone number (E.164) or email address
    async fn request_code(&self, destination: &str) -> Result<(), DeliveryError>;

    /// Check `code` for `destination`
    ///
    /// The controller only calls this with a complete code: exactly
    /// `code_length` ASCII digits.
    async fn verify(&self, destination: &str, code: &str) -> Result<(), VerificationError>;

    /// Backend name for logs
    fn provider_name(&self) -> &str {
        "unknown"
    }
}
