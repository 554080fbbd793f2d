//! Code sender interface

use async_trait::async_trait;

use crate::InfrastructureError;

/// Channel that delivers text messages to a destination
///
/// Implementations include:
/// - Mock implementation printing to the console
#[async_trait]
pub trait CodeSender: Send + Sync {
    /// Send a message to a phone number or email address
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier of the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send(&self, destination: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Send a verification code using the standard message format
    async fn send_code(&self, destination: &str, code: &str) -> Result<String, InfrastructureError> {
        self.send(destination, &verification_message(code)).await
    }

    /// Sender name (e.g. "Mock")
    fn provider_name(&self) -> &str;
}

/// Message body carrying a verification code
pub fn verification_message(code: &str) -> String {
    format!("Your Ask IT verification code is: {}", code)
}
