//! Error types of the OTP verification workflow
//!
//! `OtpError` values are never returned past the controller: their `Display`
//! text is what the session stores as its user-visible error message.

use thiserror::Error;

/// Attempt-level errors surfaced to the user through the session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// Submit pressed before every slot was filled; never reaches the backend
    #[error("incomplete code")]
    IncompleteCode,

    /// Backend rejected the code
    #[error("invalid code, please retry")]
    InvalidCode,

    /// Backend failed for a reason other than an incorrect code
    #[error("verification unavailable, please retry")]
    VerificationUnavailable,

    /// Attempt limit reached; only a resend unlocks the session
    #[error("too many attempts, request a new code")]
    AttemptsExhausted,
}

/// Failure reported by `VerificationService::verify`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Incorrect verification code")]
    IncorrectCode,

    #[error("Verification service unavailable: {message}")]
    Unavailable { message: String },
}

impl VerificationError {
    /// Whether this failure counts against the attempt limit
    pub fn is_incorrect_code(&self) -> bool {
        matches!(self, VerificationError::IncorrectCode)
    }
}

impl From<&VerificationError> for OtpError {
    fn from(error: &VerificationError) -> Self {
        match error {
            VerificationError::IncorrectCode => OtpError::InvalidCode,
            VerificationError::Unavailable { .. } => OtpError::VerificationUnavailable,
        }
    }
}

/// Failure reported by `VerificationService::request_code`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Invalid destination: {destination}")]
    InvalidDestination { destination: String },

    #[error("Code could not be delivered: {reason}")]
    Failed { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_visible_messages() {
        assert_eq!(OtpError::IncompleteCode.to_string(), "incomplete code");
        assert_eq!(OtpError::InvalidCode.to_string(), "invalid code, please retry");
        assert_eq!(
            OtpError::VerificationUnavailable.to_string(),
            "verification unavailable, please retry"
        );
        assert_eq!(
            OtpError::AttemptsExhausted.to_string(),
            "too many attempts, request a new code"
        );
    }

    #[test]
    fn test_verification_error_mapping() {
        assert_eq!(OtpError::from(&VerificationError::IncorrectCode), OtpError::InvalidCode);
        let unavailable = VerificationError::Unavailable {
            message: "timeout".to_string(),
        };
        assert_eq!(OtpError::from(&unavailable), OtpError::VerificationUnavailable);
        assert!(!unavailable.is_incorrect_code());
    }
}
