//! Verification session entity for the OTP view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::OtpError;

use super::code_input::CodeInputArray;

/// Lifecycle of one OTP view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// View not open
    Idle,
    /// Code entry in progress
    Editing,
    /// Verification call in flight
    Submitting,
    /// Code accepted; final
    Verified,
    /// Locked after too many incorrect codes until a resend
    Failed,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Editing => "editing",
            SessionStatus::Submitting => "submitting",
            SessionStatus::Verified => "verified",
            SessionStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// State of one OTP view, owned by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSession {
    /// Identifier for log correlation, renewed each time the view opens
    pub id: Uuid,

    /// Phone number or email the code was sent to
    pub destination: String,

    /// Segmented code entry
    pub input: CodeInputArray,

    pub status: SessionStatus,

    /// User-visible error for the last attempt
    pub error_message: Option<String>,

    /// Transient acknowledgement of the last delivery request
    pub notice: Option<String>,

    /// When the view was opened
    pub opened_at: Option<DateTime<Utc>>,

    /// Consecutive incorrect submissions since the last code was sent
    pub failed_attempts: u32,

    /// Resends performed in this session
    pub resends: u32,
}

impl VerificationSession {
    pub fn new(destination: impl Into<String>, code_length: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            destination: destination.into(),
            input: CodeInputArray::new(code_length),
            status: SessionStatus::Idle,
            error_message: None,
            notice: None,
            opened_at: None,
            failed_attempts: 0,
            resends: 0,
        }
    }

    /// Idle -> Editing on view open
    pub fn open(&mut self) {
        self.id = Uuid::new_v4();
        self.input.clear();
        self.status = SessionStatus::Editing;
        self.error_message = None;
        self.notice = None;
        self.opened_at = Some(Utc::now());
        self.failed_attempts = 0;
        self.resends = 0;
    }

    /// Back to Idle on view teardown
    pub fn close(&mut self) {
        self.input.clear();
        self.status = SessionStatus::Idle;
        self.error_message = None;
        self.notice = None;
        self.opened_at = None;
    }

    /// Fresh code requested: empty slots, no error, editable again
    pub fn restart_for_resend(&mut self) {
        self.input.clear();
        self.status = SessionStatus::Editing;
        self.error_message = None;
        self.notice = None;
        self.failed_attempts = 0;
        self.resends += 1;
    }

    /// Submitting -> Verified
    pub fn mark_verified(&mut self) {
        self.status = SessionStatus::Verified;
        self.input.set_read_only(true);
        self.error_message = None;
    }

    pub fn set_error(&mut self, error: &OtpError) {
        self.error_message = Some(error.to_string());
    }

    pub fn is_verified(&self) -> bool {
        self.status == SessionStatus::Verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = VerificationSession::new("+919876543210", 4);
        assert_eq!(session.status, SessionStatus::Idle);
        assert_eq!(session.input.len(), 4);
        assert!(session.error_message.is_none());
    }

    #[test]
    fn test_open_renews_identity_and_clears_state() {
        let mut session = VerificationSession::new("+919876543210", 4);
        let first_id = session.id;
        session.input.set_slot(0, "1");
        session.set_error(&OtpError::IncompleteCode);

        session.open();
        assert_ne!(session.id, first_id);
        assert_eq!(session.status, SessionStatus::Editing);
        assert!(session.input.is_blank());
        assert!(session.error_message.is_none());
        assert!(session.opened_at.is_some());
    }

    #[test]
    fn test_mark_verified_freezes_input() {
        let mut session = VerificationSession::new("+919876543210", 4);
        session.open();
        session.set_error(&OtpError::InvalidCode);
        session.mark_verified();

        assert!(session.is_verified());
        assert!(session.input.is_read_only());
        assert!(session.error_message.is_none());
    }

    #[test]
    fn test_restart_for_resend_counts_resends() {
        let mut session = VerificationSession::new("+919876543210", 4);
        session.open();
        session.failed_attempts = 2;
        session.status = SessionStatus::Failed;

        session.restart_for_resend();
        assert_eq!(session.status, SessionStatus::Editing);
        assert_eq!(session.failed_attempts, 0);
        assert_eq!(session.resends, 1);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&SessionStatus::Submitting).unwrap();
        assert_eq!(json, "\"submitting\"");
    }
}
