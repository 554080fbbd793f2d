//! Outcomes and views returned by the verification controller

use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{SessionStatus, SlotEdit};
use crate::errors::{DeliveryError, OtpError};

/// Keyboard events the code entry reacts to besides digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    /// Activation key; same as pressing the verify control
    Enter,
}

/// Why a submit did not start a verification call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitIgnored {
    NotOpen,
    AlreadySubmitting,
    AlreadyVerified,
    /// Attempt limit reached; waiting for a resend
    Locked,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Code accepted
    Verified,
    /// Backend rejected the code or failed; the session is editable again
    /// unless the error is `AttemptsExhausted`
    Rejected(OtpError),
    /// Not every slot filled; no backend call made
    Incomplete,
    /// Submit refused in the current state
    Ignored(SubmitIgnored),
    /// View dismissed while the call was in flight
    Cancelled,
}

/// Why a resend was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendRejection {
    NotOpen,
    CooldownActive { remaining_seconds: u64 },
    Submitting,
    Verified,
    LimitReached { max_resends: u32 },
}

/// Result of a resend request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResendOutcome {
    /// Session reset and the backend acknowledged delivery
    Sent,
    /// Session reset but delivery failed; non-fatal
    DeliveryFailed(DeliveryError),
    Rejected(ResendRejection),
    /// View dismissed while delivery was in flight
    Cancelled,
}

/// Result of a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Edited(SlotEdit),
    Submitted(SubmitOutcome),
    Ignored,
}

/// What the resend control should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResendState {
    /// Verified or view closed
    Disabled,
    Cooldown { remaining_seconds: u64 },
    Available,
    /// Resend limit used up
    Exhausted,
}

/// Read-only copy of the session for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub slots: Vec<Option<char>>,
    pub focus: usize,
    pub value: String,
    pub complete: bool,
    pub read_only: bool,
    pub error_message: Option<String>,
    pub notice: Option<String>,
    pub remaining_seconds: u64,
    pub timer_running: bool,
    pub countdown: String,
    pub resend: ResendState,
    pub failed_attempts: u32,
    pub resends: u32,
}
