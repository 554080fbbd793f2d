//! OTP verification workflow
//!
//! This module drives the one-time-passcode step of on-boarding:
//! - Segmented code entry with focus navigation
//! - Submission against an external verification backend
//! - Resend cooldown countdown and code resend
//! - Cancellation of the countdown and in-flight calls on view teardown

mod controller;
mod ticker;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use controller::{VerificationController, CODE_RESENT_NOTICE, CODE_SENT_NOTICE};
pub use ticker::{CountdownTicker, TickControl};
pub use traits::VerificationService;
pub use types::{
    Key, KeyOutcome, ResendOutcome, ResendRejection, ResendState, SessionSnapshot,
    SubmitIgnored, SubmitOutcome,
};
