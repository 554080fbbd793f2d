//! Domain entities representing the OTP view state.

pub mod code_input;
pub mod countdown;
pub mod session;

// Re-export commonly used types
pub use code_input::{CodeInputArray, SlotEdit, EMPTY_MARKER};
pub use countdown::{CountdownTimer, TickOutcome};
pub use session::{SessionStatus, VerificationSession};
