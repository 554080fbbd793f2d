//! Code delivery
//!
//! Senders hand a verification code to the user over some channel. Only a
//! console mock ships here; a real SMS or email gateway implements the same
//! trait.

pub mod code_sender;
pub mod mock_sender;

pub use code_sender::{verification_message, CodeSender};
pub use mock_sender::MockCodeSender;
