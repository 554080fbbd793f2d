//! Shared utilities and common types for the Ask IT on-boarding services
//!
//! This crate provides common functionality used across all workspace members:
//! - Configuration types (OTP session, verification backend, logging)
//! - Destination utilities (phone entry, email check, masking for logs)
//! - Field-level validation helpers

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, BackendConfig, BackendProvider, ConfigError, Environment, LogFormat,
    LoggingConfig, OtpConfig,
};
pub use utils::{destination, validation};
