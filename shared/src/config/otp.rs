//! One-time-passcode session configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ConfigError;

/// Default number of code slots
pub const DEFAULT_CODE_LENGTH: usize = 4;

/// Default resend cooldown (1:30)
pub const DEFAULT_RESEND_COOLDOWN_SECONDS: u64 = 90;

/// Default countdown cadence
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// OTP view configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Number of single-digit slots in the code
    pub code_length: usize,

    /// Seconds before resend becomes available
    pub resend_cooldown_seconds: u64,

    /// Countdown tick cadence in milliseconds
    pub tick_interval_ms: u64,

    /// Ask the backend for a code as soon as the view opens
    pub request_code_on_open: bool,

    /// Consecutive incorrect submissions before the session is locked until resend
    pub max_failed_attempts: Option<u32>,

    /// Maximum resends per session
    pub max_resends: Option<u32>,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            resend_cooldown_seconds: DEFAULT_RESEND_COOLDOWN_SECONDS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            request_code_on_open: false,
            max_failed_attempts: None,
            max_resends: None,
        }
    }
}

impl OtpConfig {
    /// Set the code length
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    /// Set the resend cooldown in seconds
    pub fn with_resend_cooldown(mut self, seconds: u64) -> Self {
        self.resend_cooldown_seconds = seconds;
        self
    }

    /// Request a code from the backend when the view opens
    pub fn with_request_code_on_open(mut self, enabled: bool) -> Self {
        self.request_code_on_open = enabled;
        self
    }

    /// Lock the session after `attempts` consecutive incorrect codes
    pub fn with_max_failed_attempts(mut self, attempts: u32) -> Self {
        self.max_failed_attempts = Some(attempts);
        self
    }

    /// Cap the number of resends
    pub fn with_max_resends(mut self, resends: u32) -> Self {
        self.max_resends = Some(resends);
        self
    }

    /// Countdown cadence as a `Duration`
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.code_length == 0 {
            return Err(ConfigError::invalid("otp.code_length", "must be at least 1"));
        }
        if self.resend_cooldown_seconds == 0 {
            return Err(ConfigError::invalid(
                "otp.resend_cooldown_seconds",
                "must be at least 1",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::invalid("otp.tick_interval_ms", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.code_length, 4);
        assert_eq!(config.resend_cooldown_seconds, 90);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert!(!config.request_code_on_open);
        assert!(config.max_failed_attempts.is_none());
        assert!(config.max_resends.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        assert!(OtpConfig::default().with_code_length(0).validate().is_err());
        assert!(OtpConfig::default().with_resend_cooldown(0).validate().is_err());

        let mut config = OtpConfig::default();
        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let config: OtpConfig =
            serde_json::from_str(r#"{"code_length": 6, "max_resends": 3}"#).unwrap();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.max_resends, Some(3));
        assert_eq!(config.resend_cooldown_seconds, DEFAULT_RESEND_COOLDOWN_SECONDS);
    }
}
