//! Verification backend configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ConfigError;

/// Which verification backend to wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendProvider {
    /// Accepts one fixed code after an artificial delay
    Static,
    /// Generates a code per destination and delivers it through a sender
    InMemory,
}

impl Default for BackendProvider {
    fn default() -> Self {
        BackendProvider::Static
    }
}

/// Verification backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend selection
    pub provider: BackendProvider,

    /// The only code the static backend accepts
    pub static_code: String,

    /// Artificial round-trip delay in milliseconds
    pub latency_ms: u64,

    /// Lifetime of a generated code in seconds
    pub code_ttl_seconds: i64,

    /// Make every code delivery fail
    pub simulate_delivery_failure: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: BackendProvider::default(),
            static_code: String::from("1234"),
            latency_ms: 1000,
            code_ttl_seconds: 300,
            simulate_delivery_failure: false,
        }
    }
}

impl BackendConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Check the backend settings against the session's code length
    pub fn validate(&self, code_length: usize) -> Result<(), ConfigError> {
        if self.provider == BackendProvider::Static
            && (self.static_code.len() != code_length
                || !self.static_code.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(ConfigError::invalid(
                "backend.static_code",
                format!("must be exactly {} digits", code_length),
            ));
        }
        if self.code_ttl_seconds <= 0 {
            return Err(ConfigError::invalid("backend.code_ttl_seconds", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backend_is_static_reference() {
        let config = BackendConfig::default();
        assert_eq!(config.provider, BackendProvider::Static);
        assert_eq!(config.static_code, "1234");
        assert_eq!(config.latency(), Duration::from_secs(1));
        assert!(config.validate(4).is_ok());
    }

    #[test]
    fn test_static_code_must_be_digits() {
        let config = BackendConfig {
            static_code: "12a4".to_string(),
            ..Default::default()
        };
        assert!(config.validate(4).is_err());
    }

    #[test]
    fn test_in_memory_ignores_static_code() {
        let config = BackendConfig {
            provider: BackendProvider::InMemory,
            static_code: String::new(),
            ..Default::default()
        };
        assert!(config.validate(6).is_ok());
    }

    #[test]
    fn test_provider_deserializes_snake_case() {
        let provider: BackendProvider = serde_json::from_str("\"in_memory\"").unwrap();
        assert_eq!(provider, BackendProvider::InMemory);
    }
}
