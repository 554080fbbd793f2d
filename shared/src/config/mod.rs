//! Configuration module with per-concern sub-modules
//!
//! - `otp` - one-time-passcode session behaviour (code length, resend cooldown, extension points)
//! - `backend` - which verification backend the binary wires up
//! - `environment` - environment detection and logging configuration

pub mod backend;
pub mod environment;
pub mod otp;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use backend::{BackendConfig, BackendProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;

/// Prefix for environment overrides, e.g. `OB__OTP__CODE_LENGTH=6`
pub const ENV_PREFIX: &str = "OB";

/// `OB__SECTION__KEY` environment source
fn env_overrides() -> ::config::Environment {
    ::config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

/// Errors raised while loading or checking configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Detected runtime environment
    pub environment: Environment,

    /// OTP session configuration
    pub otp: OtpConfig,

    /// Verification backend configuration
    pub backend: BackendConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Shape of the layered sources before environment-dependent defaults are applied
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAppConfig {
    otp: OtpConfig,
    backend: BackendConfig,
    logging: Option<LoggingConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Defaults for a given environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            otp: OtpConfig::default(),
            backend: BackendConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from `.env`, optional TOML files and `OB__` variables
    ///
    /// Sources, later ones winning:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml`
    /// 3. `OB__SECTION__KEY` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_sources(Environment::from_env(), env_overrides())
    }

    /// Layer the TOML files for `environment` under `overrides`, then validate
    ///
    /// Override values stay strings until deserialisation so that codes such
    /// as `0123` keep their leading zeros; numeric fields are parsed from the
    /// string by the target type.
    fn from_sources(
        environment: Environment,
        overrides: ::config::Environment,
    ) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(
                ::config::File::with_name(environment.config_file()).required(false),
            )
            .add_source(overrides)
            .build()?;

        let raw: RawAppConfig = settings.try_deserialize()?;
        let config = Self {
            environment,
            otp: raw.otp,
            backend: raw.backend,
            logging: raw
                .logging
                .unwrap_or_else(|| LoggingConfig::for_environment(environment)),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.otp.validate()?;
        self.backend.validate(self.otp.code_length)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_app_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.otp.code_length, 4);
        assert_eq!(config.otp.resend_cooldown_seconds, 90);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_for_environment_uses_matching_logging() {
        let config = AppConfig::for_environment(Environment::Production);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_static_code_must_match_code_length() {
        let mut config = AppConfig::default();
        config.otp.code_length = 6;
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { ref field, .. }) if field == "backend.static_code"));
    }

    fn overrides(pairs: &[(&str, &str)]) -> ::config::Environment {
        let source = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<::config::Map<String, String>>();
        env_overrides().source(Some(source))
    }

    #[test]
    fn test_env_overrides_keep_leading_zeros() {
        let config = AppConfig::from_sources(
            Environment::Development,
            overrides(&[
                ("OB__BACKEND__STATIC_CODE", "0123"),
                ("OB__OTP__RESEND_COOLDOWN_SECONDS", "30"),
                ("OB__OTP__REQUEST_CODE_ON_OPEN", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.backend.static_code, "0123");
        assert_eq!(config.otp.resend_cooldown_seconds, 30);
        assert!(config.otp.request_code_on_open);
    }

    #[test]
    fn test_env_overrides_are_validated() {
        let result = AppConfig::from_sources(
            Environment::Development,
            overrides(&[("OB__OTP__CODE_LENGTH", "6")]),
        );
        assert!(matches!(result, Err(ConfigError::Invalid { ref field, .. }) if field == "backend.static_code"));
    }
}
