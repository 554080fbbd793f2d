//! Verification Backend Module
//!
//! `VerificationService` implementations and the factory that picks one from
//! configuration.
//!
//! ## Backends
//!
//! - **Static**: accepts one configured code after an artificial delay
//! - **In-memory**: generates a code per destination, delivers it through a
//!   `CodeSender` and verifies it once

use std::sync::Arc;

use ob_core::services::verification::VerificationService;
use ob_shared::{BackendConfig, BackendProvider};

pub mod in_memory;
pub mod static_code;

pub use in_memory::{generate_code, InMemoryVerificationService, DEFAULT_CODE_TTL_SECONDS};
pub use static_code::StaticCodeService;

use crate::delivery::MockCodeSender;

#[cfg(test)]
mod tests;

/// Create a verification backend based on configuration
///
/// # Arguments
///
/// * `config` - Backend configuration
/// * `code_length` - Digits per code for generating backends
pub fn create_verification_service(
    config: &BackendConfig,
    code_length: usize,
) -> Arc<dyn VerificationService> {
    match config.provider {
        BackendProvider::Static => {
            tracing::info!(
                latency_ms = config.latency_ms,
                "Using static verification backend"
            );
            Arc::new(StaticCodeService::from_config(config))
        }
        BackendProvider::InMemory => {
            tracing::info!(
                code_length = code_length,
                ttl_seconds = config.code_ttl_seconds,
                "Using in-memory verification backend with mock delivery"
            );
            let sender = MockCodeSender::with_options(true, config.simulate_delivery_failure);
            Arc::new(
                InMemoryVerificationService::new(sender, code_length)
                    .with_ttl(config.code_ttl_seconds),
            )
        }
    }
}
