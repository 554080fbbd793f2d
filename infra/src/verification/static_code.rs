//! Static reference backend: accepts one configured code after a fixed delay

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use ob_core::errors::{DeliveryError, VerificationError};
use ob_core::services::verification::VerificationService;
use ob_shared::destination::{mask_destination, Destination};
use ob_shared::BackendConfig;

pub struct StaticCodeService {
    code: String,
    latency: Duration,
    simulate_delivery_failure: bool,
    request_count: AtomicU64,
}

impl StaticCodeService {
    pub fn new(code: impl Into<String>, latency: Duration) -> Self {
        Self {
            code: code.into(),
            latency,
            simulate_delivery_failure: false,
            request_count: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(config.static_code.clone(), config.latency())
            .with_delivery_failure(config.simulate_delivery_failure)
    }

    pub fn with_delivery_failure(mut self, simulate: bool) -> Self {
        self.simulate_delivery_failure = simulate;
        self
    }

    /// Number of `request_code` calls received
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl VerificationService for StaticCodeService {
    async fn request_code(&self, destination: &str) -> Result<(), DeliveryError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if Destination::parse(destination).is_err() {
            return Err(DeliveryError::InvalidDestination {
                destination: mask_destination(destination),
            });
        }
        if self.simulate_delivery_failure {
            warn!(
                provider = "static",
                destination = %mask_destination(destination),
                "Simulating code delivery failure"
            );
            return Err(DeliveryError::Failed {
                reason: "Simulated delivery failure".to_string(),
            });
        }

        debug!(
            provider = "static",
            destination = %mask_destination(destination),
            "Static code considered delivered"
        );
        Ok(())
    }

    async fn verify(&self, _destination: &str, code: &str) -> Result<(), VerificationError> {
        self.simulate_latency().await;

        if code.len() == self.code.len() && constant_time_eq(code.as_bytes(), self.code.as_bytes()) {
            Ok(())
        } else {
            Err(VerificationError::IncorrectCode)
        }
    }

    fn provider_name(&self) -> &str {
        "static"
    }
}
