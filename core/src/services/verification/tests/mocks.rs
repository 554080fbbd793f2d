//! Mock verification backend for controller tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::{DeliveryError, VerificationError};
use crate::services::verification::traits::VerificationService;

pub const ACCEPTED_CODE: &str = "1234";

/// Verification backend recording every call
pub struct MockVerificationService {
    pub verify_calls: Arc<Mutex<Vec<(String, String)>>>,
    pub request_calls: Arc<Mutex<Vec<String>>>,
    /// Simulated backend latency
    pub latency: Duration,
    pub unavailable: bool,
    pub delivery_fails: bool,
}

impl MockVerificationService {
    pub fn new() -> Self {
        Self {
            verify_calls: Arc::new(Mutex::new(Vec::new())),
            request_calls: Arc::new(Mutex::new(Vec::new())),
            latency: Duration::ZERO,
            unavailable: false,
            delivery_fails: false,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn failing_delivery(mut self) -> Self {
        self.delivery_fails = true;
        self
    }

    pub fn verify_count(&self) -> usize {
        self.verify_calls.lock().unwrap().len()
    }

    pub fn request_count(&self) -> usize {
        self.request_calls.lock().unwrap().len()
    }

    pub fn verified_codes(&self) -> Vec<String> {
        self.verify_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, code)| code.clone())
            .collect()
    }
}

#[async_trait]
impl VerificationService for MockVerificationService {
    async fn request_code(&self, destination: &str) -> Result<(), DeliveryError> {
        self.request_calls.lock().unwrap().push(destination.to_string());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.delivery_fails {
            return Err(DeliveryError::Failed {
                reason: "SMS gateway error".to_string(),
            });
        }
        Ok(())
    }

    async fn verify(&self, destination: &str, code: &str) -> Result<(), VerificationError> {
        self.verify_calls
            .lock()
            .unwrap()
            .push((destination.to_string(), code.to_string()));
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.unavailable {
            return Err(VerificationError::Unavailable {
                message: "backend timeout".to_string(),
            });
        }
        if code == ACCEPTED_CODE {
            Ok(())
        } else {
            Err(VerificationError::IncorrectCode)
        }
    }
}
