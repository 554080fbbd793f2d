//! In-memory backend generating one code per destination

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{info, warn};

use ob_core::errors::{DeliveryError, VerificationError};
use ob_core::services::verification::VerificationService;
use ob_shared::destination::mask_destination;

use crate::delivery::CodeSender;

/// Default lifetime of an issued code (5 minutes)
pub const DEFAULT_CODE_TTL_SECONDS: i64 = 300;

#[derive(Debug, Clone)]
struct IssuedCode {
    code: String,
    expires_at: DateTime<Utc>,
}

impl IssuedCode {
    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Generate a `length`-digit code from the OS CSPRNG
pub fn generate_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Backend that issues codes itself and delivers them through a `CodeSender`
///
/// Only the latest code per destination is valid, and a code is consumed by
/// its first successful verification. Expired and unknown codes are
/// reported as incorrect.
pub struct InMemoryVerificationService<S: CodeSender> {
    sender: S,
    code_length: usize,
    ttl: Duration,
    codes: RwLock<HashMap<String, IssuedCode>>,
}

impl<S: CodeSender> InMemoryVerificationService<S> {
    pub fn new(sender: S, code_length: usize) -> Self {
        Self {
            sender,
            code_length,
            ttl: Duration::seconds(DEFAULT_CODE_TTL_SECONDS),
            codes: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_ttl(mut self, ttl_seconds: i64) -> Self {
        self.ttl = Duration::seconds(ttl_seconds);
        self
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Whether an unexpired code is outstanding for `destination`
    pub async fn has_pending_code(&self, destination: &str) -> bool {
        self.codes
            .read()
            .await
            .get(destination)
            .map_or(false, |issued| !issued.is_expired())
    }
}

#[async_trait]
impl<S: CodeSender> VerificationService for InMemoryVerificationService<S> {
    async fn request_code(&self, destination: &str) -> Result<(), DeliveryError> {
        let code = generate_code(self.code_length);
        let message_id = self.sender.send_code(destination, &code).await?;

        let issued = IssuedCode {
            code,
            expires_at: Utc::now() + self.ttl,
        };
        self.codes.write().await.insert(destination.to_string(), issued);

        info!(
            provider = self.sender.provider_name(),
            destination = %mask_destination(destination),
            message_id = %message_id,
            event = "code_issued",
            "Verification code issued"
        );
        Ok(())
    }

    async fn verify(&self, destination: &str, code: &str) -> Result<(), VerificationError> {
        let mut codes = self.codes.write().await;
        let Some(issued) = codes.get(destination) else {
            return Err(VerificationError::IncorrectCode);
        };

        if issued.is_expired() {
            codes.remove(destination);
            warn!(
                destination = %mask_destination(destination),
                event = "code_expired",
                "Verification attempted with an expired code"
            );
            return Err(VerificationError::IncorrectCode);
        }

        if code.len() == issued.code.len()
            && constant_time_eq(code.as_bytes(), issued.code.as_bytes())
        {
            codes.remove(destination);
            return Ok(());
        }
        Err(VerificationError::IncorrectCode)
    }

    fn provider_name(&self) -> &str {
        "in_memory"
    }
}
