//! Mock code sender
//!
//! Prints messages to the console instead of sending them; in development
//! the terminal stands in for the user's phone.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use ob_shared::destination::{mask_destination, Destination};

use super::code_sender::CodeSender;
use crate::InfrastructureError;

/// Mock sender for development and testing
///
/// This implementation:
/// - Validates destinations
/// - Prints messages to the console
/// - Keeps the last message per destination for tests
#[derive(Clone)]
pub struct MockCodeSender {
    message_count: Arc<AtomicU64>,
    last_messages: Arc<Mutex<HashMap<String, String>>>,
    simulate_failure: bool,
    console_output: bool,
}

impl MockCodeSender {
    /// Console-printing sender
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            last_messages: Arc::new(Mutex::new(HashMap::new())),
            simulate_failure,
            console_output,
        }
    }

    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Last message sent to `destination`
    pub fn last_message(&self, destination: &str) -> Option<String> {
        self.last_messages
            .lock()
            .ok()
            .and_then(|messages| messages.get(destination).cloned())
    }

    /// Digits at the end of the last message, i.e. the delivered code
    pub fn last_code(&self, destination: &str) -> Option<String> {
        let message = self.last_message(destination)?;
        let code: String = message
            .chars()
            .rev()
            .take_while(char::is_ascii_digit)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        (!code.is_empty()).then_some(code)
    }

    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }
}

impl Default for MockCodeSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeSender for MockCodeSender {
    async fn send(&self, destination: &str, message: &str) -> Result<String, InfrastructureError> {
        let masked = mask_destination(destination);
        if Destination::parse(destination).is_err() {
            return Err(InfrastructureError::InvalidDestination(masked));
        }

        if self.simulate_failure {
            warn!(
                provider = "mock",
                destination = %masked,
                "Mock sender simulating failure"
            );
            return Err(InfrastructureError::Delivery(
                "Simulated delivery failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut messages) = self.last_messages.lock() {
            messages.insert(destination.to_string(), message.to_string());
        }

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK CODE DELIVERY - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", masked);
            println!("Content: {}", message);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "code_delivery",
            provider = "mock",
            destination = %masked,
            message_id = %message_id,
            "Message sent (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
