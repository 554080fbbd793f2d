//! Integration tests: controller driven against the concrete backends

use std::sync::Arc;
use std::time::Duration;

use ob_core::errors::OtpError;
use ob_core::services::verification::{
    ResendOutcome, SubmitOutcome, VerificationController,
};
use ob_core::SessionStatus;
use ob_infra::{InMemoryVerificationService, MockCodeSender, StaticCodeService};
use ob_shared::OtpConfig;

const PHONE: &str = "+919876543210";

async fn type_code(controller: &VerificationController, code: &str) {
    for (index, digit) in code.chars().enumerate() {
        controller.input(index, &digit.to_string()).await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_static_backend_round_trip() {
    let backend = Arc::new(StaticCodeService::new("1234", Duration::from_millis(1_200)));
    let controller =
        VerificationController::new(PHONE, backend.clone(), OtpConfig::default()).unwrap();
    controller.open().await;

    type_code(&controller, "1235").await;
    assert_eq!(
        controller.submit().await,
        SubmitOutcome::Rejected(OtpError::InvalidCode)
    );

    controller.input(3, "4").await;
    assert_eq!(controller.submit().await, SubmitOutcome::Verified);

    // Two round trips of 1.2s elapsed on the countdown
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.remaining_seconds, 88);
    assert!(!snapshot.timer_running);

    sleep_past_cooldown().await;
    assert_eq!(controller.snapshot().await.remaining_seconds, 88);
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_in_memory_backend_with_resend() {
    let backend = Arc::new(InMemoryVerificationService::new(
        MockCodeSender::with_options(false, false),
        6,
    ));
    let config = OtpConfig::default()
        .with_code_length(6)
        .with_request_code_on_open(true);
    let controller = VerificationController::new(PHONE, backend.clone(), config).unwrap();

    controller.open().await;
    let first = backend.sender().last_code(PHONE).unwrap();

    sleep_past_cooldown().await;
    assert_eq!(controller.resend().await, ResendOutcome::Sent);
    let second = backend.sender().last_code(PHONE).unwrap();

    if first != second {
        type_code(&controller, &first).await;
        assert_eq!(
            controller.submit().await,
            SubmitOutcome::Rejected(OtpError::InvalidCode)
        );
    }

    type_code(&controller, &second).await;
    assert_eq!(controller.submit().await, SubmitOutcome::Verified);
    assert_eq!(controller.status().await, SessionStatus::Verified);
    assert_eq!(backend.sender().message_count(), 2);
}

async fn sleep_past_cooldown() {
    tokio::time::sleep(Duration::from_millis(90_500)).await;
}
