//! `onboard`: terminal driver for the phone verification step

mod command;
mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use ob_core::services::verification::{
    Key, ResendOutcome, ResendRejection, ResendState, SessionSnapshot, SubmitIgnored,
    SubmitOutcome, VerificationController, VerificationService,
};
use ob_core::SessionStatus;
use ob_infra::create_verification_service;
use ob_shared::destination::{Destination, DEFAULT_COUNTRY_CODE};
use ob_shared::AppConfig;

use command::{parse_command, Command, HELP};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    logging::init(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        code_length = config.otp.code_length,
        "Starting Ask IT on-boarding"
    );

    let service: Arc<dyn VerificationService> =
        create_verification_service(&config.backend, config.otp.code_length);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let Some(destination) = read_phone_number(&mut input).await? else {
        return Ok(());
    };

    // The phone step sends the first code unless the OTP view asks for it itself
    if !config.otp.request_code_on_open {
        if let Err(error) = service.request_code(destination.as_str()).await {
            println!("{}", error);
        }
    }

    let controller = VerificationController::new(destination.as_str(), service, config.otp)?;
    controller.open().await;
    println!("Enter the code sent to {} ({})", destination.masked(), HELP);
    render(&controller.snapshot().await);

    let verified = run_session(&controller, &mut input).await?;
    if verified {
        println!("Phone number verified.");
    } else {
        controller.dismiss().await;
    }
    Ok(())
}

/// Prompt until a valid 10-digit number is entered; `None` on end of input
async fn read_phone_number(input: &mut Input) -> Result<Option<Destination>> {
    loop {
        println!("Phone number ({}):", DEFAULT_COUNTRY_CODE);
        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };
        match Destination::from_phone_entry(DEFAULT_COUNTRY_CODE, line.trim()) {
            Ok(destination) => return Ok(Some(destination)),
            Err(error) => println!("{}", error.message),
        }
    }
}

/// Returns whether the session ended verified
async fn run_session(controller: &VerificationController, input: &mut Input) -> Result<bool> {
    loop {
        let line = tokio::select! {
            line = input.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            return Ok(false);
        };

        match parse_command(&line) {
            Command::Digits(digits) => fill_digits(controller, &digits).await,
            Command::Backspace => {
                let focus = controller.snapshot().await.focus;
                controller.press_key(focus, Key::Backspace).await;
            }
            Command::Submit => {
                println!("Verifying...");
                match controller.submit().await {
                    SubmitOutcome::Verified => return Ok(true),
                    SubmitOutcome::Ignored(SubmitIgnored::Locked) => {
                        println!("Too many attempts. Wait for the countdown and type 'resend'.")
                    }
                    SubmitOutcome::Ignored(reason) => println!("Ignored: {:?}", reason),
                    SubmitOutcome::Rejected(_) | SubmitOutcome::Incomplete => {}
                    SubmitOutcome::Cancelled => return Ok(false),
                }
            }
            Command::Resend => match controller.resend().await {
                ResendOutcome::Rejected(ResendRejection::CooldownActive { remaining_seconds }) => {
                    println!("Resend available in {}s", remaining_seconds)
                }
                ResendOutcome::Rejected(rejection) => println!("Resend refused: {:?}", rejection),
                ResendOutcome::Sent | ResendOutcome::DeliveryFailed(_) => {}
                ResendOutcome::Cancelled => return Ok(false),
            },
            Command::Status => {}
            Command::Json => {
                let snapshot = controller.snapshot().await;
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                continue;
            }
            Command::Quit => return Ok(false),
            Command::Unknown(text) => {
                println!("Unknown command '{}': {}", text, HELP);
                continue;
            }
        }

        render(&controller.snapshot().await);
    }
}

/// Type digits into consecutive slots starting at the focused one
async fn fill_digits(controller: &VerificationController, digits: &str) {
    let snapshot = controller.snapshot().await;
    let last = snapshot.slots.len().saturating_sub(1);
    let mut focus = snapshot.focus;

    for digit in digits.chars() {
        let Some(edit) = controller.input(focus, &digit.to_string()).await else {
            break;
        };
        if edit.index == last {
            break;
        }
        focus = edit.focus;
    }
}

fn render(snapshot: &SessionSnapshot) {
    let slots: String = snapshot
        .slots
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let digit = slot.unwrap_or('_');
            if index == snapshot.focus && snapshot.status != SessionStatus::Verified {
                format!("[{}]", digit)
            } else {
                format!(" {} ", digit)
            }
        })
        .collect();

    let resend = match snapshot.resend {
        ResendState::Cooldown { .. } => format!("resend in {}", snapshot.countdown),
        ResendState::Available => "resend available".to_string(),
        ResendState::Exhausted => "no resends left".to_string(),
        ResendState::Disabled => String::new(),
    };

    println!("{}   {}   {}", slots, snapshot.status, resend);
    if let Some(error) = &snapshot.error_message {
        println!("  error: {}", error);
    }
    if let Some(notice) = &snapshot.notice {
        println!("  {}", notice);
    }
}
