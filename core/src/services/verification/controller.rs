//! OTP view controller
//!
//! Owns the verification session and the resend countdown, and drives the
//! external `VerificationService`. Two sources resume the controller: the
//! countdown ticker and the backend calls. Both go through one mutex that is
//! never held across an await, and the tick path only touches the timer.

use std::sync::Arc;

use ob_shared::destination::mask_destination;
use ob_shared::OtpConfig;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::entities::{
    CountdownTimer, SessionStatus, SlotEdit, TickOutcome, VerificationSession,
};
use crate::errors::{DeliveryError, DomainError, DomainResult, OtpError, VerificationError};

use super::ticker::{CountdownTicker, TickControl};
use super::traits::VerificationService;
use super::types::{
    Key, KeyOutcome, ResendOutcome, ResendRejection, ResendState, SessionSnapshot,
    SubmitIgnored, SubmitOutcome,
};

/// Notice after the first code is requested on open
pub const CODE_SENT_NOTICE: &str = "code sent";

/// Notice after a successful resend
pub const CODE_RESENT_NOTICE: &str = "code resent";

/// Resources that live exactly as long as the open view
struct ViewScope {
    /// Cancels the ticker and any in-flight backend call
    token: CancellationToken,
    ticker: Option<CountdownTicker>,
}

impl ViewScope {
    fn release_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.release();
        }
    }
}

struct ControllerState {
    session: VerificationSession,
    timer: CountdownTimer,
    view: Option<ViewScope>,
}

impl ControllerState {
    /// One countdown tick. Never changes the session status.
    ///
    /// `scope` is the token of the ticker that fired; once it is cancelled the
    /// timer may already belong to a newer ticker and must not be touched.
    fn on_tick(&mut self, scope: &CancellationToken) -> TickControl {
        if scope.is_cancelled() || self.session.is_verified() {
            return TickControl::Stop;
        }
        match self.timer.tick() {
            TickOutcome::Ticked { .. } => TickControl::Continue,
            TickOutcome::Expired => {
                info!(
                    session_id = %self.session.id,
                    event = "otp_resend_available",
                    "Resend cooldown elapsed"
                );
                TickControl::Stop
            }
            TickOutcome::Idle => TickControl::Stop,
        }
    }

    /// Token of the open view, if any
    fn view_token(&self) -> Option<CancellationToken> {
        self.view.as_ref().map(|view| view.token.clone())
    }

    fn resend_state(&self, max_resends: Option<u32>) -> ResendState {
        if self.view.is_none() || self.session.is_verified() {
            return ResendState::Disabled;
        }
        if !self.timer.is_expired() {
            return ResendState::Cooldown {
                remaining_seconds: self.timer.remaining_seconds(),
            };
        }
        match max_resends {
            Some(max) if self.session.resends >= max => ResendState::Exhausted,
            _ => ResendState::Available,
        }
    }
}

/// Orchestrates code entry, the resend countdown and the verification backend
pub struct VerificationController {
    state: Arc<Mutex<ControllerState>>,
    service: Arc<dyn VerificationService>,
    config: OtpConfig,
    destination: String,
    masked_destination: String,
    /// Parent of every view token; cancelled on drop
    root: CancellationToken,
}

impl VerificationController {
    /// Create a controller for `destination`, supplied by the phone entry step
    ///
    /// # Returns
    ///
    /// * `Err(DomainError)` - If the configuration is invalid or the destination is blank
    pub fn new(
        destination: impl Into<String>,
        service: Arc<dyn VerificationService>,
        config: OtpConfig,
    ) -> DomainResult<Self> {
        config.validate()?;
        let destination = destination.into();
        if destination.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "destination must not be empty".to_string(),
            });
        }

        let state = ControllerState {
            session: VerificationSession::new(destination.clone(), config.code_length),
            timer: CountdownTimer::new(),
            view: None,
        };

        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            service,
            masked_destination: mask_destination(&destination),
            destination,
            config,
            root: CancellationToken::new(),
        })
    }

    /// Open the OTP view: Idle -> Editing, countdown starts immediately.
    ///
    /// Returns `false` if the view is already open.
    pub async fn open(&self) -> bool {
        let token = {
            let mut state = self.state.lock().await;
            if state.view.is_some() {
                return false;
            }

            let token = self.root.child_token();
            state.session.open();
            state.timer.start(self.config.resend_cooldown_seconds);
            let ticker = self.spawn_ticker(&token);
            state.view = Some(ViewScope {
                token: token.clone(),
                ticker: Some(ticker),
            });

            info!(
                destination = %self.masked_destination,
                session_id = %state.session.id,
                cooldown_seconds = self.config.resend_cooldown_seconds,
                event = "otp_view_opened",
                "OTP verification view opened"
            );
            token
        };

        if self.config.request_code_on_open {
            self.deliver(&token, CODE_SENT_NOTICE).await;
        }
        true
    }

    /// Apply the raw text typed into slot `index`
    pub async fn input(&self, index: usize, value: &str) -> Option<SlotEdit> {
        let mut state = self.state.lock().await;
        if state.view.is_none() || state.session.is_verified() {
            return None;
        }
        let edit = state.session.input.set_slot(index, value);
        if let Some(edit) = &edit {
            debug!(
                session_id = %state.session.id,
                index = edit.index,
                focus = edit.focus,
                complete = edit.complete,
                event = "otp_slot_edited",
                "Code slot edited"
            );
        }
        edit
    }

    /// Focus slot `index` without editing
    pub async fn focus(&self, index: usize) -> bool {
        let mut state = self.state.lock().await;
        state.view.is_some() && state.session.input.focus_slot(index)
    }

    /// Handle a key press while slot `index` is focused
    pub async fn press_key(&self, index: usize, key: Key) -> KeyOutcome {
        match key {
            Key::Enter => KeyOutcome::Submitted(self.submit().await),
            Key::Backspace => {
                let mut state = self.state.lock().await;
                if state.view.is_none() || state.session.is_verified() {
                    return KeyOutcome::Ignored;
                }
                match state.session.input.backspace(index) {
                    Some(edit) => KeyOutcome::Edited(edit),
                    None => KeyOutcome::Ignored,
                }
            }
        }
    }

    /// Submit the entered code: Editing -> Submitting -> Verified | Editing.
    ///
    /// Submitting is exclusive: a second submit while a call is in flight is
    /// ignored. An incomplete code never reaches the backend.
    pub async fn submit(&self) -> SubmitOutcome {
        let (token, code) = {
            let mut state = self.state.lock().await;
            let Some(token) = state.view_token() else {
                return SubmitOutcome::Ignored(SubmitIgnored::NotOpen);
            };

            let ignored = match state.session.status {
                SessionStatus::Editing => None,
                SessionStatus::Submitting => Some(SubmitIgnored::AlreadySubmitting),
                SessionStatus::Verified => Some(SubmitIgnored::AlreadyVerified),
                SessionStatus::Failed => Some(SubmitIgnored::Locked),
                SessionStatus::Idle => Some(SubmitIgnored::NotOpen),
            };
            if let Some(reason) = ignored {
                warn!(
                    session_id = %state.session.id,
                    status = %state.session.status,
                    reason = ?reason,
                    event = "otp_submit_ignored",
                    "Submit ignored in current state"
                );
                return SubmitOutcome::Ignored(reason);
            }

            if !state.session.input.is_complete() {
                state.session.set_error(&OtpError::IncompleteCode);
                info!(
                    session_id = %state.session.id,
                    event = "otp_submit_rejected_incomplete",
                    "Submit attempted with an incomplete code"
                );
                return SubmitOutcome::Incomplete;
            }

            state.session.status = SessionStatus::Submitting;
            info!(
                destination = %self.masked_destination,
                session_id = %state.session.id,
                event = "otp_submitting",
                "Submitting verification code"
            );
            (token, state.session.input.value())
        };

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = self.service.verify(&self.destination, &code) => Some(result),
        };

        let Some(result) = result else {
            info!(event = "otp_verification_cancelled", "Verification call cancelled by view teardown");
            return SubmitOutcome::Cancelled;
        };

        let mut state = self.state.lock().await;
        if token.is_cancelled() || state.session.status != SessionStatus::Submitting {
            return SubmitOutcome::Cancelled;
        }

        match result {
            Ok(()) => {
                state.session.mark_verified();
                state.timer.stop();
                if let Some(view) = state.view.as_mut() {
                    view.release_ticker();
                }
                info!(
                    destination = %self.masked_destination,
                    session_id = %state.session.id,
                    remaining_seconds = state.timer.remaining_seconds(),
                    event = "otp_verified",
                    "Verification code accepted"
                );
                SubmitOutcome::Verified
            }
            Err(error) => SubmitOutcome::Rejected(self.apply_rejection(&mut state, &error)),
        }
    }

    /// Request a new code once the cooldown has elapsed.
    ///
    /// Resets the countdown, clears the slots and the error, then asks the
    /// backend to deliver. Delivery failure is only a notice.
    pub async fn resend(&self) -> ResendOutcome {
        let token = {
            let mut state = self.state.lock().await;
            let Some(token) = state.view_token() else {
                return ResendOutcome::Rejected(ResendRejection::NotOpen);
            };

            let rejection = match state.session.status {
                SessionStatus::Verified => Some(ResendRejection::Verified),
                SessionStatus::Submitting => Some(ResendRejection::Submitting),
                _ if !state.timer.is_expired() => Some(ResendRejection::CooldownActive {
                    remaining_seconds: state.timer.remaining_seconds(),
                }),
                _ => match self.config.max_resends {
                    Some(max) if state.session.resends >= max => {
                        Some(ResendRejection::LimitReached { max_resends: max })
                    }
                    _ => None,
                },
            };
            if let Some(rejection) = rejection {
                debug!(
                    session_id = %state.session.id,
                    rejection = ?rejection,
                    event = "otp_resend_rejected",
                    "Resend rejected"
                );
                return ResendOutcome::Rejected(rejection);
            }

            state.session.restart_for_resend();
            state.timer.reset(self.config.resend_cooldown_seconds);
            let ticker = self.spawn_ticker(&token);
            if let Some(view) = state.view.as_mut() {
                view.ticker = Some(ticker);
            }

            info!(
                destination = %self.masked_destination,
                session_id = %state.session.id,
                resends = state.session.resends,
                event = "otp_resend_requested",
                "Requesting a new verification code"
            );
            token
        };

        match self.deliver(&token, CODE_RESENT_NOTICE).await {
            None => ResendOutcome::Cancelled,
            Some(Ok(())) => ResendOutcome::Sent,
            Some(Err(error)) => ResendOutcome::DeliveryFailed(error),
        }
    }

    /// Tear the view down: cancels the countdown and any in-flight call
    pub async fn dismiss(&self) {
        let mut state = self.state.lock().await;
        let Some(view) = state.view.take() else {
            return;
        };
        view.token.cancel();

        state.session.close();
        state.timer = CountdownTimer::new();
        info!(
            session_id = %state.session.id,
            event = "otp_view_dismissed",
            "OTP verification view dismissed"
        );
    }

    pub async fn status(&self) -> SessionStatus {
        self.state.lock().await.session.status
    }

    /// Copy of the current session for display
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        let session = &state.session;
        SessionSnapshot {
            session_id: session.id,
            status: session.status,
            slots: session.input.slots().to_vec(),
            focus: session.input.focus(),
            value: session.input.value(),
            complete: session.input.is_complete(),
            read_only: session.input.is_read_only(),
            error_message: session.error_message.clone(),
            notice: session.notice.clone(),
            remaining_seconds: state.timer.remaining_seconds(),
            timer_running: state.timer.is_running(),
            countdown: state.timer.display(),
            resend: state.resend_state(self.config.max_resends),
            failed_attempts: session.failed_attempts,
            resends: session.resends,
        }
    }

    /// Submitting -> Editing (or Failed once the attempt limit is reached)
    fn apply_rejection(&self, state: &mut ControllerState, error: &VerificationError) -> OtpError {
        let session = &mut state.session;
        if error.is_incorrect_code() {
            session.failed_attempts += 1;
        }

        let locked = error.is_incorrect_code()
            && matches!(self.config.max_failed_attempts, Some(max) if session.failed_attempts >= max);

        let otp_error = if locked {
            session.status = SessionStatus::Failed;
            OtpError::AttemptsExhausted
        } else {
            session.status = SessionStatus::Editing;
            OtpError::from(error)
        };
        session.set_error(&otp_error);

        warn!(
            destination = %self.masked_destination,
            session_id = %session.id,
            failed_attempts = session.failed_attempts,
            locked = locked,
            error = %error,
            event = "otp_verification_failed",
            "Verification code rejected"
        );
        otp_error
    }

    /// Ask the backend to deliver a code; the result only becomes a notice.
    ///
    /// Returns `None` if the view was dismissed first.
    async fn deliver(
        &self,
        token: &CancellationToken,
        success_notice: &str,
    ) -> Option<Result<(), DeliveryError>> {
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => return None,
            result = self.service.request_code(&self.destination) => result,
        };

        let mut state = self.state.lock().await;
        if token.is_cancelled() {
            return None;
        }
        match &result {
            Ok(()) => {
                state.session.notice = Some(success_notice.to_string());
                info!(
                    destination = %self.masked_destination,
                    session_id = %state.session.id,
                    event = "otp_code_delivered",
                    "Verification code delivery acknowledged"
                );
            }
            Err(error) => {
                state.session.notice = Some(error.to_string());
                warn!(
                    destination = %self.masked_destination,
                    session_id = %state.session.id,
                    error = %error,
                    event = "otp_delivery_failed",
                    "Verification code delivery failed"
                );
            }
        }
        Some(result)
    }

    fn spawn_ticker(&self, token: &CancellationToken) -> CountdownTicker {
        let state = Arc::downgrade(&self.state);
        CountdownTicker::spawn(self.config.tick_interval(), token, move |scope| {
            let state = state.clone();
            async move {
                match state.upgrade() {
                    Some(state) => state.lock().await.on_tick(&scope),
                    None => TickControl::Stop,
                }
            }
        })
    }
}

impl Drop for VerificationController {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
