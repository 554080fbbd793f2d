//! Resend cooldown countdown.

use serde::{Deserialize, Serialize};

/// Result of applying one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Decremented and still running
    Ticked { remaining_seconds: u64 },
    /// This tick reached zero; the timer stopped
    Expired,
    /// Timer was not running; nothing changed
    Idle,
}

/// Countdown in whole seconds, decremented once per tick while running
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownTimer {
    remaining_seconds: u64,
    running: bool,
}

impl CountdownTimer {
    /// A stopped timer at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer at `duration_seconds`
    pub fn start(&mut self, duration_seconds: u64) {
        self.remaining_seconds = duration_seconds;
        self.running = duration_seconds > 0;
    }

    /// Re-arm after expiry; same as `start`
    pub fn reset(&mut self, duration_seconds: u64) {
        self.start(duration_seconds);
    }

    /// Freeze the current value
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Decrement by one, clamped at zero
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked {
                remaining_seconds: self.remaining_seconds,
            }
        }
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Resend eligibility: the countdown reached zero
    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// `m:ss` rendering, e.g. `1:30`
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining_seconds / 60, self.remaining_seconds % 60)
    }
}
