//! Recurring countdown tick bound to a cancellation scope
//!
//! The ticker is the scoped resource behind the resend countdown: it is
//! acquired when the session enters editing, and released either explicitly,
//! by cancelling its parent token, or by dropping it.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;

/// What the tick callback wants next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

/// Handle to a running tick task
#[derive(Debug)]
pub struct CountdownTicker {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    /// Spawn a task calling `on_tick` every `period`, first after one period.
    ///
    /// `on_tick` receives the ticker's own token. A tick that was already
    /// running when the ticker got released sees it cancelled.
    ///
    /// The task ends when `on_tick` returns [`TickControl::Stop`], when the
    /// ticker is released or dropped, or when `parent` is cancelled.
    pub fn spawn<F, Fut>(period: Duration, parent: &CancellationToken, mut on_tick: F) -> Self
    where
        F: FnMut(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = TickControl> + Send + 'static,
    {
        let token = parent.child_token();
        let cancel = token.clone();

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        if on_tick(cancel.clone()).await == TickControl::Stop {
                            break;
                        }
                    }
                }
            }

            tracing::trace!(event = "countdown_ticker_stopped", "Countdown ticker stopped");
        });

        Self { token, handle }
    }

    /// Stop ticking; no tick fires after this returns
    pub fn release(&self) {
        self.token.cancel();
    }

    pub fn is_released(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the tick task has exited
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn counting_ticker(
        parent: &CancellationToken,
        stop_after: u32,
    ) -> (CountdownTicker, Arc<AtomicU32>) {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = ticks.clone();
        let ticker = CountdownTicker::spawn(Duration::from_secs(1), parent, move |_scope| {
            let counter = counter.clone();
            async move {
                let seen = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if seen >= stop_after {
                    TickControl::Stop
                } else {
                    TickControl::Continue
                }
            }
        });
        (ticker, ticks)
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let parent = CancellationToken::new();
        let (_ticker, ticks) = counting_ticker(&parent, u32::MAX);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_callback_can_stop_ticker() {
        let parent = CancellationToken::new();
        let (ticker, ticks) = counting_ticker(&parent, 2);

        tokio::time::sleep(Duration::from_millis(5500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_stops_ticks() {
        let parent = CancellationToken::new();
        let (ticker, ticks) = counting_ticker(&parent, u32::MAX);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        ticker.release();
        assert!(ticker.is_released());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_parent_cancellation_and_drop_stop_ticks() {
        let parent = CancellationToken::new();
        let (ticker, ticks) = counting_ticker(&parent, u32::MAX);
        parent.cancel();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
        assert!(ticker.is_released());

        let parent = CancellationToken::new();
        let (ticker, ticks) = counting_ticker(&parent, u32::MAX);
        drop(ticker);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_callback_scope_follows_release() {
        let parent = CancellationToken::new();
        let seen = Arc::new(std::sync::Mutex::new(None));
        let slot = seen.clone();
        let ticker = CountdownTicker::spawn(Duration::from_secs(1), &parent, move |scope| {
            *slot.lock().unwrap() = Some(scope);
            async { TickControl::Continue }
        });

        tokio::time::sleep(Duration::from_millis(1500)).await;
        let scope = seen.lock().unwrap().clone().unwrap();
        assert!(!scope.is_cancelled());

        ticker.release();
        assert!(scope.is_cancelled());
    }
}
