//! Deferred clearing of the over-completed notification.

use std::sync::Arc;
use std::time::Duration;

use strictly_innings::{CompletionEpoch, ScoringEngine};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, instrument};

/// How long the "over complete" notification stays up by default.
pub const DEFAULT_NOTIFY_DELAY: Duration = Duration::from_secs(1);

/// Schedules one-shot clears of the over-completed flag.
///
/// At most one clear is pending; scheduling another aborts the previous
/// one. The engine ignores a clear whose epoch is no longer current, so a
/// clear that already fired late cannot hide a newer notification.
#[derive(Debug)]
pub struct OverNotifier {
    delay: Duration,
    pending: Option<JoinHandle<bool>>,
}

impl OverNotifier {
    /// Creates a notifier with the given display window.
    #[instrument]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Spawns a task that clears `epoch`'s notification after the delay.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self, engine), fields(delay_ms = self.delay.as_millis() as u64))]
    pub fn schedule(&mut self, engine: Arc<Mutex<ScoringEngine>>, epoch: CompletionEpoch) {
        self.cancel();

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            let cleared = engine.lock().await.clear_over_notification(epoch);
            debug!(%epoch, cleared, "Notification clear fired");
            cleared
        }));
    }

    /// Aborts the pending clear, if any.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                debug!("Superseding pending notification clear");
            }
            handle.abort();
        }
    }

    /// True while a clear is scheduled and has not yet run.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Default for OverNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFY_DELAY)
    }
}

impl Drop for OverNotifier {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_after_over() -> (Arc<Mutex<ScoringEngine>>, CompletionEpoch) {
        let mut engine = ScoringEngine::with_balls_per_over(1).unwrap();
        let epoch = engine.record_runs(1).unwrap().over_completed.unwrap().epoch;
        (Arc::new(Mutex::new(engine)), epoch)
    }

    #[tokio::test(start_paused = true)]
    async fn test_clears_after_delay() {
        let (engine, epoch) = engine_after_over();
        let mut notifier = OverNotifier::new(Duration::from_millis(1000));

        notifier.schedule(engine.clone(), epoch);
        sleep(Duration::from_millis(500)).await;
        assert!(engine.lock().await.over_just_completed());
        assert!(notifier.is_pending());

        sleep(Duration::from_millis(600)).await;
        assert!(!engine.lock().await.over_just_completed());
        assert!(!notifier.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_keeps_notification() {
        let (engine, epoch) = engine_after_over();
        let mut notifier = OverNotifier::new(Duration::from_millis(100));

        notifier.schedule(engine.clone(), epoch);
        notifier.cancel();
        sleep(Duration::from_millis(500)).await;

        assert!(engine.lock().await.over_just_completed());
    }
}
