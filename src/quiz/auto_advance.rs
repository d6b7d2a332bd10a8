//! Delayed auto-advance after a single-choice selection.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Delay between a selection and the automatic move to the next step.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(250);

/// Owns at most one pending delayed task. The task posts an event into the
/// host's event channel when the delay elapses; it never touches quiz state
/// itself.
#[derive(Debug)]
pub struct AutoAdvanceTimer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl AutoAdvanceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `event` to be sent after the delay, replacing any pending
    /// one. Must be called from within a tokio runtime.
    pub fn schedule<T>(&mut self, events: UnboundedSender<T>, event: T)
    where
        T: Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the host shut down; nothing to do.
            let _ = events.send(event);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                handle.abort();
                tracing::debug!("Cancelled pending auto-advance");
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Default for AutoAdvanceTimer {
    fn default() -> Self {
        Self::new(AUTO_ADVANCE_DELAY)
    }
}

impl Drop for AutoAdvanceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
