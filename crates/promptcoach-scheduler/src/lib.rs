//! Single-shot, cancellable timers for session auto-advances.
//!
//! Each live session owns one [`SessionScheduler`]. Scheduling a new
//! follow-up cancels whatever was pending, so at most one auto-advance
//! is ever in flight per session. Tearing the session down cancels the
//! pending timer outright.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Cancellable timer for a single session.
#[derive(Debug)]
pub struct SessionScheduler {
    pending: CancellationToken,
}

impl SessionScheduler {
    /// Creates a scheduler with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: CancellationToken::new(),
        }
    }

    /// Schedules `action` to run once after `delay`, replacing any timer
    /// already pending. The returned handle is mainly useful in tests.
    pub fn schedule_once<F>(&mut self, delay: Duration, action: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.pending.cancel();
        self.pending = CancellationToken::new();
        let token = self.pending.clone();
        // Anchor the deadline at schedule time, not at the spawned
        // task's first poll, so `delay` is measured from this call.
        let deadline = tokio::time::Instant::now() + delay;

        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    debug!(?delay, "pending advance cancelled");
                }
                () = tokio::time::sleep_until(deadline) => {
                    action.await;
                }
            }
        })
    }

    /// Cancels the pending timer, if any.
    pub fn shutdown(&self) {
        self.pending.cancel();
    }
}

impl Default for SessionScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SessionScheduler {
    fn drop(&mut self) {
        self.pending.cancel();
    }
}
