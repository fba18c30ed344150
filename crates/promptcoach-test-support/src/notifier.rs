//! Test notifiers — mock `CtaNotifier` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use promptcoach_analytics::{CtaNotifier, CtaPayload, NotifyError};

/// A notifier that records every payload it is asked to deliver.
#[derive(Debug, Default)]
pub struct RecordingCtaNotifier {
    notifications: Mutex<Vec<CtaPayload>>,
}

impl RecordingCtaNotifier {
    /// Create an empty recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all delivered payloads.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn notifications(&self) -> Vec<CtaPayload> {
        self.notifications.lock().unwrap().clone()
    }
}

#[async_trait]
impl CtaNotifier for RecordingCtaNotifier {
    async fn notify(&self, payload: CtaPayload) -> Result<(), NotifyError> {
        self.notifications.lock().unwrap().push(payload);
        Ok(())
    }
}

/// A notifier that always fails. Useful for checking that delivery
/// failures stay invisible to the player.
#[derive(Debug)]
pub struct FailingCtaNotifier;

#[async_trait]
impl CtaNotifier for FailingCtaNotifier {
    async fn notify(&self, _payload: CtaPayload) -> Result<(), NotifyError> {
        Err(NotifyError::Rejected("endpoint unavailable".into()))
    }
}
