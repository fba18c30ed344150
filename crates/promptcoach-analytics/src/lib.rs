//! Outbound analytics for the final call-to-action.
//!
//! Delivery is best-effort. Callers fire the notification in the
//! background and never surface a failure to the player.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Payload posted when a player clicks the final call-to-action.
#[derive(Debug, Clone, Serialize)]
pub struct CtaPayload {
    /// Always `true`; kept explicit so the receiver needs no inference.
    pub clicked: bool,
    /// When the click was accepted.
    pub timestamp: DateTime<Utc>,
}

/// Failure to deliver a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The HTTP request failed or the endpoint answered with an error status.
    #[error("notification request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The sink refused the notification.
    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Sink for call-to-action notifications.
#[async_trait]
pub trait CtaNotifier: Send + Sync {
    /// Delivers one click notification.
    async fn notify(&self, payload: CtaPayload) -> Result<(), NotifyError>;
}

/// Notifier that POSTs the payload as JSON to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpCtaNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCtaNotifier {
    /// Creates a notifier targeting `endpoint`.
    #[must_use]
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl CtaNotifier for HttpCtaNotifier {
    async fn notify(&self, payload: CtaPayload) -> Result<(), NotifyError> {
        self.client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
