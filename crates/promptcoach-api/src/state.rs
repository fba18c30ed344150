//! Shared application state.

use std::sync::Arc;

use promptcoach_onboarding::application::session_service::SessionService;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrates onboarding commands, timers, and notifications.
    pub session_service: Arc<SessionService>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(session_service: Arc<SessionService>) -> Self {
        Self { session_service }
    }
}
