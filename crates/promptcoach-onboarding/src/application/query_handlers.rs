//! Query handlers for the Onboarding context.
//!
//! This module contains query handlers that reconstitute the session
//! from stored events and return read-only view DTOs.

use promptcoach_core::aggregate::AggregateRoot;
use promptcoach_core::error::DomainError;
use promptcoach_core::repository::EventRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::phase::{ChoiceId, Mood, Phase};

/// Read-only view of an onboarding session aggregate.
#[derive(Debug, Serialize)]
pub struct SessionView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Current phase.
    pub phase: Phase,
    /// Current mascot mood.
    pub mood: Mood,
    /// Current dialogue text.
    pub dialogue: String,
    /// Dialogue revision counter; bumps on every dialogue change.
    pub revision: u64,
    /// Picks made within the current consequence sub-phase, in order.
    pub selections: Vec<ChoiceId>,
    /// Current version (event count).
    pub version: i64,
}

/// Retrieves an onboarding session by its aggregate ID.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_session_by_id(
    session_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<SessionView, DomainError> {
    let stored_events = repo.load_events(session_id).await?;
    if stored_events.is_empty() {
        return Err(DomainError::SessionNotFound(session_id));
    }
    let session = command_handlers::reconstitute(session_id, &stored_events)?;
    Ok(SessionView {
        session_id,
        phase: session.phase(),
        mood: session.mood(),
        dialogue: session.dialogue().to_owned(),
        revision: session.revision(),
        selections: session.selections().to_vec(),
        version: session.version(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use promptcoach_core::error::DomainError;
    use uuid::Uuid;

    use crate::application::command_handlers::handle_start_session;
    use crate::application::query_handlers::get_session_by_id;
    use crate::domain::commands::StartSession;
    use crate::domain::phase::{Mood, Phase};
    use crate::domain::script;
    use promptcoach_test_support::{EmptyEventRepository, FixedClock, RecordingEventRepository};

    #[tokio::test]
    async fn test_get_session_by_id_returns_view_with_state() {
        // Arrange
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap());
        let repo = RecordingEventRepository::new();
        let started = handle_start_session(
            &StartSession {
                correlation_id: Uuid::new_v4(),
            },
            &clock,
            &repo,
        )
        .await
        .unwrap();

        // Act
        let view = get_session_by_id(started.session_id, &repo).await.unwrap();

        // Assert
        assert_eq!(view.session_id, started.session_id);
        assert_eq!(view.phase, Phase::Contract);
        assert_eq!(view.mood, Mood::Base);
        assert_eq!(view.dialogue, script::OPENING_LINE);
        assert_eq!(view.revision, 0);
        assert!(view.selections.is_empty());
        assert_eq!(view.version, 1);
    }

    #[tokio::test]
    async fn test_get_session_by_id_for_unknown_session_is_not_found() {
        // Arrange
        let session_id = Uuid::new_v4();

        // Act
        let result = get_session_by_id(session_id, &EmptyEventRepository).await;

        // Assert
        match result {
            Err(DomainError::SessionNotFound(id)) => assert_eq!(id, session_id),
            other => panic!("expected SessionNotFound, got {other:?}"),
        }
    }
}
