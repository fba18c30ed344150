//! Command handlers for the Onboarding context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load aggregate, execute command, persist events.
//! A command the aggregate ignores produces no events and persists nothing.

use promptcoach_core::aggregate::AggregateRoot;
use promptcoach_core::clock::Clock;
use promptcoach_core::error::DomainError;
use promptcoach_core::event::DomainEvent;
use promptcoach_core::repository::{EventRepository, StoredEvent};
use uuid::Uuid;

use crate::domain::aggregates::OnboardingSession;
use crate::domain::commands::{
    AdvanceReaction, AnswerPromptCheck, ChooseOption, Confirm, ConfirmCallToAction, FollowUpAdvance,
    StartSession,
};
use crate::domain::events::{OnboardingEvent, OnboardingEventKind};

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct OnboardingCommandResult {
    /// The session affected or created by the command.
    pub session_id: Uuid,
    /// The stored events produced and persisted. Empty when the command
    /// had no effect in the current phase.
    pub stored_events: Vec<StoredEvent>,
    /// A follow-up transition the caller must schedule, if any.
    pub follow_up: Option<FollowUpAdvance>,
}

fn to_stored_event(event: &OnboardingEvent) -> StoredEvent {
    let meta = event.metadata();
    StoredEvent {
        event_id: meta.event_id,
        aggregate_id: meta.aggregate_id,
        event_type: event.event_type().to_owned(),
        payload: event.to_payload(),
        sequence_number: meta.sequence_number,
        correlation_id: meta.correlation_id,
        causation_id: meta.causation_id,
        occurred_at: meta.occurred_at,
    }
}

/// Reconstitutes an `OnboardingSession` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    session_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<OnboardingSession, DomainError> {
    let mut session = OnboardingSession::new(session_id);
    for stored in existing_events {
        let kind: OnboardingEventKind =
            serde_json::from_value(stored.payload.clone()).map_err(|e| {
                DomainError::Infrastructure(format!("event deserialization failed: {e}"))
            })?;
        let event = OnboardingEvent {
            metadata: promptcoach_core::event::EventMetadata {
                event_id: stored.event_id,
                event_type: stored.event_type.clone(),
                aggregate_id: stored.aggregate_id,
                sequence_number: stored.sequence_number,
                correlation_id: stored.correlation_id,
                causation_id: stored.causation_id,
                occurred_at: stored.occurred_at,
            },
            kind,
        };
        session.apply(&event);
    }
    Ok(session)
}

async fn load_session(
    session_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<OnboardingSession, DomainError> {
    let existing_events = repo.load_events(session_id).await?;
    if existing_events.is_empty() {
        return Err(DomainError::SessionNotFound(session_id));
    }
    reconstitute(session_id, &existing_events)
}

async fn persist(
    session: &OnboardingSession,
    follow_up: Option<FollowUpAdvance>,
    repo: &dyn EventRepository,
) -> Result<OnboardingCommandResult, DomainError> {
    let stored_events: Vec<StoredEvent> = session
        .uncommitted_events()
        .iter()
        .map(to_stored_event)
        .collect();

    if !stored_events.is_empty() {
        repo.append_events(session.id, session.version(), &stored_events)
            .await?;
    }

    Ok(OnboardingCommandResult {
        session_id: session.id,
        stored_events,
        follow_up,
    })
}

/// Handles the `StartSession` command: creates a new session aggregate in
/// CONTRACT and persists the resulting event.
///
/// # Errors
///
/// Returns `DomainError` if event appending fails.
pub async fn handle_start_session(
    command: &StartSession,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<OnboardingCommandResult, DomainError> {
    let session_id = Uuid::new_v4();
    let mut session = OnboardingSession::new(session_id);

    session.start(command.correlation_id, clock);

    persist(&session, None, repo).await
}

/// Handles the `Confirm` command: the phase-dependent confirm click.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no events exist for the ID.
/// Returns `DomainError` if event loading or appending fails.
pub async fn handle_confirm(
    command: &Confirm,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<OnboardingCommandResult, DomainError> {
    let mut session = load_session(command.session_id, repo).await?;

    let follow_up = session.confirm(command.correlation_id, clock);

    persist(&session, follow_up, repo).await
}

/// Handles the `ChooseOption` command: a multiple-choice pick.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no events exist for the ID.
/// Returns `DomainError` if event loading or appending fails.
pub async fn handle_choose_option(
    command: &ChooseOption,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<OnboardingCommandResult, DomainError> {
    let mut session = load_session(command.session_id, repo).await?;

    let follow_up = session.choose(command.choice, command.correlation_id, clock);

    persist(&session, follow_up, repo).await
}

/// Handles the `AnswerPromptCheck` command: a yes/no prompt-quality answer.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no events exist for the ID.
/// Returns `DomainError` if event loading or appending fails.
pub async fn handle_answer_prompt_check(
    command: &AnswerPromptCheck,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<OnboardingCommandResult, DomainError> {
    let mut session = load_session(command.session_id, repo).await?;

    let follow_up = session.answer(command.is_good, command.correlation_id, clock);

    persist(&session, follow_up, repo).await
}

/// Handles the `ConfirmCallToAction` command: the terminal-phase click.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no events exist for the ID.
/// Returns `DomainError` if event loading or appending fails.
pub async fn handle_confirm_call_to_action(
    command: &ConfirmCallToAction,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<OnboardingCommandResult, DomainError> {
    let mut session = load_session(command.session_id, repo).await?;

    session.confirm_call_to_action(command.correlation_id, clock);

    persist(&session, None, repo).await
}

/// Handles the `AdvanceReaction` command: resolves a scheduled advance.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no events exist for the ID.
/// Returns `DomainError` if event loading or appending fails.
pub async fn handle_advance_reaction(
    command: &AdvanceReaction,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<OnboardingCommandResult, DomainError> {
    let mut session = load_session(command.session_id, repo).await?;

    session.advance_reaction(command.correlation_id, clock);

    persist(&session, None, repo).await
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use promptcoach_core::error::DomainError;
    use uuid::Uuid;

    use crate::application::command_handlers::{
        handle_choose_option, handle_confirm, handle_start_session,
    };
    use crate::domain::commands::{ChooseOption, Confirm, StartSession};
    use crate::domain::events::OnboardingEventKind;
    use crate::domain::phase::ChoiceId;
    use promptcoach_test_support::{EmptyEventRepository, FixedClock, RecordingEventRepository};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap())
    }

    #[tokio::test]
    async fn test_handle_start_session_persists_session_started_event() {
        // Arrange
        let correlation_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new();
        let command = StartSession { correlation_id };

        // Act
        let result = handle_start_session(&command, &clock(), &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(result.stored_events.len(), 1);
        assert!(result.follow_up.is_none());
        let stored = &result.stored_events[0];
        assert_eq!(stored.event_type, "onboarding.session_started");
        assert_eq!(stored.aggregate_id, result.session_id);
        assert_eq!(stored.sequence_number, 1);
        assert_eq!(stored.correlation_id, correlation_id);
        assert_eq!(stored.occurred_at, clock().0);

        let appended = repo.appended_events();
        assert_eq!(appended.len(), 1);
        let (aggregate_id, expected_version, _) = &appended[0];
        assert_eq!(*aggregate_id, result.session_id);
        assert_eq!(*expected_version, 0);
    }

    #[tokio::test]
    async fn test_handle_confirm_on_unknown_session_is_not_found() {
        // Arrange
        let session_id = Uuid::new_v4();
        let command = Confirm {
            correlation_id: Uuid::new_v4(),
            session_id,
        };

        // Act
        let result = handle_confirm(&command, &clock(), &EmptyEventRepository).await;

        // Assert
        match result {
            Err(DomainError::SessionNotFound(id)) => assert_eq!(id, session_id),
            other => panic!("expected SessionNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_confirm_persists_rewrite_with_version_observed_at_load() {
        // Arrange
        let repo = RecordingEventRepository::new();
        let started = handle_start_session(
            &StartSession {
                correlation_id: Uuid::new_v4(),
            },
            &clock(),
            &repo,
        )
        .await
        .unwrap();

        // Act
        let result = handle_confirm(
            &Confirm {
                correlation_id: Uuid::new_v4(),
                session_id: started.session_id,
            },
            &clock(),
            &repo,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(result.stored_events.len(), 1);
        assert_eq!(
            result.stored_events[0].event_type,
            "onboarding.dialogue_rewritten"
        );
        assert_eq!(result.stored_events[0].sequence_number, 2);

        // The append used the version observed at load time.
        let appended = repo.appended_events();
        assert_eq!(appended[1].1, 1);
    }

    #[tokio::test]
    async fn test_handle_ignored_command_persists_nothing() {
        // Arrange
        let repo = RecordingEventRepository::new();
        let started = handle_start_session(
            &StartSession {
                correlation_id: Uuid::new_v4(),
            },
            &clock(),
            &repo,
        )
        .await
        .unwrap();

        // Act — picking a consequence option is undefined at CONTRACT.
        let result = handle_choose_option(
            &ChooseOption {
                correlation_id: Uuid::new_v4(),
                session_id: started.session_id,
                choice: ChoiceId::Animal,
            },
            &clock(),
            &repo,
        )
        .await
        .unwrap();

        // Assert
        assert!(result.stored_events.is_empty());
        assert!(result.follow_up.is_none());
        assert_eq!(repo.appended_events().len(), 1);
    }

    #[tokio::test]
    async fn test_stored_payload_round_trips_through_reconstitution() {
        // Arrange
        let repo = RecordingEventRepository::new();
        let started = handle_start_session(
            &StartSession {
                correlation_id: Uuid::new_v4(),
            },
            &clock(),
            &repo,
        )
        .await
        .unwrap();

        // Act
        let stored = &started.stored_events[0];
        let kind: OnboardingEventKind = serde_json::from_value(stored.payload.clone()).unwrap();

        // Assert
        match kind {
            OnboardingEventKind::SessionStarted(payload) => {
                assert_eq!(payload.session_id, started.session_id);
            }
            other => panic!("expected SessionStarted, got {other:?}"),
        }
    }
}
