//! Session orchestration: command handling plus timers and notifications.
//!
//! `SessionService` owns one [`SessionScheduler`] per live session and
//! resolves scheduled auto-advances by issuing `AdvanceReaction` commands
//! against the event stream. Call-to-action notifications are fired in the
//! background and failures are only logged.

use std::sync::Arc;

use dashmap::DashMap;
use promptcoach_analytics::{CtaNotifier, CtaPayload};
use promptcoach_core::clock::Clock;
use promptcoach_core::error::DomainError;
use promptcoach_core::repository::EventRepository;
use promptcoach_scheduler::SessionScheduler;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::command_handlers::{
    OnboardingCommandResult, handle_advance_reaction, handle_answer_prompt_check,
    handle_choose_option, handle_confirm, handle_confirm_call_to_action, handle_start_session,
};
use crate::application::query_handlers::{SessionView, get_session_by_id};
use crate::domain::commands::{
    AdvanceReaction, AnswerPromptCheck, ChooseOption, Confirm, ConfirmCallToAction,
    FollowUpAdvance, StartSession,
};
use crate::domain::phase::ChoiceId;

/// Application service for the Onboarding context.
pub struct SessionService {
    clock: Arc<dyn Clock>,
    repository: Arc<dyn EventRepository>,
    notifier: Arc<dyn CtaNotifier>,
    schedulers: DashMap<Uuid, SessionScheduler>,
}

impl SessionService {
    /// Creates a service with no live sessions.
    pub fn new(
        clock: Arc<dyn Clock>,
        repository: Arc<dyn EventRepository>,
        notifier: Arc<dyn CtaNotifier>,
    ) -> Arc<Self> {
        Arc::new(Self {
            clock,
            repository,
            notifier,
            schedulers: DashMap::new(),
        })
    }

    /// Starts a new session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if event persistence fails.
    pub async fn start_session(self: &Arc<Self>) -> Result<OnboardingCommandResult, DomainError> {
        let command = StartSession {
            correlation_id: Uuid::new_v4(),
        };
        let result = handle_start_session(&command, &*self.clock, &*self.repository).await?;
        self.schedulers
            .insert(result.session_id, SessionScheduler::new());
        Ok(result)
    }

    /// Applies a confirm click.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` for an unknown session.
    pub async fn confirm(
        self: &Arc<Self>,
        session_id: Uuid,
    ) -> Result<OnboardingCommandResult, DomainError> {
        let command = Confirm {
            correlation_id: Uuid::new_v4(),
            session_id,
        };
        let result = handle_confirm(&command, &*self.clock, &*self.repository).await?;
        self.schedule_follow_up(session_id, result.follow_up);
        Ok(result)
    }

    /// Applies a multiple-choice pick.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` for an unknown session.
    pub async fn choose(
        self: &Arc<Self>,
        session_id: Uuid,
        choice: ChoiceId,
    ) -> Result<OnboardingCommandResult, DomainError> {
        let command = ChooseOption {
            correlation_id: Uuid::new_v4(),
            session_id,
            choice,
        };
        let result = handle_choose_option(&command, &*self.clock, &*self.repository).await?;
        self.schedule_follow_up(session_id, result.follow_up);
        Ok(result)
    }

    /// Applies a yes/no prompt-quality answer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` for an unknown session.
    pub async fn answer(
        self: &Arc<Self>,
        session_id: Uuid,
        is_good: bool,
    ) -> Result<OnboardingCommandResult, DomainError> {
        let command = AnswerPromptCheck {
            correlation_id: Uuid::new_v4(),
            session_id,
            is_good,
        };
        let result = handle_answer_prompt_check(&command, &*self.clock, &*self.repository).await?;
        self.schedule_follow_up(session_id, result.follow_up);
        Ok(result)
    }

    /// Applies a call-to-action click. When the click is accepted, the
    /// notification is delivered in the background; delivery failures are
    /// logged and never surfaced.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` for an unknown session.
    pub async fn confirm_call_to_action(
        self: &Arc<Self>,
        session_id: Uuid,
    ) -> Result<OnboardingCommandResult, DomainError> {
        let command = ConfirmCallToAction {
            correlation_id: Uuid::new_v4(),
            session_id,
        };
        let result =
            handle_confirm_call_to_action(&command, &*self.clock, &*self.repository).await?;

        if !result.stored_events.is_empty() {
            let notifier = Arc::clone(&self.notifier);
            let payload = CtaPayload {
                clicked: true,
                timestamp: self.clock.now(),
            };
            tokio::spawn(async move {
                if let Err(error) = notifier.notify(payload).await {
                    warn!(%session_id, %error, "call-to-action notification failed");
                }
            });
        }

        Ok(result)
    }

    /// Tears the session down: cancels any pending auto-advance and
    /// discards the event stream. Safe to call for unknown sessions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if stream removal fails.
    pub async fn teardown(self: &Arc<Self>, session_id: Uuid) -> Result<(), DomainError> {
        if let Some((_, scheduler)) = self.schedulers.remove(&session_id) {
            scheduler.shutdown();
        }
        self.repository.remove_stream(session_id).await?;
        debug!(%session_id, "session torn down");
        Ok(())
    }

    /// Returns the current view of a session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` for an unknown session.
    pub async fn get_session(&self, session_id: Uuid) -> Result<SessionView, DomainError> {
        get_session_by_id(session_id, &*self.repository).await
    }

    fn schedule_follow_up(
        self: &Arc<Self>,
        session_id: Uuid,
        follow_up: Option<FollowUpAdvance>,
    ) {
        let Some(follow_up) = follow_up else {
            return;
        };
        let service = Arc::clone(self);
        let mut scheduler = self.schedulers.entry(session_id).or_default();
        scheduler.schedule_once(follow_up.delay, async move {
            let command = AdvanceReaction {
                correlation_id: Uuid::new_v4(),
                session_id,
            };
            if let Err(error) =
                handle_advance_reaction(&command, &*service.clock, &*service.repository).await
            {
                warn!(%session_id, %error, "scheduled advance failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use promptcoach_event_store::InMemoryEventRepository;
    use promptcoach_test_support::{FailingCtaNotifier, FixedClock, RecordingCtaNotifier};

    use crate::domain::phase::{Mood, Phase};
    use crate::domain::script;

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
    }

    fn service_with(notifier: Arc<dyn CtaNotifier>) -> Arc<SessionService> {
        SessionService::new(
            Arc::new(FixedClock(fixed_now())),
            Arc::new(InMemoryEventRepository::new()),
            notifier,
        )
    }

    /// Lets spawned timer tasks observe the advanced clock.
    async fn settle() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    async fn advance(millis: u64) {
        tokio::time::advance(Duration::from_millis(millis)).await;
        settle().await;
    }

    /// Drives a fresh session through the whole flow to LEVEL_1_COMPLETE.
    async fn drive_to_complete(service: &Arc<SessionService>) -> Uuid {
        let id = service.start_session().await.unwrap().session_id;
        service.confirm(id).await.unwrap();
        service.confirm(id).await.unwrap();

        service.choose(id, ChoiceId::TenPercent).await.unwrap();
        advance(4000).await;
        service.choose(id, ChoiceId::Freedom).await.unwrap();
        service.confirm(id).await.unwrap();

        service.answer(id, true).await.unwrap();
        advance(3000).await;
        service.choose(id, ChoiceId::Animal).await.unwrap();
        service.choose(id, ChoiceId::Car).await.unwrap();
        service.choose(id, ChoiceId::Guitar).await.unwrap();
        advance(4000).await;
        service.confirm(id).await.unwrap();

        service.answer(id, false).await.unwrap();
        advance(4000).await;
        service.choose(id, ChoiceId::Flagship).await.unwrap();
        service.choose(id, ChoiceId::Camera).await.unwrap();
        service.choose(id, ChoiceId::Gaming).await.unwrap();
        advance(5000).await;

        service.confirm(id).await.unwrap();
        let view = service.get_session(id).await.unwrap();
        assert_eq!(view.phase, Phase::Level1Complete);
        id
    }

    #[tokio::test(start_paused = true)]
    async fn test_usage_gap_pick_auto_advances_after_delay() {
        // Arrange
        let service = service_with(Arc::new(RecordingCtaNotifier::new()));
        let id = service.start_session().await.unwrap().session_id;
        service.confirm(id).await.unwrap();
        service.confirm(id).await.unwrap();

        // Act
        service.choose(id, ChoiceId::TenPercent).await.unwrap();
        let view = service.get_session(id).await.unwrap();
        assert_eq!(view.phase, Phase::UsageGap);
        assert_eq!(view.mood, Mood::Glitch);

        advance(3999).await;
        assert_eq!(
            service.get_session(id).await.unwrap().phase,
            Phase::UsageGap
        );

        advance(1).await;

        // Assert
        let view = service.get_session(id).await.unwrap();
        assert_eq!(view.phase, Phase::CareerLeverage);
        assert_eq!(view.dialogue, script::CAREER_PROMPT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_pending_advance_and_discards_stream() {
        // Arrange
        let service = service_with(Arc::new(RecordingCtaNotifier::new()));
        let id = service.start_session().await.unwrap().session_id;
        service.confirm(id).await.unwrap();
        service.confirm(id).await.unwrap();
        service.choose(id, ChoiceId::Unsure).await.unwrap();

        // Act
        service.teardown(id).await.unwrap();
        advance(10_000).await;

        // Assert — the session is gone and the timer never resurrected it.
        match service.get_session(id).await {
            Err(DomainError::SessionNotFound(missing)) => assert_eq!(missing, id),
            other => panic!("expected SessionNotFound, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_of_unknown_session_is_ok() {
        let service = service_with(Arc::new(RecordingCtaNotifier::new()));

        service.teardown(Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_ignored_command_produces_no_events() {
        // Arrange
        let service = service_with(Arc::new(RecordingCtaNotifier::new()));
        let id = service.start_session().await.unwrap().session_id;

        // Act — answering the prompt check is undefined at CONTRACT.
        let result = service.answer(id, true).await.unwrap();

        // Assert
        assert!(result.stored_events.is_empty());
        assert!(result.follow_up.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_walkthrough_delivers_cta_notification() {
        // Arrange
        let notifier = Arc::new(RecordingCtaNotifier::new());
        let service = service_with(Arc::clone(&notifier) as Arc<dyn CtaNotifier>);
        let id = drive_to_complete(&service).await;
        let revision_before = service.get_session(id).await.unwrap().revision;

        // Act
        let result = service.confirm_call_to_action(id).await.unwrap();
        settle().await;

        // Assert — accepted without touching the dialogue.
        assert_eq!(result.stored_events.len(), 1);
        let view = service.get_session(id).await.unwrap();
        assert_eq!(view.phase, Phase::Level1Complete);
        assert_eq!(view.revision, revision_before);

        let notifications = notifier.notifications();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].clicked);
        assert_eq!(notifications[0].timestamp, fixed_now());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cta_before_completion_sends_nothing() {
        // Arrange
        let notifier = Arc::new(RecordingCtaNotifier::new());
        let service = service_with(Arc::clone(&notifier) as Arc<dyn CtaNotifier>);
        let id = service.start_session().await.unwrap().session_id;

        // Act
        let result = service.confirm_call_to_action(id).await.unwrap();
        settle().await;

        // Assert
        assert!(result.stored_events.is_empty());
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cta_delivery_failure_is_invisible_to_the_player() {
        // Arrange
        let service = service_with(Arc::new(FailingCtaNotifier));
        let id = drive_to_complete(&service).await;

        // Act
        let result = service.confirm_call_to_action(id).await;
        settle().await;

        // Assert
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teaser_rewrites_dialogue_after_completion() {
        // Arrange
        let service = service_with(Arc::new(RecordingCtaNotifier::new()));
        let id = drive_to_complete(&service).await;
        let completed = service.get_session(id).await.unwrap();
        assert_eq!(completed.dialogue, script::CLOSING_LINE);

        // Act
        advance(4000).await;

        // Assert
        let view = service.get_session(id).await.unwrap();
        assert_eq!(view.phase, Phase::Level1Complete);
        assert_eq!(view.mood, Mood::Solid);
        assert_eq!(view.dialogue, script::NEXT_LEVEL_TEASER);
        assert_eq!(view.revision, completed.revision + 1);
    }
}
