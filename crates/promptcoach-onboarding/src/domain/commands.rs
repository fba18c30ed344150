//! Commands for the Onboarding context.
//!
//! User-driven commands arrive through the API; `AdvanceReaction` is only
//! ever issued by the delayed-transition scheduler.

use std::time::Duration;

use promptcoach_core::command::Command;
use uuid::Uuid;

use super::phase::ChoiceId;

/// A pending auto-advance: run `AdvanceReaction` against the session once
/// `delay` has elapsed, unless the session is torn down first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUpAdvance {
    /// How long to wait before the follow-up transition.
    pub delay: Duration,
}

/// Command to start a new onboarding session.
#[derive(Debug, Clone)]
pub struct StartSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StartSession {
    fn command_type(&self) -> &'static str {
        "onboarding.start_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command carrying a confirm click. Its meaning depends on the current
/// phase (contract confirms, start level, next challenge, end of level).
#[derive(Debug, Clone)]
pub struct Confirm {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session identifier.
    pub session_id: Uuid,
}

impl Command for Confirm {
    fn command_type(&self) -> &'static str {
        "onboarding.confirm"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command carrying a multiple-choice pick.
#[derive(Debug, Clone)]
pub struct ChooseOption {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session identifier.
    pub session_id: Uuid,
    /// The option that was picked.
    pub choice: ChoiceId,
}

impl Command for ChooseOption {
    fn command_type(&self) -> &'static str {
        "onboarding.choose_option"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command carrying a yes/no answer to "is this a good prompt?".
#[derive(Debug, Clone)]
pub struct AnswerPromptCheck {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session identifier.
    pub session_id: Uuid,
    /// The player's answer.
    pub is_good: bool,
}

impl Command for AnswerPromptCheck {
    fn command_type(&self) -> &'static str {
        "onboarding.answer_prompt_check"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command confirming the final call-to-action.
#[derive(Debug, Clone)]
pub struct ConfirmCallToAction {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session identifier.
    pub session_id: Uuid,
}

impl Command for ConfirmCallToAction {
    fn command_type(&self) -> &'static str {
        "onboarding.confirm_call_to_action"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Scheduler-issued command that resolves the pending auto-advance for
/// the session's current phase. A no-op when nothing is pending.
#[derive(Debug, Clone)]
pub struct AdvanceReaction {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session identifier.
    pub session_id: Uuid,
}

impl Command for AdvanceReaction {
    fn command_type(&self) -> &'static str {
        "onboarding.advance_reaction"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
