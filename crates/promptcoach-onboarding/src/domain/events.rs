//! Domain events for the Onboarding context.

use promptcoach_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::phase::{ChoiceId, Mood, Phase};

/// Emitted once when a session starts; puts the session in CONTRACT with
/// the opening line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStarted {
    /// The session identifier.
    pub session_id: Uuid,
}

/// Emitted when the dialogue (and possibly the mood) changes without a
/// phase transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueRewritten {
    /// The session identifier.
    pub session_id: Uuid,
    /// Mascot mood to display.
    pub mood: Mood,
    /// The full replacement dialogue.
    pub dialogue: String,
}

/// Emitted when the session advances to the next phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseAdvanced {
    /// The session identifier.
    pub session_id: Uuid,
    /// Phase the session left.
    pub from: Phase,
    /// Phase the session entered.
    pub to: Phase,
    /// Mascot mood on entry.
    pub mood: Mood,
    /// Dialogue shown on entry.
    pub dialogue: String,
}

/// Emitted when a consequence option is picked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionPicked {
    /// The session identifier.
    pub session_id: Uuid,
    /// The option that was picked.
    pub choice: ChoiceId,
    /// Mascot mood reacting to the pick.
    pub mood: Mood,
    /// Reaction dialogue.
    pub dialogue: String,
}

/// Emitted when the final call-to-action is confirmed. Does not change
/// phase, mood, dialogue, or revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToActionConfirmed {
    /// The session identifier.
    pub session_id: Uuid,
}

/// Event type identifier for [`SessionStarted`].
pub const SESSION_STARTED_EVENT_TYPE: &str = "onboarding.session_started";

/// Event type identifier for [`DialogueRewritten`].
pub const DIALOGUE_REWRITTEN_EVENT_TYPE: &str = "onboarding.dialogue_rewritten";

/// Event type identifier for [`PhaseAdvanced`].
pub const PHASE_ADVANCED_EVENT_TYPE: &str = "onboarding.phase_advanced";

/// Event type identifier for [`OptionPicked`].
pub const OPTION_PICKED_EVENT_TYPE: &str = "onboarding.option_picked";

/// Event type identifier for [`CallToActionConfirmed`].
pub const CALL_TO_ACTION_CONFIRMED_EVENT_TYPE: &str = "onboarding.call_to_action_confirmed";

/// Event payload variants for the Onboarding context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OnboardingEventKind {
    /// A session has started.
    SessionStarted(SessionStarted),
    /// The dialogue was replaced without a phase change.
    DialogueRewritten(DialogueRewritten),
    /// The session advanced to the next phase.
    PhaseAdvanced(PhaseAdvanced),
    /// A consequence option was picked.
    OptionPicked(OptionPicked),
    /// The call-to-action was confirmed.
    CallToActionConfirmed(CallToActionConfirmed),
}

impl OnboardingEventKind {
    /// Returns the event type name for this payload variant.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::SessionStarted(_) => SESSION_STARTED_EVENT_TYPE,
            Self::DialogueRewritten(_) => DIALOGUE_REWRITTEN_EVENT_TYPE,
            Self::PhaseAdvanced(_) => PHASE_ADVANCED_EVENT_TYPE,
            Self::OptionPicked(_) => OPTION_PICKED_EVENT_TYPE,
            Self::CallToActionConfirmed(_) => CALL_TO_ACTION_CONFIRMED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Onboarding context.
#[derive(Debug, Clone)]
pub struct OnboardingEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: OnboardingEventKind,
}

impl DomainEvent for OnboardingEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("OnboardingEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
