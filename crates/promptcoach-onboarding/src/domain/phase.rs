//! Phase, mood, and choice identifiers for the onboarding flow.

use serde::{Deserialize, Serialize};

/// A named step in the fixed onboarding sequence.
///
/// Phases advance strictly forward along this order; there is no cycle
/// back to an earlier phase. `Level1Complete` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Opening hook: two confirm clicks frame the premise.
    #[serde(rename = "CONTRACT")]
    Contract,
    /// "How much of its potential are you using?" multiple choice.
    #[serde(rename = "USAGE_GAP")]
    UsageGap,
    /// "What do you want this skill to do for you?" multiple choice.
    #[serde(rename = "CAREER_LEVERAGE")]
    CareerLeverage,
    /// Jaguar mini-game: "is this a good prompt?" yes/no.
    #[serde(rename = "LEVEL_1_SETUP")]
    Level1Setup,
    /// Mascot reacts to the yes/no answer, then auto-advances.
    #[serde(rename = "LEVEL_1_REACTION")]
    Level1Reaction,
    /// Pick all three interpretations of "Jaguar".
    #[serde(rename = "LEVEL_1_CONSEQUENCE")]
    Level1Consequence,
    /// Verdict on the jaguar mini-game; confirm moves on.
    #[serde(rename = "LEVEL_1_FINAL")]
    Level1Final,
    /// Phone mini-game: "is this a good prompt?" yes/no.
    #[serde(rename = "LEVEL_1_PHONE_SETUP")]
    Level1PhoneSetup,
    /// Mascot reacts to the yes/no answer, then auto-advances.
    #[serde(rename = "LEVEL_1_PHONE_REACTION")]
    Level1PhoneReaction,
    /// Pick all three readings of "which phone should I buy?".
    #[serde(rename = "LEVEL_1_PHONE_CONSEQUENCE")]
    Level1PhoneConsequence,
    /// Verdict on the phone mini-game; confirm finishes the level.
    #[serde(rename = "LEVEL_1_PHONE_FINAL")]
    Level1PhoneFinal,
    /// Terminal phase; only the call-to-action remains.
    #[serde(rename = "LEVEL_1_COMPLETE")]
    Level1Complete,
}

impl Phase {
    /// Whether this phase is a "pick 3" consequence sub-phase.
    /// Selections are cleared on entry to these phases.
    #[must_use]
    pub const fn is_consequence(self) -> bool {
        matches!(self, Self::Level1Consequence | Self::Level1PhoneConsequence)
    }
}

/// The mascot's affect state. Presentation-only: it never gates a
/// transition, it only tells the renderer which asset to show.
///
/// `Exhausted` has no dedicated visual asset yet; the presentation
/// collaborator decides what to render for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Neutral resting state.
    Base,
    /// Glitchy, alarmed.
    Glitch,
    /// Confident, approving.
    Solid,
    /// Irritated by an ambiguous request.
    Annoyed,
    /// Worn down by ambiguity.
    Exhausted,
}

/// Identifier of a multiple-choice option the player can pick.
///
/// The serialized names are the option ids the presentation layer sends
/// back, so they match the on-screen control ids exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceId {
    // USAGE_GAP
    #[serde(rename = "10%")]
    TenPercent,
    #[serde(rename = "50%")]
    FiftyPercent,
    Unsure,
    // CAREER_LEVERAGE
    Competence,
    Freedom,
    Security,
    Creativity,
    // LEVEL_1_CONSEQUENCE
    Animal,
    Car,
    Guitar,
    // LEVEL_1_PHONE_CONSEQUENCE
    Flagship,
    Camera,
    Gaming,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_serializes_to_screaming_snake_names() {
        assert_eq!(
            serde_json::to_value(Phase::Level1PhoneConsequence).unwrap(),
            serde_json::json!("LEVEL_1_PHONE_CONSEQUENCE")
        );
        assert_eq!(
            serde_json::to_value(Phase::Contract).unwrap(),
            serde_json::json!("CONTRACT")
        );
    }

    #[test]
    fn test_choice_round_trips_through_control_ids() {
        let choice: ChoiceId = serde_json::from_value(serde_json::json!("10%")).unwrap();
        assert_eq!(choice, ChoiceId::TenPercent);
        assert_eq!(
            serde_json::to_value(ChoiceId::Flagship).unwrap(),
            serde_json::json!("Flagship")
        );
    }

    #[test]
    fn test_only_pick_three_phases_are_consequences() {
        assert!(Phase::Level1Consequence.is_consequence());
        assert!(Phase::Level1PhoneConsequence.is_consequence());
        assert!(!Phase::UsageGap.is_consequence());
        assert!(!Phase::CareerLeverage.is_consequence());
    }
}
