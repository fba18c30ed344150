//! The fixed dialogue script: every line the mascot can say, keyed by
//! phase and choice, plus the auto-advance pacing delays.
//!
//! Keeping the copy in data tables (rather than inline in the transition
//! code) lets the tables be tested independently of any presentation.

use std::time::Duration;

use super::phase::{ChoiceId, Mood, Phase};

/// Opening line shown when a session starts.
pub const OPENING_LINE: &str = "First came Typing. Then Googling. Now, AI.";

/// Framing line after the first CONTRACT confirm.
pub const CONTRACT_FRAMING: &str = "It's not just a tech trend. It's the new basic life skill. \
     The question isn't if you use it. It's whether you let it do the bare minimum... \
     or your best work.";

/// Question shown on entering USAGE_GAP.
pub const USAGE_GAP_PROMPT: &str = "You have a supercomputer available 24/7. Be honest — how much \
     of its actual potential are you using?";

/// Question shown on entering CAREER_LEVERAGE.
pub const CAREER_PROMPT: &str = "We're going to fix that. We're not just learning prompts. \
     We're upgrading you. What's the #1 thing you want this skill to do for your life?";

/// Question shown on entering either yes/no setup phase.
pub const PROMPT_CHECK: &str = "So... is this a good prompt?";

/// Prompt shown on entering LEVEL_1_CONSEQUENCE.
pub const JAGUAR_PROMPT: &str = "What do they mean? Pick one.";

/// Verdict shown on entering LEVEL_1_FINAL.
pub const JAGUAR_VERDICT: &str = "NOW you understand my pain. One word. Three interpretations. \
     Zero clarity. And YOU were calling me dumb?";

/// Prompt shown on entering LEVEL_1_PHONE_CONSEQUENCE.
pub const PHONE_PROMPT: &str = "What does the AI THINK you mean? Pick one.";

/// Verdict shown on entering LEVEL_1_PHONE_FINAL.
pub const PHONE_VERDICT: &str = "NOW do you see the chaos? Say 'Which phone should I buy?' and \
     the AI invents a new identity for you EVERY TIME. Rich version. Photographer version. \
     Gamer version. Meanwhile YOU just need WhatsApp and decent battery.";

/// Closing line shown on entering LEVEL_1_COMPLETE.
pub const CLOSING_LINE: &str = "Well... you didn't break the universe. And more importantly — \
     you finally saw how AI thinks.";

/// Dialogue-only teaser shown a few seconds after LEVEL_1_COMPLETE.
pub const NEXT_LEVEL_TEASER: &str = "Level 2 is where you actually learn to control me. Not with \
     magic... with structure. If you dare.";

/// Number of picks that completes a consequence sub-phase.
pub const MAX_SELECTIONS: usize = 3;

/// Pause after a USAGE_GAP reaction before advancing to CAREER_LEVERAGE.
pub const USAGE_GAP_ADVANCE_DELAY: Duration = Duration::from_millis(4000);
/// Pause in LEVEL_1_REACTION before the consequence picks appear.
pub const JAGUAR_REACTION_ADVANCE_DELAY: Duration = Duration::from_millis(3000);
/// Pause after the third jaguar pick before the verdict.
pub const JAGUAR_VERDICT_ADVANCE_DELAY: Duration = Duration::from_millis(4000);
/// Pause in LEVEL_1_PHONE_REACTION before the consequence picks appear.
pub const PHONE_REACTION_ADVANCE_DELAY: Duration = Duration::from_millis(4000);
/// Pause after the third phone pick before the verdict.
pub const PHONE_VERDICT_ADVANCE_DELAY: Duration = Duration::from_millis(5000);
/// Pause after the closing line before the next-level teaser.
pub const NEXT_LEVEL_TEASER_DELAY: Duration = Duration::from_millis(4000);

/// Mascot reaction to a USAGE_GAP pick. `None` for choices that don't
/// belong to this phase.
#[must_use]
pub fn usage_gap_reaction(choice: ChoiceId) -> Option<(Mood, &'static str)> {
    match choice {
        ChoiceId::TenPercent => Some((
            Mood::Glitch,
            "You're driving a Ferrari like a golf cart. Let's fix that.",
        )),
        ChoiceId::FiftyPercent => Some((
            Mood::Solid,
            "Perfect. You already know there's more power under the hood.",
        )),
        ChoiceId::Unsure => Some((
            Mood::Base,
            "Curiosity beats confidence. You're in the right place.",
        )),
        _ => None,
    }
}

/// Mascot reaction to a CAREER_LEVERAGE pick. The mood is always `Solid`;
/// only the line varies.
#[must_use]
pub fn career_reaction(choice: ChoiceId) -> Option<&'static str> {
    match choice {
        ChoiceId::Competence => Some("Good. We'll make complexity feel simple."),
        ChoiceId::Freedom => Some("Respect. Time is the real currency."),
        ChoiceId::Security => Some("Smart. Un-fireable is the new promoted."),
        ChoiceId::Creativity => Some("Dangerous. In a good way. Let's build."),
        _ => None,
    }
}

/// Reaction to the jaguar "is this a good prompt?" answer.
#[must_use]
pub fn jaguar_check_reaction(is_good: bool) -> (Mood, &'static str) {
    if is_good {
        (
            Mood::Glitch,
            "Oh, it is? You're sure about that? Let's verify your optimism.",
        )
    } else {
        (
            Mood::Base,
            "Smart. You smell a trap. Let's see if you're right.",
        )
    }
}

/// Reaction to the phone "is this a good prompt?" answer.
#[must_use]
pub fn phone_check_reaction(is_good: bool) -> (Mood, &'static str) {
    if is_good {
        (
            Mood::Glitch,
            "Oh you sweet summer child. You think AI magically knows your budget, needs, \
             preferences, AND soul. Let's test that optimism.",
        )
    } else {
        (
            Mood::Base,
            "Correct. We need more data than 'buy phone.' Even horoscopes are more specific.",
        )
    }
}

/// Mascot reaction to a consequence pick, keyed by phase and choice.
/// `None` for choices outside the phase's option set.
#[must_use]
pub fn consequence_reaction(phase: Phase, choice: ChoiceId) -> Option<(Mood, &'static str)> {
    match (phase, choice) {
        (Phase::Level1Consequence, ChoiceId::Animal) => Some((
            Mood::Annoyed,
            "What?! I'm trying to teach my kid about jungle animals! Why did you show me a \
             CAR before?! Dumb AI!",
        )),
        (Phase::Level1Consequence, ChoiceId::Car) => Some((
            Mood::Annoyed,
            "I said 'Jaguar.' Not 'vroom vroom machine.' My kid is doing a report on wildlife! \
             Not luxury vehicles!",
        )),
        (Phase::Level1Consequence, ChoiceId::Guitar) => Some((
            Mood::Glitch,
            "A GUITAR?! Why would I ever ask for a GUITAR?! I'm teaching about ANIMALS or \
             maybe CARS but NOT ROCK CONCERTS!",
        )),
        (Phase::Level1PhoneConsequence, ChoiceId::Flagship) => Some((
            Mood::Glitch,
            "₹80,000?! Do I LOOK like Ambani's forgotten nephew?! My budget is ₹30,000 MAX. \
             AI just assumes I'm out here swimming in generational wealth??",
        )),
        (Phase::Level1PhoneConsequence, ChoiceId::Camera) => Some((
            Mood::Annoyed,
            "108 megapixels?! Why would I need THAT? I'm not a photographer — I barely take \
             any photos. AI just assumes everyone wants to shoot documentaries!",
        )),
        (Phase::Level1PhoneConsequence, ChoiceId::Gaming) => Some((
            Mood::Exhausted,
            "A gaming phone?! Yes — that's what I need! But NOT this ₹60,000 monster! AI, my \
             budget is ₹20,000! I want PUBG, not a NASA supercomputer.",
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_percent_reaction_is_the_ferrari_line() {
        let (mood, line) = usage_gap_reaction(ChoiceId::TenPercent).unwrap();
        assert_eq!(mood, Mood::Glitch);
        assert!(line.contains("Ferrari"));
    }

    #[test]
    fn test_usage_gap_mood_mapping() {
        assert_eq!(
            usage_gap_reaction(ChoiceId::FiftyPercent).unwrap().0,
            Mood::Solid
        );
        assert_eq!(usage_gap_reaction(ChoiceId::Unsure).unwrap().0, Mood::Base);
    }

    #[test]
    fn test_usage_gap_rejects_foreign_choices() {
        assert!(usage_gap_reaction(ChoiceId::Animal).is_none());
        assert!(usage_gap_reaction(ChoiceId::Competence).is_none());
    }

    #[test]
    fn test_career_reaction_covers_all_four_goals() {
        for choice in [
            ChoiceId::Competence,
            ChoiceId::Freedom,
            ChoiceId::Security,
            ChoiceId::Creativity,
        ] {
            assert!(career_reaction(choice).is_some());
        }
        assert!(career_reaction(ChoiceId::TenPercent).is_none());
    }

    #[test]
    fn test_check_reactions_depend_on_answer() {
        assert_eq!(jaguar_check_reaction(true).0, Mood::Glitch);
        assert_eq!(jaguar_check_reaction(false).0, Mood::Base);
        assert_eq!(phone_check_reaction(true).0, Mood::Glitch);
        assert_eq!(phone_check_reaction(false).0, Mood::Base);
    }

    #[test]
    fn test_consequence_tables_are_scoped_to_their_phase() {
        assert!(consequence_reaction(Phase::Level1Consequence, ChoiceId::Animal).is_some());
        assert!(consequence_reaction(Phase::Level1Consequence, ChoiceId::Flagship).is_none());
        assert!(consequence_reaction(Phase::Level1PhoneConsequence, ChoiceId::Gaming).is_some());
        assert!(consequence_reaction(Phase::Level1PhoneConsequence, ChoiceId::Guitar).is_none());
        assert!(consequence_reaction(Phase::UsageGap, ChoiceId::Animal).is_none());
    }
}
