//! Aggregate root for the Onboarding context.
//!
//! `OnboardingSession` is the single mutable record of a running session.
//! Command methods validate input against the current phase and produce
//! events; anything not defined for the current phase (including duplicate
//! consequence picks) produces no events at all. State mutation happens
//! only in [`AggregateRoot::apply`] during reconstitution.

use promptcoach_core::aggregate::AggregateRoot;
use promptcoach_core::clock::Clock;
use promptcoach_core::event::EventMetadata;
use uuid::Uuid;

use super::commands::FollowUpAdvance;
use super::events::{
    CallToActionConfirmed, DialogueRewritten, OnboardingEvent, OnboardingEventKind, OptionPicked,
    PhaseAdvanced, SessionStarted,
};
use super::phase::{ChoiceId, Mood, Phase};
use super::script;

/// The aggregate root for an onboarding session.
#[derive(Debug)]
pub struct OnboardingSession {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// Current phase.
    pub(crate) phase: Phase,
    /// Current mascot mood.
    pub(crate) mood: Mood,
    /// Current dialogue text.
    pub(crate) dialogue: String,
    /// Incremented on every dialogue change; the presentation layer keys
    /// its reveal animation off this.
    pub(crate) revision: u64,
    /// Ordered picks within the current consequence sub-phase.
    pub(crate) selections: Vec<ChoiceId>,
    /// The CONTRACT framing line has been shown.
    contract_framed: bool,
    /// A CAREER_LEVERAGE goal has been picked at least once.
    leverage_chosen: bool,
    /// A scheduled auto-advance is pending for the current phase.
    awaiting_auto_advance: bool,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<OnboardingEvent>,
}

impl OnboardingSession {
    /// Creates a new, not-yet-started session.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            phase: Phase::Contract,
            mood: Mood::Base,
            dialogue: String::new(),
            revision: 0,
            selections: Vec::new(),
            contract_framed: false,
            leverage_chosen: false,
            awaiting_auto_advance: false,
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the current mascot mood.
    #[must_use]
    pub const fn mood(&self) -> Mood {
        self.mood
    }

    /// Returns the current dialogue text.
    #[must_use]
    pub fn dialogue(&self) -> &str {
        &self.dialogue
    }

    /// Returns the dialogue revision counter.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the picks made within the current consequence sub-phase.
    #[must_use]
    pub fn selections(&self) -> &[ChoiceId] {
        &self.selections
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn record(&mut self, kind: OnboardingEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let event = OnboardingEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.uncommitted_events.push(event);
    }

    fn record_advance(
        &mut self,
        to: Phase,
        mood: Mood,
        dialogue: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let event = OnboardingEventKind::PhaseAdvanced(PhaseAdvanced {
            session_id: self.id,
            from: self.phase,
            to,
            mood,
            dialogue: dialogue.to_owned(),
        });
        self.record(event, correlation_id, clock);
    }

    fn record_rewrite(&mut self, mood: Mood, dialogue: &str, correlation_id: Uuid, clock: &dyn Clock) {
        let event = OnboardingEventKind::DialogueRewritten(DialogueRewritten {
            session_id: self.id,
            mood,
            dialogue: dialogue.to_owned(),
        });
        self.record(event, correlation_id, clock);
    }

    /// Starts the session, producing a `SessionStarted` event.
    pub fn start(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        let event = OnboardingEventKind::SessionStarted(SessionStarted {
            session_id: self.id,
        });
        self.record(event, correlation_id, clock);
    }

    /// Handles a confirm click. The effect depends on the current phase;
    /// a confirm with no meaning in the current phase is a no-op.
    pub fn confirm(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Option<FollowUpAdvance> {
        match self.phase {
            Phase::Contract if !self.contract_framed => {
                self.record_rewrite(Mood::Base, script::CONTRACT_FRAMING, correlation_id, clock);
                None
            }
            Phase::Contract => {
                self.record_advance(
                    Phase::UsageGap,
                    Mood::Base,
                    script::USAGE_GAP_PROMPT,
                    correlation_id,
                    clock,
                );
                None
            }
            Phase::CareerLeverage if self.leverage_chosen => {
                self.record_advance(
                    Phase::Level1Setup,
                    Mood::Base,
                    script::PROMPT_CHECK,
                    correlation_id,
                    clock,
                );
                None
            }
            Phase::Level1Final => {
                self.record_advance(
                    Phase::Level1PhoneSetup,
                    Mood::Exhausted,
                    script::PROMPT_CHECK,
                    correlation_id,
                    clock,
                );
                None
            }
            Phase::Level1PhoneFinal => {
                self.record_advance(
                    Phase::Level1Complete,
                    Mood::Solid,
                    script::CLOSING_LINE,
                    correlation_id,
                    clock,
                );
                Some(FollowUpAdvance {
                    delay: script::NEXT_LEVEL_TEASER_DELAY,
                })
            }
            _ => None,
        }
    }

    /// Handles a multiple-choice pick. Unknown choices for the current
    /// phase, duplicate consequence picks, and picks made while an
    /// auto-advance is already pending are all no-ops.
    pub fn choose(
        &mut self,
        choice: ChoiceId,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Option<FollowUpAdvance> {
        match self.phase {
            Phase::UsageGap if !self.awaiting_auto_advance => {
                let (mood, line) = script::usage_gap_reaction(choice)?;
                self.record_rewrite(mood, line, correlation_id, clock);
                Some(FollowUpAdvance {
                    delay: script::USAGE_GAP_ADVANCE_DELAY,
                })
            }
            Phase::CareerLeverage => {
                let line = script::career_reaction(choice)?;
                self.record_rewrite(Mood::Solid, line, correlation_id, clock);
                None
            }
            Phase::Level1Consequence | Phase::Level1PhoneConsequence => {
                if self.selections.contains(&choice)
                    || self.selections.len() >= script::MAX_SELECTIONS
                {
                    return None;
                }
                let (mood, line) = script::consequence_reaction(self.phase, choice)?;
                let event = OnboardingEventKind::OptionPicked(OptionPicked {
                    session_id: self.id,
                    choice,
                    mood,
                    dialogue: line.to_owned(),
                });
                self.record(event, correlation_id, clock);

                if self.selections.len() + 1 == script::MAX_SELECTIONS {
                    let delay = if self.phase == Phase::Level1Consequence {
                        script::JAGUAR_VERDICT_ADVANCE_DELAY
                    } else {
                        script::PHONE_VERDICT_ADVANCE_DELAY
                    };
                    Some(FollowUpAdvance { delay })
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Handles a yes/no answer to "is this a good prompt?". Only
    /// meaningful in the two setup phases.
    pub fn answer(
        &mut self,
        is_good: bool,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Option<FollowUpAdvance> {
        match self.phase {
            Phase::Level1Setup => {
                let (mood, line) = script::jaguar_check_reaction(is_good);
                self.record_advance(Phase::Level1Reaction, mood, line, correlation_id, clock);
                Some(FollowUpAdvance {
                    delay: script::JAGUAR_REACTION_ADVANCE_DELAY,
                })
            }
            Phase::Level1PhoneSetup => {
                let (mood, line) = script::phone_check_reaction(is_good);
                self.record_advance(Phase::Level1PhoneReaction, mood, line, correlation_id, clock);
                Some(FollowUpAdvance {
                    delay: script::PHONE_REACTION_ADVANCE_DELAY,
                })
            }
            _ => None,
        }
    }

    /// Confirms the final call-to-action. Returns `true` if the click was
    /// accepted (session is in the terminal phase).
    pub fn confirm_call_to_action(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        if self.phase == Phase::Level1Complete {
            let event = OnboardingEventKind::CallToActionConfirmed(CallToActionConfirmed {
                session_id: self.id,
            });
            self.record(event, correlation_id, clock);
            true
        } else {
            false
        }
    }

    /// Resolves the pending auto-advance for the current phase. Issued
    /// only by the scheduler; a no-op when nothing is pending.
    pub fn advance_reaction(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        if !self.awaiting_auto_advance {
            return;
        }
        match self.phase {
            Phase::UsageGap => self.record_advance(
                Phase::CareerLeverage,
                Mood::Base,
                script::CAREER_PROMPT,
                correlation_id,
                clock,
            ),
            Phase::Level1Reaction => self.record_advance(
                Phase::Level1Consequence,
                Mood::Base,
                script::JAGUAR_PROMPT,
                correlation_id,
                clock,
            ),
            Phase::Level1Consequence => self.record_advance(
                Phase::Level1Final,
                Mood::Exhausted,
                script::JAGUAR_VERDICT,
                correlation_id,
                clock,
            ),
            Phase::Level1PhoneReaction => self.record_advance(
                Phase::Level1PhoneConsequence,
                Mood::Base,
                script::PHONE_PROMPT,
                correlation_id,
                clock,
            ),
            Phase::Level1PhoneConsequence => self.record_advance(
                Phase::Level1PhoneFinal,
                Mood::Exhausted,
                script::PHONE_VERDICT,
                correlation_id,
                clock,
            ),
            Phase::Level1Complete => {
                self.record_rewrite(Mood::Solid, script::NEXT_LEVEL_TEASER, correlation_id, clock);
            }
            _ => {}
        }
    }
}

impl AggregateRoot for OnboardingSession {
    type Event = OnboardingEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            OnboardingEventKind::SessionStarted(_) => {
                self.phase = Phase::Contract;
                self.mood = Mood::Base;
                self.dialogue = script::OPENING_LINE.to_owned();
                self.revision = 0;
            }
            OnboardingEventKind::DialogueRewritten(payload) => {
                self.mood = payload.mood;
                self.dialogue.clone_from(&payload.dialogue);
                self.revision += 1;
                match self.phase {
                    Phase::Contract => self.contract_framed = true,
                    Phase::UsageGap => self.awaiting_auto_advance = true,
                    Phase::CareerLeverage => self.leverage_chosen = true,
                    // The teaser consumed the pending auto-advance.
                    Phase::Level1Complete => self.awaiting_auto_advance = false,
                    _ => {}
                }
            }
            OnboardingEventKind::PhaseAdvanced(payload) => {
                self.phase = payload.to;
                self.mood = payload.mood;
                self.dialogue.clone_from(&payload.dialogue);
                self.revision += 1;
                if payload.to.is_consequence() {
                    self.selections.clear();
                }
                self.awaiting_auto_advance = matches!(
                    payload.to,
                    Phase::Level1Reaction | Phase::Level1PhoneReaction | Phase::Level1Complete
                );
            }
            OnboardingEventKind::OptionPicked(payload) => {
                self.selections.push(payload.choice);
                self.mood = payload.mood;
                self.dialogue.clone_from(&payload.dialogue);
                self.revision += 1;
                self.awaiting_auto_advance = self.selections.len() >= script::MAX_SELECTIONS;
            }
            OnboardingEventKind::CallToActionConfirmed(_) => {}
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
