//! Prompt Coach — Onboarding bounded context.
//!
//! Responsible for the mascot-driven onboarding flow: the phase state
//! machine, the fixed dialogue script, delayed auto-advance scheduling,
//! and the call-to-action notification hand-off.

pub mod application;
pub mod domain;
