//! Domain error types.
//!
//! Note that a rejected player input (an action not valid for the current
//! phase, or a duplicate pick) is NOT an error: the state machine treats it
//! as a silent no-op and produces no events. The variants below cover the
//! genuinely exceptional paths only.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No event stream exists for the given session.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// Optimistic concurrency conflict.
    #[error("concurrency conflict on session {session_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The session that had the conflict.
        session_id: Uuid,
        /// The expected version.
        expected: i64,
        /// The actual version found.
        actual: i64,
    },

    /// An infrastructure error (storage, serialization).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
