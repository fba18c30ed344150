//! Prompt Coach — HTTP API library.
//!
//! Exposes the router, state, and error types so integration tests can
//! assemble the same application the binary serves.

pub mod error;
pub mod routes;
pub mod state;
