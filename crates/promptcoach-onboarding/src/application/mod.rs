//! Application layer for the Onboarding context.

pub mod command_handlers;
pub mod query_handlers;
pub mod session_service;
