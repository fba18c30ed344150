//! Domain layer: phases, dialogue script, events, commands, and the
//! session aggregate.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod phase;
pub mod script;
