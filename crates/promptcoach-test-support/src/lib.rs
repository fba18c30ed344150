//! Shared test doubles for the promptcoach workspace.

pub mod clock;
pub mod notifier;
pub mod repository;

pub use clock::FixedClock;
pub use notifier::{FailingCtaNotifier, RecordingCtaNotifier};
pub use repository::{
    AppendCall, EmptyEventRepository, FailingEventRepository, RecordingEventRepository,
};
