//! In-memory event storage.
//!
//! Session streams live only as long as the process; there is no durable
//! persistence. Streams are keyed by session id and guarded by optimistic
//! concurrency on the last known sequence number.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use promptcoach_core::error::DomainError;
use promptcoach_core::repository::{EventRepository, StoredEvent};
use uuid::Uuid;

/// Process-local event repository backed by a map of streams.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    streams: Mutex<HashMap<Uuid, Vec<StoredEvent>>>,
}

impl InMemoryEventRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, Vec<StoredEvent>>>, DomainError> {
        self.streams
            .lock()
            .map_err(|_| DomainError::Infrastructure("event store lock poisoned".to_owned()))
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let streams = self.lock()?;
        Ok(streams.get(&aggregate_id).cloned().unwrap_or_default())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        if events.is_empty() {
            return Ok(());
        }
        let mut streams = self.lock()?;
        let stream = streams.entry(aggregate_id).or_default();
        let actual = stream.last().map_or(0, |event| event.sequence_number);
        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                session_id: aggregate_id,
                expected: expected_version,
                actual,
            });
        }
        stream.extend_from_slice(events);
        Ok(())
    }

    async fn remove_stream(&self, aggregate_id: Uuid) -> Result<(), DomainError> {
        let mut streams = self.lock()?;
        streams.remove(&aggregate_id);
        Ok(())
    }
}
