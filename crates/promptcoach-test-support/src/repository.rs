//! Test repositories — mock `EventRepository` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use promptcoach_core::error::DomainError;
use promptcoach_core::repository::{EventRepository, StoredEvent};
use uuid::Uuid;

/// One recorded `append_events` call.
pub type AppendCall = (Uuid, i64, Vec<StoredEvent>);

/// An event repository that records all `append_events` and `remove_stream`
/// calls. Appended events become visible to subsequent `load_events` calls,
/// so a test can drive a session through several commands.
#[derive(Debug, Default)]
pub struct RecordingEventRepository {
    streams: Mutex<HashMap<Uuid, Vec<StoredEvent>>>,
    appended: Mutex<Vec<AppendCall>>,
    removed: Mutex<Vec<Uuid>>,
}

impl RecordingEventRepository {
    /// Create an empty recording repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository whose given stream starts out with `events`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_stream(aggregate_id: Uuid, events: Vec<StoredEvent>) -> Self {
        let repository = Self::default();
        repository
            .streams
            .lock()
            .unwrap()
            .insert(aggregate_id, events);
        repository
    }

    /// Returns a snapshot of all events that were appended.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn appended_events(&self) -> Vec<AppendCall> {
        self.appended.lock().unwrap().clone()
    }

    /// Returns the stream ids passed to `remove_stream`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn removed_streams(&self) -> Vec<Uuid> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventRepository for RecordingEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(self
            .streams
            .lock()
            .unwrap()
            .get(&aggregate_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        self.appended
            .lock()
            .unwrap()
            .push((aggregate_id, expected_version, events.to_vec()));
        self.streams
            .lock()
            .unwrap()
            .entry(aggregate_id)
            .or_default()
            .extend_from_slice(events);
        Ok(())
    }

    async fn remove_stream(&self, aggregate_id: Uuid) -> Result<(), DomainError> {
        self.removed.lock().unwrap().push(aggregate_id);
        self.streams.lock().unwrap().remove(&aggregate_id);
        Ok(())
    }
}

/// An event repository that always returns an empty event list and silently
/// accepts appends. Useful for testing "session not found" scenarios and
/// creation commands.
#[derive(Debug)]
pub struct EmptyEventRepository;

#[async_trait]
impl EventRepository for EmptyEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(vec![])
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Ok(())
    }

    async fn remove_stream(&self, _aggregate_id: Uuid) -> Result<(), DomainError> {
        Ok(())
    }
}

/// An event repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingEventRepository;

#[async_trait]
impl EventRepository for FailingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn remove_stream(&self, _aggregate_id: Uuid) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
