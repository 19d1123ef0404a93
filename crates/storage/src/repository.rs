use async_trait::async_trait;
use quiz_core::model::{SessionId, SessionRecord};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("i/o error: {0}")]
    Io(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persistence gateway for finalized session records.
///
/// Implementations durably store one record per session, keyed by session
/// id. Callers treat a failed append as recoverable: the in-memory review
/// log stays intact and the user is notified.
#[async_trait]
pub trait SessionRecordRepository: Send + Sync {
    /// Durably store a session record, replacing any prior record with the
    /// same session id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn append_record(&self, record: &SessionRecord) -> Result<(), StorageError>;

    /// Fetch a previously stored record by session id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_record(&self, session_id: &SessionId) -> Result<SessionRecord, StorageError>;
}

/// Simple in-memory record store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl InMemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records stored so far.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned; only reachable from tests.
    #[must_use]
    pub fn saved_count(&self) -> usize {
        self.records.lock().expect("record store lock").len()
    }
}

#[async_trait]
impl SessionRecordRepository for InMemoryRecordStore {
    async fn append_record(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(record.session_id.clone(), record.clone());
        Ok(())
    }

    async fn get_record(&self, session_id: &SessionId) -> Result<SessionRecord, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(session_id).cloned().ok_or(StorageError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Score;
    use quiz_core::time::fixed_now;

    fn build_record(session_id: &str) -> SessionRecord {
        SessionRecord::new(
            SessionId::new(session_id),
            fixed_now(),
            Score {
                correct: 1,
                total: 2,
            },
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn round_trips_record_by_session_id() {
        let store = InMemoryRecordStore::new();
        let record = build_record("s1");

        store.append_record(&record).await.unwrap();
        let fetched = store.get_record(&SessionId::new("s1")).await.unwrap();
        assert_eq!(fetched, record);
        assert_eq!(store.saved_count(), 1);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let store = InMemoryRecordStore::new();
        let err = store.get_record(&SessionId::new("nope")).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn append_replaces_record_for_same_session() {
        let store = InMemoryRecordStore::new();
        store.append_record(&build_record("s1")).await.unwrap();

        let mut updated = build_record("s1");
        updated.score.total = 5;
        store.append_record(&updated).await.unwrap();

        let fetched = store.get_record(&SessionId::new("s1")).await.unwrap();
        assert_eq!(fetched.score.total, 5);
        assert_eq!(store.saved_count(), 1);
    }
}
