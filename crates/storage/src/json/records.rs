use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use quiz_core::model::{SessionId, SessionRecord};

use crate::repository::{SessionRecordRepository, StorageError};

/// File-backed persistence gateway.
///
/// Stores one pretty-printed JSON document per session under the records
/// directory, named `incorrect-answers-<sessionId>.json`.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    dir: PathBuf,
}

impl FileRecordStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, session_id: &SessionId) -> PathBuf {
        self.dir.join(format!("incorrect-answers-{session_id}.json"))
    }
}

#[async_trait]
impl SessionRecordRepository for FileRecordStore {
    async fn append_record(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let path = self.record_path(&record.session_id);
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        tracing::debug!(
            session_id = %record.session_id,
            path = %path.display(),
            "stored session record"
        );
        Ok(())
    }

    async fn get_record(&self, session_id: &SessionId) -> Result<SessionRecord, StorageError> {
        let path = self.record_path(session_id);
        let json = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::NotFound
            } else {
                StorageError::Io(e.to_string())
            }
        })?;
        serde_json::from_str(&json).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerLetter, IncorrectAnswer, Question, QuestionId, Score};
    use quiz_core::time::fixed_now;

    fn build_record(session_id: &str) -> SessionRecord {
        let question = Question::new(
            QuestionId::new(2),
            "T1A03",
            "Pick the second option",
            [
                "one".to_string(),
                "two".to_string(),
                "three".to_string(),
                "four".to_string(),
            ],
            2,
        )
        .unwrap();
        SessionRecord::new(
            SessionId::new(session_id),
            fixed_now(),
            Score {
                correct: 0,
                total: 1,
            },
            vec![IncorrectAnswer::from_question(&question, AnswerLetter::D)],
        )
    }

    #[tokio::test]
    async fn writes_record_file_named_by_session_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRecordStore::create(dir.path()).await.unwrap();
        let record = build_record("2024-01-01_10-00-00_ab12cd");

        store.append_record(&record).await.unwrap();

        let path = dir
            .path()
            .join("incorrect-answers-2024-01-01_10-00-00_ab12cd.json");
        assert!(path.exists());

        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("\"sessionId\""));
        assert!(text.contains("\"selectedAnswer\": \"D\""));
    }

    #[tokio::test]
    async fn round_trips_record_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRecordStore::create(dir.path()).await.unwrap();
        let record = build_record("s2");

        store.append_record(&record).await.unwrap();
        let fetched = store.get_record(&SessionId::new("s2")).await.unwrap();
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRecordStore::create(dir.path()).await.unwrap();
        let err = store.get_record(&SessionId::new("gone")).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn create_makes_records_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("incorrect_answers");
        let store = FileRecordStore::create(&nested).await.unwrap();
        assert!(store.dir().exists());
    }
}
