use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;

use quiz_core::model::SessionId;

/// Opaque unique-string provider for session identifiers.
///
/// Identifiers look like `2024-01-01_10-00-00_ab12cd`: the timestamp keeps
/// persisted record files sortable by date, the random suffix keeps ids
/// unique within a second.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionIdSource;

impl SessionIdSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generate the next session identifier for the given timestamp.
    #[must_use]
    pub fn next(&self, now: DateTime<Utc>) -> SessionId {
        let suffix: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(6)
            .map(|byte| (byte as char).to_ascii_lowercase())
            .collect();
        SessionId::new(format!("{}_{suffix}", now.format("%Y-%m-%d_%H-%M-%S")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[test]
    fn id_embeds_date_and_time_parts() {
        let id = SessionIdSource::new().next(fixed_now());
        let text = id.as_str();

        assert!(text.starts_with("2023-11-14_22-13-20_"));
        let suffix = text.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(!suffix.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn consecutive_ids_differ() {
        let ids = SessionIdSource::new();
        let a = ids.next(fixed_now());
        let b = ids.next(fixed_now());
        assert_ne!(a, b);
    }
}
