use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{IncorrectAnswer, Score, SessionId};

/// Score snapshot embedded in a persisted session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordScore {
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
}

impl From<Score> for RecordScore {
    fn from(score: Score) -> Self {
        Self {
            correct: score.correct,
            total: score.total,
            percentage: score.percentage(),
        }
    }
}

/// Finalized session payload handed to the persistence gateway.
///
/// Constructed only at a session-finalizing transition (restart/exit) or a
/// manual save, then handed off and discarded. The wire shape is
/// `{sessionId, timestamp, score, incorrectAnswers}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    pub score: RecordScore,
    pub incorrect_answers: Vec<IncorrectAnswer>,
}

impl SessionRecord {
    #[must_use]
    pub fn new(
        session_id: SessionId,
        timestamp: DateTime<Utc>,
        score: Score,
        incorrect_answers: Vec<IncorrectAnswer>,
    ) -> Self {
        Self {
            session_id,
            timestamp,
            score: score.into(),
            incorrect_answers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerLetter, Question, QuestionId};
    use crate::time::fixed_now;

    fn build_question(id: u32, correct_index: u8) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("T1A{id:02}"),
            format!("Prompt {id}"),
            [
                "one".to_string(),
                "two".to_string(),
                "three".to_string(),
                "four".to_string(),
            ],
            correct_index,
        )
        .unwrap()
    }

    #[test]
    fn record_snapshots_score_with_percentage() {
        let record = SessionRecord::new(
            SessionId::new("s1"),
            fixed_now(),
            Score {
                correct: 2,
                total: 3,
            },
            Vec::new(),
        );
        assert_eq!(record.score.correct, 2);
        assert_eq!(record.score.total, 3);
        assert_eq!(record.score.percentage, 67);
    }

    #[test]
    fn record_round_trips_incorrect_answer_triples() {
        let entries = vec![
            IncorrectAnswer::from_question(&build_question(0, 1), AnswerLetter::B),
            IncorrectAnswer::from_question(&build_question(1, 3), AnswerLetter::D),
        ];
        let record = SessionRecord::new(
            SessionId::new("2024-01-01_10-00-00_ab12cd"),
            fixed_now(),
            Score {
                correct: 0,
                total: 2,
            },
            entries.clone(),
        );

        let json = serde_json::to_string_pretty(&record).unwrap();
        assert!(json.contains("\"sessionId\""));
        assert!(json.contains("\"incorrectAnswers\""));
        assert!(json.contains("\"selectedAnswer\""));

        let back: SessionRecord = serde_json::from_str(&json).unwrap();
        let triples: Vec<_> = back
            .incorrect_answers
            .iter()
            .map(|e| (e.question_id, e.selected, e.correct))
            .collect();
        let expected: Vec<_> = entries
            .iter()
            .map(|e| (e.question_id, e.selected, e.correct))
            .collect();
        assert_eq!(triples, expected);
    }
}
