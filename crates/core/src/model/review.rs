use serde::{Deserialize, Serialize};

use crate::model::{AnswerLetter, AnswerOption, Question};

//
// ─── INCORRECT ANSWER ─────────────────────────────────────────────────────────
//

/// Record of one incorrectly answered question.
///
/// Built exactly once, from the question that was active at submission
/// time, and immutable afterwards. Field names on the wire follow the
/// persisted record format (`question`, `selectedAnswer`, `correctAnswer`,
/// `answers`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncorrectAnswer {
    /// One-based display identifier of the question.
    pub question_id: u32,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(rename = "selectedAnswer")]
    pub selected: AnswerLetter,
    #[serde(rename = "correctAnswer")]
    pub correct: AnswerLetter,
    #[serde(rename = "answers")]
    pub options: Vec<AnswerOption>,
}

impl IncorrectAnswer {
    /// Captures a wrong answer against the question it was given for.
    #[must_use]
    pub fn from_question(question: &Question, selected: AnswerLetter) -> Self {
        Self {
            question_id: question.id().display(),
            prompt: question.prompt().to_owned(),
            selected,
            correct: question.correct(),
            options: question.options().to_vec(),
        }
    }

    /// Option text for a letter, or `None` when the record has no such
    /// option. Option sets are always exactly A-D in practice; the lookup
    /// still degrades to "display nothing" rather than failing.
    #[must_use]
    pub fn option_text(&self, letter: AnswerLetter) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.letter == letter)
            .map(|option| option.text.as_str())
    }
}

//
// ─── REVIEW LOG ───────────────────────────────────────────────────────────────
//

/// Append-only sequence of incorrect answers for the active session.
///
/// Cleared only on restart/exit; the review view reads it in append order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewLog {
    entries: Vec<IncorrectAnswer>,
}

impl ReviewLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: IncorrectAnswer) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in append order.
    #[must_use]
    pub fn entries(&self) -> &[IncorrectAnswer] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionId;

    fn build_question() -> Question {
        Question::new(
            QuestionId::new(4),
            "T1B05",
            "Which option is third?",
            [
                "alpha".to_string(),
                "beta".to_string(),
                "gamma".to_string(),
                "delta".to_string(),
            ],
            3,
        )
        .unwrap()
    }

    #[test]
    fn record_captures_question_at_submission_time() {
        let question = build_question();
        let record = IncorrectAnswer::from_question(&question, AnswerLetter::A);

        assert_eq!(record.question_id, 5);
        assert_eq!(record.prompt, "Which option is third?");
        assert_eq!(record.selected, AnswerLetter::A);
        assert_eq!(record.correct, AnswerLetter::C);
        assert_eq!(record.options.len(), 4);
    }

    #[test]
    fn option_lookup_degrades_gracefully() {
        let question = build_question();
        let mut record = IncorrectAnswer::from_question(&question, AnswerLetter::B);

        assert_eq!(record.option_text(AnswerLetter::C), Some("gamma"));

        // An absent letter yields nothing, not a panic.
        record.options.retain(|option| option.letter != AnswerLetter::D);
        assert_eq!(record.option_text(AnswerLetter::D), None);
    }

    #[test]
    fn log_preserves_append_order_until_cleared() {
        let question = build_question();
        let mut log = ReviewLog::new();
        log.push(IncorrectAnswer::from_question(&question, AnswerLetter::A));
        log.push(IncorrectAnswer::from_question(&question, AnswerLetter::B));

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].selected, AnswerLetter::A);
        assert_eq!(log.entries()[1].selected, AnswerLetter::B);

        log.clear();
        assert!(log.is_empty());
    }
}
