use quiz_core::model::{AnswerLetter, AnswerOption, IncorrectAnswer};

use super::engine::{SessionEngine, SessionPhase};

/// Score as presented: counts plus the rounded percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreView {
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
}

/// Presentation-agnostic snapshot of the current question card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// One-based display identifier.
    pub display_id: u32,
    /// Source question number (e.g. "T1A01").
    pub number: String,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    pub correct: AnswerLetter,
    pub total_questions: usize,
}

/// Snapshot of the whole session for the presentation boundary.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no styling or layout assumptions
///
/// The front-end formats and renders these fields as it sees fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub session_id: String,
    pub phase: SessionPhase,
    pub score: ScoreView,
    pub remaining: usize,
    pub feedback_pending: bool,
    pub question: Option<QuestionView>,
    /// Incorrect answers so far, in append order (the review view).
    pub review: Vec<IncorrectAnswer>,
}

impl SessionView {
    #[must_use]
    pub fn capture(engine: &SessionEngine) -> Self {
        let score = engine.score();
        let question = engine.current_question().map(|question| QuestionView {
            display_id: question.id().display(),
            number: question.number().to_owned(),
            prompt: question.prompt().to_owned(),
            options: question.options().to_vec(),
            correct: question.correct(),
            total_questions: engine.total_questions(),
        });

        Self {
            session_id: engine.session_id().to_string(),
            phase: engine.phase(),
            score: ScoreView {
                correct: score.correct,
                total: score.total,
                percentage: score.percentage(),
            },
            remaining: engine.remaining(),
            feedback_pending: engine.feedback_pending(),
            question,
            review: engine.review_log().entries().to_vec(),
        }
    }
}

//
// ─── INTENTS ──────────────────────────────────────────────────────────────────
//

/// User intents accepted at the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizIntent {
    Select(AnswerLetter),
    Skip,
    Review,
    Resume,
    Restart,
    Exit,
    Save,
}

impl QuizIntent {
    /// Single-key shortcut mapping: pressing A-D selects that letter, but
    /// only while no feedback is pending.
    #[must_use]
    pub fn from_key(key: char, feedback_pending: bool) -> Option<Self> {
        if feedback_pending {
            return None;
        }
        AnswerLetter::from_char(key).ok().map(Self::Select)
    }

    /// Parse a typed command word or a single answer letter.
    #[must_use]
    pub fn parse(input: &str, feedback_pending: bool) -> Option<Self> {
        let trimmed = input.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "skip" => Some(Self::Skip),
            "review" => Some(Self::Review),
            "resume" => Some(Self::Resume),
            "restart" => Some(Self::Restart),
            "exit" => Some(Self::Exit),
            "save" => Some(Self::Save),
            _ => {
                let mut chars = trimmed.chars();
                match (chars.next(), chars.next()) {
                    (Some(key), None) => Self::from_key(key, feedback_pending),
                    _ => None,
                }
            }
        }
    }
}
