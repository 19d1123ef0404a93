use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Data-integrity errors for question construction and letter parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("correct-option index {0} is outside 1-4")]
    CorrectIndexOutOfRange(u8),

    #[error("answer letter {0:?} is outside A-D")]
    InvalidLetter(char),
}

//
// ─── ANSWER LETTER ────────────────────────────────────────────────────────────
//

/// Positional answer letter for a four-option question.
///
/// Letters map to option positions through a fixed table: option 1 is `A`
/// through option 4 is `D`. There is deliberately no arithmetic on character
/// codes; an index outside 1-4 is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    /// All letters in option order.
    pub const ALL: [AnswerLetter; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Converts a one-based option index (1-4) to a letter.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::CorrectIndexOutOfRange` for any other value.
    pub fn from_index(index: u8) -> Result<Self, QuestionError> {
        match index {
            1 => Ok(Self::A),
            2 => Ok(Self::B),
            3 => Ok(Self::C),
            4 => Ok(Self::D),
            other => Err(QuestionError::CorrectIndexOutOfRange(other)),
        }
    }

    /// Parses a letter from a character, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidLetter` for anything outside A-D.
    pub fn from_char(value: char) -> Result<Self, QuestionError> {
        match value.to_ascii_uppercase() {
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            'C' => Ok(Self::C),
            'D' => Ok(Self::D),
            other => Err(QuestionError::InvalidLetter(other)),
        }
    }

    /// Zero-based option position for this letter.
    #[must_use]
    pub fn position(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

//
// ─── ANSWER OPTION ────────────────────────────────────────────────────────────
//

/// Derived view of one answer option: its positional letter plus text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub letter: AnswerLetter,
    pub text: String,
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// One multiple-choice question from the bank.
///
/// Immutable once loaded. The correct option is stored as an
/// [`AnswerLetter`], so an out-of-range correct index can never reach
/// scoring; `new` is the only place the raw 1-4 index is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    number: String,
    prompt: String,
    options: [String; 4],
    correct: AnswerLetter,
}

impl Question {
    /// Builds a question, validating the one-based correct-option index.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::CorrectIndexOutOfRange` if `correct_index`
    /// is outside 1-4.
    pub fn new(
        id: QuestionId,
        number: impl Into<String>,
        prompt: impl Into<String>,
        options: [String; 4],
        correct_index: u8,
    ) -> Result<Self, QuestionError> {
        let correct = AnswerLetter::from_index(correct_index)?;
        Ok(Self {
            id,
            number: number.into(),
            prompt: prompt.into(),
            options,
            correct,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Display number from the source data (e.g. "T1A01").
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct(&self) -> AnswerLetter {
        self.correct
    }

    /// Text of the option at the given letter's position.
    #[must_use]
    pub fn option_text(&self, letter: AnswerLetter) -> &str {
        &self.options[letter.position()]
    }

    /// The four lettered options in positional order.
    #[must_use]
    pub fn options(&self) -> [AnswerOption; 4] {
        AnswerLetter::ALL.map(|letter| AnswerOption {
            letter,
            text: self.options[letter.position()].clone(),
        })
    }

    /// Returns true when `letter` selects the correct option.
    #[must_use]
    pub fn is_correct(&self, letter: AnswerLetter) -> bool {
        letter == self.correct
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//
