use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use quiz_core::model::{Question, QuestionBank, QuestionError, QuestionId};

/// Errors while loading the static question-bank resource.
///
/// A load failure leaves the bank empty; the session cannot start until a
/// bank is available.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question {id} is invalid: {source}")]
    Question {
        id: u32,
        #[source]
        source: QuestionError,
    },
}

/// Raw on-disk shape of one question: `{id, qn, qt, at1..at4, ca}`.
#[derive(Debug, Deserialize)]
struct QuestionRow {
    id: u32,
    qn: String,
    qt: String,
    at1: String,
    at2: String,
    at3: String,
    at4: String,
    #[serde(deserialize_with = "de_correct_index")]
    ca: u8,
}

#[derive(Debug, Deserialize)]
struct BankFile {
    questions: Vec<QuestionRow>,
}

/// The source data stores `ca` either as a number or a numeric string.
fn de_correct_index<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u8),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse::<u8>().map_err(serde::de::Error::custom),
    }
}

impl QuestionRow {
    fn into_question(self) -> Result<Question, BankLoadError> {
        let id = self.id;
        Question::new(
            QuestionId::new(id),
            self.qn,
            self.qt,
            [self.at1, self.at2, self.at3, self.at4],
            self.ca,
        )
        .map_err(|source| BankLoadError::Question { id, source })
    }
}

/// Parse a question bank from its JSON text.
///
/// # Errors
///
/// Returns `BankLoadError::Parse` for malformed JSON and
/// `BankLoadError::Question` when a row carries a correct-option index
/// outside 1-4.
pub fn parse_question_bank(json: &str) -> Result<QuestionBank, BankLoadError> {
    let file: BankFile = serde_json::from_str(json)?;
    let questions = file
        .questions
        .into_iter()
        .map(QuestionRow::into_question)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(QuestionBank::new(questions))
}

/// Load the question bank from a JSON file.
///
/// # Errors
///
/// Returns `BankLoadError` if the file cannot be read or parsed.
pub async fn load_question_bank(path: &Path) -> Result<QuestionBank, BankLoadError> {
    let json = tokio::fs::read_to_string(path).await?;
    let bank = parse_question_bank(&json)?;
    tracing::debug!(questions = bank.len(), path = %path.display(), "loaded question bank");
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::AnswerLetter;

    const BANK_JSON: &str = r#"{
        "questions": [
            {
                "id": 0,
                "qn": "T1A01",
                "qt": "Which agency regulates amateur radio?",
                "at1": "FCC",
                "at2": "FAA",
                "at3": "ITU",
                "at4": "NTIA",
                "ca": 1
            },
            {
                "id": 1,
                "qn": "T1A02",
                "qt": "What does CW stand for?",
                "at1": "Clockwise",
                "at2": "Carrier wave",
                "at3": "Continuous wave",
                "at4": "Call wait",
                "ca": "3"
            }
        ]
    }"#;

    #[test]
    fn parses_bank_rows_into_questions() {
        let bank = parse_question_bank(BANK_JSON).unwrap();
        assert_eq!(bank.len(), 2);

        let first = bank.get(0).unwrap();
        assert_eq!(first.number(), "T1A01");
        assert_eq!(first.correct(), AnswerLetter::A);

        // `ca` given as a string still parses.
        let second = bank.get(1).unwrap();
        assert_eq!(second.correct(), AnswerLetter::C);
        assert_eq!(second.option_text(AnswerLetter::C), "Continuous wave");
    }

    #[test]
    fn out_of_range_correct_index_fails_load() {
        let json = r#"{
            "questions": [
                {"id": 0, "qn": "T1A01", "qt": "Q", "at1": "a", "at2": "b", "at3": "c", "at4": "d", "ca": 7}
            ]
        }"#;
        let err = parse_question_bank(json).unwrap_err();
        assert!(matches!(err, BankLoadError::Question { id: 0, .. }));
    }

    #[test]
    fn malformed_json_fails_load() {
        assert!(matches!(
            parse_question_bank("{"),
            Err(BankLoadError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_reports_io_error() {
        let err = load_question_bank(Path::new("/nonexistent/bank.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, BankLoadError::Io(_)));
    }
}
