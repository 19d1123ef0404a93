use crate::model::{Question, QuestionId};

/// Immutable ordered collection of questions, loaded once per process.
///
/// The bank owns its questions; the draw pool and session engine refer to
/// them by bank position rather than copying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// An empty bank; sessions cannot start until questions are loaded.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at the given bank position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn find(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_question(id: u32) -> Question {
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
            1,
        )
        .unwrap()
    }

    #[test]
    fn bank_preserves_order_and_identity() {
        let bank = QuestionBank::new(vec![build_question(0), build_question(1)]);
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get(1).unwrap().id(), QuestionId::new(1));
        assert_eq!(bank.find(QuestionId::new(0)).unwrap().number(), "T1A00");
        assert!(bank.find(QuestionId::new(7)).is_none());
    }

    #[test]
    fn empty_bank_reports_empty() {
        let bank = QuestionBank::empty();
        assert!(bank.is_empty());
        assert!(bank.get(0).is_none());
    }
}
