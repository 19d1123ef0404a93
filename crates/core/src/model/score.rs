use serde::{Deserialize, Serialize};

/// Per-session tally of answered questions.
///
/// `correct <= total` holds by construction: the only mutation is
/// [`Score::record`], which always increments `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Records one answered question.
    pub fn record(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        }
    }

    /// Rounded percentage of correct answers; 0 when nothing is answered.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let ratio = f64::from(self.correct) / f64::from(self.total);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = (ratio * 100.0).round() as u32;
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_never_exceeds_total() {
        let mut score = Score::zero();
        for i in 0..10 {
            score.record(i % 3 == 0);
            assert!(score.correct <= score.total);
        }
        assert_eq!(score.total, 10);
        assert_eq!(score.correct, 4);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        let score = Score {
            correct: 1,
            total: 3,
        };
        assert_eq!(score.percentage(), 33);

        let score = Score {
            correct: 2,
            total: 3,
        };
        assert_eq!(score.percentage(), 67);
    }

    #[test]
    fn empty_score_is_zero_percent() {
        assert_eq!(Score::zero().percentage(), 0);
    }
}
