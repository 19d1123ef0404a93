use rand::Rng;

use quiz_core::model::QuestionBank;

/// Mutable pool of bank positions not yet shown in the current round.
///
/// A question leaves the pool the moment it is drawn and cannot reappear
/// until the pool is exhausted. Exhaustion implicitly refills the pool from
/// the full bank *before* the draw, so the draw that triggers a refill may
/// return any question in the bank, including one shown moments earlier.
#[derive(Debug, Clone, Default)]
pub struct DrawPool {
    indices: Vec<usize>,
}

impl DrawPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the pool to contain every question in the bank.
    pub fn refill(&mut self, bank: &QuestionBank) {
        self.indices = (0..bank.len()).collect();
    }

    /// Draw a uniformly random question position and remove it from the
    /// pool, refilling from the bank first if the pool is empty.
    ///
    /// Returns `None` only when the bank itself is empty.
    pub fn draw_random(&mut self, bank: &QuestionBank) -> Option<usize> {
        if self.indices.is_empty() {
            self.refill(bank);
        }
        if self.indices.is_empty() {
            return None;
        }
        let at = rand::rng().random_range(0..self.indices.len());
        Some(self.indices.swap_remove(at))
    }

    /// Number of questions still unseen in this round.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.indices.len()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }
}
