use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use quiz_core::Clock;
use quiz_core::model::{
    AnswerLetter, IncorrectAnswer, Question, QuestionBank, ReviewLog, Score, SessionId,
    SessionRecord,
};

use crate::draw_pool::DrawPool;
use crate::error::SessionError;
use crate::session_id::SessionIdSource;

/// Feedback window after a correct answer.
pub const CORRECT_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);
/// Feedback window after an incorrect answer.
pub const INCORRECT_FEEDBACK_DELAY: Duration = Duration::from_millis(4000);

//
// ─── PHASES & TOKENS ──────────────────────────────────────────────────────────
//

/// Lifecycle phase of the session engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    Active,
    Reviewing,
}

/// Why a session is being finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeReason {
    Restart,
    Exit,
}

/// Handle identifying one scheduled auto-advance.
///
/// [`SessionEngine::advance`] only acts when the token matches the feedback
/// window that is still pending, so a timer callback that survives `skip`
/// or a reset can never advance against a question that already changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceToken(u64);

/// Outcome of a scored submission, including the feedback window the host
/// should schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub selected: AnswerLetter,
    pub correct: AnswerLetter,
    pub is_correct: bool,
    pub delay: Duration,
    pub token: AdvanceToken,
}

#[derive(Debug, Clone, Copy)]
struct PendingFeedback {
    token: AdvanceToken,
}

//
// ─── SESSION ENGINE ───────────────────────────────────────────────────────────
//

/// State machine for one interactive quiz session.
///
/// Owns the score, draw pool, review log, current question and session
/// identifier. All transitions are synchronous; the hosting event loop
/// invokes them strictly sequentially, so no internal locking is needed.
/// The async parts (feedback delay, persistence) live in the workflow
/// layer.
pub struct SessionEngine {
    bank: Arc<QuestionBank>,
    clock: Clock,
    ids: SessionIdSource,
    session_id: SessionId,
    phase: SessionPhase,
    pool: DrawPool,
    current: Option<usize>,
    score: Score,
    review_log: ReviewLog,
    pending: Option<PendingFeedback>,
    next_token: u64,
}

impl SessionEngine {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, clock: Clock) -> Self {
        let ids = SessionIdSource::new();
        let session_id = ids.next(clock.now());
        Self {
            bank,
            clock,
            ids,
            session_id,
            phase: SessionPhase::NotStarted,
            pool: DrawPool::new(),
            current: None,
            score: Score::zero(),
            review_log: ReviewLog::new(),
            pending: None,
            next_token: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn review_log(&self) -> &ReviewLog {
        &self.review_log
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.and_then(|index| self.bank.get(index))
    }

    /// Questions still unseen in the current round.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pool.remaining()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.bank.len()
    }

    /// True while an answer's feedback window is open; submissions are
    /// ignored until the scheduled advance (or a skip) closes it.
    #[must_use]
    pub fn feedback_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin a new session: refill the pool, reset the score, clear the
    /// review log and draw the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotReady` when the bank is empty (the caller
    /// waits for the bank to load) and `SessionError::AlreadyStarted` when
    /// a session is in progress.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::NotStarted {
            return Err(SessionError::AlreadyStarted);
        }
        if self.bank.is_empty() {
            return Err(SessionError::NotReady);
        }

        self.pool.refill(&self.bank);
        self.score = Score::zero();
        self.review_log.clear();
        self.current = self.pool.draw_random(&self.bank);
        self.phase = SessionPhase::Active;
        tracing::debug!(session_id = %self.session_id, "session started");
        Ok(())
    }

    /// Score an answer against the current question.
    ///
    /// Returns `None` when the intent is ignored: outside `Active`, with no
    /// current question, or while a feedback window is already open (input
    /// debouncing). On a scored submission the review log is extended for a
    /// wrong answer and the caller receives the feedback window to
    /// schedule.
    pub fn submit_answer(&mut self, letter: AnswerLetter) -> Option<AnswerFeedback> {
        if self.phase != SessionPhase::Active || self.pending.is_some() {
            return None;
        }
        let question = self.current.and_then(|index| self.bank.get(index))?;

        let correct = question.correct();
        let is_correct = question.is_correct(letter);
        if !is_correct {
            self.review_log
                .push(IncorrectAnswer::from_question(question, letter));
        }
        self.score.record(is_correct);

        self.next_token += 1;
        let token = AdvanceToken(self.next_token);
        self.pending = Some(PendingFeedback { token });

        let delay = if is_correct {
            CORRECT_FEEDBACK_DELAY
        } else {
            INCORRECT_FEEDBACK_DELAY
        };
        Some(AnswerFeedback {
            selected: letter,
            correct,
            is_correct,
            delay,
            token,
        })
    }

    /// Close the feedback window identified by `token` and move to the next
    /// question.
    ///
    /// Returns `false` for a stale token (the window was superseded by
    /// `skip`, a reset, or a newer submission). The advance also applies
    /// while `Reviewing`: the underlying question changes silently and is
    /// shown on resume.
    pub fn advance(&mut self, token: AdvanceToken) -> bool {
        match self.pending {
            Some(pending) if pending.token == token => {}
            _ => return false,
        }
        self.pending = None;
        self.current = self.pool.draw_random(&self.bank);
        true
    }

    /// Move to the next question without scoring, superseding any open
    /// feedback window.
    pub fn skip(&mut self) -> bool {
        if self.phase != SessionPhase::Active || self.current.is_none() {
            return false;
        }
        self.pending = None;
        self.current = self.pool.draw_random(&self.bank);
        true
    }

    /// Switch to reviewing incorrect answers. Score, pool and log are
    /// untouched.
    pub fn enter_review(&mut self) -> bool {
        if self.phase != SessionPhase::Active {
            return false;
        }
        self.phase = SessionPhase::Reviewing;
        true
    }

    /// Return from the review view to the running quiz.
    pub fn resume(&mut self) -> bool {
        if self.phase != SessionPhase::Reviewing {
            return false;
        }
        self.phase = SessionPhase::Active;
        true
    }

    /// Build a checkpoint record of the session so far.
    ///
    /// Returns `None` when there is nothing to save (empty review log).
    /// State is not modified; this backs the manual save.
    #[must_use]
    pub fn snapshot_record(&self) -> Option<SessionRecord> {
        if self.review_log.is_empty() {
            return None;
        }
        Some(SessionRecord::new(
            self.session_id.clone(),
            self.clock.now(),
            self.score,
            self.review_log.entries().to_vec(),
        ))
    }

    /// Finalize the session and reset.
    ///
    /// Returns the record to persist when the review log is non-empty; the
    /// reset proceeds regardless of whether persistence later succeeds. A
    /// new session identifier is generated either way. `Restart` refills
    /// the pool and keeps playing; `Exit` empties everything and returns to
    /// `NotStarted`. Ignored (returns `None`) when no session is running.
    pub fn finalize(&mut self, reason: FinalizeReason) -> Option<SessionRecord> {
        if self.phase == SessionPhase::NotStarted {
            return None;
        }

        let record = self.snapshot_record();
        self.pending = None;
        self.session_id = self.ids.next(self.clock.now());
        self.score = Score::zero();
        self.review_log.clear();

        match reason {
            FinalizeReason::Restart => {
                self.pool.refill(&self.bank);
                self.current = self.pool.draw_random(&self.bank);
                self.phase = SessionPhase::Active;
            }
            FinalizeReason::Exit => {
                self.pool.clear();
                self.current = None;
                self.phase = SessionPhase::NotStarted;
            }
        }
        tracing::debug!(reason = ?reason, session_id = %self.session_id, "session finalized");
        record
    }
}

impl fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEngine")
            .field("session_id", &self.session_id)
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("remaining", &self.pool.remaining())
            .field("review_log_len", &self.review_log.len())
            .field("feedback_pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//
