use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;

use quiz_core::Clock;
use quiz_core::model::{AnswerLetter, QuestionBank, SessionId};
use storage::repository::SessionRecordRepository;

use crate::error::SessionError;
use super::engine::{AnswerFeedback, FinalizeReason, SessionEngine};
use super::feedback::FeedbackTimer;
use super::view::SessionView;

/// Outcome of a manual save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { session_id: SessionId },
    /// The review log was empty; no gateway call was made.
    NothingToSave,
}

/// Later-arriving result of a fire-and-forget finalize save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizNotice {
    RecordSaved {
        session_id: SessionId,
    },
    /// The gateway rejected the record. The session was already reset by
    /// then; the loss is the documented tradeoff of finalize-and-reset.
    SaveFailed {
        session_id: SessionId,
        reason: String,
    },
}

/// Orchestrates the session engine, feedback timer and persistence.
///
/// The engine itself is synchronous; this service hosts the asynchronous
/// edges: the scheduled auto-advance after an answer and the persistence
/// calls. Persistence on restart/exit is fire-and-forget — the reset never
/// waits for the gateway — with the result delivered on the notice channel.
pub struct QuizLoopService {
    engine: Arc<Mutex<SessionEngine>>,
    timer: Mutex<FeedbackTimer>,
    records: Arc<dyn SessionRecordRepository>,
    notices: mpsc::UnboundedSender<QuizNotice>,
}

impl QuizLoopService {
    /// Build the service and the receiving end of its notice channel.
    #[must_use]
    pub fn new(
        bank: Arc<QuestionBank>,
        clock: Clock,
        records: Arc<dyn SessionRecordRepository>,
    ) -> (Self, mpsc::UnboundedReceiver<QuizNotice>) {
        let (notices, receiver) = mpsc::unbounded_channel();
        let service = Self {
            engine: Arc::new(Mutex::new(SessionEngine::new(bank, clock))),
            timer: Mutex::new(FeedbackTimer::new()),
            records,
            notices,
        };
        (service, receiver)
    }

    fn engine(&self) -> Result<MutexGuard<'_, SessionEngine>, SessionError> {
        self.engine.lock().map_err(|_| SessionError::Poisoned)
    }

    /// Start a new session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotReady` while the bank is empty and
    /// `SessionError::AlreadyStarted` when a session is running.
    pub fn start(&self) -> Result<SessionView, SessionError> {
        let mut engine = self.engine()?;
        engine.start()?;
        Ok(SessionView::capture(&engine))
    }

    /// Snapshot the current session for the presentation boundary.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the session lock is poisoned.
    pub fn view(&self) -> Result<SessionView, SessionError> {
        Ok(SessionView::capture(&*self.engine()?))
    }

    /// Submit an answer for the current question.
    ///
    /// On a scored submission the feedback timer is armed: after the
    /// correctness-dependent delay the engine advances to the next
    /// question on its own. Returns `None` when the intent was ignored
    /// (wrong phase or feedback already pending).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the session lock is poisoned.
    pub fn select(&self, letter: AnswerLetter) -> Result<Option<AnswerFeedback>, SessionError> {
        let feedback = self.engine()?.submit_answer(letter);

        if let Some(feedback) = feedback {
            let engine = Arc::clone(&self.engine);
            let token = feedback.token;
            let mut timer = self.timer.lock().map_err(|_| SessionError::Poisoned)?;
            timer.schedule(feedback.delay, async move {
                if let Ok(mut engine) = engine.lock() {
                    engine.advance(token);
                }
            });
        }
        Ok(feedback)
    }

    /// Skip the current question without scoring, cancelling any pending
    /// auto-advance first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the session lock is poisoned.
    pub fn skip(&self) -> Result<bool, SessionError> {
        self.cancel_timer()?;
        Ok(self.engine()?.skip())
    }

    /// Switch to the incorrect-answer review.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the session lock is poisoned.
    pub fn enter_review(&self) -> Result<bool, SessionError> {
        Ok(self.engine()?.enter_review())
    }

    /// Return from review to the running quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the session lock is poisoned.
    pub fn resume(&self) -> Result<bool, SessionError> {
        Ok(self.engine()?.resume())
    }

    /// Checkpoint the session record without resetting anything.
    ///
    /// The review log is preserved whether or not the gateway accepts the
    /// record.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` when the gateway rejects the record.
    pub async fn save(&self) -> Result<SaveOutcome, SessionError> {
        let Some(record) = self.engine()?.snapshot_record() else {
            return Ok(SaveOutcome::NothingToSave);
        };
        let session_id = record.session_id.clone();
        self.records.append_record(&record).await?;
        Ok(SaveOutcome::Saved { session_id })
    }

    /// Finalize and restart: persist (fire-and-forget), then begin a fresh
    /// round in `Active`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the session lock is poisoned.
    pub fn restart(&self) -> Result<(), SessionError> {
        self.finalize(FinalizeReason::Restart)
    }

    /// Finalize and exit: persist (fire-and-forget), then return to
    /// `NotStarted`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Poisoned` if the session lock is poisoned.
    pub fn exit(&self) -> Result<(), SessionError> {
        self.finalize(FinalizeReason::Exit)
    }

    fn finalize(&self, reason: FinalizeReason) -> Result<(), SessionError> {
        // A pending advance must never fire against the reset session.
        self.cancel_timer()?;
        let record = self.engine()?.finalize(reason);

        if let Some(record) = record {
            let records = Arc::clone(&self.records);
            let notices = self.notices.clone();
            tokio::spawn(async move {
                let session_id = record.session_id.clone();
                match records.append_record(&record).await {
                    Ok(()) => {
                        let _ = notices.send(QuizNotice::RecordSaved { session_id });
                    }
                    Err(err) => {
                        tracing::warn!(
                            session_id = %session_id,
                            error = %err,
                            "failed to persist session record"
                        );
                        let _ = notices.send(QuizNotice::SaveFailed {
                            session_id,
                            reason: err.to_string(),
                        });
                    }
                }
            });
        }
        Ok(())
    }

    fn cancel_timer(&self) -> Result<(), SessionError> {
        let mut timer = self.timer.lock().map_err(|_| SessionError::Poisoned)?;
        timer.cancel();
        Ok(())
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//
