mod engine;
mod feedback;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use engine::{
    AdvanceToken, AnswerFeedback, CORRECT_FEEDBACK_DELAY, FinalizeReason,
    INCORRECT_FEEDBACK_DELAY, SessionEngine, SessionPhase,
};
pub use feedback::FeedbackTimer;
pub use view::{QuestionView, QuizIntent, ScoreView, SessionView};
pub use workflow::{QuizLoopService, QuizNotice, SaveOutcome};
