#![forbid(unsafe_code)]

pub mod draw_pool;
pub mod error;
pub mod session;
pub mod session_id;

pub use quiz_core::Clock;

pub use draw_pool::DrawPool;
pub use error::SessionError;
pub use session::{
    AnswerFeedback, FinalizeReason, QuestionView, QuizIntent, QuizLoopService, QuizNotice,
    SaveOutcome, SessionEngine, SessionPhase, SessionView,
};
pub use session_id::SessionIdSource;
