mod bank;
mod ids;
mod question;
mod record;
mod review;
mod score;

pub use bank::QuestionBank;
pub use ids::{ParseIdError, QuestionId, SessionId};
pub use question::{AnswerLetter, AnswerOption, Question, QuestionError};
pub use record::{RecordScore, SessionRecord};
pub use review::{IncorrectAnswer, ReviewLog};
pub use score::Score;
