mod answers;
mod grading;
mod label;
mod question;
mod session;

pub use answers::AnswerSet;
pub use grading::{GradedAnswer, GradedResult, ScoreSummary};
pub use label::OptionLabel;
pub use question::{MAX_OPTIONS, MIN_OPTIONS, Question};
pub use session::{Difficulty, QuizId, QuizSession, SessionState};
