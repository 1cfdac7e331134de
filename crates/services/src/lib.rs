#![forbid(unsafe_code)]

pub mod error;
pub mod question_service;
pub mod quiz_controller;
pub mod retry;
pub mod scripted;
mod wire;

pub use error::{QuestionServiceConfigError, QuestionServiceError, QuizError};
pub use question_service::{
    CheckRequest, GenerateRequest, GeneratedQuiz, HttpQuestionService, QuestionService,
    QuestionServiceConfig,
};
pub use quiz_controller::{Grading, Notice, NoticeKind, QuizController};
pub use retry::{Backoff, RetryPolicy, generate_with_retry};
pub use scripted::{AnswerKeyEntry, ScriptedGenerate, ScriptedGrading, ScriptedQuestionService};
