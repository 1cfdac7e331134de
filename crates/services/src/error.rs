//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::QuizModelError;
use quiz_core::model::{OptionLabel, SessionState};

/// Errors emitted by `QuestionService` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error("question service returned no questions")]
    EmptyQuestions,
    #[error("question service response has no grading result")]
    MissingResult,
    #[error("question service returned a malformed response: {0}")]
    Malformed(#[from] QuizModelError),
    #[error("question service is unavailable: {0}")]
    Unavailable(String),
    #[error("question service request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors building a `QuestionServiceConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionServiceConfigError {
    #[error("invalid question service base URL: {raw:?}")]
    InvalidBaseUrl { raw: String },
}

/// Errors emitted by `QuizController` transitions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("content must not be empty")]
    EmptyContent,
    #[error("cannot {action} while the quiz is {state}")]
    InvalidTransition {
        state: SessionState,
        action: &'static str,
    },
    #[error("no quiz session")]
    NoSession,
    #[error("question {index} is out of range ({len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },
    #[error("option {label} does not exist for question {index}")]
    OptionOutOfRange { index: usize, label: OptionLabel },
    #[error("question generation failed after {attempts} attempt(s)")]
    GenerationFailed {
        attempts: u32,
        #[source]
        source: QuestionServiceError,
    },
    #[error("grading failed")]
    GradingFailed(#[source] QuestionServiceError),
    #[error(transparent)]
    Model(#[from] QuizModelError),
}
