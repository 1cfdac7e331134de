use thiserror::Error;

/// Validation failures for quiz domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizModelError {
    #[error("question has {count} options, at least {min} required")]
    TooFewOptions { count: usize, min: usize },

    #[error("question has {count} options, at most {max} allowed")]
    TooManyOptions { count: usize, max: usize },

    #[error("invalid option label: {0:?}")]
    InvalidLabel(String),

    #[error("quiz id must not be empty")]
    EmptyQuizId,

    #[error("a quiz needs at least one question")]
    NoQuestions,

    #[error("graded result has {actual} entries, expected {expected}")]
    ResultLengthMismatch { expected: usize, actual: usize },
}
