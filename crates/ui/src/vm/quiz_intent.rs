use quiz_core::model::{Difficulty, OptionLabel};

/// User actions dispatched from the quiz page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    ContentChanged(String),
    SubjectChanged(String),
    DifficultyChanged(Difficulty),
    CountChanged(CountInput),
    Generate,
    Select { question: usize, label: OptionLabel },
    Submit,
    Retake,
    DismissNotice,
}

/// Parsed value of the question-count field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountInput {
    Auto,
    Manual(u32),
    Invalid,
}

impl CountInput {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CountInput::Auto;
        }
        match trimmed.parse::<u32>() {
            Ok(value) => CountInput::Manual(value),
            Err(_) => CountInput::Invalid,
        }
    }
}
