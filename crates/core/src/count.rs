//! Question-count selection.
//!
//! Unless the user picks a count explicitly, the count is suggested from the
//! size of the pasted content: one question per 70 words, clamped to 1..=20.

pub const MIN_QUESTIONS: u32 = 1;
pub const MAX_QUESTIONS: u32 = 20;
pub const WORDS_PER_QUESTION: usize = 70;

#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `clamp(1, 20, floor(word_count / 70))`.
#[must_use]
pub fn suggest_question_count(text: &str) -> u32 {
    let suggested = word_count(text) / WORDS_PER_QUESTION;
    u32::try_from(suggested)
        .unwrap_or(MAX_QUESTIONS)
        .clamp(MIN_QUESTIONS, MAX_QUESTIONS)
}

/// How many questions to request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuestionCount {
    /// Derived from the content at generation time.
    #[default]
    Auto,
    /// Set by the user; always within `MIN_QUESTIONS..=MAX_QUESTIONS`.
    Manual(u32),
}

impl QuestionCount {
    /// A user-chosen count, clamped into range. The flag reports whether clamping happened.
    #[must_use]
    pub fn manual(requested: u32) -> (Self, bool) {
        let clamped = requested.clamp(MIN_QUESTIONS, MAX_QUESTIONS);
        (Self::Manual(clamped), clamped != requested)
    }

    #[must_use]
    pub fn resolve(self, content: &str) -> u32 {
        match self {
            QuestionCount::Auto => suggest_question_count(content),
            QuestionCount::Manual(count) => count,
        }
    }

    #[must_use]
    pub fn is_manual(self) -> bool {
        matches!(self, QuestionCount::Manual(_))
    }
}
