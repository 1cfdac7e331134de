use crate::error::QuizModelError;

/// Grading outcome for a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedAnswer {
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

impl GradedAnswer {
    /// Explanation to surface to the user: only for wrong answers, and only when non-blank.
    #[must_use]
    pub fn visible_explanation(&self) -> Option<&str> {
        if self.is_correct {
            return None;
        }
        self.explanation
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Graded answers, index-aligned with the quiz questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedResult {
    answers: Vec<GradedAnswer>,
}

impl GradedResult {
    /// # Errors
    ///
    /// Returns `QuizModelError::ResultLengthMismatch` when the result does not cover
    /// exactly `question_count` questions.
    pub fn new(answers: Vec<GradedAnswer>, question_count: usize) -> Result<Self, QuizModelError> {
        if answers.len() != question_count {
            return Err(QuizModelError::ResultLengthMismatch {
                expected: question_count,
                actual: answers.len(),
            });
        }
        Ok(Self { answers })
    }

    #[must_use]
    pub fn answers(&self) -> &[GradedAnswer] {
        &self.answers
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GradedAnswer> {
        self.answers.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    #[must_use]
    pub fn score(&self) -> ScoreSummary {
        ScoreSummary::from_answers(&self.answers)
    }
}

/// Aggregate score for a graded quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    correct: usize,
    total: usize,
}

impl ScoreSummary {
    #[must_use]
    pub fn from_answers(answers: &[GradedAnswer]) -> Self {
        Self {
            correct: answers.iter().filter(|a| a.is_correct).count(),
            total: answers.len(),
        }
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// `round(100 * correct / total)`, rounding halves up; 0 for an empty quiz.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        (200 * self.correct + self.total) / (2 * self.total)
    }
}
