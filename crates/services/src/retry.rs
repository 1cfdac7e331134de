use std::env;
use std::time::Duration;

use crate::error::{QuestionServiceError, QuizError};
use crate::question_service::{GenerateRequest, GeneratedQuiz, QuestionService};

/// Delay inserted between generation attempts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backoff {
    #[default]
    None,
    Fixed(Duration),
    /// `step * attempt`, where `attempt` is the 1-based number of the failed attempt.
    Linear(Duration),
}

impl Backoff {
    #[must_use]
    pub fn delay_after(self, attempt: u32) -> Duration {
        match self {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed(delay) => delay,
            Backoff::Linear(step) => step.saturating_mul(attempt),
        }
    }
}

/// Bounded retry for question generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Backoff,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// A policy with `max_attempts` total attempts (at least one) and no delay.
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Backoff::None,
        }
    }

    /// Reads `QUIZ_GENERATE_ATTEMPTS`, falling back to the default bound.
    #[must_use]
    pub fn from_env() -> Self {
        let attempts = env::var("QUIZ_GENERATE_ATTEMPTS")
            .ok()
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(Self::DEFAULT_MAX_ATTEMPTS);
        Self::new(attempts)
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn backoff(&self) -> Backoff {
        self.backoff
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS)
    }
}

/// Request generation until it succeeds or the policy's attempts run out.
///
/// A response with no questions counts as a failed attempt.
///
/// # Errors
///
/// Returns `QuizError::GenerationFailed` carrying the last service error once every
/// attempt has failed.
pub async fn generate_with_retry(
    service: &dyn QuestionService,
    request: &GenerateRequest,
    policy: RetryPolicy,
) -> Result<GeneratedQuiz, QuizError> {
    let mut last_error: Option<QuestionServiceError> = None;

    for attempt in 1..=policy.max_attempts() {
        let outcome = service
            .generate_questions(request)
            .await
            .and_then(|quiz| {
                if quiz.questions.is_empty() {
                    Err(QuestionServiceError::EmptyQuestions)
                } else {
                    Ok(quiz)
                }
            });

        match outcome {
            Ok(quiz) => {
                tracing::info!(
                    attempt,
                    questions = quiz.questions.len(),
                    "quiz generated"
                );
                return Ok(quiz);
            }
            Err(err) => {
                tracing::warn!(
                    attempt,
                    max = policy.max_attempts(),
                    error = %err,
                    "generation attempt failed"
                );
                last_error = Some(err);
            }
        }

        if attempt < policy.max_attempts() {
            let delay = policy.backoff().delay_after(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    Err(QuizError::GenerationFailed {
        attempts: policy.max_attempts(),
        source: last_error.unwrap_or(QuestionServiceError::EmptyQuestions),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted::{ScriptedGenerate, ScriptedQuestionService};
    use quiz_core::model::{Difficulty, Question, QuizId};

    fn request() -> GenerateRequest {
        GenerateRequest {
            content: "Some pasted text.".into(),
            count: 1,
            difficulty: Difficulty::Medium,
            subject: String::new(),
        }
    }

    fn quiz(questions: Vec<Question>) -> ScriptedGenerate {
        ScriptedGenerate::Quiz(GeneratedQuiz {
            quiz_id: QuizId::parse("quiz-1").unwrap(),
            questions,
        })
    }

    #[test]
    fn policy_has_at_least_one_attempt() {
        assert_eq!(RetryPolicy::new(0).max_attempts(), 1);
        assert_eq!(RetryPolicy::default().max_attempts(), 3);
        assert_eq!(RetryPolicy::default().backoff(), Backoff::None);
    }

    #[test]
    fn backoff_delays() {
        let step = Duration::from_millis(100);
        assert_eq!(Backoff::None.delay_after(2), Duration::ZERO);
        assert_eq!(Backoff::Fixed(step).delay_after(2), step);
        assert_eq!(Backoff::Linear(step).delay_after(3), Duration::from_millis(300));
    }

    #[tokio::test]
    async fn empty_quiz_counts_as_a_failed_attempt() {
        let question = Question::new("2+2?", vec!["3".into(), "4".into()]).unwrap();
        let service =
            ScriptedQuestionService::with_responses([quiz(Vec::new()), quiz(vec![question])], []);

        let generated = generate_with_retry(&service, &request(), RetryPolicy::default())
            .await
            .unwrap();

        assert_eq!(generated.questions.len(), 1);
        assert_eq!(service.generate_requests().len(), 2);
    }

    #[tokio::test]
    async fn only_empty_quizzes_exhaust_the_policy() {
        let service = ScriptedQuestionService::with_responses(
            [quiz(Vec::new()), quiz(Vec::new()), quiz(Vec::new())],
            [],
        );

        let err = generate_with_retry(&service, &request(), RetryPolicy::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            QuizError::GenerationFailed {
                attempts: 3,
                source: QuestionServiceError::EmptyQuestions
            }
        ));
        assert_eq!(service.generate_requests().len(), 3);
    }
}
