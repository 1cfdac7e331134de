//! Response bodies of the question service, before validation.

use serde::Deserialize;

use quiz_core::model::{GradedAnswer, Question, QuizId};

use crate::error::QuestionServiceError;
use crate::question_service::GeneratedQuiz;

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponseBody {
    #[serde(default)]
    quiz_id: Option<String>,
    #[serde(default)]
    questions: Option<Vec<QuestionBody>>,
}

#[derive(Debug, Deserialize)]
struct QuestionBody {
    question: String,
    options: Vec<String>,
}

impl GenerateResponseBody {
    pub(crate) fn into_generated(self) -> Result<GeneratedQuiz, QuestionServiceError> {
        let questions = match self.questions {
            Some(questions) if !questions.is_empty() => questions,
            _ => return Err(QuestionServiceError::EmptyQuestions),
        };
        let quiz_id = QuizId::parse(self.quiz_id.unwrap_or_default())?;
        let questions = questions
            .into_iter()
            .map(|q| Question::new(q.question, q.options))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GeneratedQuiz { quiz_id, questions })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckResponseBody {
    #[serde(default)]
    result: Option<Vec<GradedAnswerBody>>,
}

#[derive(Debug, Deserialize)]
struct GradedAnswerBody {
    #[serde(default)]
    your_answer: String,
    correct_answer: String,
    is_correct: bool,
    #[serde(default)]
    explanation: Option<String>,
}

impl CheckResponseBody {
    pub(crate) fn into_graded(self) -> Result<Vec<GradedAnswer>, QuestionServiceError> {
        let result = self.result.ok_or(QuestionServiceError::MissingResult)?;
        Ok(result
            .into_iter()
            .map(|item| GradedAnswer {
                your_answer: item.your_answer,
                correct_answer: item.correct_answer,
                is_correct: item.is_correct,
                explanation: item.explanation,
            })
            .collect())
    }
}
