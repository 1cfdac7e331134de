//! In-process `QuestionService` that replays scripted responses.
//!
//! Stands in for the HTTP service in controller and view tests. Grading compares
//! submitted labels against an answer key, case-insensitively and ignoring
//! surrounding whitespace.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use quiz_core::model::{GradedAnswer, OptionLabel};

use crate::error::QuestionServiceError;
use crate::question_service::{CheckRequest, GenerateRequest, GeneratedQuiz, QuestionService};

#[derive(Debug, Clone)]
pub enum ScriptedGenerate {
    Quiz(GeneratedQuiz),
    /// Responds like a server that produced `{ "questions": [] }`.
    NoQuestions,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKeyEntry {
    pub correct: OptionLabel,
    pub explanation: Option<String>,
}

impl AnswerKeyEntry {
    #[must_use]
    pub fn new(correct: OptionLabel) -> Self {
        Self {
            correct,
            explanation: None,
        }
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }
}

#[derive(Debug, Clone)]
pub enum ScriptedGrading {
    AnswerKey(Vec<AnswerKeyEntry>),
    Unavailable,
}

#[derive(Default)]
struct Script {
    generate: VecDeque<ScriptedGenerate>,
    grading: VecDeque<ScriptedGrading>,
    generate_requests: Vec<GenerateRequest>,
    check_requests: Vec<CheckRequest>,
}

/// Replays queued responses in order. An exhausted queue answers `Unavailable`.
#[derive(Clone, Default)]
pub struct ScriptedQuestionService {
    script: Arc<Mutex<Script>>,
}

impl ScriptedQuestionService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A service that replays `generate` and `grading` in order.
    #[must_use]
    pub fn with_responses(
        generate: impl IntoIterator<Item = ScriptedGenerate>,
        grading: impl IntoIterator<Item = ScriptedGrading>,
    ) -> Self {
        let script = Script {
            generate: generate.into_iter().collect(),
            grading: grading.into_iter().collect(),
            ..Script::default()
        };
        Self {
            script: Arc::new(Mutex::new(script)),
        }
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Unavailable` if the script lock is poisoned.
    pub fn push_generate(&self, response: ScriptedGenerate) -> Result<(), QuestionServiceError> {
        let mut script = self
            .script
            .lock()
            .map_err(|e| QuestionServiceError::Unavailable(e.to_string()))?;
        script.generate.push_back(response);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Unavailable` if the script lock is poisoned.
    pub fn push_grading(&self, response: ScriptedGrading) -> Result<(), QuestionServiceError> {
        let mut script = self
            .script
            .lock()
            .map_err(|e| QuestionServiceError::Unavailable(e.to_string()))?;
        script.grading.push_back(response);
        Ok(())
    }

    /// Generation requests received so far, oldest first.
    #[must_use]
    pub fn generate_requests(&self) -> Vec<GenerateRequest> {
        self.script
            .lock()
            .map(|script| script.generate_requests.clone())
            .unwrap_or_default()
    }

    /// Grading requests received so far, oldest first.
    #[must_use]
    pub fn check_requests(&self) -> Vec<CheckRequest> {
        self.script
            .lock()
            .map(|script| script.check_requests.clone())
            .unwrap_or_default()
    }
}

fn grade(request: &CheckRequest, key: &[AnswerKeyEntry]) -> Vec<GradedAnswer> {
    key.iter()
        .enumerate()
        .map(|(idx, entry)| {
            let your_answer = request.answers.answer_str(idx).trim().to_uppercase();
            let correct_answer = entry.correct.to_string();
            GradedAnswer {
                is_correct: your_answer == correct_answer,
                your_answer,
                correct_answer,
                explanation: entry.explanation.clone(),
            }
        })
        .collect()
}

#[async_trait]
impl QuestionService for ScriptedQuestionService {
    async fn generate_questions(
        &self,
        request: &GenerateRequest,
    ) -> Result<GeneratedQuiz, QuestionServiceError> {
        let next = {
            let mut script = self
                .script
                .lock()
                .map_err(|e| QuestionServiceError::Unavailable(e.to_string()))?;
            script.generate_requests.push(request.clone());
            script.generate.pop_front()
        };

        match next {
            Some(ScriptedGenerate::Quiz(quiz)) => Ok(quiz),
            Some(ScriptedGenerate::NoQuestions) => Err(QuestionServiceError::EmptyQuestions),
            Some(ScriptedGenerate::Unavailable) | None => Err(QuestionServiceError::Unavailable(
                "no scripted generation response".into(),
            )),
        }
    }

    async fn check_answers(
        &self,
        request: &CheckRequest,
    ) -> Result<Vec<GradedAnswer>, QuestionServiceError> {
        let next = {
            let mut script = self
                .script
                .lock()
                .map_err(|e| QuestionServiceError::Unavailable(e.to_string()))?;
            script.check_requests.push(request.clone());
            script.grading.pop_front()
        };

        match next {
            Some(ScriptedGrading::AnswerKey(key)) => Ok(grade(request, &key)),
            Some(ScriptedGrading::Unavailable) | None => Err(QuestionServiceError::Unavailable(
                "no scripted grading response".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poisoned_script_rejects_new_responses() {
        let service = ScriptedQuestionService::new();
        let holder = service.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.script.lock().unwrap();
            panic!("panic while holding the script lock");
        })
        .join();

        assert!(matches!(
            service.push_generate(ScriptedGenerate::NoQuestions),
            Err(QuestionServiceError::Unavailable(_))
        ));
        assert!(matches!(
            service.push_grading(ScriptedGrading::Unavailable),
            Err(QuestionServiceError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn replays_queued_responses_then_runs_dry() {
        let service = ScriptedQuestionService::with_responses([ScriptedGenerate::NoQuestions], []);
        service.push_grading(ScriptedGrading::Unavailable).unwrap();
        let request = GenerateRequest {
            content: "text".into(),
            count: 1,
            difficulty: quiz_core::model::Difficulty::Easy,
            subject: String::new(),
        };

        assert!(matches!(
            service.generate_questions(&request).await,
            Err(QuestionServiceError::EmptyQuestions)
        ));
        assert!(matches!(
            service.generate_questions(&request).await,
            Err(QuestionServiceError::Unavailable(_))
        ));
        assert_eq!(service.generate_requests().len(), 2);
    }
}
