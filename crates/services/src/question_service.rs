use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use quiz_core::model::{AnswerSet, Difficulty, GradedAnswer, Question, QuizId};

use crate::error::{QuestionServiceConfigError, QuestionServiceError};
use crate::wire::{CheckResponseBody, GenerateResponseBody};

const GENERATE_PATH: &str = "generate-questions";
const CHECK_PATH: &str = "check-answers";

/// Body of a `POST /generate-questions` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub content: String,
    pub count: u32,
    pub difficulty: Difficulty,
    pub subject: String,
}

/// Body of a `POST /check-answers` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRequest {
    pub quiz_id: QuizId,
    pub answers: AnswerSet,
}

/// A validated generation response: never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuiz {
    pub quiz_id: QuizId,
    pub questions: Vec<Question>,
}

/// Remote collaborator that generates questions and grades answers.
#[async_trait]
pub trait QuestionService: Send + Sync {
    /// Generate a quiz from pasted content.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::EmptyQuestions` when no questions come back,
    /// `Malformed` for invalid questions, or transport errors.
    async fn generate_questions(
        &self,
        request: &GenerateRequest,
    ) -> Result<GeneratedQuiz, QuestionServiceError>;

    /// Grade a submission.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::MissingResult` when the response carries no
    /// result, or transport errors.
    async fn check_answers(
        &self,
        request: &CheckRequest,
    ) -> Result<Vec<GradedAnswer>, QuestionServiceError>;
}

/// Where the question service lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionServiceConfig {
    base_url: Url,
}

impl QuestionServiceConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8000";
    pub const BASE_URL_ENV: &'static str = "QUIZ_API_BASE_URL";

    /// # Errors
    ///
    /// Returns `QuestionServiceConfigError::InvalidBaseUrl` unless `base_url` is an
    /// absolute `http` or `https` URL.
    pub fn new(base_url: &str) -> Result<Self, QuestionServiceConfigError> {
        let invalid = || QuestionServiceConfigError::InvalidBaseUrl {
            raw: base_url.to_string(),
        };
        let url = Url::parse(base_url.trim()).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }
        Ok(Self { base_url: url })
    }

    /// Reads `QUIZ_API_BASE_URL`, falling back to the local development server.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceConfigError::InvalidBaseUrl` if the variable is set to
    /// something other than an `http`/`https` URL.
    pub fn from_env() -> Result<Self, QuestionServiceConfigError> {
        Self::from_env_value(env::var(Self::BASE_URL_ENV).ok())
    }

    fn from_env_value(value: Option<String>) -> Result<Self, QuestionServiceConfigError> {
        match value.filter(|value| !value.trim().is_empty()) {
            Some(raw) => Self::new(&raw),
            None => Self::new(Self::DEFAULT_BASE_URL),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

/// `QuestionService` over HTTP JSON.
#[derive(Clone)]
pub struct HttpQuestionService {
    client: Client,
    config: QuestionServiceConfig,
}

impl HttpQuestionService {
    /// # Errors
    ///
    /// Returns `QuestionServiceConfigError` if `QUIZ_API_BASE_URL` is invalid.
    pub fn from_env() -> Result<Self, QuestionServiceConfigError> {
        QuestionServiceConfig::from_env().map(Self::new)
    }

    #[must_use]
    pub fn new(config: QuestionServiceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &QuestionServiceConfig {
        &self.config
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, QuestionServiceError> {
        let response = self
            .client
            .post(self.config.endpoint(path))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QuestionServiceError::HttpStatus(response.status()));
        }
        Ok(response)
    }
}

#[async_trait]
impl QuestionService for HttpQuestionService {
    async fn generate_questions(
        &self,
        request: &GenerateRequest,
    ) -> Result<GeneratedQuiz, QuestionServiceError> {
        tracing::debug!(count = request.count, "requesting question generation");
        let body: GenerateResponseBody = self
            .post_json(GENERATE_PATH, request)
            .await?
            .json()
            .await?;
        body.into_generated()
    }

    async fn check_answers(
        &self,
        request: &CheckRequest,
    ) -> Result<Vec<GradedAnswer>, QuestionServiceError> {
        tracing::debug!(quiz_id = %request.quiz_id, "requesting grading");
        let body: CheckResponseBody = self
            .post_json(CHECK_PATH, request)
            .await?
            .json()
            .await?;
        body.into_graded()
    }
}
