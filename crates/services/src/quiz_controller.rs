//! Quiz session state machine.
//!
//! `Idle -> Generating -> Ready -> Submitted -> (retake) -> Ready`
//!
//! Each network-bound transition is split into a `begin_*` step that validates and
//! produces the request, and a `finish_*` step that applies the outcome. The UI
//! runs the request between the two; `generate` and `submit` chain them for callers
//! that can hold `&mut self` across the await.

use quiz_core::count::{MAX_QUESTIONS, QuestionCount};
use quiz_core::model::{
    AnswerSet, Difficulty, GradedAnswer, GradedResult, OptionLabel, QuizSession, SessionState,
};

use crate::error::{QuestionServiceError, QuizError};
use crate::question_service::{CheckRequest, GenerateRequest, GeneratedQuiz, QuestionService};
use crate::retry::{RetryPolicy, generate_with_retry};

pub const EMPTY_CONTENT_MESSAGE: &str = "Please paste some content first.";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate quiz. Please try again.";
pub const GRADING_FAILED_MESSAGE: &str = "Error checking answers.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Validation,
    Error,
}

/// A user-facing message produced by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Grading progress once a quiz has been submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Grading {
    Pending,
    Graded(GradedResult),
    Failed,
}

#[derive(Clone, Debug, Default)]
pub struct QuizController {
    content: String,
    subject: String,
    difficulty: Difficulty,
    count: QuestionCount,
    retry: RetryPolicy,

    state: SessionState,
    session: Option<QuizSession>,
    selections: Vec<Option<OptionLabel>>,
    grading: Option<Grading>,
    notice: Option<Notice>,
    in_flight: Option<GenerateRequest>,
}

impl QuizController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    // ─── Accessors ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn question_count(&self) -> QuestionCount {
        self.count
    }

    /// The count the next generation would request for the current content.
    #[must_use]
    pub fn effective_question_count(&self) -> u32 {
        self.count.resolve(&self.content)
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    #[must_use]
    pub fn selection(&self, index: usize) -> Option<OptionLabel> {
        self.selections.get(index).copied().flatten()
    }

    #[must_use]
    pub fn grading(&self) -> Option<&Grading> {
        self.grading.as_ref()
    }

    #[must_use]
    pub fn graded_result(&self) -> Option<&GradedResult> {
        match &self.grading {
            Some(Grading::Graded(result)) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.state == SessionState::Generating
    }

    #[must_use]
    pub fn is_grading(&self) -> bool {
        matches!(self.grading, Some(Grading::Pending))
    }

    /// Answer inputs and the submit control accept interaction only while `Ready`.
    #[must_use]
    pub fn inputs_enabled(&self) -> bool {
        self.state == SessionState::Ready && self.session.is_some()
    }

    #[must_use]
    pub fn can_generate(&self) -> bool {
        !self.is_generating() && !self.is_grading()
    }

    #[must_use]
    pub fn can_retake(&self) -> bool {
        match self.state {
            SessionState::Ready => self.session.is_some(),
            SessionState::Submitted => !self.is_grading(),
            SessionState::Idle | SessionState::Generating => false,
        }
    }

    /// Answers as they would be submitted right now.
    #[must_use]
    pub fn answer_set(&self) -> AnswerSet {
        AnswerSet::from_selections(&self.selections)
    }

    /// Indices of questions without a selection.
    #[must_use]
    pub fn unanswered(&self) -> Vec<usize> {
        self.answer_set().unanswered_indices()
    }

    // ─── Input ─────────────────────────────────────────────────────────────────

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Pin the question count. Counts above the maximum are clamped with a notice.
    ///
    /// Returns `true` when the requested count had to be clamped.
    pub fn set_question_count(&mut self, requested: u32) -> bool {
        let (count, clamped) = QuestionCount::manual(requested);
        self.count = count;
        if requested > MAX_QUESTIONS {
            self.notice = Some(Notice::new(
                NoticeKind::Info,
                format!("Maximum {MAX_QUESTIONS} questions allowed."),
            ));
        }
        clamped
    }

    /// Go back to suggesting the count from the content length.
    pub fn clear_question_count(&mut self) {
        self.count = QuestionCount::Auto;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Select `label` for the question at `index`, replacing any previous choice.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` outside `Ready`, or an out-of-range error.
    pub fn select(&mut self, index: usize, label: OptionLabel) -> Result<(), QuizError> {
        self.ensure_answerable("select an answer")?;
        let session = self.session.as_ref().ok_or(QuizError::NoSession)?;
        let question = session.question(index).ok_or(QuizError::QuestionOutOfRange {
            index,
            len: session.len(),
        })?;
        if !question.has_label(label) {
            return Err(QuizError::OptionOutOfRange { index, label });
        }
        self.selections[index] = Some(label);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` outside `Ready`, or an out-of-range error.
    pub fn clear_selection(&mut self, index: usize) -> Result<(), QuizError> {
        self.ensure_answerable("clear an answer")?;
        let len = self.selections.len();
        let slot = self
            .selections
            .get_mut(index)
            .ok_or(QuizError::QuestionOutOfRange { index, len })?;
        *slot = None;
        Ok(())
    }

    fn ensure_answerable(&self, action: &'static str) -> Result<(), QuizError> {
        if self.state != SessionState::Ready {
            return Err(QuizError::InvalidTransition {
                state: self.state,
                action,
            });
        }
        Ok(())
    }

    // ─── Generation ────────────────────────────────────────────────────────────

    /// `Idle | Ready | Submitted -> Generating`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyContent` (with a validation notice) for blank content,
    /// or `QuizError::InvalidTransition` while a generation or grading is in flight.
    pub fn begin_generate(&mut self) -> Result<GenerateRequest, QuizError> {
        if !self.can_generate() {
            return Err(QuizError::InvalidTransition {
                state: self.state,
                action: "generate a quiz",
            });
        }

        let content = self.content.trim();
        if content.is_empty() {
            self.notice = Some(Notice::new(NoticeKind::Validation, EMPTY_CONTENT_MESSAGE));
            return Err(QuizError::EmptyContent);
        }

        let request = GenerateRequest {
            content: content.to_string(),
            count: self.count.resolve(content),
            difficulty: self.difficulty,
            subject: self.subject.trim().to_string(),
        };
        tracing::info!(
            count = request.count,
            manual_count = self.count.is_manual(),
            difficulty = request.difficulty.as_str(),
            "starting quiz generation"
        );

        self.state = SessionState::Generating;
        self.notice = None;
        self.in_flight = Some(request.clone());
        Ok(request)
    }

    /// `Generating -> Ready` on success, `Generating -> Idle` on failure.
    ///
    /// A failure discards the previous session and leaves an error notice.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` when not generating; otherwise returns
    /// the generation failure after it has been applied.
    pub fn finish_generate(
        &mut self,
        outcome: Result<GeneratedQuiz, QuizError>,
    ) -> Result<(), QuizError> {
        if self.state != SessionState::Generating {
            return Err(QuizError::InvalidTransition {
                state: self.state,
                action: "finish generating",
            });
        }
        let request = self.in_flight.take();
        let (subject, difficulty) = request
            .map(|r| (r.subject, r.difficulty))
            .unwrap_or_else(|| (self.subject.clone(), self.difficulty));

        let session = outcome.and_then(|quiz| {
            QuizSession::new(quiz.quiz_id, quiz.questions, subject, difficulty)
                .map_err(QuizError::from)
        });

        match session {
            Ok(session) => {
                tracing::info!(quiz_id = %session.id(), questions = session.len(), "quiz ready");
                self.selections = vec![None; session.len()];
                self.session = Some(session);
                self.grading = None;
                self.notice = None;
                self.state = SessionState::Ready;
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "quiz generation failed");
                self.session = None;
                self.selections.clear();
                self.grading = None;
                self.notice = Some(Notice::new(NoticeKind::Error, GENERATION_FAILED_MESSAGE));
                self.state = SessionState::Idle;
                Err(err)
            }
        }
    }

    /// Run a complete generation against `service`, retrying per the policy.
    ///
    /// # Errors
    ///
    /// See `begin_generate` and `finish_generate`.
    pub async fn generate(&mut self, service: &dyn QuestionService) -> Result<(), QuizError> {
        let request = self.begin_generate()?;
        let outcome = generate_with_retry(service, &request, self.retry).await;
        self.finish_generate(outcome)
    }

    // ─── Submission ────────────────────────────────────────────────────────────

    /// `Ready -> Submitted` with grading pending. Unanswered questions submit as `""`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` outside `Ready`, `QuizError::NoSession`
    /// without a quiz.
    pub fn begin_submit(&mut self) -> Result<CheckRequest, QuizError> {
        self.ensure_answerable("submit")?;
        let session = self.session.as_ref().ok_or(QuizError::NoSession)?;
        let answers = self.answer_set();
        let unanswered = answers.unanswered_indices().len();
        if unanswered > 0 {
            tracing::debug!(unanswered, "submitting with unanswered questions");
        }

        let request = CheckRequest {
            quiz_id: session.id().clone(),
            answers,
        };
        self.state = SessionState::Submitted;
        self.grading = Some(Grading::Pending);
        self.notice = None;
        Ok(request)
    }

    /// Apply a grading outcome. Failures are terminal: no retry, inputs stay disabled.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless grading is pending; otherwise
    /// returns `QuizError::GradingFailed` after the failure has been applied.
    pub fn finish_submit(
        &mut self,
        outcome: Result<Vec<GradedAnswer>, QuestionServiceError>,
    ) -> Result<(), QuizError> {
        if !self.is_grading() {
            return Err(QuizError::InvalidTransition {
                state: self.state,
                action: "finish grading",
            });
        }
        let expected = self.session.as_ref().map_or(0, QuizSession::len);

        let graded = outcome.and_then(|answers| {
            GradedResult::new(answers, expected).map_err(QuestionServiceError::from)
        });

        match graded {
            Ok(result) => {
                let score = result.score();
                tracing::info!(
                    correct = score.correct(),
                    total = score.total(),
                    "quiz graded"
                );
                self.grading = Some(Grading::Graded(result));
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "grading failed");
                self.grading = Some(Grading::Failed);
                self.notice = Some(Notice::new(NoticeKind::Error, GRADING_FAILED_MESSAGE));
                Err(QuizError::GradingFailed(err))
            }
        }
    }

    /// Submit the current selections to `service` for grading.
    ///
    /// # Errors
    ///
    /// See `begin_submit` and `finish_submit`.
    pub async fn submit(&mut self, service: &dyn QuestionService) -> Result<(), QuizError> {
        let request = self.begin_submit()?;
        let outcome = service.check_answers(&request).await;
        self.finish_submit(outcome)
    }

    // ─── Retake ────────────────────────────────────────────────────────────────

    /// `Submitted -> Ready` on the same quiz: selections and results are cleared.
    ///
    /// Calling it again in `Ready` yields the same cleared state.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` without a quiz or while grading is pending.
    pub fn retake(&mut self) -> Result<(), QuizError> {
        if !self.can_retake() {
            return Err(QuizError::InvalidTransition {
                state: self.state,
                action: "retake",
            });
        }
        let len = self.session.as_ref().map_or(0, QuizSession::len);
        self.selections = vec![None; len];
        self.grading = None;
        self.notice = None;
        self.state = SessionState::Ready;
        tracing::debug!(questions = len, "quiz reset for retake");
        Ok(())
    }
}
