use std::sync::Arc;

use services::{QuestionService, RetryPolicy};

pub trait UiApp: Send + Sync {
    fn question_service(&self) -> Arc<dyn QuestionService>;

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
    }
}

#[derive(Clone)]
pub struct AppContext {
    question_service: Arc<dyn QuestionService>,
    retry_policy: RetryPolicy,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            question_service: app.question_service(),
            retry_policy: app.retry_policy(),
        }
    }

    #[must_use]
    pub fn question_service(&self) -> Arc<dyn QuestionService> {
        Arc::clone(&self.question_service)
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
