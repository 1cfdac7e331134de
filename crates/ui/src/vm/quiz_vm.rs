//! Pure mapping from controller state to what the quiz page shows.

use quiz_core::count::MAX_QUESTIONS;
use quiz_core::model::{Difficulty, GradedAnswer, OptionLabel, Question, SessionState};
use services::{Grading, NoticeKind, QuizController};

pub const GENERATE_LABEL: &str = "Generate Quiz";
pub const GENERATING_LABEL: &str = "Generating...";
pub const SUBMIT_LABEL: &str = "Submit Quiz";
pub const CHECKING_LABEL: &str = "Checking...";
pub const SUBMITTED_LABEL: &str = "Submitted";
pub const RETAKE_LABEL: &str = "Retake Quiz";
pub const GENERATING_STATUS: &str = "Generating quiz...";
const NO_ANSWER: &str = "—";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonVm {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeTone {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeVm {
    pub tone: NoticeTone,
    pub text: String,
}

impl NoticeVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self.tone {
            NoticeTone::Info => "notice notice-info",
            NoticeTone::Warning => "notice notice-warning",
            NoticeTone::Error => "notice notice-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormVm {
    pub content: String,
    pub subject: String,
    pub difficulty: Difficulty,
    /// Empty while the count is suggested from the content.
    pub count_input: String,
    pub count_placeholder: String,
    pub max_count: u32,
    pub editable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: OptionLabel,
    pub input_id: String,
    pub text: String,
    pub checked: bool,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionResultVm {
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub verdict: &'static str,
    pub explanation: Option<String>,
}

impl QuestionResultVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.is_correct {
            "verdict verdict-correct"
        } else {
            "verdict verdict-wrong"
        }
    }
}

/// One radio group: all inputs share `group_name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub index: usize,
    pub number_label: String,
    pub prompt: String,
    pub group_name: String,
    pub options: Vec<OptionVm>,
    pub result: Option<QuestionResultVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreVm {
    pub headline: String,
    pub percent_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub form: FormVm,
    pub generate: ButtonVm,
    pub status: Option<&'static str>,
    pub notice: Option<NoticeVm>,
    pub questions: Vec<QuestionVm>,
    pub submit: Option<ButtonVm>,
    pub unanswered_warning: Option<String>,
    pub score: Option<ScoreVm>,
    pub retake: Option<ButtonVm>,
}

#[must_use]
pub fn render(controller: &QuizController) -> QuizVm {
    let generating = controller.is_generating();
    let graded = controller.graded_result();

    let questions = match controller.session() {
        Some(session) if !generating => session
            .questions()
            .iter()
            .enumerate()
            .map(|(idx, question)| {
                map_question(
                    idx,
                    question,
                    controller.selection(idx),
                    !controller.inputs_enabled(),
                    graded.and_then(|result| result.get(idx)),
                )
            })
            .collect(),
        _ => Vec::new(),
    };

    let submit = (!questions.is_empty()).then(|| ButtonVm {
        label: match controller.grading() {
            None => SUBMIT_LABEL,
            Some(Grading::Pending) => CHECKING_LABEL,
            Some(Grading::Graded(_) | Grading::Failed) => SUBMITTED_LABEL,
        },
        enabled: controller.inputs_enabled(),
    });

    let unanswered = controller.unanswered().len();
    let unanswered_warning = (controller.state() == SessionState::Ready
        && !questions.is_empty()
        && unanswered > 0)
        .then(|| match unanswered {
            1 => "1 question is unanswered and will be submitted blank.".to_string(),
            n => format!("{n} questions are unanswered and will be submitted blank."),
        });

    let score = graded.map(|result| {
        let score = result.score();
        ScoreVm {
            headline: format!("{} / {}", score.correct(), score.total()),
            percent_label: format!("{}%", score.percent()),
        }
    });

    let retake = (controller.state() == SessionState::Submitted && !controller.is_grading())
        .then_some(ButtonVm {
            label: RETAKE_LABEL,
            enabled: controller.can_retake(),
        });

    QuizVm {
        form: map_form(controller),
        generate: ButtonVm {
            label: if generating {
                GENERATING_LABEL
            } else {
                GENERATE_LABEL
            },
            enabled: controller.can_generate(),
        },
        status: generating.then_some(GENERATING_STATUS),
        notice: controller.notice().map(|notice| NoticeVm {
            tone: match notice.kind {
                NoticeKind::Info => NoticeTone::Info,
                NoticeKind::Validation => NoticeTone::Warning,
                NoticeKind::Error => NoticeTone::Error,
            },
            text: notice.text.clone(),
        }),
        questions,
        submit,
        unanswered_warning,
        score,
        retake,
    }
}

fn map_form(controller: &QuizController) -> FormVm {
    let count = controller.question_count();
    FormVm {
        content: controller.content().to_string(),
        subject: controller.subject().to_string(),
        difficulty: controller.difficulty(),
        count_input: if count.is_manual() {
            controller.effective_question_count().to_string()
        } else {
            String::new()
        },
        count_placeholder: format!("Auto ({})", controller.effective_question_count()),
        max_count: MAX_QUESTIONS,
        editable: !controller.is_generating(),
    }
}

fn map_question(
    index: usize,
    question: &Question,
    selected: Option<OptionLabel>,
    disabled: bool,
    graded: Option<&GradedAnswer>,
) -> QuestionVm {
    let group_name = format!("q{index}");
    let options = question
        .labeled_options()
        .map(|(label, text)| OptionVm {
            label,
            input_id: format!("{group_name}_{label}"),
            text: text.to_string(),
            checked: selected == Some(label),
            disabled,
        })
        .collect();

    QuestionVm {
        index,
        number_label: format!("Q{}.", index + 1),
        prompt: question.prompt().to_string(),
        group_name,
        options,
        result: graded.map(map_result),
    }
}

fn map_result(graded: &GradedAnswer) -> QuestionResultVm {
    let your_answer = if graded.your_answer.trim().is_empty() {
        NO_ANSWER.to_string()
    } else {
        graded.your_answer.clone()
    };
    QuestionResultVm {
        your_answer,
        correct_answer: graded.correct_answer.clone(),
        is_correct: graded.is_correct,
        verdict: if graded.is_correct { "Correct" } else { "Wrong" },
        explanation: graded.visible_explanation().map(str::to_string),
    }
}
