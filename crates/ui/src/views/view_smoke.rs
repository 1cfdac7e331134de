use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::model::{GradedAnswer, OptionLabel, Question, QuizId};
use services::{GeneratedQuiz, QuestionService, QuizController, ScriptedQuestionService};

use crate::context::{UiApp, build_app_context};
use crate::views::{QuizPanel, QuizView};
use crate::vm::{QuizVm, render};

#[derive(Props, Clone, PartialEq)]
struct PanelHarnessProps {
    vm: QuizVm,
}

#[allow(non_snake_case)]
fn PanelHarness(props: PanelHarnessProps) -> Element {
    rsx! {
        QuizPanel { vm: props.vm.clone(), on_intent: move |_| {} }
    }
}

fn render_panel(controller: &QuizController) -> String {
    let mut dom = VirtualDom::new_with_props(
        PanelHarness,
        PanelHarnessProps {
            vm: render(controller),
        },
    );
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

struct TestApp {
    service: Arc<ScriptedQuestionService>,
}

impl UiApp for TestApp {
    fn question_service(&self) -> Arc<dyn QuestionService> {
        self.service.clone()
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[allow(non_snake_case)]
fn ViewHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { QuizView {} }
}

fn ready_controller() -> QuizController {
    let mut controller = QuizController::new();
    controller.set_content("The capital of France is Paris.");
    controller.begin_generate().unwrap();
    controller
        .finish_generate(Ok(GeneratedQuiz {
            quiz_id: QuizId::parse("smoke").unwrap(),
            questions: vec![
                Question::new(
                    "What is the capital of France?",
                    vec!["Rome".into(), "Paris".into(), "Berlin".into(), "Madrid".into()],
                )
                .unwrap(),
                Question::new("Is Paris in France?", vec!["Yes".into(), "No".into()]).unwrap(),
            ],
        }))
        .unwrap();
    controller
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn quiz_view_smoke_renders_idle_form() {
    let app = Arc::new(TestApp {
        service: Arc::new(ScriptedQuestionService::new()),
    });
    let mut dom = VirtualDom::new_with_props(ViewHarness, ViewHarnessProps { app });
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);

    assert!(html.contains("Quiz Generator"), "missing title in {html}");
    assert!(html.contains("Generate Quiz"), "missing generate button in {html}");
    assert_eq!(count(&html, "type=\"radio\""), 0, "unexpected inputs in {html}");
}

#[test]
fn panel_smoke_renders_one_radio_per_option() {
    let html = render_panel(&ready_controller());

    assert_eq!(count(&html, "type=\"radio\""), 6, "wrong input count in {html}");
    assert_eq!(count(&html, "name=\"q0\""), 4, "wrong q0 group in {html}");
    assert_eq!(count(&html, "name=\"q1\""), 2, "wrong q1 group in {html}");
    assert!(html.contains("id=\"q0_D\""), "missing positional label in {html}");
    assert!(html.contains("Q1. What is the capital of France?"), "missing prompt in {html}");
    assert!(html.contains("Submit Quiz"), "missing submit in {html}");
}

#[test]
fn panel_smoke_renders_results_and_score() {
    let mut controller = ready_controller();
    controller
        .select(0, OptionLabel::parse("A").unwrap())
        .unwrap();
    controller.begin_submit().unwrap();
    controller
        .finish_submit(Ok(vec![
            GradedAnswer {
                your_answer: "A".into(),
                correct_answer: "B".into(),
                is_correct: false,
                explanation: Some("Paris is the capital.".into()),
            },
            GradedAnswer {
                your_answer: String::new(),
                correct_answer: "A".into(),
                is_correct: false,
                explanation: None,
            },
        ]))
        .unwrap();

    let html = render_panel(&controller);

    assert!(html.contains("Your Score"), "missing score in {html}");
    assert!(html.contains("0 / 2"), "missing headline in {html}");
    assert!(html.contains("0%"), "missing percent in {html}");
    assert!(html.contains("Paris is the capital."), "missing explanation in {html}");
    assert!(html.contains("Retake Quiz"), "missing retake in {html}");
    assert!(html.contains("Wrong"), "missing verdict in {html}");
}

#[test]
fn panel_smoke_renders_generation_status() {
    let mut controller = QuizController::new();
    controller.set_content("Some content");
    controller.begin_generate().unwrap();

    let html = render_panel(&controller);

    assert!(html.contains("Generating quiz..."), "missing status in {html}");
    assert!(html.contains("Generating..."), "missing busy label in {html}");
}

#[test]
fn panel_smoke_renders_validation_notice() {
    let mut controller = QuizController::new();
    let _ = controller.begin_generate();

    let html = render_panel(&controller);

    assert!(
        html.contains("Please paste some content first."),
        "missing notice in {html}"
    );
}
