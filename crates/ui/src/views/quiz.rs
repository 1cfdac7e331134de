use dioxus::prelude::*;
use quiz_core::model::Difficulty;
use services::{QuizController, generate_with_retry};

use crate::context::AppContext;
use crate::vm::{
    ButtonVm, CountInput, FormVm, NoticeVm, OptionVm, QuestionVm, QuizIntent, QuizVm, ScoreVm,
    render,
};

/// Stateful quiz page: owns the controller and runs the network transitions.
#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.question_service();
    let retry = ctx.retry_policy();
    let mut controller = use_signal(move || QuizController::new().with_retry_policy(retry));

    let vm = render(&controller.read());

    let on_intent = move |intent: QuizIntent| match intent {
        QuizIntent::ContentChanged(text) => {
            controller.write().set_content(text);
        }
        QuizIntent::SubjectChanged(text) => {
            controller.write().set_subject(text);
        }
        QuizIntent::DifficultyChanged(difficulty) => {
            controller.write().set_difficulty(difficulty);
        }
        QuizIntent::CountChanged(CountInput::Auto) => {
            controller.write().clear_question_count();
        }
        QuizIntent::CountChanged(CountInput::Manual(count)) => {
            controller.write().set_question_count(count);
        }
        QuizIntent::CountChanged(CountInput::Invalid) => {}
        QuizIntent::Select { question, label } => {
            let selected = controller.write().select(question, label);
            if let Err(err) = selected {
                tracing::debug!(error = %err, "selection ignored");
            }
        }
        QuizIntent::Generate => {
            let begun = controller.write().begin_generate();
            let request = match begun {
                Ok(request) => request,
                Err(err) => {
                    tracing::debug!(error = %err, "generate rejected");
                    return;
                }
            };
            let service = service.clone();
            spawn(async move {
                let outcome = generate_with_retry(service.as_ref(), &request, retry).await;
                let finished = controller.write().finish_generate(outcome);
                if let Err(err) = finished {
                    tracing::warn!(error = %err, "quiz generation did not complete");
                }
            });
        }
        QuizIntent::Submit => {
            let begun = controller.write().begin_submit();
            let request = match begun {
                Ok(request) => request,
                Err(err) => {
                    tracing::debug!(error = %err, "submit rejected");
                    return;
                }
            };
            let service = service.clone();
            spawn(async move {
                let outcome = service.check_answers(&request).await;
                let finished = controller.write().finish_submit(outcome);
                if let Err(err) = finished {
                    tracing::warn!(error = %err, "grading did not complete");
                }
            });
        }
        QuizIntent::Retake => {
            let retaken = controller.write().retake();
            if let Err(err) = retaken {
                tracing::debug!(error = %err, "retake rejected");
            }
        }
        QuizIntent::DismissNotice => {
            controller.write().dismiss_notice();
        }
    };

    rsx! {
        QuizPanel { vm, on_intent }
    }
}

/// Draws a `QuizVm`; every interaction is reported through `on_intent`.
#[component]
pub fn QuizPanel(vm: QuizVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "page quiz",
            h2 { "Quiz Generator" }

            QuizForm { form: vm.form.clone(), generate: vm.generate.clone(), on_intent }

            if let Some(notice) = vm.notice.clone() {
                NoticeBanner { notice, on_intent }
            }
            if let Some(status) = vm.status {
                p { class: "status", "{status}" }
            }

            section { class: "quiz-section",
                for question in vm.questions.clone() {
                    QuestionCard { key: "{question.group_name}", question, on_intent }
                }
            }

            if let Some(submit) = vm.submit.clone() {
                div { class: "submit-row",
                    if let Some(warning) = vm.unanswered_warning.clone() {
                        p { class: "unanswered", "{warning}" }
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-submit",
                        disabled: !submit.enabled,
                        onclick: move |_| on_intent.call(QuizIntent::Submit),
                        "{submit.label}"
                    }
                }
            }

            if vm.score.is_some() || vm.retake.is_some() {
                section { class: "result-section",
                    if let Some(score) = vm.score.clone() {
                        ScoreCard { score }
                    }
                    if let Some(retake) = vm.retake.clone() {
                        RetakeButton { retake, on_intent }
                    }
                }
            }
        }
    }
}

#[component]
fn QuizForm(form: FormVm, generate: ButtonVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let current = form.difficulty;

    rsx! {
        div { class: "quiz-form",
            label { class: "field-label", r#for: "content", "Content" }
            textarea {
                id: "content",
                class: "content-input",
                rows: "10",
                placeholder: "Paste your study material here...",
                disabled: !form.editable,
                value: "{form.content}",
                oninput: move |evt| on_intent.call(QuizIntent::ContentChanged(evt.value())),
            }

            div { class: "form-row",
                label { class: "field-label", r#for: "subject", "Subject" }
                input {
                    id: "subject",
                    r#type: "text",
                    value: "{form.subject}",
                    oninput: move |evt| on_intent.call(QuizIntent::SubjectChanged(evt.value())),
                }

                label { class: "field-label", r#for: "difficulty", "Difficulty" }
                select {
                    id: "difficulty",
                    value: "{current.as_str()}",
                    onchange: move |evt| {
                        if let Ok(difficulty) = evt.value().parse::<Difficulty>() {
                            on_intent.call(QuizIntent::DifficultyChanged(difficulty));
                        }
                    },
                    for difficulty in Difficulty::ALL {
                        option {
                            value: "{difficulty.as_str()}",
                            selected: difficulty == current,
                            "{difficulty.display_name()}"
                        }
                    }
                }

                label { class: "field-label", r#for: "question-count", "Questions" }
                input {
                    id: "question-count",
                    r#type: "number",
                    min: "1",
                    max: "{form.max_count}",
                    placeholder: "{form.count_placeholder}",
                    value: "{form.count_input}",
                    oninput: move |evt| {
                        on_intent.call(QuizIntent::CountChanged(CountInput::parse(&evt.value())));
                    },
                }
            }

            button {
                r#type: "button",
                class: "btn btn-generate",
                disabled: !generate.enabled,
                onclick: move |_| on_intent.call(QuizIntent::Generate),
                "{generate.label}"
            }
        }
    }
}

#[component]
fn NoticeBanner(notice: NoticeVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "{notice.class()}",
            span { "{notice.text}" }
            button {
                r#type: "button",
                class: "notice-dismiss",
                onclick: move |_| on_intent.call(QuizIntent::DismissNotice),
                "Dismiss"
            }
        }
    }
}

#[component]
fn QuestionCard(question: QuestionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let index = question.index;

    rsx! {
        div { class: "question-card",
            div { class: "question-body",
                p { class: "question-prompt", "{question.number_label} {question.prompt}" }
                div { class: "options",
                    for option in question.options.clone() {
                        OptionRow {
                            key: "{option.input_id}",
                            option,
                            group_name: question.group_name.clone(),
                            question_index: index,
                            on_intent,
                        }
                    }
                }
            }
            // Filled in once the quiz is graded.
            div { class: "question-result",
                if let Some(result) = question.result.clone() {
                    p { "Your answer: " b { "{result.your_answer}" } }
                    p { "Correct answer: " b { "{result.correct_answer}" } }
                    p { class: "{result.class()}", "{result.verdict}" }
                    if let Some(explanation) = result.explanation.clone() {
                        p { class: "explanation", "{explanation}" }
                    }
                }
            }
        }
    }
}

#[component]
fn OptionRow(
    option: OptionVm,
    group_name: String,
    question_index: usize,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let label = option.label;

    rsx! {
        div { class: "option",
            input {
                r#type: "radio",
                name: "{group_name}",
                id: "{option.input_id}",
                value: "{option.label}",
                checked: option.checked,
                disabled: option.disabled,
                onchange: move |_| {
                    on_intent.call(QuizIntent::Select { question: question_index, label });
                },
            }
            label { r#for: "{option.input_id}", "{option.text}" }
        }
    }
}

#[component]
fn ScoreCard(score: ScoreVm) -> Element {
    rsx! {
        div { class: "score-card",
            h2 { "Your Score" }
            p { class: "score-headline", "{score.headline}" }
            p { class: "score-percent", "{score.percent_label}" }
        }
    }
}

#[component]
fn RetakeButton(retake: ButtonVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: "btn btn-retake",
            disabled: !retake.enabled,
            onclick: move |_| on_intent.call(QuizIntent::Retake),
            "{retake.label}"
        }
    }
}
