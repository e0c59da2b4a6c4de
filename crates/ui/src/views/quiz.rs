use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::{Lifetime, QuizLoad};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::{CompletionVm, QuizIntent, QuizStep, QuizVm};

#[cfg(test)]
use std::cell::RefCell;

#[component]
pub fn QuizView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let quizzes = ctx.quizzes();
    // Dropped with the page; anything still in flight is discarded.
    let lifetime = use_hook(|| Rc::new(Lifetime::new()));
    let vm = use_signal(|| None::<QuizVm>);

    let load_token = lifetime.token();
    let loader = quizzes.clone();
    let resource = use_resource(use_reactive!(|id| {
        let quizzes = loader.clone();
        let token = load_token.clone();
        let mut vm = vm;
        async move {
            vm.set(None);
            match token.run(quizzes.load(&id)).await {
                Some(QuizLoad::Ready(session)) => {
                    vm.set(Some(QuizVm::new(session)));
                    Ok(true)
                }
                Some(QuizLoad::NotFound) | None => Ok(false),
            }
        }
    }));

    let submit_token = lifetime.token();
    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        let now = quizzes.now();
        let step = {
            let mut guard = vm.write();
            let Some(current) = guard.as_mut() else {
                return;
            };
            match current.apply(intent, now) {
                Ok(step) => step,
                Err(err) => {
                    tracing::debug!(error = %err, "quiz input ignored");
                    return;
                }
            }
        };

        if step == QuizStep::Completed {
            let Some(session) = vm.read().as_ref().map(|current| current.session().clone()) else {
                return;
            };
            // The request runs on its own task so leaving the page does not cancel it.
            let pending = quizzes.submit_detached(session, None);
            let token = submit_token.clone();
            spawn(async move {
                let Ok(Some(receipt)) = pending.await else {
                    return;
                };
                if token.is_ended() {
                    return;
                }
                if let Some(current) = vm.write().as_mut() {
                    current.set_receipt(receipt);
                }
            });
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch);
            }
        }
    }

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page quiz-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    div { class: "quiz-loading",
                        div { class: "spinner" }
                        p { "Loading quiz..." }
                    }
                },
                ViewState::Ready(false) | ViewState::Error(_) => rsx! { QuizNotFound {} },
                ViewState::Ready(true) => match vm.read().clone() {
                    Some(current) => rsx! { QuizBody { vm: current, dispatch } },
                    None => rsx! { QuizNotFound {} },
                },
            }
        }
    }
}

#[component]
fn QuizNotFound() -> Element {
    let navigator = use_navigator();
    rsx! {
        div { class: "quiz-empty",
            h2 { "No Quiz Found" }
            p { "This quiz does not exist or has no questions yet." }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| {
                    let _ = navigator.push(Route::Dashboard {});
                },
                "Return Home"
            }
        }
    }
}

#[derive(Props, Clone)]
struct QuizBodyProps {
    vm: QuizVm,
    dispatch: Callback<QuizIntent>,
}

impl PartialEq for QuizBodyProps {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

#[component]
fn QuizBody(props: QuizBodyProps) -> Element {
    let QuizBodyProps { vm, dispatch } = props;
    let navigator = use_navigator();

    if let Some(done) = vm.completion() {
        return rsx! { QuizComplete { done } };
    }

    let width = vm.progress_width();
    let position = vm.position_label();
    let options = vm.options();
    let feedback = vm.feedback();
    let can_act = vm.can_check() || feedback.is_some();
    let primary_label = vm.primary_label();
    let primary_intent = vm.primary_intent();
    let footer_class = match feedback.as_ref() {
        Some(f) if f.correct => "quiz-footer quiz-footer--correct",
        Some(_) => "quiz-footer quiz-footer--incorrect",
        None => "quiz-footer",
    };

    rsx! {
        div { class: "quiz-header",
            button {
                class: "quiz-close",
                r#type: "button",
                title: "Quit",
                onclick: move |_| {
                    let _ = navigator.push(Route::Dashboard {});
                },
                "✕"
            }
            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {width}" }
            }
            span { class: "quiz-position", "{position}" }
        }
        div { class: "quiz-question",
            h2 { "{vm.prompt()}" }
            if let Some(hint) = vm.hint() {
                p { class: "quiz-hint", "Hint: {hint}" }
            }
            div { class: "quiz-options",
                for option in options {
                    button {
                        key: "{option.label}",
                        class: option.state.class(),
                        r#type: "button",
                        onclick: {
                            let label = option.label.clone();
                            move |_| dispatch.call(QuizIntent::Select(label.clone()))
                        },
                        "{option.label}"
                    }
                }
            }
        }
        div { class: footer_class,
            if let Some(feedback) = feedback {
                div { class: "quiz-feedback",
                    h3 { "{feedback.title}" }
                    if !feedback.explanation.is_empty() {
                        p { class: "quiz-explanation",
                            strong { "Explanation: " }
                            "{feedback.explanation}"
                        }
                    }
                }
            }
            button {
                class: "btn btn-primary quiz-primary",
                r#type: "button",
                disabled: !can_act,
                onclick: move |_| dispatch.call(primary_intent.clone()),
                "{primary_label}"
            }
        }
    }
}

#[component]
fn QuizComplete(done: CompletionVm) -> Element {
    let navigator = use_navigator();
    rsx! {
        div { class: "quiz-complete",
            h2 { "Lesson Complete!" }
            div { class: "quiz-stats",
                div { class: "quiz-stat quiz-stat--xp",
                    span { class: "quiz-stat-label", "Total XP" }
                    span { class: "quiz-stat-value", "{done.points}" }
                }
                div { class: "quiz-stat quiz-stat--correct",
                    span { class: "quiz-stat-label", "Correct" }
                    span { class: "quiz-stat-value", "{done.correct}" }
                }
                if let Some(elapsed) = done.elapsed.as_ref() {
                    div { class: "quiz-stat",
                        span { class: "quiz-stat-label", "Time" }
                        span { class: "quiz-stat-value", "{elapsed}" }
                    }
                }
            }
            if let Some(streak) = done.streak {
                p { class: "quiz-reward", "Streak: {streak}" }
            }
            if let Some(diamonds) = done.diamonds {
                p { class: "quiz-reward", "Diamonds earned: {diamonds}" }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| {
                    let _ = navigator.push(Route::Dashboard {});
                },
                "Continue"
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}
