use assesify_core::model::{ClassSummary, QuizListing};
use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, class_error_message, view_state_from_resource};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let greeting = ctx
        .session()
        .user()
        .map_or_else(|| "Welcome back!".to_string(), |user| {
            format!("Welcome back, {}!", user.first_name())
        });
    let quizzes = ctx.quizzes();

    let recent = use_resource(move || {
        let quizzes = quizzes.clone();
        async move {
            quizzes.recent().await.map_err(|err| {
                tracing::warn!(error = %err, "failed to load recent quizzes");
                ViewError::Unavailable
            })
        }
    });
    let state = view_state_from_resource(&recent);

    rsx! {
        div { class: "page dashboard-page",
            header { class: "view-header",
                h2 { class: "view-title", "{greeting}" }
                p { class: "view-subtitle", "Pick up a quiz or join a class." }
            }
            section { class: "dashboard-section",
                h3 { "Quizzes" }
                match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut recent = recent;
                                recent.restart();
                            },
                            "Retry"
                        }
                    },
                    ViewState::Ready(listings) => rsx! {
                        if listings.is_empty() {
                            p { "No quizzes yet." }
                        } else {
                            ul { class: "quiz-list",
                                for listing in listings {
                                    QuizCard { key: "{listing.id}", listing }
                                }
                            }
                        }
                    },
                }
            }
            ClassesSection {}
        }
    }
}

#[component]
fn QuizCard(listing: QuizListing) -> Element {
    let count = match listing.questions_count {
        1 => "1 question".to_string(),
        n => format!("{n} questions"),
    };
    rsx! {
        li { class: "quiz-card",
            Link { to: Route::Quiz { id: listing.id.to_string() },
                span { class: "quiz-card-title", "{listing.title}" }
                if let Some(topic) = listing.topic.as_ref() {
                    span { class: "quiz-card-topic", "{topic}" }
                }
                span { class: "quiz-card-count", "{count}" }
            }
        }
    }
}

#[component]
fn ClassesSection() -> Element {
    let ctx = use_context::<AppContext>();
    let classes = ctx.classes();
    let join_service = ctx.classes();

    let mut code = use_signal(String::new);
    let mut notice = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);

    let mut resource = use_resource(move || {
        let classes = classes.clone();
        async move {
            classes.list_classes().await.map_err(|err| {
                tracing::warn!(error = %err, "failed to load classes");
                ViewError::Unavailable
            })
        }
    });
    let state = view_state_from_resource(&resource);

    let join = move |evt: FormEvent| {
        evt.prevent_default();
        let service = join_service.clone();
        let raw = code();
        notice.set(None);
        error.set(None);
        spawn(async move {
            match service.join_class(&raw).await {
                Ok(class) => {
                    notice.set(Some(format!("Joined {}", class.name)));
                    code.set(String::new());
                    resource.restart();
                }
                Err(err) => error.set(Some(class_error_message(&err))),
            }
        });
    };

    rsx! {
        section { class: "dashboard-section",
            h3 { "My classes" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(items) => rsx! {
                    if items.is_empty() {
                        p { "You have not joined any classes yet." }
                    } else {
                        ul { class: "class-list",
                            for class in items {
                                ClassCard { key: "{class.id}", class }
                            }
                        }
                    }
                },
            }
            form { class: "join-class", onsubmit: join,
                input {
                    placeholder: "Class code",
                    value: "{code}",
                    oninput: move |evt| code.set(evt.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Join" }
            }
            if let Some(message) = notice() {
                p { class: "form-notice", "{message}" }
            }
            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }
        }
    }
}

#[component]
fn ClassCard(class: ClassSummary) -> Element {
    let detail = [class.section.as_deref(), class.teacher.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");
    rsx! {
        li { class: "class-card",
            span { class: "class-card-name", "{class.name}" }
            if !detail.is_empty() {
                span { class: "class-card-detail", "{detail}" }
            }
            span { class: "class-card-progress", "{class.progress}%" }
        }
    }
}
