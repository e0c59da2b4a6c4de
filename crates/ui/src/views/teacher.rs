use assesify_core::model::ClassSummary;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, class_error_message, view_state_from_resource};

/// Teacher home: owned classes with their join codes, class creation and invites.
#[component]
pub fn TeacherView() -> Element {
    let ctx = use_context::<AppContext>();
    let classes = ctx.classes();
    let name = ctx
        .session()
        .user()
        .map(|user| user.first_name().to_string())
        .unwrap_or_default();

    let mut resource = use_resource(move || {
        let classes = classes.clone();
        async move {
            classes.list_classes().await.map_err(|err| {
                tracing::warn!(error = %err, "failed to load teacher classes");
                ViewError::Unavailable
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page teacher-page",
            header { class: "view-header",
                h2 { class: "view-title", "Teacher Dashboard" }
                if !name.is_empty() {
                    p { class: "view-subtitle", "Signed in as {name}." }
                }
            }
            section { class: "dashboard-section",
                h3 { "Your classes" }
                match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| resource.restart(),
                            "Retry"
                        }
                    },
                    ViewState::Ready(items) => rsx! {
                        if items.is_empty() {
                            p { "No classes yet. Create your first class below." }
                        } else {
                            ul { class: "class-list",
                                for class in items {
                                    TeacherClassCard { key: "{class.id}", class }
                                }
                            }
                        }
                    },
                }
            }
            CreateClassForm { on_created: move |()| resource.restart() }
            InviteStudentForm {}
        }
    }
}

#[component]
fn TeacherClassCard(class: ClassSummary) -> Element {
    let code = class.code.clone().unwrap_or_default();
    rsx! {
        li { class: "class-card",
            span { class: "class-card-name", "{class.name}" }
            if let Some(section) = class.section.as_ref() {
                span { class: "class-card-detail", "{section}" }
            }
            if !code.is_empty() {
                span { class: "class-card-code", "Code: {code}" }
            }
        }
    }
}

#[component]
fn CreateClassForm(on_created: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let classes = ctx.classes();

    let mut name = use_signal(String::new);
    let mut section = use_signal(String::new);
    let mut notice = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let classes = classes.clone();
        notice.set(None);
        error.set(None);
        spawn(async move {
            let section_value = section();
            match classes.create_class(&name(), Some(section_value.as_str())).await {
                Ok(created) => {
                    notice.set(Some(format!("Class created. Join code: {}", created.code)));
                    name.set(String::new());
                    section.set(String::new());
                    on_created.call(());
                }
                Err(err) => error.set(Some(class_error_message(&err))),
            }
        });
    };

    rsx! {
        section { class: "dashboard-section",
            h3 { "Create New Class" }
            form { class: "teacher-form", onsubmit: submit,
                label { r#for: "class-name", "Class name" }
                input {
                    id: "class-name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                label { r#for: "class-section", "Section" }
                input {
                    id: "class-section",
                    value: "{section}",
                    oninput: move |evt| section.set(evt.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Create Class" }
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
fn InviteStudentForm() -> Element {
    let ctx = use_context::<AppContext>();
    let classes = ctx.classes();

    let mut email = use_signal(String::new);
    let mut full_name = use_signal(String::new);
    let mut notice = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let classes = classes.clone();
        notice.set(None);
        error.set(None);
        spawn(async move {
            match classes.invite_student(&email(), &full_name()).await {
                Ok(message) => {
                    notice.set(Some(message));
                    email.set(String::new());
                    full_name.set(String::new());
                }
                Err(err) => error.set(Some(class_error_message(&err))),
            }
        });
    };

    rsx! {
        section { class: "dashboard-section",
            h3 { "Invite Student" }
            form { class: "teacher-form", onsubmit: submit,
                label { r#for: "invite-name", "Full name" }
                input {
                    id: "invite-name",
                    value: "{full_name}",
                    oninput: move |evt| full_name.set(evt.value()),
                }
                label { r#for: "invite-email", "Email" }
                input {
                    id: "invite-email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Send Invite" }
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
