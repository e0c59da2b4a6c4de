use assesify_core::model::User;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, auth_error_message, view_state_from_resource};

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let rename_auth = ctx.auth();
    let cached = ctx.session().user();

    let mut profile = use_resource(move || {
        let auth = auth.clone();
        let cached = cached.clone();
        async move {
            match auth.profile().await {
                Ok(user) => Ok(user),
                // Fall back to what this device already knows.
                Err(err) => {
                    tracing::warn!(error = %err, "profile refresh failed");
                    cached.ok_or(ViewError::SignedOut)
                }
            }
        }
    });
    let state = view_state_from_resource(&profile);

    let mut name = use_signal(String::new);
    let mut editing = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let auth = rename_auth.clone();
        let new_name = name();
        error.set(None);
        spawn(async move {
            match auth.update_profile(&new_name).await {
                Ok(_) => {
                    editing.set(false);
                    profile.restart();
                }
                Err(err) => error.set(Some(auth_error_message(&err))),
            }
        });
    };

    rsx! {
        div { class: "page profile-page",
            header { class: "view-header",
                h2 { class: "view-title", "Profile" }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(user) => {
                    let current_name = user.full_name.clone();
                    rsx! {
                        ProfileCard { user }
                        if editing() {
                            form { class: "profile-form", onsubmit: save,
                                label { r#for: "profile-name", "Full name" }
                                input {
                                    id: "profile-name",
                                    value: "{name}",
                                    oninput: move |evt| name.set(evt.value()),
                                }
                                button { class: "btn btn-primary", r#type: "submit", "Save" }
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    onclick: move |_| editing.set(false),
                                    "Cancel"
                                }
                            }
                        } else {
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| {
                                    name.set(current_name.clone());
                                    editing.set(true);
                                },
                                "Edit name"
                            }
                        }
                        if let Some(message) = error() {
                            p { class: "form-error", "{message}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ProfileCard(user: User) -> Element {
    let email = user.email.clone().unwrap_or_default();
    rsx! {
        dl { class: "profile-card",
            dt { "Name" }
            dd { "{user.full_name}" }
            dt { "Email" }
            dd { "{email}" }
            dt { "Role" }
            dd { "{user.role().label()}" }
        }
    }
}
