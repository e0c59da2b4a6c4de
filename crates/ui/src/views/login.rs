use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::{Route, home_for};
use crate::views::auth_error_message;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let auth = auth.clone();
        submitting.set(true);
        error.set(None);
        spawn(async move {
            match auth.login(&email(), &password()).await {
                Ok(user) => {
                    let _ = navigator.replace(home_for(user.role()));
                }
                Err(err) => error.set(Some(auth_error_message(&err))),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "auth-page",
            form { class: "auth-card", onsubmit: submit,
                h2 { "Welcome back" }
                p { class: "auth-subtitle", "Log in to continue learning." }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                label { r#for: "login-email", "Email" }
                input {
                    id: "login-email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Logging in..." } else { "Log in" }
                }
                p { class: "auth-switch",
                    "New here? "
                    Link { to: Route::Register {}, "Create an account" }
                }
            }
        }
    }
}
