use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::Registration;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::auth_error_message;

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut is_teacher = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let auth = auth.clone();
        let registration = Registration {
            email: email(),
            full_name: full_name(),
            password: password(),
            is_teacher: is_teacher(),
        };
        submitting.set(true);
        error.set(None);
        spawn(async move {
            match auth.register(&registration).await {
                Ok(message) => {
                    tracing::info!(%message, "account created");
                    let _ = navigator.replace(Route::Login {});
                }
                Err(err) => error.set(Some(auth_error_message(&err))),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "auth-page",
            form { class: "auth-card", onsubmit: submit,
                h2 { "Create your account" }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                label { r#for: "register-name", "Full name" }
                input {
                    id: "register-name",
                    value: "{full_name}",
                    oninput: move |evt| full_name.set(evt.value()),
                }
                label { r#for: "register-email", "Email" }
                input {
                    id: "register-email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "register-password", "Password" }
                input {
                    id: "register-password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                label { class: "checkbox",
                    input {
                        r#type: "checkbox",
                        checked: is_teacher(),
                        onchange: move |evt| is_teacher.set(evt.checked()),
                    }
                    "I am a teacher"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    "Sign up"
                }
                p { class: "auth-switch",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Log in" }
                }
            }
        }
    }
}
