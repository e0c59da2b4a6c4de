use assesify_core::model::Role;
use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use services::AuthEvent;

use crate::context::AppContext;
use crate::views::{
    DashboardView, LoginView, NotFoundView, ProfileView, QuizView, RegisterView, TeacherView,
};

#[derive(Clone, Routable, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login", LoginView)] Login {},
    #[route("/register", RegisterView)] Register {},
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/quiz/:id", QuizView)] Quiz { id: String },
        #[route("/profile", ProfileView)] Profile {},
        #[route("/teacher", TeacherView)] Teacher {},
    #[end_layout]
    #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

/// Where a freshly signed-in user lands.
#[must_use]
pub fn home_for(role: Role) -> Route {
    match role {
        Role::Student => Route::Dashboard {},
        Role::Teacher => Route::Teacher {},
    }
}

/// Signed-in shell. Sends the user to login when the session ends.
#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let session = ctx.session();
    let signed_in = session.is_signed_in();

    use_effect(move || {
        if !signed_in {
            let _ = navigator.replace(Route::Login {});
        }
    });

    use_future(move || {
        let session = session.clone();
        async move {
            let mut events = session.subscribe();
            while events.changed().await.is_ok() {
                let event = events.borrow_and_update().clone();
                if matches!(event, AuthEvent::SignedOut | AuthEvent::Invalidated { .. }) {
                    tracing::debug!(?event, "session ended; returning to login");
                    let _ = navigator.replace(Route::Login {});
                }
            }
        }
    });

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let is_teacher = ctx.session().user().is_some_and(|user| user.role() == Role::Teacher);

    rsx! {
        nav { class: "sidebar",
            h1 { "Assesify" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                if is_teacher {
                    li { Link { to: Route::Teacher {}, "Teacher Dashboard" } }
                }
                li { Link { to: Route::Profile {}, "Profile" } }
                li {
                    button {
                        class: "sidebar-logout",
                        r#type: "button",
                        onclick: move |_| {
                            let auth = auth.clone();
                            spawn(async move {
                                if let Err(err) = auth.logout().await {
                                    tracing::error!(error = %err, "logout failed");
                                }
                            });
                        },
                        "Log out"
                    }
                }
            }
        }
    }
}
