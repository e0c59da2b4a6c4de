use std::sync::Arc;

use services::{AuthService, ClassService, QuizService, SessionContext};

/// What the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<SessionContext>;
    fn auth(&self) -> Arc<AuthService>;
    fn classes(&self) -> Arc<ClassService>;
    fn quizzes(&self) -> Arc<QuizService>;
}

#[derive(Clone)]
pub struct AppContext {
    session: Arc<SessionContext>,
    auth: Arc<AuthService>,
    classes: Arc<ClassService>,
    quizzes: Arc<QuizService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            auth: app.auth(),
            classes: app.classes(),
            quizzes: app.quizzes(),
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionContext> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn classes(&self) -> Arc<ClassService> {
        Arc::clone(&self.classes)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
