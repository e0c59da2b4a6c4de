use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::api::ApiClient;
use crate::auth_service::AuthService;
use crate::class_service::{ClassGateway, ClassService};
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::quizzes::{QuizGateway, QuizService};
use crate::session_context::SessionContext;

/// Assembles app-facing services around one session and one HTTP client.
#[derive(Clone, Debug)]
pub struct AppServices {
    session: Arc<SessionContext>,
    auth: Arc<AuthService>,
    classes: Arc<ClassService>,
    quizzes: Arc<QuizService>,
}

impl AppServices {
    /// Build services over `storage` and restore any cached session.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the cache cannot be read or the HTTP client
    /// cannot be built.
    pub async fn new(
        config: &ApiConfig,
        storage: Storage,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let session = Arc::new(SessionContext::new(Arc::clone(&storage.local), clock));
        session.restore().await?;

        let api = ApiClient::new(config, Arc::clone(&session))?;
        let gateway: Arc<dyn QuizGateway> = Arc::new(api.clone());
        let class_gateway: Arc<dyn ClassGateway> = Arc::new(api.clone());

        Ok(Self {
            auth: Arc::new(AuthService::new(api.clone())),
            classes: Arc::new(ClassService::new(class_gateway)),
            quizzes: Arc::new(QuizService::new(
                clock,
                config.answer_match,
                gateway,
                Arc::clone(&session),
            )),
            session,
        })
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        config: &ApiConfig,
        db_url: &str,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::new(config, storage, clock).await
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
