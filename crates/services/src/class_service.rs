use std::sync::Arc;

use assesify_core::model::{ClassSummary, CreatedClass, JoinedClass, normalize_class_code};
use async_trait::async_trait;

use crate::api::dto::{
    CreateClassRequest, CreateClassResponse, InviteRequest, JoinClassRequest, JoinClassResponse,
    MessageResponse,
};
use crate::api::{ApiClient, Auth};
use crate::error::{ApiError, ClassError};

/// Remote side of class membership and class management.
#[async_trait]
pub trait ClassGateway: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn list_classes(&self) -> Result<Vec<ClassSummary>, ApiError>;

    /// `code` is already normalized.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn join_class(&self, code: &str) -> Result<JoinedClass, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn create_class(
        &self,
        name: &str,
        section: Option<&str>,
    ) -> Result<CreatedClass, ApiError>;

    /// Returns the server's message, if any.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn invite_student(
        &self,
        email: &str,
        full_name: &str,
    ) -> Result<Option<String>, ApiError>;
}

#[async_trait]
impl ClassGateway for ApiClient {
    async fn list_classes(&self) -> Result<Vec<ClassSummary>, ApiError> {
        self.get_json("classes/", Auth::Session).await
    }

    async fn join_class(&self, code: &str) -> Result<JoinedClass, ApiError> {
        let response: JoinClassResponse = self
            .post_json("classes/join", &JoinClassRequest { code }, Auth::Session)
            .await?;
        Ok(response.class)
    }

    async fn create_class(
        &self,
        name: &str,
        section: Option<&str>,
    ) -> Result<CreatedClass, ApiError> {
        let response: CreateClassResponse = self
            .post_json("classes/", &CreateClassRequest { name, section }, Auth::Session)
            .await?;
        Ok(response.into())
    }

    async fn invite_student(
        &self,
        email: &str,
        full_name: &str,
    ) -> Result<Option<String>, ApiError> {
        let response: MessageResponse = self
            .post_json("teacher/invite", &InviteRequest { email, full_name }, Auth::Session)
            .await?;
        Ok(response.msg)
    }
}

/// Class membership for students and class management for teachers.
#[derive(Clone)]
pub struct ClassService {
    gateway: Arc<dyn ClassGateway>,
}

impl ClassService {
    #[must_use]
    pub fn new(gateway: Arc<dyn ClassGateway>) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// Returns `ClassError::Api` if the request fails.
    pub async fn list_classes(&self) -> Result<Vec<ClassSummary>, ClassError> {
        Ok(self.gateway.list_classes().await?)
    }

    /// Join a class by its code. The code is trimmed and upper-cased first.
    ///
    /// # Errors
    ///
    /// Returns `ClassError::MissingField` for a blank code or `ClassError::Api`.
    pub async fn join_class(&self, code: &str) -> Result<JoinedClass, ClassError> {
        let code = normalize_class_code(code).ok_or(ClassError::MissingField("class code"))?;
        let class = self.gateway.join_class(&code).await?;
        tracing::info!(class_id = %class.id, "joined class");
        Ok(class)
    }

    /// Create a class (teachers only; the server enforces it).
    ///
    /// # Errors
    ///
    /// Returns `ClassError::MissingField` for a blank name or `ClassError::Api`.
    pub async fn create_class(
        &self,
        name: &str,
        section: Option<&str>,
    ) -> Result<CreatedClass, ClassError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClassError::MissingField("class name"));
        }
        let section = section.map(str::trim).filter(|s| !s.is_empty());
        let created = self.gateway.create_class(name, section).await?;
        tracing::info!(class_id = %created.id, "created class");
        Ok(created)
    }

    /// Invite a student by email.
    ///
    /// # Errors
    ///
    /// Returns `ClassError::MissingField` for blank input or `ClassError::Api`
    /// (403 when the caller is not a teacher).
    pub async fn invite_student(&self, email: &str, full_name: &str) -> Result<String, ClassError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ClassError::MissingField("email"));
        }
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(ClassError::MissingField("full name"));
        }
        let message = self.gateway.invite_student(email, full_name).await?;
        Ok(message.unwrap_or_else(|| "Invitation sent successfully".to_string()))
    }
}

impl std::fmt::Debug for ClassService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassService").finish_non_exhaustive()
    }
}
