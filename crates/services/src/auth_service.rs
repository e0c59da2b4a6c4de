use assesify_core::model::User;

use crate::api::dto::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UpdateProfileRequest,
    UpdateProfileResponse,
};
use crate::api::{ApiClient, Auth};
use crate::error::AuthError;
use crate::session_context::AccessToken;

/// A new account, as entered on the register page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub is_teacher: bool,
}

/// Login, registration and profile calls, keeping `SessionContext` current.
#[derive(Clone, Debug)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a token and cache the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` for blank input, `AuthError::Api` when the
    /// server rejects the credentials, `AuthError::Storage` if caching fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = required(email, "email")?;
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let response: LoginResponse = self
            .api
            .post_json("auth/login", &LoginRequest { email, password }, Auth::Anonymous)
            .await?;

        let user = response.user(email);
        self.api
            .session()
            .sign_in(AccessToken::new(response.access_token), Some(user.clone()))
            .await?;
        tracing::info!(user_id = %user.id, teacher = user.is_teacher, "signed in");
        Ok(user)
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` for blank input or `AuthError::Api`.
    pub async fn register(&self, registration: &Registration) -> Result<String, AuthError> {
        let request = RegisterRequest {
            email: required(&registration.email, "email")?,
            full_name: required(&registration.full_name, "full name")?,
            password: &registration.password,
            is_teacher: registration.is_teacher,
        };
        if request.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let response: MessageResponse = self
            .api
            .post_json("auth/register", &request, Auth::Anonymous)
            .await?;
        Ok(response
            .msg
            .unwrap_or_else(|| "User created successfully".to_string()))
    }

    /// Fetch the current profile and refresh the cached user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SignedOut` without a token, `AuthError::Api` or
    /// `AuthError::Storage`.
    pub async fn profile(&self) -> Result<User, AuthError> {
        if !self.api.session().is_signed_in() {
            return Err(AuthError::SignedOut);
        }
        let user: User = self.api.get_json("auth/profile", Auth::Session).await?;
        self.api.session().store_user(user.clone()).await?;
        Ok(user)
    }

    /// Rename the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` for a blank name, `AuthError::Api` or
    /// `AuthError::Storage`.
    pub async fn update_profile(&self, full_name: &str) -> Result<User, AuthError> {
        let full_name = required(full_name, "full name")?;
        let response: UpdateProfileResponse = self
            .api
            .put_json(
                "auth/update-profile",
                &UpdateProfileRequest { full_name },
                Auth::Session,
            )
            .await?;
        self.api.session().store_user(response.user.clone()).await?;
        Ok(response.user)
    }

    /// Forget the token and cached user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the local cache cannot be cleared.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.api.session().sign_out().await?;
        tracing::info!("signed out");
        Ok(())
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}
