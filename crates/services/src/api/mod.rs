//! HTTP client for the Assesify API.

pub(crate) mod dto;

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ApiError, GENERIC_API_MESSAGE};
use crate::session_context::SessionContext;

/// Whether a request carries the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Attach the token when one is present.
    Session,
    /// Never attach a token (login, register).
    Anonymous,
}

/// Thin JSON wrapper over `reqwest` that knows the base URL and the session.
///
/// A 401 or 422 response to a session request invalidates the session before
/// the error is returned. Anonymous requests (login, register) never do.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Arc<SessionContext>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, session: Arc<SessionContext>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` (without a leading slash) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Endpoint` if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, auth: Auth) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path, auth)?;
        self.execute(request, auth).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    pub async fn post_json<B, T>(&self, path: &str, body: &B, auth: Auth) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path, auth)?.json(body);
        self.execute(request, auth).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    pub async fn put_json<B, T>(&self, path: &str, body: &B, auth: Auth) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path, auth)?.json(body);
        self.execute(request, auth).await
    }

    fn request(&self, method: Method, path: &str, auth: Auth) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%method, %url, "api request");
        let mut request = self.client.request(method, url);
        if auth == Auth::Session {
            if let Some(token) = self.session.token() {
                request = request.bearer_auth(token.as_str());
            }
        }
        Ok(request)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        auth: Auth,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let response = self.check_status(response, auth).await?;
        Ok(response.json().await?)
    }

    async fn check_status(&self, response: Response, auth: Auth) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::debug!(status = status.as_u16(), %message, "api error response");

        let rejected = matches!(status, StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY);
        if rejected && auth == Auth::Session {
            self.session.invalidate(status.as_u16()).await;
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
                message,
            });
        }
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Pull a human message out of an error body (`msg`, `message` or `error`).
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["msg", "message", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_API_MESSAGE.to_string())
}
