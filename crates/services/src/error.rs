//! Shared error types for the services crate.

use thiserror::Error;

use assesify_core::model::SessionError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Fallback message when the server gives no usable error body.
pub const GENERIC_API_MESSAGE: &str = "API Error";

/// Errors emitted by the HTTP layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// 401/422 on a session request: the session was invalidated before this
    /// error was returned. Anonymous rejections surface as `Status`.
    #[error("unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid endpoint path: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// Message suitable for showing next to a form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized { message, .. } | Self::Status { message, .. } => message.clone(),
            Self::Endpoint(_) | Self::Http(_) => GENERIC_API_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::Endpoint(_) => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API URL {raw:?}: {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API URL must use http or https: {0}")]
    UnsupportedScheme(String),
    #[error("invalid answer matching mode: {0} (expected `exact` or `case-insensitive`)")]
    InvalidAnswerMatch(String),
    #[error("invalid HTTP timeout: {0}")]
    InvalidTimeout(String),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("not signed in")]
    SignedOut,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ClassService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClassError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while submitting a finished quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizSubmitError {
    #[error("no signed-in user to attribute the attempt to")]
    SignedOut,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
