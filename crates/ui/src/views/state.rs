use dioxus::prelude::*;
use services::{AuthError, ClassError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    /// The API could not be reached or rejected the request.
    Unavailable,
    SignedOut,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Unknown => "Something went wrong. Please try again.",
            Self::Unavailable => "Could not reach Assesify. Please try again.",
            Self::SignedOut => "Please log in again.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Inline message for a failed auth form.
#[must_use]
pub fn auth_error_message(err: &AuthError) -> String {
    match err {
        AuthError::MissingField(field) => format!("Please enter your {field}."),
        AuthError::SignedOut => ViewError::SignedOut.message().to_string(),
        AuthError::Api(api) => api.user_message(),
        _ => ViewError::Unknown.message().to_string(),
    }
}

/// Inline message for a failed class action.
#[must_use]
pub fn class_error_message(err: &ClassError) -> String {
    match err {
        ClassError::MissingField(field) => format!("Please enter a {field}."),
        ClassError::Api(api) => api.user_message(),
        _ => ViewError::Unknown.message().to_string(),
    }
}
