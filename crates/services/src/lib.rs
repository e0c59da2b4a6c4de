#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth_service;
pub mod class_service;
pub mod config;
pub mod error;
pub mod lifetime;
pub mod quizzes;
pub mod session_context;

pub use assesify_core::Clock;

pub use api::{ApiClient, Auth};
pub use app_services::AppServices;
pub use auth_service::{AuthService, Registration};
pub use class_service::{ClassGateway, ClassService};
pub use config::ApiConfig;
pub use error::{ApiError, AppServicesError, AuthError, ClassError, ConfigError, QuizSubmitError};
pub use lifetime::{Lifetime, LifetimeToken};
pub use quizzes::{QuizGateway, QuizLoad, QuizService};
pub use session_context::{AccessToken, AuthEvent, SessionContext};
