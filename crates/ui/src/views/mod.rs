mod dashboard;
mod login;
mod not_found;
mod profile;
mod quiz;
mod register;
mod state;
mod teacher;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use login::LoginView;
pub use not_found::NotFoundView;
pub use profile::ProfileView;
pub use quiz::QuizView;
pub use register::RegisterView;
pub use teacher::TeacherView;
pub use state::{
    ViewError, ViewState, auth_error_message, class_error_message, view_state_from_resource,
};
