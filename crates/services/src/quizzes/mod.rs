mod gateway;
mod service;

pub use gateway::QuizGateway;
pub use service::{QuizLoad, QuizService};
