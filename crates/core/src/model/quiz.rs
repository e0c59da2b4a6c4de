use serde::Deserialize;

use crate::model::QuizId;

/// A quiz as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizListing {
    pub id: QuizId,
    pub title: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub questions_count: u32,
}
