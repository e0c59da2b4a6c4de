use serde::{Deserialize, Serialize};

use crate::model::{ClassId, QuizId, UserId};

/// One answered question as reported to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub question: String,
    pub answer: String,
    pub is_correct: bool,
}

/// Body of `POST /quizzes/{id}/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSubmission {
    #[serde(skip)]
    pub quiz_id: QuizId,
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<ClassId>,
    pub answers: Vec<SubmissionRecord>,
}

impl QuizSubmission {
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }
}

/// What the server reports back after a submission. Every field is optional:
/// teacher accounts get a reduced payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SubmitReceipt {
    pub message: Option<String>,
    pub attempt_id: Option<u64>,
    pub score: Option<f64>,
    pub health: Option<u32>,
    pub streak: Option<u32>,
    pub diamonds_earned: Option<u32>,
}
