use async_trait::async_trait;

use assesify_core::model::{Question, QuizId, QuizListing, QuizSubmission, SubmitReceipt};

use crate::api::dto::QuizDto;
use crate::api::{ApiClient, Auth};
use crate::error::ApiError;

/// Remote side of a quiz: questions in, attempts out.
#[async_trait]
pub trait QuizGateway: Send + Sync {
    /// Fetch the question sequence. Questions with a blank prompt are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn fetch_questions(&self, quiz_id: QuizId) -> Result<Vec<Question>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn submit(&self, submission: &QuizSubmission) -> Result<SubmitReceipt, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn recent_quizzes(&self) -> Result<Vec<QuizListing>, ApiError>;
}

#[async_trait]
impl QuizGateway for ApiClient {
    async fn fetch_questions(&self, quiz_id: QuizId) -> Result<Vec<Question>, ApiError> {
        let quiz: QuizDto = self
            .get_json(&format!("quizzes/{quiz_id}"), Auth::Session)
            .await?;
        let questions = quiz
            .questions
            .into_iter()
            .enumerate()
            .filter_map(|(position, dto)| match dto.into_question() {
                Ok(question) => Some(question),
                Err(err) => {
                    tracing::warn!(%quiz_id, position, error = %err, "skipping malformed question");
                    None
                }
            })
            .collect();
        Ok(questions)
    }

    async fn submit(&self, submission: &QuizSubmission) -> Result<SubmitReceipt, ApiError> {
        self.post_json(
            &format!("quizzes/{}/submit", submission.quiz_id),
            submission,
            Auth::Session,
        )
        .await
    }

    async fn recent_quizzes(&self) -> Result<Vec<QuizListing>, ApiError> {
        self.get_json("quizzes/recent", Auth::Session).await
    }
}
