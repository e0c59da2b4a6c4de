use std::sync::Arc;

use assesify_core::model::{
    AnswerMatch, ClassId, QuizId, QuizListing, QuizSession, SubmitReceipt,
};
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use crate::Clock;
use crate::error::{ApiError, QuizSubmitError};
use crate::quizzes::QuizGateway;
use crate::session_context::SessionContext;

/// Outcome of loading a quiz for the quiz page.
#[derive(Debug, Clone)]
pub enum QuizLoad {
    Ready(QuizSession),
    /// Bad id, failed fetch or an empty question list.
    NotFound,
}

impl QuizLoad {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Loads quiz sessions and reports finished attempts.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    answer_match: AnswerMatch,
    gateway: Arc<dyn QuizGateway>,
    session: Arc<SessionContext>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        answer_match: AnswerMatch,
        gateway: Arc<dyn QuizGateway>,
        session: Arc<SessionContext>,
    ) -> Self {
        Self {
            clock,
            answer_match,
            gateway,
            session,
        }
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn answer_match(&self) -> AnswerMatch {
        self.answer_match
    }

    /// Load from a route segment. Ids that do not parse never hit the network.
    pub async fn load(&self, raw_id: &str) -> QuizLoad {
        match raw_id.parse::<QuizId>() {
            Ok(quiz_id) => self.load_id(quiz_id).await,
            Err(err) => {
                tracing::warn!(raw_id, error = %err, "quiz id does not parse");
                QuizLoad::NotFound
            }
        }
    }

    /// Fetch questions once and start a session. Failures are logged, not retried.
    pub async fn load_id(&self, quiz_id: QuizId) -> QuizLoad {
        let questions = match self.gateway.fetch_questions(quiz_id).await {
            Ok(questions) => questions,
            Err(err) => {
                tracing::warn!(%quiz_id, error = %err, "failed to load quiz");
                return QuizLoad::NotFound;
            }
        };

        match QuizSession::new(quiz_id, questions, self.answer_match, self.clock.now()) {
            Ok(session) => {
                tracing::debug!(%quiz_id, total = session.total(), "quiz loaded");
                QuizLoad::Ready(session)
            }
            Err(err) => {
                tracing::warn!(%quiz_id, error = %err, "quiz has no questions");
                QuizLoad::NotFound
            }
        }
    }

    /// Report a completed session for the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `QuizSubmitError::SignedOut` without a cached user,
    /// `QuizSubmitError::Session` if the session is not complete, or
    /// `QuizSubmitError::Api` if the request fails.
    pub async fn submit(
        &self,
        session: &QuizSession,
        class_id: Option<ClassId>,
    ) -> Result<SubmitReceipt, QuizSubmitError> {
        let user = self.session.user().ok_or(QuizSubmitError::SignedOut)?;
        let submission = session.submission(user.id, class_id)?;
        let receipt = self.gateway.submit(&submission).await?;
        tracing::info!(
            quiz_id = %submission.quiz_id,
            answers = submission.answers.len(),
            correct = submission.correct_count(),
            "quiz submitted"
        );
        Ok(receipt)
    }

    /// Like `submit`, but failures are logged and swallowed.
    pub async fn submit_logged(
        &self,
        session: &QuizSession,
        class_id: Option<ClassId>,
    ) -> Option<SubmitReceipt> {
        match self.submit(session, class_id).await {
            Ok(receipt) => Some(receipt),
            Err(err) => {
                tracing::error!(quiz_id = %session.quiz_id(), error = %err, "quiz submission failed");
                None
            }
        }
    }

    /// Send the attempt on its own task so it finishes even if the caller
    /// goes away. Dropping the handle detaches the task; it does not cancel it.
    #[must_use]
    pub fn submit_detached(
        &self,
        session: QuizSession,
        class_id: Option<ClassId>,
    ) -> JoinHandle<Option<SubmitReceipt>> {
        let service = self.clone();
        tokio::spawn(async move { service.submit_logged(&session, class_id).await })
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn recent(&self) -> Result<Vec<QuizListing>, ApiError> {
        self.gateway.recent_quizzes().await
    }
}

impl std::fmt::Debug for QuizService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizService")
            .field("answer_match", &self.answer_match)
            .finish_non_exhaustive()
    }
}
