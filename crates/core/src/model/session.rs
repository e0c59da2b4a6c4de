use chrono::{DateTime, Duration, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::{
    AnswerMatch, ClassId, Question, QuizId, QuizSubmission, SubmissionRecord, UserId,
};

/// Points awarded for each correctly answered question.
pub const POINTS_PER_CORRECT: u32 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("quiz has no questions")]
    Empty,

    #[error("no option selected")]
    NoSelection,

    #[error("option not offered by the current question: {0}")]
    UnknownOption(String),

    #[error("answer is locked until the next question")]
    Locked,

    #[error("answer has not been checked yet")]
    NotChecked,

    #[error("quiz is still in progress")]
    InProgress,

    #[error("quiz session already completed")]
    Completed,
}

/// Which inputs the session currently accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Awaiting a selection or a check.
    Idle,
    /// Answer revealed, awaiting advance.
    Review,
    /// Terminal.
    Complete,
}

impl QuizPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Review => "review",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Correct,
    Incorrect,
}

impl CheckOutcome {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Result of leaving the review phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at `index`.
    Next { index: usize },
    /// The last question was reviewed; the session is now terminal.
    ///
    /// Returned exactly once per session.
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizScore {
    pub points: u32,
    pub correct: u32,
    pub total: u32,
}

/// Client-local run of one quiz, from first question to completion.
///
/// The question list is fixed at construction. The index only moves forward
/// and never passes `len - 1`.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz_id: QuizId,
    questions: Vec<Question>,
    matcher: AnswerMatch,
    index: usize,
    selection: Option<String>,
    phase: QuizPhase,
    points: u32,
    correct: u32,
    answers: Vec<SubmissionRecord>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session over the given questions.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if there are no questions.
    pub fn new(
        quiz_id: QuizId,
        questions: Vec<Question>,
        matcher: AnswerMatch,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        let capacity = questions.len();

        Ok(Self {
            quiz_id,
            questions,
            matcher,
            index: 0,
            selection: None,
            phase: QuizPhase::Idle,
            points: 0,
            correct: 0,
            answers: Vec::with_capacity(capacity),
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.index]
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    #[must_use]
    pub fn matcher(&self) -> AnswerMatch {
        self.matcher
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.index + 1 == self.questions.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::Complete
    }

    #[must_use]
    pub fn score(&self) -> QuizScore {
        QuizScore {
            points: self.points,
            correct: self.correct,
            total: u32::try_from(self.questions.len()).unwrap_or(u32::MAX),
        }
    }

    /// Answers recorded so far, one per checked question.
    #[must_use]
    pub fn answers(&self) -> &[SubmissionRecord] {
        &self.answers
    }

    /// Outcome of the current question once it has been checked.
    #[must_use]
    pub fn current_outcome(&self) -> Option<CheckOutcome> {
        if self.phase == QuizPhase::Idle {
            return None;
        }
        self.answers.last().map(|record| {
            if record.is_correct {
                CheckOutcome::Correct
            } else {
                CheckOutcome::Incorrect
            }
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.completed_at.map(|done| done - self.started_at)
    }

    /// Record the learner's choice for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Locked` once the answer has been checked,
    /// `SessionError::Completed` after the last question, and
    /// `SessionError::UnknownOption` for options the question does not offer.
    pub fn select(&mut self, option: &str) -> Result<(), SessionError> {
        match self.phase {
            QuizPhase::Idle => {}
            QuizPhase::Review => return Err(SessionError::Locked),
            QuizPhase::Complete => return Err(SessionError::Completed),
        }
        if !self.current_question().has_option(option) {
            return Err(SessionError::UnknownOption(option.to_owned()));
        }
        self.selection = Some(option.to_owned());
        Ok(())
    }

    /// Compare the selection with the canonical answer and reveal the result.
    ///
    /// Checking again during review returns the same outcome without
    /// touching the score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSelection` when nothing (or only whitespace)
    /// is selected, and `SessionError::Completed` after the last question.
    pub fn check(&mut self) -> Result<CheckOutcome, SessionError> {
        match self.phase {
            QuizPhase::Idle => {}
            QuizPhase::Review => return self.current_outcome().ok_or(SessionError::NotChecked),
            QuizPhase::Complete => return Err(SessionError::Completed),
        }

        let selected = match self.selection.as_deref() {
            Some(value) if !value.trim().is_empty() => value.to_owned(),
            _ => return Err(SessionError::NoSelection),
        };

        let question = &self.questions[self.index];
        let is_correct = question.is_correct(&selected, self.matcher);
        self.answers.push(SubmissionRecord {
            question: question.prompt().to_owned(),
            answer: selected,
            is_correct,
        });

        if is_correct {
            self.correct = self.correct.saturating_add(1);
            self.points = self.points.saturating_add(POINTS_PER_CORRECT);
        }
        self.phase = QuizPhase::Review;

        Ok(if is_correct {
            CheckOutcome::Correct
        } else {
            CheckOutcome::Incorrect
        })
    }

    /// Leave review: move to the next question, or finish the quiz.
    ///
    /// `now` should come from the caller's clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotChecked` while idle and
    /// `SessionError::Completed` once the session is terminal.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance, SessionError> {
        match self.phase {
            QuizPhase::Review => {}
            QuizPhase::Idle => return Err(SessionError::NotChecked),
            QuizPhase::Complete => return Err(SessionError::Completed),
        }

        if self.is_last_question() {
            self.phase = QuizPhase::Complete;
            self.completed_at = Some(now);
            return Ok(Advance::Completed);
        }

        self.index += 1;
        self.selection = None;
        self.phase = QuizPhase::Idle;
        Ok(Advance::Next { index: self.index })
    }

    /// Build the submission body for a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InProgress` until the session is complete.
    pub fn submission(
        &self,
        user_id: UserId,
        class_id: Option<ClassId>,
    ) -> Result<QuizSubmission, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::InProgress);
        }
        Ok(QuizSubmission {
            quiz_id: self.quiz_id,
            user_id,
            class_id,
            answers: self.answers.clone(),
        })
    }
}
