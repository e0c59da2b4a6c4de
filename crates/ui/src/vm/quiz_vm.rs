use assesify_core::model::{Advance, CheckOutcome, QuizPhase, QuizSession, SessionError, SubmitReceipt};
use assesify_core::progress::{
    bar_width_css, correct_label, elapsed_label, points_label, progress_percent,
};
use chrono::{DateTime, Utc};

/// User input on the quiz page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(String),
    Check,
    Continue,
}

/// What the page should do after applying an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizStep {
    Stay,
    /// The last question was left. Emitted once per session.
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Idle,
    Selected,
    Correct,
    Incorrect,
    Dimmed,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Idle => "quiz-option",
            Self::Selected => "quiz-option quiz-option--selected",
            Self::Correct => "quiz-option quiz-option--correct",
            Self::Incorrect => "quiz-option quiz-option--incorrect",
            Self::Dimmed => "quiz-option quiz-option--dimmed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub state: OptionState,
}

/// Review-phase banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub title: &'static str,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionVm {
    pub points: String,
    pub correct: String,
    pub elapsed: Option<String>,
    pub streak: Option<u32>,
    pub diamonds: Option<u32>,
}

/// Presentation wrapper around a running `QuizSession`.
#[derive(Clone, Debug)]
pub struct QuizVm {
    session: QuizSession,
    receipt: Option<SubmitReceipt>,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            receipt: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        self.session.current_question().prompt()
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.session.current_question().hint()
    }

    #[must_use]
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.session.index() + 1, self.session.total())
    }

    /// Width of the progress bar fill, e.g. `"33%"`.
    #[must_use]
    pub fn progress_width(&self) -> String {
        let percent = if self.session.is_complete() {
            100.0
        } else {
            progress_percent(self.session.index(), self.session.total())
        };
        bar_width_css(percent)
    }

    #[must_use]
    pub fn options(&self) -> Vec<OptionVm> {
        let question = self.session.current_question();
        let selection = self.session.selection();
        let reviewing = self.session.phase() == QuizPhase::Review;
        question
            .display_options()
            .into_iter()
            .map(|label| {
                let selected = selection == Some(label);
                let state = if !reviewing {
                    if selected {
                        OptionState::Selected
                    } else {
                        OptionState::Idle
                    }
                } else if question.is_correct(label, self.session.matcher()) {
                    OptionState::Correct
                } else if selected {
                    OptionState::Incorrect
                } else {
                    OptionState::Dimmed
                };
                OptionVm {
                    label: label.to_string(),
                    state,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn can_check(&self) -> bool {
        self.session.phase() == QuizPhase::Idle
            && self
                .session
                .selection()
                .is_some_and(|value| !value.trim().is_empty())
    }

    #[must_use]
    pub fn feedback(&self) -> Option<FeedbackVm> {
        let outcome = self.session.current_outcome()?;
        if self.session.phase() != QuizPhase::Review {
            return None;
        }
        let correct = outcome == CheckOutcome::Correct;
        Some(FeedbackVm {
            correct,
            title: if correct { "Correct!" } else { "Incorrect" },
            explanation: self.session.current_question().explanation().to_string(),
        })
    }

    #[must_use]
    pub fn primary_label(&self) -> &'static str {
        match self.session.phase() {
            QuizPhase::Idle => "Check",
            QuizPhase::Review | QuizPhase::Complete => "Continue",
        }
    }

    /// The intent the primary button sends in the current phase.
    #[must_use]
    pub fn primary_intent(&self) -> QuizIntent {
        match self.session.phase() {
            QuizPhase::Idle => QuizIntent::Check,
            QuizPhase::Review | QuizPhase::Complete => QuizIntent::Continue,
        }
    }

    #[must_use]
    pub fn completion(&self) -> Option<CompletionVm> {
        if !self.session.is_complete() {
            return None;
        }
        let score = self.session.score();
        Some(CompletionVm {
            points: points_label(score),
            correct: correct_label(score),
            elapsed: self.session.elapsed().map(elapsed_label),
            streak: self.receipt.as_ref().and_then(|r| r.streak),
            diamonds: self.receipt.as_ref().and_then(|r| r.diamonds_earned),
        })
    }

    pub fn set_receipt(&mut self, receipt: SubmitReceipt) {
        self.receipt = Some(receipt);
    }

    /// Apply one intent to the session.
    ///
    /// # Errors
    ///
    /// Returns the `SessionError` for input the current phase does not accept.
    pub fn apply(&mut self, intent: QuizIntent, now: DateTime<Utc>) -> Result<QuizStep, SessionError> {
        match intent {
            QuizIntent::Select(option) => {
                self.session.select(&option)?;
                Ok(QuizStep::Stay)
            }
            QuizIntent::Check => {
                self.session.check()?;
                Ok(QuizStep::Stay)
            }
            QuizIntent::Continue => match self.session.advance(now)? {
                Advance::Next { .. } => Ok(QuizStep::Stay),
                Advance::Completed => Ok(QuizStep::Completed),
            },
        }
    }
}
