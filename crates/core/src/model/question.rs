use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options shown when a question arrives without any of its own.
pub const FALLBACK_OPTIONS: [&str; 2] = ["True", "False"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,
}

/// How a selected option is compared against the canonical answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerMatch {
    /// Surrounding whitespace is ignored; everything else must match exactly.
    #[default]
    Exact,
    /// Surrounding whitespace and letter case are ignored.
    CaseInsensitive,
}

impl AnswerMatch {
    #[must_use]
    pub fn matches(self, selected: &str, canonical: &str) -> bool {
        let selected = selected.trim();
        let canonical = canonical.trim();
        // A question without a canonical answer can never be answered correctly.
        if canonical.is_empty() {
            return false;
        }
        match self {
            Self::Exact => selected == canonical,
            Self::CaseInsensitive => selected.to_lowercase() == canonical.to_lowercase(),
        }
    }

    /// Parse the configuration spelling (`exact` / `case-insensitive`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "exact" => Some(Self::Exact),
            "case-insensitive" | "case_insensitive" | "ci" => Some(Self::CaseInsensitive),
            _ => None,
        }
    }
}

/// A single multiple-choice question, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
    explanation: String,
    hint: Option<String>,
}

impl Question {
    /// Build a question from server-supplied parts.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` when the prompt is blank.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        explanation: impl Into<String>,
        hint: Option<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        let options = options
            .into_iter()
            .filter(|option| !option.trim().is_empty())
            .collect();

        Ok(Self {
            prompt,
            options,
            correct_answer: correct_answer.into(),
            explanation: explanation.into(),
            hint: hint.filter(|hint| !hint.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Options as supplied by the server (may be empty).
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Options to render: the server's list, or the true/false fallback.
    #[must_use]
    pub fn display_options(&self) -> Vec<&str> {
        if self.options.is_empty() {
            FALLBACK_OPTIONS.to_vec()
        } else {
            self.options.iter().map(String::as_str).collect()
        }
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.display_options().contains(&option)
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self, selected: &str, matcher: AnswerMatch) -> bool {
        matcher.matches(selected, &self.correct_answer)
    }
}
