use serde::Deserialize;

use crate::model::ClassId;

/// A class the user is enrolled in or teaches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassSummary {
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub progress: u32,
}

/// Class details returned after joining with a code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JoinedClass {
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
}

/// Identity of a freshly created class.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedClass {
    pub id: ClassId,
    pub code: String,
}

/// Normalize a join code the way the server stores it.
#[must_use]
pub fn normalize_class_code(raw: &str) -> Option<String> {
    let code = raw.trim().to_uppercase();
    (!code.is_empty()).then_some(code)
}
