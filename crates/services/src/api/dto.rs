//! Wire shapes of the Assesify API that have no domain counterpart.

use assesify_core::model::{
    ClassId, CreatedClass, JoinedClass, Question, QuestionError, User, UserId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct QuizDto {
    #[serde(default)]
    pub questions: Vec<QuestionDto>,
}

/// The server names the explanation `answer` and sends every field loosely.
#[derive(Debug, Deserialize)]
pub(crate) struct QuestionDto {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl QuestionDto {
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(
            self.question,
            self.options.unwrap_or_default(),
            self.correct_answer.unwrap_or_default(),
            self.answer.unwrap_or_default(),
            self.hint,
        )
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub access_token: String,
    pub user_id: UserId,
    #[serde(default)]
    pub is_teacher: bool,
    #[serde(default)]
    pub full_name: String,
}

impl LoginResponse {
    pub fn user(&self, email: &str) -> User {
        User {
            id: self.user_id,
            full_name: self.full_name.clone(),
            email: Some(email.to_string()),
            is_teacher: self.is_teacher,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub email: &'a str,
    pub full_name: &'a str,
    pub password: &'a str,
    pub is_teacher: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateProfileRequest<'a> {
    pub full_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateProfileResponse {
    pub user: User,
}

/// `{"msg": ...}` acknowledgement.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub msg: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct JoinClassRequest<'a> {
    pub code: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JoinClassResponse {
    pub class: JoinedClass,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateClassRequest<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateClassResponse {
    pub id: ClassId,
    pub code: String,
}

impl From<CreateClassResponse> for CreatedClass {
    fn from(value: CreateClassResponse) -> Self {
        Self {
            id: value.id,
            code: value.code,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct InviteRequest<'a> {
    pub email: &'a str,
    pub full_name: &'a str,
}
