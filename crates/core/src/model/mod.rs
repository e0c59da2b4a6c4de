mod class;
mod ids;
mod question;
mod quiz;
mod session;
mod submission;
mod user;

pub use ids::{ClassId, ParseIdError, QuizId, UserId};

pub use class::{ClassSummary, CreatedClass, JoinedClass, normalize_class_code};
pub use question::{AnswerMatch, FALLBACK_OPTIONS, Question, QuestionError};
pub use quiz::QuizListing;
pub use session::{
    Advance, CheckOutcome, POINTS_PER_CORRECT, QuizPhase, QuizScore, QuizSession, SessionError,
};
pub use submission::{QuizSubmission, SubmissionRecord, SubmitReceipt};
pub use user::{Role, User};
