mod quiz_vm;

pub use quiz_vm::{
    CompletionVm, FeedbackVm, OptionState, OptionVm, QuizIntent, QuizStep, QuizVm,
};
