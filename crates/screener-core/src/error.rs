use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("the question set is empty")]
    EmptyQuestionSet,

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field appears more than once in the question set: {0}")]
    DuplicateField(String),

    #[error("invalid answer value {0} (expected 0 or 1)")]
    InvalidAnswer(i64),

    #[error("questionnaire incomplete: {remaining} question(s) unanswered")]
    Incomplete { remaining: usize },
}
