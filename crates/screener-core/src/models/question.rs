use serde::{Deserialize, Serialize};

/// A single yes/no screening question.
///
/// `field` is the stable key used in the answer map and the outgoing
/// payload. `id` is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub field: String,
}

impl Question {
    pub fn new(id: u32, text: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            field: field.into(),
        }
    }
}

/// Body of `GET /questions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionList {
    pub questions: Vec<Question>,
}
