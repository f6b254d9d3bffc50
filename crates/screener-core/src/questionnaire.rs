//! State of one screening session: the active question set and the answers
//! recorded against it.
//!
//! Every key in the answer map is the `field` of a question in the active
//! set. Answers may be overwritten any number of times before submission.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::models::answer::{AnswerMap, AnswerValue};
use crate::models::question::Question;

/// Answered/total counts with a rounded percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    /// `round(100 * answered / total)`, halves rounded up.
    pub percent: u8,
}

impl Progress {
    fn new(answered: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            ((200 * answered + total) / (2 * total)) as u8
        };
        Self {
            answered,
            total,
            percent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionnaireState {
    questions: Vec<Question>,
    answers: AnswerMap,
}

impl QuestionnaireState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the question set and clear all answers.
    ///
    /// On error the existing state is left untouched.
    pub fn initialize(&mut self, questions: Vec<Question>) -> Result<(), CoreError> {
        if questions.is_empty() {
            return Err(CoreError::EmptyQuestionSet);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.field.as_str()) {
                return Err(CoreError::DuplicateField(question.field.clone()));
            }
        }

        self.questions = questions;
        self.answers.clear();
        Ok(())
    }

    /// Record (or overwrite) the answer for `field`.
    ///
    /// Returns the previous answer, if there was one.
    pub fn record_answer(
        &mut self,
        field: &str,
        value: AnswerValue,
    ) -> Result<Option<AnswerValue>, CoreError> {
        if !self.questions.iter().any(|q| q.field == field) {
            return Err(CoreError::UnknownField(field.to_string()));
        }
        Ok(self.answers.insert(field, value))
    }

    /// Progress through the active set. An uninitialised state reports
    /// `0 / 0` at 0%.
    pub fn progress(&self) -> Progress {
        Progress::new(self.answers.len(), self.questions.len())
    }

    /// True when the active set is non-empty and every question has an answer.
    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty() && self.answers.len() == self.questions.len()
    }

    pub fn is_initialized(&self) -> bool {
        !self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn answer_for(&self, field: &str) -> Option<AnswerValue> {
        self.answers.get(field)
    }

    /// Questions still without an answer, in display order.
    pub fn unanswered(&self) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| !self.answers.contains(&q.field))
            .collect()
    }

    /// The answer map to submit, keyed in question display order.
    pub fn payload(&self) -> Result<AnswerMap, CoreError> {
        if !self.is_complete() {
            return Err(CoreError::Incomplete {
                remaining: self.questions.len() - self.answers.len(),
            });
        }

        let mut payload = AnswerMap::new();
        for question in &self.questions {
            if let Some(value) = self.answers.get(&question.field) {
                payload.insert(question.field.clone(), value);
            }
        }
        Ok(payload)
    }

    pub fn reset(&mut self) {
        self.questions.clear();
        self.answers.clear();
    }
}
