//! screener-core
//!
//! Pure domain types for the behaviour screening questionnaire: questions,
//! answers, prediction results, the questionnaire state and the mapping from
//! a result to its presentation. No I/O — this is the shared vocabulary of
//! the client and the terminal front end.

pub mod catalog;
pub mod error;
pub mod models;
pub mod presentation;
pub mod questionnaire;
