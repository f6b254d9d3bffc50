//! screener-client
//!
//! HTTP access to the prediction service: fetch the question set, submit
//! answers, check service health. Every failure is normalised into a
//! [`error::ClientError`] carrying a message fit to show the user.

pub mod api;
pub mod client;
pub mod error;
