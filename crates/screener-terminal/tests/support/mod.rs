#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use screener_client::api::{BoxFuture, ScreeningApi};
use screener_client::error::ClientError;
use screener_core::models::answer::AnswerMap;
use screener_core::models::question::Question;
use screener_core::models::result::{RiskLevel, ScreeningResult};

/// Scripted stand-in for the prediction service. Each call pops the next
/// scripted outcome; an exhausted script behaves like an unreachable host.
#[derive(Default)]
pub struct FakeApi {
    questions: Mutex<VecDeque<Result<Vec<Question>, ClientError>>>,
    predictions: Mutex<VecDeque<Result<ScreeningResult, ClientError>>>,
    log: Calls,
}

/// Shared view of the calls made against a [`FakeApi`].
#[derive(Default, Clone)]
pub struct Calls {
    pub fetches: Arc<Mutex<usize>>,
    pub submitted: Arc<Mutex<Vec<AnswerMap>>>,
}

impl Calls {
    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }

    pub fn submissions(&self) -> Vec<AnswerMap> {
        self.submitted.lock().unwrap().clone()
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn questions(self, outcome: Result<Vec<Question>, ClientError>) -> Self {
        self.questions.lock().unwrap().push_back(outcome);
        self
    }

    pub fn prediction(self, outcome: Result<ScreeningResult, ClientError>) -> Self {
        self.predictions.lock().unwrap().push_back(outcome);
        self
    }

    pub fn calls(&self) -> Calls {
        self.log.clone()
    }
}

fn exhausted() -> ClientError {
    ClientError::NetworkUnreachable("script exhausted".to_string())
}

impl ScreeningApi for FakeApi {
    fn fetch_questions(&self) -> BoxFuture<'_, Result<Vec<Question>, ClientError>> {
        *self.log.fetches.lock().unwrap() += 1;
        let next = self.questions.lock().unwrap().pop_front();
        Box::pin(async move { next.unwrap_or_else(|| Err(exhausted())) })
    }

    fn submit_answers<'a>(
        &'a self,
        answers: &'a AnswerMap,
    ) -> BoxFuture<'a, Result<ScreeningResult, ClientError>> {
        self.log.submitted.lock().unwrap().push(answers.clone());
        let next = self.predictions.lock().unwrap().pop_front();
        Box::pin(async move { next.unwrap_or_else(|| Err(exhausted())) })
    }
}

pub fn two_questions() -> Vec<Question> {
    vec![Question::new(1, "Q1", "a"), Question::new(2, "Q2", "b")]
}

pub fn high_risk() -> ScreeningResult {
    ScreeningResult {
        risk_level: RiskLevel::High,
        confidence: 88.0,
        prediction: "ASD traits likely".to_string(),
        message: "Most indicators were reported.".to_string(),
        doctor_recommendation: "Consult a developmental pediatrician.".to_string(),
    }
}
