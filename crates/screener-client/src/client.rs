use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use screener_core::models::answer::AnswerMap;
use screener_core::models::question::{Question, QuestionList};
use screener_core::models::result::ScreeningResult;

use crate::api::{BoxFuture, ScreeningApi};
use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
}

/// Blocking `ureq` agent driven from tokio's blocking pool.
#[derive(Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /`. Used at startup to report whether the service is up.
    pub async fn health(&self) -> Result<ServiceStatus, ClientError> {
        self.get_json("/").await
    }

    pub async fn questions(&self) -> Result<Vec<Question>, ClientError> {
        let list: QuestionList = self.get_json("/questions").await?;
        tracing::info!(count = list.questions.len(), "questions fetched");
        Ok(list.questions)
    }

    pub async fn predict(&self, answers: &AnswerMap) -> Result<ScreeningResult, ClientError> {
        let body = encode_body(answers)?;
        tracing::debug!(payload = %body, "submitting answers");

        let result: ScreeningResult = self.post_json("/predict", body).await?;
        tracing::info!(
            risk_level = %result.risk_level,
            confidence = result.confidence,
            "prediction received"
        );
        Ok(result)
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let agent = self.agent.clone();
        let url = self.url(path);
        run_blocking(move || {
            let started = Instant::now();
            let outcome = agent.get(&url).call();
            read_json(&url, started, outcome)
        })
        .await
    }

    async fn post_json<T>(&self, path: &str, body: String) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let agent = self.agent.clone();
        let url = self.url(path);
        run_blocking(move || {
            let started = Instant::now();
            let outcome = agent
                .post(&url)
                .header("content-type", "application/json")
                .send(body.as_bytes());
            read_json(&url, started, outcome)
        })
        .await
    }
}

/// Encode an outgoing JSON body. Failures are request-side errors.
pub fn encode_body<T: Serialize + ?Sized>(value: &T) -> Result<String, ClientError> {
    serde_json::to_string(value).map_err(|e| {
        tracing::warn!(error = %e, "failed to encode request body");
        ClientError::InvalidRequest(e.to_string())
    })
}

async fn run_blocking<T, F>(f: F) -> Result<T, ClientError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ClientError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ClientError::NetworkUnreachable(format!("request task failed: {e}")))?
}

fn read_json<T: DeserializeOwned>(
    url: &str,
    started: Instant,
    outcome: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
) -> Result<T, ClientError> {
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let mut response = match outcome {
        Ok(response) => response,
        Err(e) => {
            let err = ClientError::from(e);
            tracing::warn!(url, elapsed_ms, error = %err, "request failed");
            return Err(err);
        }
    };

    tracing::debug!(
        url,
        status = response.status().as_u16(),
        elapsed_ms,
        "request completed"
    );

    let text = response.body_mut().read_to_string().map_err(|e| {
        tracing::warn!(url, error = %e, "failed to read response body");
        ClientError::from(e)
    })?;

    serde_json::from_str(&text).map_err(|e| {
        tracing::warn!(url, error = %e, "response did not match the expected shape");
        ClientError::from(e)
    })
}

impl ScreeningApi for HttpClient {
    fn fetch_questions(&self) -> BoxFuture<'_, Result<Vec<Question>, ClientError>> {
        Box::pin(self.questions())
    }

    fn submit_answers<'a>(
        &'a self,
        answers: &'a AnswerMap,
    ) -> BoxFuture<'a, Result<ScreeningResult, ClientError>> {
        Box::pin(self.predict(answers))
    }
}
