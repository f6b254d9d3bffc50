//! Exercises `HttpClient` against an in-process stub of the prediction
//! service bound to an ephemeral port.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use screener_client::api::ScreeningApi;
use screener_client::client::{encode_body, ClientConfig, HttpClient};
use screener_client::error::ClientError;
use screener_core::catalog::behaviour_questions;
use screener_core::models::answer::{AnswerMap, AnswerValue};
use screener_core::models::result::RiskLevel;

type Seen = Arc<Mutex<Vec<Value>>>;

async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: String) -> HttpClient {
    HttpClient::new(ClientConfig {
        base_url,
        timeout: Duration::from_secs(5),
    })
}

async fn questions() -> Json<Value> {
    Json(json!({ "questions": behaviour_questions() }))
}

async fn predict(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
    seen.lock().unwrap().push(body);
    Json(json!({
        "risk_level": "medium",
        "confidence": 62.5,
        "prediction": "Some ASD traits",
        "message": "Several indicators were reported.",
        "doctor_recommendation": "Book a developmental assessment.",
        "top_features": ["eye_contact"]
    }))
}

fn healthy_service(seen: Seen) -> Router {
    Router::new()
        .route("/", get(|| async { Json(json!({ "status": "ok" })) }))
        .route("/questions", get(questions))
        .route("/predict", post(predict))
        .with_state(seen)
}

#[tokio::test]
async fn fetches_question_set() {
    let base = spawn_stub(healthy_service(Seen::default())).await;
    let questions = client(base).fetch_questions().await.unwrap();

    assert_eq!(questions.len(), 10);
    assert_eq!(questions[0].field, "eye_contact");
    assert_eq!(questions[9].id, 10);
}

#[tokio::test]
async fn submits_answers_as_flat_object() {
    let seen = Seen::default();
    let base = spawn_stub(healthy_service(seen.clone())).await;

    let mut answers = AnswerMap::new();
    answers.insert("a", AnswerValue::Yes);
    answers.insert("b", AnswerValue::No);

    let result = client(base).submit_answers(&answers).await.unwrap();
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert_eq!(result.confidence, 62.5);
    assert_eq!(result.doctor_recommendation, "Book a developmental assessment.");

    let bodies = seen.lock().unwrap();
    assert_eq!(bodies.as_slice(), &[json!({ "a": 1, "b": 0 })]);
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let base = spawn_stub(healthy_service(Seen::default())).await;
    let client = client(format!("{base}/"));

    assert!(!client.base_url().ends_with('/'));
    assert_eq!(client.health().await.unwrap().status, "ok");
}

#[tokio::test]
async fn server_error_maps_to_http_status() {
    let app = Router::new().route(
        "/questions",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded") }),
    );
    let base = spawn_stub(app).await;

    let err = client(base).fetch_questions().await.unwrap_err();
    assert!(matches!(err, ClientError::HttpStatus { status: 500 }));
    assert!(err.user_message().contains("HTTP 500"));
}

#[tokio::test]
async fn unreadable_body_maps_to_malformed_response() {
    let app = Router::new()
        .route("/questions", get(|| async { "<html>not json</html>" }))
        .route(
            "/predict",
            post(|| async { Json(json!({ "probability": 0.4, "risk": "Low" })) }),
        );
    let base = spawn_stub(app).await;
    let client = client(base);

    let err = client.fetch_questions().await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)));

    let mut answers = AnswerMap::new();
    answers.insert("eye_contact", AnswerValue::Yes);
    let err = client.submit_answers(&answers).await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)));
}

#[tokio::test]
async fn closed_port_maps_to_network_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(format!("http://{addr}"))
        .fetch_questions()
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NetworkUnreachable(_)));
    assert!(err.user_message().starts_with("Unable to connect"));
}

#[tokio::test]
async fn slow_service_times_out() {
    let app = Router::new().route(
        "/questions",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "questions": [] }))
        }),
    );
    let base = spawn_stub(app).await;
    let client = HttpClient::new(ClientConfig {
        base_url: base,
        timeout: Duration::from_millis(300),
    });

    let err = client.fetch_questions().await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout));
}

#[tokio::test]
async fn empty_question_list_is_returned_as_is() {
    let app = Router::new().route(
        "/questions",
        get(|| async { Json(json!({ "questions": [] })) }),
    );
    let base = spawn_stub(app).await;

    assert!(client(base).fetch_questions().await.unwrap().is_empty());
}

#[test]
fn unencodable_body_is_a_request_error() {
    // JSON object keys must be strings
    let mut body = BTreeMap::new();
    body.insert(vec![1u8, 2], 1u8);

    let err = encode_body(&body).unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(_)));
    assert!(!err.user_message().contains("response"));
    assert!(err.user_message().contains("could not be prepared"));
}

#[test]
fn answer_map_encodes_as_flat_object() {
    let mut answers = AnswerMap::new();
    answers.insert("eye_contact", AnswerValue::No);
    answers.insert("gestures", AnswerValue::Yes);

    assert_eq!(
        encode_body(&answers).unwrap(),
        r#"{"eye_contact":0,"gestures":1}"#
    );
}
