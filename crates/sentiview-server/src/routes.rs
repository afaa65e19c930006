//! Route handlers for the mock demo service.
//!
//! Endpoint shapes match what the dashboard client consumes: predict
//! responses carry `numPredictions`/`data`/`parameters`, collections are
//! enveloped, and the status payload arrives under `neuralStatus`.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{OriginalUri, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use sentiview_core::{tokenize, Sentiment, ServiceStatus, VALIDATION_MESSAGE};

use crate::envelope::{Envelope, PageWindow, Paged};
use crate::fabricate::{Fabricator, Tweet};

/// Largest example/tweet batch a single request may ask for.
const MAX_SAMPLE: usize = 50;

/// Shared handler state.
pub struct AppState {
    fabricator: Fabricator,
}

/// Build the service router with a seeded fabricator.
#[must_use]
pub fn router(seed: u64) -> Router {
    let state = Arc::new(AppState {
        fabricator: Fabricator::new(seed),
    });
    Router::new()
        .route("/api/v1/model/predict", post(predict))
        .route("/api/v1/model/predictTokens", post(predict_tokens))
        .route("/api/v1/examples", get(examples))
        .route("/api/v1/classes", get(classes))
        .route("/api/v1/status", get(status))
        .route("/api/v1/tweets/sample", get(tweets_sample))
        .route("/api/v1/datasets", get(datasets))
        .route("/api/v1/models", get(models))
        .route("/api/v1/models/results", get(model_results))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PredictBody {
    text: String,
}

#[derive(Debug, Deserialize)]
struct PredictTokensBody {
    text: String,
    tokens: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictionPayload {
    tokens: Vec<String>,
    attention_weights: Vec<f64>,
    label: Sentiment,
    probs: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictResponse {
    num_predictions: usize,
    data: Vec<PredictionPayload>,
    parameters: Parameters,
}

/// Echo of the request parameters, restricted to the known keys.
#[derive(Debug, Serialize)]
struct Parameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<Vec<String>>,
}

impl Parameters {
    fn text(text: String) -> Self {
        Self {
            text: Some(text),
            tokens: None,
        }
    }

    fn text_and_tokens(text: String, tokens: Vec<String>) -> Self {
        Self {
            text: Some(text),
            tokens: Some(tokens),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error_code: i64,
    error_message: String,
    parameters: Parameters,
}

#[derive(Debug, Deserialize)]
struct ExamplesQuery {
    #[serde(rename = "numExamples")]
    num_examples: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExamplesResponse {
    num_examples: usize,
    data: Vec<Tweet>,
}

#[derive(Debug, Serialize)]
struct ClassesResponse {
    classes: BTreeMap<u32, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    neural_status: ServiceStatus,
}

#[derive(Debug, Deserialize)]
struct SampleQuery {
    limit: Option<usize>,
    start: Option<u64>,
    page_size: Option<u64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn predict(State(state): State<Arc<AppState>>, Json(body): Json<PredictBody>) -> Response {
    if body.text.trim().is_empty() {
        let error = ErrorResponse {
            error_code: 400,
            error_message: VALIDATION_MESSAGE.to_string(),
            parameters: Parameters::text(body.text),
        };
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    let tokens = tokenize(&body.text);
    let attention_weights = state.fabricator.attention(tokens.len());
    let (label, probs) = state.fabricator.classification();
    tracing::info!(tokens = tokens.len(), %label, "predict");

    let response = PredictResponse {
        num_predictions: 1,
        data: vec![PredictionPayload {
            tokens,
            attention_weights,
            label,
            probs,
        }],
        parameters: Parameters::text(body.text),
    };
    Json(response).into_response()
}

async fn predict_tokens(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PredictTokensBody>,
) -> Response {
    let enabled: Vec<String> = body
        .tokens
        .iter()
        .filter(|token| !token.is_empty())
        .cloned()
        .collect();
    let attention_weights = state.fabricator.attention(enabled.len());
    let (label, probs) = state.fabricator.classification();
    tracing::info!(enabled = enabled.len(), total = body.tokens.len(), "predict tokens");

    let response = PredictResponse {
        num_predictions: 1,
        data: vec![PredictionPayload {
            tokens: enabled,
            attention_weights,
            label,
            probs,
        }],
        parameters: Parameters::text_and_tokens(body.text, body.tokens),
    };
    Json(response).into_response()
}

async fn examples(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExamplesQuery>,
) -> Json<ExamplesResponse> {
    let count = query.num_examples.unwrap_or(1).clamp(1, MAX_SAMPLE);
    Json(ExamplesResponse {
        num_examples: count,
        data: state.fabricator.tweets(count),
    })
}

async fn classes() -> Json<ClassesResponse> {
    let classes = [
        (0, "positive".to_string()),
        (1, "neutral".to_string()),
        (2, "negative".to_string()),
    ]
    .into_iter()
    .collect();
    Json(ClassesResponse { classes })
}

async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        neural_status: state.fabricator.status(),
    })
}

async fn tweets_sample(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<SampleQuery>,
) -> Json<Paged<Tweet>> {
    let count = query.limit.unwrap_or(10).min(MAX_SAMPLE);
    let window = PageWindow::resolve(query.start, query.page_size);
    let data = state.fabricator.tweets(count);
    Json(Paged::new(uri.to_string(), "/tweets/sample", window, data))
}

async fn datasets(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    Json(Envelope::new(uri.to_string(), state.fabricator.datasets())).into_response()
}

async fn models(State(state): State<Arc<AppState>>, OriginalUri(uri): OriginalUri) -> Response {
    Json(Envelope::new(uri.to_string(), state.fabricator.models())).into_response()
}

async fn model_results(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    Json(Envelope::new(uri.to_string(), state.fabricator.results())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_uri(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn predict_answers_aligned_payload() {
        let (status, json) = send(
            router(42),
            post_json("/api/v1/model/predict", r#"{"text":"I love this website"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["numPredictions"], 1);

        let payload = &json["data"][0];
        let tokens = payload["tokens"].as_array().unwrap();
        let weights = payload["attentionWeights"].as_array().unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens.len(), weights.len());
        let sum: f64 = weights.iter().map(|w| w.as_f64().unwrap()).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(json["parameters"]["text"], "I love this website");
    }

    #[tokio::test]
    async fn predict_rejects_empty_text() {
        let (status, json) = send(
            router(42),
            post_json("/api/v1/model/predict", r#"{"text":"   "}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errorCode"], 400);
        assert_eq!(json["errorMessage"], VALIDATION_MESSAGE);
        assert_eq!(json["parameters"]["text"], "   ");
    }

    #[tokio::test]
    async fn predict_tokens_scores_enabled_only() {
        let body = r#"{"text":"Hey, I love this","tokens":["Hey",",","","love","this"]}"#;
        let (status, json) = send(router(42), post_json("/api/v1/model/predictTokens", body)).await;
        assert_eq!(status, StatusCode::OK);

        let payload = &json["data"][0];
        assert_eq!(payload["tokens"].as_array().unwrap().len(), 4);
        assert_eq!(payload["attentionWeights"].as_array().unwrap().len(), 4);
        // The echo keeps the blanked positions so the client can line errors up.
        assert_eq!(json["parameters"]["tokens"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn predict_tokens_with_all_masked_is_empty_not_an_error() {
        let body = r#"{"text":"hi","tokens":["",""]}"#;
        let (status, json) = send(router(42), post_json("/api/v1/model/predictTokens", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["attentionWeights"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn examples_honours_requested_count() {
        let (status, json) = send(router(1), get_uri("/api/v1/examples?numExamples=3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["numExamples"], 3);
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
        assert!(json["data"][0].get("text").is_some());
        assert!(json["data"][0].get("tweetId").is_some());
    }

    #[tokio::test]
    async fn examples_defaults_to_one() {
        let (_, json) = send(router(1), get_uri("/api/v1/examples")).await;
        assert_eq!(json["numExamples"], 1);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn classes_are_positive_first() {
        let (status, json) = send(router(1), get_uri("/api/v1/classes")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["classes"]["0"], "positive");
        assert_eq!(json["classes"]["1"], "neutral");
        assert_eq!(json["classes"]["2"], "negative");
    }

    #[tokio::test]
    async fn status_nests_neural_payload() {
        let (status, json) = send(router(1), get_uri("/api/v1/status")).await;
        assert_eq!(status, StatusCode::OK);
        let neural = &json["neuralStatus"];
        assert!(neural.get("load").is_some());
        assert!(neural.get("model").is_some());
        assert!(neural.get("graphicsCard").is_some());
        assert!(neural.get("memoryUsage").is_some());
    }

    #[tokio::test]
    async fn tweets_sample_is_paged() {
        let (status, json) = send(
            router(1),
            get_uri("/api/v1/tweets/sample?limit=5&start=20&page_size=10"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 5);
        assert_eq!(json["start"], 20);
        assert_eq!(json["page_size"], 10);
        assert_eq!(json["page"], 2);
        assert_eq!(json["next"], "/api/v1/tweets/sample?page_size=10&start=30");
        assert_eq!(json["prev"], "/api/v1/tweets/sample?page_size=10&start=10");
        assert_eq!(json["self"], "/api/v1/tweets/sample?limit=5&start=20&page_size=10");
    }

    #[tokio::test]
    async fn first_tweet_page_has_no_prev() {
        let (_, json) = send(router(1), get_uri("/api/v1/tweets/sample")).await;
        assert_eq!(json["prev"], serde_json::Value::Null);
        assert_eq!(json["page"], 0);
    }

    #[tokio::test]
    async fn catalog_endpoints_are_enveloped() {
        for uri in ["/api/v1/datasets", "/api/v1/models", "/api/v1/models/results"] {
            let (status, json) = send(router(1), get_uri(uri)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["self"], *uri);
            assert_eq!(json["error_code"], serde_json::Value::Null);
            assert!(!json["data"].as_array().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn same_seed_replays_the_same_predictions() {
        let body = r#"{"text":"same seed same answer"}"#;
        let (_, first) = send(router(99), post_json("/api/v1/model/predict", body)).await;
        let (_, second) = send(router(99), post_json("/api/v1/model/predict", body)).await;
        assert_eq!(first, second);
    }
}
