//! Request and response bodies for the demo service API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sentiview_core::{MaskedScores, Prediction, Sentiment, ServiceStatus};

// ---------------------------------------------------------------------------
// Model endpoints
// ---------------------------------------------------------------------------

/// Body for `POST /api/v1/model/predict`.
#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub text: &'a str,
}

/// Body for `POST /api/v1/model/predictTokens`.
#[derive(Debug, Serialize)]
pub struct PredictTokensRequest<'a> {
    pub text: &'a str,
    pub tokens: &'a [String],
}

/// One prediction inside a predict response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePrediction {
    pub tokens: Vec<String>,
    pub attention_weights: Vec<f64>,
    pub label: Sentiment,
    pub probs: Vec<f64>,
}

/// Response of both predict endpoints. The service batches, so `data` can
/// hold several predictions; consumers read the last one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    #[allow(dead_code)]
    pub num_predictions: usize,
    pub data: Vec<WirePrediction>,
}

impl PredictResponse {
    /// The last prediction in the batch, if any.
    pub fn into_last(self) -> Option<WirePrediction> {
        self.data.into_iter().next_back()
    }
}

impl WirePrediction {
    pub fn into_prediction(self) -> Prediction {
        Prediction::from_wire(self.tokens, self.attention_weights, self.label, self.probs)
    }

    pub fn into_masked_scores(self) -> MaskedScores {
        MaskedScores {
            attention_weights: self.attention_weights,
            label: self.label,
            probs: self.probs,
        }
    }
}

/// Error body served with non-2xx answers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[allow(dead_code)]
    pub error_code: i64,
    pub error_message: String,
}

// ---------------------------------------------------------------------------
// Text endpoints
// ---------------------------------------------------------------------------

/// One example item; the service serves sampled tweets.
#[derive(Debug, Deserialize)]
pub struct ExampleItem {
    pub text: String,
}

/// Response of `GET /api/v1/examples`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamplesResponse {
    #[allow(dead_code)]
    pub num_examples: usize,
    pub data: Vec<ExampleItem>,
}

impl ExamplesResponse {
    /// Text of the last sampled example, if any.
    pub fn into_last_text(self) -> Option<String> {
        self.data.into_iter().next_back().map(|item| item.text)
    }
}

/// Response of `GET /api/v1/classes`.
#[derive(Debug, Deserialize)]
pub struct ClassesResponse {
    pub classes: BTreeMap<u32, String>,
}

/// Response of `GET /api/v1/status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub neural_status: ServiceStatus,
}

// ---------------------------------------------------------------------------
// Enveloped collection endpoints
// ---------------------------------------------------------------------------

/// Standard resource envelope used by the catalog endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "self")]
    #[allow(dead_code)]
    pub self_url: String,
    pub data: T,
    #[allow(dead_code)]
    pub error_code: Option<i64>,
    #[allow(dead_code)]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_request_serializes_text_field() {
        let body = serde_json::to_value(PredictRequest { text: "good day" }).unwrap();
        assert_eq!(body, serde_json::json!({ "text": "good day" }));
    }

    #[test]
    fn predict_response_reads_last_element() {
        let json = serde_json::json!({
            "numPredictions": 2,
            "data": [
                { "tokens": ["old"], "attentionWeights": [1.0], "label": "neutral", "probs": [0.1, 0.8, 0.1] },
                { "tokens": ["new"], "attentionWeights": [1.0], "label": "positive", "probs": [0.9, 0.05, 0.05] },
            ],
            "parameters": { "text": "ignored" },
        });
        let resp: PredictResponse = serde_json::from_value(json).unwrap();
        let last = resp.into_last().unwrap();
        assert_eq!(last.tokens, vec!["new"]);
        assert_eq!(last.label, Sentiment::Positive);
    }

    #[test]
    fn empty_batch_yields_none() {
        let resp: PredictResponse =
            serde_json::from_value(serde_json::json!({ "numPredictions": 0, "data": [] })).unwrap();
        assert!(resp.into_last().is_none());
    }

    #[test]
    fn examples_response_reads_last_text() {
        let json = serde_json::json!({
            "numExamples": 1,
            "data": [ { "tweetId": 42, "username": "@demo", "text": "sample" } ],
        });
        let resp: ExamplesResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.into_last_text().as_deref(), Some("sample"));
    }

    #[test]
    fn status_response_unwraps_neural_status() {
        let json = serde_json::json!({
            "neuralStatus": {
                "load": 0.25,
                "model": "lstm-attention",
                "graphicsCard": "RTX 2080",
                "memoryUsage": 512,
            },
        });
        let resp: StatusResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.neural_status.model, "lstm-attention");
    }

    #[test]
    fn envelope_unwraps_data() {
        let json = serde_json::json!({
            "self": "/api/v1/classes",
            "data": [1, 2, 3],
            "error_code": null,
            "error_message": null,
        });
        let envelope: Envelope<Vec<u32>> = serde_json::from_value(json).unwrap();
        assert_eq!(envelope.data, vec![1, 2, 3]);
    }

    #[test]
    fn error_body_field_names() {
        let json = serde_json::json!({
            "errorCode": 400,
            "errorMessage": "Please enter valid text.",
            "parameters": { "text": "" },
        });
        let body: ErrorBody = serde_json::from_value(json).unwrap();
        assert_eq!(body.error_code, 400);
        assert_eq!(body.error_message, "Please enter valid text.");
    }
}
