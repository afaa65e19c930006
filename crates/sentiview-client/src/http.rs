//! Synchronous HTTP implementation of [`PredictionApi`] over `ureq`.
//!
//! Runs on the worker thread, so blocking calls are fine. No timeout is set
//! unless the configuration provides one; failures are reported only on
//! transport or HTTP-level errors.

use std::collections::BTreeMap;
use std::time::Duration;

use sentiview_core::{DatasetTile, MaskedScores, ModelTile, Prediction, ResultTile, ServiceStatus};

use crate::api::{ApiError, PredictionApi};
use crate::wire;

/// HTTP client for a live demo service.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpApi {
    /// Client for the service at `base_url` (scheme://host:port, no path).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Apply a per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn configure(&self, request: ureq::Request) -> ureq::Request {
        match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self
            .configure(ureq::get(&url))
            .call()
            .map_err(map_request_error)?;
        response.into_json().map_err(map_decode_error)
    }

    fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self
            .configure(ureq::post(&url))
            .send_json(body)
            .map_err(map_request_error)?;
        response.into_json().map_err(map_decode_error)
    }
}

impl PredictionApi for HttpApi {
    fn predict(&self, text: &str) -> Result<Prediction, ApiError> {
        let response: wire::PredictResponse =
            self.post_json("/api/v1/model/predict", &wire::PredictRequest { text })?;
        response
            .into_last()
            .map(wire::WirePrediction::into_prediction)
            .ok_or_else(empty_batch)
    }

    fn predict_tokens(&self, text: &str, tokens: &[String]) -> Result<MaskedScores, ApiError> {
        let response: wire::PredictResponse = self.post_json(
            "/api/v1/model/predictTokens",
            &wire::PredictTokensRequest { text, tokens },
        )?;
        response
            .into_last()
            .map(wire::WirePrediction::into_masked_scores)
            .ok_or_else(empty_batch)
    }

    fn example(&self) -> Result<String, ApiError> {
        let url = self.url("/api/v1/examples");
        tracing::debug!(%url, "GET");
        let response = self
            .configure(ureq::get(&url))
            .query("numExamples", "1")
            .call()
            .map_err(map_request_error)?;
        let parsed: wire::ExamplesResponse = response.into_json().map_err(map_decode_error)?;
        parsed.into_last_text().ok_or_else(empty_batch)
    }

    fn classes(&self) -> Result<BTreeMap<u32, String>, ApiError> {
        let response: wire::ClassesResponse = self.get_json("/api/v1/classes")?;
        Ok(response.classes)
    }

    fn status(&self) -> Result<ServiceStatus, ApiError> {
        let response: wire::StatusResponse = self.get_json("/api/v1/status")?;
        Ok(response.neural_status)
    }

    fn datasets(&self) -> Result<Vec<DatasetTile>, ApiError> {
        let envelope: wire::Envelope<Vec<DatasetTile>> = self.get_json("/api/v1/datasets")?;
        Ok(envelope.data)
    }

    fn models(&self) -> Result<Vec<ModelTile>, ApiError> {
        let envelope: wire::Envelope<Vec<ModelTile>> = self.get_json("/api/v1/models")?;
        Ok(envelope.data)
    }

    fn results(&self) -> Result<Vec<ResultTile>, ApiError> {
        let envelope: wire::Envelope<Vec<ResultTile>> = self.get_json("/api/v1/models/results")?;
        Ok(envelope.data)
    }
}

/// Map a ureq error to the API taxonomy. A non-2xx answer becomes a
/// `Service` error carrying the service's own message when the body parses
/// as the standard error shape.
fn map_request_error(error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Status(status, response) => {
            let message = response
                .into_json::<wire::ErrorBody>()
                .map(|body| body.error_message)
                .unwrap_or_else(|_| format!("service answered HTTP {status}"));
            ApiError::Service { status, message }
        }
        ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
    }
}

fn map_decode_error(error: std::io::Error) -> ApiError {
    ApiError::Transport(format!("failed to decode response: {error}"))
}

fn empty_batch() -> ApiError {
    ApiError::Transport("response contained no data".to_string())
}
