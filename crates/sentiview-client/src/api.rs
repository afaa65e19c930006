//! The `PredictionApi` seam and its error type.

use std::collections::BTreeMap;

use sentiview_core::{
    codes, DatasetTile, ErrorInfo, MaskedScores, ModelTile, Prediction, ResultTile, ServiceStatus,
};

/// Error type for API calls.
///
/// Two kinds mirror how failures reach the user: `Transport` for anything
/// below HTTP semantics (connection refused, DNS, a body that does not
/// parse), `Service` for a non-2xx answer from a reachable service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Network or protocol-level failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with an error status.
    #[error("service error ({status}): {message}")]
    Service { status: u16, message: String },
}

impl ApiError {
    /// Error code for state: the HTTP status, or -1 for transport failures.
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            Self::Transport(_) => codes::TRANSPORT,
            Self::Service { status, .. } => i64::from(*status),
        }
    }

    /// User-displayable message.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Transport(message) | Self::Service { message, .. } => message.clone(),
        }
    }

    /// Downgrade to state-level error info, recording the failed text.
    #[must_use]
    pub fn into_text_error(self, text: &str) -> ErrorInfo {
        ErrorInfo::for_text(self.code(), self.display_message(), text)
    }

    /// Downgrade to state-level error info, recording text and tokens.
    #[must_use]
    pub fn into_token_error(self, text: &str, tokens: &[String]) -> ErrorInfo {
        ErrorInfo::for_tokens(self.code(), self.display_message(), text, tokens)
    }
}

/// The API surface the dashboard consumes.
///
/// Implementations are injected at construction time, so tests swap the
/// HTTP client for a deterministic fixture without touching the store.
pub trait PredictionApi: Send + Sync {
    /// Classify the full text.
    fn predict(&self, text: &str) -> Result<Prediction, ApiError>;

    /// Re-classify over a masked token list. Disabled positions are empty
    /// strings; the returned weights cover the non-empty positions only.
    fn predict_tokens(&self, text: &str, tokens: &[String]) -> Result<MaskedScores, ApiError>;

    /// Fetch one example text.
    fn example(&self) -> Result<String, ApiError>;

    /// Fetch the class-index to class-name map.
    fn classes(&self) -> Result<BTreeMap<u32, String>, ApiError>;

    /// Fetch model-service health.
    fn status(&self) -> Result<ServiceStatus, ApiError>;

    /// Fetch dataset tiles.
    fn datasets(&self) -> Result<Vec<DatasetTile>, ApiError>;

    /// Fetch model tiles.
    fn models(&self) -> Result<Vec<ModelTile>, ApiError>;

    /// Fetch evaluation-result tiles.
    fn results(&self) -> Result<Vec<ResultTile>, ApiError>;
}
