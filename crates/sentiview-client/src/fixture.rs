//! Deterministic test doubles for [`PredictionApi`].
//!
//! [`FixtureApi`] answers every call deterministically from the input alone,
//! so render tests and golden scenarios are reproducible. [`RecordingApi`]
//! wraps any implementation and records every call, which lets tests assert
//! that a given flow issued (or did not issue) a request.

use std::collections::BTreeMap;
use std::sync::Mutex;

use sentiview_core::{
    tokenize, DatasetTile, MaskedScores, ModelTile, Prediction, ResultTile, Sentiment,
    ServiceStatus, VALIDATION_MESSAGE,
};

use crate::api::{ApiError, PredictionApi};

/// Example text served by [`FixtureApi::example`].
pub const EXAMPLE_TEXT: &str = "Hey, I love this website, check it out http://chrisakroyd.com";

const POSITIVE_WORDS: &[&str] = &["love", "good", "great", "happy", "awesome", "best", "like"];
const NEGATIVE_WORDS: &[&str] = &["hate", "bad", "terrible", "awful", "worst", "sad", "broken"];

/// Deterministic stand-in for the demo service.
///
/// Classification is a small lexicon vote; attention weights favour the
/// sentiment-bearing words and are normalized to sum to one. Identical
/// inputs always produce identical outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureApi;

impl FixtureApi {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn classify(tokens: &[String]) -> (Sentiment, Vec<f64>) {
        let mut positive = 0usize;
        let mut negative = 0usize;
        for token in tokens {
            let lower = token.to_lowercase();
            if POSITIVE_WORDS.contains(&lower.as_str()) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&lower.as_str()) {
                negative += 1;
            }
        }
        if positive > negative {
            (Sentiment::Positive, vec![0.7, 0.2, 0.1])
        } else if negative > positive {
            (Sentiment::Negative, vec![0.1, 0.2, 0.7])
        } else {
            (Sentiment::Neutral, vec![0.2, 0.6, 0.2])
        }
    }

    fn attention(tokens: &[String]) -> Vec<f64> {
        let raw: Vec<f64> = tokens.iter().map(|token| Self::salience(token)).collect();
        let sum: f64 = raw.iter().sum();
        if sum <= 0.0 {
            return raw;
        }
        raw.into_iter().map(|weight| weight / sum).collect()
    }

    fn salience(token: &str) -> f64 {
        let lower = token.to_lowercase();
        if POSITIVE_WORDS.contains(&lower.as_str()) || NEGATIVE_WORDS.contains(&lower.as_str()) {
            3.0
        } else if token.chars().any(char::is_alphanumeric) {
            1.0
        } else {
            0.5
        }
    }

    fn reject_empty(tokens: &[String]) -> Result<(), ApiError> {
        if tokens.is_empty() {
            return Err(ApiError::Service {
                status: 400,
                message: VALIDATION_MESSAGE.to_string(),
            });
        }
        Ok(())
    }
}

impl PredictionApi for FixtureApi {
    fn predict(&self, text: &str) -> Result<Prediction, ApiError> {
        let tokens = tokenize(text);
        Self::reject_empty(&tokens)?;
        let weights = Self::attention(&tokens);
        let (label, probs) = Self::classify(&tokens);
        Ok(Prediction::from_wire(tokens, weights, label, probs))
    }

    fn predict_tokens(&self, _text: &str, tokens: &[String]) -> Result<MaskedScores, ApiError> {
        let enabled: Vec<String> = tokens
            .iter()
            .filter(|token| !token.is_empty())
            .cloned()
            .collect();
        let (label, probs) = Self::classify(&enabled);
        Ok(MaskedScores {
            attention_weights: Self::attention(&enabled),
            label,
            probs,
        })
    }

    fn example(&self) -> Result<String, ApiError> {
        Ok(EXAMPLE_TEXT.to_string())
    }

    fn classes(&self) -> Result<BTreeMap<u32, String>, ApiError> {
        Ok([
            (0, "positive".to_string()),
            (1, "neutral".to_string()),
            (2, "negative".to_string()),
        ]
        .into_iter()
        .collect())
    }

    fn status(&self) -> Result<ServiceStatus, ApiError> {
        Ok(ServiceStatus {
            load: 0.07,
            model: "lstm-attention".to_string(),
            graphics_card: "RTX 2080".to_string(),
            memory_usage: 512,
        })
    }

    fn datasets(&self) -> Result<Vec<DatasetTile>, ApiError> {
        Ok(vec![
            DatasetTile {
                id: 1,
                name: "sentiment140".to_string(),
                rows: 1_600_000,
                positive: 800_000,
                neutral: 0,
                negative: 800_000,
            },
            DatasetTile {
                id: 2,
                name: "airline-tweets".to_string(),
                rows: 14_640,
                positive: 2_363,
                neutral: 3_099,
                negative: 9_178,
            },
        ])
    }

    fn models(&self) -> Result<Vec<ModelTile>, ApiError> {
        Ok(vec![
            ModelTile {
                id: 1,
                name: "lstm-attention".to_string(),
                dataset: "sentiment140".to_string(),
                epochs: 12,
                accuracy: 0.84,
            },
            ModelTile {
                id: 2,
                name: "bilstm-baseline".to_string(),
                dataset: "airline-tweets".to_string(),
                epochs: 8,
                accuracy: 0.79,
            },
        ])
    }

    fn results(&self) -> Result<Vec<ResultTile>, ApiError> {
        Ok(vec![
            ResultTile {
                id: 1,
                model: "lstm-attention".to_string(),
                accuracy: 0.84,
                precision: 0.83,
                recall: 0.82,
                f1: 0.825,
            },
            ResultTile {
                id: 2,
                model: "bilstm-baseline".to_string(),
                accuracy: 0.79,
                precision: 0.78,
                recall: 0.75,
                f1: 0.765,
            },
        ])
    }
}

/// One recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Predict { text: String },
    PredictTokens { text: String, tokens: Vec<String> },
    Example,
    Classes,
    Status,
    Datasets,
    Models,
    Results,
}

/// Wrapper that records every call before delegating to the inner API.
#[derive(Debug, Default)]
pub struct RecordingApi<A> {
    inner: A,
    calls: Mutex<Vec<RecordedCall>>,
}

impl<A> RecordingApi<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Number of calls recorded so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

impl<A: PredictionApi> PredictionApi for RecordingApi<A> {
    fn predict(&self, text: &str) -> Result<Prediction, ApiError> {
        self.record(RecordedCall::Predict { text: text.to_string() });
        self.inner.predict(text)
    }

    fn predict_tokens(&self, text: &str, tokens: &[String]) -> Result<MaskedScores, ApiError> {
        self.record(RecordedCall::PredictTokens {
            text: text.to_string(),
            tokens: tokens.to_vec(),
        });
        self.inner.predict_tokens(text, tokens)
    }

    fn example(&self) -> Result<String, ApiError> {
        self.record(RecordedCall::Example);
        self.inner.example()
    }

    fn classes(&self) -> Result<BTreeMap<u32, String>, ApiError> {
        self.record(RecordedCall::Classes);
        self.inner.classes()
    }

    fn status(&self) -> Result<ServiceStatus, ApiError> {
        self.record(RecordedCall::Status);
        self.inner.status()
    }

    fn datasets(&self) -> Result<Vec<DatasetTile>, ApiError> {
        self.record(RecordedCall::Datasets);
        self.inner.datasets()
    }

    fn models(&self) -> Result<Vec<ModelTile>, ApiError> {
        self.record(RecordedCall::Models);
        self.inner.models()
    }

    fn results(&self) -> Result<Vec<ResultTile>, ApiError> {
        self.record(RecordedCall::Results);
        self.inner.results()
    }
}
