//! Core data types shared across the client, the store, and the views.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One sentiment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Positive sentiment.
    Positive,
    /// Neutral sentiment.
    #[default]
    Neutral,
    /// Negative sentiment.
    Negative,
}

impl Sentiment {
    /// The lowercase class name used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Parse a class name as served by the classes endpoint.
    #[must_use]
    pub fn from_class_name(name: &str) -> Option<Self> {
        match name {
            "positive" => Some(Self::Positive),
            "neutral" => Some(Self::Neutral),
            "negative" => Some(Self::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification result for one piece of input text.
///
/// `tokens`, `enabled`, and `attention_weights` are index-aligned; the
/// constructors uphold that, and the reducer preserves it across every event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Tokenized form of the submitted text.
    pub tokens: Vec<String>,
    /// Per-token inclusion mask. All true after a fresh prediction.
    pub enabled: Vec<bool>,
    /// Per-token attention weight in [0, 1].
    pub attention_weights: Vec<f64>,
    /// Predicted class.
    pub label: Sentiment,
    /// Per-class softmax probabilities, summing to ~1.
    pub probs: Vec<f64>,
}

impl Prediction {
    /// Build a prediction from wire data, enabling every token.
    #[must_use]
    pub fn from_wire(
        tokens: Vec<String>,
        attention_weights: Vec<f64>,
        label: Sentiment,
        probs: Vec<f64>,
    ) -> Self {
        let enabled = vec![true; tokens.len()];
        Self {
            tokens,
            enabled,
            attention_weights,
            label,
            probs,
        }
    }

    /// Highest class probability, used by the confidence gauge.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.probs.iter().copied().fold(0.0, f64::max)
    }

    /// Whether the aligned-length invariant holds.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.enabled.len() == self.tokens.len()
            && self.attention_weights.len() == self.tokens.len()
    }
}

/// Re-classification returned by the masked predict endpoint: weights for the
/// enabled tokens only (in relative order) plus the new label and probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedScores {
    /// One weight per enabled token, in token order.
    pub attention_weights: Vec<f64>,
    /// Predicted class over the masked input.
    pub label: Sentiment,
    /// Per-class probabilities over the masked input.
    pub probs: Vec<f64>,
}

/// Model-service health as reported by the status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    /// Current model load factor.
    pub load: f64,
    /// Name of the serving model.
    pub model: String,
    /// Accelerator the model runs on.
    pub graphics_card: String,
    /// Resident memory in megabytes.
    pub memory_usage: u64,
}

/// Summary card for one training dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetTile {
    pub id: u64,
    pub name: String,
    /// Total labelled rows.
    pub rows: u64,
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

/// Summary card for one trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelTile {
    pub id: u64,
    pub name: String,
    /// Dataset the model was trained on.
    pub dataset: String,
    pub epochs: u32,
    /// Validation accuracy in [0, 1].
    pub accuracy: f64,
}

/// Evaluation metrics for one model run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultTile {
    pub id: u64,
    pub model: String,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Casual word/punctuation tokenizer matching what the model service does to
/// submitted text: words and contractions stay together, punctuation runs
/// become their own tokens, and URLs collapse to a `<url>` placeholder.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        if chunk.starts_with("http://") || chunk.starts_with("https://") {
            tokens.push("<url>".to_string());
            continue;
        }
        let mut word = String::new();
        for ch in chunk.chars() {
            if ch.is_alphanumeric() || ch == '\'' || ch == '-' || ch == '<' || ch == '>' {
                word.push(ch);
            } else {
                if !word.is_empty() {
                    tokens.push(std::mem::take(&mut word));
                }
                tokens.push(ch.to_string());
            }
        }
        if !word.is_empty() {
            tokens.push(word);
        }
    }
    tokens
}
