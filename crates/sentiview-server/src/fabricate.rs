//! Seeded payload fabrication.
//!
//! All payloads come from a seeded `StdRng`: a given seed always produces
//! the same sequence of tweets, weights, and tiles, so local demos and
//! tests are reproducible.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use sentiview_core::{DatasetTile, ModelTile, ResultTile, Sentiment, ServiceStatus};

const USERNAMES: &[&str] = &[
    "sunny_dev", "tweetfan42", "mlwatcher", "datadrift", "nlp_nerd", "gpu_poor",
    "attention_pls", "softmaxine", "lstm_stan", "tokenizer_joe",
];

const OPENERS: &[&str] = &[
    "Just tried", "Can't believe", "Honestly,", "So apparently", "Finally got around to",
    "Day three of", "Hot take:", "Quick update on",
];

const SUBJECTS: &[&str] = &[
    "the new coffee place downtown", "this sentiment model", "my flight home",
    "the customer support line", "that viral video", "the beta release",
    "the airline's new app", "this week's weather",
];

const CLOSERS: &[&str] = &[
    "and I love it", "and it was terrible", "not sure how I feel yet",
    "absolutely worth it", "what a waste of time", "pretty solid overall",
    "would not recommend", "check it out http://example.com/demo",
];

const GRAPHICS_CARDS: &[&str] = &["RTX 2080", "GTX 1080 Ti", "Tesla V100", "RTX 3090"];

const DATASET_NAMES: &[&str] = &["sentiment140", "airline-tweets", "imdb-reviews", "yelp-polarity"];

const MODEL_NAMES: &[&str] = &["lstm-attention", "bilstm-baseline", "cnn-char", "logreg-tfidf"];

/// A fabricated tweet, the item shape of the sample and example endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub tweet_id: u64,
    pub username: String,
    pub text: String,
}

/// Seeded generator behind the route handlers.
#[derive(Debug)]
pub struct Fabricator {
    rng: Mutex<StdRng>,
}

impl Fabricator {
    /// Fabricator with a fixed seed; the same seed replays the same payloads.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, body: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().expect("fabricator rng lock");
        body(&mut rng)
    }

    fn pick<'a>(rng: &mut StdRng, list: &'a [&'a str]) -> &'a str {
        list[rng.gen_range(0..list.len())]
    }

    /// One fabricated tweet.
    pub fn tweet(&self) -> Tweet {
        self.with_rng(|rng| {
            let text = format!(
                "{} {} {}",
                Self::pick(rng, OPENERS),
                Self::pick(rng, SUBJECTS),
                Self::pick(rng, CLOSERS),
            );
            Tweet {
                tweet_id: rng.gen_range(100_000..10_000_000),
                username: format!("@{}", Self::pick(rng, USERNAMES)),
                text,
            }
        })
    }

    /// A batch of fabricated tweets.
    pub fn tweets(&self, count: usize) -> Vec<Tweet> {
        (0..count).map(|_| self.tweet()).collect()
    }

    /// Per-token attention weights, normalized to sum to one.
    pub fn attention(&self, len: usize) -> Vec<f64> {
        if len == 0 {
            return Vec::new();
        }
        self.with_rng(|rng| {
            let raw: Vec<f64> = (0..len).map(|_| rng.gen_range(0.1..1.0)).collect();
            let sum: f64 = raw.iter().sum();
            raw.into_iter().map(|weight| weight / sum).collect()
        })
    }

    /// A random point on the 3-class simplex plus its argmax label.
    /// Class order is positive, neutral, negative.
    pub fn classification(&self) -> (Sentiment, Vec<f64>) {
        self.with_rng(|rng| {
            let raw: [f64; 3] = [rng.gen_range(0.1..1.0), rng.gen_range(0.1..1.0), rng.gen_range(0.1..1.0)];
            let sum: f64 = raw.iter().sum();
            let probs: Vec<f64> = raw.iter().map(|p| p / sum).collect();
            let label = match raw
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(index, _)| index)
            {
                Some(0) => Sentiment::Positive,
                Some(2) => Sentiment::Negative,
                _ => Sentiment::Neutral,
            };
            (label, probs)
        })
    }

    /// Current service health snapshot.
    pub fn status(&self) -> ServiceStatus {
        self.with_rng(|rng| ServiceStatus {
            load: (rng.gen_range(0.0_f64..0.9) * 100.0).round() / 100.0,
            model: MODEL_NAMES[0].to_string(),
            graphics_card: Self::pick(rng, GRAPHICS_CARDS).to_string(),
            memory_usage: rng.gen_range(256..2048),
        })
    }

    /// Dataset tiles.
    pub fn datasets(&self) -> Vec<DatasetTile> {
        self.with_rng(|rng| {
            DATASET_NAMES
                .iter()
                .enumerate()
                .map(|(index, name)| {
                    let positive = rng.gen_range(1_000..900_000);
                    let neutral = rng.gen_range(0..300_000);
                    let negative = rng.gen_range(1_000..900_000);
                    DatasetTile {
                        id: index as u64 + 1,
                        name: (*name).to_string(),
                        rows: positive + neutral + negative,
                        positive,
                        neutral,
                        negative,
                    }
                })
                .collect()
        })
    }

    /// Model tiles.
    pub fn models(&self) -> Vec<ModelTile> {
        self.with_rng(|rng| {
            MODEL_NAMES
                .iter()
                .enumerate()
                .map(|(index, name)| ModelTile {
                    id: index as u64 + 1,
                    name: (*name).to_string(),
                    dataset: DATASET_NAMES[index % DATASET_NAMES.len()].to_string(),
                    epochs: rng.gen_range(4..24),
                    accuracy: round2(rng.gen_range(0.70..0.92)),
                })
                .collect()
        })
    }

    /// Evaluation-result tiles.
    pub fn results(&self) -> Vec<ResultTile> {
        self.with_rng(|rng| {
            MODEL_NAMES
                .iter()
                .enumerate()
                .map(|(index, name)| {
                    let accuracy = round2(rng.gen_range(0.70..0.92));
                    let precision = round2(rng.gen_range(0.65..accuracy));
                    let recall = round2(rng.gen_range(0.65..accuracy));
                    ResultTile {
                        id: index as u64 + 1,
                        model: (*name).to_string(),
                        accuracy,
                        precision,
                        recall,
                        f1: round2(2.0 * precision * recall / (precision + recall)),
                    }
                })
                .collect()
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
