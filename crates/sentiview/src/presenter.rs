//! One-shot result presentation.

use console::style;

use sentiview_core::{Prediction, Sentiment};

/// Console presenter for one-shot classification results.
pub struct ResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl ResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a classification result.
    pub fn present(&self, text: &str, prediction: &Prediction) {
        if self.quiet {
            println!("{}", prediction.label);
            return;
        }

        println!("Text: {text}");
        println!("Sentiment: {}", paint_label(prediction.label));
        println!("Confidence: {:.1}%", prediction.confidence() * 100.0);

        if self.verbose {
            println!("Probabilities:");
            for (index, prob) in prediction.probs.iter().enumerate() {
                println!("  {:<10} {:>6.1}%", class_name(index), prob * 100.0);
            }
            println!("Attention:");
            for (token, weight) in top_tokens(prediction, 5) {
                println!("  {token:<12} {weight:.3}");
            }
        }
    }

    /// Print an error message to stderr.
    pub fn present_error(&self, error: &str) {
        if is_color_disabled() {
            eprintln!("[ERROR] {error}");
        } else {
            eprintln!("{} {error}", style("[ERROR]").red().bold());
        }
    }
}

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var("NO_COLOR").is_ok()
}

/// The label colored by polarity, or plain when colors are off.
fn paint_label(label: Sentiment) -> String {
    if is_color_disabled() {
        return label.to_string();
    }
    let styled = match label {
        Sentiment::Positive => style(label).green(),
        Sentiment::Neutral => style(label).dim(),
        Sentiment::Negative => style(label).red(),
    };
    styled.bold().to_string()
}

/// Class name for a probability index when only the default label set is known.
fn class_name(index: usize) -> String {
    match index {
        0 => "positive".to_string(),
        1 => "neutral".to_string(),
        2 => "negative".to_string(),
        other => format!("class {other}"),
    }
}

/// The `k` highest-attention tokens, heaviest first.
#[must_use]
pub fn top_tokens(prediction: &Prediction, k: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = prediction
        .tokens
        .iter()
        .cloned()
        .zip(prediction.attention_weights.iter().copied())
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(k);
    ranked
}
