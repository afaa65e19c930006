//! Application configuration from CLI flags and environment.

use clap::Parser;

/// Interactive sentiment-analysis dashboard.
#[derive(Parser, Debug)]
#[command(name = "sentiview", version = crate::version::version(), about)]
pub struct AppConfig {
    /// Base URL of the demo service.
    #[arg(long, default_value = "http://localhost:8080", env = "SENTIVIEW_URL")]
    pub url: String,

    /// Request timeout (e.g., "10s", "500ms").
    #[arg(long, default_value = "10s")]
    pub timeout: String,

    /// Service status poll interval for the dashboard.
    #[arg(long, default_value = "10s")]
    pub poll: String,

    /// Classify one text and exit instead of opening the dashboard.
    #[arg(long, value_name = "TEXT")]
    pub once: Option<String>,

    /// Classify a service-provided example text and exit.
    #[arg(short, long, conflicts_with = "once")]
    pub example: bool,

    /// Answer from the built-in deterministic backend instead of HTTP.
    #[arg(long)]
    pub fixture: bool,

    /// Verbose output (per-class probabilities and attention weights).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (only output the label).
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse the request timeout into a Duration.
    #[must_use]
    pub fn timeout_duration(&self) -> std::time::Duration {
        parse_duration(&self.timeout).unwrap_or(std::time::Duration::from_secs(10))
    }

    /// Parse the status poll interval into a Duration.
    #[must_use]
    pub fn poll_duration(&self) -> std::time::Duration {
        parse_duration(&self.poll).unwrap_or(std::time::Duration::from_secs(10))
    }
}

/// Parse a duration string like "5m", "1h", "30s".
fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(std::time::Duration::from_secs(n * 60))
    } else if let Some(hours) = s.strip_suffix('h') {
        let n: u64 = hours.parse().ok()?;
        Some(std::time::Duration::from_secs(n * 3600))
    } else if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().ok()?;
        Some(std::time::Duration::from_millis(n))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs.parse().ok()?;
        Some(std::time::Duration::from_secs(n))
    } else {
        let n: u64 = s.parse().ok()?;
        Some(std::time::Duration::from_secs(n))
    }
}
