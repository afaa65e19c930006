//! # sentiview-client
//!
//! Typed client for the sentiment demo API. [`PredictionApi`] is the seam
//! the rest of the system programs against: [`HttpApi`] speaks to a live
//! service over HTTP, while [`FixtureApi`] answers deterministically for
//! tests and offline demos. [`RecordingApi`] wraps either and records every
//! call for assertions.

pub mod api;
pub mod fixture;
pub mod http;
mod wire;

// Re-exports
pub use api::{ApiError, PredictionApi};
pub use fixture::{FixtureApi, RecordedCall, RecordingApi};
pub use http::HttpApi;
