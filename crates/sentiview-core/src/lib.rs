//! # sentiview-core
//!
//! State store and prediction orchestration for the SentiView demo dashboard.
//! Holds the serializable application state, the pure event reducer, and the
//! session layer that turns user intents into API commands.

pub mod error;
pub mod mask;
pub mod session;
pub mod state;
pub mod types;

// Re-exports
pub use error::{codes, ErrorInfo, ErrorParameters, VALIDATION_MESSAGE};
pub use mask::{masked_tokens, splice_weights};
pub use session::{Command, Session};
pub use state::{
    CatalogState, DemoState, Event, InputState, Phase, PredictionState, StatusState,
};
pub use types::{
    tokenize, DatasetTile, MaskedScores, ModelTile, Prediction, ResultTile, Sentiment,
    ServiceStatus,
};
