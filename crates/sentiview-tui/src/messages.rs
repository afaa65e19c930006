//! TUI message types (Elm Messages).
//!
//! The worker thread reports request outcomes with these; the event loop
//! feeds them into the model between renders.

use std::collections::BTreeMap;

use sentiview_core::{
    DatasetTile, ErrorInfo, MaskedScores, ModelTile, Prediction, ResultTile, ServiceStatus,
};

/// Messages that drive the TUI update cycle.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A predict request resolved.
    PredictDone(Result<Prediction, ErrorInfo>),
    /// A masked re-predict resolved.
    MaskDone(Result<MaskedScores, ErrorInfo>),
    /// An example-text fetch resolved.
    ExampleDone(Result<String, ErrorInfo>),
    /// The class map resolved.
    ClassesDone(Result<BTreeMap<u32, String>, ErrorInfo>),
    /// A status poll resolved.
    StatusDone(Result<ServiceStatus, ErrorInfo>),
    /// Dataset tiles arrived.
    DatasetsDone(Vec<DatasetTile>),
    /// Model tiles arrived.
    ModelsDone(Vec<ModelTile>),
    /// Result tiles arrived.
    ResultsDone(Vec<ResultTile>),
    /// Log line for the activity panel.
    Log(String),
    /// Quit the application.
    Quit,
}
