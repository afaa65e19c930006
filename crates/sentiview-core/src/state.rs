//! Application state and the pure event reducer.
//!
//! `DemoState` is the single serializable state struct owned by the root
//! view. Every mutation goes through [`DemoState::apply`], a pure function
//! of (state, event) with no I/O and no globals. Effectful layers translate
//! request completions into [`Event`]s and feed them here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ErrorInfo;
use crate::mask::splice_weights;
use crate::types::{DatasetTile, MaskedScores, ModelTile, Prediction, ResultTile, ServiceStatus};

/// Prediction-cycle phase derived from [`PredictionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No prediction yet and nothing in flight.
    Idle,
    /// A predict or masked re-predict request is in flight.
    Loading,
    /// A prediction is displayed.
    Success,
    /// The last request failed; the error panel is shown.
    Failed,
}

/// Prediction slice of the state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionState {
    /// Last successful prediction, kept on screen across failures.
    pub prediction: Option<Prediction>,
    /// True from request dispatch until its resolution.
    pub loading: bool,
    /// Last failure, cleared on the next dispatch or a corrective edit.
    pub error: Option<ErrorInfo>,
}

impl PredictionState {
    /// Derive the prediction-cycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.prediction.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }
}

/// Input slice of the state: the text under edit plus the class map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Text in the input control.
    pub text: String,
    /// Class index to class name, as served by the classes endpoint.
    pub classes: BTreeMap<u32, String>,
    /// True while an example text is being fetched.
    pub loading: bool,
    /// Failure from the example or classes fetch, if any.
    pub error: Option<ErrorInfo>,
}

/// Service-health slice of the state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusState {
    /// Whether the last status poll succeeded.
    pub online: bool,
    /// Last successfully fetched status payload.
    pub neural: Option<ServiceStatus>,
}

/// Catalog tiles listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogState {
    pub datasets: Vec<DatasetTile>,
    pub models: Vec<ModelTile>,
    pub results: Vec<ResultTile>,
}

/// The whole dashboard state. Serializable so a session can be snapshotted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DemoState {
    pub input: InputState,
    pub predictions: PredictionState,
    pub status: StatusState,
    pub catalog: CatalogState,
}

/// Every state transition in the system.
///
/// Started events flip `loading` and clear the previous error; resolved
/// events carry the request outcome. Predict failures and masked-recompute
/// failures are distinct variants handled by one shared code path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A full-text predict request was dispatched.
    PredictStarted,
    /// The predict request resolved.
    PredictResolved(Result<Prediction, ErrorInfo>),
    /// A masked re-predict request was dispatched.
    MaskStarted,
    /// The masked re-predict resolved. Weights cover enabled tokens only.
    MaskResolved(Result<MaskedScores, ErrorInfo>),
    /// The user toggled the token at this index.
    TokenToggled(usize),
    /// The user edited the input text.
    InputEdited(String),
    /// The error panel was dismissed by a corrective edit.
    ErrorCleared,
    /// An example-text fetch was dispatched.
    ExampleStarted,
    /// The example-text fetch resolved.
    ExampleResolved(Result<String, ErrorInfo>),
    /// The class map resolved.
    ClassesResolved(Result<BTreeMap<u32, String>, ErrorInfo>),
    /// A status poll resolved. An error marks the service offline.
    StatusResolved(Result<ServiceStatus, ErrorInfo>),
    /// Dataset tiles arrived.
    DatasetsResolved(Vec<DatasetTile>),
    /// Model tiles arrived.
    ModelsResolved(Vec<ModelTile>),
    /// Result tiles arrived.
    ResultsResolved(Vec<ResultTile>),
}

impl DemoState {
    /// Apply one event to the state.
    pub fn apply(&mut self, event: Event) {
        tracing::trace!(?event, "apply");
        match event {
            Event::PredictStarted | Event::MaskStarted => {
                // The displayed prediction stays on screen while the request
                // is in flight.
                self.predictions.loading = true;
                self.predictions.error = None;
            }
            Event::PredictResolved(outcome) => {
                self.predictions.loading = false;
                match outcome {
                    Ok(prediction) => self.predictions.prediction = Some(prediction),
                    Err(error) => self.fail(error),
                }
            }
            Event::MaskResolved(outcome) => {
                self.predictions.loading = false;
                match outcome {
                    Ok(scores) => {
                        if let Some(pred) = self.predictions.prediction.as_mut() {
                            pred.attention_weights =
                                splice_weights(&pred.enabled, &scores.attention_weights);
                            pred.label = scores.label;
                            pred.probs = scores.probs;
                        }
                    }
                    Err(error) => self.fail(error),
                }
            }
            Event::TokenToggled(index) => {
                if let Some(pred) = self.predictions.prediction.as_mut() {
                    if let Some(flag) = pred.enabled.get_mut(index) {
                        *flag = !*flag;
                    }
                }
            }
            Event::InputEdited(text) => {
                self.input.text = text;
            }
            Event::ErrorCleared => {
                self.predictions.error = None;
            }
            Event::ExampleStarted => {
                self.input.loading = true;
            }
            Event::ExampleResolved(outcome) => {
                self.input.loading = false;
                match outcome {
                    Ok(text) => self.input.text = text,
                    Err(error) => self.input.error = Some(error),
                }
            }
            Event::ClassesResolved(outcome) => match outcome {
                Ok(classes) => self.input.classes = classes,
                Err(error) => self.input.error = Some(error),
            },
            Event::StatusResolved(outcome) => match outcome {
                Ok(status) => {
                    self.status.online = true;
                    self.status.neural = Some(status);
                }
                Err(error) => {
                    tracing::debug!(code = error.code, "status poll failed");
                    self.status.online = false;
                }
            },
            Event::DatasetsResolved(datasets) => self.catalog.datasets = datasets,
            Event::ModelsResolved(models) => self.catalog.models = models,
            Event::ResultsResolved(results) => self.catalog.results = results,
        }
    }

    /// Shared failure arm for both request kinds: record the error, keep the
    /// previously displayed prediction.
    fn fail(&mut self, error: ErrorInfo) {
        tracing::debug!(code = error.code, message = %error.message, "request failed");
        self.predictions.error = Some(error);
    }
}
