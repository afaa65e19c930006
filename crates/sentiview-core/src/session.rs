//! Session layer: turns user intents into state events plus API commands.
//!
//! A [`Session`] owns the [`DemoState`] and is the only place that decides
//! when a request should be issued. It performs no I/O itself: intents
//! return [`Command`]s describing the request, and the caller feeds the
//! outcome back through the `*_resolved` methods. Failures never escape this
//! layer; every one ends up as an error field in state.

use std::collections::BTreeMap;

use crate::error::ErrorInfo;
use crate::mask::masked_tokens;
use crate::state::{DemoState, Event};
use crate::types::{DatasetTile, MaskedScores, ModelTile, Prediction, ResultTile, ServiceStatus};

/// An API request the session wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// POST the full text to the predict endpoint.
    Predict { text: String },
    /// POST the masked token list to the predictTokens endpoint.
    PredictMasked { text: String, tokens: Vec<String> },
    /// GET one example text.
    FetchExample,
    /// GET the class map.
    FetchClasses,
    /// GET the service status.
    FetchStatus,
    /// GET dataset, model, and result tiles.
    FetchCatalog,
}

/// Intent layer over the demo state.
#[derive(Debug, Default)]
pub struct Session {
    state: DemoState,
}

impl Session {
    /// Session over a fresh default state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session over a pre-populated state, used by tests and snapshots.
    #[must_use]
    pub fn with_state(state: DemoState) -> Self {
        Self { state }
    }

    /// Read access for rendering.
    #[must_use]
    pub fn state(&self) -> &DemoState {
        &self.state
    }

    /// Commands to issue when the dashboard starts.
    #[must_use]
    pub fn startup(&self) -> Vec<Command> {
        vec![Command::FetchClasses, Command::FetchStatus, Command::FetchCatalog]
    }

    /// Submit the current input text for prediction.
    ///
    /// Empty or whitespace-only input surfaces a validation error without
    /// issuing any request.
    pub fn submit(&mut self) -> Option<Command> {
        let text = self.state.input.text.clone();
        if text.trim().is_empty() {
            self.state
                .apply(Event::PredictResolved(Err(ErrorInfo::validation(&text))));
            return None;
        }
        self.state.apply(Event::PredictStarted);
        Some(Command::Predict { text })
    }

    /// Replace the input text, clearing a stale error.
    ///
    /// The error is cleared exactly when one is present and its recorded
    /// text differs from the new text: the user is taking steps to fix it.
    pub fn set_input_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        let fixes_error = self
            .state
            .predictions
            .error
            .as_ref()
            .is_some_and(|error| error.offending_text() != Some(text.as_str()));
        if fixes_error {
            self.state.apply(Event::ErrorCleared);
        }
        self.state.apply(Event::InputEdited(text));
    }

    /// Flip the enabled flag of one token. Out-of-range indexes and absent
    /// predictions are ignored. Weights are untouched until the next
    /// [`Session::recompute_with_mask`].
    pub fn toggle_token(&mut self, index: usize) {
        self.state.apply(Event::TokenToggled(index));
    }

    /// Re-predict over the current mask.
    ///
    /// Sends the token list with disabled positions blanked; returns `None`
    /// when there is no prediction to mask.
    pub fn recompute_with_mask(&mut self) -> Option<Command> {
        let pred = self.state.predictions.prediction.as_ref()?;
        let tokens = masked_tokens(&pred.tokens, &pred.enabled);
        self.state.apply(Event::MaskStarted);
        Some(Command::PredictMasked {
            text: self.state.input.text.clone(),
            tokens,
        })
    }

    /// Fetch an example text to prefill the input.
    pub fn load_example(&mut self) -> Command {
        self.state.apply(Event::ExampleStarted);
        Command::FetchExample
    }

    /// Outcome of a [`Command::Predict`].
    pub fn predict_resolved(&mut self, outcome: Result<Prediction, ErrorInfo>) {
        self.state.apply(Event::PredictResolved(outcome));
    }

    /// Outcome of a [`Command::PredictMasked`].
    pub fn mask_resolved(&mut self, outcome: Result<MaskedScores, ErrorInfo>) {
        self.state.apply(Event::MaskResolved(outcome));
    }

    /// Outcome of a [`Command::FetchExample`]. On success the example text
    /// replaces the input and is immediately submitted for prediction.
    pub fn example_resolved(&mut self, outcome: Result<String, ErrorInfo>) -> Option<Command> {
        match outcome {
            Ok(text) => {
                self.state.apply(Event::ExampleResolved(Ok(text)));
                self.submit()
            }
            Err(error) => {
                self.state.apply(Event::ExampleResolved(Err(error)));
                None
            }
        }
    }

    /// Outcome of a [`Command::FetchClasses`].
    pub fn classes_resolved(&mut self, outcome: Result<BTreeMap<u32, String>, ErrorInfo>) {
        self.state.apply(Event::ClassesResolved(outcome));
    }

    /// Outcome of a [`Command::FetchStatus`].
    pub fn status_resolved(&mut self, outcome: Result<ServiceStatus, ErrorInfo>) {
        self.state.apply(Event::StatusResolved(outcome));
    }

    /// Dataset tiles from a [`Command::FetchCatalog`].
    pub fn datasets_resolved(&mut self, datasets: Vec<DatasetTile>) {
        self.state.apply(Event::DatasetsResolved(datasets));
    }

    /// Model tiles from a [`Command::FetchCatalog`].
    pub fn models_resolved(&mut self, models: Vec<ModelTile>) {
        self.state.apply(Event::ModelsResolved(models));
    }

    /// Result tiles from a [`Command::FetchCatalog`].
    pub fn results_resolved(&mut self, results: Vec<ResultTile>) {
        self.state.apply(Event::ResultsResolved(results));
    }
}
