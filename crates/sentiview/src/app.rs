//! Application entry point and dispatch.

use std::sync::Arc;
use std::thread;

use anyhow::Result;
use crossbeam_channel::Sender;

use sentiview_client::{ApiError, FixtureApi, HttpApi, PredictionApi};
use sentiview_core::{Command, ErrorInfo, ErrorParameters};
use sentiview_tui::{AppMessage, DashApp};

use crate::config::AppConfig;
use crate::errors;
use crate::presenter::ResultPresenter;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        crate::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let api = build_api(config);

    // Handle one-shot mode
    if config.once.is_some() || config.example {
        return run_once(config, api.as_ref());
    }

    // Dashboard mode
    run_tui(config, api)
}

/// Pick the backend: live HTTP service, or the deterministic fixture.
fn build_api(config: &AppConfig) -> Arc<dyn PredictionApi> {
    if config.fixture {
        Arc::new(FixtureApi::new())
    } else {
        Arc::new(HttpApi::new(config.url.clone()).with_timeout(config.timeout_duration()))
    }
}

fn run_once(config: &AppConfig, api: &dyn PredictionApi) -> Result<()> {
    let presenter = ResultPresenter::new(config.verbose, config.quiet);

    let outcome = resolve_input(config, api)
        .and_then(|text| api.predict(&text).map(|prediction| (text, prediction)));

    match outcome {
        Ok((text, prediction)) => {
            presenter.present(&text, &prediction);
            Ok(())
        }
        Err(err) => {
            presenter.present_error(&err.to_string());
            std::process::exit(errors::exit_code(&err));
        }
    }
}

/// The text to classify: the `--once` argument, or a fetched example.
fn resolve_input(config: &AppConfig, api: &dyn PredictionApi) -> Result<String, ApiError> {
    match &config.once {
        Some(text) => Ok(text.clone()),
        None => api.example(),
    }
}

fn run_tui(config: &AppConfig, api: Arc<dyn PredictionApi>) -> Result<()> {
    // Crossbeam channels: commands flow UI -> worker, messages flow back.
    let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<AppMessage>();
    let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();

    let mut app = DashApp::new(msg_rx, cmd_tx.clone());

    // Spawn the worker thread that executes commands against the API
    let worker_api = Arc::clone(&api);
    let worker_tx = msg_tx;
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            execute_command(worker_api.as_ref(), cmd, &worker_tx);
        }
    });

    // Spawn the status poll thread so the header tracks service health
    let poll = config.poll_duration();
    let poll_tx = cmd_tx;
    thread::spawn(move || loop {
        thread::sleep(poll);
        if poll_tx.send(Command::FetchStatus).is_err() {
            break; // channel closed, TUI exited
        }
    });

    // Run the TUI event loop on the main thread
    app.start();
    app.run().map_err(|e| anyhow::anyhow!("TUI error: {e}"))?;

    Ok(())
}

/// Execute one command against the API and send the outcome back to the UI.
///
/// Failures are downgraded to state-level errors carrying the request
/// parameters; nothing here panics or propagates.
pub fn execute_command(api: &dyn PredictionApi, cmd: Command, tx: &Sender<AppMessage>) {
    match cmd {
        Command::Predict { text } => {
            let outcome = api.predict(&text);
            match &outcome {
                Ok(prediction) => {
                    let _ = tx.send(AppMessage::Log(format!(
                        "classified as {} at {:.0}% confidence",
                        prediction.label,
                        prediction.confidence() * 100.0
                    )));
                }
                Err(err) => {
                    let _ = tx.send(AppMessage::Log(format!("[ERROR] classify: {err}")));
                }
            }
            let _ = tx.send(AppMessage::PredictDone(
                outcome.map_err(|err| err.into_text_error(&text)),
            ));
        }
        Command::PredictMasked { text, tokens } => {
            let outcome = api.predict_tokens(&text, &tokens);
            match &outcome {
                Ok(scores) => {
                    let active = tokens.iter().filter(|token| !token.is_empty()).count();
                    let _ = tx.send(AppMessage::Log(format!(
                        "re-scored {active} active tokens as {}",
                        scores.label
                    )));
                }
                Err(err) => {
                    let _ = tx.send(AppMessage::Log(format!("[ERROR] re-score: {err}")));
                }
            }
            let _ = tx.send(AppMessage::MaskDone(
                outcome.map_err(|err| err.into_token_error(&text, &tokens)),
            ));
        }
        Command::FetchExample => {
            let outcome = api.example();
            if let Err(err) = &outcome {
                let _ = tx.send(AppMessage::Log(format!("[ERROR] example: {err}")));
            }
            let _ = tx.send(AppMessage::ExampleDone(outcome.map_err(plain_error)));
        }
        Command::FetchClasses => {
            let outcome = api.classes();
            if let Err(err) = &outcome {
                let _ = tx.send(AppMessage::Log(format!("[ERROR] classes: {err}")));
            }
            let _ = tx.send(AppMessage::ClassesDone(outcome.map_err(plain_error)));
        }
        Command::FetchStatus => {
            // Polled periodically; the header shows offline on failure, so
            // errors are not echoed into the activity log.
            let outcome = api.status();
            let _ = tx.send(AppMessage::StatusDone(outcome.map_err(plain_error)));
        }
        Command::FetchCatalog => {
            match api.datasets() {
                Ok(datasets) => {
                    let _ = tx.send(AppMessage::DatasetsDone(datasets));
                }
                Err(err) => {
                    let _ = tx.send(AppMessage::Log(format!("[ERROR] datasets: {err}")));
                }
            }
            match api.models() {
                Ok(models) => {
                    let _ = tx.send(AppMessage::ModelsDone(models));
                }
                Err(err) => {
                    let _ = tx.send(AppMessage::Log(format!("[ERROR] models: {err}")));
                }
            }
            match api.results() {
                Ok(results) => {
                    let _ = tx.send(AppMessage::ResultsDone(results));
                }
                Err(err) => {
                    let _ = tx.send(AppMessage::Log(format!("[ERROR] results: {err}")));
                }
            }
        }
    }
}

/// Downgrade an API error with no request parameters to record.
fn plain_error(err: ApiError) -> ErrorInfo {
    ErrorInfo {
        code: err.code(),
        message: err.display_message(),
        parameters: ErrorParameters::default(),
    }
}
