#![no_main]

use libfuzzer_sys::fuzz_target;

use sentiview_core::{
    DemoState, ErrorInfo, Event, MaskedScores, Prediction, Sentiment,
};

fn check_invariants(state: &DemoState) {
    if let Some(prediction) = &state.predictions.prediction {
        assert!(
            prediction.is_aligned(),
            "tokens/mask/weights fell out of alignment"
        );
    }
    // Loading and error can coexist only transiently; a resolved state never
    // holds both a fresh error and the loading flag.
    if state.predictions.error.is_some() {
        assert!(!state.predictions.loading, "error recorded while loading");
    }
}

fuzz_target!(|data: &[u8]| {
    let mut state = DemoState::default();
    let mut bytes = data.iter().copied();

    while let Some(op) = bytes.next() {
        let event = match op % 10 {
            0 => Event::PredictStarted,
            1 => {
                let len = usize::from(bytes.next().unwrap_or(0)) % 16;
                let tokens: Vec<String> = (0..len).map(|i| format!("t{i}")).collect();
                let weights: Vec<f64> = (0..len)
                    .map(|_| f64::from(bytes.next().unwrap_or(1)) / 255.0)
                    .collect();
                Event::PredictResolved(Ok(Prediction::from_wire(
                    tokens,
                    weights,
                    Sentiment::Neutral,
                    vec![0.2, 0.6, 0.2],
                )))
            }
            2 => Event::MaskStarted,
            3 => {
                // Weight count deliberately independent of the enabled count,
                // exercising the padding and truncation paths.
                let len = usize::from(bytes.next().unwrap_or(0)) % 24;
                let weights: Vec<f64> = (0..len)
                    .map(|_| f64::from(bytes.next().unwrap_or(1)) / 255.0)
                    .collect();
                Event::MaskResolved(Ok(MaskedScores {
                    attention_weights: weights,
                    label: Sentiment::Positive,
                    probs: vec![0.7, 0.2, 0.1],
                }))
            }
            4 => Event::TokenToggled(usize::from(bytes.next().unwrap_or(0))),
            5 => Event::PredictResolved(Err(ErrorInfo::for_text(
                i64::from(bytes.next().unwrap_or(0)),
                "fuzzed failure",
                "text",
            ))),
            6 => Event::MaskResolved(Err(ErrorInfo::for_tokens(
                i64::from(bytes.next().unwrap_or(0)),
                "fuzzed failure",
                "text",
                &["a".to_string(), String::new()],
            ))),
            7 => Event::InputEdited(format!("text {}", bytes.next().unwrap_or(0))),
            8 => Event::ExampleResolved(Ok(format!("ex {}", bytes.next().unwrap_or(0)))),
            _ => Event::ErrorCleared,
        };
        state.apply(event);
        check_invariants(&state);
    }
});
