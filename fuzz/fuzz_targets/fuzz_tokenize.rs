#![no_main]

use libfuzzer_sys::fuzz_target;

use sentiview_client::{FixtureApi, PredictionApi};
use sentiview_core::tokenize;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let tokens = tokenize(&text);
    for token in &tokens {
        assert!(!token.is_empty());
        assert!(!token.chars().any(char::is_whitespace));
    }

    // The fixture backend must classify anything the tokenizer accepts,
    // with one weight per token. Only the empty-text rejection may fail.
    let api = FixtureApi::new();
    match api.predict(&text) {
        Ok(prediction) => {
            assert_eq!(prediction.tokens, tokens);
            assert!(prediction.is_aligned());
            assert_eq!(prediction.probs.len(), 3);
        }
        Err(_) => assert!(text.trim().is_empty()),
    }
});
