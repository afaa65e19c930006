#![no_main]

use libfuzzer_sys::fuzz_target;

use sentiview_core::{masked_tokens, splice_weights};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte sizes the token list; the rest drives mask bits and a
    // deliberately unrelated weight count.
    let len = usize::from(data[0]) % 32;
    let tokens: Vec<String> = (0..len).map(|i| format!("t{i}")).collect();
    let enabled: Vec<bool> = (0..len)
        .map(|i| data.get(1 + i).copied().unwrap_or(0) & 1 == 1)
        .collect();

    let masked = masked_tokens(&tokens, &enabled);
    assert_eq!(masked.len(), tokens.len());
    for ((token, &flag), out) in tokens.iter().zip(&enabled).zip(&masked) {
        if flag {
            assert_eq!(out, token);
        } else {
            assert!(out.is_empty());
        }
    }

    let weight_count = usize::from(data.last().copied().unwrap_or(0)) % 40;
    let weights: Vec<f64> = (0..weight_count).map(|i| i as f64 / 40.0).collect();

    let spliced = splice_weights(&enabled, &weights);
    assert_eq!(spliced.len(), enabled.len());
    for (&flag, &value) in enabled.iter().zip(&spliced) {
        if !flag {
            assert_eq!(value, 0.0);
        }
    }
});
