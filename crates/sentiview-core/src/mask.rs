//! Token-mask helpers for the masked re-prediction round trip.
//!
//! The service receives the full token list with disabled positions blanked
//! out, and answers with weights for the enabled positions only. These two
//! functions are the outbound and inbound halves of that exchange.

/// Build the outbound token list: enabled tokens verbatim, disabled positions
/// as empty strings so the service skips them while indexes stay aligned.
///
/// Extra mask entries beyond `tokens.len()` are ignored; missing ones count
/// as disabled.
#[must_use]
pub fn masked_tokens(tokens: &[String], enabled: &[bool]) -> Vec<String> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if enabled.get(i).copied().unwrap_or(false) {
                token.clone()
            } else {
                String::new()
            }
        })
        .collect()
}

/// Splice service weights back into a full-length array aligned with the
/// token list: enabled positions consume the next weight in order, disabled
/// positions are exactly 0.0.
///
/// If the service returns fewer weights than there are enabled positions,
/// the remainder is padded with 0.0 rather than panicking.
#[must_use]
pub fn splice_weights(enabled: &[bool], weights: &[f64]) -> Vec<f64> {
    let mut spliced = Vec::with_capacity(enabled.len());
    let mut pointer = 0;
    for &flag in enabled {
        if flag {
            spliced.push(weights.get(pointer).copied().unwrap_or(0.0));
            pointer += 1;
        } else {
            spliced.push(0.0);
        }
    }
    spliced
}
