//! User-facing error state.
//!
//! Every failure the orchestrator sees, whether validation, transport, or a
//! service rejection, is downgraded to an [`ErrorInfo`] stored in state.
//! Nothing here is fatal and nothing propagates past the session boundary.

use serde::{Deserialize, Serialize};

/// Message shown when the user submits empty input.
pub const VALIDATION_MESSAGE: &str = "Please enter valid text.";

/// Error codes carried by [`ErrorInfo`].
pub mod codes {
    /// Client-side validation; no request was issued.
    pub const VALIDATION: i64 = 0;
    /// Transport failure: connection refused, DNS, I/O.
    pub const TRANSPORT: i64 = -1;
}

/// Request parameters recorded with an error, so the UI can tell whether a
/// later edit addresses the failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorParameters {
    /// Text of the failed request, if it carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Token list of the failed request, if it carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
}

/// A user-displayable error with the parameters of the request that caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    /// Validation 0, transport -1, otherwise the HTTP status.
    pub code: i64,
    /// Display message.
    pub message: String,
    /// Parameters of the failed request.
    #[serde(default)]
    pub parameters: ErrorParameters,
}

impl ErrorInfo {
    /// Validation error for an empty or unusable input.
    #[must_use]
    pub fn validation(text: &str) -> Self {
        Self {
            code: codes::VALIDATION,
            message: VALIDATION_MESSAGE.to_string(),
            parameters: ErrorParameters {
                text: Some(text.to_string()),
                tokens: None,
            },
        }
    }

    /// Error for a failed plain-text request.
    #[must_use]
    pub fn for_text(code: i64, message: impl Into<String>, text: &str) -> Self {
        Self {
            code,
            message: message.into(),
            parameters: ErrorParameters {
                text: Some(text.to_string()),
                tokens: None,
            },
        }
    }

    /// Error for a failed masked-token request.
    #[must_use]
    pub fn for_tokens(code: i64, message: impl Into<String>, text: &str, tokens: &[String]) -> Self {
        Self {
            code,
            message: message.into(),
            parameters: ErrorParameters {
                text: Some(text.to_string()),
                tokens: Some(tokens.to_vec()),
            },
        }
    }

    /// Text of the request that produced this error, if recorded.
    ///
    /// Drives the auto-clear rule: an edit clears the error exactly when the
    /// new text differs from this one.
    #[must_use]
    pub fn offending_text(&self) -> Option<&str> {
        self.parameters.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_shape() {
        let err = ErrorInfo::validation("");
        assert_eq!(err.code, codes::VALIDATION);
        assert_eq!(err.message, VALIDATION_MESSAGE);
        assert_eq!(err.offending_text(), Some(""));
    }

    #[test]
    fn token_error_records_both_parameters() {
        let tokens = vec!["Hey".to_string(), String::new()];
        let err = ErrorInfo::for_tokens(503, "service unavailable", "Hey there", &tokens);
        assert_eq!(err.code, 503);
        assert_eq!(err.offending_text(), Some("Hey there"));
        assert_eq!(err.parameters.tokens.as_deref(), Some(tokens.as_slice()));
    }

    #[test]
    fn wire_format_matches_service_convention() {
        let err = ErrorInfo::for_text(400, "bad request", "oops");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], 400);
        assert_eq!(json["parameters"]["text"], "oops");
        // Absent token parameters are omitted, not null.
        assert!(json["parameters"].get("tokens").is_none());
    }
}
