//! Error handling and exit codes.

use sentiview_client::ApiError;

/// Process exit codes for one-shot mode.
pub mod exit_codes {
    /// Clean run.
    pub const SUCCESS: i32 = 0;
    /// The service rejected the request.
    pub const ERROR_SERVICE: i32 = 1;
    /// The service could not be reached.
    pub const ERROR_TRANSPORT: i32 = 3;
}

/// Map an API error to the exit code for one-shot mode.
#[must_use]
pub fn exit_code(err: &ApiError) -> i32 {
    match err {
        ApiError::Service { .. } => exit_codes::ERROR_SERVICE,
        ApiError::Transport(_) => exit_codes::ERROR_TRANSPORT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(
            exit_code(&ApiError::Service {
                status: 400,
                message: "bad request".into()
            }),
            1
        );
        assert_eq!(
            exit_code(&ApiError::Transport("connection refused".into())),
            3
        );
    }
}
