//! From implementations for converting between error types.

use crate::error::{ConfigValidationError, Error};

/// Maximum length for error messages to prevent memory bloat from large
/// HTTP responses.
pub(crate) const MAX_ERROR_MESSAGE_LEN: usize = 1024;

/// Truncates a string to a maximum length, adding "... (truncated)" if
/// needed.
pub(crate) fn truncate_message(mut msg: String) -> String {
    if msg.len() > MAX_ERROR_MESSAGE_LEN {
        // Truncate on a char boundary so multi-byte text cannot panic.
        let mut cut = MAX_ERROR_MESSAGE_LEN;
        while !msg.is_char_boundary(cut) {
            cut -= 1;
        }
        msg.truncate(cut);
        msg.push_str("... (truncated)");
    }
    msg
}

impl From<ConfigValidationError> for Error {
    fn from(e: ConfigValidationError) -> Self {
        Error::Config(Box::new(e))
    }
}

impl From<Box<ConfigValidationError>> for Error {
    fn from(e: Box<ConfigValidationError>) -> Self {
        Error::Config(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::validation(format!("invalid JSON: {e}"))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::timeout(truncate_message(e.to_string()))
        } else if e.is_connect() {
            Error::connection(truncate_message(e.to_string()))
        } else if let Some(status) = e.status() {
            Error::from_status(
                status.as_u16(),
                truncate_message(e.to_string()),
                None,
                None,
            )
        } else {
            // Body/decode/redirect failures are transport-level from the
            // pipeline's point of view.
            Error::connection(truncate_message(e.to_string()))
        }
    }
}
