use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The structured error surfaced to API callers. All filter and input
/// validation failures map to a 400 with a short machine-readable code and a
/// human-readable message; nothing in the filter core is fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{error}: {message}")]
pub struct ApiError {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(code: &str, message: impl Into<String>) -> Self {
        ApiError {
            status: 400,
            error: code.to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError {
            status: 500,
            error: "internal_error".to_string(),
            message: message.into(),
        }
    }
}
