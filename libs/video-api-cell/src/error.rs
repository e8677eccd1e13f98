// libs/video-api-cell/src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VideoApiError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid value for {field}: {message}")]
    InvalidArgument { field: &'static str, message: String },

    #[error("Illegal state: {message}")]
    IllegalState { message: String },

    #[error("Video API error (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("JSON error: {message}")]
    Json { message: String },

    #[error("Video API client not configured")]
    NotConfigured,

    #[error("Token generation failed: {message}")]
    Token { message: String },
}

impl VideoApiError {
    pub fn missing(field: &'static str) -> Self {
        VideoApiError::MissingField { field }
    }

    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        VideoApiError::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        VideoApiError::IllegalState {
            message: message.into(),
        }
    }

    /// True for errors raised before any request leaves the process.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            VideoApiError::MissingField { .. }
                | VideoApiError::InvalidArgument { .. }
                | VideoApiError::IllegalState { .. }
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            VideoApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for VideoApiError {
    fn from(err: reqwest::Error) -> Self {
        VideoApiError::Transport {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for VideoApiError {
    fn from(err: serde_json::Error) -> Self {
        VideoApiError::Json {
            message: err.to_string(),
        }
    }
}
