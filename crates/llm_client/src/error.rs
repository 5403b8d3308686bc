//! Client errors

use thiserror::Error;

/// Errors that can occur while talking to the Ollama server
#[derive(Debug, Error)]
pub enum OllamaError {
    /// Failed to connect to the server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the server failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Server returned a non-success status
    #[error("Server error: {0}")]
    ServerError(String),

    /// The connect-time probe failed and the client is disabled
    #[error("Ollama not available: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for OllamaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
