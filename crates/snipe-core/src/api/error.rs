//! Task service error handling
//!
//! Distinguishes an unreachable backend from a request the server refused,
//! and keeps any human-readable message the server sent.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the task service
#[derive(Error, Debug)]
pub enum ApiError {
    /// The configured endpoint cannot be used as a request URL
    #[error("Invalid task service URL '{url}': {details}")]
    InvalidUrl { url: String, details: String },

    /// Connection failed, timed out, or the body could not be read
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success HTTP status
    #[error("Server returned {status}{}", fmt_message(.message))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    /// Response body is not the expected JSON envelope
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Envelope is missing its `data` field
    #[error("Response envelope has no data")]
    MissingData,
}

impl ApiError {
    /// Message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }

    /// Whether the backend could not be reached at all
    pub fn is_connectivity(&self) -> bool {
        match self {
            ApiError::Network(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}

fn fmt_message(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.trim().is_empty() => format!(": {}", m),
        _ => String::new(),
    }
}

/// Result type for task service calls
pub type ApiResult<T> = Result<T, ApiError>;
