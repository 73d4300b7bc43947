//! Response envelope
//!
//! Task service responses are wrapped as `{ "code", "msg", "data" }`. Only
//! the HTTP status decides success; `code` is ignored and `msg` is read for
//! error text.

use serde::Deserialize;

use super::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// An envelope for an empty 2xx body
    pub fn empty() -> Self {
        Self {
            msg: None,
            data: None,
        }
    }

    /// Unwrap the payload, failing on a missing `data`
    pub fn into_data(self) -> ApiResult<T> {
        self.data.ok_or(ApiError::MissingData)
    }
}

/// Best-effort extraction of `msg` from an error body
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|env| env.msg)
        .filter(|m| !m.trim().is_empty())
}
