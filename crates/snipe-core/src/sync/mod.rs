//! Sync client for the task service
//!
//! Drives a [`Surface`] from the backend of record.
//!
//! ## Flow
//!
//! 1. A user action calls one of the mutators
//! 2. The mutation request runs to completion (success or failure)
//! 3. Depending on the outcome, [`SyncClient::refresh`] reloads the full list
//! 4. The list is rendered and handed to the surface
//!
//! ## Usage
//!
//! ```ignore
//! let backend = Arc::new(HttpBackend::from_config(&config)?);
//! let client = SyncClient::new(backend, surface);
//! client.refresh().await;
//! client.search_and_add("COMP SCI 577").await;
//! ```

mod client;
mod surface;

#[cfg(test)]
pub(crate) mod fakes;

pub use client::{
    Outcome, SyncClient, DELETE_FAILED, EMPTY_COURSE_PROMPT, SEARCH_FAILED_FALLBACK,
    TOGGLE_FAILED,
};
pub use surface::Surface;

/// Label of the add control while idle
pub const ADD_IDLE_LABEL: &str = "Snipe!";

/// Label of the add control while a search is in flight
pub const ADD_BUSY_LABEL: &str = "Searching...";
