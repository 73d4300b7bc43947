//! Sync client implementation
//!
//! Keeps a surface in step with the task service. There is no local cache:
//! every mutation is followed (when its rules say so) by a full reload, and
//! the reload is only started once the mutation's outcome is known.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::surface::Surface;
use crate::api::TaskBackend;
use crate::models::TaskId;
use crate::render::{error_rows, render};

/// Validation prompt for an empty course name
pub const EMPTY_COURSE_PROMPT: &str = "Please enter a course name (e.g. COMP SCI 577)";

/// Alert after a failed toggle
pub const TOGGLE_FAILED: &str = "Failed to toggle status";

/// Used when a failed search carries no server message
pub const SEARCH_FAILED_FALLBACK: &str = "Search failed. Check the logs.";

/// Alert after a failed delete
pub const DELETE_FAILED: &str = "Delete failed.";

/// How an operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Request succeeded
    Completed,
    /// Request failed; the user has been notified
    Failed,
    /// Input rejected locally, nothing sent
    Invalid,
    /// User declined the confirmation, nothing sent
    Declined,
    /// An add request from the same control is still in flight, nothing sent
    Busy,
}

impl Outcome {
    pub fn is_failure(self) -> bool {
        matches!(self, Outcome::Failed | Outcome::Invalid)
    }
}

/// Synchronizes a [`Surface`] with a [`TaskBackend`]
pub struct SyncClient {
    backend: Arc<dyn TaskBackend>,
    surface: Arc<dyn Surface>,
    /// Set while a `search_and_add` request is outstanding
    add_in_flight: AtomicBool,
}

impl SyncClient {
    /// Create a client wired to a backend and a surface
    pub fn new(backend: Arc<dyn TaskBackend>, surface: Arc<dyn Surface>) -> Self {
        Self {
            backend,
            surface,
            add_in_flight: AtomicBool::new(false),
        }
    }

    /// Whether an add request is currently outstanding
    #[cfg(test)]
    pub fn is_adding(&self) -> bool {
        self.add_in_flight.load(Ordering::SeqCst)
    }

    /// Reload the full task list and redraw the table
    ///
    /// Failures end here: the table shows an error row and nothing is
    /// propagated.
    pub async fn refresh(&self) -> Outcome {
        match self.backend.list_tasks().await {
            Ok(tasks) => {
                let total = tasks.len();
                debug!("Loaded {} tasks", total);
                self.surface.show_tasks(render(tasks), total);
                Outcome::Completed
            }
            Err(e) if e.is_connectivity() => {
                error!("Task service unreachable: {}", e);
                self.surface.show_load_error(error_rows());
                Outcome::Failed
            }
            Err(e) => {
                error!("Failed to load tasks: {}", e);
                self.surface.show_load_error(error_rows());
                Outcome::Failed
            }
        }
    }

    /// Flip `enabled` for one task
    ///
    /// The surface is expected to have shown the new state already. On
    /// failure the user is told and the table is reloaded to undo that.
    pub async fn toggle_enabled(&self, id: TaskId) -> Outcome {
        match self.backend.toggle_task(id).await {
            Ok(updated) => {
                match updated {
                    Some(task) => info!("Task {} toggled, enabled={}", id, task.enabled),
                    None => info!("Task {} toggled", id),
                }
                Outcome::Completed
            }
            Err(e) => {
                warn!("Toggle of task {} failed: {}", id, e);
                self.surface.alert(TOGGLE_FAILED);
                self.refresh().await;
                Outcome::Failed
            }
        }
    }

    /// Search a course and start monitoring all of its sections
    pub async fn search_and_add(&self, course_name_raw: &str) -> Outcome {
        let course_name = course_name_raw.trim();
        if course_name.is_empty() {
            self.surface.alert(EMPTY_COURSE_PROMPT);
            return Outcome::Invalid;
        }

        let Some(busy) = AddGuard::acquire(self) else {
            debug!("Add already in flight, ignoring '{}'", course_name);
            return Outcome::Busy;
        };

        let result = self.backend.search_and_add(course_name).await;
        drop(busy);

        match result {
            Ok(created) => {
                info!("Added {} sections for '{}'", created.len(), course_name);
                self.surface.alert(&format!(
                    "Sniper deployed! Found {} sections.",
                    created.len()
                ));
                self.surface.clear_course_input();
                self.refresh().await;
                Outcome::Completed
            }
            Err(e) => {
                warn!("Search for '{}' failed: {}", course_name, e);
                let message = e.server_message().unwrap_or(SEARCH_FAILED_FALLBACK);
                self.surface.alert(&format!("Error: {}", message));
                Outcome::Failed
            }
        }
    }

    /// Delete every section of a course, after confirmation
    pub async fn delete_course(&self, course_display_name: &str) -> Outcome {
        let prompt = format!(
            "Are you sure you want to delete ALL sections for \"{}\"?",
            course_display_name
        );
        if !self.surface.confirm(&prompt).await {
            debug!("Delete of '{}' declined", course_display_name);
            return Outcome::Declined;
        }

        match self.backend.delete_course(course_display_name).await {
            Ok(()) => {
                info!("Deleted course '{}'", course_display_name);
                self.refresh().await;
                Outcome::Completed
            }
            Err(e) => {
                error!("Delete of '{}' failed: {}", course_display_name, e);
                self.surface.alert(DELETE_FAILED);
                Outcome::Failed
            }
        }
    }
}

/// Holds the add control disabled; re-enables it exactly once on drop
struct AddGuard<'a> {
    client: &'a SyncClient,
}

impl<'a> AddGuard<'a> {
    fn acquire(client: &'a SyncClient) -> Option<Self> {
        client
            .add_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        client.surface.set_add_busy(true);
        Some(Self { client })
    }
}

impl Drop for AddGuard<'_> {
    fn drop(&mut self) {
        self.client.add_in_flight.store(false, Ordering::SeqCst);
        self.client.surface.set_add_busy(false);
    }
}
