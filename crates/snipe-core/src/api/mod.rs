//! Task service access
//!
//! The backend of record exposes a fixed REST contract under one base
//! endpoint:
//!
//! - `GET    <base>`                           list every task
//! - `POST   <base>?courseName=<name>`         search a course and add its sections
//! - `PATCH  <base>/<id>/toggle`               flip `enabled` for one task
//! - `DELETE <base>?courseDisplayName=<name>`  delete every task of a course
//!
//! [`TaskBackend`] is the seam the sync client talks through; [`HttpBackend`]
//! is the real implementation.

mod envelope;
mod error;
mod http;

use async_trait::async_trait;

use crate::models::{Task, TaskId};

pub use envelope::Envelope;
pub use error::{ApiError, ApiResult};
pub use http::HttpBackend;

/// Operations offered by the task service
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Fetch the complete task collection
    async fn list_tasks(&self) -> ApiResult<Vec<Task>>;

    /// Flip `enabled` for a single task
    ///
    /// Returns the updated task when the server includes it.
    async fn toggle_task(&self, id: TaskId) -> ApiResult<Option<Task>>;

    /// Search a course by name and create a task per discovered section
    async fn search_and_add(&self, course_name: &str) -> ApiResult<Vec<Task>>;

    /// Delete every task whose `courseDisplayName` matches
    async fn delete_course(&self, course_display_name: &str) -> ApiResult<()>;
}
