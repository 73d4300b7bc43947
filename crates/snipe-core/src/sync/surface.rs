//! Display hooks driven by the sync client

use async_trait::async_trait;

use crate::render::Row;

/// A user-facing front end (terminal UI, console, ...)
///
/// The sync client never draws anything itself: it hands rendered rows and
/// notifications to a surface. Implementations must tolerate being called
/// from several in-flight operations at once.
#[async_trait]
pub trait Surface: Send + Sync {
    /// Replace the whole table and set the total-count indicator
    fn show_tasks(&self, rows: Vec<Row>, total: usize);

    /// Replace the whole table with a load failure
    fn show_load_error(&self, rows: Vec<Row>);

    /// Notify the user; shown modally until dismissed
    fn alert(&self, message: &str);

    /// Ask the user to confirm a destructive action
    async fn confirm(&self, prompt: &str) -> bool;

    /// Disable the add control and show the busy label, or restore it
    fn set_add_busy(&self, busy: bool);

    /// Clear the course-name input
    fn clear_course_input(&self);
}
