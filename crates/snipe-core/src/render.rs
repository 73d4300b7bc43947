//! Task table rendering
//!
//! Pure transformation from an unordered task collection to display rows.
//! No I/O happens here; surfaces decide how rows are drawn.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_provider::DataLocale;
use serde::Serialize;
use tracing::warn;

use crate::models::{SectionStatus, Task, TaskId};

/// Shown instead of an empty table
pub const EMPTY_PLACEHOLDER: &str = "No active snipers. Add a course above!";

/// Shown across the table when the task list cannot be loaded
pub const LOAD_ERROR_MESSAGE: &str = "Backend error. Is the task service running?";

/// Label for a task whose status has not been reported yet
pub const PENDING_STATUS_LABEL: &str = "Checking...";

/// Visual class of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeClass {
    Open,
    Waitlist,
    Closed,
    Unknown,
}

impl BadgeClass {
    /// Map a (possibly absent) status to its badge
    pub fn for_status(status: Option<&SectionStatus>) -> Self {
        match status {
            Some(SectionStatus::Open) => BadgeClass::Open,
            Some(SectionStatus::Waitlisted) => BadgeClass::Waitlist,
            Some(SectionStatus::Closed) => BadgeClass::Closed,
            Some(SectionStatus::Other(_)) | None => BadgeClass::Unknown,
        }
    }

    /// Style class name of the status badge
    pub fn css_class(self) -> &'static str {
        match self {
            BadgeClass::Open => "bg-open",
            BadgeClass::Waitlist => "bg-waitlist",
            BadgeClass::Closed => "bg-closed",
            BadgeClass::Unknown => "bg-unknown",
        }
    }
}

/// One rendered task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    /// Target of the enabled toggle
    pub id: TaskId,
    /// Course label; also the target of the delete action (whole course)
    pub course_display_name: String,
    pub section_id: String,
    pub status_label: String,
    pub badge: BadgeClass,
    pub enabled: bool,
}

impl From<Task> for TaskRow {
    fn from(task: Task) -> Self {
        let badge = BadgeClass::for_status(task.status.as_ref());
        let status_label = task
            .status
            .map(String::from)
            .unwrap_or_else(|| PENDING_STATUS_LABEL.to_string());

        Self {
            id: task.id,
            course_display_name: task.course_display_name,
            section_id: task.section_id,
            status_label,
            badge,
            enabled: task.enabled,
        }
    }
}

/// A line of the task table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Row {
    Task(TaskRow),
    /// Informational row for an empty collection
    Placeholder { message: String },
    /// Table-wide load failure
    Error { message: String },
}

impl Row {
    pub fn as_task(&self) -> Option<&TaskRow> {
        match self {
            Row::Task(row) => Some(row),
            _ => None,
        }
    }
}

/// Render tasks into display order
///
/// Enabled tasks first, then by course name, then by section id. An empty
/// collection yields a single placeholder row.
pub fn render(mut tasks: Vec<Task>) -> Vec<Row> {
    if tasks.is_empty() {
        return vec![Row::Placeholder {
            message: EMPTY_PLACEHOLDER.to_string(),
        }];
    }

    sort_tasks(&mut tasks);
    tasks.into_iter().map(|t| Row::Task(t.into())).collect()
}

/// Rows shown when the collection could not be fetched
pub fn error_rows() -> Vec<Row> {
    vec![Row::Error {
        message: LOAD_ERROR_MESSAGE.to_string(),
    }]
}

/// Sort tasks in display order
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(compare_tasks);
}

/// Display ordering of two tasks
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    b.enabled
        .cmp(&a.enabled)
        .then_with(|| locale_cmp(&a.course_display_name, &b.course_display_name))
        .then_with(|| locale_cmp(&a.section_id, &b.section_id))
}

thread_local! {
    static COLLATOR: Option<Collator> =
        match Collator::try_new(&DataLocale::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                warn!("Root collator unavailable, sorting by code point: {}", e);
                None
            }
        };
}

/// Locale-aware string comparison
///
/// Uses the root (CLDR default) collation: accents and case are secondary
/// and tertiary differences, punctuation sorts before digits and letters.
/// Strings the collator considers equal fall back to code point order so the
/// result is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}
