//! Data models for snipe
//!
//! A [`Task`] is one monitored course section as reported by the task
//! service. The client only ever holds a transient copy; every refresh
//! replaces the whole collection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned task identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TaskId)
    }
}

/// Enrollment status of a section, as last seen by the server
///
/// Unrecognized values are kept verbatim so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionStatus {
    Open,
    Waitlisted,
    Closed,
    Other(String),
}

impl SectionStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &str {
        match self {
            SectionStatus::Open => "OPEN",
            SectionStatus::Waitlisted => "WAITLISTED",
            SectionStatus::Closed => "CLOSED",
            SectionStatus::Other(s) => s,
        }
    }
}

impl From<String> for SectionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OPEN" => SectionStatus::Open,
            "WAITLISTED" => SectionStatus::Waitlisted,
            "CLOSED" => SectionStatus::Closed,
            _ => SectionStatus::Other(value),
        }
    }
}

impl From<SectionStatus> for String {
    fn from(value: SectionStatus) -> Self {
        match value {
            SectionStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monitored course section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, stable across refreshes
    pub id: TaskId,
    /// Human-readable course label (e.g. "COMP SCI 577"); grouping key for deletes
    pub course_display_name: String,
    /// Section identifier, unique within a course
    pub section_id: String,
    /// Last status reported by the server (absent until first checked)
    #[serde(default)]
    pub status: Option<SectionStatus>,
    /// Whether the section is actively monitored
    #[serde(default)]
    pub enabled: bool,
}

impl Task {
    pub fn new(
        id: i64,
        course_display_name: impl Into<String>,
        section_id: impl Into<String>,
    ) -> Self {
        Self {
            id: TaskId(id),
            course_display_name: course_display_name.into(),
            section_id: section_id.into(),
            status: None,
            enabled: false,
        }
    }

    pub fn with_status(mut self, status: SectionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}
