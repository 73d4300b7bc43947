//! Task command handlers
//!
//! Each command maps to exactly one sync client operation.

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use snipe_core::{Config, HttpBackend, Outcome, SyncClient, TaskId};

use crate::console::ConsoleSurface;
use crate::output::Output;

/// Build a sync client that reports to the console
fn connect(config: &Config, output: &Output, assume_yes: bool) -> Result<SyncClient> {
    let backend =
        HttpBackend::from_config(config).context("Failed to set up task service client")?;
    let surface = ConsoleSurface::new(*output, assume_yes);
    Ok(SyncClient::new(Arc::new(backend), Arc::new(surface)))
}

/// Show all monitored sections
pub async fn list(config: &Config, output: &Output) -> Result<()> {
    let client = connect(config, output, false)?;
    finish(client.refresh().await, "Could not load tasks")
}

/// Search a course and monitor its sections
pub async fn add(config: &Config, course: Vec<String>, output: &Output) -> Result<()> {
    let client = connect(config, output, false)?;
    let course_name = course.join(" ");
    finish(client.search_and_add(&course_name).await, "Add failed")
}

/// Flip monitoring for one section
pub async fn toggle(config: &Config, id: TaskId, output: &Output) -> Result<()> {
    let client = connect(config, output, false)?;
    let outcome = client.toggle_enabled(id).await;
    if outcome == Outcome::Completed {
        output.success(&format!("Toggled task {}", id));
    }
    finish(outcome, "Toggle failed")
}

/// Delete every section of a course
pub async fn delete(config: &Config, course: Vec<String>, yes: bool, output: &Output) -> Result<()> {
    let client = connect(config, output, yes)?;
    let course_name = course.join(" ");
    let outcome = client.delete_course(&course_name).await;
    if outcome == Outcome::Declined {
        output.message("Cancelled.");
    }
    finish(outcome, "Delete failed")
}

/// Turn a failed outcome into a non-zero exit
fn finish(outcome: Outcome, what: &str) -> Result<()> {
    if outcome.is_failure() {
        bail!("{}", what);
    }
    Ok(())
}
