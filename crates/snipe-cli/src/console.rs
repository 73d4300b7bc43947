//! Console surface
//!
//! Drives one-shot CLI commands: tables and notifications go to the
//! terminal, confirmations are asked on stdin.

use std::io::{self, Write};

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use snipe_core::sync::ADD_BUSY_LABEL;
use snipe_core::{Row, Surface};

use crate::output::Output;

/// [`Surface`] that prints to stdout/stderr
pub struct ConsoleSurface {
    output: Output,
    /// Answer every confirmation with yes (--yes)
    assume_yes: bool,
}

impl ConsoleSurface {
    pub fn new(output: Output, assume_yes: bool) -> Self {
        Self { output, assume_yes }
    }
}

#[async_trait]
impl Surface for ConsoleSurface {
    fn show_tasks(&self, rows: Vec<Row>, total: usize) {
        self.output.print_rows(&rows, Some(total));
    }

    fn show_load_error(&self, rows: Vec<Row>) {
        self.output.print_rows(&rows, None);
    }

    fn alert(&self, message: &str) {
        self.output.alert(message);
    }

    async fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if !self.output.should_prompt() {
            return false;
        }

        let prompt = prompt.to_string();
        match tokio::task::spawn_blocking(move || confirm(&prompt)).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                warn!("Failed to read confirmation: {}", e);
                false
            }
            Err(e) => {
                warn!("Confirmation prompt aborted: {}", e);
                false
            }
        }
    }

    fn set_add_busy(&self, busy: bool) {
        if busy {
            self.output.message(ADD_BUSY_LABEL);
        }
    }

    fn clear_course_input(&self) {
        // The course name came from argv; nothing to clear
    }
}

/// Prompt for confirmation
///
/// Returns true if user confirms, false otherwise.
/// In non-interactive mode (no TTY), returns false.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}
