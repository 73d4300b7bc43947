//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use snipe_core::{Row, TaskRow};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
#[derive(Debug, Clone, Copy)]
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print the task table
    ///
    /// `total` is `None` when the rows describe a load failure.
    pub fn print_rows(&self, rows: &[Row], total: Option<usize>) {
        match self.format {
            OutputFormat::Human => {
                for line in table_lines(rows) {
                    match rows.first() {
                        Some(Row::Error { .. }) => eprintln!("{}", line),
                        _ => println!("{}", line),
                    }
                }
                if let Some(total) = total {
                    println!("\n{} task(s)", total);
                }
            }
            OutputFormat::Json => {
                let value = match total {
                    Some(total) => serde_json::json!({ "total": total, "rows": rows }),
                    None => serde_json::json!({ "error": error_message(rows), "rows": rows }),
                };
                println!("{}", value);
            }
            OutputFormat::Quiet => {
                for row in rows {
                    match row {
                        Row::Task(task) => println!("{}", task.id),
                        Row::Error { message } => eprintln!("{}", message),
                        Row::Placeholder { .. } => {}
                    }
                }
            }
        }
    }

    /// Print a user notification
    ///
    /// Notifications are never suppressed; quiet mode sends them to stderr.
    pub fn alert(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", message),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "alert": message }));
            }
            OutputFormat::Quiet => eprintln!("{}", message),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

const HEADERS: [&str; 6] = ["ID", "COURSE", "SECTION", "STATUS", "BADGE", "ENABLED"];

/// Format rows as aligned text lines
fn table_lines(rows: &[Row]) -> Vec<String> {
    let tasks: Vec<&TaskRow> = rows.iter().filter_map(Row::as_task).collect();
    if tasks.is_empty() {
        return rows
            .iter()
            .filter_map(|row| match row {
                Row::Placeholder { message } | Row::Error { message } => Some(message.clone()),
                Row::Task(_) => None,
            })
            .collect();
    }

    let cells: Vec<[String; 6]> = tasks
        .iter()
        .map(|t| {
            [
                t.id.to_string(),
                t.course_display_name.clone(),
                t.section_id.clone(),
                t.status_label.clone(),
                t.badge.css_class().to_string(),
                enabled_label(t.enabled).to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cols: [&str; 6]| -> String {
        cols.iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:<width$}", col, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(HEADERS)];
    for row in &cells {
        lines.push(format_line([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
            row[4].as_str(),
            row[5].as_str(),
        ]));
    }
    lines
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn error_message(rows: &[Row]) -> Option<&str> {
    rows.iter().find_map(|row| match row {
        Row::Error { message } => Some(message.as_str()),
        _ => None,
    })
}
