//! Snipe CLI
//!
//! Command-line and terminal interface for the course-section sniper.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use snipe_core::{Config, TaskId};

mod commands;
mod console;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "snipe")]
#[command(about = "Snipe - watch course sections and grab open seats")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to an alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// List monitored sections
    #[command(alias = "ls")]
    List,
    /// Search a course and monitor every section found
    Add {
        /// Course name, e.g. COMP SCI 577
        #[arg(required = true, num_args = 1..)]
        course: Vec<String>,
    },
    /// Flip monitoring of one section
    Toggle {
        /// Task ID
        id: TaskId,
    },
    /// Delete every section of a course
    #[command(alias = "rm")]
    Delete {
        /// Course display name, e.g. COMP SCI 577
        #[arg(required = true, num_args = 1..)]
        course: Vec<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (api_url, data_dir, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands work even when the stored config is invalid
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())?;

    // Handle TUI (default when no command given)
    let command = cli.command.unwrap_or(Commands::Tui);
    if matches!(command, Commands::Tui) {
        return tui::run(config).await;
    }

    init_cli_logging();

    match command {
        Commands::Tui => unreachable!(),           // Handled above
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::List => commands::task::list(&config, &output).await,
        Commands::Add { course } => commands::task::add(&config, course, &output).await,
        Commands::Toggle { id } => commands::task::toggle(&config, id, &output).await,
        Commands::Delete { course, yes } => {
            commands::task::delete(&config, course, yes, &output).await
        }
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Initialize stderr logging for one-shot commands
///
/// Level comes from SNIPE_LOG (default: warn).
fn init_cli_logging() {
    let env_filter =
        EnvFilter::try_from_env("SNIPE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
