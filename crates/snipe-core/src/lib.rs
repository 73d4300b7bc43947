//! snipe core library
//!
//! This crate provides the client side of snipe, a course-section monitor:
//! it keeps a table of monitored sections in step with the task service that
//! owns them.
//!
//! # Architecture
//!
//! - **Task service**: the only source of truth; nothing is cached locally
//! - **Sync client**: runs a mutation, then reloads the whole list
//! - **Surface**: whatever front end displays the table (TUI, console)
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let backend = Arc::new(HttpBackend::from_config(&config)?);
//! let client = SyncClient::new(backend, surface);
//!
//! client.refresh().await;
//! client.toggle_enabled(TaskId(42)).await;
//! ```
//!
//! # Modules
//!
//! - `sync`: Sync client and the surface trait (main entry point)
//! - `api`: Task service contract and its HTTP implementation
//! - `render`: Table ordering and row construction
//! - `models`: Task data structures
//! - `config`: Application configuration

pub mod api;
pub mod config;
pub mod models;
pub mod render;
pub mod sync;

pub use api::{ApiError, HttpBackend, TaskBackend};
pub use config::Config;
pub use models::{SectionStatus, Task, TaskId};
pub use render::{render, BadgeClass, Row, TaskRow};
pub use sync::{Outcome, Surface, SyncClient};
