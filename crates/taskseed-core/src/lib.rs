//! Core library for taskseed.
//!
//! taskseed turns recurring rules ("every Monday", "the 2nd Tuesday of each
//! month") into dated tasks in a task store, creating each occurrence at
//! most once and never stacking a new task on top of an open one.
//!
//! # Architecture
//!
//! - [`recurrence`]: expands a [`Schedule`](models::Schedule) into occurrence
//!   dates
//! - [`identity`]: derives the stable instance identifier of an occurrence
//! - [`reconcile`]: summarizes the store and decides per rule what to create
//! - [`store`]: the [`TaskStore`] seam and its SQLite implementation
//! - [`config`]: YAML configuration loading and validation
//! - [`display`]: markdown formatting for terminal output
//!
//! # Quick Start
//!
//! ```rust
//! use jiff::Timestamp;
//! use taskseed_core::{Config, ReconcilerBuilder, RunEvent, SqliteStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load("taskseed.yaml")?;
//!
//! let store = SqliteStore::builder(&config.list)
//!     .with_database_path(config.database.as_ref())
//!     .build()
//!     .await?;
//!
//! let reconciler = ReconcilerBuilder::new(store)
//!     .with_timezone(config.timezone.clone())
//!     .with_due(config.due)
//!     .with_horizon_days(config.horizon_days)
//!     .with_lookback_days(config.lookback_days)
//!     .build()?;
//!
//! let mut events: Vec<RunEvent> = Vec::new();
//! let report = reconciler.run(&config.rules, Timestamp::now(), &mut events).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dates;
pub mod db;
pub mod display;
pub mod error;
pub mod identity;
pub mod models;
pub mod reconcile;
pub mod recurrence;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use dates::Window;
pub use db::Database;
pub use error::{Result, TaskseedError};
pub use models::{DuePreference, NewTask, Rule, Schedule, Task, Weekday};
pub use reconcile::{EventSink, Reconciler, ReconcilerBuilder, RunEvent, RunReport};
pub use store::{SqliteStore, TaskStore};
