//! Task store capability consumed by the reconciler.
//!
//! The reconciler only ever reads tasks in a date range and creates new
//! ones. It never updates or deletes. [`SqliteStore`] is the bundled
//! implementation; anything else (a remote task list, a test double) can
//! plug in by implementing [`TaskStore`].

use std::future::Future;

use jiff::civil::Date;

use crate::{
    error::Result,
    models::{NewTask, Task},
};

pub mod sqlite;

pub use sqlite::SqliteStore;

/// Read and create access to one task list.
pub trait TaskStore {
    /// Identifier of the task list, used as input to instance identity.
    fn target(&self) -> &str;

    /// Lists tasks whose due date falls in `[start, end]`.
    fn list_tasks(&self, start: Date, end: Date) -> impl Future<Output = Result<Vec<Task>>> + Send;

    /// Creates a task. Fails if a task with the same uid already exists.
    fn create_task(&self, task: &NewTask) -> impl Future<Output = Result<()>> + Send;
}
