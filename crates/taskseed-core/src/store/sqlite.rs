//! SQLite-backed task store.

use std::path::{Path, PathBuf};

use jiff::civil::Date;
use tokio::task;

use super::TaskStore;
use crate::{
    db::Database,
    error::{Result, TaskseedError},
    models::{NewTask, Task},
};

/// Task store over one list in a SQLite database file.
///
/// Each call opens its own connection on the blocking pool, so the store is
/// cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
    list: String,
}

impl SqliteStore {
    /// Returns a builder for a store over `list`.
    pub fn builder(list: impl Into<String>) -> SqliteStoreBuilder {
        SqliteStoreBuilder::new(list)
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Lists every task in the list, optionally skipping completed ones.
    pub async fn all_tasks(&self, include_completed: bool) -> Result<Vec<Task>> {
        let db_path = self.db_path.clone();
        let list = self.list.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.all_tasks(&list, include_completed)
        })
        .await
        .map_err(TaskseedError::join)?
    }

    /// Adds an untagged task to the list.
    pub async fn add_task(&self, summary: &str, due_date: Option<Date>) -> Result<Task> {
        let db_path = self.db_path.clone();
        let list = self.list.clone();
        let summary = summary.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.add_task(&list, &summary, due_date)
        })
        .await
        .map_err(TaskseedError::join)?
    }

    /// Marks the task with `uid` complete.
    pub async fn complete_task(&self, uid: &str) -> Result<()> {
        let db_path = self.db_path.clone();
        let uid = uid.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.complete_task(&uid)
        })
        .await
        .map_err(TaskseedError::join)?
    }
}

impl TaskStore for SqliteStore {
    fn target(&self) -> &str {
        &self.list
    }

    async fn list_tasks(&self, start: Date, end: Date) -> Result<Vec<Task>> {
        let db_path = self.db_path.clone();
        let list = self.list.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_tasks(&list, start, end)
        })
        .await
        .map_err(TaskseedError::join)?
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<()> {
        let db_path = self.db_path.clone();
        let list = self.list.clone();
        let new_task = new_task.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_task(&list, &new_task)
        })
        .await
        .map_err(TaskseedError::join)?
    }
}

/// Builder for creating and configuring [`SqliteStore`] instances.
#[derive(Debug, Clone)]
pub struct SqliteStoreBuilder {
    list: String,
    database_path: Option<PathBuf>,
}

impl SqliteStoreBuilder {
    /// Creates a new builder for `list` with default settings.
    pub fn new(list: impl Into<String>) -> Self {
        Self {
            list: list.into(),
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/taskseed/tasks.db` or `~/.local/share/taskseed/tasks.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the store, creating the database file and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `TaskseedError::FileSystem` if the database path is invalid
    /// Returns `TaskseedError::Database` if database initialization fails
    pub async fn build(self) -> Result<SqliteStore> {
        if self.list.trim().is_empty() {
            return Err(TaskseedError::invalid_input("target.list").with_reason("must not be empty"));
        }

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TaskseedError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), TaskseedError>(())
        })
        .await
        .map_err(TaskseedError::join)??;

        Ok(SqliteStore {
            db_path,
            list: self.list,
        })
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("taskseed")
            .place_data_file("tasks.db")
            .map_err(|e| TaskseedError::XdgDirectory(e.to_string()))
    }
}
