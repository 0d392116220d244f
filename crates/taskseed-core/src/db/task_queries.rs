//! Task CRUD operations and queries.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, Row};

use crate::{
    dates::format_date,
    error::{DatabaseResultExt, Result, TaskseedError},
    models::{NewTask, Task},
};

const INSERT_TASK_SQL: &str = "INSERT INTO tasks (uid, list, summary, notes, due, due_date, date_only, timezone, instance_id, rule_id, occurrence, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const INSERT_MANUAL_TASK_SQL: &str =
    "INSERT INTO tasks (uid, list, summary, due_date, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const CHECK_TASK_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM tasks WHERE uid = ?1)";
const COMPLETE_TASK_SQL: &str =
    "UPDATE tasks SET completed = 1, completed_at = ?1 WHERE uid = ?2 AND completed = 0";

const TASK_COLUMNS: &str = "uid, summary, instance_id, rule_id, occurrence, due_date, completed";

impl super::Database {
    /// Inserts a generated task into `list`.
    ///
    /// Fails with [`TaskseedError::Store`] if a task with the same uid is
    /// already present, so a racing second writer cannot duplicate it.
    pub fn create_task(&mut self, list: &str, task: &NewTask) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_TASK_EXISTS_SQL, params![task.uid], |row| row.get(0))
            .db_context("Failed to check task existence")?;
        if exists {
            return Err(TaskseedError::Store {
                message: format!("Task {} already exists", task.uid),
            });
        }

        tx.execute(
            INSERT_TASK_SQL,
            params![
                task.uid,
                list,
                task.summary,
                task.notes,
                task.due.to_string(),
                format_date(Some(task.due.date())),
                task.date_only,
                task.timezone,
                task.instance_id,
                task.rule_id,
                format_date(Some(task.occurrence)),
                Timestamp::now().to_string(),
            ],
        )
        .db_context("Failed to insert task")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Inserts an untagged task, as a person would add one by hand.
    pub fn add_task(&mut self, list: &str, summary: &str, due_date: Option<Date>) -> Result<Task> {
        let now = Timestamp::now();
        let uid = format!("manual-{}", now.as_nanosecond());
        let due = due_date.map(|d| format_date(Some(d)));

        self.connection
            .execute(
                INSERT_MANUAL_TASK_SQL,
                params![uid, list, summary, due, now.to_string()],
            )
            .db_context("Failed to insert task")?;

        Ok(Task {
            uid,
            summary: summary.to_string(),
            due_date: due,
            ..Default::default()
        })
    }

    /// Lists tasks in `list` whose due date falls in `[start, end]`.
    pub fn list_tasks(&self, list: &str, start: Date, end: Date) -> Result<Vec<Task>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE list = ?1 AND due_date BETWEEN ?2 AND ?3 ORDER BY due_date, uid"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let tasks = stmt
            .query_map(
                params![list, format_date(Some(start)), format_date(Some(end))],
                task_from_row,
            )
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read task row")?;

        Ok(tasks)
    }

    /// Lists every task in `list`, optionally skipping completed ones.
    pub fn all_tasks(&self, list: &str, include_completed: bool) -> Result<Vec<Task>> {
        let sql = if include_completed {
            format!("SELECT {TASK_COLUMNS} FROM tasks WHERE list = ?1 ORDER BY due_date, uid")
        } else {
            format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE list = ?1 AND completed = 0 ORDER BY due_date, uid"
            )
        };
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let tasks = stmt
            .query_map(params![list], task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read task row")?;

        Ok(tasks)
    }

    /// Marks a task complete. Completing an already completed task is a
    /// no-op; an unknown uid is an error.
    pub fn complete_task(&mut self, uid: &str) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_TASK_EXISTS_SQL, params![uid], |row| row.get(0))
            .db_context("Failed to check task existence")?;
        if !exists {
            return Err(TaskseedError::TaskNotFound {
                uid: uid.to_string(),
            });
        }

        tx.execute(COMPLETE_TASK_SQL, params![Timestamp::now().to_string(), uid])
            .db_context("Failed to complete task")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        uid: row.get(0)?,
        summary: row.get(1)?,
        instance_id: row.get(2)?,
        rule_id: row.get(3)?,
        occurrence: row.get(4)?,
        due_date: row.get(5)?,
        completed: row.get(6)?,
    })
}
