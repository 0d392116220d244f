//! Display implementations for stored tasks.

use std::fmt;

use crate::models::Task;

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.completed { "x" } else { " " };
        write!(f, "- [{check}] **{}**", self.summary)?;
        if let Some(due) = &self.due_date {
            write!(f, " (due {due})")?;
        }
        if let Some(rule) = self.rule_tag() {
            write!(f, " _{rule}_")?;
        }
        writeln!(f, " `{}`", self.uid)
    }
}

/// Newtype wrapper for displaying a list of tasks.
///
/// Handles the empty case with a short message.
pub struct Tasks(pub Vec<Task>);

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for task in &self.0 {
            write!(f, "{task}")?;
        }
        Ok(())
    }
}
