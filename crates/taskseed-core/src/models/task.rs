//! Task models as observed in and written to a task store.

use jiff::{
    civil::{Date, Time},
    Zoned,
};
use serde::{Deserialize, Serialize};

/// A task as returned by a task store.
///
/// The three tag fields are only present on tasks generated by taskseed.
/// Tasks missing any of them are ignored during reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Task {
    /// Identifier of the underlying store object
    pub uid: String,

    /// Task title
    pub summary: String,

    /// Instance identifier tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,

    /// Owning rule tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    /// Occurrence date tag, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence: Option<String>,

    /// Due date as stored, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Whether the store marks the task complete
    pub completed: bool,
}

impl Task {
    /// Returns the instance identifier tag if present and non-empty.
    pub fn instance_tag(&self) -> Option<&str> {
        non_empty(self.instance_id.as_deref())
    }

    /// Returns the rule tag if present and non-empty.
    pub fn rule_tag(&self) -> Option<&str> {
        non_empty(self.rule_id.as_deref())
    }

    /// Returns the occurrence tag if present and non-empty.
    pub fn occurrence_tag(&self) -> Option<&str> {
        non_empty(self.occurrence.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A task to be created for one rule occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTask {
    /// Store object identifier, equal to `instance_id`
    pub uid: String,

    /// Task title, taken from the rule
    pub summary: String,

    /// Task notes, taken from the rule
    pub notes: String,

    /// Due instant in the rule timezone
    pub due: Zoned,

    /// Whether only the date part of `due` is meaningful
    pub date_only: bool,

    /// Instance identifier tag
    pub instance_id: String,

    /// Owning rule tag
    pub rule_id: String,

    /// Occurrence date tag
    pub occurrence: Date,

    /// IANA name of the timezone `due` was computed in
    pub timezone: String,
}

/// How the due timestamp of generated tasks is set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuePreference {
    /// Due on the occurrence date with no time of day
    DateOnly,

    /// Due on the occurrence date at a fixed clock time
    At(Time),
}

impl DuePreference {
    /// Clock time applied to occurrences, `None` for date-only tasks.
    pub fn time(&self) -> Option<Time> {
        match self {
            DuePreference::DateOnly => None,
            DuePreference::At(time) => Some(*time),
        }
    }

    pub fn is_date_only(&self) -> bool {
        matches!(self, DuePreference::DateOnly)
    }
}

impl Default for DuePreference {
    fn default() -> Self {
        DuePreference::At(Time::midnight())
    }
}
