//! Rule model definition.

use serde::{Deserialize, Serialize};

use super::Schedule;

/// A recurring obligation that should have at most one pending task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    /// Unique identifier, stable across runs
    pub id: String,

    /// Summary given to every generated task
    pub title: String,

    /// Free-text notes copied into every generated task
    #[serde(default)]
    pub notes: String,

    /// When the rule occurs
    pub schedule: Schedule,
}
