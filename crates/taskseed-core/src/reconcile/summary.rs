//! Reduction of observed tasks into per-rule facts.

use std::collections::{HashMap, HashSet};

use jiff::civil::Date;
use serde::Serialize;

use crate::{dates::parse_date, models::Task};

/// Read-only snapshot of what the store already holds, built once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    known_ids: HashSet<String>,
    open_rules: HashSet<String>,
    latest_by_rule: HashMap<String, Date>,
}

impl Summary {
    /// Whether a task with this instance identifier exists, open or not.
    pub fn is_known(&self, instance_id: &str) -> bool {
        self.known_ids.contains(instance_id)
    }

    /// Whether the rule has at least one incomplete tracked task.
    pub fn has_open(&self, rule_id: &str) -> bool {
        self.open_rules.contains(rule_id)
    }

    /// Latest tracked occurrence of the rule.
    pub fn latest_occurrence(&self, rule_id: &str) -> Option<Date> {
        self.latest_by_rule.get(rule_id).copied()
    }

    pub fn instance_count(&self) -> usize {
        self.known_ids.len()
    }

    pub fn open_rule_count(&self) -> usize {
        self.open_rules.len()
    }

    pub fn rules_with_occurrence(&self) -> usize {
        self.latest_by_rule.len()
    }
}

/// Why an observed task was left out of the summary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Instance, rule or occurrence tag is absent
    MissingTags,
    /// The occurrence tag is not a `YYYY-MM-DD` date
    InvalidOccurrence { error: String },
}

/// An observed task excluded from reconciliation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedTask {
    pub uid: String,
    pub instance_id: Option<String>,
    pub rule_id: Option<String>,
    pub occurrence: Option<String>,
    pub reason: SkipReason,
}

impl SkippedTask {
    fn new(task: &Task, reason: SkipReason) -> Self {
        Self {
            uid: task.uid.clone(),
            instance_id: task.instance_id.clone(),
            rule_id: task.rule_id.clone(),
            occurrence: task.occurrence.clone(),
            reason,
        }
    }
}

/// Builds the [`Summary`] of `tasks`.
///
/// Tasks without all three tags, or with an unparseable occurrence, are
/// returned as skipped and otherwise ignored. They are not known instances,
/// so they neither gate their rule nor block an occurrence.
pub fn summarize(tasks: &[Task]) -> (Summary, Vec<SkippedTask>) {
    let mut summary = Summary::default();
    let mut skipped = Vec::new();

    for task in tasks {
        let (Some(instance_id), Some(rule_id), Some(occurrence)) =
            (task.instance_tag(), task.rule_tag(), task.occurrence_tag())
        else {
            skipped.push(SkippedTask::new(task, SkipReason::MissingTags));
            continue;
        };

        let occurrence = match parse_date(occurrence) {
            Ok(date) => date,
            Err(e) => {
                skipped.push(SkippedTask::new(
                    task,
                    SkipReason::InvalidOccurrence {
                        error: e.to_string(),
                    },
                ));
                continue;
            }
        };

        summary.known_ids.insert(instance_id.to_string());

        if !task.completed {
            summary.open_rules.insert(rule_id.to_string());
        }

        summary
            .latest_by_rule
            .entry(rule_id.to_string())
            .and_modify(|latest| *latest = (*latest).max(occurrence))
            .or_insert(occurrence);
    }

    (summary, skipped)
}
