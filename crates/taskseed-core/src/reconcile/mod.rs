//! Reconciliation of rules against the current contents of a task store.
//!
//! One run reads the store once, reduces what it finds into a [`Summary`],
//! and then decides for each rule independently whether a task should be
//! created:
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ list_tasks  │───▶│  summarize  │───▶│  plan_rule  │───▶│ create_task │
//! │  (store)    │    │  (Summary)  │    │ (per rule)  │    │  (store)    │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - A rule with an open tracked task is never advanced (gating).
//! - At most one task is created per rule per run.
//! - An occurrence whose instance identifier is already in the store, open
//!   or completed, is never created again. Identifiers are derived from the
//!   store target, the rule and the date, so re-running against the same
//!   store is idempotent.
//! - A failure to create one rule's task does not affect other rules.
//!
//! The core does not log. Everything worth reporting is sent to an
//! [`EventSink`] as a [`RunEvent`] while the run progresses, and the counts
//! are returned as a [`RunReport`].

use jiff::civil::Date;
use serde::Serialize;

use crate::{dates::Window, models::NewTask};

pub mod processor;
pub mod runner;
pub mod summary;


pub use processor::{build_task, next_occurrence, plan_rule, PlanContext, RulePlan};
pub use runner::{Reconciler, ReconcilerBuilder};
pub use summary::{summarize, SkipReason, SkippedTask, Summary};

/// Something that happened during a reconciliation run.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    /// The store snapshot was read and reduced
    Summarized {
        window: Window,
        tasks: usize,
        instances: usize,
        rules_with_open: usize,
        rules_with_occurrence: usize,
    },
    /// An observed task was left out of the summary
    TaskSkipped { skipped: SkippedTask },
    /// The rule has an open task and was not advanced
    RuleGated { rule_id: String },
    /// No missing occurrence inside the window
    NothingDue {
        rule_id: String,
        last_occurrence: Option<Date>,
        window_end: Date,
    },
    /// Simulated run: the task would have been created
    Planned { task: NewTask },
    /// The task was created in the store
    Created { task: NewTask },
    /// Planning or creating the rule's task failed
    Failed { rule_id: String, reason: String },
}

impl RunEvent {
    /// Rule the event concerns, if any.
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            RunEvent::Summarized { .. } => None,
            RunEvent::TaskSkipped { skipped } => skipped.rule_id.as_deref(),
            RunEvent::RuleGated { rule_id }
            | RunEvent::NothingDue { rule_id, .. }
            | RunEvent::Failed { rule_id, .. } => Some(rule_id),
            RunEvent::Planned { task } | RunEvent::Created { task } => Some(&task.rule_id),
        }
    }
}

/// Receiver of run events.
pub trait EventSink {
    fn record(&mut self, event: RunEvent);
}

impl EventSink for Vec<RunEvent> {
    fn record(&mut self, event: RunEvent) {
        self.push(event);
    }
}

/// Counts of rule outcomes for one run.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RunReport {
    pub window: Window,
    pub simulated: bool,
    pub created: usize,
    pub planned: usize,
    pub gated: usize,
    pub idle: usize,
    pub failed: usize,
    pub skipped_tasks: usize,
}

impl RunReport {
    pub(crate) fn new(window: Window, simulated: bool) -> Self {
        Self {
            window,
            simulated,
            created: 0,
            planned: 0,
            gated: 0,
            idle: 0,
            failed: 0,
            skipped_tasks: 0,
        }
    }

    /// Counts `event` into the matching bucket.
    pub(crate) fn count(&mut self, event: &RunEvent) {
        match event {
            RunEvent::Summarized { .. } => {}
            RunEvent::TaskSkipped { .. } => self.skipped_tasks += 1,
            RunEvent::RuleGated { .. } => self.gated += 1,
            RunEvent::NothingDue { .. } => self.idle += 1,
            RunEvent::Planned { .. } => self.planned += 1,
            RunEvent::Created { .. } => self.created += 1,
            RunEvent::Failed { .. } => self.failed += 1,
        }
    }
}
