//! Display implementations for reconciliation events and reports.

use std::fmt;

use crate::{
    dates::format_date,
    reconcile::{RunEvent, RunReport, SkipReason, SkippedTask},
};

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingTags => write!(f, "missing identity tags"),
            SkipReason::InvalidOccurrence { error } => write!(f, "invalid occurrence: {error}"),
        }
    }
}

impl fmt::Display for SkippedTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task `{}` ({})", self.uid, self.reason)
    }
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunEvent::Summarized {
                window,
                tasks,
                instances,
                rules_with_open,
                rules_with_occurrence,
            } => write!(
                f,
                "Read {tasks} tasks between {} and {}: {instances} instances, \
                 {rules_with_open} rules with open tasks, \
                 {rules_with_occurrence} rules with occurrences",
                window.start, window.end
            ),
            RunEvent::TaskSkipped { skipped } => write!(f, "Ignored {skipped}"),
            RunEvent::RuleGated { rule_id } => {
                write!(f, "**{rule_id}**: open task exists, not advancing")
            }
            RunEvent::NothingDue {
                rule_id,
                last_occurrence,
                window_end,
            } => write!(
                f,
                "**{rule_id}**: nothing due through {window_end} (last occurrence: {})",
                match last_occurrence {
                    Some(date) => format_date(Some(*date)),
                    None => "none".to_string(),
                }
            ),
            RunEvent::Planned { task } => write!(
                f,
                "**{}**: would create \"{}\" for {}",
                task.rule_id, task.summary, task.occurrence
            ),
            RunEvent::Created { task } => write!(
                f,
                "**{}**: created \"{}\" for {}",
                task.rule_id, task.summary, task.occurrence
            ),
            RunEvent::Failed { rule_id, reason } => write!(f, "**{rule_id}**: failed: {reason}"),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = if self.simulated {
            "Dry run"
        } else {
            "Sync complete"
        };
        writeln!(f, "# {heading}")?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Window**: {} to {} (today {})",
            self.window.start, self.window.end, self.window.today
        )?;
        if self.simulated {
            writeln!(f, "- **Planned**: {}", self.planned)?;
        } else {
            writeln!(f, "- **Created**: {}", self.created)?;
        }
        writeln!(f, "- **Open**: {}", self.gated)?;
        writeln!(f, "- **Up to date**: {}", self.idle)?;
        writeln!(f, "- **Failed**: {}", self.failed)?;
        if self.skipped_tasks > 0 {
            writeln!(f, "- **Ignored tasks**: {}", self.skipped_tasks)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the events of a run as a list.
pub struct Events<'a>(pub &'a [RunEvent]);

impl fmt::Display for Events<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in self.0 {
            if matches!(event, RunEvent::Summarized { .. }) {
                continue;
            }
            writeln!(f, "- {event}")?;
        }
        Ok(())
    }
}
