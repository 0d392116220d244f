//! Per-rule decision: gate, expand, select, build.

use jiff::{civil::Date, tz::TimeZone};

use super::Summary;
use crate::{
    dates::{format_date, zoned_at, Window},
    error::Result,
    identity::instance_id,
    models::{DuePreference, NewTask, Rule},
    recurrence::occurrences,
};

/// Run-wide inputs shared by every rule decision.
#[derive(Debug, Clone)]
pub struct PlanContext<'a> {
    /// Store target identifier, input to instance identity
    pub target: &'a str,
    pub window: Window,
    pub timezone: &'a TimeZone,
    pub due: DuePreference,
}

/// Outcome of planning one rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RulePlan {
    /// The rule has an open task
    Gated,
    /// Every occurrence in the window already exists, or there is none
    NothingDue,
    /// This task should be created
    Due(NewTask),
}

/// Decides which task, if any, `rule` needs.
///
/// Pure: depends only on the rule, the pre-run summary and the context, so
/// rules can be planned in any order with the same result.
pub fn plan_rule(rule: &Rule, summary: &Summary, ctx: &PlanContext<'_>) -> Result<RulePlan> {
    if summary.has_open(&rule.id) {
        return Ok(RulePlan::Gated);
    }

    match next_occurrence(rule, summary, ctx) {
        Some(occurrence) => build_task(rule, occurrence, ctx).map(RulePlan::Due),
        None => Ok(RulePlan::NothingDue),
    }
}

/// Earliest occurrence in `[today, window end]` that has no tracked task.
pub fn next_occurrence(rule: &Rule, summary: &Summary, ctx: &PlanContext<'_>) -> Option<Date> {
    let today = ctx.window.today;
    let mut candidates = occurrences(
        &rule.schedule,
        today,
        ctx.window.end,
        summary.latest_occurrence(&rule.id),
    );
    candidates.sort_unstable();

    candidates
        .into_iter()
        .filter(|occurrence| *occurrence >= today)
        .find(|occurrence| {
            let id = instance_id(ctx.target, &rule.id, &format_date(Some(*occurrence)));
            !summary.is_known(&id)
        })
}

/// Builds the task for `rule` on `occurrence`.
pub fn build_task(rule: &Rule, occurrence: Date, ctx: &PlanContext<'_>) -> Result<NewTask> {
    let id = instance_id(ctx.target, &rule.id, &format_date(Some(occurrence)));
    let due = zoned_at(occurrence, ctx.due.time(), ctx.timezone)?;

    Ok(NewTask {
        uid: id.clone(),
        summary: rule.title.clone(),
        notes: rule.notes.clone(),
        due,
        date_only: ctx.due.is_date_only(),
        instance_id: id,
        rule_id: rule.id.clone(),
        occurrence,
        timezone: ctx.timezone.iana_name().unwrap_or("UTC").to_string(),
    })
}
