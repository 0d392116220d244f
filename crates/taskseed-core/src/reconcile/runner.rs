//! Reconciliation runs against a task store.

use jiff::{tz::TimeZone, Timestamp};

use super::{plan_rule, summarize, EventSink, PlanContext, RulePlan, RunEvent, RunReport};
use crate::{
    dates::Window,
    error::{Result, TaskseedError},
    models::{DuePreference, Rule},
    store::TaskStore,
};

/// Default number of days ahead considered for new occurrences.
pub const DEFAULT_HORIZON_DAYS: u32 = 14;

/// Default number of days back the store is read for existing tasks.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Runs reconciliation of rules against one task store.
#[derive(Debug, Clone)]
pub struct Reconciler<S> {
    store: S,
    timezone: TimeZone,
    due: DuePreference,
    horizon_days: u32,
    lookback_days: u32,
    simulate: bool,
}

impl<S: TaskStore> Reconciler<S> {
    /// The store this reconciler reads and writes.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reconciles `rules` as of `now`.
    ///
    /// Reads the store once, then plans and commits each rule in order.
    /// Failing to read the store aborts the run before anything is created.
    /// Failing to create one rule's task is reported as
    /// [`RunEvent::Failed`] and the remaining rules are still processed.
    ///
    /// Dropping the returned future mid-run leaves already created tasks in
    /// place; a later run skips them through their instance identifiers.
    pub async fn run<K: EventSink>(
        &self,
        rules: &[Rule],
        now: Timestamp,
        sink: &mut K,
    ) -> Result<RunReport> {
        let window = Window::around(now, &self.timezone, self.lookback_days, self.horizon_days)?;
        let mut report = RunReport::new(window, self.simulate);

        let tasks = self.store.list_tasks(window.start, window.end).await?;
        let (summary, skipped) = summarize(&tasks);

        let mut emit = |event: RunEvent, report: &mut RunReport| {
            report.count(&event);
            sink.record(event);
        };

        for skipped in skipped {
            emit(RunEvent::TaskSkipped { skipped }, &mut report);
        }
        emit(
            RunEvent::Summarized {
                window,
                tasks: tasks.len(),
                instances: summary.instance_count(),
                rules_with_open: summary.open_rule_count(),
                rules_with_occurrence: summary.rules_with_occurrence(),
            },
            &mut report,
        );

        let ctx = PlanContext {
            target: self.store.target(),
            window,
            timezone: &self.timezone,
            due: self.due,
        };

        for rule in rules {
            let event = match plan_rule(rule, &summary, &ctx) {
                Ok(RulePlan::Gated) => RunEvent::RuleGated {
                    rule_id: rule.id.clone(),
                },
                Ok(RulePlan::NothingDue) => RunEvent::NothingDue {
                    rule_id: rule.id.clone(),
                    last_occurrence: summary.latest_occurrence(&rule.id),
                    window_end: window.end,
                },
                Ok(RulePlan::Due(task)) if self.simulate => RunEvent::Planned { task },
                Ok(RulePlan::Due(task)) => match self.store.create_task(&task).await {
                    Ok(()) => RunEvent::Created { task },
                    Err(e) => RunEvent::Failed {
                        rule_id: rule.id.clone(),
                        reason: e.to_string(),
                    },
                },
                Err(e) => RunEvent::Failed {
                    rule_id: rule.id.clone(),
                    reason: e.to_string(),
                },
            };
            emit(event, &mut report);
        }

        Ok(report)
    }
}

/// Builder for creating and configuring [`Reconciler`] instances.
#[derive(Debug, Clone)]
pub struct ReconcilerBuilder<S> {
    store: S,
    timezone: TimeZone,
    due: DuePreference,
    horizon_days: u32,
    lookback_days: u32,
    simulate: bool,
}

impl<S: TaskStore> ReconcilerBuilder<S> {
    /// Creates a builder with UTC, midnight due times and default window
    /// sizes.
    pub fn new(store: S) -> Self {
        Self {
            store,
            timezone: TimeZone::UTC,
            due: DuePreference::default(),
            horizon_days: DEFAULT_HORIZON_DAYS,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            simulate: false,
        }
    }

    /// Sets the timezone occurrences and due times are computed in.
    pub fn with_timezone(mut self, timezone: TimeZone) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_due(mut self, due: DuePreference) -> Self {
        self.due = due;
        self
    }

    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    /// Applies per-invocation window overrides; `None` keeps the current
    /// value.
    pub fn with_window_overrides(mut self, horizon: Option<u32>, lookback: Option<u32>) -> Self {
        if let Some(days) = horizon {
            self.horizon_days = days;
        }
        if let Some(days) = lookback {
            self.lookback_days = days;
        }
        self
    }

    /// When set, decisions are reported but nothing is written.
    pub fn simulate(mut self, simulate: bool) -> Self {
        self.simulate = simulate;
        self
    }

    /// Builds the reconciler.
    ///
    /// # Errors
    ///
    /// Returns `TaskseedError::InvalidInput` if a window size is zero
    pub fn build(self) -> Result<Reconciler<S>> {
        if self.horizon_days == 0 {
            return Err(TaskseedError::invalid_input("horizon_days")
                .with_reason("must be greater than zero"));
        }
        if self.lookback_days == 0 {
            return Err(TaskseedError::invalid_input("lookback_days")
                .with_reason("must be greater than zero"));
        }

        Ok(Reconciler {
            store: self.store,
            timezone: self.timezone,
            due: self.due,
            horizon_days: self.horizon_days,
            lookback_days: self.lookback_days,
            simulate: self.simulate,
        })
    }
}
