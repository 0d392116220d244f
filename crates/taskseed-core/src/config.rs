//! Configuration loading and validation.
//!
//! The configuration file is YAML. It is parsed into private raw structs
//! mirroring the file, validated, and turned into a [`Config`] holding
//! resolved types (a [`TimeZone`], a [`DuePreference`]). A `Config` that
//! exists is valid: the reconciler never sees a malformed schedule.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use jiff::{civil::Time, tz::TimeZone};
use serde::Deserialize;

use crate::{
    error::{Result, ResultExt, TaskseedError},
    models::{DuePreference, Rule, Schedule},
};

/// Validated taskseed configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Task list identifier, input to instance identity
    pub list: String,
    /// Database file; `None` means the XDG default
    pub database: Option<PathBuf>,
    pub horizon_days: u32,
    pub lookback_days: u32,
    pub timezone: TimeZone,
    pub due: DuePreference,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    target: RawTarget,
    sync: RawSync,
    #[serde(default)]
    defaults: RawDefaults,
    #[serde(default)]
    rules: Vec<Rule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTarget {
    list: String,
    database: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawSync {
    horizon_days: i64,
    lookback_days: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDefaults {
    timezone: Option<String>,
    #[serde(default)]
    due: RawDue,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawDue {
    time: Option<String>,
    #[serde(default)]
    date_only: bool,
}

impl Config {
    /// Reads, parses and validates the configuration file at `path`.
    ///
    /// A relative `target.database` is resolved against the directory of
    /// the configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| TaskseedError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut config = Self::parse_named(&raw, path)?;
        if let (Some(database), Some(dir)) = (&config.database, path.parent()) {
            if database.is_relative() {
                config.database = Some(dir.join(database));
            }
        }
        Ok(config)
    }

    /// Parses and validates configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self> {
        Self::parse_named(yaml, Path::new("<memory>"))
    }

    fn parse_named(yaml: &str, path: &Path) -> Result<Self> {
        let raw: RawConfig =
            serde_yaml::from_str(yaml).map_err(|e| TaskseedError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self> {
        let list = raw.target.list.trim().to_string();
        if list.is_empty() {
            return Err(TaskseedError::invalid_input("target.list").with_reason("must not be empty"));
        }

        let horizon_days = positive_days("sync.horizonDays", raw.sync.horizon_days)?;
        let lookback_days = positive_days("sync.lookbackDays", raw.sync.lookback_days)?;

        let timezone = match raw.defaults.timezone.as_deref().map(str::trim) {
            None | Some("") => TimeZone::UTC,
            Some(name) => TimeZone::get(name).with_context(format!("Unknown timezone '{name}'"))?,
        };

        let due = if raw.defaults.due.date_only {
            DuePreference::DateOnly
        } else {
            match raw.defaults.due.time.as_deref().map(str::trim) {
                None | Some("") => DuePreference::default(),
                Some(value) => DuePreference::At(
                    Time::strptime("%H:%M", value)
                        .with_context(format!("Invalid due time '{value}', expected HH:MM"))?,
                ),
            }
        };

        let mut seen = HashSet::new();
        for (index, rule) in raw.rules.iter().enumerate() {
            validate_rule(index, rule)?;
            if !seen.insert(rule.id.as_str()) {
                return Err(TaskseedError::Configuration {
                    message: format!("rules[{index}].id '{}' must be unique", rule.id),
                });
            }
        }

        Ok(Self {
            list,
            database: raw.target.database,
            horizon_days,
            lookback_days,
            timezone,
            due,
            rules: raw.rules,
        })
    }
}

fn positive_days(field: &str, value: i64) -> Result<u32> {
    match u32::try_from(value) {
        Ok(days) if days > 0 => Ok(days),
        _ => Err(TaskseedError::invalid_input(field).with_reason("must be greater than zero")),
    }
}

fn validate_rule(index: usize, rule: &Rule) -> Result<()> {
    if rule.id.trim().is_empty() {
        return Err(TaskseedError::invalid_input(format!("rules[{index}].id"))
            .with_reason("is required"));
    }
    if rule.title.trim().is_empty() {
        return Err(TaskseedError::invalid_input(format!("rules[{index}].title"))
            .with_reason("is required"));
    }
    validate_schedule(&rule.schedule)
        .map_err(|(field, reason)| {
            TaskseedError::invalid_input(format!("rules[{index}].schedule.{field}"))
                .with_reason(reason)
        })
}

/// Checks kind-specific parameters, returning the offending key and reason.
fn validate_schedule(schedule: &Schedule) -> std::result::Result<(), (&'static str, &'static str)> {
    match schedule {
        Schedule::Weekly { weekdays } if weekdays.is_empty() => {
            Err(("weekdays", "at least one weekday is required"))
        }
        Schedule::EveryNDays { interval } if *interval <= 0 => {
            Err(("everyNDays", "must be greater than zero"))
        }
        Schedule::MonthlyDay { days } if days.is_empty() => {
            Err(("monthDays", "at least one day is required"))
        }
        Schedule::MonthlyDay { days } if days.iter().any(|d| !(1..=31).contains(d)) => {
            Err(("monthDays", "days must be between 1 and 31"))
        }
        Schedule::MonthlyNthWeekday { nth, .. } if *nth < 1 => {
            Err(("nth", "must be greater than zero"))
        }
        Schedule::YearlyDate { month, .. } if !(1..=12).contains(month) => {
            Err(("month", "must be between 1 and 12"))
        }
        Schedule::YearlyDate { day, .. } if !(1..=31).contains(day) => {
            Err(("day", "must be between 1 and 31"))
        }
        Schedule::YearlyNthWeekday { month, .. } if !(1..=12).contains(month) => {
            Err(("month", "must be between 1 and 12"))
        }
        Schedule::YearlyNthWeekday { nth, .. } if *nth < 1 => {
            Err(("nth", "must be greater than zero"))
        }
        _ => Ok(()),
    }
}
