//! Schedule definitions and weekday names.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of weekdays, parsed case-insensitively.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            _ => Err(format!("Invalid weekday: {s}")),
        }
    }
}

impl TryFrom<String> for Weekday {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Weekday> for jiff::civil::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => jiff::civil::Weekday::Monday,
            Weekday::Tuesday => jiff::civil::Weekday::Tuesday,
            Weekday::Wednesday => jiff::civil::Weekday::Wednesday,
            Weekday::Thursday => jiff::civil::Weekday::Thursday,
            Weekday::Friday => jiff::civil::Weekday::Friday,
            Weekday::Saturday => jiff::civil::Weekday::Saturday,
            Weekday::Sunday => jiff::civil::Weekday::Sunday,
        }
    }
}

/// Recurrence definition of a rule.
///
/// One variant per supported recurrence; each carries only the parameters
/// its kind uses. Field names follow the configuration file keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum Schedule {
    /// Every listed weekday.
    Weekly { weekdays: Vec<Weekday> },

    /// Every `interval` days, phase-locked to the last known occurrence.
    EveryNDays {
        #[serde(rename = "everyNDays")]
        interval: i64,
    },

    /// Listed days of every month. Days missing from a month are skipped.
    MonthlyDay {
        #[serde(rename = "monthDays")]
        days: Vec<i8>,
    },

    /// The `nth` given weekday of every month.
    MonthlyNthWeekday {
        nth: i8,
        #[serde(rename = "nthWeekday")]
        weekday: Weekday,
    },

    /// One calendar date per year.
    YearlyDate { month: i8, day: i8 },

    /// The `nth` given weekday of `month`, once per year.
    YearlyNthWeekday {
        month: i8,
        nth: i8,
        #[serde(rename = "yearlyNthWeekday")]
        weekday: Weekday,
    },
}

impl Schedule {
    /// Configuration tag of this schedule kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Schedule::Weekly { .. } => "weekly",
            Schedule::EveryNDays { .. } => "every_n_days",
            Schedule::MonthlyDay { .. } => "monthly_day",
            Schedule::MonthlyNthWeekday { .. } => "monthly_nth_weekday",
            Schedule::YearlyDate { .. } => "yearly_date",
            Schedule::YearlyNthWeekday { .. } => "yearly_nth_weekday",
        }
    }
}
