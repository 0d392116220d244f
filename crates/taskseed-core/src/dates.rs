//! Calendar date helpers shared by the recurrence engine and the reconciler.
//!
//! Every comparison in taskseed happens on civil dates. An instant is turned
//! into a date exactly once, through [`date_in`], using the rule timezone.
//! From then on no time-of-day is carried around, so DST transitions cannot
//! shift an occurrence onto a neighbouring day.

use jiff::{
    civil::{Date, Time},
    tz::TimeZone,
    Span, Timestamp, Zoned,
};
use serde::Serialize;

use crate::error::{Result, TaskseedError, TimeResultExt};

/// Layout of occurrence tags and instance identity inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the calendar date of `instant` in `tz`.
pub fn date_in(instant: Timestamp, tz: &TimeZone) -> Date {
    instant.to_zoned(tz.clone()).date()
}

/// Formats a date as `YYYY-MM-DD`, or an empty string for `None`.
pub fn format_date(date: Option<Date>) -> String {
    date.map(|d| d.strftime(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Parses a `YYYY-MM-DD` occurrence tag.
pub fn parse_date(value: &str) -> Result<Date> {
    Date::strptime(DATE_FORMAT, value.trim())
        .time_context(&format!("Invalid occurrence date '{value}'"))
}

/// Returns the number of whole days from `start` to `end`. Negative when
/// `end` precedes `start`.
pub fn days_between(start: Date, end: Date) -> i64 {
    end.since(start)
        .map(|span| i64::from(span.get_days()))
        .unwrap_or(0)
}

/// Shifts `date` by a signed number of days.
pub fn add_days(date: Date, days: i64) -> Result<Date> {
    let span = Span::new()
        .try_days(days)
        .time_context("Day offset out of range")?;
    date.checked_add(span).time_context("Date out of range")
}

/// Returns `date` at `time` in `tz`; `None` means the start of the day.
pub fn zoned_at(date: Date, time: Option<Time>, tz: &TimeZone) -> Result<Zoned> {
    let time = time.unwrap_or(Time::midnight());
    date.to_datetime(time)
        .to_zoned(tz.clone())
        .time_context(&format!("Cannot place {date} in timezone"))
}

/// The date range considered by one reconciliation run.
///
/// `start` bounds the store query, `today..=end` bounds the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: Date,
    pub today: Date,
    pub end: Date,
}

impl Window {
    /// Builds `[today - lookback_days, today + horizon_days]` around `now`.
    pub fn around(
        now: Timestamp,
        tz: &TimeZone,
        lookback_days: u32,
        horizon_days: u32,
    ) -> Result<Self> {
        if lookback_days == 0 || horizon_days == 0 {
            return Err(TaskseedError::invalid_input("window")
                .with_reason("horizon and lookback days must be greater than zero"));
        }

        let today = date_in(now, tz);
        Ok(Self {
            start: add_days(today, -i64::from(lookback_days))?,
            today,
            end: add_days(today, i64::from(horizon_days))?,
        })
    }
}
