//! Recurrence engine: expands a [`Schedule`] into occurrence dates.
//!
//! The engine is a pure function of its inputs. It never fails: parameters
//! that cannot produce a date (an interval below one, a day missing from a
//! month, an `nth` weekday past the end of the month) simply contribute
//! nothing. Validation of schedules is done when the configuration loads.

use jiff::{civil::Date, Span, ToSpan};

use crate::{
    dates::days_between,
    models::{Schedule, Weekday},
};

/// Returns the occurrence dates of `schedule` in `[start, end]`, inclusive.
///
/// `anchor` is the most recent known occurrence of the rule and only affects
/// [`Schedule::EveryNDays`]. Dates are produced per kind and are not sorted
/// across months or years; callers that need the earliest date must sort.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use taskseed_core::{models::{Schedule, Weekday}, recurrence::occurrences};
///
/// let schedule = Schedule::Weekly {
///     weekdays: vec![Weekday::Monday, Weekday::Wednesday],
/// };
/// let dates = occurrences(&schedule, date(2023, 1, 1), date(2023, 1, 8), None);
/// assert_eq!(dates, vec![date(2023, 1, 2), date(2023, 1, 4)]);
/// ```
pub fn occurrences(schedule: &Schedule, start: Date, end: Date, anchor: Option<Date>) -> Vec<Date> {
    if end < start {
        return Vec::new();
    }

    match schedule {
        Schedule::Weekly { weekdays } => weekly(weekdays, start, end),
        Schedule::EveryNDays { interval } => every_n_days(*interval, start, end, anchor),
        Schedule::MonthlyDay { days } => monthly_day(days, start, end),
        Schedule::MonthlyNthWeekday { nth, weekday } => {
            monthly_nth_weekday(*nth, *weekday, start, end)
        }
        Schedule::YearlyDate { month, day } => yearly_date(*month, *day, start, end),
        Schedule::YearlyNthWeekday {
            month,
            nth,
            weekday,
        } => yearly_nth_weekday(*month, *nth, *weekday, start, end),
    }
}

fn weekly(weekdays: &[Weekday], start: Date, end: Date) -> Vec<Date> {
    let targets: Vec<jiff::civil::Weekday> = weekdays.iter().map(|&d| d.into()).collect();
    if targets.is_empty() {
        return Vec::new();
    }

    days_in(start, end, 1.day())
        .filter(|date| targets.contains(&date.weekday()))
        .collect()
}

fn every_n_days(interval: i64, start: Date, end: Date, anchor: Option<Date>) -> Vec<Date> {
    if interval <= 0 {
        return Vec::new();
    }

    let first = match anchor {
        Some(anchor) if anchor < start => {
            // Resume the cadence of the last known occurrence instead of
            // restarting it at the window start.
            let gap = days_between(anchor, start);
            let skip = gap.div_euclid(interval) * interval;
            let Some(mut first) = shift(anchor, skip) else {
                return Vec::new();
            };
            if first < start {
                match shift(first, interval) {
                    Some(next) => first = next,
                    None => return Vec::new(),
                }
            }
            first
        }
        Some(anchor) => anchor,
        None => start,
    };

    match Span::new().try_days(interval) {
        Ok(step) => days_in(first, end, step).collect(),
        // Wider than any span: the second occurrence falls past every date.
        Err(_) if first <= end => vec![first],
        Err(_) => Vec::new(),
    }
}

fn monthly_day(days: &[i8], start: Date, end: Date) -> Vec<Date> {
    let mut days = days.to_vec();
    days.sort_unstable();
    days.dedup();

    months_in(start, end)
        .flat_map(|first| {
            days.iter()
                .filter_map(move |&day| Date::new(first.year(), first.month(), day).ok())
        })
        .filter(|date| in_range(*date, start, end))
        .collect()
}

fn monthly_nth_weekday(nth: i8, weekday: Weekday, start: Date, end: Date) -> Vec<Date> {
    months_in(start, end)
        .filter_map(|first| nth_weekday(first, nth, weekday))
        .filter(|date| in_range(*date, start, end))
        .collect()
}

fn yearly_date(month: i8, day: i8, start: Date, end: Date) -> Vec<Date> {
    (start.year()..=end.year())
        .filter_map(|year| Date::new(year, month, day).ok())
        .filter(|date| in_range(*date, start, end))
        .collect()
}

fn yearly_nth_weekday(month: i8, nth: i8, weekday: Weekday, start: Date, end: Date) -> Vec<Date> {
    (start.year()..=end.year())
        .filter_map(|year| Date::new(year, month, 1).ok())
        .filter_map(|first| nth_weekday(first, nth, weekday))
        .filter(|date| in_range(*date, start, end))
        .collect()
}

/// The `nth` (1-based) `weekday` of the month starting at `first`, if that
/// month has one.
fn nth_weekday(first: Date, nth: i8, weekday: Weekday) -> Option<Date> {
    if nth < 1 {
        return None;
    }
    first.nth_weekday_of_month(nth, weekday.into()).ok()
}

/// Dates from `first` stepping by `step` while not past `end`.
fn days_in(first: Date, end: Date, step: Span) -> impl Iterator<Item = Date> {
    first.series(step).take_while(move |date| *date <= end)
}

/// First day of every month overlapping `[start, end]`.
fn months_in(start: Date, end: Date) -> impl Iterator<Item = Date> {
    start
        .first_of_month()
        .series(1.month())
        .take_while(move |first| *first <= end)
}

fn shift(date: Date, days: i64) -> Option<Date> {
    let span = Span::new().try_days(days).ok()?;
    date.checked_add(span).ok()
}

fn in_range(date: Date, start: Date, end: Date) -> bool {
    date >= start && date <= end
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn every(interval: i64) -> Schedule {
        Schedule::EveryNDays { interval }
    }

    #[test]
    fn test_weekly() {
        let schedule = Schedule::Weekly {
            weekdays: vec![Weekday::Monday, Weekday::Wednesday],
        };
        let got = occurrences(&schedule, date(2023, 1, 1), date(2023, 1, 8), None);
        assert_eq!(got, vec![date(2023, 1, 2), date(2023, 1, 4)]);
    }

    #[test]
    fn test_weekly_without_weekdays_is_empty() {
        let schedule = Schedule::Weekly { weekdays: vec![] };
        assert!(occurrences(&schedule, date(2023, 1, 1), date(2023, 3, 1), None).is_empty());
    }

    #[test]
    fn test_weekly_includes_both_endpoints() {
        let schedule = Schedule::Weekly {
            weekdays: vec![Weekday::Sunday],
        };
        let got = occurrences(&schedule, date(2023, 1, 1), date(2023, 1, 8), None);
        assert_eq!(got, vec![date(2023, 1, 1), date(2023, 1, 8)]);
    }

    #[test]
    fn test_every_n_days_without_anchor() {
        let got = occurrences(&every(2), date(2023, 1, 1), date(2023, 1, 7), None);
        assert_eq!(
            got,
            vec![
                date(2023, 1, 1),
                date(2023, 1, 3),
                date(2023, 1, 5),
                date(2023, 1, 7)
            ]
        );
    }

    #[test]
    fn test_every_n_days_rejects_non_positive_interval() {
        assert!(occurrences(&every(0), date(2023, 1, 1), date(2023, 1, 7), None).is_empty());
        assert!(occurrences(&every(-3), date(2023, 1, 1), date(2023, 1, 7), None).is_empty());
    }

    #[test]
    fn test_every_n_days_resumes_anchor_phase() {
        // Anchor on Dec 30 with a 3-day cadence: Jan 2, Jan 5, Jan 8 ...
        let got = occurrences(
            &every(3),
            date(2023, 1, 1),
            date(2023, 1, 10),
            Some(date(2022, 12, 30)),
        );
        assert_eq!(got, vec![date(2023, 1, 2), date(2023, 1, 5), date(2023, 1, 8)]);
    }

    #[test]
    fn test_every_n_days_anchor_landing_on_start() {
        let got = occurrences(
            &every(7),
            date(2023, 1, 8),
            date(2023, 1, 20),
            Some(date(2023, 1, 1)),
        );
        assert_eq!(got, vec![date(2023, 1, 8), date(2023, 1, 15)]);
    }

    #[test]
    fn test_every_n_days_anchor_inside_window_is_kept() {
        let got = occurrences(
            &every(4),
            date(2023, 1, 1),
            date(2023, 1, 12),
            Some(date(2023, 1, 3)),
        );
        assert_eq!(got, vec![date(2023, 1, 3), date(2023, 1, 7), date(2023, 1, 11)]);
    }

    #[test]
    fn test_every_n_days_unaligned_anchor_sets_new_phase() {
        // A hand-edited occurrence on Jan 4 for a weekly cadence that used to
        // run on Sundays: the cadence follows the edited date from then on.
        let got = occurrences(
            &every(7),
            date(2023, 1, 9),
            date(2023, 1, 31),
            Some(date(2023, 1, 4)),
        );
        assert_eq!(got, vec![date(2023, 1, 11), date(2023, 1, 18), date(2023, 1, 25)]);
    }

    #[test]
    fn test_every_n_days_interval_wider_than_any_span() {
        let got = occurrences(&every(10_000_000), date(2023, 1, 1), date(2023, 1, 31), None);
        assert_eq!(got, vec![date(2023, 1, 1)]);

        let anchored = occurrences(
            &every(10_000_000),
            date(2023, 1, 1),
            date(2023, 1, 31),
            Some(date(2023, 1, 20)),
        );
        assert_eq!(anchored, vec![date(2023, 1, 20)]);

        let past_anchor = occurrences(
            &every(10_000_000),
            date(2023, 1, 10),
            date(2023, 1, 31),
            Some(date(2023, 1, 2)),
        );
        assert!(past_anchor.is_empty());
    }

    #[test]
    fn test_monthly_day() {
        let schedule = Schedule::MonthlyDay { days: vec![15, 1] };
        let got = occurrences(&schedule, date(2023, 1, 10), date(2023, 3, 20), None);
        assert_eq!(
            got,
            vec![
                date(2023, 1, 15),
                date(2023, 2, 1),
                date(2023, 2, 15),
                date(2023, 3, 1),
                date(2023, 3, 15)
            ]
        );
    }

    #[test]
    fn test_monthly_day_skips_missing_days() {
        let schedule = Schedule::MonthlyDay { days: vec![31] };
        let got = occurrences(&schedule, date(2023, 1, 1), date(2023, 4, 30), None);
        assert_eq!(got, vec![date(2023, 1, 31), date(2023, 3, 31)]);
    }

    #[test]
    fn test_monthly_day_ignores_out_of_range_values() {
        let schedule = Schedule::MonthlyDay {
            days: vec![0, 32, -1, 10],
        };
        let got = occurrences(&schedule, date(2023, 1, 1), date(2023, 1, 31), None);
        assert_eq!(got, vec![date(2023, 1, 10)]);
    }

    #[test]
    fn test_monthly_nth_weekday() {
        let schedule = Schedule::MonthlyNthWeekday {
            nth: 2,
            weekday: Weekday::Monday,
        };
        let got = occurrences(&schedule, date(2023, 1, 1), date(2023, 3, 31), None);
        assert_eq!(got, vec![date(2023, 1, 9), date(2023, 2, 13), date(2023, 3, 13)]);
    }

    #[test]
    fn test_monthly_nth_weekday_past_month_end_is_empty() {
        let schedule = Schedule::MonthlyNthWeekday {
            nth: 6,
            weekday: Weekday::Monday,
        };
        assert!(occurrences(&schedule, date(2023, 1, 1), date(2023, 12, 31), None).is_empty());
    }

    #[test]
    fn test_monthly_nth_weekday_fifth_only_in_long_months() {
        let schedule = Schedule::MonthlyNthWeekday {
            nth: 5,
            weekday: Weekday::Monday,
        };
        let got = occurrences(&schedule, date(2023, 1, 1), date(2023, 3, 31), None);
        assert_eq!(got, vec![date(2023, 1, 30)]);
    }

    #[test]
    fn test_monthly_nth_weekday_rejects_non_positive_nth() {
        let schedule = Schedule::MonthlyNthWeekday {
            nth: -1,
            weekday: Weekday::Friday,
        };
        assert!(occurrences(&schedule, date(2023, 1, 1), date(2023, 3, 31), None).is_empty());
    }

    #[test]
    fn test_yearly_date() {
        let schedule = Schedule::YearlyDate { month: 3, day: 14 };
        let got = occurrences(&schedule, date(2022, 6, 1), date(2024, 6, 1), None);
        assert_eq!(got, vec![date(2023, 3, 14), date(2024, 3, 14)]);
    }

    #[test]
    fn test_yearly_date_never_existing_is_empty() {
        let schedule = Schedule::YearlyDate { month: 2, day: 31 };
        assert!(occurrences(&schedule, date(2020, 1, 1), date(2030, 12, 31), None).is_empty());
    }

    #[test]
    fn test_yearly_date_leap_day() {
        let schedule = Schedule::YearlyDate { month: 2, day: 29 };
        let got = occurrences(&schedule, date(2023, 1, 1), date(2025, 12, 31), None);
        assert_eq!(got, vec![date(2024, 2, 29)]);
    }

    #[test]
    fn test_yearly_nth_weekday() {
        let schedule = Schedule::YearlyNthWeekday {
            month: 5,
            nth: 1,
            weekday: Weekday::Monday,
        };
        let got = occurrences(&schedule, date(2022, 1, 1), date(2024, 12, 31), None);
        assert_eq!(
            got,
            vec![date(2022, 5, 2), date(2023, 5, 1), date(2024, 5, 6)]
        );
    }

    #[test]
    fn test_yearly_nth_weekday_invalid_month_is_empty() {
        let schedule = Schedule::YearlyNthWeekday {
            month: 13,
            nth: 1,
            weekday: Weekday::Monday,
        };
        assert!(occurrences(&schedule, date(2022, 1, 1), date(2024, 12, 31), None).is_empty());
    }

    #[test]
    fn test_reversed_window_is_empty() {
        assert!(occurrences(&every(1), date(2023, 1, 7), date(2023, 1, 1), None).is_empty());
    }

    #[test]
    fn test_all_kinds_stay_inside_window() {
        let start = date(2023, 1, 17);
        let end = date(2024, 2, 3);
        let schedules = [
            Schedule::Weekly {
                weekdays: vec![Weekday::Tuesday, Weekday::Saturday],
            },
            every(5),
            Schedule::MonthlyDay {
                days: vec![1, 17, 31],
            },
            Schedule::MonthlyNthWeekday {
                nth: 3,
                weekday: Weekday::Thursday,
            },
            Schedule::YearlyDate { month: 1, day: 10 },
            Schedule::YearlyNthWeekday {
                month: 2,
                nth: 1,
                weekday: Weekday::Friday,
            },
        ];

        for schedule in &schedules {
            let got = occurrences(schedule, start, end, Some(date(2023, 1, 2)));
            assert!(
                got.iter().all(|d| *d >= start && *d <= end),
                "{} produced a date outside the window",
                schedule.kind()
            );
        }
    }

    #[test]
    fn test_occurrences_are_deterministic() {
        let schedule = Schedule::MonthlyDay { days: vec![5, 20] };
        let a = occurrences(&schedule, date(2023, 1, 1), date(2023, 12, 31), None);
        let b = occurrences(&schedule, date(2023, 1, 1), date(2023, 12, 31), None);
        assert_eq!(a, b);
        assert_eq!(a.len(), 24);
    }
}
