//! Calendar-month boundary and month-sequence helpers.
//!
//! These are the building blocks for the monthly trend series and the
//! default budget window.

use time::{Date, Month};

/// A calendar month with its inclusive day bounds and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    /// Display label in the form "Mon YYYY", e.g. "Aug 2023".
    pub label: String,
    /// The first day of the month.
    pub start: Date,
    /// The last day of the month.
    pub end: Date,
}

/// Return the first and last calendar day of the month containing `date`.
///
/// Total for any valid date, including December (the length lookup handles
/// the year rollover) and leap Februaries.
pub fn month_bounds(date: Date) -> (Date, Date) {
    // Day 1 and the month length are always valid days for the month, so
    // these cannot fail.
    let start = date.replace_day(1).unwrap();
    let end = date.replace_day(date.month().length(date.year())).unwrap();

    (start, end)
}

/// Produce `n` consecutive month windows ending at the month containing
/// `reference`, oldest first.
pub fn last_n_months(reference: Date, n: u32) -> Vec<MonthWindow> {
    let mut windows = Vec::with_capacity(n as usize);

    let mut year = reference.year();
    let mut month = reference.month();

    for _ in 0..n {
        let (start, end) = month_bounds(first_of(year, month));
        windows.push(MonthWindow {
            label: format!("{} {}", month_abbreviation(month), year),
            start,
            end,
        });

        month = month.previous();
        if month == Month::December {
            year -= 1;
        }
    }

    windows.reverse();
    windows
}

fn first_of(year: i32, month: Month) -> Date {
    // Day 1 exists in every month.
    Date::from_calendar_date(year, month, 1).unwrap()
}

fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[cfg(test)]
mod month_bounds_tests {
    use time::macros::date;

    use crate::period::month_bounds;

    #[test]
    fn returns_first_and_last_day() {
        let (start, end) = month_bounds(date!(2024 - 03 - 15));

        assert_eq!(start, date!(2024 - 03 - 01));
        assert_eq!(end, date!(2024 - 03 - 31));
    }

    #[test]
    fn handles_december_rollover() {
        let (start, end) = month_bounds(date!(2023 - 12 - 31));

        assert_eq!(start, date!(2023 - 12 - 01));
        assert_eq!(end, date!(2023 - 12 - 31));
    }

    #[test]
    fn handles_leap_february() {
        let (_, end) = month_bounds(date!(2024 - 02 - 10));
        assert_eq!(end, date!(2024 - 02 - 29));

        let (_, end) = month_bounds(date!(2023 - 02 - 10));
        assert_eq!(end, date!(2023 - 02 - 28));
    }

    #[test]
    fn start_day_is_always_one_and_months_match() {
        for date in [
            date!(2024 - 01 - 01),
            date!(2024 - 06 - 30),
            date!(2024 - 12 - 25),
            date!(1999 - 02 - 28),
        ] {
            let (start, end) = month_bounds(date);
            assert_eq!(start.day(), 1);
            assert_eq!(start.month(), end.month());
            assert_eq!(start.year(), end.year());
        }
    }
}
