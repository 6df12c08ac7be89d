//! Calendar arithmetic for month-stepped projections.
//!
//! The helpers here work on raw year/month/day numbers and Rata Die day
//! counts rather than jiff `Span`s, so calendar-month offsets (with
//! end-of-month clamping) and fractional month distances stay cheap inside
//! the monthly loop.

use jiff::civil::Date;

use crate::error::{Error, Result};

/// Average days per year over a four year leap cycle.
pub const DAYS_IN_YEAR: f64 = (4.0 * 365.0 + 1.0) / 4.0;
pub const MONTHS_IN_YEAR: f64 = 12.0;
/// Average days per month, used for the fractional part of a month distance.
pub const DAYS_IN_MONTH: f64 = DAYS_IN_YEAR / MONTHS_IN_YEAR;

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Days in the given month without creating a `jiff::civil::Date`.
#[inline]
pub fn days_in_month(year: i32, month: i32) -> i32 {
    const DAYS: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

#[inline]
pub fn is_first_of_month(date: Date) -> bool {
    date.day() == 1
}

/// Rata Die day number (days since 0001-01-01) of a year/month/day triple.
///
/// Proleptic Gregorian algorithm from Baum (2017).
#[inline]
fn rata_die(y: i32, m: i32, day: i32) -> i32 {
    // Shift March = month 1 so Feb (end of "year") is month 12
    let a = (14 - m) / 12;
    let y2 = y - a;
    let m2 = m + 12 * a - 3;

    day + (153 * m2 + 2) / 5 + 365 * y2 + y2 / 4 - y2 / 100 + y2 / 400 - 306
}

#[inline]
fn date_rata_die(d: Date) -> i32 {
    rata_die(d.year() as i32, d.month() as i32, d.day() as i32)
}

/// Year, month and clamped day of `d` shifted by `months` calendar months.
#[inline]
fn shift_months(d: Date, months: i32) -> (i32, i32, i32) {
    let total = d.year() as i32 * 12 + (d.month() as i32 - 1) + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) + 1;
    let day = (d.day() as i32).min(days_in_month(year, month));
    (year, month, day)
}

/// Shift a date by whole calendar months, clamping the day to the end of the
/// target month (Jan 31 + 1 month = Feb 28/29).
///
/// Returns `None` when the result falls outside jiff's supported range.
pub fn add_months(d: Date, months: i32) -> Option<Date> {
    let (year, month, day) = shift_months(d, months);
    let year = i16::try_from(year).ok()?;
    Date::new(year, month as i8, day as i8).ok()
}

/// Signed distance from `first` to `second` measured in calendar months.
///
/// Whole months are counted on the calendar (with end-of-month clamping),
/// and the leftover days are expressed as a fraction of an average month.
pub fn months_between(first: Date, second: Date) -> f64 {
    let target = date_rata_die(second);
    let anchor_rd = |months: i32| {
        let (y, m, d) = shift_months(first, months);
        rata_die(y, m, d)
    };

    let mut months = (second.year() as i32 - first.year() as i32) * 12
        + (second.month() as i32 - first.month() as i32);
    let mut anchor = anchor_rd(months);

    if second < first {
        while target > anchor {
            months += 1;
            anchor = anchor_rd(months);
        }
    } else {
        while target < anchor {
            months -= 1;
            anchor = anchor_rd(months);
        }
    }

    months as f64 + (target - anchor) as f64 / DAYS_IN_MONTH
}

/// Inclusive list of first-of-month dates from `start` to `end`, one calendar
/// month apart. Empty when `end` precedes `start`.
pub fn monthly_date_range(start: Date, end: Date) -> Result<Vec<Date>> {
    if !is_first_of_month(start) {
        return Err(Error::InvalidDateAlignment {
            date: start,
            context: "range start",
        });
    }
    if !is_first_of_month(end) {
        return Err(Error::InvalidDateAlignment {
            date: end,
            context: "range end",
        });
    }

    let mut dates = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());
    while let Ok(date) = Date::new(year, month, 1) {
        if date > end {
            break;
        }
        dates.push(date);
        if month == 12 {
            month = 1;
            year += 1;
        } else {
            month += 1;
        }
    }

    Ok(dates)
}
