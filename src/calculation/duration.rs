//! Assessment period durations.
//!
//! Two different measures are kept:
//!
//! - [`duration_in_years`] feeds the credit formula. It counts days
//!   inclusively and divides by an average year of 365.25 days.
//! - [`elapsed_months`] is the human-readable month count printed on the
//!   Akumulasi report. It counts calendar months and rounds a partial month
//!   up.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

/// Average length of a year in days, accounting for leap years.
pub const DAYS_PER_YEAR: Decimal = Decimal::from_parts(36525, 0, 0, false, 2);

/// Returns the number of days from `start` to `end`, both inclusive.
///
/// The result is zero or negative when `start` is after `end`.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Converts an inclusive day count into a fraction of a 365.25-day year.
///
/// A non-positive day count yields zero.
///
/// # Examples
///
/// ```
/// use angka_kredit::calculation::duration_in_years;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
/// let years = duration_in_years(start, end);
/// assert!(years < Decimal::ONE);
/// ```
pub fn duration_in_years(start: NaiveDate, end: NaiveDate) -> Decimal {
    let days = inclusive_days(start, end);
    if days <= 0 {
        return Decimal::ZERO;
    }
    Decimal::from(days) / DAYS_PER_YEAR
}

/// Counts whole calendar months between two dates, rounding a partial
/// month up and never returning less than one.
///
/// Months are counted the way calendar arithmetic does: Jan 31 plus one
/// month is the last day of February.
///
/// # Examples
///
/// ```
/// use angka_kredit::calculation::elapsed_months;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// assert_eq!(elapsed_months(start, NaiveDate::from_ymd_opt(2023, 6, 30).unwrap()), 6);
/// assert_eq!(elapsed_months(start, NaiveDate::from_ymd_opt(2023, 7, 1).unwrap()), 6);
/// assert_eq!(elapsed_months(start, start), 1);
/// ```
pub fn elapsed_months(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 1;
    }

    let calendar_months = i64::from(end.year() - start.year()) * 12 + i64::from(end.month())
        - i64::from(start.month());
    let mut months = calendar_months.max(0) as u32;

    // Step back until start + months no longer overshoots end.
    let mut anchor = add_months(start, months);
    while months > 0 && anchor > end {
        months -= 1;
        anchor = add_months(start, months);
    }

    if end > anchor {
        months += 1;
    }

    months.max(1)
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}
