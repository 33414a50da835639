//! Time and date calculation utilities.
//!
//! Payments are bucketed per calendar month and keyed by the first day of that month, while
//! fee structure due dates are checked against a minimum lead time. These helpers keep that
//! arithmetic in one place.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::server::error::{hostel::HostelError, Error};

/// Minimum number of days between today and a fee structure's due date
pub const FEE_DUE_DATE_MIN_LEAD_DAYS: i64 = 10;

/// Number of days a fee stays payable when no due date is on record
pub const DEFAULT_PAYMENT_WINDOW_DAYS: i64 = 7;

/// Current UTC timestamp without timezone, as stored in the database
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Current UTC calendar date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Returns the first day of the month containing `date`.
///
/// Payment rows are keyed by this date so that every payment made during a month lands on
/// the same row.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists for every month
    date.with_day(1).unwrap_or(date)
}

/// Parses a `YYYY-MM-DD` date, reporting `field` in the validation error.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        HostelError::validation(format!("{} must be a date in YYYY-MM-DD format", field)).into()
    })
}

/// Parses a `YYYY-MM` month into the first day of that month.
pub fn parse_month(value: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|_| HostelError::validation("month must be in YYYY-MM format").into())
}

/// Earliest due date a fee structure may be given when saved on `today`.
pub fn earliest_fee_due_date(today: NaiveDate) -> NaiveDate {
    today + Duration::days(FEE_DUE_DATE_MIN_LEAD_DAYS)
}
