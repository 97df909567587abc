//! Calendar-epoch normalization.
//!
//! The almanac reports one snapshot per day, so wall-clock time below the day
//! is deliberately discarded: every query runs at midnight UTC of the report
//! date.

use chrono::{Local, NaiveDate};

/// Timestamp layout accepted by the SPICE time subsystem.
pub const MIDNIGHT_FORMAT: &str = "%Y-%m-%dT00:00:00";

/// Fix a calendar date to its midnight timestamp string.
pub fn midnight_timestamp(date: NaiveDate) -> String {
    date.format(MIDNIGHT_FORMAT).to_string()
}

/// Midnight timestamp for the current date.
pub fn midnight_today() -> String {
    midnight_timestamp(Local::now().date_naive())
}
