//! Common test utilities for integration tests.

pub mod database;

use chrono::{NaiveDate, NaiveTime};

/// Shorthand for a date in 2024.
#[allow(dead_code)]
pub fn d(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

/// Shorthand for a time of day.
#[allow(dead_code)]
pub fn t(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}
