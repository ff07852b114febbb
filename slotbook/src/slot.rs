//! Slot coordinates and the half-hour booking grid.
//!
//! A [`Slot`] is a `(date, start)` pair. Slots are always
//! [`SLOT_MINUTES`] long, so the end time is derived rather than stored.
//! [`SlotGrid`] describes the ordered start times of a business day and
//! is cheap to copy, so searches can restart it freely.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Hour at which the business day opens.
pub const OPENING_HOUR: u32 = 9;

/// Hour at which the business day closes. No slot may extend past it.
pub const CLOSING_HOUR: u32 = 17;

/// Length of every appointment, in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// Builds a time of day from constant parts.
///
/// Callers only pass compile-time constants that are always in range.
pub(crate) fn time_of_day(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// The first bookable start time (09:00).
#[must_use]
pub fn opening_time() -> NaiveTime {
    time_of_day(OPENING_HOUR, 0)
}

/// The last bookable start time (16:30).
///
/// The business day closes at 17:00 and every slot lasts
/// [`SLOT_MINUTES`], so the last start leaves exactly one slot of room.
#[must_use]
pub fn last_start_time() -> NaiveTime {
    time_of_day(CLOSING_HOUR - 1, 60 - SLOT_MINUTES)
}

/// Length of one slot.
#[must_use]
pub fn slot_length() -> TimeDelta {
    TimeDelta::minutes(i64::from(SLOT_MINUTES))
}

/// End of a slot starting at `start`.
///
/// Saturates at the last second of the day instead of wrapping past
/// midnight.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use slotbook::slot::slot_end;
///
/// let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
/// assert_eq!(slot_end(ten), NaiveTime::from_hms_opt(10, 30, 0).unwrap());
///
/// let late = NaiveTime::from_hms_opt(23, 45, 0).unwrap();
/// assert_eq!(slot_end(late), NaiveTime::from_hms_opt(23, 59, 59).unwrap());
/// ```
#[must_use]
pub fn slot_end(start: NaiveTime) -> NaiveTime {
    let (end, wrapped) = start.overflowing_add_signed(slot_length());
    if wrapped == 0 {
        end
    } else {
        NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(start)
    }
}

/// A bookable coordinate: a calendar day and a start time.
///
/// This is also the identity of an active appointment.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use slotbook::Slot;
///
/// let slot = Slot::new(
///     NaiveDate::from_ymd_opt(2024, 4, 16).unwrap(),
///     NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
/// );
/// assert_eq!(slot.to_string(), "2024-04-16 10:00");
/// assert_eq!(slot.end(), NaiveTime::from_hms_opt(10, 30, 0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Calendar day.
    pub date: NaiveDate,
    /// Start time of day.
    pub start: NaiveTime,
}

impl Slot {
    /// Creates a slot.
    #[must_use]
    pub const fn new(date: NaiveDate, start: NaiveTime) -> Self {
        Self { date, start }
    }

    /// End time of the slot.
    #[must_use]
    pub fn end(&self) -> NaiveTime {
        slot_end(self.start)
    }

    /// The slot start as a single timestamp.
    #[must_use]
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.start.format("%H:%M"))
    }
}

/// Ordered start times of one business day.
///
/// The grid is inclusive on both ends and steps by [`SLOT_MINUTES`].
///
/// # Examples
///
/// ```
/// use slotbook::SlotGrid;
///
/// let grid = SlotGrid::business_day();
/// assert_eq!(grid.len(), 16);
///
/// let labels: Vec<String> = grid.iter().map(|t| t.format("%H:%M").to_string()).collect();
/// assert_eq!(labels.first().unwrap(), "09:00");
/// assert_eq!(labels.last().unwrap(), "16:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    first: NaiveTime,
    last: NaiveTime,
}

impl SlotGrid {
    /// The 09:00 to 16:30 grid.
    #[must_use]
    pub fn business_day() -> Self {
        Self {
            first: opening_time(),
            last: last_start_time(),
        }
    }

    /// First start time.
    #[must_use]
    pub const fn first(&self) -> NaiveTime {
        self.first
    }

    /// Last start time.
    #[must_use]
    pub const fn last(&self) -> NaiveTime {
        self.last
    }

    /// Returns `true` if `time` is one of the grid's start times.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.first
            && time <= self.last
            && time.second() == 0
            && time.nanosecond() == 0
            && (time - self.first).num_minutes() % i64::from(SLOT_MINUTES) == 0
    }

    /// Number of start times on the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().len()
    }

    /// Always `false` for the business-day grid; provided for completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the start times in ascending order.
    #[must_use]
    pub fn iter(self) -> SlotGridIter {
        SlotGridIter {
            next: Some(self.first),
            last: self.last,
        }
    }
}

impl IntoIterator for SlotGrid {
    type Item = NaiveTime;
    type IntoIter = SlotGridIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the start times of a [`SlotGrid`].
#[derive(Debug, Clone)]
pub struct SlotGridIter {
    next: Option<NaiveTime>,
    last: NaiveTime,
}

impl Iterator for SlotGridIter {
    type Item = NaiveTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|t| *t <= self.last)?;
        let (following, wrapped) = current.overflowing_add_signed(slot_length());
        self.next = (wrapped == 0).then_some(following);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(t) if t <= self.last => {
                let span = (self.last - t).num_minutes();
                usize::try_from(span / i64::from(SLOT_MINUTES) + 1).unwrap_or(0)
            }
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlotGridIter {}

/// Parses a 24-hour `HH:MM` time of day.
///
/// # Errors
///
/// Returns [`Error::InvalidTime`] if the text is not a valid `HH:MM`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use slotbook::slot::parse_time_of_day;
///
/// assert_eq!(parse_time_of_day("16:00").unwrap(), NaiveTime::from_hms_opt(16, 0, 0).unwrap());
/// assert!(parse_time_of_day("4pm").is_err());
/// assert!(parse_time_of_day("24:00").is_err());
/// ```
pub fn parse_time_of_day(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M").map_err(|e| Error::InvalidTime {
        value: text.to_string(),
        reason: format!("expected HH:MM ({e})"),
    })
}

/// Parses a calendar date.
///
/// Accepts `DD/MM` (in `default_year`), `DD/MM/YYYY`, and ISO
/// `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if the text matches none of the formats
/// or names a day that does not exist.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use slotbook::slot::parse_calendar_date;
///
/// let april_16 = NaiveDate::from_ymd_opt(2024, 4, 16).unwrap();
/// assert_eq!(parse_calendar_date("16/04", 2024).unwrap(), april_16);
/// assert_eq!(parse_calendar_date("16/04/2024", 1999).unwrap(), april_16);
/// assert_eq!(parse_calendar_date("2024-04-16", 1999).unwrap(), april_16);
/// assert!(parse_calendar_date("30/02", 2024).is_err());
/// ```
pub fn parse_calendar_date(text: &str, default_year: i32) -> Result<NaiveDate> {
    let trimmed = text.trim();
    let invalid = |reason: String| Error::InvalidDate {
        value: text.to_string(),
        reason,
    };

    if trimmed.contains('-') {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|e| invalid(format!("expected YYYY-MM-DD ({e})")));
    }

    match trimmed.matches('/').count() {
        1 => NaiveDate::parse_from_str(&format!("{trimmed}/{default_year}"), "%d/%m/%Y")
            .map_err(|e| invalid(format!("expected DD/MM ({e})"))),
        2 => NaiveDate::parse_from_str(trimmed, "%d/%m/%Y")
            .map_err(|e| invalid(format!("expected DD/MM/YYYY ({e})"))),
        _ => Err(invalid(
            "expected DD/MM, DD/MM/YYYY or YYYY-MM-DD".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_grid_bounds() {
        let grid = SlotGrid::business_day();
        assert_eq!(grid.first(), t(9, 0));
        assert_eq!(grid.last(), t(16, 30));
        assert_eq!(grid.len(), 16);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_grid_is_ascending_half_hours() {
        let times: Vec<NaiveTime> = SlotGrid::business_day().iter().collect();
        assert_eq!(times.len(), 16);
        for pair in times.windows(2) {
            assert_eq!(pair[1] - pair[0], TimeDelta::minutes(30));
        }
    }

    #[test]
    fn test_grid_is_restartable() {
        let grid = SlotGrid::business_day();
        let first: Vec<NaiveTime> = grid.iter().collect();
        let second: Vec<NaiveTime> = grid.into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_grid_iter_exact_size() {
        let mut iter = SlotGrid::business_day().iter();
        assert_eq!(iter.len(), 16);
        iter.next();
        assert_eq!(iter.len(), 15);
        for _ in 0..15 {
            iter.next();
        }
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_grid_contains() {
        let grid = SlotGrid::business_day();
        assert!(grid.contains(t(9, 0)));
        assert!(grid.contains(t(12, 30)));
        assert!(grid.contains(t(16, 30)));
        assert!(!grid.contains(t(8, 30)));
        assert!(!grid.contains(t(17, 0)));
        assert!(!grid.contains(t(10, 15)));
        assert!(!grid.contains(NaiveTime::from_hms_opt(10, 0, 5).unwrap()));
    }

    #[test]
    fn test_slot_end_and_display() {
        let slot = Slot::new(NaiveDate::from_ymd_opt(2024, 4, 16).unwrap(), t(16, 30));
        assert_eq!(slot.end(), t(17, 0));
        assert_eq!(slot.to_string(), "2024-04-16 16:30");
        assert_eq!(
            slot.starts_at(),
            NaiveDate::from_ymd_opt(2024, 4, 16)
                .unwrap()
                .and_hms_opt(16, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_slot_ordering_is_chronological() {
        let d1 = NaiveDate::from_ymd_opt(2024, 4, 16).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 4, 17).unwrap();
        assert!(Slot::new(d1, t(16, 30)) < Slot::new(d2, t(9, 0)));
        assert!(Slot::new(d1, t(9, 0)) < Slot::new(d1, t(9, 30)));
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("09:00").unwrap(), t(9, 0));
        assert_eq!(parse_time_of_day(" 9:30 ").unwrap(), t(9, 30));
        assert!(matches!(
            parse_time_of_day("noon"),
            Err(Error::InvalidTime { .. })
        ));
        assert!(parse_time_of_day("12:60").is_err());
    }

    #[test]
    fn test_parse_calendar_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(parse_calendar_date("07/01", 2025).unwrap(), expected);
        assert_eq!(parse_calendar_date("7/1/2025", 2000).unwrap(), expected);
        assert_eq!(parse_calendar_date("2025-01-07", 2000).unwrap(), expected);
    }

    #[test]
    fn test_parse_calendar_date_rejects_garbage() {
        assert!(matches!(
            parse_calendar_date("tomorrow", 2025),
            Err(Error::InvalidDate { .. })
        ));
        assert!(parse_calendar_date("29/02", 2023).is_err());
        assert!(parse_calendar_date("29/02", 2024).is_ok());
        assert!(parse_calendar_date("1/2/3/4", 2024).is_err());
    }
}
