//! Availability rules for the booking calendar.
//!
//! Everything in this module is pure: no I/O, no shared state. Two rules
//! decide whether a slot can be booked:
//!
//! - **Business hours.** Starts from 09:00 through 16:30 inclusive.
//! - **Blackout.** On one computed day per month, the "second day of the
//!   third week", every start in the 16:00 hour is unavailable.
//!
//! The blackout day is derived from the weekday of the 1st (Sunday = 0):
//! advance to the first Tuesday on or after the 1st, then two more weeks.
//! It is therefore always a Tuesday between the 15th and the 21st.
//!
//! ```
//! use chrono::NaiveDate;
//! use slotbook::availability::compute_blackout_day;
//!
//! // April 2024 starts on a Monday.
//! let day = compute_blackout_day(2024, 4).unwrap();
//! assert_eq!(day, NaiveDate::from_ymd_opt(2024, 4, 16).unwrap());
//! ```

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Timelike};

use crate::error::{Error, Result};
use crate::slot::{last_start_time, opening_time, Slot, SlotGrid};

/// Hour whose starts are unavailable on the blackout day.
pub const BLACKOUT_HOUR: u32 = 16;

/// Weekday index of Tuesday when Sunday is 0.
const TUESDAY_FROM_SUNDAY: u32 = 2;

/// Why a slot can or cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAvailability {
    /// The slot can be booked.
    Available,
    /// The start time is outside business hours.
    OutsideHours,
    /// The slot falls in the monthly blackout.
    Blackout,
    /// An active appointment already holds the slot.
    Booked,
}

impl SlotAvailability {
    /// Returns `true` for [`SlotAvailability::Available`].
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Returns `true` if `time` is a legal appointment start.
///
/// The upper bound is the last start (16:30), not the 17:00 close.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use slotbook::availability::is_within_business_hours;
///
/// let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// assert!(is_within_business_hours(at(9, 0)));
/// assert!(is_within_business_hours(at(16, 30)));
/// assert!(!is_within_business_hours(at(16, 31)));
/// assert!(!is_within_business_hours(at(8, 59)));
/// ```
#[must_use]
pub fn is_within_business_hours(time: NaiveTime) -> bool {
    time >= opening_time() && time <= last_start_time()
}

/// Computes the blackout day of a month.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if `month` is not 1-12 or the result
/// falls outside the supported calendar range.
pub fn compute_blackout_day(year: i32, month: u32) -> Result<NaiveDate> {
    let first_of_month =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| Error::InvalidDate {
            value: format!("{year:04}-{month:02}"),
            reason: "no such month".to_string(),
        })?;

    let weekday = first_of_month.weekday().num_days_from_sunday();
    let to_first_tuesday = (TUESDAY_FROM_SUNDAY + 7 - weekday) % 7;

    first_of_month
        .checked_add_days(Days::new(u64::from(to_first_tuesday) + 14))
        .ok_or_else(|| Error::InvalidDate {
            value: first_of_month.to_string(),
            reason: "blackout day is outside the supported calendar".to_string(),
        })
}

/// Returns `true` if `date` is the blackout day of its month.
#[must_use]
pub fn is_blackout_day(date: NaiveDate) -> bool {
    compute_blackout_day(date.year(), date.month()).is_ok_and(|day| day == date)
}

/// Returns `true` if the slot at `time` on `date` is blacked out.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use slotbook::availability::is_blackout_slot;
///
/// let blackout = NaiveDate::from_ymd_opt(2024, 4, 16).unwrap();
/// let next_day = NaiveDate::from_ymd_opt(2024, 4, 17).unwrap();
/// let four_pm = NaiveTime::from_hms_opt(16, 0, 0).unwrap();
///
/// assert!(is_blackout_slot(blackout, four_pm));
/// assert!(!is_blackout_slot(next_day, four_pm));
/// ```
#[must_use]
pub fn is_blackout_slot(date: NaiveDate, time: NaiveTime) -> bool {
    time.hour() == BLACKOUT_HOUR && is_blackout_day(date)
}

/// Every grid slot of `date` in ascending order.
///
/// The sequence is finite (16 slots) and can be re-created at will.
pub fn enumerate_grid_slots(date: NaiveDate) -> impl ExactSizeIterator<Item = Slot> {
    SlotGrid::business_day()
        .iter()
        .map(move |start| Slot::new(date, start))
}

/// Classifies a single slot against the rules and the booked set.
///
/// Checks run in the order hours, blackout, booked.
#[must_use]
pub fn classify_slot(
    date: NaiveDate,
    time: NaiveTime,
    booked: &BTreeSet<NaiveTime>,
) -> SlotAvailability {
    if !is_within_business_hours(time) {
        SlotAvailability::OutsideHours
    } else if is_blackout_slot(date, time) {
        SlotAvailability::Blackout
    } else if booked.contains(&time) {
        SlotAvailability::Booked
    } else {
        SlotAvailability::Available
    }
}

/// Earliest free grid slot on `date`, given the start times already booked.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use chrono::{NaiveDate, NaiveTime};
/// use slotbook::availability::first_free_slot;
///
/// let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
/// let booked: BTreeSet<_> = [at(9, 0), at(9, 30)].into();
///
/// assert_eq!(first_free_slot(date, &booked).unwrap().start, at(10, 0));
/// ```
#[must_use]
pub fn first_free_slot(date: NaiveDate, booked: &BTreeSet<NaiveTime>) -> Option<Slot> {
    enumerate_grid_slots(date)
        .find(|slot| classify_slot(slot.date, slot.start, booked).is_available())
}

/// All free grid slots on `date`, ascending.
#[must_use]
pub fn free_slots(date: NaiveDate, booked: &BTreeSet<NaiveTime>) -> Vec<Slot> {
    enumerate_grid_slots(date)
        .filter(|slot| classify_slot(slot.date, slot.start, booked).is_available())
        .collect()
}

#[cfg(test)]
mod proptests;
