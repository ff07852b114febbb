//! The booking orchestrator.
//!
//! [`BookingManager`] sequences the availability rules with repository
//! calls. Rule outcomes (outside hours, conflicts, nothing free, lookahead
//! exhausted) come back as values; `Err` is reserved for repository
//! failures, which are passed through untouched and never retried.
//!
//! # Examples
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use slotbook::booking::{BookingManager, BookingOutcome, KeepOutcome, Rejection};
//! use slotbook::repository::InMemoryRepository;
//!
//! let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
//! let monday = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
//!
//! let mut manager = BookingManager::new(InMemoryRepository::new(), "alice");
//! assert_eq!(manager.add_appointment(monday, at(9, 0), at(9, 30)).unwrap(), BookingOutcome::Booked);
//! assert_eq!(
//!     manager.add_appointment(monday, at(8, 0), at(8, 30)).unwrap(),
//!     BookingOutcome::Rejected(Rejection::OutsideHours)
//! );
//! assert_eq!(manager.find_free_time_slot(monday).unwrap().unwrap().start, at(9, 30));
//!
//! // Tuesday the 16th is the April blackout day, so 16:00 lands on the 17th.
//! let outcome = manager.keep_time_slot_from(monday.succ_opt().unwrap(), at(16, 0)).unwrap();
//! assert_eq!(outcome.claimed().unwrap().date, NaiveDate::from_ymd_opt(2024, 4, 17).unwrap());
//! ```

use std::fmt;

use chrono::{Local, NaiveDate, NaiveTime};

use crate::availability::{first_free_slot, is_blackout_slot, is_within_business_hours};
use crate::error::{Error, Result};
use crate::repository::{AddOutcome, AppointmentRepository, DeleteOutcome};
use crate::slot::{slot_end, Slot};

/// Days examined by a keep search unless configured otherwise.
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 90;

/// Upper bound accepted for the keep search, roughly ten years.
pub const MAX_LOOKAHEAD_DAYS: u32 = 3660;

/// Why a booking was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The start is outside business hours. The repository was not consulted.
    OutsideHours,
    /// Another active appointment holds the slot.
    Conflict,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideHours => f.write_str("outside business hours (09:00-16:30)"),
            Self::Conflict => f.write_str("slot already booked"),
        }
    }
}

/// Result of [`BookingManager::add_appointment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    /// The appointment was stored.
    Booked,
    /// The appointment was refused.
    Rejected(Rejection),
}

/// Why a keep search stopped without claiming a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Every examined day was blacked out or taken.
    LookaheadExceeded {
        /// Number of days examined.
        days: u32,
    },
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LookaheadExceeded { days } => {
                write!(f, "no free day found within {days} day(s)")
            }
        }
    }
}

/// Result of a keep search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepOutcome {
    /// The slot was booked.
    Claimed(Slot),
    /// The search gave up.
    Aborted(AbortReason),
}

impl KeepOutcome {
    /// The claimed slot, if any.
    #[must_use]
    pub const fn claimed(&self) -> Option<Slot> {
        match self {
            Self::Claimed(slot) => Some(*slot),
            Self::Aborted(_) => None,
        }
    }
}

/// Books, cancels and searches appointments on behalf of one actor.
#[derive(Debug)]
pub struct BookingManager<R> {
    repository: R,
    actor: String,
    lookahead_days: u32,
}

impl<R: AppointmentRepository> BookingManager<R> {
    /// Creates a manager that records `actor` on every write.
    #[must_use]
    pub fn new(repository: R, actor: impl Into<String>) -> Self {
        Self {
            repository,
            actor: actor.into(),
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
        }
    }

    /// Sets how many days a keep search examines, today included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] unless `1 <= days <= 3660`.
    pub fn with_lookahead_days(mut self, days: u32) -> Result<Self> {
        self.set_lookahead_days(days)?;
        Ok(self)
    }

    /// In-place form of [`with_lookahead_days`](Self::with_lookahead_days).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] unless `1 <= days <= 3660`; the current
    /// bound is kept in that case.
    pub fn set_lookahead_days(&mut self, days: u32) -> Result<()> {
        if !(1..=MAX_LOOKAHEAD_DAYS).contains(&days) {
            return Err(Error::Validation {
                field: "lookahead_days".into(),
                message: format!("must be between 1 and {MAX_LOOKAHEAD_DAYS}, got {days}"),
            });
        }
        self.lookahead_days = days;
        Ok(())
    }

    /// The acting identity.
    #[must_use]
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Days examined by a keep search.
    #[must_use]
    pub const fn lookahead_days(&self) -> u32 {
        self.lookahead_days
    }

    /// The underlying repository.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Consumes the manager and returns the repository.
    pub fn into_repository(self) -> R {
        self.repository
    }

    /// Books `start..end` on `date`.
    ///
    /// Starts outside business hours are rejected before the repository is
    /// touched. `end` is stored as given.
    ///
    /// # Errors
    ///
    /// Returns any repository error unchanged.
    pub fn add_appointment(
        &mut self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<BookingOutcome> {
        if !is_within_business_hours(start) {
            log::debug!("rejecting {}: outside business hours", Slot::new(date, start));
            return Ok(BookingOutcome::Rejected(Rejection::OutsideHours));
        }

        let outcome = match self
            .repository
            .add_appointment(date, start, end, &self.actor)?
        {
            AddOutcome::Added => BookingOutcome::Booked,
            AddOutcome::Conflict => BookingOutcome::Rejected(Rejection::Conflict),
        };
        log::debug!("add {} for {}: {outcome:?}", Slot::new(date, start), self.actor);
        Ok(outcome)
    }

    /// Cancels the active appointment at `(date, start)`.
    ///
    /// No hours check applies, so stray bookings can always be removed.
    /// Cancelling twice reports [`DeleteOutcome::NotFound`] the second time.
    ///
    /// # Errors
    ///
    /// Returns any repository error unchanged.
    pub fn delete_appointment(&mut self, date: NaiveDate, start: NaiveTime) -> Result<DeleteOutcome> {
        let outcome = self.repository.delete_appointment(date, start, &self.actor)?;
        log::debug!("delete {} for {}: {outcome:?}", Slot::new(date, start), self.actor);
        Ok(outcome)
    }

    /// The earliest free slot on `date`, or `None` when the day is full.
    ///
    /// Reads the booked set once and scans the grid in memory.
    ///
    /// # Errors
    ///
    /// Returns any repository error unchanged.
    pub fn find_free_time_slot(&self, date: NaiveDate) -> Result<Option<Slot>> {
        let booked = self.repository.find_booked_slots(date)?;
        let found = first_free_slot(date, &booked);
        log::debug!("find on {date}: {} booked, first free {found:?}", booked.len());
        Ok(found)
    }

    /// Books `time` on the first suitable day starting today.
    ///
    /// # Errors
    ///
    /// Returns any repository error unchanged.
    pub fn keep_time_slot(&mut self, time: NaiveTime) -> Result<KeepOutcome> {
        self.keep_time_slot_from(Local::now().date_naive(), time)
    }

    /// Books `time` on the first suitable day on or after `start_date`.
    ///
    /// Days where `time` is blacked out or already taken are skipped. A
    /// conflict on the booking itself (another writer got there between
    /// the check and the insert) also moves on to the next day. The search
    /// gives up after [`lookahead_days`](Self::lookahead_days) days.
    ///
    /// No business-hours check applies here.
    ///
    /// # Errors
    ///
    /// Returns any repository error unchanged. Nothing is booked after an
    /// error.
    pub fn keep_time_slot_from(
        &mut self,
        start_date: NaiveDate,
        time: NaiveTime,
    ) -> Result<KeepOutcome> {
        let end = slot_end(time);
        let mut date = start_date;

        for examined in 1..=self.lookahead_days {
            if is_blackout_slot(date, time) {
                log::debug!("keep {}: blackout, advancing", Slot::new(date, time));
            } else if !self.repository.is_slot_available(date, time)? {
                log::debug!("keep {}: taken, advancing", Slot::new(date, time));
            } else {
                match self
                    .repository
                    .add_appointment(date, time, end, &self.actor)?
                {
                    AddOutcome::Added => {
                        let slot = Slot::new(date, time);
                        log::info!("kept {slot} for {} after {examined} day(s)", self.actor);
                        return Ok(KeepOutcome::Claimed(slot));
                    }
                    AddOutcome::Conflict => {
                        log::debug!("keep {}: lost race, advancing", Slot::new(date, time));
                    }
                }
            }

            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        log::info!("keep {time} from {start_date}: nothing within {} day(s)", self.lookahead_days);
        Ok(KeepOutcome::Aborted(AbortReason::LookaheadExceeded {
            days: self.lookahead_days,
        }))
    }
}
