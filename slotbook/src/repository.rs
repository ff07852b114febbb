//! The persistence seam used by the booking orchestrator.
//!
//! [`AppointmentRepository`] is the contract the orchestrator consumes. The
//! SQLite store in [`crate::database`] is the production implementation;
//! [`InMemoryRepository`] keeps everything in a `Vec` and is handy for
//! tests and examples.

use std::collections::BTreeSet;
use std::time::SystemTime;

use chrono::{NaiveDate, NaiveTime};

use crate::appointment::Appointment;
use crate::error::Result;
use crate::slot::Slot;

/// Result of a repository insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new active appointment was stored.
    Added,
    /// An active appointment already holds the slot; nothing was stored.
    Conflict,
}

/// Result of a repository delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The active appointment was voided.
    Deleted,
    /// No active appointment held the slot.
    NotFound,
}

/// Storage for appointments keyed by `(date, start)`.
///
/// Implementations only ever soft-delete: a deleted appointment becomes
/// voided and stops counting toward availability. At most one active
/// appointment may exist per `(date, start)`; `add_appointment` must
/// re-check this itself and report [`AddOutcome::Conflict`] instead of
/// inserting a duplicate.
///
/// Errors are reserved for storage failures. They are never retried or
/// turned into outcomes.
#[cfg_attr(test, mockall::automock)]
pub trait AppointmentRepository {
    /// Books `start..end` on `date` for `actor` if the slot is free.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    fn add_appointment(
        &mut self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        actor: &str,
    ) -> Result<AddOutcome>;

    /// Voids the active appointment at `(date, start)`, recording `actor`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    fn delete_appointment(
        &mut self,
        date: NaiveDate,
        start: NaiveTime,
        actor: &str,
    ) -> Result<DeleteOutcome>;

    /// Start times of the active appointments on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_booked_slots(&self, date: NaiveDate) -> Result<BTreeSet<NaiveTime>>;

    /// Returns `true` if no active appointment holds `(date, start)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn is_slot_available(&self, date: NaiveDate, start: NaiveTime) -> Result<bool>;
}

/// A repository that lives entirely in memory.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use slotbook::repository::{AddOutcome, AppointmentRepository, InMemoryRepository};
///
/// let date = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
/// let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
/// let half_past = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
///
/// let mut repo = InMemoryRepository::new();
/// assert_eq!(repo.add_appointment(date, ten, half_past, "alice").unwrap(), AddOutcome::Added);
/// assert_eq!(repo.add_appointment(date, ten, half_past, "bob").unwrap(), AddOutcome::Conflict);
/// assert!(!repo.is_slot_available(date, ten).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    appointments: Vec<Appointment>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored appointment, voided ones included, in insertion order.
    #[must_use]
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    fn active_mut(&mut self, slot: Slot) -> Option<&mut Appointment> {
        self.appointments
            .iter_mut()
            .find(|a| a.is_active() && a.slot() == slot)
    }
}

impl AppointmentRepository for InMemoryRepository {
    fn add_appointment(
        &mut self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        actor: &str,
    ) -> Result<AddOutcome> {
        let slot = Slot::new(date, start);
        if self.active_mut(slot).is_some() {
            return Ok(AddOutcome::Conflict);
        }
        let appointment = Appointment::builder(slot, actor).end(end).build()?;
        self.appointments.push(appointment);
        Ok(AddOutcome::Added)
    }

    fn delete_appointment(
        &mut self,
        date: NaiveDate,
        start: NaiveTime,
        actor: &str,
    ) -> Result<DeleteOutcome> {
        match self.active_mut(Slot::new(date, start)) {
            Some(appointment) => {
                appointment.void(actor, SystemTime::now());
                Ok(DeleteOutcome::Deleted)
            }
            None => Ok(DeleteOutcome::NotFound),
        }
    }

    fn find_booked_slots(&self, date: NaiveDate) -> Result<BTreeSet<NaiveTime>> {
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.is_active() && a.date() == date)
            .map(Appointment::start)
            .collect())
    }

    fn is_slot_available(&self, date: NaiveDate, start: NaiveTime) -> Result<bool> {
        let slot = Slot::new(date, start);
        Ok(!self
            .appointments
            .iter()
            .any(|a| a.is_active() && a.slot() == slot))
    }
}
