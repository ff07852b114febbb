//! Appointment records and their lifecycle status.
//!
//! Appointments are never physically removed. Deleting one flips its
//! [`AppointmentStatus`] to [`AppointmentStatus::Voided`] and stamps the
//! modification audit fields.

use std::fmt;
use std::time::SystemTime;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::slot::Slot;

/// Identity of an active appointment: its date and start time.
pub type SlotKey = Slot;

/// Lifecycle state of an appointment.
///
/// # Examples
///
/// ```
/// use slotbook::AppointmentStatus;
///
/// assert_eq!(AppointmentStatus::Active.as_str(), "active");
/// assert_eq!(AppointmentStatus::parse("voided").unwrap(), AppointmentStatus::Voided);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// The appointment holds its slot.
    Active,
    /// The appointment was cancelled and no longer holds its slot.
    Voided,
}

impl AppointmentStatus {
    /// The persisted text form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Voided => "voided",
        }
    }

    /// Parses the persisted text form.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for anything other than `active` or
    /// `voided`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "active" => Ok(Self::Active),
            "voided" => Ok(Self::Voided),
            other => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown appointment status '{other}'"),
            }),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booked (or formerly booked) appointment.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use slotbook::{Appointment, AppointmentStatus, Slot};
///
/// let slot = Slot::new(
///     NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
///     NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
/// );
/// let appointment = Appointment::builder(slot, "alice").build().unwrap();
///
/// assert_eq!(appointment.end(), NaiveTime::from_hms_opt(10, 30, 0).unwrap());
/// assert_eq!(appointment.status(), AppointmentStatus::Active);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    slot: Slot,
    end: NaiveTime,
    status: AppointmentStatus,
    created_by: String,
    created_at: SystemTime,
    modified_by: Option<String>,
    modified_at: Option<SystemTime>,
}

impl Appointment {
    /// Starts building an appointment for `slot` created by `created_by`.
    ///
    /// The end time defaults to the slot end.
    #[must_use]
    pub fn builder(slot: Slot, created_by: impl Into<String>) -> AppointmentBuilder {
        AppointmentBuilder {
            slot,
            end: None,
            status: AppointmentStatus::Active,
            created_by: created_by.into(),
            created_at: None,
            modified_by: None,
            modified_at: None,
        }
    }

    /// The slot this appointment occupies.
    #[must_use]
    pub const fn slot(&self) -> Slot {
        self.slot
    }

    /// Calendar day.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.slot.date
    }

    /// Start time of day.
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.slot.start
    }

    /// End time of day, as recorded.
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn status(&self) -> AppointmentStatus {
        self.status
    }

    /// Returns `true` if the appointment still holds its slot.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AppointmentStatus::Active
    }

    /// Who booked the appointment.
    #[must_use]
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// When the appointment was booked.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Who voided the appointment, if anyone.
    #[must_use]
    pub fn modified_by(&self) -> Option<&str> {
        self.modified_by.as_deref()
    }

    /// When the appointment was voided, if it was.
    #[must_use]
    pub const fn modified_at(&self) -> Option<SystemTime> {
        self.modified_at
    }

    /// Marks the appointment voided by `actor` at `when`.
    pub fn void(&mut self, actor: impl Into<String>, when: SystemTime) {
        self.status = AppointmentStatus::Voided;
        self.modified_by = Some(actor.into());
        self.modified_at = Some(when);
    }
}

/// Builder for [`Appointment`] values.
#[derive(Debug)]
pub struct AppointmentBuilder {
    slot: Slot,
    end: Option<NaiveTime>,
    status: AppointmentStatus,
    created_by: String,
    created_at: Option<SystemTime>,
    modified_by: Option<String>,
    modified_at: Option<SystemTime>,
}

impl AppointmentBuilder {
    /// Overrides the end time.
    #[must_use]
    pub const fn end(mut self, end: NaiveTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the lifecycle state. Defaults to active.
    #[must_use]
    pub const fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the creation timestamp. Defaults to now.
    #[must_use]
    pub const fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the modifying actor. Whitespace is trimmed.
    #[must_use]
    pub fn modified_by(mut self, modified_by: Option<String>) -> Self {
        self.modified_by = modified_by.map(|m| m.trim().to_string());
        self
    }

    /// Sets the modification timestamp.
    #[must_use]
    pub const fn modified_at(mut self, modified_at: Option<SystemTime>) -> Self {
        self.modified_at = modified_at;
        self
    }

    /// Builds the appointment.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the creator is blank, the end does
    /// not follow the start, or a modifier is given but blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{NaiveDate, NaiveTime};
    /// use slotbook::{Appointment, Slot};
    ///
    /// let slot = Slot::new(
    ///     NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
    ///     NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    /// );
    ///
    /// assert!(Appointment::builder(slot, "   ").build().is_err());
    ///
    /// // The end is stored as given, even when it does not follow the start.
    /// let odd = Appointment::builder(slot, "bob")
    ///     .end(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(odd.end(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    /// ```
    pub fn build(self) -> Result<Appointment, ValidationError> {
        let created_by = self.created_by.trim().to_string();
        if created_by.is_empty() {
            return Err(ValidationError {
                field: "created_by".into(),
                message: "creator must be non-empty after trimming whitespace".into(),
            });
        }

        let end = self.end.unwrap_or_else(|| self.slot.end());

        if self.modified_by.as_deref().is_some_and(str::is_empty) {
            return Err(ValidationError {
                field: "modified_by".into(),
                message: "modifier must be non-empty after trimming whitespace".into(),
            });
        }

        Ok(Appointment {
            slot: self.slot,
            end,
            status: self.status,
            created_by,
            created_at: self.created_at.unwrap_or_else(SystemTime::now),
            modified_by: self.modified_by,
            modified_at: self.modified_at,
        })
    }
}

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Why it failed.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
