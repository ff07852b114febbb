#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # slotbook
//!
//! A library for booking half-hour appointment slots on a single calendar.
//!
//! The working day runs from 09:00 to 17:00 in 30-minute slots. On the
//! third Tuesday of every month the 16:00 hour is reserved and cannot be
//! booked. Appointments are persisted in SQLite; cancelling one voids the
//! row instead of deleting it.
//!
//! ## Core Types
//!
//! - [`Slot`] and [`SlotGrid`]: The bookable grid of a day
//! - [`Appointment`] and [`AppointmentStatus`]: Persisted bookings
//! - [`BookingManager`]: Add, delete, find and keep operations
//! - [`AppointmentRepository`]: Storage seam, backed by [`Database`]
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use slotbook::{BookingManager, InMemoryRepository, SlotGrid};
//!
//! let grid = SlotGrid::business_day();
//! assert_eq!(grid.len(), 16);
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! let manager = BookingManager::new(InMemoryRepository::new(), "alice");
//! let free = manager.find_free_time_slot(date).unwrap().unwrap();
//! assert_eq!(free.start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
//! ```

pub mod appointment;
pub mod availability;
pub mod booking;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod repository;
pub mod slot;

// Re-export key types at crate root for convenience
pub use appointment::{Appointment, AppointmentStatus, SlotKey};
pub use availability::SlotAvailability;
pub use booking::{AbortReason, BookingManager, BookingOutcome, KeepOutcome, Rejection};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use repository::{AddOutcome, AppointmentRepository, DeleteOutcome, InMemoryRepository};
pub use slot::{Slot, SlotGrid};
