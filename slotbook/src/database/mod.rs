//! SQLite storage for appointments.
//!
//! [`Database`] implements [`crate::repository::AppointmentRepository`]
//! and adds a few read-only queries used by front ends.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::{NaiveDate, NaiveTime};
//! use slotbook::database::{Database, DatabaseConfig};
//! use slotbook::repository::AppointmentRepository;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
//! let day = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
//! let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
//! let half_past = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
//!
//! db.add_appointment(day, ten, half_past, "alice").unwrap();
//! assert!(!db.is_slot_available(day, ten).unwrap());
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV, DEFAULT_BUSY_TIMEOUT,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
