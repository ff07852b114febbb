//! Shared database test utilities.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use slotbook::database::{Database, DatabaseConfig};
use slotbook::slot::slot_end;
use slotbook::{AddOutcome, AppointmentRepository};

/// Creates a temporary test database that lives for the rest of the test.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    Database::open(DatabaseConfig::new(create_test_database_path())).unwrap()
}

/// A path for a database file inside a fresh temporary directory.
#[allow(dead_code)]
pub fn create_test_database_path() -> PathBuf {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slotbook.db");

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    path
}

/// Books every listed start on `date`, asserting each one is new.
#[allow(dead_code)]
pub fn book_all(db: &mut Database, date: NaiveDate, starts: &[NaiveTime], actor: &str) {
    for &start in starts {
        assert_eq!(
            db.add_appointment(date, start, slot_end(start), actor).unwrap(),
            AddOutcome::Added,
            "{date} {start} was already booked"
        );
    }
}
