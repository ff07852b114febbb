//! Shared helpers for database unit tests.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};

/// Opens a fresh database in a temporary directory.
///
/// The directory is leaked so it outlives the returned handle.
///
/// # Panics
///
/// Panics if the directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let db = Database::open(DatabaseConfig::new(dir.path().join("slotbook.db"))).unwrap();
    std::mem::forget(dir);
    db
}
