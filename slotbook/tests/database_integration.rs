//! Integration tests for the database layer.
//!
//! These tests exercise auto-initialization, schema versioning, persistence
//! across reopen, lock handling and concurrent writers on one file.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use tempfile::tempdir;

use common::database::{book_all, create_test_database, create_test_database_path};
use common::{d, t};
use slotbook::database::{Database, DatabaseConfig, CURRENT_SCHEMA_VERSION};
use slotbook::{AddOutcome, AppointmentRepository, AppointmentStatus, DeleteOutcome, Error, Slot};

#[test]
fn test_database_auto_creation() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("subdir").join("slotbook.db");

    assert!(!db_path.parent().unwrap().exists());

    let _db = Database::open(DatabaseConfig::new(&db_path)).unwrap();

    assert!(db_path.exists());
}

#[test]
fn test_missing_database_without_auto_create() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("absent").join("slotbook.db");

    let result = Database::open(DatabaseConfig::new(&db_path).with_auto_create(false));
    match result {
        Err(Error::DataDirectoryNotFound { path }) => assert_eq!(path, dir.path().join("absent")),
        other => panic!("expected DataDirectoryNotFound, got {other:?}"),
    }
    assert!(!db_path.exists());
}

#[test]
fn test_schema_version_compatibility() {
    let db_path = create_test_database_path();

    Database::open(DatabaseConfig::new(&db_path)).unwrap();
    Database::open(DatabaseConfig::new(&db_path)).unwrap();

    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute(
            "UPDATE metadata SET value = '999' WHERE key = 'schema_version'",
            [],
        )
        .unwrap();
    }

    match Database::open(DatabaseConfig::new(&db_path)) {
        Err(Error::UnsupportedSchemaVersion { expected, found }) => {
            assert_eq!(expected, CURRENT_SCHEMA_VERSION);
            assert_eq!(found, 999);
        }
        other => panic!("expected UnsupportedSchemaVersion, got {other:?}"),
    }
}

#[test]
fn test_history_survives_reopen() {
    let db_path = create_test_database_path();

    {
        let mut db = Database::open(DatabaseConfig::new(&db_path)).unwrap();
        book_all(&mut db, d(4, 15), &[t(9, 0), t(9, 30)], "alice");
        assert_eq!(
            db.delete_appointment(d(4, 15), t(9, 0), "bob").unwrap(),
            DeleteOutcome::Deleted
        );
    }

    let db = Database::open(DatabaseConfig::new(&db_path)).unwrap();
    let all = db.list_appointments(d(4, 15), true).unwrap();
    assert_eq!(all.len(), 2);

    let voided = &all[0];
    assert_eq!(voided.start(), t(9, 0));
    assert_eq!(voided.status(), AppointmentStatus::Voided);
    assert_eq!(voided.created_by(), "alice");
    assert_eq!(voided.modified_by(), Some("bob"));
    assert!(voided.modified_at().is_some());

    assert!(db.is_slot_available(d(4, 15), t(9, 0)).unwrap());
    assert!(!db.is_slot_available(d(4, 15), t(9, 30)).unwrap());
}

#[test]
fn test_read_only_database_reads() {
    let db_path = create_test_database_path();
    {
        let mut db = Database::open(DatabaseConfig::new(&db_path)).unwrap();
        book_all(&mut db, d(4, 15), &[t(11, 0)], "alice");
    }

    let db = Database::open(DatabaseConfig::new(&db_path).read_only()).unwrap();
    let booked: Vec<_> = db.find_booked_slots(d(4, 15)).unwrap().into_iter().collect();
    assert_eq!(booked, vec![t(11, 0)]);
    assert!(db
        .get_active(Slot::new(d(4, 15), t(11, 0)))
        .unwrap()
        .is_some());
}

#[test]
fn test_busy_database_reports_lock_timeout() {
    let db_path = create_test_database_path();
    let mut db = Database::open(
        DatabaseConfig::new(&db_path).with_busy_timeout(Duration::from_millis(100)),
    )
    .unwrap();

    let holder = rusqlite::Connection::open(&db_path).unwrap();
    holder.execute_batch("BEGIN IMMEDIATE").unwrap();

    let result = db.add_appointment(d(4, 15), t(10, 0), t(10, 30), "alice");
    assert!(
        matches!(result, Err(Error::LockTimeout { .. })),
        "expected LockTimeout, got {result:?}"
    );

    holder.execute_batch("ROLLBACK").unwrap();
    assert_eq!(
        db.add_appointment(d(4, 15), t(10, 0), t(10, 30), "alice")
            .unwrap(),
        AddOutcome::Added
    );
}

#[test]
fn test_concurrent_writers_single_winner() {
    const WRITERS: usize = 8;

    let db_path = create_test_database_path();
    // Schema is created up front so the writers only race on the slot.
    drop(Database::open(DatabaseConfig::new(&db_path)).unwrap());

    let barrier = Arc::new(Barrier::new(WRITERS));
    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let path = db_path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut db = Database::open(
                    DatabaseConfig::new(&path).with_busy_timeout(Duration::from_secs(10)),
                )
                .unwrap();
                barrier.wait();
                db.add_appointment(d(4, 15), t(14, 0), t(14, 30), &format!("writer-{i}"))
                    .unwrap()
            })
        })
        .collect();

    let outcomes: Vec<AddOutcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = outcomes.iter().filter(|o| **o == AddOutcome::Added).count();
    assert_eq!(winners, 1, "outcomes: {outcomes:?}");

    let db = Database::open(DatabaseConfig::new(&db_path)).unwrap();
    assert_eq!(db.list_appointments(d(4, 15), true).unwrap().len(), 1);
}

#[test]
fn test_dates_do_not_bleed_into_each_other() {
    let mut db = create_test_database();
    book_all(&mut db, d(4, 15), &[t(9, 0)], "alice");
    book_all(&mut db, d(4, 16), &[t(9, 30)], "alice");

    let monday: Vec<_> = db.find_booked_slots(d(4, 15)).unwrap().into_iter().collect();
    let tuesday: Vec<_> = db.find_booked_slots(d(4, 16)).unwrap().into_iter().collect();
    assert_eq!(monday, vec![t(9, 0)]);
    assert_eq!(tuesday, vec![t(9, 30)]);
    assert!(db.find_booked_slots(d(4, 17)).unwrap().is_empty());
}
