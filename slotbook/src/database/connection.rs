//! The calendar database handle.

use rusqlite::{Connection, ErrorCode, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// An open calendar database.
///
/// The connection runs in WAL mode with `synchronous = NORMAL` and the
/// configured busy timeout, so several CLI processes can share one file.
///
/// # Examples
///
/// ```no_run
/// use slotbook::database::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens (and if needed creates) the database described by `config`,
    /// then initializes or verifies the schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataDirectoryNotFound`] if the file is missing and
    /// auto-creation is off, [`Error::UnsupportedSchemaVersion`] for a
    /// foreign schema, or any I/O or SQLite error met along the way.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::DataDirectoryNotFound {
                    path: config
                        .path
                        .parent()
                        .map_or_else(|| config.path.clone(), std::path::Path::to_path_buf),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;
        conn.busy_timeout(config.busy_timeout)?;

        let db = Self { conn, config };
        db.configure().map_err(|e| db.lock_timeout_or(e))?;
        log::debug!("opened calendar database {}", db.config.path.display());
        Ok(db)
    }

    fn configure(&self) -> Result<()> {
        if !self.config.read_only {
            // journal_mode reports the resulting mode as a row
            let _: String = self
                .conn
                .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
            self.conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        }
        super::migrations::check_schema_compatibility(&self.conn)
    }

    /// The configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// The underlying SQLite connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Converts a busy or locked SQLite error into [`Error::LockTimeout`].
    ///
    /// SQLite only reports busy after the busy timeout has elapsed, so the
    /// configured timeout is what was waited.
    pub(super) fn lock_timeout_or(&self, err: Error) -> Error {
        match err {
            Error::Database(rusqlite::Error::SqliteFailure(ref failure, _))
                if matches!(
                    failure.code,
                    ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
                ) =>
            {
                Error::LockTimeout {
                    seconds: self.config.busy_timeout.as_secs(),
                }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_database_open_sets_wal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());

        let journal_mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_database_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("slotbook.db");

        Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_database_missing_without_auto_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent").join("slotbook.db");

        let err = Database::open(DatabaseConfig::new(&path).with_auto_create(false)).unwrap_err();
        match err {
            Error::DataDirectoryNotFound { path: missing } => {
                assert_eq!(missing, dir.path().join("absent"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_database_read_only_rejects_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();

        let db = Database::open(DatabaseConfig::new(&path).read_only()).unwrap();
        assert!(db
            .connection()
            .execute("CREATE TABLE scratch (id INTEGER)", [])
            .is_err());
    }

    #[test]
    fn test_lock_timeout_mapping() {
        let dir = tempdir().unwrap();
        let config =
            DatabaseConfig::new(dir.path().join("test.db")).with_busy_timeout(Duration::from_secs(3));
        let db = Database::open(config).unwrap();

        let busy = Error::Database(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        ));
        assert!(matches!(
            db.lock_timeout_or(busy),
            Error::LockTimeout { seconds: 3 }
        ));

        let other = Error::Repository {
            message: "x".into(),
        };
        assert!(matches!(
            db.lock_timeout_or(other),
            Error::Repository { .. }
        ));
    }
}
