//! Schema initialization and version checks.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

use super::schema::{
    CREATE_ACTIVE_SLOT_INDEX, CREATE_APPOINTMENTS_TABLE, CREATE_DATE_INDEX,
    CREATE_METADATA_TABLE, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Creates the tables and indices of a fresh database and stamps the
/// schema version.
///
/// # Errors
///
/// Returns an error if any statement fails.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use slotbook::database::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(CREATE_METADATA_TABLE, [])?;
    tx.execute(CREATE_APPOINTMENTS_TABLE, [])?;
    tx.execute(CREATE_ACTIVE_SLOT_INDEX, [])?;
    tx.execute(CREATE_DATE_INDEX, [])?;
    tx.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION.to_string()])?;
    tx.commit()?;
    Ok(())
}

/// Reads the stored schema version; `0` means uninitialized.
///
/// # Errors
///
/// Returns [`Error::DatabaseCorruption`] if the stored version is not a
/// number, or a database error if the query fails.
pub fn get_schema_version(conn: &Connection) -> Result<u32> {
    let has_metadata: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'metadata')",
        [],
        |row| row.get(0),
    )?;
    if !has_metadata {
        return Ok(0);
    }

    let stored: Option<String> = conn
        .query_row(SELECT_SCHEMA_VERSION, [], |row| row.get(0))
        .optional()?;

    match stored {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| Error::DatabaseCorruption {
            details: format!("schema version '{value}' is not a number"),
        }),
    }
}

/// Initializes a fresh database or verifies an existing one.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] when the stored version is
/// older or newer than [`CURRENT_SCHEMA_VERSION`], or any error from
/// reading the version or initializing.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    match get_schema_version(conn)? {
        0 => {
            log::debug!("initializing calendar schema v{CURRENT_SCHEMA_VERSION}");
            initialize_schema(conn)
        }
        CURRENT_SCHEMA_VERSION => Ok(()),
        found => Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found,
        }),
    }
}
