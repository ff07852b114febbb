//! SQL schema for the calendar database.
//!
//! Dates are stored as `YYYY-MM-DD` text, times of day as `HH:MM:SS`
//! text, and timestamps as Unix seconds. Text dates and times sort
//! chronologically, so ordering and range queries work on the raw columns.

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Key/value metadata, including the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Every appointment ever booked. Deletes only flip `status`.
pub const CREATE_APPOINTMENTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS appointments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        appointment_date TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('active', 'voided')),
        created_by TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        modified_by TEXT,
        modified_at INTEGER
    )";

/// At most one active appointment per slot.
pub const CREATE_ACTIVE_SLOT_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_appointments_active_slot
    ON appointments(appointment_date, start_time)
    WHERE status = 'active'";

/// Per-day lookups.
pub const CREATE_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(appointment_date)";

/// Reads the schema version.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// Writes the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Inserts a new active appointment.
pub const INSERT_APPOINTMENT: &str = r"
    INSERT INTO appointments
    (appointment_date, start_time, end_time, status, created_by, created_at)
    VALUES (?, ?, ?, 'active', ?, ?)
";

/// Voids the active appointment of a slot.
pub const VOID_APPOINTMENT: &str = r"
    UPDATE appointments
    SET status = 'voided', modified_by = ?, modified_at = ?
    WHERE appointment_date = ? AND start_time = ? AND status = 'active'
";

/// Counts active appointments in a slot.
pub const COUNT_ACTIVE_IN_SLOT: &str = r"
    SELECT COUNT(*) FROM appointments
    WHERE appointment_date = ? AND start_time = ? AND status = 'active'
";

/// Start times of the active appointments on a date.
pub const SELECT_BOOKED_STARTS: &str = r"
    SELECT start_time FROM appointments
    WHERE appointment_date = ? AND status = 'active'
    ORDER BY start_time
";

/// The active appointment of a slot.
pub const SELECT_ACTIVE_IN_SLOT: &str = r"
    SELECT appointment_date, start_time, end_time, status,
           created_by, created_at, modified_by, modified_at
    FROM appointments
    WHERE appointment_date = ? AND start_time = ? AND status = 'active'
";

/// Appointments on a date. `?2` selects whether voided rows are included.
pub const SELECT_ON_DATE: &str = r"
    SELECT appointment_date, start_time, end_time, status,
           created_by, created_at, modified_by, modified_at
    FROM appointments
    WHERE appointment_date = ?1 AND (?2 OR status = 'active')
    ORDER BY start_time, id
";
