//! Appointment storage on top of SQLite.

// Timestamps are Unix seconds in an i64 column.
#![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]

use std::collections::BTreeSet;
use std::time::{Duration, SystemTime};

use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, TransactionBehavior};

use crate::appointment::{Appointment, AppointmentStatus, SlotKey};
use crate::error::{Error, Result};
use crate::repository::{AddOutcome, AppointmentRepository, DeleteOutcome};
use crate::slot::Slot;

use super::connection::Database;
use super::schema::{
    COUNT_ACTIVE_IN_SLOT, INSERT_APPOINTMENT, SELECT_ACTIVE_IN_SLOT, SELECT_BOOKED_STARTS,
    SELECT_ON_DATE, VOID_APPOINTMENT,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn time_to_sql(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("timestamp before the Unix epoch: {e}"),
        })
}

fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

fn parse_sql_time(column: usize, text: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(text, TIME_FORMAT).map_err(|e| conversion_error(column, e))
}

/// Decodes a row selected with the shared appointment column list.
fn row_to_appointment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Appointment> {
    let date: String = row.get(0)?;
    let start: String = row.get(1)?;
    let end: String = row.get(2)?;
    let status: String = row.get(3)?;
    let created_by: String = row.get(4)?;
    let created_secs: i64 = row.get(5)?;
    let modified_by: Option<String> = row.get(6)?;
    let modified_secs: Option<i64> = row.get(7)?;

    let date = NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| conversion_error(0, e))?;
    let start = parse_sql_time(1, &start)?;
    let end = parse_sql_time(2, &end)?;
    let status = AppointmentStatus::parse(&status).map_err(|e| conversion_error(3, e))?;

    Appointment::builder(Slot::new(date, start), created_by)
        .end(end)
        .status(status)
        .created_at(unix_secs_to_systemtime(created_secs))
        .modified_by(modified_by)
        .modified_at(modified_secs.map(unix_secs_to_systemtime))
        .build()
        .map_err(|e| conversion_error(4, e))
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}

/// Check and insert under one IMMEDIATE transaction.
fn insert_if_free(conn: &mut Connection, appointment: &Appointment) -> Result<AddOutcome> {
    let date = date_to_sql(appointment.date());
    let start = time_to_sql(appointment.start());

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let taken: i64 = tx.query_row(COUNT_ACTIVE_IN_SLOT, params![date, start], |row| {
        row.get(0)
    })?;
    if taken > 0 {
        return Ok(AddOutcome::Conflict);
    }

    let inserted = tx.execute(
        INSERT_APPOINTMENT,
        params![
            date,
            start,
            time_to_sql(appointment.end()),
            appointment.created_by(),
            systemtime_to_unix_secs(appointment.created_at())?,
        ],
    );
    match inserted {
        Ok(_) => {}
        Err(ref e) if is_unique_violation(e) => return Ok(AddOutcome::Conflict),
        Err(e) => return Err(e.into()),
    }

    tx.commit()?;
    Ok(AddOutcome::Added)
}

fn void_active(
    conn: &mut Connection,
    date: NaiveDate,
    start: NaiveTime,
    actor: &str,
) -> Result<DeleteOutcome> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let voided = tx.execute(
        VOID_APPOINTMENT,
        params![
            actor,
            systemtime_to_unix_secs(SystemTime::now())?,
            date_to_sql(date),
            time_to_sql(start),
        ],
    )?;
    tx.commit()?;

    Ok(if voided > 0 {
        DeleteOutcome::Deleted
    } else {
        DeleteOutcome::NotFound
    })
}

fn select_on_date(
    conn: &Connection,
    date: NaiveDate,
    include_voided: bool,
) -> rusqlite::Result<Vec<Appointment>> {
    let mut stmt = conn.prepare(SELECT_ON_DATE)?;
    let appointments = stmt
        .query_map(params![date_to_sql(date), include_voided], row_to_appointment)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(appointments)
}

fn select_booked_starts(conn: &Connection, date: NaiveDate) -> rusqlite::Result<BTreeSet<NaiveTime>> {
    let mut stmt = conn.prepare(SELECT_BOOKED_STARTS)?;
    let starts = stmt
        .query_map(params![date_to_sql(date)], |row| {
            let text: String = row.get(0)?;
            parse_sql_time(0, &text)
        })?
        .collect::<rusqlite::Result<BTreeSet<_>>>()?;
    Ok(starts)
}

impl Database {
    /// Appointments on `date` ordered by start time.
    ///
    /// Voided appointments are included only when `include_voided` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::NaiveDate;
    /// use slotbook::database::{Database, DatabaseConfig};
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
    /// let day = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
    /// for appointment in db.list_appointments(day, false).unwrap() {
    ///     println!("{} by {}", appointment.slot(), appointment.created_by());
    /// }
    /// ```
    pub fn list_appointments(
        &self,
        date: NaiveDate,
        include_voided: bool,
    ) -> Result<Vec<Appointment>> {
        let listed = select_on_date(&self.conn, date, include_voided);
        listed.map_err(|e| self.lock_timeout_or(e.into()))
    }

    /// The active appointment holding `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is malformed.
    pub fn get_active(&self, key: SlotKey) -> Result<Option<Appointment>> {
        self.conn
            .query_row(
                SELECT_ACTIVE_IN_SLOT,
                params![date_to_sql(key.date), time_to_sql(key.start)],
                row_to_appointment,
            )
            .optional()
            .map_err(|e| self.lock_timeout_or(e.into()))
    }
}

impl AppointmentRepository for Database {
    fn add_appointment(
        &mut self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        actor: &str,
    ) -> Result<AddOutcome> {
        let appointment = Appointment::builder(Slot::new(date, start), actor)
            .end(end)
            .build()?;

        let outcome = insert_if_free(&mut self.conn, &appointment);
        log::debug!("store add {}: {outcome:?}", appointment.slot());
        outcome.map_err(|e| self.lock_timeout_or(e))
    }

    fn delete_appointment(
        &mut self,
        date: NaiveDate,
        start: NaiveTime,
        actor: &str,
    ) -> Result<DeleteOutcome> {
        let outcome = void_active(&mut self.conn, date, start, actor);
        log::debug!("store delete {}: {outcome:?}", Slot::new(date, start));
        outcome.map_err(|e| self.lock_timeout_or(e))
    }

    fn find_booked_slots(&self, date: NaiveDate) -> Result<BTreeSet<NaiveTime>> {
        let booked = select_booked_starts(&self.conn, date);
        booked.map_err(|e| self.lock_timeout_or(e.into()))
    }

    fn is_slot_available(&self, date: NaiveDate, start: NaiveTime) -> Result<bool> {
        self.conn
            .query_row(
                COUNT_ACTIVE_IN_SLOT,
                params![date_to_sql(date), time_to_sql(start)],
                |row| row.get::<_, i64>(0),
            )
            .map(|taken| taken == 0)
            .map_err(|e| self.lock_timeout_or(e.into()))
    }
}
