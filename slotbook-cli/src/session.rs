//! Booking actions shared by the one-shot commands and the interactive shell.
//!
//! Results go to the supplied writer (stdout in practice); status lines go
//! to stderr unless `--quiet` is set. Rule outcomes that leave the calendar
//! unchanged become [`CliError::SemanticFailure`].

use crate::error::CliError;
use crate::utils::{format_timestamp, open_manager, GlobalOptions};
use chrono::{NaiveDate, NaiveTime};
use clap::ValueEnum;
use serde::Serialize;
use slotbook::slot::slot_end;
use slotbook::{
    Appointment, BookingManager, BookingOutcome, Database, DeleteOutcome, KeepOutcome, Slot,
};
use std::io::Write;

/// Output format for appointment listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ListFormat {
    /// Tab-separated table format (human-readable)
    #[default]
    Human,
    /// JSON format
    Json,
}

/// One appointment as printed by `list --format json`.
#[derive(Debug, Serialize)]
struct AppointmentRow<'a> {
    date: String,
    start: String,
    end: String,
    status: &'a str,
    created_by: &'a str,
    created_at: String,
    modified_by: Option<&'a str>,
    modified_at: Option<String>,
}

impl<'a> From<&'a Appointment> for AppointmentRow<'a> {
    fn from(appointment: &'a Appointment) -> Self {
        Self {
            date: appointment.date().format("%Y-%m-%d").to_string(),
            start: appointment.start().format("%H:%M").to_string(),
            end: appointment.end().format("%H:%M").to_string(),
            status: appointment.status().as_str(),
            created_by: appointment.created_by(),
            created_at: format_timestamp(appointment.created_at()),
            modified_by: appointment.modified_by(),
            modified_at: appointment.modified_at().map(format_timestamp),
        }
    }
}

/// An open calendar plus the options that shape its output.
pub struct Session {
    manager: BookingManager<Database>,
    quiet: bool,
}

impl Session {
    /// Load configuration and open the calendar.
    pub fn open(global: &GlobalOptions) -> Result<Self, CliError> {
        let (manager, _config) = open_manager(global)?;
        Ok(Self {
            manager,
            quiet: global.quiet,
        })
    }

    fn status(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    /// Book the slot starting at `time` on `date`.
    pub fn add(
        &mut self,
        date: NaiveDate,
        time: NaiveTime,
        out: &mut dyn Write,
    ) -> Result<(), CliError> {
        let slot = Slot::new(date, time);
        match self.manager.add_appointment(date, time, slot_end(time))? {
            BookingOutcome::Booked => {
                writeln!(out, "{slot}")?;
                self.status(&format!("Booked {slot} for {}", self.manager.actor()));
                Ok(())
            }
            BookingOutcome::Rejected(reason) => Err(CliError::SemanticFailure(format!(
                "Cannot book {slot}: {reason}"
            ))),
        }
    }

    /// Cancel the booking at `time` on `date`; a missing booking is reported, not failed.
    pub fn delete(&mut self, date: NaiveDate, time: NaiveTime) -> Result<(), CliError> {
        let slot = Slot::new(date, time);
        match self.manager.delete_appointment(date, time)? {
            DeleteOutcome::Deleted => self.status(&format!("Deleted {slot}")),
            DeleteOutcome::NotFound => self.status(&format!("No appointment found at {slot}")),
        }
        Ok(())
    }

    /// Print the earliest free slot on `date`.
    pub fn find(&self, date: NaiveDate, out: &mut dyn Write) -> Result<(), CliError> {
        match self.manager.find_free_time_slot(date)? {
            Some(slot) => {
                writeln!(out, "{slot}")?;
                Ok(())
            }
            None => Err(CliError::SemanticFailure(format!(
                "No free time slot on {date}"
            ))),
        }
    }

    /// Claim `time` on the first suitable day from today.
    ///
    /// A `lookahead_days` override stays in effect for the rest of the session.
    pub fn keep(
        &mut self,
        time: NaiveTime,
        lookahead_days: Option<u32>,
        out: &mut dyn Write,
    ) -> Result<(), CliError> {
        if let Some(days) = lookahead_days {
            self.manager
                .set_lookahead_days(days)
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        }

        let outcome = self.manager.keep_time_slot(time)?;
        match outcome {
            KeepOutcome::Claimed(slot) => {
                writeln!(out, "{slot}")?;
                self.status(&format!("Kept {slot} for {}", self.manager.actor()));
                Ok(())
            }
            KeepOutcome::Aborted(reason) => Err(CliError::SemanticFailure(format!(
                "Could not keep {}: {reason}",
                time.format("%H:%M")
            ))),
        }
    }

    /// Print the appointments on `date`.
    pub fn list(
        &self,
        date: NaiveDate,
        include_voided: bool,
        format: ListFormat,
        out: &mut dyn Write,
    ) -> Result<(), CliError> {
        let appointments = self
            .manager
            .repository()
            .list_appointments(date, include_voided)?;

        match format {
            ListFormat::Human => format_as_table(&appointments, out),
            ListFormat::Json => format_as_json(&appointments, out),
        }
    }
}

/// Format appointments as a human-readable table.
fn format_as_table(appointments: &[Appointment], out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(
        out,
        "START\tEND\tSTATUS\tCREATED_BY\tCREATED_AT\tMODIFIED_BY\tMODIFIED_AT"
    )?;
    for appointment in appointments {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            appointment.start().format("%H:%M"),
            appointment.end().format("%H:%M"),
            appointment.status(),
            appointment.created_by(),
            format_timestamp(appointment.created_at()),
            appointment.modified_by().unwrap_or("-"),
            appointment
                .modified_at()
                .map_or_else(|| "-".to_string(), format_timestamp),
        )?;
    }
    Ok(())
}

/// Format appointments as JSON.
fn format_as_json(appointments: &[Appointment], out: &mut dyn Write) -> Result<(), CliError> {
    let rows: Vec<AppointmentRow<'_>> = appointments.iter().map(AppointmentRow::from).collect();
    serde_json::to_writer_pretty(&mut *out, &rows)?;
    writeln!(out)?;
    Ok(())
}
