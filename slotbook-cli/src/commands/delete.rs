//! Delete command implementation.

use crate::error::CliError;
use crate::session::Session;
use crate::utils::{parse_date, parse_time, GlobalOptions};
use clap::Args;

/// Cancel an appointment.
///
/// The booking is voided rather than removed; cancelling a slot that holds
/// no active booking is reported but is not an error.
#[derive(Args)]
pub struct DeleteCommand {
    /// Date (DD/MM, DD/MM/YYYY or YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: String,

    /// Start time (HH:MM, 24-hour)
    #[arg(value_name = "TIME")]
    pub time: String,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = parse_date(&self.date)?;
        let time = parse_time(&self.time)?;

        let mut session = Session::open(global)?;
        session.delete(date, time)
    }
}
