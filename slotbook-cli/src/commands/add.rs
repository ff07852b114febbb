//! Add command implementation.
//!
//! Books the half-hour slot starting at the given time.

use crate::error::CliError;
use crate::session::Session;
use crate::utils::{parse_date, parse_time, GlobalOptions};
use clap::Args;

/// Book an appointment slot.
#[derive(Args)]
pub struct AddCommand {
    /// Date (DD/MM, DD/MM/YYYY or YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: String,

    /// Start time (HH:MM, 24-hour)
    #[arg(value_name = "TIME")]
    pub time: String,
}

impl AddCommand {
    /// Execute the add command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = parse_date(&self.date)?;
        let time = parse_time(&self.time)?;

        let mut session = Session::open(global)?;
        session.add(date, time, &mut std::io::stdout().lock())
    }
}
