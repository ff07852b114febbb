//! Find command implementation.

use crate::error::CliError;
use crate::session::Session;
use crate::utils::{parse_date, GlobalOptions};
use clap::Args;

/// Print the earliest free slot on a date.
#[derive(Args)]
pub struct FindCommand {
    /// Date (DD/MM, DD/MM/YYYY or YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: String,
}

impl FindCommand {
    /// Execute the find command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = parse_date(&self.date)?;

        let session = Session::open(global)?;
        session.find(date, &mut std::io::stdout().lock())
    }
}
