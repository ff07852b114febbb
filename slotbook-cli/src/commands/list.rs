//! List command implementation.
//!
//! This module implements the `list` command, which displays the
//! appointments on one date as a table or as JSON.

use crate::error::CliError;
use crate::session::{ListFormat, Session};
use crate::utils::{parse_date, GlobalOptions};
use clap::Args;

/// List appointments on a date.
#[derive(Args)]
pub struct ListCommand {
    /// Date (DD/MM, DD/MM/YYYY or YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: String,

    /// Include cancelled (voided) appointments
    #[arg(long)]
    pub include_voided: bool,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "human",
        env = "SLOTBOOK_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: ListFormat,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = parse_date(&self.date)?;

        let session = Session::open(global)?;
        session.list(
            date,
            self.include_voided,
            self.format,
            &mut std::io::stdout().lock(),
        )
    }
}
