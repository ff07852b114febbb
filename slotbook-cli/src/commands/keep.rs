//! Keep command implementation.
//!
//! Claims a fixed time of day on the first day, starting today, where it is
//! neither blacked out nor already booked.

use crate::error::CliError;
use crate::session::Session;
use crate::utils::{parse_time, GlobalOptions};
use clap::Args;

/// Claim the next available day at a fixed time.
#[derive(Args)]
pub struct KeepCommand {
    /// Time of day (HH:MM, 24-hour)
    #[arg(value_name = "TIME")]
    pub time: String,

    /// Days to examine, today included (default: config or 90)
    #[arg(long, value_name = "DAYS")]
    pub lookahead_days: Option<u32>,
}

impl KeepCommand {
    /// Execute the keep command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let time = parse_time(&self.time)?;

        let mut session = Session::open(global)?;
        session.keep(time, self.lookahead_days, &mut std::io::stdout().lock())
    }
}
