//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddCommand, CompletionsCommand, DeleteCommand, FindCommand, KeepCommand, ListCommand,
    ShellCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for booking half-hour appointment slots.
#[derive(Parser)]
#[command(name = "slotbook")]
#[command(version, about = "Book half-hour appointment slots", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "SLOTBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds)
    #[arg(
        long,
        value_name = "SECONDS",
        global = true,
        env = "SLOTBOOK_BUSY_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub busy_timeout: Option<u64>,

    /// Identity recorded on bookings and cancellations
    #[arg(long, value_name = "NAME", global = true, env = "SLOTBOOK_ACTOR")]
    pub actor: Option<String>,

    /// Disable automatic database initialization
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Book an appointment slot
    Add(AddCommand),

    /// Cancel an appointment
    Delete(DeleteCommand),

    /// Print the earliest free slot on a date
    Find(FindCommand),

    /// Claim the next available day at a fixed time
    Keep(KeepCommand),

    /// List appointments on a date
    List(ListCommand),

    /// Start an interactive booking shell
    Shell(ShellCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "slotbook",
            "add",
            "2024-04-15",
            "10:00",
            "--actor",
            "alice",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(cli.actor.as_deref(), Some("alice"));
        assert!(cli.quiet);
        assert!(matches!(cli.command, Command::Add(_)));
    }

    #[test]
    fn test_zero_busy_timeout_rejected() {
        assert!(Cli::try_parse_from(["slotbook", "--busy-timeout", "0", "find", "15/04"]).is_err());
    }
}
