//! Main entry point for the slotbook CLI.
//!
//! It provides commands for managing the appointment calendar:
//! - `add`: Book a slot
//! - `delete`: Cancel a booking
//! - `find`: Print the first free slot on a date
//! - `keep`: Claim a time on the next available day
//! - `list`: List a day's appointments
//! - `shell`: Interactive loop over the commands above

use clap::Parser;
use slotbook_cli::cli::{Cli, Command};
use slotbook_cli::utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // Route library traces through the CLI's verbosity
    slotbook::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        actor: cli.actor,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        Command::Add(cmd) => cmd.execute(&global),
        Command::Delete(cmd) => cmd.execute(&global),
        Command::Find(cmd) => cmd.execute(&global),
        Command::Keep(cmd) => cmd.execute(&global),
        Command::List(cmd) => cmd.execute(&global),
        Command::Shell(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
