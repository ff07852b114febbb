//! Build script for slotbook-cli.
//!
//! Generates the man page at build time using clap_mangen and places it in
//! OUT_DIR for inclusion in release builds.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared again here.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this synchronized with src/cli.rs.
fn build_cli() -> Command {
    let date = || {
        Arg::new("date")
            .value_name("DATE")
            .help("Date (DD/MM, DD/MM/YYYY or YYYY-MM-DD)")
            .required(true)
    };
    let time = || {
        Arg::new("time")
            .value_name("TIME")
            .help("Time of day (HH:MM, 24-hour)")
            .required(true)
    };

    Command::new("slotbook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book half-hour appointment slots")
        .long_about(
            "Command-line tool for booking half-hour appointment slots on a single calendar. \
             Business hours run from 09:00 to 17:00; the 16:00 hour of the third Tuesday \
             of every month is reserved.",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("SLOTBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the database busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("SLOTBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("actor")
                .long("actor")
                .help("Identity recorded on bookings and cancellations")
                .value_name("NAME")
                .global(true)
                .env("SLOTBOOK_ACTOR"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("add")
                .about("Book an appointment slot")
                .arg(date())
                .arg(time()),
            Command::new("delete")
                .about("Cancel an appointment")
                .arg(date())
                .arg(time()),
            Command::new("find")
                .about("Print the earliest free slot on a date")
                .arg(date()),
            Command::new("keep")
                .about("Claim the next available day at a fixed time")
                .arg(time())
                .arg(
                    Arg::new("lookahead-days")
                        .long("lookahead-days")
                        .value_name("DAYS")
                        .help("Days to examine, today included"),
                ),
            Command::new("list")
                .about("List appointments on a date")
                .arg(date())
                .arg(
                    Arg::new("include-voided")
                        .long("include-voided")
                        .help("Include cancelled (voided) appointments")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output format (human or json)"),
                ),
            Command::new("shell")
                .about("Start an interactive booking shell")
                .long_about("Read ADD, DELETE, FIND, KEEP and LIST lines until EXIT or end of input"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("slotbook.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
