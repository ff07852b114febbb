//! Interactive shell.
//!
//! Reads one request per line until `EXIT` or end of input:
//!
//! ```text
//! ADD <DATE> <TIME>
//! DELETE <DATE> <TIME>
//! FIND <DATE>
//! KEEP <TIME>
//! LIST <DATE>
//! EXIT
//! ```
//!
//! Command words are case-insensitive. A failing line is reported on stderr
//! and the shell carries on.

use crate::error::CliError;
use crate::session::{ListFormat, Session};
use crate::utils::{parse_date, parse_time, GlobalOptions};
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use std::io::{self, BufRead, IsTerminal, Write};

/// Start an interactive booking shell.
#[derive(Args)]
pub struct ShellCommand {}

/// One parsed shell line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellRequest {
    /// Book a slot.
    Add(NaiveDate, NaiveTime),
    /// Cancel a booking.
    Delete(NaiveDate, NaiveTime),
    /// Print the first free slot.
    Find(NaiveDate),
    /// Claim a time on the next available day.
    Keep(NaiveTime),
    /// List a day's appointments.
    List(NaiveDate),
    /// Leave the shell.
    Exit,
}

impl ShellRequest {
    /// Parse a non-blank line.
    pub fn parse(line: &str) -> Result<Self, CliError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((command, args)) = parts.split_first() else {
            return Err(CliError::InvalidArguments("empty command".to_string()));
        };

        let command = command.to_uppercase();
        let expect = |count: usize| {
            if args.len() < count {
                Err(CliError::InvalidArguments(format!(
                    "{command} needs {count} argument(s)"
                )))
            } else {
                Ok(())
            }
        };

        match command.as_str() {
            "ADD" => {
                expect(2)?;
                Ok(Self::Add(parse_date(args[0])?, parse_time(args[1])?))
            }
            "DELETE" => {
                expect(2)?;
                Ok(Self::Delete(parse_date(args[0])?, parse_time(args[1])?))
            }
            "FIND" => {
                expect(1)?;
                Ok(Self::Find(parse_date(args[0])?))
            }
            "KEEP" => {
                expect(1)?;
                Ok(Self::Keep(parse_time(args[0])?))
            }
            "LIST" => {
                expect(1)?;
                Ok(Self::List(parse_date(args[0])?))
            }
            "EXIT" => Ok(Self::Exit),
            other => Err(CliError::InvalidArguments(format!(
                "unknown command '{other}' (expected ADD, DELETE, FIND, KEEP, LIST or EXIT)"
            ))),
        }
    }
}

impl ShellCommand {
    /// Execute the shell command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut session = Session::open(global)?;
        let interactive = io::stdin().is_terminal() && !global.quiet;

        if interactive {
            eprintln!("Enter command (ADD, DELETE, FIND, KEEP, LIST) or 'EXIT' to quit:");
        }

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let result = ShellRequest::parse(&line)
                .and_then(|request| run(&mut session, request, &mut stdout));
            match result {
                Ok(true) => {}
                Ok(false) => break,
                Err(e @ (CliError::Timeout | CliError::Io(_))) => return Err(e),
                Err(e) => eprintln!("Error: {e}"),
            }
            stdout.flush()?;
        }

        if interactive {
            eprintln!("Exiting program.");
        }
        Ok(())
    }
}

/// Run one request; `Ok(false)` ends the shell.
fn run(session: &mut Session, request: ShellRequest, out: &mut dyn Write) -> Result<bool, CliError> {
    match request {
        ShellRequest::Add(date, time) => session.add(date, time, out)?,
        ShellRequest::Delete(date, time) => session.delete(date, time)?,
        ShellRequest::Find(date) => session.find(date, out)?,
        ShellRequest::Keep(time) => session.keep(time, None, out)?,
        ShellRequest::List(date) => session.list(date, false, ListFormat::Human, out)?,
        ShellRequest::Exit => return Ok(false),
    }
    Ok(true)
}
