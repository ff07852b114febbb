//! Stderr logging for the library and the CLI.
//!
//! The availability engine and the booking orchestrator only emit `log`
//! facade records. A front end picks a [`Logger`] with [`init_logger`] and
//! registers it with [`Logger::install`]; records below the chosen
//! [`LogLevel`] are dropped.

use std::env;
use std::str::FromStr;

/// Environment variable consulted by [`init_logger`].
pub const LOG_MODE_ENV: &str = "SLOTBOOK_LOG_MODE";

/// How much goes to stderr, from least to most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Nothing.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Everything, including search traces.
    Verbose,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("quiet") {
            Ok(Self::Quiet)
        } else if s.eq_ignore_ascii_case("normal") {
            Ok(Self::Normal)
        } else if s.eq_ignore_ascii_case("verbose") {
            Ok(Self::Verbose)
        } else {
            Err(format!("unknown log mode '{s}' (expected quiet, normal or verbose)"))
        }
    }
}

impl LogLevel {
    /// The most detailed facade level shown at this verbosity.
    #[must_use]
    pub const fn facade_filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

/// A `log` backend writing `LEVEL: message` lines to stderr.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a logger at `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// The verbosity this logger was built with.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Registers this logger as the process-wide `log` backend.
    ///
    /// Returns `false` if a backend was already installed; the existing
    /// one is kept.
    pub fn install(self) -> bool {
        if log::set_boxed_logger(Box::new(self)).is_err() {
            return false;
        }
        log::set_max_level(self.level.facade_filter());
        true
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.facade_filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            log::Level::Error => "ERROR",
            log::Level::Warn => "WARN",
            log::Level::Info => "INFO",
            log::Level::Debug | log::Level::Trace => "DEBUG",
        };
        eprintln!("{tag}: {}", record.args());
    }

    fn flush(&self) {}
}

/// Picks a logger: `verbose`, then `quiet`, then `SLOTBOOK_LOG_MODE`,
/// then [`LogLevel::Normal`]. An unparseable mode is ignored.
///
/// ```
/// use slotbook::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let level = if verbose {
        LogLevel::Verbose
    } else if quiet {
        LogLevel::Quiet
    } else {
        env::var(LOG_MODE_ENV)
            .ok()
            .and_then(|mode| mode.parse().ok())
            .unwrap_or(LogLevel::Normal)
    };
    Logger::new(level)
}
