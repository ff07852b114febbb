//! Utility functions for CLI operations.
//!
//! This module provides the helpers shared by every command: configuration
//! loading, database access, identity resolution, argument parsing and
//! timestamp formatting.

use crate::error::CliError;
use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use slotbook::config::ConfigValidator;
use slotbook::database::{resolve_data_dir, DATABASE_FILE_NAME};
use slotbook::slot::{parse_calendar_date, parse_time_of_day};
use slotbook::{BookingManager, Config, ConfigBuilder, Database, DatabaseConfig};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Identity recorded when nothing else names the acting user.
pub const UNKNOWN_ACTOR: &str = "unknown";

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Identity recorded on bookings and cancellations.
    pub actor: Option<String>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir`, else `SLOTBOOK_DATA_DIR`, else `~/.slotbook`.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority, applied by the callers)
/// 2. Environment variables
/// 3. `<data dir>/config.yaml`
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let dir = data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = data_dir(global)?.join(DATABASE_FILE_NAME);
    let disable_autoinit = global.disable_autoinit || config.autoinit_disabled();

    let timeout_seconds = global
        .busy_timeout
        .unwrap_or_else(|| config.lock_wait_seconds_or_default());

    let db_config = DatabaseConfig::new(db_path)
        .with_auto_create(!disable_autoinit)
        .with_busy_timeout(Duration::from_secs(timeout_seconds));

    Database::open(db_config).map_err(CliError::from)
}

/// Resolve the acting identity.
///
/// Order: `--actor` / `SLOTBOOK_ACTOR`, config `actor`, `USER`, `USERNAME`,
/// then `"unknown"`.
pub fn resolve_actor(global: &GlobalOptions, config: &Config) -> Result<String, CliError> {
    let actor = global
        .actor
        .clone()
        .or_else(|| config.actor.clone())
        .or_else(|| env::var("USER").ok().filter(|u| !u.trim().is_empty()))
        .or_else(|| env::var("USERNAME").ok().filter(|u| !u.trim().is_empty()))
        .unwrap_or_else(|| UNKNOWN_ACTOR.to_string());

    ConfigValidator::validate_actor(&actor)
        .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
    Ok(actor)
}

/// Load configuration, open the database and wrap it in a booking manager.
pub fn open_manager(
    global: &GlobalOptions,
) -> Result<(BookingManager<Database>, Config), CliError> {
    let config = load_configuration(global)?;
    let actor = resolve_actor(global, &config)?;
    let db = open_database(global, &config)?;

    let manager = BookingManager::new(db, actor)
        .with_lookahead_days(config.lookahead_days_or_default())
        .map_err(|e| CliError::Config(e.to_string()))?;
    Ok((manager, config))
}

/// Parse a `DD/MM`, `DD/MM/YYYY` or `YYYY-MM-DD` date; `DD/MM` means this year.
pub fn parse_date(text: &str) -> Result<NaiveDate, CliError> {
    parse_calendar_date(text, Local::now().year()).map_err(CliError::from)
}

/// Parse a 24-hour `HH:MM` time of day.
pub fn parse_time(text: &str) -> Result<NaiveTime, CliError> {
    parse_time_of_day(text).map_err(CliError::from)
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: std::time::SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        use std::time::{Duration, UNIX_EPOCH};
        let st = UNIX_EPOCH + Duration::from_secs(1_705_314_645); // 2024-01-15 10:30:45 UTC
        assert_eq!(format_timestamp(st), "2024-01-15 10:30:45");
    }

    #[test]
    fn test_resolve_actor_prefers_flag_then_config() {
        let config = Config {
            actor: Some("from-config".into()),
            ..Default::default()
        };
        let mut global = GlobalOptions {
            actor: Some("from-flag".into()),
            ..Default::default()
        };
        assert_eq!(resolve_actor(&global, &config).unwrap(), "from-flag");

        global.actor = None;
        assert_eq!(resolve_actor(&global, &config).unwrap(), "from-config");
    }

    #[test]
    fn test_resolve_actor_rejects_blank() {
        let global = GlobalOptions {
            actor: Some("   ".into()),
            ..Default::default()
        };
        let err = resolve_actor(&global, &Config::default()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(
            parse_date("2024-04-16").unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 16).unwrap()
        );
        assert_eq!(parse_date("16/04").unwrap().month(), 4);
        assert_eq!(parse_date("31/02/2024").unwrap_err().exit_code(), 4);

        assert_eq!(parse_time("09:30").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(parse_time("9.30").unwrap_err().exit_code(), 4);
    }
}
