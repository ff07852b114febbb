//! `SLOTBOOK_*` environment overrides.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Overrides the acting identity.
pub const ACTOR_ENV: &str = "SLOTBOOK_ACTOR";
/// Overrides the keep-search lookahead.
pub const LOOKAHEAD_DAYS_ENV: &str = "SLOTBOOK_LOOKAHEAD_DAYS";
/// Overrides the database lock wait.
pub const LOCK_WAIT_ENV: &str = "SLOTBOOK_MAXIMUM_LOCK_WAIT_SECONDS";
/// Overrides auto-initialization.
pub const DISABLE_AUTOINIT_ENV: &str = "SLOTBOOK_DISABLE_AUTOINIT";

/// Applies environment variables on top of a configuration.
///
/// # Examples
///
/// ```no_run
/// use slotbook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Overwrites every field whose variable is set and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the variable if its value does
    /// not parse.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(actor) = Self::var(ACTOR_ENV) {
            config.actor = Some(actor);
        }

        if let Some(days) = Self::var(LOOKAHEAD_DAYS_ENV) {
            config.lookahead_days = Some(days.parse().map_err(|_| Error::Validation {
                field: LOOKAHEAD_DAYS_ENV.into(),
                message: format!("expected a whole number of days, got '{days}'"),
            })?);
        }

        if let Some(seconds) = Self::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds =
                Some(seconds.parse().map_err(|_| Error::Validation {
                    field: LOCK_WAIT_ENV.into(),
                    message: format!("expected a whole number of seconds, got '{seconds}'"),
                })?);
        }

        if let Some(value) = Self::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &value)?);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!("invalid boolean '{s}' (expected true/false/1/0/yes/no/on/off)"),
            }),
        }
    }
}
