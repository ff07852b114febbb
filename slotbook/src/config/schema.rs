//! Configuration schema.
//!
//! Every field is optional so that partial sources can be layered; the
//! `*_or_default` accessors resolve what remains unset after merging.

use serde::{Deserialize, Serialize};

use crate::booking::DEFAULT_LOOKAHEAD_DAYS;
use crate::database::DEFAULT_BUSY_TIMEOUT;

/// File name of the user configuration inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Complete configuration.
///
/// # Examples
///
/// ```
/// use slotbook::config::Config;
///
/// let config: Config = serde_yaml::from_str("actor: alice\nlookahead_days: 30\n").unwrap();
/// assert_eq!(config.actor.as_deref(), Some("alice"));
/// assert_eq!(config.lookahead_days_or_default(), 30);
/// assert_eq!(config.lock_wait_seconds_or_default(), 5);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Identity recorded on bookings and cancellations.
    pub actor: Option<String>,

    /// Days examined by a keep search, today included.
    pub lookahead_days: Option<u32>,

    /// Maximum time to wait for the database lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Refuse to create a missing database.
    pub disable_autoinit: Option<bool>,
}

impl Config {
    /// Keep-search lookahead, falling back to the built-in default.
    #[must_use]
    pub fn lookahead_days_or_default(&self) -> u32 {
        self.lookahead_days.unwrap_or(DEFAULT_LOOKAHEAD_DAYS)
    }

    /// Lock wait, falling back to the built-in default.
    #[must_use]
    pub fn lock_wait_seconds_or_default(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or_else(|| DEFAULT_BUSY_TIMEOUT.as_secs())
    }

    /// Whether auto-initialization is disabled; defaults to `false`.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }
}
