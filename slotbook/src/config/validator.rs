//! Configuration validation.

use crate::booking::MAX_LOOKAHEAD_DAYS;
use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Longest accepted identity, in characters.
pub const MAX_ACTOR_LEN: usize = 128;

/// Checks a merged configuration.
///
/// # Examples
///
/// ```
/// use slotbook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { lookahead_days: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates every field that is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref actor) = config.actor {
            Self::validate_actor(actor)?;
        }

        if let Some(days) = config.lookahead_days {
            if !(1..=MAX_LOOKAHEAD_DAYS).contains(&days) {
                return Err(Error::Validation {
                    field: "lookahead_days".into(),
                    message: format!("must be between 1 and {MAX_LOOKAHEAD_DAYS}, got {days}"),
                });
            }
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "timeout must be greater than 0".into(),
            });
        }

        Ok(())
    }

    /// Validates an acting identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the identity is blank, too long or
    /// contains control characters.
    pub fn validate_actor(actor: &str) -> Result<()> {
        let invalid = |message: &str| {
            Err(Error::Validation {
                field: "actor".into(),
                message: message.into(),
            })
        };

        if actor.trim().is_empty() {
            return invalid("actor cannot be empty");
        }
        if actor.chars().count() > MAX_ACTOR_LEN {
            return invalid("actor is too long");
        }
        if actor.chars().any(char::is_control) {
            return invalid("actor cannot contain control characters");
        }
        Ok(())
    }
}
