//! Layering of configuration sources.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration layers; later layers win field by field.
///
/// # Examples
///
/// ```
/// use slotbook::config::{Config, ConfigMerger};
///
/// let mut result = Config { actor: Some("low".into()), lookahead_days: Some(5), ..Default::default() };
/// let high = Config { actor: Some("high".into()), ..Default::default() };
///
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.actor.as_deref(), Some("high"));
/// assert_eq!(result.lookahead_days, Some(5));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges file sources, lowest precedence first, onto an empty config.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Copies every field that `source` sets into `target`.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.actor.is_some() {
            target.actor.clone_from(&source.actor);
        }
        if source.lookahead_days.is_some() {
            target.lookahead_days = source.lookahead_days;
        }
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }
        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_merge_unset_fields_do_not_erase() {
        let mut target = Config {
            actor: Some("alice".into()),
            lookahead_days: Some(10),
            maximum_lock_wait_seconds: Some(3),
            disable_autoinit: Some(true),
        };
        let before = target.clone();
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target, before);
    }

    #[test]
    fn test_merge_sources_in_order() {
        let sources = vec![
            ConfigSource {
                path: PathBuf::from("low.yaml"),
                config: Config {
                    actor: Some("low".into()),
                    lookahead_days: Some(1),
                    ..Default::default()
                },
            },
            ConfigSource {
                path: PathBuf::from("high.yaml"),
                config: Config {
                    lookahead_days: Some(2),
                    disable_autoinit: Some(false),
                    ..Default::default()
                },
            },
        ];

        let merged = ConfigMerger::merge(sources);
        assert_eq!(merged.actor.as_deref(), Some("low"));
        assert_eq!(merged.lookahead_days, Some(2));
        assert_eq!(merged.disable_autoinit, Some(false));
        assert_eq!(merged.maximum_lock_wait_seconds, None);
    }

    #[test]
    fn test_merge_nothing_is_default() {
        assert_eq!(ConfigMerger::merge(Vec::new()), Config::default());
    }
}
