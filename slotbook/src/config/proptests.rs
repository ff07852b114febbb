//! Property-based tests for configuration layering.

use super::merger::ConfigMerger;
use super::schema::Config;
use super::validator::ConfigValidator;
use crate::booking::MAX_LOOKAHEAD_DAYS;
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("[a-z]{1,20}"),
        prop::option::of(1u32..=MAX_LOOKAHEAD_DAYS),
        prop::option::of(1u64..=600),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(actor, lookahead_days, wait, autoinit)| Config {
            actor,
            lookahead_days,
            maximum_lock_wait_seconds: wait,
            disable_autoinit: autoinit,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // A field set by the higher layer always wins; an unset one falls through.
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.actor, high.actor.or(low.actor));
        prop_assert_eq!(result.lookahead_days, high.lookahead_days.or(low.lookahead_days));
        prop_assert_eq!(
            result.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(result.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
    }

    #[test]
    fn config_merge_is_idempotent(base in config_strategy(), layer in config_strategy()) {
        let mut once = base;
        ConfigMerger::merge_into(&mut once, &layer);
        let mut twice = once.clone();
        ConfigMerger::merge_into(&mut twice, &layer);
        prop_assert_eq!(once, twice);
    }

    // Merging valid layers never produces an invalid configuration.
    #[test]
    fn config_merge_of_valid_layers_is_valid(low in config_strategy(), high in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&low).is_ok());
        prop_assert!(ConfigValidator::validate(&high).is_ok());
        let mut result = low;
        ConfigMerger::merge_into(&mut result, &high);
        prop_assert!(ConfigValidator::validate(&result).is_ok());
    }

    #[test]
    fn lookahead_outside_range_rejected(days in (MAX_LOOKAHEAD_DAYS + 1)..u32::MAX) {
        let config = Config { lookahead_days: Some(days), ..Default::default() };
        prop_assert!(ConfigValidator::validate(&config).is_err());
    }
}
