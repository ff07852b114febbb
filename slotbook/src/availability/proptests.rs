//! Property-based tests for the availability rules.

use super::{
    classify_slot, compute_blackout_day, first_free_slot, is_blackout_day, is_blackout_slot,
    is_within_business_hours, SlotAvailability, BLACKOUT_HOUR,
};
use crate::slot::SlotGrid;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1900i32..=2200, 1u32..=12, 1u32..=31).prop_filter_map("no such day", |(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d)
    })
}

fn time_strategy() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

// Any subset of the grid, as a booked set
fn booked_strategy() -> impl Strategy<Value = BTreeSet<NaiveTime>> {
    let grid: Vec<NaiveTime> = SlotGrid::business_day().iter().collect();
    prop::collection::vec(any::<bool>(), grid.len()).prop_map(move |mask| {
        grid.iter()
            .zip(mask)
            .filter_map(|(t, keep)| keep.then_some(*t))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // The blackout day is the third Tuesday of the month
    #[test]
    fn blackout_day_is_third_tuesday(year in 1900i32..=2200, month in 1u32..=12) {
        let day = compute_blackout_day(year, month).unwrap();
        prop_assert_eq!(day.weekday(), Weekday::Tue);
        prop_assert!((15..=21).contains(&day.day()));
        prop_assert_eq!(day.month(), month);
        prop_assert_eq!(day.year(), year);
    }

    // Exactly one blackout day per month
    #[test]
    fn blackout_day_is_unique(year in 1900i32..=2200, month in 1u32..=12) {
        let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let count = first
            .iter_days()
            .take_while(|d| d.month() == month)
            .filter(|d| is_blackout_day(*d))
            .count();
        prop_assert_eq!(count, 1);
    }

    // Blackout slot reduces to blackout day within the blackout hour
    #[test]
    fn blackout_slot_matches_day_in_hour(date in date_strategy(), minute in 0u32..60) {
        let time = NaiveTime::from_hms_opt(BLACKOUT_HOUR, minute, 0).unwrap();
        prop_assert_eq!(is_blackout_slot(date, time), is_blackout_day(date));
    }

    // No other hour is ever blacked out
    #[test]
    fn blackout_slot_never_outside_hour(date in date_strategy(), time in time_strategy()) {
        prop_assume!(time.hour() != BLACKOUT_HOUR);
        prop_assert!(!is_blackout_slot(date, time));
    }

    // Classification agrees with the individual predicates
    #[test]
    fn classify_agrees_with_predicates(
        date in date_strategy(),
        time in time_strategy(),
        booked in booked_strategy(),
    ) {
        let verdict = classify_slot(date, time, &booked);
        let expected_available = is_within_business_hours(time)
            && !is_blackout_slot(date, time)
            && !booked.contains(&time);
        prop_assert_eq!(verdict.is_available(), expected_available);
        if !is_within_business_hours(time) {
            prop_assert_eq!(verdict, SlotAvailability::OutsideHours);
        }
    }

    // The first free slot is free and nothing earlier on the grid is
    #[test]
    fn first_free_slot_is_earliest(date in date_strategy(), booked in booked_strategy()) {
        match first_free_slot(date, &booked) {
            Some(slot) => {
                prop_assert_eq!(slot.date, date);
                prop_assert!(SlotGrid::business_day().contains(slot.start));
                prop_assert!(!booked.contains(&slot.start));
                prop_assert!(!is_blackout_slot(date, slot.start));
                for earlier in SlotGrid::business_day().iter().take_while(|t| *t < slot.start) {
                    prop_assert!(booked.contains(&earlier) || is_blackout_slot(date, earlier));
                }
            }
            None => {
                for t in SlotGrid::business_day() {
                    prop_assert!(booked.contains(&t) || is_blackout_slot(date, t));
                }
            }
        }
    }
}
