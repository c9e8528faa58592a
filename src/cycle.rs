// ABOUTME: Pure cycle arithmetic mapping calendar dates onto template day indices
// ABOUTME: Also derives starting loads from a user's three-lift strength baseline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

//! Cycle resolution and load derivation.
//!
//! Every date-facing read resolves its day index directly from the plan's
//! start date with one modulo computation. Nothing here is cached or
//! persisted, so a skipped refresh can never put the schedule out of step
//! with calendar truth.

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Load-derivation coefficients applied to the matching baseline lift
const LEGS_SQUAT_FACTOR: f64 = 0.70;
const UPPER_PUSH_PULL_BENCH_FACTOR: f64 = 0.60;
const ARMS_BENCH_FACTOR: f64 = 0.50;
const FALLBACK_DEADLIFT_FACTOR: f64 = 0.60;

/// Resolve the 1-based day index of `target` within a repeating cycle.
///
/// # Errors
///
/// Returns `InvalidInput` when `target` precedes `start` (never clamped)
/// or when `cycle_days` is not positive.
pub fn resolve_day(start: NaiveDate, cycle_days: i64, target: NaiveDate) -> AppResult<i64> {
    if cycle_days < 1 {
        return Err(AppError::invalid_input(format!(
            "cycle length must be at least one day, got {cycle_days}"
        )));
    }

    let days_elapsed = (target - start).num_days();
    if days_elapsed < 0 {
        return Err(AppError::invalid_input("date is before the plan start date"));
    }

    Ok(days_elapsed % cycle_days + 1)
}

/// Plain day count since plan start (no modulo), minimum 1.
///
/// Day 1 is the start date itself. Used for display only; the value is
/// recomputed on every read and never stored.
#[must_use]
pub fn elapsed_day_count(start: NaiveDate, today: NaiveDate) -> i64 {
    ((today - start).num_days() + 1).max(1)
}

/// Derive the starting weight for an exercise from the user's baselines.
///
/// Leg work keys off the squat, upper-body pushing and pulling off the
/// bench, isolation arm work off a reduced bench share, and everything
/// else off the deadlift. Rounded to two decimal places.
#[must_use]
pub fn starting_weight(muscle_group: &str, squat: f64, bench: f64, deadlift: f64) -> f64 {
    let raw = match muscle_group {
        "legs" => squat * LEGS_SQUAT_FACTOR,
        "chest" | "back" | "shoulders" => bench * UPPER_PUSH_PULL_BENCH_FACTOR,
        "arms" | "biceps" | "triceps" => bench * ARMS_BENCH_FACTOR,
        _ => deadlift * FALLBACK_DEADLIFT_FACTOR,
    };
    round_weight(raw)
}

/// Round a load to two decimal places
#[must_use]
pub fn round_weight(weight: f64) -> f64 {
    (weight * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_day_in_range() {
        let start = date(2025, 3, 1);
        for cycle in 1..=10 {
            for offset in 0..40 {
                let target = start + chrono::Days::new(offset);
                let index = resolve_day(start, cycle, target).unwrap();
                assert!(index >= 1 && index <= cycle, "index {index} out of [1, {cycle}]");
            }
        }
    }

    #[test]
    fn test_resolve_day_cyclical_idempotence() {
        let start = date(2025, 3, 1);
        let base = resolve_day(start, 4, start).unwrap();
        for k in 0..12 {
            let target = start + chrono::Days::new(4 * k);
            assert_eq!(resolve_day(start, 4, target).unwrap(), base);
        }
    }

    #[test]
    fn test_resolve_day_sequence() {
        let start = date(2025, 3, 1);
        let indices: Vec<i64> = (0..6)
            .map(|offset| {
                resolve_day(start, 4, start + chrono::Days::new(offset)).unwrap()
            })
            .collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 1, 2]);
    }

    #[test]
    fn test_resolve_day_before_start_is_rejected() {
        let start = date(2025, 3, 10);
        let err = resolve_day(start, 4, date(2025, 3, 9)).unwrap_err();
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn test_resolve_day_rejects_zero_cycle() {
        let start = date(2025, 3, 1);
        assert!(resolve_day(start, 0, start).is_err());
    }

    #[test]
    fn test_elapsed_day_count() {
        let start = date(2025, 3, 1);
        assert_eq!(elapsed_day_count(start, start), 1);
        assert_eq!(elapsed_day_count(start, date(2025, 3, 8)), 8);
        // Clamped: a start date in the future still counts as day 1
        assert_eq!(elapsed_day_count(start, date(2025, 2, 20)), 1);
    }

    #[test]
    fn test_starting_weight_rules() {
        assert_eq!(starting_weight("legs", 100.0, 80.0, 120.0), 70.00);
        assert_eq!(starting_weight("chest", 100.0, 80.0, 120.0), 48.00);
        assert_eq!(starting_weight("back", 100.0, 80.0, 120.0), 48.00);
        assert_eq!(starting_weight("shoulders", 100.0, 80.0, 120.0), 48.00);
        assert_eq!(starting_weight("arms", 100.0, 80.0, 120.0), 40.00);
        assert_eq!(starting_weight("biceps", 100.0, 80.0, 120.0), 40.00);
        assert_eq!(starting_weight("triceps", 100.0, 80.0, 120.0), 40.00);
        assert_eq!(starting_weight("core", 100.0, 80.0, 120.0), 72.00);
    }

    #[test]
    fn test_starting_weight_rounds_to_two_places() {
        // 33.33 * 0.6 = 19.998 -> 20.00
        assert_eq!(starting_weight("chest", 0.0, 33.33, 0.0), 20.00);
        assert_eq!(round_weight(19.998), 20.00);
        assert_eq!(round_weight(70.004_999), 70.0);
    }
}
