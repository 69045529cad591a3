// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar helpers shared by the engine: clamping, grid alignment and rounding.
//!
//! These are free functions over `f64` so they can be reused by hosts that
//! want to preview a value (for example a tooltip under the pointer) without
//! going through a [`ValueEngine`](crate::ValueEngine).

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`

/// Aligned values are rounded to this many decimal places.
pub const ALIGN_DECIMALS: i32 = 5;

const ALIGN_SCALE: f64 = 100_000.0;

/// Pins `value` into `[min, max]`.
///
/// Both comparisons are inclusive, so a value sitting exactly on a bound is
/// replaced by the bound itself.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    let mut value = value;
    if value <= min {
        value = min;
    }
    if value >= max {
        value = max;
    }
    value
}

/// Rounds `value` to [`ALIGN_DECIMALS`] decimal places.
///
/// Used after every alignment to drop floating point noise such as
/// `0.1 + 0.2 == 0.30000000000000004`.
#[must_use]
pub fn round_to_precision(value: f64) -> f64 {
    (value * ALIGN_SCALE).round() / ALIGN_SCALE
}

/// Snaps `value` to the nearest point of the grid `min + k * step`.
///
/// A remainder of exactly half a step rounds away from the grid point below,
/// in the direction of the remainder's sign.
#[must_use]
pub fn align_to_increment(value: f64, min: f64, step: f64) -> f64 {
    let rem = (value - min) % step;
    let mut aligned = value - rem;
    if rem.abs() * 2.0 >= step {
        aligned += if rem > 0.0 { step } else { -step };
    }
    round_to_precision(aligned)
}

/// Snaps `value` to the closest entry of `set`.
///
/// The first entry wins ties. An empty set leaves `value` untouched.
#[must_use]
pub fn align_to_set(value: f64, set: &[f64]) -> f64 {
    let mut best = value;
    let mut best_distance = f64::INFINITY;
    for &entry in set {
        let distance = (value - entry).abs();
        if distance < best_distance {
            best_distance = distance;
            best = entry;
        }
    }
    round_to_precision(best)
}

/// Spreads `count` values evenly over `[min, max]`, both ends included.
///
/// A single value lands on `min`.
#[must_use]
pub fn spread(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => alloc::vec![min],
        _ => {
            let gap = (max - min) / (count - 1) as f64;
            (0..count).map(|i| min + gap * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn clamp_pins_values_on_and_beyond_bounds() {
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(0.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(4.5, 0.0, 10.0), 4.5);
        assert_eq!(clamp(10.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(12.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn increment_alignment_rounds_to_nearest_step() {
        assert_eq!(align_to_increment(4.4, 0.0, 1.0), 4.0);
        assert_eq!(align_to_increment(4.5, 0.0, 1.0), 5.0);
        assert_eq!(align_to_increment(4.6, 0.0, 1.0), 5.0);
        assert_eq!(align_to_increment(17.0, 0.0, 5.0), 15.0);
        assert_eq!(align_to_increment(18.0, 0.0, 5.0), 20.0);
    }

    #[test]
    fn increment_alignment_is_anchored_at_min() {
        // Grid is 3, 8, 13, ...
        assert_eq!(align_to_increment(9.0, 3.0, 5.0), 8.0);
        assert_eq!(align_to_increment(11.0, 3.0, 5.0), 13.0);
    }

    #[test]
    fn negative_remainders_round_downwards() {
        // Below `min` the remainder is negative; half a step rounds further down.
        assert_eq!(align_to_increment(-0.5, 0.0, 1.0), -1.0);
        assert_eq!(align_to_increment(-0.4, 0.0, 1.0), 0.0);
    }

    #[test]
    fn fractional_steps_drop_float_noise() {
        assert_eq!(align_to_increment(0.1 + 0.2, 0.0, 0.1), 0.3);
        assert_eq!(align_to_increment(0.7000000001, 0.0, 0.1), 0.7);
    }

    #[test]
    fn set_alignment_picks_nearest_entry() {
        let set = [0.0, 10.0, 25.0, 50.0, 100.0];
        assert_eq!(align_to_set(30.0, &set), 25.0);
        assert_eq!(align_to_set(80.0, &set), 100.0);
        assert_eq!(align_to_set(-5.0, &set), 0.0);
    }

    #[test]
    fn set_alignment_ties_go_to_first_entry() {
        assert_eq!(align_to_set(5.0, &[0.0, 10.0]), 0.0);
        assert_eq!(align_to_set(7.0, &[]), 7.0);
    }

    #[test]
    fn spread_includes_both_ends() {
        assert_eq!(spread(0.0, 100.0, 3), vec![0.0, 50.0, 100.0]);
        assert_eq!(spread(0.0, 100.0, 1), vec![0.0]);
        assert!(spread(0.0, 100.0, 0).is_empty());
    }
}
