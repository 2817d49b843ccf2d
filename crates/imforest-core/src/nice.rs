//! Nice-number snapping
//!
//! Rounds a raw interval outward to visually clean bounds. The snapped
//! interval never shrinks: `nice_min <= raw_min` and `nice_max >= raw_max`.
//!
//! - Linear scales search step sizes from the Wilkinson multiplier set
//!   `{1, 2, 2.5, 4, 5} × 10^j` over three adjacent magnitudes and keep the
//!   step whose snapped interval expands the raw span the least.
//! - Log scales snap to a fixed ascending list of nice values spanning
//!   `0.001 ..= 1000`, falling back to powers of ten outside that list.

use lazy_static::lazy_static;
use tracing::trace;

use crate::types::ScaleType;

/// Wilkinson "nice" step multipliers
pub const LINEAR_MULTIPLIERS: [f64; 5] = [1.0, 2.0, 2.5, 4.0, 5.0];

/// Nice multiples within one decade for log axes
pub const LOG_MULTIPLIERS: [f64; 19] = [
    1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 1.7, 1.8, 1.9, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0,
];

/// Decades covered by the nice log list: 10^-3 up to 10^2, then 1000 itself
const LOG_FIRST_DECADE: i32 = -3;
const LOG_LAST_DECADE: i32 = 2;

/// Smallest domain minimum allowed on a log axis when the data offers none
pub const LOG_FLOOR: f64 = 0.01;

/// Decimal digits kept after snapping
const ROUND_DIGITS: i32 = 10;

/// Scores closer than this count as a tie
const SCORE_EPSILON: f64 = 1e-9;

/// Quotients this close to an integer sit on the grid
const GRID_EPSILON: f64 = 1e-9;

lazy_static! {
    /// Ascending nice values for log axes
    pub static ref NICE_LOG_VALUES: Vec<f64> = build_log_values();
}

fn build_log_values() -> Vec<f64> {
    let mut values = Vec::with_capacity(LOG_MULTIPLIERS.len() * 6 + 1);
    for decade in LOG_FIRST_DECADE..=LOG_LAST_DECADE {
        let base = 10f64.powi(decade);
        values.extend(LOG_MULTIPLIERS.iter().map(|m| round_to_precision(m * base)));
    }
    values.push(10f64.powi(LOG_LAST_DECADE + 1));
    values
}

/// Round to [`ROUND_DIGITS`] decimal places to remove floating-point drift.
///
/// Values too large for the scaled form to hold a fraction are returned as is.
pub fn round_to_precision(value: f64) -> f64 {
    let factor = 10f64.powi(ROUND_DIGITS);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= 9.0e15 {
        return value;
    }
    scaled.round() / factor
}

/// Grid index for `quotient`, treating near-integers as exact so that
/// `0.7 / 0.1 = 6.999...` stays on 7 instead of dropping a whole step
pub(crate) fn grid_index(quotient: f64, outward: fn(f64) -> f64) -> f64 {
    let nearest = quotient.round();
    if (quotient - nearest).abs() < GRID_EPSILON {
        nearest
    } else {
        outward(quotient)
    }
}

/// Candidate step sizes around a magnitude, ascending
pub(crate) fn candidate_steps(magnitude: i32) -> impl Iterator<Item = f64> {
    (magnitude.saturating_sub(1)..=magnitude.saturating_add(1)).flat_map(|exponent| {
        let base = 10f64.powi(exponent);
        LINEAR_MULTIPLIERS.iter().map(move |m| m * base)
    })
}

/// Snap `[raw_min, raw_max]` outward to nice bounds on the given scale.
///
/// A degenerate interval (`raw_max <= raw_min`) is returned unchanged; callers
/// widen zero spans before snapping.
pub fn snap(raw_min: f64, raw_max: f64, scale: ScaleType) -> (f64, f64) {
    match scale {
        ScaleType::Linear => snap_linear(raw_min, raw_max),
        ScaleType::Log => snap_log(raw_min, raw_max),
    }
}

/// Linear snapping by expansion-ratio search
pub fn snap_linear(raw_min: f64, raw_max: f64) -> (f64, f64) {
    let span = raw_max - raw_min;
    if !span.is_finite() || span <= 0.0 {
        return (raw_min, raw_max);
    }

    let magnitude = span.log10().floor() as i32;

    // (score, step, nice_min, nice_max); steps arrive ascending, so `<=` lets
    // a coarser step win ties
    let mut best: Option<(f64, f64, f64, f64)> = None;
    for step in candidate_steps(magnitude) {
        let lo = grid_index(raw_min / step, f64::floor) * step;
        let hi = grid_index(raw_max / step, f64::ceil) * step;
        let score = (hi - lo) / span;
        if !score.is_finite() {
            continue;
        }
        trace!(step, lo, hi, score, "linear snap candidate");
        match best {
            Some((best_score, ..)) if score > best_score + SCORE_EPSILON => {}
            _ => best = Some((score, step, lo, hi)),
        }
    }

    let Some((_, step, lo, hi)) = best else {
        return (raw_min, raw_max);
    };

    let mut nice_min = round_to_precision(lo);
    let mut nice_max = round_to_precision(hi);

    // Rounding can nudge a bound across the raw value by one ulp
    if nice_min > raw_min {
        nice_min = round_to_precision(nice_min - step);
    }
    if nice_max < raw_max {
        nice_max = round_to_precision(nice_max + step);
    }

    if !nice_min.is_finite() || !nice_max.is_finite() {
        return (raw_min, raw_max);
    }
    (nice_min, nice_max)
}

/// Log snapping against [`NICE_LOG_VALUES`]
pub fn snap_log(raw_min: f64, raw_max: f64) -> (f64, f64) {
    if !(raw_max > raw_min) {
        return (raw_min, raw_max);
    }
    let min = if raw_min > 0.0 { raw_min } else { LOG_FLOOR };
    let max = if raw_max > min { raw_max } else { min * 10.0 };
    (nice_log_floor(min), nice_log_ceil(max))
}

/// Largest nice log value `<= value`
pub fn nice_log_floor(value: f64) -> f64 {
    let values = &*NICE_LOG_VALUES;
    let first = values[0];
    let last = values[values.len() - 1];

    if value < first || value > last {
        let mut power = 10f64.powi(value.log10().floor() as i32);
        if power > value {
            power /= 10.0;
        }
        // Subnormal inputs can underflow to zero
        return if power > 0.0 { power } else { value };
    }

    let index = values.partition_point(|&v| v <= value);
    values[index.saturating_sub(1)]
}

/// Smallest nice log value `>= value`
pub fn nice_log_ceil(value: f64) -> f64 {
    let values = &*NICE_LOG_VALUES;
    let first = values[0];
    let last = values[values.len() - 1];

    if value < first || value > last {
        let mut power = 10f64.powi(value.log10().ceil() as i32);
        if power < value {
            power *= 10.0;
        }
        // No power of ten above values near f64::MAX
        return if power.is_finite() { power } else { value };
    }

    let index = values.partition_point(|&v| v < value);
    values[index.min(values.len() - 1)]
}

/// Whether a value is expressible as `m × 10^n` for a Wilkinson multiplier `m`
/// and an integer count of steps (used by tests and diagnostics)
pub fn is_nice_linear(value: f64) -> bool {
    if value == 0.0 {
        return true;
    }
    let magnitude = value.abs().log10().floor() as i32;
    (magnitude - 12..=magnitude).any(|exponent| {
        let base = 10f64.powi(exponent);
        LINEAR_MULTIPLIERS.iter().any(|m| {
            let steps = value / (m * base);
            (steps - steps.round()).abs() < 1e-6
        })
    })
}
