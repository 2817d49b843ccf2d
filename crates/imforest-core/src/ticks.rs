//! Tick generation
//!
//! Explicit tick values win over generated ones. Generated linear ticks use
//! the same Wilkinson step candidates as domain snapping; log ticks choose
//! from progressively denser per-decade multiplier tiers.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::AxisConfig;
use crate::nice::{candidate_steps, grid_index, round_to_precision, LOG_MULTIPLIERS};
use crate::types::{Domain, ScaleType};

/// Per-decade multipliers for log ticks, sparsest first
const LOG_TIERS: [&[f64]; 5] = [
    &[1.0],
    &[1.0, 3.0],
    &[1.0, 2.0, 5.0],
    &[1.0, 1.5, 2.0, 3.0, 5.0, 7.0],
    &LOG_MULTIPLIERS,
];

/// Relative tolerance for ticks landing on a domain edge
const EDGE_TOLERANCE: f64 = 1e-9;

/// Coverage ratios closer than this count as equal
const COVERAGE_EPSILON: f64 = 1e-9;

/// Ticks shown on the axis, plus explicit values that had to be dropped
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSet {
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<f64>,
}

/// Tick values for a domain, ascending
pub fn generate_ticks(domain: &Domain, config: &AxisConfig, null_value: f64) -> Vec<f64> {
    tick_set(domain, config, null_value).values
}

/// [`generate_ticks`], also reporting explicit values outside the domain
pub fn tick_set(domain: &Domain, config: &AxisConfig, null_value: f64) -> TickSet {
    let mut set = if config.tick_values().is_empty() {
        TickSet {
            values: match config.scale() {
                ScaleType::Linear => linear_ticks(domain, config.tick_count()),
                ScaleType::Log => log_ticks(domain, config.tick_count()),
            },
            dropped: Vec::new(),
        }
    } else {
        explicit_ticks(domain, config.tick_values(), config.scale())
    };

    if config.null_tick() {
        insert_null_tick(&mut set.values, domain, null_value, config.scale());
    }
    set
}

fn explicit_ticks(domain: &Domain, requested: &[f64], scale: ScaleType) -> TickSet {
    let mut sorted = requested.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();

    let (values, dropped): (Vec<f64>, Vec<f64>) = sorted
        .into_iter()
        .partition(|&v| scale.accepts(v) && domain.contains(v));
    for value in &dropped {
        warn!(
            value,
            min = domain.min(),
            max = domain.max(),
            "dropping tick value outside the axis domain"
        );
    }
    TickSet { values, dropped }
}

/// Strip float drift, keeping values too small for fixed-precision rounding
fn tidy(value: f64) -> f64 {
    let rounded = round_to_precision(value);
    if (rounded - value).abs() <= value.abs() * EDGE_TOLERANCE {
        rounded
    } else {
        value
    }
}

fn edge_tolerance(domain: &Domain) -> f64 {
    let span = domain.span();
    if span.is_finite() {
        span * EDGE_TOLERANCE
    } else {
        0.0
    }
}

fn within(value: f64, domain: &Domain) -> bool {
    let tolerance = edge_tolerance(domain);
    value >= domain.min() - tolerance && value <= domain.max() + tolerance
}

/// Evenly spaced ticks whose count lands closest to `count`.
///
/// Ties prefer the step whose ticks cover more of the domain, then the
/// coarser step.
pub fn linear_ticks(domain: &Domain, count: u32) -> Vec<f64> {
    let (min, max) = (domain.min(), domain.max());
    let span = domain.span();
    let target = f64::from(count);
    let raw_step = span / f64::from(count.saturating_sub(1).max(1));
    if !raw_step.is_finite() || raw_step <= 0.0 {
        debug!(min, max, "domain span overflows, using its edges as ticks");
        return vec![min, max];
    }
    let magnitude = raw_step.log10().floor() as i32;

    // (score, coverage, step, first, last)
    let mut best: Option<(f64, f64, f64, f64, f64)> = None;
    for step in candidate_steps(magnitude) {
        let first = grid_index(min / step, f64::ceil);
        let last = grid_index(max / step, f64::floor);
        let n = last - first + 1.0;
        if n < 1.0 || !n.is_finite() || !(last * step).is_finite() {
            continue;
        }
        let score = (n - target).abs();
        let coverage = (last - first) * step / span;
        trace!(step, n, score, coverage, "linear tick candidate");
        let better = match best {
            None => true,
            Some((best_score, best_coverage, ..)) => {
                score < best_score
                    || (score == best_score && coverage >= best_coverage - COVERAGE_EPSILON)
            }
        };
        if better {
            best = Some((score, coverage, step, first, last));
        }
    }

    let Some((_, _, step, first, last)) = best else {
        debug!(min, max, "no tick step fits the domain, using its edges");
        return vec![min, max];
    };

    let count = (last - first) as i64;
    (0..=count)
        .map(|i| tidy((first + i as f64) * step))
        .filter(|&v| within(v, domain))
        .map(|v| v.clamp(min, max))
        .collect()
}

/// Ticks at per-decade multiples, from the tier whose count lands closest to
/// `count`. Domains too narrow for any tier fall back to linear ticks.
pub fn log_ticks(domain: &Domain, count: u32) -> Vec<f64> {
    let (min, max) = (domain.min(), domain.max());
    let target = f64::from(count);
    let first_decade = min.log10().floor() as i32;
    let last_decade = max.log10().ceil() as i32;
    let log_span = max.ln() - min.ln();

    // (score, coverage, values)
    let mut best: Option<(f64, f64, Vec<f64>)> = None;
    for tier in LOG_TIERS {
        let values: Vec<f64> = (first_decade..=last_decade)
            .flat_map(|decade| {
                let base = 10f64.powi(decade);
                tier.iter().map(move |m| tidy(m * base))
            })
            .filter(|&v| v > 0.0 && v.is_finite() && within(v, domain))
            .map(|v| v.clamp(min, max))
            .collect();
        let (Some(&lo), Some(&hi)) = (values.first(), values.last()) else {
            continue;
        };
        if values.len() < 2 {
            continue;
        }
        let score = (values.len() as f64 - target).abs();
        let coverage = (hi.ln() - lo.ln()) / log_span;
        trace!(tier = ?tier, n = values.len(), score, coverage, "log tick candidate");
        let better = match &best {
            None => true,
            Some((best_score, best_coverage, _)) => {
                score < *best_score
                    || (score == *best_score && coverage > best_coverage + COVERAGE_EPSILON)
            }
        };
        if better {
            best = Some((score, coverage, values));
        }
    }

    match best {
        Some((_, _, values)) => values,
        None => {
            debug!(min, max, "log domain narrower than any tick tier, using linear ticks");
            linear_ticks(domain, count)
        }
    }
}

fn insert_null_tick(values: &mut Vec<f64>, domain: &Domain, null_value: f64, scale: ScaleType) {
    if !scale.accepts(null_value) || !domain.contains(null_value) {
        debug!(null_value, "null value outside the axis domain, no null tick");
        return;
    }
    let tolerance = edge_tolerance(domain);
    if values.iter().any(|v| (v - null_value).abs() <= tolerance) {
        return;
    }
    let index = values.partition_point(|&v| v < null_value);
    values.insert(index, null_value);
}
