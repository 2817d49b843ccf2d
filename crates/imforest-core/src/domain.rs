//! Axis domain resolution
//!
//! Decides what range the forest plot axis spans:
//!
//! 1. An explicit `range_min`/`range_max` pair is returned as is.
//! 2. The estimate range is built from point estimates only (plus the null
//!    value when `include_null`), widened if it has zero span, and snapped.
//! 3. Clip boundaries are placed around the snapped estimate range:
//!    multiplicatively on log axes, by span fractions on linear axes. Log
//!    factors below one put the boundaries on the estimate range itself.
//! 4. Interval bounds inside the boundaries extend the domain; bounds beyond
//!    a boundary only pull the domain out to that boundary.
//! 5. The result is snapped again and optionally mirrored around the null
//!    value.
//!
//! Missing or non-finite data never fails; it falls back to a default domain.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clip::ClipWindow;
use crate::config::{AxisConfig, ClipFactor};
use crate::nice::{self, round_to_precision, LOG_FLOOR};
use crate::types::{Domain, ScaleType};

/// Where a resolved domain came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomainSource {
    /// Both range bounds were configured
    Explicit,
    /// Computed from the plot data
    Data,
    /// No usable data; the scale's default domain was used
    Fallback,
}

/// Clip boundaries around the snapped estimate range; `None` is unbounded
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipBounds {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl ClipBounds {
    pub fn unbounded() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    /// Boundaries for a snapped estimate range.
    ///
    /// Log axes multiply/divide by the factor; linear axes add the factor
    /// times the estimate span on each side. A boundary that overflows is
    /// left unbounded.
    pub fn around(nice_min: f64, nice_max: f64, scale: ScaleType, factor: ClipFactor) -> Self {
        let Some(factor) = factor.value() else {
            return Self::unbounded();
        };
        let (lower, upper) = match scale {
            ScaleType::Log => {
                let factor = factor.max(1.0);
                (nice_min / factor, nice_max * factor)
            }
            ScaleType::Linear => {
                let span = nice_max - nice_min;
                (nice_min - span * factor, nice_max + span * factor)
            }
        };
        let finite = |b: f64| Some(round_to_precision(b)).filter(|b| b.is_finite());
        Self {
            lower: finite(lower),
            upper: finite(upper),
        }
    }

    /// Strictly below the lower boundary
    pub fn excludes_below(&self, value: f64) -> bool {
        self.lower.is_some_and(|b| value < b)
    }

    /// Strictly above the upper boundary
    pub fn excludes_above(&self, value: f64) -> bool {
        self.upper.is_some_and(|b| value > b)
    }
}

/// A resolved domain together with the intermediate values that produced it
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainResolution {
    pub domain: Domain,
    /// Snapped estimate range (equal to the domain for explicit ranges)
    pub estimate_range: Domain,
    pub clip_bounds: ClipBounds,
    /// Some bound fell below the lower clip boundary
    pub lower_clipped: bool,
    /// Some bound fell above the upper clip boundary
    pub upper_clipped: bool,
    pub source: DomainSource,
}

impl DomainResolution {
    /// Where interval endpoints are cut on this domain
    pub fn clip_window(&self) -> ClipWindow {
        ClipWindow::new(&self.domain, &self.clip_bounds)
    }
}

/// Resolve the axis domain from point estimates and interval bounds
pub fn resolve_domain(points: &[f64], bounds: &[f64], null_value: f64, config: &AxisConfig) -> Domain {
    resolve_domain_detailed(points, bounds, null_value, config).domain
}

/// [`resolve_domain`], also returning the clip boundaries and flags
pub fn resolve_domain_detailed(
    points: &[f64],
    bounds: &[f64],
    null_value: f64,
    config: &AxisConfig,
) -> DomainResolution {
    let scale = config.scale();

    if let Some((min, max)) = config.explicit_range() {
        let domain = Domain::from_ordered(min, max);
        return DomainResolution {
            domain,
            estimate_range: domain,
            clip_bounds: ClipBounds::unbounded(),
            lower_clipped: false,
            upper_clipped: false,
            source: DomainSource::Explicit,
        };
    }

    let usable = |v: &f64| scale.accepts(*v);
    let null = Some(null_value).filter(|v| config.include_null() && usable(v));

    // The null value alone is not data; without points the default domain applies
    let (raw_min, raw_max, source) = match min_max(points.iter().copied().filter(usable)) {
        Some((min, max)) => {
            let (min, max) = null.map_or((min, max), |n| (min.min(n), max.max(n)));
            (min, max, DomainSource::Data)
        }
        None => {
            let (min, max) = default_range(scale);
            debug!(%scale, min, max, "no usable point estimates, using default domain");
            (min, max, DomainSource::Fallback)
        }
    };

    let (est_min, est_max) = widen_degenerate(raw_min, raw_max, scale);
    let (nice_min, nice_max) = nice::snap(est_min, est_max, scale);
    let clip_bounds = ClipBounds::around(nice_min, nice_max, scale, config.clip_factor());

    let mut lo = nice_min;
    let mut hi = nice_max;
    let mut lower_clipped = false;
    let mut upper_clipped = false;
    for bound in bounds.iter().copied().filter(usable) {
        if clip_bounds.excludes_below(bound) {
            lower_clipped = true;
        } else if clip_bounds.excludes_above(bound) {
            upper_clipped = true;
        } else {
            lo = lo.min(bound);
            hi = hi.max(bound);
        }
    }
    if lower_clipped {
        if let Some(b) = clip_bounds.lower {
            lo = lo.min(b);
        }
    }
    if upper_clipped {
        if let Some(b) = clip_bounds.upper {
            hi = hi.max(b);
        }
    }

    let (mut min, mut max) = nice::snap(lo, hi, scale);

    if config.symmetric() {
        (min, max) = mirror_around(min, max, null_value, scale);
    }

    (min, max) = apply_partial_range(min, max, config);
    let domain = finalize(min, max, scale);

    debug!(
        min = domain.min(),
        max = domain.max(),
        nice_min,
        nice_max,
        lower_clipped,
        upper_clipped,
        "resolved axis domain"
    );

    DomainResolution {
        domain,
        estimate_range: finalize(nice_min, nice_max, scale),
        clip_bounds,
        lower_clipped,
        upper_clipped,
        source,
    }
}

/// Domain used when no data is available at all
pub fn default_range(scale: ScaleType) -> (f64, f64) {
    match scale {
        ScaleType::Linear => (0.0, 1.0),
        ScaleType::Log => (0.1, 10.0),
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Give a zero-span range some width: ×/÷ 2 on log axes,
/// `± max(1, |v| × 0.1)` on linear axes
pub fn widen_degenerate(min: f64, max: f64, scale: ScaleType) -> (f64, f64) {
    if max > min {
        return (min, max);
    }
    debug!(%scale, value = min, "zero-span estimate range, widening");
    match scale {
        ScaleType::Log => (min / 2.0, max * 2.0),
        ScaleType::Linear => {
            let pad = (min.abs() * 0.1).max(1.0);
            (min - pad, max + pad)
        }
    }
}

/// Expand the shorter side so the domain is symmetric around `null_value`
fn mirror_around(min: f64, max: f64, null_value: f64, scale: ScaleType) -> (f64, f64) {
    if !scale.accepts(null_value) {
        warn!(%scale, null_value, "null value not representable, skipping symmetric domain");
        return (min, max);
    }
    match scale {
        ScaleType::Linear => {
            let below = null_value - min;
            let above = max - null_value;
            if below >= above {
                (min, round_to_precision(null_value + below))
            } else {
                (round_to_precision(null_value - above), max)
            }
        }
        ScaleType::Log => {
            // Compare log-ratios; mirroring x around n is n² / x
            let below = (null_value / min).ln();
            let above = (max / null_value).ln();
            if below >= above {
                (min, round_to_precision(null_value * null_value / min))
            } else {
                (round_to_precision(null_value * null_value / max), max)
            }
        }
    }
}

/// Replace a single configured bound, widening the free side if the
/// override would invert the domain
fn apply_partial_range(min: f64, max: f64, config: &AxisConfig) -> (f64, f64) {
    let scale = config.scale();
    match (config.range_min(), config.range_max()) {
        (Some(fixed), None) if fixed >= max => {
            let (_, widened) = widen_degenerate(fixed, fixed, scale);
            warn!(range_min = fixed, computed_max = max, "range_min above data, widening max");
            (fixed, widened)
        }
        (Some(fixed), None) => (fixed, max),
        (None, Some(fixed)) if fixed <= min => {
            let (widened, _) = widen_degenerate(fixed, fixed, scale);
            warn!(range_max = fixed, computed_min = min, "range_max below data, widening min");
            (widened, fixed)
        }
        (None, Some(fixed)) => (min, fixed),
        _ => (min, max),
    }
}

/// Enforce `min < max` and, on log axes, `min > 0`
fn finalize(mut min: f64, mut max: f64, scale: ScaleType) -> Domain {
    if scale == ScaleType::Log && !(min > 0.0) {
        debug!(min, floor = LOG_FLOOR, "clamping log domain minimum");
        min = LOG_FLOOR;
    }
    if !min.is_finite() || !max.is_finite() {
        let (lo, hi) = default_range(scale);
        min = lo;
        max = hi;
    }
    if !(max > min) {
        (min, max) = widen_degenerate(min, min, scale);
    }
    Domain::from_ordered(min, max)
}
