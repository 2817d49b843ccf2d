//! Interval endpoint clipping
//!
//! Endpoints are classified against the clip boundaries the domain resolver
//! computed around the snapped estimate range. The final snap can carry the
//! domain edge past a boundary, so a bound the resolver excluded is still
//! cut at the boundary even when it lies inside the domain. Sides without a
//! boundary inside the domain fall back to the domain edge. A value exactly
//! on the cut is visible.

use serde::{Deserialize, Serialize};

use crate::domain::ClipBounds;
use crate::types::{ClipDirection, ClipResult, Domain, EstimateRecord};

/// Where interval endpoints are cut
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipWindow {
    pub lower: f64,
    pub upper: f64,
}

impl ClipWindow {
    /// Clip boundaries that fall inside the domain, otherwise its edges
    pub fn new(domain: &Domain, bounds: &ClipBounds) -> Self {
        let inside = |b: &f64| *b > domain.min() && *b < domain.max();
        Self {
            lower: bounds.lower.filter(inside).unwrap_or(domain.min()),
            upper: bounds.upper.filter(inside).unwrap_or(domain.max()),
        }
    }
}

/// Explicit and unclipped axes cut at the domain edges
impl From<Domain> for ClipWindow {
    fn from(domain: Domain) -> Self {
        Self {
            lower: domain.min(),
            upper: domain.max(),
        }
    }
}

/// Classify one value against the clip window
pub fn classify(value: f64, window: &ClipWindow) -> ClipResult {
    if value < window.lower {
        ClipResult::ClippedTo {
            boundary: window.lower,
            direction: ClipDirection::TowardLower,
        }
    } else if value > window.upper {
        ClipResult::ClippedTo {
            boundary: window.upper,
            direction: ClipDirection::TowardUpper,
        }
    } else {
        ClipResult::Visible { value }
    }
}

/// Both endpoint classifications for one interval
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntervalClip {
    pub lower: Option<ClipResult>,
    pub upper: Option<ClipResult>,
    /// The whole interval lies beyond one side of the window
    pub fully_outside: bool,
}

impl IntervalClip {
    pub fn is_clipped(&self) -> bool {
        self.lower.is_some_and(|c| c.is_clipped()) || self.upper.is_some_and(|c| c.is_clipped())
    }
}

/// Classify both bounds of an estimate
pub fn classify_interval(record: &EstimateRecord, window: &ClipWindow) -> IntervalClip {
    let lower = record.lower().map(|v| classify(v, window));
    let upper = record.upper().map(|v| classify(v, window));

    let fully_outside = match (lower, upper) {
        (Some(lo), Some(hi)) => lo.direction().is_some() && lo.direction() == hi.direction(),
        (Some(only), None) | (None, Some(only)) => only.is_clipped(),
        (None, None) => false,
    };

    IntervalClip {
        lower,
        upper,
        fully_outside,
    }
}
