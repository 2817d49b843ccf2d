//! One axis shared by several plots
//!
//! Subsets of a split dataset are pooled into a single domain resolution, so
//! every sub-plot draws the same axis and cuts intervals at the same clip
//! boundaries. Explicit ranges and tick values pass through unchanged.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clip::ClipWindow;
use crate::config::AxisConfig;
use crate::domain::{resolve_domain_detailed, ClipBounds};
use crate::ticks::tick_set;
use crate::types::{Domain, PlotInput};

/// Several independent plots plus the configuration they share
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedAxisRequest {
    pub subsets: Vec<PlotInput>,
    #[serde(default)]
    pub config: AxisConfig,
}

impl SharedAxisRequest {
    pub fn new(subsets: Vec<PlotInput>, config: AxisConfig) -> Self {
        Self { subsets, config }
    }

    pub fn resolve(&self) -> SharedAxis {
        SharedAxis::resolve(&self.subsets, &self.config)
    }
}

/// A resolved axis: domain, clip boundaries, ticks, and the configuration
/// that produced them
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SharedAxis {
    pub domain: Domain,
    #[serde(default)]
    pub clip_bounds: ClipBounds,
    pub ticks: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped_ticks: Vec<f64>,
    pub null_value: f64,
    pub config: AxisConfig,
}

impl SharedAxis {
    /// Pool every point and bound across all subsets and series, then resolve
    /// once.
    ///
    /// The null value is taken from the first subset; with no subsets the
    /// scale's conventional null value is used.
    pub fn resolve(subsets: &[PlotInput], config: &AxisConfig) -> Self {
        let null_value = match subsets.first() {
            Some(first) => first.null_value,
            None => config.scale().default_null_value(),
        };
        if let Some(other) = subsets.iter().find(|s| s.null_value != null_value) {
            warn!(
                null_value,
                other = other.null_value,
                "subsets disagree on the null value, using the first"
            );
        }

        let points: Vec<f64> = subsets.iter().flat_map(PlotInput::points).collect();
        let bounds: Vec<f64> = subsets.iter().flat_map(PlotInput::bounds).collect();
        debug!(
            subsets = subsets.len(),
            points = points.len(),
            bounds = bounds.len(),
            "resolving shared axis"
        );

        Self::from_values(&points, &bounds, null_value, config)
    }

    /// Axis for a single plot
    pub fn for_input(input: &PlotInput, config: &AxisConfig) -> Self {
        Self::from_values(&input.points(), &input.bounds(), input.null_value, config)
    }

    /// Where interval endpoints are cut on this axis
    pub fn clip_window(&self) -> ClipWindow {
        ClipWindow::new(&self.domain, &self.clip_bounds)
    }

    fn from_values(points: &[f64], bounds: &[f64], null_value: f64, config: &AxisConfig) -> Self {
        let resolution = resolve_domain_detailed(points, bounds, null_value, config);
        let domain = resolution.domain;
        let ticks = tick_set(&domain, config, null_value);
        Self {
            domain,
            clip_bounds: resolution.clip_bounds,
            ticks: ticks.values,
            dropped_ticks: ticks.dropped,
            null_value,
            config: config.clone(),
        }
    }
}
