//! Plot data model
//!
//! Plain value types shared by every stage of the engine. Everything here
//! is serializable so a headless exporter in another process sees exactly
//! the same inputs and outputs as the interactive renderer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Axis scale type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    #[default]
    Linear,
    Log,
}

impl ScaleType {
    /// Check whether a value can be placed on this scale
    pub fn accepts(&self, value: f64) -> bool {
        match self {
            ScaleType::Linear => value.is_finite(),
            ScaleType::Log => value.is_finite() && value > 0.0,
        }
    }

    /// The conventional "no effect" value for this scale
    pub fn default_null_value(&self) -> f64 {
        match self {
            ScaleType::Linear => 0.0,
            ScaleType::Log => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleType::Linear => "linear",
            ScaleType::Log => "log",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaleType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(ScaleType::Linear),
            "log" | "log10" => Ok(ScaleType::Log),
            _ => Err(ConfigError::UnknownScale {
                value: s.to_string(),
            }),
        }
    }
}

/// One row's estimate for one effect series.
///
/// Missing values are `None`; NaN and infinities are normalized to `None` on
/// construction, and the bounds are reordered so that `lower <= upper`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "EstimateRepr")]
pub struct EstimateRecord {
    point: Option<f64>,
    lower: Option<f64>,
    upper: Option<f64>,
}

#[derive(Deserialize)]
struct EstimateRepr {
    #[serde(default)]
    point: Option<f64>,
    #[serde(default)]
    lower: Option<f64>,
    #[serde(default)]
    upper: Option<f64>,
}

impl From<EstimateRepr> for EstimateRecord {
    fn from(repr: EstimateRepr) -> Self {
        EstimateRecord::new(repr.point, repr.lower, repr.upper)
    }
}

impl EstimateRecord {
    pub fn new(point: Option<f64>, lower: Option<f64>, upper: Option<f64>) -> Self {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
        let (lower, upper) = match (finite(lower), finite(upper)) {
            (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
            pair => pair,
        };
        Self {
            point: finite(point),
            lower,
            upper,
        }
    }

    /// Record with all three values present
    pub fn from_values(point: f64, lower: f64, upper: f64) -> Self {
        Self::new(Some(point), Some(lower), Some(upper))
    }

    /// Record with no values
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn point(&self) -> Option<f64> {
        self.point
    }

    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    /// True when no value at all is present
    pub fn is_missing(&self) -> bool {
        self.point.is_none() && self.lower.is_none() && self.upper.is_none()
    }

    /// Present interval bounds, lower first
    pub fn bounds(&self) -> impl Iterator<Item = f64> {
        self.lower.into_iter().chain(self.upper)
    }
}

/// A named estimate stream, aligned with the row sequence
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectSeries {
    pub name: String,
    #[serde(default)]
    pub records: Vec<EstimateRecord>,
}

impl EffectSeries {
    pub fn new(name: impl Into<String>, records: Vec<EstimateRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// The record for a row, if one is present
    pub fn record(&self, row: usize) -> Option<&EstimateRecord> {
        self.records.get(row).filter(|r| !r.is_missing())
    }
}

/// Row type tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    /// Study/site row drawn with a line-and-box marker
    Data,
    /// Group heading, no marker
    Header,
    /// Pooled estimate drawn as a diamond
    Summary,
    /// Half-height gap
    Spacer,
}

impl RowKind {
    /// Row height as a multiple of the base row height
    pub fn height_factor(&self) -> f64 {
        match self {
            RowKind::Spacer => 0.5,
            RowKind::Data | RowKind::Header | RowKind::Summary => 1.0,
        }
    }

    /// Whether estimates on this row reach the axis
    pub fn carries_estimates(&self) -> bool {
        match self {
            RowKind::Data | RowKind::Summary => true,
            RowKind::Header | RowKind::Spacer => false,
        }
    }
}

/// A row in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDescriptor {
    pub kind: RowKind,
    /// Group nesting depth, 0 for top level
    #[serde(default)]
    pub depth: u32,
}

impl RowDescriptor {
    pub fn new(kind: RowKind) -> Self {
        Self { kind, depth: 0 }
    }

    pub fn data() -> Self {
        Self::new(RowKind::Data)
    }

    pub fn header() -> Self {
        Self::new(RowKind::Header)
    }

    pub fn summary() -> Self {
        Self::new(RowKind::Summary)
    }

    pub fn spacer() -> Self {
        Self::new(RowKind::Spacer)
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

/// Resolved axis range, always `min < max`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DomainRepr")]
pub struct Domain {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct DomainRepr {
    min: f64,
    max: f64,
}

impl TryFrom<DomainRepr> for Domain {
    type Error = ConfigError;

    fn try_from(repr: DomainRepr) -> Result<Self, Self::Error> {
        Domain::new(repr.min, repr.max)
    }
}

impl Domain {
    /// Create a domain, rejecting non-finite or inverted bounds
    pub fn new(min: f64, max: f64) -> ConfigResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Caller guarantees `min < max`, both finite
    pub(crate) fn from_ordered(min: f64, max: f64) -> Self {
        debug_assert!(min < max, "domain must satisfy min < max: {min} >= {max}");
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Inclusive containment check
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Which way a clipped interval continues off the axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClipDirection {
    TowardLower,
    TowardUpper,
}

/// Classification of one interval endpoint against the clip window
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ClipResult {
    /// Drawn at its own value with a whisker cap
    Visible { value: f64 },
    /// Drawn at the clip boundary with an arrow glyph
    ClippedTo {
        boundary: f64,
        direction: ClipDirection,
    },
}

impl ClipResult {
    /// The value the painter should draw at
    pub fn value(&self) -> f64 {
        match self {
            ClipResult::Visible { value } => *value,
            ClipResult::ClippedTo { boundary, .. } => *boundary,
        }
    }

    pub fn is_clipped(&self) -> bool {
        matches!(self, ClipResult::ClippedTo { .. })
    }

    pub fn direction(&self) -> Option<ClipDirection> {
        match self {
            ClipResult::Visible { .. } => None,
            ClipResult::ClippedTo { direction, .. } => Some(*direction),
        }
    }
}

/// Rows, their effect series, and the null value for one plot
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotInput {
    pub rows: Vec<RowDescriptor>,
    #[serde(default)]
    pub effects: Vec<EffectSeries>,
    #[serde(default)]
    pub null_value: f64,
}

impl PlotInput {
    pub fn new(rows: Vec<RowDescriptor>, effects: Vec<EffectSeries>, null_value: f64) -> Self {
        Self {
            rows,
            effects,
            null_value,
        }
    }

    /// Records that reach the axis, row-major then series order
    pub fn estimates(&self) -> impl Iterator<Item = &EstimateRecord> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.kind.carries_estimates())
            .flat_map(move |(index, _)| self.effects.iter().filter_map(move |s| s.record(index)))
    }

    /// All point estimates that reach the axis
    pub fn points(&self) -> Vec<f64> {
        self.estimates().filter_map(|r| r.point()).collect()
    }

    /// All interval bounds that reach the axis
    pub fn bounds(&self) -> Vec<f64> {
        self.estimates().flat_map(|r| r.bounds()).collect()
    }
}
