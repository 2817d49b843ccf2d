//! Vertical row layout
//!
//! Rows stack top to bottom in display order. Spacer rows take half the base
//! height; every other row takes the full base height. Rows with several
//! effect series spread them symmetrically around the row center.

use serde::{Deserialize, Serialize};

use crate::error::{validation, LayoutResult};
use crate::types::{RowDescriptor, RowKind};

/// Default row height in layout units
pub const DEFAULT_ROW_HEIGHT: f64 = 24.0;

/// Default vertical distance between stacked effect series
pub const DEFAULT_SERIES_SPACING: f64 = 6.0;

/// Default summary diamond height
pub const DEFAULT_SUMMARY_HEIGHT: f64 = 10.0;

/// Default point marker width
pub const DEFAULT_MARKER_WIDTH: f64 = 8.0;

/// Default indentation per group nesting level
pub const DEFAULT_INDENT_WIDTH: f64 = 12.0;

/// Sizes that drive row layout and marker geometry
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub base_height: f64,
    pub series_spacing: f64,
    pub summary_height: f64,
    pub marker_width: f64,
    pub indent_width: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            base_height: DEFAULT_ROW_HEIGHT,
            series_spacing: DEFAULT_SERIES_SPACING,
            summary_height: DEFAULT_SUMMARY_HEIGHT,
            marker_width: DEFAULT_MARKER_WIDTH,
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl LayoutOptions {
    pub fn with_base_height(mut self, height: f64) -> Self {
        self.base_height = height;
        self
    }

    pub fn with_series_spacing(mut self, spacing: f64) -> Self {
        self.series_spacing = spacing;
        self
    }

    pub fn with_summary_height(mut self, height: f64) -> Self {
        self.summary_height = height;
        self
    }

    pub fn with_marker_width(mut self, width: f64) -> Self {
        self.marker_width = width;
        self
    }

    pub fn with_indent_width(mut self, width: f64) -> Self {
        self.indent_width = width;
        self
    }

    pub fn validate(&self) -> LayoutResult<()> {
        validation::require_positive("base_height", self.base_height)?;
        validation::require_non_negative("series_spacing", self.series_spacing)?;
        validation::require_non_negative("summary_height", self.summary_height)?;
        validation::require_non_negative("marker_width", self.marker_width)?;
        validation::require_non_negative("indent_width", self.indent_width)?;
        Ok(())
    }
}

/// How a row's estimates are drawn
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum MarkerShape {
    /// Header and spacer rows
    Hidden,
    /// Whisker line with a point box, one per series
    LineAndBox,
    /// Single pooled-estimate diamond
    Diamond { height: f64 },
}

/// Geometry of one row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowSlot {
    pub kind: RowKind,
    pub depth: u32,
    pub y_position: f64,
    pub height: f64,
    pub indent: f64,
    /// Vertical offset of each series from the row center
    pub series_offsets: Vec<f64>,
    pub marker: MarkerShape,
}

impl RowSlot {
    pub fn center(&self) -> f64 {
        self.y_position + self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y_position + self.height
    }
}

/// Row geometry for a whole plot, rebuilt whenever rows or sizes change
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowLayout {
    pub rows: Vec<RowSlot>,
    pub total_height: f64,
}

impl RowLayout {
    /// Lay out rows with the default sizes and one series per row
    pub fn layout(rows: &[RowDescriptor], base_height: f64) -> LayoutResult<Self> {
        let options = LayoutOptions::default().with_base_height(base_height);
        Self::compute(rows, &options, 1)
    }

    /// Lay out rows that each carry `series_count` effect series
    pub fn compute(rows: &[RowDescriptor], options: &LayoutOptions, series_count: usize) -> LayoutResult<Self> {
        options.validate()?;

        let data_offsets = series_offsets(series_count, options.series_spacing);
        let mut y = 0.0;
        let slots = rows
            .iter()
            .map(|row| {
                let height = options.base_height * row.kind.height_factor();
                let (series_offsets, marker) = match row.kind {
                    RowKind::Data => (data_offsets.clone(), MarkerShape::LineAndBox),
                    RowKind::Summary => (
                        vec![0.0],
                        MarkerShape::Diamond {
                            height: options.summary_height,
                        },
                    ),
                    RowKind::Header | RowKind::Spacer => (Vec::new(), MarkerShape::Hidden),
                };
                let slot = RowSlot {
                    kind: row.kind,
                    depth: row.depth,
                    y_position: y,
                    height,
                    indent: f64::from(row.depth) * options.indent_width,
                    series_offsets,
                    marker,
                };
                y += height;
                slot
            })
            .collect();

        Ok(Self {
            rows: slots,
            total_height: y,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn y_positions(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.y_position).collect()
    }

    pub fn heights(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.height).collect()
    }

    /// Index of the row covering vertical position `y`
    pub fn row_at(&self, y: f64) -> Option<usize> {
        if !(0.0..self.total_height).contains(&y) {
            return None;
        }
        let index = self.rows.partition_point(|r| r.y_position <= y);
        index.checked_sub(1)
    }
}

/// Offsets `(i - (n - 1) / 2) × spacing` for `n` series, top to bottom
pub fn series_offsets(count: usize, spacing: f64) -> Vec<f64> {
    let middle = count.saturating_sub(1) as f64 / 2.0;
    (0..count).map(|i| (i as f64 - middle) * spacing).collect()
}
