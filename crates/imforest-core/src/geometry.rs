//! Full plot geometry
//!
//! [`ForestGeometry`] is everything a painter needs: the domain, where
//! intervals are cut, tick marks with their positions, the coordinate
//! mapper, row layout, and per-row marker geometry. Interactive and static renderers both consume this one
//! value, so their output cannot drift apart.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clip::{classify, classify_interval, ClipWindow};
use crate::config::AxisConfig;
use crate::domain::ClipBounds;
use crate::error::{validation, ForestResult};
use crate::layout::{LayoutOptions, RowLayout, RowSlot};
use crate::scale::ScaleMapper;
use crate::shared::SharedAxis;
use crate::types::{ClipResult, Domain, EstimateRecord, PlotInput, RowKind};

/// A tick value and its axis position
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickMark {
    pub value: f64,
    pub position: f64,
}

/// One end of an interval: where to draw it and whether it is clipped
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndpointGeometry {
    pub x: f64,
    pub clip: ClipResult,
}

/// Line-and-box marker for one series on a data row
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntervalGeometry {
    pub series: u32,
    pub y: f64,
    /// Absent when the point is missing or outside the domain
    pub point: Option<f64>,
    pub lower: Option<EndpointGeometry>,
    pub upper: Option<EndpointGeometry>,
    pub fully_outside: bool,
}

/// Summary diamond; `left`/`right` are the interval ends, `center` the point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiamondGeometry {
    pub left: f64,
    pub center: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Markers drawn on one row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowMarks {
    pub row: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intervals: Vec<IntervalGeometry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diamond: Option<DiamondGeometry>,
}

/// Computed geometry for one plot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForestGeometry {
    pub domain: Domain,
    #[serde(default)]
    pub clip_bounds: ClipBounds,
    /// Clipped endpoints are drawn at these values
    pub clip_window: ClipWindow,
    pub ticks: Vec<TickMark>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped_ticks: Vec<f64>,
    pub mapper: ScaleMapper,
    pub layout: RowLayout,
    pub marks: Vec<RowMarks>,
}

impl ForestGeometry {
    /// Resolve the axis for this plot alone and lay it out
    pub fn compute(
        input: &PlotInput,
        config: &AxisConfig,
        options: &LayoutOptions,
        axis_length: f64,
    ) -> ForestResult<Self> {
        Self::compute_with_axis(input, &SharedAxis::for_input(input, config), options, axis_length)
    }

    /// Lay out a plot against an axis resolved elsewhere, e.g. one shared
    /// with sibling subsets
    pub fn compute_with_axis(
        input: &PlotInput,
        axis: &SharedAxis,
        options: &LayoutOptions,
        axis_length: f64,
    ) -> ForestResult<Self> {
        options.validate()?;
        validation::require_positive("axis_length", axis_length)?;

        let domain = axis.domain;
        let window = axis.clip_window();
        let mapper = ScaleMapper::for_axis(domain, &axis.config, axis_length, options.marker_width);
        let ticks = axis
            .ticks
            .iter()
            .map(|&value| TickMark {
                value,
                position: mapper.map(value),
            })
            .collect();

        let layout = RowLayout::compute(&input.rows, options, input.effects.len())?;

        let marks = layout
            .rows
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                row_marks(input, index, slot, &domain, &window, &mapper, options)
            })
            .collect::<Vec<_>>();

        debug!(
            rows = layout.len(),
            marked = marks.len(),
            ticks = axis.ticks.len(),
            "computed forest geometry"
        );

        Ok(Self {
            domain,
            clip_bounds: axis.clip_bounds,
            clip_window: window,
            ticks,
            dropped_ticks: axis.dropped_ticks.clone(),
            mapper,
            layout,
            marks,
        })
    }

    /// Marks for a row, if it has any
    pub fn marks_for_row(&self, row: usize) -> Option<&RowMarks> {
        let index = self.marks.partition_point(|m| (m.row as usize) < row);
        self.marks.get(index).filter(|m| m.row as usize == row)
    }
}

fn row_marks(
    input: &PlotInput,
    index: usize,
    slot: &RowSlot,
    domain: &Domain,
    window: &ClipWindow,
    mapper: &ScaleMapper,
    options: &LayoutOptions,
) -> Option<RowMarks> {
    let marks = match slot.kind {
        RowKind::Data => RowMarks {
            row: index as u32,
            intervals: input
                .effects
                .iter()
                .enumerate()
                .filter_map(|(series, effect)| {
                    let record = effect.record(index)?;
                    let offset = slot.series_offsets.get(series).copied().unwrap_or(0.0);
                    Some(interval(
                        record,
                        series as u32,
                        slot.center() + offset,
                        domain,
                        window,
                        mapper,
                    ))
                })
                .collect(),
            diamond: None,
        },
        RowKind::Summary => RowMarks {
            row: index as u32,
            intervals: Vec::new(),
            diamond: input
                .effects
                .iter()
                .filter_map(|effect| effect.record(index))
                .find(|record| record.point().is_some())
                .and_then(|record| diamond(record, slot, window, mapper, options)),
        },
        RowKind::Header | RowKind::Spacer => return None,
    };

    if marks.intervals.is_empty() && marks.diamond.is_none() {
        return None;
    }
    Some(marks)
}

fn interval(
    record: &EstimateRecord,
    series: u32,
    y: f64,
    domain: &Domain,
    window: &ClipWindow,
    mapper: &ScaleMapper,
) -> IntervalGeometry {
    let clip = classify_interval(record, window);
    let endpoint = |c: ClipResult| EndpointGeometry {
        x: mapper.map(c.value()),
        clip: c,
    };
    IntervalGeometry {
        series,
        y,
        point: record
            .point()
            .filter(|&p| domain.contains(p))
            .map(|p| mapper.map(p)),
        lower: clip.lower.map(endpoint),
        upper: clip.upper.map(endpoint),
        fully_outside: clip.fully_outside,
    }
}

fn diamond(
    record: &EstimateRecord,
    slot: &RowSlot,
    window: &ClipWindow,
    mapper: &ScaleMapper,
    options: &LayoutOptions,
) -> Option<DiamondGeometry> {
    let point = record.point()?;
    let at = |value: f64| mapper.map(classify(value, window).value());
    let center = at(point);
    let half = options.summary_height / 2.0;
    Some(DiamondGeometry {
        left: record.lower().map(at).unwrap_or(center),
        center,
        right: record.upper().map(at).unwrap_or(center),
        top: slot.center() - half,
        bottom: slot.center() + half,
    })
}
