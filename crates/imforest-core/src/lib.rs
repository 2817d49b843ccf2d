//! imforest-core - Axis domain and row layout engine for forest plots
//!
//! A forest plot lists studies, sites or groups as rows, each with a point
//! estimate and confidence interval drawn against a shared numeric axis.
//! This crate decides what that axis spans and where everything sits on it.
//! It is a pure function from rows, effect series and configuration to
//! geometry, shared by the interactive renderer and the static exporter.
//!
//! # Key Components
//!
//! - **nice**: Snaps raw ranges outward to clean linear or log bounds
//! - **domain**: Resolves the axis domain with null inclusion and clip factors
//! - **clip**: Classifies interval endpoints as visible or cut at a clip boundary
//! - **ticks**: Explicit or generated tick values within the domain
//! - **scale**: Maps data values to axis positions and back
//! - **layout**: Vertical row positions, spacer rows and stacked series
//! - **shared**: One axis pooled across several sub-plots
//! - **geometry**: The full pipeline, producing everything a painter needs
//!
//! # Example
//!
//! ```
//! use imforest_core::{AxisConfig, EffectSeries, EstimateRecord, ForestGeometry};
//! use imforest_core::{LayoutOptions, PlotInput, RowDescriptor};
//!
//! let input = PlotInput::new(
//!     vec![RowDescriptor::data(), RowDescriptor::data()],
//!     vec![EffectSeries::new(
//!         "odds ratio",
//!         vec![
//!             EstimateRecord::from_values(0.8, 0.6, 1.1),
//!             EstimateRecord::from_values(1.3, 0.9, 1.9),
//!         ],
//!     )],
//!     1.0,
//! );
//! let geometry = ForestGeometry::compute(
//!     &input,
//!     &AxisConfig::log(),
//!     &LayoutOptions::default(),
//!     400.0,
//! )?;
//! assert!(geometry.domain.contains(0.6) && geometry.domain.contains(1.9));
//! # Ok::<(), imforest_core::ForestError>(())
//! ```

pub mod clip;
pub mod config;
pub mod domain;
pub mod error;
pub mod ffi;
pub mod geometry;
pub mod layout;
pub mod nice;
pub mod scale;
pub mod shared;
pub mod ticks;
pub mod types;

pub use clip::{classify, classify_interval, ClipWindow, IntervalClip};
pub use config::{AxisConfig, AxisConfigBuilder, AxisOverrides, AxisSettings, ClipFactor};
pub use domain::{resolve_domain, resolve_domain_detailed, ClipBounds, DomainResolution, DomainSource};
pub use error::{ConfigError, ConfigResult, ForestError, ForestResult, LayoutError, LayoutResult};
pub use ffi::{AxisFfi, DomainFfi, ForestErrorFfi};
pub use geometry::{
    DiamondGeometry, EndpointGeometry, ForestGeometry, IntervalGeometry, RowMarks, TickMark,
};
pub use layout::{series_offsets, LayoutOptions, MarkerShape, RowLayout, RowSlot};
pub use nice::snap;
pub use scale::ScaleMapper;
pub use shared::{SharedAxis, SharedAxisRequest};
pub use ticks::{generate_ticks, tick_set, TickSet};
pub use types::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
