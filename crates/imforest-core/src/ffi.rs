//! FFI bindings for Swift/Kotlin hosts and headless exporters.
//!
//! Requests and results cross the boundary as JSON documents using the same
//! serde representation as the Rust types, so every host runs exactly the
//! code the Rust renderer runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AxisConfig;
use crate::domain::resolve_domain;
use crate::error::ForestError;
use crate::geometry::ForestGeometry;
use crate::layout::LayoutOptions;
use crate::shared::{SharedAxis, SharedAxisRequest};
use crate::types::{Domain, PlotInput};

/// FFI-safe resolved domain
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct DomainFfi {
    pub min: f64,
    pub max: f64,
}

impl From<Domain> for DomainFfi {
    fn from(domain: Domain) -> Self {
        Self {
            min: domain.min(),
            max: domain.max(),
        }
    }
}

/// FFI-safe shared axis
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct AxisFfi {
    pub domain: DomainFfi,
    /// Where interval endpoints are cut; inside the domain or on its edges
    pub clip_lower: f64,
    pub clip_upper: f64,
    pub ticks: Vec<f64>,
    /// Explicit tick values that fell outside the domain
    pub dropped_ticks: Vec<f64>,
    pub null_value: f64,
    /// `"linear"` or `"log"`
    pub scale: String,
}

impl From<SharedAxis> for AxisFfi {
    fn from(axis: SharedAxis) -> Self {
        let window = axis.clip_window();
        Self {
            domain: axis.domain.into(),
            clip_lower: window.lower,
            clip_upper: window.upper,
            ticks: axis.ticks,
            dropped_ticks: axis.dropped_ticks,
            null_value: axis.null_value,
            scale: axis.config.scale().to_string(),
        }
    }
}

/// FFI-safe error type
#[derive(Clone, Debug, PartialEq, Error)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum ForestErrorFfi {
    #[error("Invalid axis configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid layout options: {message}")]
    InvalidLayout { message: String },

    #[error("JSON error: {message}")]
    Json { message: String },
}

impl From<ForestError> for ForestErrorFfi {
    fn from(err: ForestError) -> Self {
        match err {
            ForestError::Config(e) => ForestErrorFfi::InvalidConfig {
                message: e.to_string(),
            },
            ForestError::Layout(e) => ForestErrorFfi::InvalidLayout {
                message: e.to_string(),
            },
            ForestError::Serialization(e) => ForestErrorFfi::Json {
                message: e.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for ForestErrorFfi {
    fn from(err: serde_json::Error) -> Self {
        ForestError::from(err).into()
    }
}

/// Single-plot geometry request
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeometryRequest {
    pub input: PlotInput,
    #[serde(default)]
    pub config: AxisConfig,
    #[serde(default)]
    pub layout: LayoutOptions,
    pub axis_length: f64,
}

/// Compute full plot geometry from a JSON [`GeometryRequest`], returning the
/// serialized [`ForestGeometry`]
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn compute_forest_geometry_json(request_json: String) -> Result<String, ForestErrorFfi> {
    let request: GeometryRequest = serde_json::from_str(&request_json)?;
    let geometry = ForestGeometry::compute(
        &request.input,
        &request.config,
        &request.layout,
        request.axis_length,
    )?;
    Ok(serde_json::to_string(&geometry)?)
}

/// Resolve one axis for every subset of a JSON [`SharedAxisRequest`]
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn resolve_shared_axis_json(request_json: String) -> Result<AxisFfi, ForestErrorFfi> {
    let request: SharedAxisRequest = serde_json::from_str(&request_json)?;
    Ok(request.resolve().into())
}

/// Resolve a domain from raw values and a JSON axis configuration
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn resolve_domain_ffi(
    points: Vec<f64>,
    bounds: Vec<f64>,
    null_value: f64,
    config_json: String,
) -> Result<DomainFfi, ForestErrorFfi> {
    let config = AxisConfig::from_json(&config_json).map_err(ForestError::from)?;
    Ok(resolve_domain(&points, &bounds, null_value, &config).into())
}
