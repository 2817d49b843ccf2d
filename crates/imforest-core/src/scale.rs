//! Data value to axis position mapping

use serde::{Deserialize, Serialize};

use crate::config::AxisConfig;
use crate::types::{Domain, ScaleType};

/// Maps data values onto `[0, output_length]`
///
/// With a marker margin, one marker width is reserved: positions run from
/// `margin / 2` to `output_length - margin / 2`, so markers at the domain
/// edges stay fully inside the drawing area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleMapper {
    domain: Domain,
    scale: ScaleType,
    output_length: f64,
    #[serde(default)]
    margin: f64,
}

impl ScaleMapper {
    pub fn new(domain: Domain, scale: ScaleType, output_length: f64) -> Self {
        Self {
            domain,
            scale,
            output_length,
            margin: 0.0,
        }
    }

    /// Reserve one marker width, split between both ends
    pub fn with_marker_margin(mut self, marker_width: f64) -> Self {
        self.margin = marker_width.clamp(0.0, self.output_length.max(0.0));
        self
    }

    /// Mapper for an axis, honoring the configuration's marker margin flag
    pub fn for_axis(domain: Domain, config: &AxisConfig, output_length: f64, marker_width: f64) -> Self {
        let mapper = Self::new(domain, config.scale(), output_length);
        if config.marker_margin() {
            mapper.with_marker_margin(marker_width)
        } else {
            mapper
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn scale(&self) -> ScaleType {
        self.scale
    }

    pub fn output_length(&self) -> f64 {
        self.output_length
    }

    /// Position of `domain.min`
    pub fn start(&self) -> f64 {
        self.margin / 2.0
    }

    /// Position of `domain.max`
    pub fn end(&self) -> f64 {
        self.start() + self.effective_length()
    }

    fn effective_length(&self) -> f64 {
        self.output_length - self.margin
    }

    /// Fraction of the domain at `value`; log values below the minimum clamp
    /// to it
    pub fn normalize(&self, value: f64) -> f64 {
        let (min, max) = (self.domain.min(), self.domain.max());
        match self.scale {
            // Halving is exact and keeps spans near f64::MAX finite
            ScaleType::Linear => (value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0),
            ScaleType::Log => {
                let clamped = value.max(min);
                (clamped.ln() - min.ln()) / (max.ln() - min.ln())
            }
        }
    }

    /// Value at a domain fraction
    pub fn denormalize(&self, fraction: f64) -> f64 {
        let (min, max) = (self.domain.min(), self.domain.max());
        match self.scale {
            ScaleType::Linear => (min / 2.0 + fraction * (max / 2.0 - min / 2.0)) * 2.0,
            ScaleType::Log => (min.ln() + fraction * (max.ln() - min.ln())).exp(),
        }
    }

    /// Axis position of a data value
    pub fn map(&self, value: f64) -> f64 {
        self.start() + self.normalize(value) * self.effective_length()
    }

    /// Data value at an axis position
    pub fn invert(&self, position: f64) -> f64 {
        let length = self.effective_length();
        if length <= 0.0 {
            return self.domain.min();
        }
        self.denormalize((position - self.start()) / length)
    }
}
