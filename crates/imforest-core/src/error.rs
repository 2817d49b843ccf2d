//! Error types for imforest-core
//!
//! Only configuration can fail. Malformed *data* (missing values, NaN,
//! zero-span estimates, empty plots) never produces an error: the engine
//! falls back to a safe default domain and keeps going.
//!
//! - [`ConfigError`]: invalid axis configuration, reported when the
//!   configuration is built or parsed
//! - [`LayoutError`]: invalid layout options or axis length
//! - [`ForestError`]: umbrella type for the full pipeline

use thiserror::Error;

/// Main error type for imforest operations
#[derive(Error, Debug)]
pub enum ForestError {
    /// Axis configuration errors
    #[error("Invalid axis configuration: {0}")]
    Config(#[from] ConfigError),

    /// Layout option errors
    #[error("Invalid layout options: {0}")]
    Layout(#[from] LayoutError),

    /// JSON encoding/decoding errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors in an axis configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Clip factor below zero
    #[error("clip factor must be non-negative, got {value}")]
    NegativeClipFactor { value: f64 },

    /// NaN or infinite number where a finite one is required
    #[error("{field} must be finite, got {value}")]
    NonFiniteValue { field: &'static str, value: f64 },

    /// Explicit range with `min >= max`
    #[error("range minimum {min} must be less than maximum {max}")]
    InvalidRange { min: f64, max: f64 },

    /// Explicit range bound that a log axis cannot show
    #[error("log scale range bounds must be positive, got {value}")]
    NonPositiveLogRange { value: f64 },

    /// Explicit tick that a log axis cannot show
    #[error("log scale tick values must be positive, got {value}")]
    NonPositiveLogTick { value: f64 },

    /// Unrecognized scale name
    #[error("unknown scale type: {value}")]
    UnknownScale { value: String },

    /// Unrecognized clip factor keyword
    #[error("unknown clip factor keyword: {value}")]
    UnknownClipKeyword { value: String },

    /// Tick count of zero
    #[error("tick count must be at least 1")]
    ZeroTickCount,

    /// Tick count beyond what an axis can usefully show
    #[error("tick count {value} exceeds the maximum of {max}")]
    TooManyTicks { value: u32, max: u32 },

    /// Malformed configuration document
    #[error("failed to parse configuration: {message}")]
    Parse { message: String },
}

/// Errors in layout options
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A size that must be strictly positive
    #[error("{field} must be positive and finite, got {value}")]
    NonPositiveDimension { field: &'static str, value: f64 },

    /// A size that may be zero but not negative
    #[error("{field} must be non-negative and finite, got {value}")]
    NegativeDimension { field: &'static str, value: f64 },
}

/// Result type alias for imforest operations
pub type ForestResult<T> = Result<T, ForestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Validation utilities
pub mod validation {
    use super::*;

    /// Require a finite configuration value
    pub fn require_finite(field: &'static str, value: f64) -> ConfigResult<f64> {
        if !value.is_finite() {
            return Err(ConfigError::NonFiniteValue { field, value });
        }
        Ok(value)
    }

    /// Require a strictly positive, finite layout dimension
    pub fn require_positive(field: &'static str, value: f64) -> LayoutResult<f64> {
        if !value.is_finite() || value <= 0.0 {
            return Err(LayoutError::NonPositiveDimension { field, value });
        }
        Ok(value)
    }

    /// Require a non-negative, finite layout dimension
    pub fn require_non_negative(field: &'static str, value: f64) -> LayoutResult<f64> {
        if !value.is_finite() || value < 0.0 {
            return Err(LayoutError::NegativeDimension { field, value });
        }
        Ok(value)
    }
}
