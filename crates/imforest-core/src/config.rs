//! Axis configuration
//!
//! [`AxisConfig`] is an immutable, validated value. It is built through
//! [`AxisConfigBuilder`], parsed from JSON, or derived from an existing
//! configuration with [`AxisConfig::merge`]; every path runs the same
//! validation, so an `AxisConfig` in hand is always usable.

use serde::{Deserialize, Serialize};

use crate::error::{validation, ConfigError, ConfigResult};
use crate::types::ScaleType;

/// Target number of generated ticks
pub const DEFAULT_TICK_COUNT: u32 = 5;

/// Largest tick count a configuration may ask for
pub const MAX_TICK_COUNT: u32 = 100;

/// Clip factor used when none is configured
pub const DEFAULT_CLIP_FACTOR: f64 = 3.0;

/// How far beyond the estimate range an interval may extend the axis
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ClipFactorSetting", into = "ClipFactorSetting")]
pub enum ClipFactor {
    /// Multiplier (log) or span fraction (linear)
    Factor(f64),
    /// Intervals always extend the axis
    Never,
}

impl Default for ClipFactor {
    fn default() -> Self {
        ClipFactor::Factor(DEFAULT_CLIP_FACTOR)
    }
}

impl ClipFactor {
    /// Validate a numeric clip factor; `+inf` means "never clip"
    pub fn new(value: f64) -> ConfigResult<Self> {
        if value.is_nan() {
            return Err(ConfigError::NonFiniteValue {
                field: "clip_factor",
                value,
            });
        }
        if value < 0.0 {
            return Err(ConfigError::NegativeClipFactor { value });
        }
        if value.is_infinite() {
            return Ok(ClipFactor::Never);
        }
        Ok(ClipFactor::Factor(value))
    }

    /// The finite factor, `None` when clipping is disabled
    pub fn value(&self) -> Option<f64> {
        match self {
            ClipFactor::Factor(v) => Some(*v),
            ClipFactor::Never => None,
        }
    }
}

/// Wire form of a clip factor: a number, or the keyword `"never"`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClipFactorSetting {
    Number(f64),
    Keyword(String),
}

impl TryFrom<ClipFactorSetting> for ClipFactor {
    type Error = ConfigError;

    fn try_from(setting: ClipFactorSetting) -> Result<Self, Self::Error> {
        match setting {
            ClipFactorSetting::Number(value) => ClipFactor::new(value),
            ClipFactorSetting::Keyword(word) => match word.trim().to_ascii_lowercase().as_str() {
                "never" | "none" | "inf" | "infinity" => Ok(ClipFactor::Never),
                _ => Err(ConfigError::UnknownClipKeyword { value: word }),
            },
        }
    }
}

impl From<ClipFactor> for ClipFactorSetting {
    fn from(factor: ClipFactor) -> Self {
        match factor {
            ClipFactor::Factor(value) => ClipFactorSetting::Number(value),
            ClipFactor::Never => ClipFactorSetting::Keyword("never".to_string()),
        }
    }
}

/// Validated axis configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "AxisSettings", try_from = "AxisSettings")]
pub struct AxisConfig {
    range_min: Option<f64>,
    range_max: Option<f64>,
    tick_values: Vec<f64>,
    tick_count: u32,
    scale: ScaleType,
    clip_factor: ClipFactor,
    include_null: bool,
    symmetric: bool,
    null_tick: bool,
    marker_margin: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            range_min: None,
            range_max: None,
            tick_values: Vec::new(),
            tick_count: DEFAULT_TICK_COUNT,
            scale: ScaleType::Linear,
            clip_factor: ClipFactor::default(),
            include_null: true,
            symmetric: false,
            null_tick: false,
            marker_margin: false,
        }
    }
}

impl AxisConfig {
    /// Default linear axis
    pub fn linear() -> Self {
        Self::default()
    }

    /// Default log axis
    pub fn log() -> Self {
        Self {
            scale: ScaleType::Log,
            ..Self::default()
        }
    }

    pub fn builder() -> AxisConfigBuilder {
        AxisConfigBuilder::default()
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let settings: AxisSettings =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse {
                message: e.to_string(),
            })?;
        AxisConfig::try_from(settings)
    }

    pub fn to_json(&self) -> String {
        // AxisSettings holds only strings, numbers and booleans
        serde_json::to_string(&AxisSettings::from(self.clone())).unwrap_or_default()
    }

    /// A new configuration with every `Some` override applied, validated
    /// as a whole. `self` is left untouched.
    pub fn merge(&self, overrides: &AxisOverrides) -> ConfigResult<Self> {
        let mut next = self.clone();
        if let Some(v) = overrides.range_min {
            next.range_min = Some(v);
        }
        if let Some(v) = overrides.range_max {
            next.range_max = Some(v);
        }
        if let Some(values) = &overrides.tick_values {
            next.tick_values = values.clone();
        }
        if let Some(v) = overrides.tick_count {
            next.tick_count = v;
        }
        if let Some(v) = overrides.scale {
            next.scale = v;
        }
        if let Some(v) = overrides.clip_factor {
            next.clip_factor = v;
        }
        if let Some(v) = overrides.include_null {
            next.include_null = v;
        }
        if let Some(v) = overrides.symmetric {
            next.symmetric = v;
        }
        if let Some(v) = overrides.null_tick {
            next.null_tick = v;
        }
        if let Some(v) = overrides.marker_margin {
            next.marker_margin = v;
        }
        next.validated()
    }

    fn validated(mut self) -> ConfigResult<Self> {
        if let Some(v) = self.range_min {
            validation::require_finite("range_min", v)?;
        }
        if let Some(v) = self.range_max {
            validation::require_finite("range_max", v)?;
        }
        if let (Some(min), Some(max)) = (self.range_min, self.range_max) {
            if min >= max {
                return Err(ConfigError::InvalidRange { min, max });
            }
        }
        for &value in &self.tick_values {
            validation::require_finite("tick_values", value)?;
        }
        if self.tick_count == 0 {
            return Err(ConfigError::ZeroTickCount);
        }
        if self.tick_count > MAX_TICK_COUNT {
            return Err(ConfigError::TooManyTicks {
                value: self.tick_count,
                max: MAX_TICK_COUNT,
            });
        }
        if let ClipFactor::Factor(value) = self.clip_factor {
            self.clip_factor = ClipFactor::new(value)?;
        }

        if self.scale == ScaleType::Log {
            for value in [self.range_min, self.range_max].into_iter().flatten() {
                if value <= 0.0 {
                    return Err(ConfigError::NonPositiveLogRange { value });
                }
            }
            if let Some(&value) = self.tick_values.iter().find(|v| **v <= 0.0) {
                return Err(ConfigError::NonPositiveLogTick { value });
            }
        }

        Ok(self)
    }

    pub fn range_min(&self) -> Option<f64> {
        self.range_min
    }

    pub fn range_max(&self) -> Option<f64> {
        self.range_max
    }

    /// Both range bounds, when the whole range is overridden
    pub fn explicit_range(&self) -> Option<(f64, f64)> {
        self.range_min.zip(self.range_max)
    }

    pub fn tick_values(&self) -> &[f64] {
        &self.tick_values
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn scale(&self) -> ScaleType {
        self.scale
    }

    pub fn clip_factor(&self) -> ClipFactor {
        self.clip_factor
    }

    pub fn include_null(&self) -> bool {
        self.include_null
    }

    pub fn symmetric(&self) -> bool {
        self.symmetric
    }

    pub fn null_tick(&self) -> bool {
        self.null_tick
    }

    pub fn marker_margin(&self) -> bool {
        self.marker_margin
    }
}

/// Builder for [`AxisConfig`]; validation happens in [`build`](Self::build)
#[derive(Clone, Debug, Default)]
pub struct AxisConfigBuilder {
    config: AxisConfig,
}

impl AxisConfigBuilder {
    /// Override the whole range, bypassing domain computation
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.config.range_min = Some(min);
        self.config.range_max = Some(max);
        self
    }

    pub fn with_range_min(mut self, min: f64) -> Self {
        self.config.range_min = Some(min);
        self
    }

    pub fn with_range_max(mut self, max: f64) -> Self {
        self.config.range_max = Some(max);
        self
    }

    pub fn with_tick_values(mut self, values: impl Into<Vec<f64>>) -> Self {
        self.config.tick_values = values.into();
        self
    }

    pub fn with_tick_count(mut self, count: u32) -> Self {
        self.config.tick_count = count;
        self
    }

    pub fn with_scale(mut self, scale: ScaleType) -> Self {
        self.config.scale = scale;
        self
    }

    pub fn with_log_scale(self) -> Self {
        self.with_scale(ScaleType::Log)
    }

    /// Set a numeric clip factor; `f64::INFINITY` disables clipping
    pub fn with_clip_factor(mut self, factor: f64) -> Self {
        self.config.clip_factor = if factor == f64::INFINITY {
            ClipFactor::Never
        } else {
            ClipFactor::Factor(factor)
        };
        self
    }

    pub fn without_clipping(mut self) -> Self {
        self.config.clip_factor = ClipFactor::Never;
        self
    }

    pub fn with_include_null(mut self, include: bool) -> Self {
        self.config.include_null = include;
        self
    }

    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.config.symmetric = symmetric;
        self
    }

    pub fn with_null_tick(mut self, null_tick: bool) -> Self {
        self.config.null_tick = null_tick;
        self
    }

    pub fn with_marker_margin(mut self, marker_margin: bool) -> Self {
        self.config.marker_margin = marker_margin;
        self
    }

    pub fn build(self) -> ConfigResult<AxisConfig> {
        self.config.validated()
    }
}

/// Partial configuration; `None` fields leave the base value alone
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOverrides {
    pub range_min: Option<f64>,
    pub range_max: Option<f64>,
    pub tick_values: Option<Vec<f64>>,
    pub tick_count: Option<u32>,
    pub scale: Option<ScaleType>,
    pub clip_factor: Option<ClipFactor>,
    pub include_null: Option<bool>,
    pub symmetric: Option<bool>,
    pub null_tick: Option<bool>,
    pub marker_margin: Option<bool>,
}

/// Serialized form of [`AxisConfig`]; missing fields take the defaults
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisSettings {
    pub range_min: Option<f64>,
    pub range_max: Option<f64>,
    pub tick_values: Vec<f64>,
    pub tick_count: u32,
    pub scale: String,
    pub clip_factor: ClipFactorSetting,
    pub include_null: bool,
    pub symmetric: bool,
    pub null_tick: bool,
    pub marker_margin: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        AxisSettings::from(AxisConfig::default())
    }
}

impl From<AxisConfig> for AxisSettings {
    fn from(config: AxisConfig) -> Self {
        Self {
            range_min: config.range_min,
            range_max: config.range_max,
            tick_values: config.tick_values,
            tick_count: config.tick_count,
            scale: config.scale.to_string(),
            clip_factor: config.clip_factor.into(),
            include_null: config.include_null,
            symmetric: config.symmetric,
            null_tick: config.null_tick,
            marker_margin: config.marker_margin,
        }
    }
}

impl TryFrom<AxisSettings> for AxisConfig {
    type Error = ConfigError;

    fn try_from(settings: AxisSettings) -> Result<Self, Self::Error> {
        AxisConfig {
            range_min: settings.range_min,
            range_max: settings.range_max,
            tick_values: settings.tick_values,
            tick_count: settings.tick_count,
            scale: settings.scale.parse()?,
            clip_factor: ClipFactor::try_from(settings.clip_factor)?,
            include_null: settings.include_null,
            symmetric: settings.symmetric,
            null_tick: settings.null_tick,
            marker_margin: settings.marker_margin,
        }
        .validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AxisConfig::builder().build().unwrap();
        assert_eq!(config, AxisConfig::default());
        assert_eq!(config.tick_count(), DEFAULT_TICK_COUNT);
        assert_eq!(config.clip_factor(), ClipFactor::Factor(DEFAULT_CLIP_FACTOR));
        assert!(config.include_null());
    }

    #[test]
    fn test_negative_clip_factor_rejected() {
        let err = AxisConfig::builder().with_clip_factor(-0.5).build().unwrap_err();
        assert_eq!(err, ConfigError::NegativeClipFactor { value: -0.5 });
    }

    #[test]
    fn test_zero_clip_factor_allowed_on_linear() {
        let config = AxisConfig::builder().with_clip_factor(0.0).build().unwrap();
        assert_eq!(config.clip_factor().value(), Some(0.0));
    }

    #[test]
    fn test_infinite_clip_factor_is_never() {
        let config = AxisConfig::builder()
            .with_clip_factor(f64::INFINITY)
            .build()
            .unwrap();
        assert_eq!(config.clip_factor(), ClipFactor::Never);
        assert_eq!(ClipFactor::new(f64::INFINITY), Ok(ClipFactor::Never));
    }

    #[test]
    fn test_small_clip_factor_allowed_on_log() {
        let config = AxisConfig::builder()
            .with_log_scale()
            .with_clip_factor(0.5)
            .build()
            .unwrap();
        assert_eq!(config.clip_factor(), ClipFactor::Factor(0.5));
        assert!(AxisConfig::from_json(r#"{"scale": "log", "clip_factor": 0}"#).is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = AxisConfig::builder().with_range(2.0, 1.0).build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidRange { min: 2.0, max: 1.0 });
        assert!(AxisConfig::builder().with_range(1.0, 1.0).build().is_err());
    }

    #[test]
    fn test_log_range_must_be_positive() {
        let err = AxisConfig::builder()
            .with_log_scale()
            .with_range_min(0.0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveLogRange { value: 0.0 });
    }

    #[test]
    fn test_zero_tick_count_rejected() {
        assert_eq!(
            AxisConfig::builder().with_tick_count(0).build(),
            Err(ConfigError::ZeroTickCount)
        );
    }

    #[test]
    fn test_tick_count_capped() {
        assert!(AxisConfig::builder().with_tick_count(MAX_TICK_COUNT).build().is_ok());
        assert_eq!(
            AxisConfig::builder().with_tick_count(u32::MAX).build(),
            Err(ConfigError::TooManyTicks {
                value: u32::MAX,
                max: MAX_TICK_COUNT
            })
        );

        let err = AxisConfig::from_json(r#"{"tick_count": 5000}"#).unwrap_err();
        assert_eq!(err, ConfigError::TooManyTicks { value: 5000, max: MAX_TICK_COUNT });
    }

    #[test]
    fn test_merge_leaves_base_untouched() {
        let base = AxisConfig::log();
        let merged = base
            .merge(&AxisOverrides {
                range_min: Some(0.25),
                null_tick: Some(true),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(base.range_min(), None);
        assert_eq!(merged.range_min(), Some(0.25));
        assert_eq!(merged.range_max(), None);
        assert!(merged.null_tick());
        assert_eq!(merged.scale(), ScaleType::Log);
    }

    #[test]
    fn test_merge_validates_combined_result() {
        let base = AxisConfig::builder().with_range_max(1.0).build().unwrap();
        let err = base
            .merge(&AxisOverrides {
                range_min: Some(5.0),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidRange { min: 5.0, max: 1.0 });
    }

    #[test]
    fn test_merge_scale_switch_checks_range() {
        let base = AxisConfig::builder().with_range(-1.0, 1.0).build().unwrap();
        let err = base
            .merge(&AxisOverrides {
                scale: Some(ScaleType::Log),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveLogRange { value: -1.0 });
    }

    #[test]
    fn test_from_json_defaults() {
        let config = AxisConfig::from_json(r#"{"scale": "log"}"#).unwrap();
        assert_eq!(config.scale(), ScaleType::Log);
        assert_eq!(config.tick_count(), DEFAULT_TICK_COUNT);
    }

    #[test]
    fn test_from_json_unknown_scale() {
        let err = AxisConfig::from_json(r#"{"scale": "sqrt"}"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownScale {
                value: "sqrt".to_string()
            }
        );
    }

    #[test]
    fn test_from_json_clip_keyword() {
        let config = AxisConfig::from_json(r#"{"clip_factor": "never"}"#).unwrap();
        assert_eq!(config.clip_factor(), ClipFactor::Never);

        let err = AxisConfig::from_json(r#"{"clip_factor": "sometimes"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownClipKeyword { .. }));

        let err = AxisConfig::from_json(r#"{"clip_factor": -1}"#).unwrap_err();
        assert_eq!(err, ConfigError::NegativeClipFactor { value: -1.0 });
    }

    #[test]
    fn test_from_json_unknown_field() {
        let err = AxisConfig::from_json(r#"{"rangeMin": 1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_json_round_trip_through_serde() {
        let config = AxisConfig::builder()
            .with_log_scale()
            .with_tick_values(vec![0.5, 1.0, 2.0])
            .without_clipping()
            .with_symmetric(true)
            .build()
            .unwrap();
        let json = config.to_json();
        assert!(json.contains("\"never\""));
        let parsed: AxisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
