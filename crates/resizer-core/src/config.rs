//! Frame configuration: target output size, on-screen display size and zoom limits.
//!
//! A `FrameConfig` is fixed for the lifetime of a session. Every field has a
//! default, so a partially specified config (for example a JS object with only
//! `target_size`) deserializes into a complete one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default side length of the exported square, in pixels.
pub const DEFAULT_TARGET_SIZE: u32 = 1024;

/// Default side length of the on-screen preview box, in CSS pixels.
pub const DEFAULT_DISPLAY_SIZE: f64 = 350.0;

/// Largest accepted side length for the export and preview surfaces.
pub const MAX_FRAME_SIZE: u32 = 16384;

/// Errors reported by [`FrameConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The target frame must be between 1x1 and the maximum frame size.
    #[error("Invalid target size: {0} (must be in 1..=16384)")]
    InvalidTargetSize(u32),

    /// The display box must be positive and no larger than the maximum frame size.
    #[error("Invalid display size: {0} (must be in (0, 16384])")]
    InvalidDisplaySize(f64),

    /// The wheel zoom step must be positive and finite.
    #[error("Invalid wheel step: {0} (must be positive)")]
    InvalidWheelStep(f64),

    /// A zoom range is inverted or not strictly positive.
    #[error("Invalid {name} zoom range: [{min}, {max}]")]
    InvalidZoomRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
}

/// Resampling filter used when compositing the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Bilinear interpolation over the 2x2 neighborhood.
    #[default]
    Bilinear,
    /// Lanczos3 interpolation over the 6x6 neighborhood.
    Lanczos3,
}

/// Target frame and interaction limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Side length of the exported square (`T`).
    pub target_size: u32,
    /// Side length of the on-screen preview box (`D`).
    pub display_size: f64,
    /// Scale change per wheel event.
    pub wheel_step: f64,
    /// Lower bound for wheel zoom.
    pub wheel_min: f64,
    /// Upper bound for wheel zoom.
    pub wheel_max: f64,
    /// Lower bound of the zoom slider.
    pub slider_min: f64,
    /// Upper bound of the zoom slider.
    pub slider_max: f64,
    /// Opaque RGB fill for regions the image does not cover.
    pub background: [u8; 3],
    /// Resampling filter for export and preview.
    pub filter: InterpolationFilter,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            display_size: DEFAULT_DISPLAY_SIZE,
            wheel_step: 0.1,
            wheel_min: 0.1,
            wheel_max: 10.0,
            slider_min: 0.1,
            slider_max: 5.0,
            background: [255, 255, 255],
            filter: InterpolationFilter::Bilinear,
        }
    }
}

impl FrameConfig {
    /// Create the default 1024x1024 configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_size == 0 || self.target_size > MAX_FRAME_SIZE {
            return Err(ConfigError::InvalidTargetSize(self.target_size));
        }
        if !(self.display_size > 0.0 && self.display_size <= MAX_FRAME_SIZE as f64) {
            return Err(ConfigError::InvalidDisplaySize(self.display_size));
        }
        if !(self.wheel_step.is_finite() && self.wheel_step > 0.0) {
            return Err(ConfigError::InvalidWheelStep(self.wheel_step));
        }
        check_range("wheel", self.wheel_min, self.wheel_max)?;
        check_range("slider", self.slider_min, self.slider_max)?;
        Ok(())
    }

    /// Target size as a float, for transform arithmetic.
    #[inline]
    pub fn target(&self) -> f64 {
        self.target_size as f64
    }

    /// Ratio of target pixels to display pixels (`T / D`).
    #[inline]
    pub fn target_per_display(&self) -> f64 {
        self.target() / self.display_size
    }

    /// Ratio of display pixels to target pixels (`D / T`).
    #[inline]
    pub fn display_per_target(&self) -> f64 {
        self.display_size / self.target()
    }
}

fn check_range(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min > 0.0 && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidZoomRange { name, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FrameConfig::new();
        assert_eq!(config.target_size, 1024);
        assert_eq!(config.display_size, 350.0);
        assert_eq!(config.background, [255, 255, 255]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ratios() {
        let config = FrameConfig::new();
        assert!((config.target_per_display() - 1024.0 / 350.0).abs() < 1e-12);
        assert!((config.display_per_target() * config.target_per_display() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_target_rejected() {
        let mut config = FrameConfig::new();
        config.target_size = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTargetSize(0)));
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let mut config = FrameConfig::new();
        config.target_size = u32::MAX;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidTargetSize(u32::MAX))
        );

        config.target_size = MAX_FRAME_SIZE;
        assert!(config.validate().is_ok());
        config.target_size = MAX_FRAME_SIZE + 1;
        assert!(config.validate().is_err());

        config.target_size = DEFAULT_TARGET_SIZE;
        config.display_size = 1e9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDisplaySize(_))
        ));
        config.display_size = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_display_size_rejected() {
        let mut config = FrameConfig::new();
        config.display_size = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDisplaySize(_))
        ));

        config.display_size = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = FrameConfig::new();
        config.slider_min = 6.0;
        match config.validate() {
            Err(ConfigError::InvalidZoomRange { name, .. }) => assert_eq!(name, "slider"),
            other => panic!("Expected InvalidZoomRange, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_step_rejected() {
        let mut config = FrameConfig::new();
        config.wheel_step = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWheelStep(_))
        ));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidZoomRange {
            name: "wheel",
            min: 2.0,
            max: 1.0,
        };
        assert_eq!(err.to_string(), "Invalid wheel zoom range: [2, 1]");
    }
}
