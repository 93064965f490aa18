//! Viewport transform: the mapping from source-image pixels to target-frame pixels.
//!
//! The mapping is a uniform scale followed by a translation:
//!
//! ```text
//! target = offset + scale * source
//! ```
//!
//! # Coordinate System
//!
//! - Source space: pixels of the decoded image, origin top-left
//! - Target space: pixels of the `T x T` export frame, origin top-left
//! - Display space: pointer coordinates on screen; a display delta maps to
//!   a target delta through the ratio `T / D`
//!
//! Every operation is a pure function returning a new value. Zooming only
//! changes `scale`, so it scales around the frame's top-left corner rather
//! than around the pointer or the frame center.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::config::FrameConfig;

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Uniform scale plus translation from source to target space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    /// Uniform scale factor (always positive).
    pub scale: f64,
    /// Target-space position of the source image's top-left corner.
    pub offset: Point,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ZERO,
        }
    }
}

impl ViewportTransform {
    /// Create a transform from raw components.
    pub fn new(scale: f64, offset: Point) -> Self {
        Self { scale, offset }
    }

    /// "Cover" fit of a `width x height` image into a `target x target` frame.
    ///
    /// Picks the smallest scale at which the image covers the whole frame and
    /// centers the scaled image:
    ///
    /// ```text
    /// scale  = max(T / W, T / H)
    /// offset = ((T - W * scale) / 2, (T - H * scale) / 2)
    /// ```
    ///
    /// Both dimensions must be non-zero.
    pub fn cover(width: u32, height: u32, target: f64) -> Self {
        let (w, h) = (width as f64, height as f64);
        let scale = (target / w).max(target / h);
        let offset = Point::new((target - w * scale) / 2.0, (target - h * scale) / 2.0);
        Self { scale, offset }
    }

    /// Cover fit for the configured target frame.
    pub fn cover_frame(width: u32, height: u32, config: &FrameConfig) -> Self {
        Self::cover(width, height, config.target())
    }

    /// Map a source-space point into target space.
    #[inline]
    pub fn map_point(&self, source: Point) -> Point {
        self.offset + source * self.scale
    }

    /// Map a target-space point back into source space.
    #[inline]
    pub fn unmap_point(&self, target: Point) -> Point {
        let local = target - self.offset;
        Point::new(local.x / self.scale, local.y / self.scale)
    }

    /// One wheel event: step by `-sign(delta_y) * wheel_step`, clamped to
    /// the wheel range. A zero or non-finite delta leaves the scale alone.
    pub fn zoom_wheel(self, delta_y: f64, config: &FrameConfig) -> Self {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return self;
        }
        let step = -delta_y.signum() * config.wheel_step;
        let scale = (self.scale + step).clamp(config.wheel_min, config.wheel_max);
        Self { scale, ..self }
    }

    /// Slider zoom: assign `value` verbatim within the slider range.
    ///
    /// Values outside the range are clamped to it; non-finite values are
    /// ignored.
    pub fn with_slider_scale(self, value: f64, config: &FrameConfig) -> Self {
        if !value.is_finite() {
            return self;
        }
        let scale = value.clamp(config.slider_min, config.slider_max);
        Self { scale, ..self }
    }

    /// The same composition expressed in a frame `factor` times larger.
    pub fn scaled_by(self, factor: f64) -> Self {
        Self {
            scale: self.scale * factor,
            offset: self.offset * factor,
        }
    }

    /// Zoom level as a whole percentage, as shown next to the slider.
    pub fn scale_percent(&self) -> u32 {
        (self.scale * 100.0).round().max(0.0) as u32
    }
}

/// Drag state captured at pointer-down.
///
/// The anchor is the display-space point that corresponds to a zero offset,
/// so every pointer-move sets the offset absolutely:
///
/// ```text
/// anchor = pointer_down - offset * (D / T)
/// offset = (pointer - anchor) * (T / D)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    anchor: Point,
}

impl DragAnchor {
    /// Start a drag at `pointer` against the current transform.
    pub fn begin(pointer: Point, transform: &ViewportTransform, config: &FrameConfig) -> Self {
        Self {
            anchor: pointer - transform.offset * config.display_per_target(),
        }
    }

    /// Display-space anchor recorded at drag start.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Offset for the pointer at `pointer`.
    pub fn offset_at(&self, pointer: Point, config: &FrameConfig) -> Point {
        (pointer - self.anchor) * config.target_per_display()
    }

    /// Apply a pointer-move to `transform`. Scale is left untouched.
    pub fn update(
        &self,
        transform: ViewportTransform,
        pointer: Point,
        config: &FrameConfig,
    ) -> ViewportTransform {
        ViewportTransform {
            offset: self.offset_at(pointer, config),
            ..transform
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-2000.0f64..2000.0, -2000.0f64..2000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    proptest! {
        /// Property: cover fit reaches the frame in one axis and exceeds it in neither short way.
        #[test]
        fn prop_cover_fit(
            width in 1u32..=8000,
            height in 1u32..=8000,
            target in 1u32..=4096,
        ) {
            let t = target as f64;
            let fit = ViewportTransform::cover(width, height, t);
            let sx = t / width as f64;
            let sy = t / height as f64;

            prop_assert!(fit.scale >= sx);
            prop_assert!(fit.scale >= sy);
            prop_assert!(fit.scale == sx || fit.scale == sy);
        }

        /// Property: cover fit centers the scaled image.
        #[test]
        fn prop_cover_centered(
            width in 1u32..=8000,
            height in 1u32..=8000,
        ) {
            let fit = ViewportTransform::cover(width, height, 1024.0);
            let expected_x = (1024.0 - width as f64 * fit.scale) / 2.0;
            let expected_y = (1024.0 - height as f64 * fit.scale) / 2.0;

            prop_assert_eq!(fit.offset.x, expected_x);
            prop_assert_eq!(fit.offset.y, expected_y);
            // Image center lands on frame center
            let center = fit.map_point(Point::new(width as f64 / 2.0, height as f64 / 2.0));
            prop_assert!((center.x - 512.0).abs() < 1e-6);
            prop_assert!((center.y - 512.0).abs() < 1e-6);
        }

        /// Property: the final drag offset depends only on the anchor and the last pointer.
        #[test]
        fn prop_drag_path_independent(
            offset in point_strategy(),
            start in point_strategy(),
            path in prop::collection::vec(point_strategy(), 0..20),
            last in point_strategy(),
        ) {
            let config = FrameConfig::new();
            let initial = ViewportTransform::new(1.5, offset);
            let drag = DragAnchor::begin(start, &initial, &config);

            let mut walked = initial;
            for p in path {
                walked = drag.update(walked, p, &config);
            }
            walked = drag.update(walked, last, &config);

            let direct = drag.update(initial, last, &config);
            prop_assert_eq!(walked, direct);
        }

        /// Property: wheel zoom stays within the wheel range.
        #[test]
        fn prop_wheel_within_bounds(
            scale in 0.1f64..=10.0,
            deltas in prop::collection::vec(-500.0f64..500.0, 0..200),
        ) {
            let config = FrameConfig::new();
            let mut t = ViewportTransform::new(scale, Point::ZERO);
            for d in deltas {
                t = t.zoom_wheel(d, &config);
                prop_assert!(t.scale >= 0.1 && t.scale <= 10.0);
            }
        }

        /// Property: slider values in range are assigned exactly.
        #[test]
        fn prop_slider_exact(value in 0.1f64..=5.0, offset in point_strategy()) {
            let config = FrameConfig::new();
            let t = ViewportTransform::new(1.0, offset).with_slider_scale(value, &config);
            prop_assert_eq!(t.scale, value);
            prop_assert_eq!(t.offset, offset);
        }
    }
}
