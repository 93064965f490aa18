//! Editing session: the single live image, its transform and the gesture state.
//!
//! A [`Session`] is what a UI binding talks to. It turns pointer, wheel and
//! slider events into viewport operations, answers the questions the UI needs
//! for rendering its controls, and hands out self-contained
//! [`ExportRequest`]s that can run off the interactive thread.
//!
//! Every gesture is a no-op while no image is loaded.

use std::sync::Arc;

use crate::config::{ConfigError, FrameConfig};
use crate::decode::{decode_image, DecodeError, SourceImage};
use crate::export::{export_png, ExportError, ExportedFile};
use crate::viewport::{DragAnchor, Point, ViewportTransform};

/// The loaded image paired with the transform that belongs to it.
#[derive(Debug, Clone)]
struct Loaded {
    image: Arc<SourceImage>,
    transform: ViewportTransform,
}

/// Interactive state for one user session.
#[derive(Debug, Default)]
pub struct Session {
    config: FrameConfig,
    loaded: Option<Loaded>,
    drag: Option<DragAnchor>,
    processing: bool,
}

impl Session {
    /// Create a session with the default 1024x1024 frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a custom frame.
    pub fn with_config(config: FrameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Decode `bytes` and make the result the current image.
    ///
    /// On failure the previously loaded image and transform stay in place.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        match decode_image(bytes) {
            Ok(image) => {
                self.load_image(image);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected image, keeping previous state");
                Err(e)
            }
        }
    }

    /// Replace the current image and reinitialize the cover transform.
    pub fn load_image(&mut self, image: SourceImage) {
        let transform = ViewportTransform::cover_frame(image.width, image.height, &self.config);
        tracing::debug!(
            width = image.width,
            height = image.height,
            scale = transform.scale,
            "loaded image"
        );
        self.loaded = Some(Loaded {
            image: Arc::new(image),
            transform,
        });
        self.drag = None;
    }

    /// Whether an image is loaded (controls are enabled).
    pub fn has_image(&self) -> bool {
        self.loaded.is_some()
    }

    /// The current image, if any.
    pub fn image(&self) -> Option<&SourceImage> {
        self.loaded.as_ref().map(|l| l.image.as_ref())
    }

    /// The current transform, if an image is loaded.
    pub fn transform(&self) -> Option<ViewportTransform> {
        self.loaded.as_ref().map(|l| l.transform)
    }

    /// Current scale for the slider, `1.0` when nothing is loaded.
    pub fn scale(&self) -> f64 {
        self.transform().map_or(1.0, |t| t.scale)
    }

    /// Whether a pointer drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether an export is in flight.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Pointer or touch start at display coordinates `(x, y)`.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if let Some(loaded) = &self.loaded {
            self.drag = Some(DragAnchor::begin(
                Point::new(x, y),
                &loaded.transform,
                &self.config,
            ));
        }
    }

    /// Pointer or touch move; only has an effect during a drag.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let (Some(drag), Some(loaded)) = (&self.drag, &mut self.loaded) {
            loaded.transform = drag.update(loaded.transform, Point::new(x, y), &self.config);
        }
    }

    /// Pointer up, touch end or pointer leaving the viewport.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// One wheel event with vertical delta `delta_y`.
    pub fn wheel(&mut self, delta_y: f64) {
        if let Some(loaded) = &mut self.loaded {
            loaded.transform = loaded.transform.zoom_wheel(delta_y, &self.config);
        }
    }

    /// Zoom slider moved to `value`.
    pub fn set_slider_scale(&mut self, value: f64) {
        if let Some(loaded) = &mut self.loaded {
            loaded.transform = loaded.transform.with_slider_scale(value, &self.config);
        }
    }

    /// Restore the cover transform for the current image.
    pub fn reset(&mut self) {
        if let Some(loaded) = &mut self.loaded {
            loaded.transform = ViewportTransform::cover_frame(
                loaded.image.width,
                loaded.image.height,
                &self.config,
            );
            tracing::debug!(scale = loaded.transform.scale, "reset transform");
        }
        self.drag = None;
    }

    /// Snapshot the current state for export and mark the session busy.
    ///
    /// Returns `None` without an image or while another export is running.
    pub fn begin_export(&mut self) -> Option<ExportRequest> {
        if self.processing {
            return None;
        }
        let loaded = self.loaded.as_ref()?;
        self.processing = true;
        Some(ExportRequest {
            image: Arc::clone(&loaded.image),
            transform: loaded.transform,
            config: self.config.clone(),
        })
    }

    /// Mark the in-flight export as done.
    pub fn finish_export(&mut self) {
        self.processing = false;
    }

    /// Run an export synchronously on the calling thread.
    pub fn export_now(&mut self) -> Option<Result<ExportedFile, ExportError>> {
        let request = self.begin_export()?;
        let result = request.run();
        self.finish_export();
        Some(result)
    }
}

/// Everything needed to produce one export, detached from the session.
///
/// Holds its own handle to the image, so the session may load a new image
/// or keep handling gestures while the request runs elsewhere.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    image: Arc<SourceImage>,
    transform: ViewportTransform,
    config: FrameConfig,
}

impl ExportRequest {
    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    pub fn image(&self) -> &SourceImage {
        &self.image
    }

    /// Render and encode.
    pub fn run(&self) -> Result<ExportedFile, ExportError> {
        export_png(&self.image, &self.transform, &self.config)
    }
}
