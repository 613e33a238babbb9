//! Zoom and pan applied to the whole design canvas.
//!
//! Screen coordinates are pixels with (0,0) at the top-left of the editor
//! element; logical coordinates are canvas units. Both have y growing
//! downward:
//!
//! ```text
//! screen = logical * zoom + pan
//! logical = (screen - pan) / zoom
//! ```
//!
//! Every drag handler converts pointer deltas through
//! [`Viewport::screen_delta_to_logical`] so geometry stays correct at any zoom.

use std::fmt;

use crate::constants::{ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
use crate::options::SurfaceOptions;
use crate::types::{Point, Rect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Zoom/pan state of one editor session.
///
/// Serializes as `{"zoom": .., "pan": {"x": .., "y": ..}}` when saved as a
/// product's default viewport.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    zoom: f64,
    pan: Point,
    #[cfg_attr(feature = "serde", serde(skip, default = "default_zoom_min"))]
    zoom_min: f64,
    #[cfg_attr(feature = "serde", serde(skip, default = "default_zoom_max"))]
    zoom_max: f64,
}

#[cfg(feature = "serde")]
fn default_zoom_min() -> f64 {
    ZOOM_MIN
}

#[cfg(feature = "serde")]
fn default_zoom_max() -> f64 {
    ZOOM_MAX
}

impl Viewport {
    /// Creates a 1:1 viewport with no pan and the given zoom limits.
    ///
    /// A non-positive or non-finite minimum falls back to the default, and a
    /// maximum below the minimum is raised to it, so zoom is always positive.
    pub fn new(zoom_min: f64, zoom_max: f64) -> Self {
        let (zoom_min, zoom_max) = sanitize_limits(zoom_min, zoom_max);
        Self {
            zoom: 1.0_f64.max(zoom_min).min(zoom_max),
            pan: Point::default(),
            zoom_min,
            zoom_max,
        }
    }

    pub fn from_options(options: &SurfaceOptions) -> Self {
        Self::new(options.zoom_min, options.zoom_max)
    }

    /// Applies new zoom limits, e.g. after deserializing a saved viewport.
    pub fn with_limits(mut self, zoom_min: f64, zoom_max: f64) -> Self {
        let (zoom_min, zoom_max) = sanitize_limits(zoom_min, zoom_max);
        self.zoom_min = zoom_min;
        self.zoom_max = zoom_max;
        self.zoom = self.clamp_zoom(self.zoom);
        self
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.zoom_min, self.zoom_max)
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        if !zoom.is_finite() {
            return self.zoom;
        }
        zoom.max(self.zoom_min).min(self.zoom_max)
    }

    /// Sets the zoom level, clamped to the configured limits.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = self.clamp_zoom(zoom);
    }

    /// Zooms in by one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    /// Zooms out by one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    /// Sets the pan offset (screen pixels).
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan = Point::new(x, y);
    }

    /// Pans by a screen-pixel delta. Pan is already in screen space, so no
    /// zoom correction applies.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.x += dx;
        self.pan.y += dy;
    }

    /// Converts a screen-pixel pointer delta into logical units.
    pub fn screen_delta_to_logical(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.zoom, dy / self.zoom)
    }

    pub fn screen_to_logical(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    pub fn logical_to_screen(&self, logical: Point) -> Point {
        Point::new(
            logical.x * self.zoom + self.pan.x,
            logical.y * self.zoom + self.pan.y,
        )
    }

    /// Maps a logical rectangle to the screen rectangle it is drawn at.
    pub fn logical_rect_to_screen(&self, rect: &Rect) -> Rect {
        let origin = self.logical_to_screen(Point::new(rect.x, rect.y));
        Rect::new(
            origin.x,
            origin.y,
            rect.width * self.zoom,
            rect.height * self.zoom,
        )
    }

    /// Zooms while keeping the logical point under `screen` fixed on screen.
    ///
    /// Useful for "zoom to cursor" functionality.
    pub fn zoom_at(&mut self, screen: Point, zoom: f64) {
        let anchor = self.screen_to_logical(screen);
        self.set_zoom(zoom);
        // pan = screen - logical * zoom keeps the anchor in place
        self.pan = Point::new(
            screen.x - anchor.x * self.zoom,
            screen.y - anchor.y * self.zoom,
        );
    }

    /// Fits a square canvas into a viewport of the given pixel size.
    ///
    /// # Arguments
    /// * `canvas_size` - Side of the logical canvas
    /// * `viewport_width`, `viewport_height` - Editor element size in pixels
    /// * `padding` - Fraction of the viewport reserved on each side (0.0 - 0.5)
    pub fn fit(&mut self, canvas_size: f64, viewport_width: f64, viewport_height: f64, padding: f64) {
        if canvas_size <= 0.0 || viewport_width <= 0.0 || viewport_height <= 0.0 {
            return;
        }

        let padding_factor = (1.0 - padding * 2.0).max(0.0);
        let fit_zoom = (viewport_width * padding_factor / canvas_size)
            .min(viewport_height * padding_factor / canvas_size);
        self.set_zoom(fit_zoom);

        let drawn = canvas_size * self.zoom;
        self.pan = Point::new(
            (viewport_width - drawn) / 2.0,
            (viewport_height - drawn) / 2.0,
        );
    }

    /// Resets viewport to 1:1 zoom with no pan.
    pub fn reset(&mut self) {
        self.zoom = self.clamp_zoom(1.0);
        self.pan = Point::default();
    }
}

fn sanitize_limits(zoom_min: f64, zoom_max: f64) -> (f64, f64) {
    let zoom_min = if zoom_min.is_finite() && zoom_min > 0.0 {
        zoom_min
    } else {
        ZOOM_MIN
    };
    let zoom_max = if zoom_max.is_finite() {
        zoom_max.max(zoom_min)
    } else {
        ZOOM_MAX.max(zoom_min)
    };
    (zoom_min, zoom_max)
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.0}% | Pan: ({:.1}, {:.1})",
            self.zoom * 100.0,
            self.pan.x,
            self.pan.y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ZOOM_MIN, ZOOM_MAX)
    }
}
