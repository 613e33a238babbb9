use crate::types::{Point, Rect, clamp};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Visible window of an image element, in the element's local space.
///
/// `(x, y)` is the mask *center*; `(0, 0)` is the element's top-left and the
/// element's own width/height are the outer bound. Persisted as the element's
/// `shapeClip`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CropMask {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropMask {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A mask covering the whole element
    pub fn full(element_width: f64, element_height: f64) -> Self {
        Self::new(
            element_width / 2.0,
            element_height / 2.0,
            element_width,
            element_height,
        )
    }

    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Top-left rectangle form, still in element-local space
    pub fn local_rect(&self) -> Rect {
        Rect::new(self.left(), self.top(), self.width, self.height)
    }

    /// Where the mask sits on the canvas for an element at `element`
    pub fn canvas_rect(&self, element: &Rect) -> Rect {
        self.local_rect().translated(element.x, element.y)
    }

    /// True when center ± half-extent stays inside the element on both axes
    pub fn is_within(&self, element_width: f64, element_height: f64) -> bool {
        self.left() >= 0.0
            && self.top() >= 0.0
            && self.right() <= element_width
            && self.bottom() <= element_height
    }

    pub fn contains_local(&self, point: Point) -> bool {
        self.local_rect().contains_point(point)
    }

    /// Bring an arbitrary mask inside the element.
    ///
    /// Size is limited to the element first, then the center is moved so the
    /// mask fits. The minimum size never pushes the mask past the element.
    pub fn clamped_to(&self, element_width: f64, element_height: f64, min_size: f64) -> CropMask {
        let width = clamp(self.width, min_size.min(element_width), element_width);
        let height = clamp(self.height, min_size.min(element_height), element_height);
        CropMask::new(
            clamp(self.x, width / 2.0, element_width - width / 2.0),
            clamp(self.y, height / 2.0, element_height - height / 2.0),
            width,
            height,
        )
    }
}

/// One axis of a symmetric resize about a fixed center.
///
/// The result is at least `min_size` (or the whole extent when the element is
/// smaller) and at most twice the distance from the center to the nearer
/// bound, so `center ± size/2` stays inside `[0, extent]`.
pub(crate) fn resize_about_center(
    center: f64,
    size: f64,
    delta: f64,
    extent: f64,
    min_size: f64,
) -> f64 {
    let max_size = (2.0 * center.min(extent - center)).max(0.0);
    let min_size = min_size.min(extent);
    clamp(size + delta, min_size, max_size)
}
