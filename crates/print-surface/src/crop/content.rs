use crate::constants::{IMAGE_MAX_SCALE, IMAGE_MIN_SCALE};
use crate::types::{Point, clamp};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pan/zoom of the picture inside an image element, used outside mask
/// cropping. Persisted as the element's `imageContent`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ImageContent {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ImageContent {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ImageContent {
    /// Scale clamped into `[0.1, 5]`; non-finite values reset to defaults
    pub fn constrained(&self) -> Self {
        let scale = if self.scale.is_finite() {
            clamp(self.scale, IMAGE_MIN_SCALE, IMAGE_MAX_SCALE)
        } else {
            1.0
        };
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            scale,
            offset_x: finite(self.offset_x),
            offset_y: finite(self.offset_y),
        }
    }

    /// Shift the picture by a logical-unit delta
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
        *self = self.constrained();
    }

    /// Multiply the scale, keeping it within limits
    pub fn zoom_by(&mut self, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        self.scale *= factor;
        *self = self.constrained();
    }

    /// The element's `imageOffset`
    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }
}
