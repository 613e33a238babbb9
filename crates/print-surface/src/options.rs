use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// Every size the geometry depends on is read from here rather than from the
/// constants, so one engine instance can serve canvases of different sizes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceOptions {
    // Canvas
    pub canvas_size: f64,
    pub display_size: f64,

    // Bleed
    pub max_bleed: f64,
    pub default_bleed: f64,

    // Interactive sizing
    pub min_mask_size: f64,
    pub min_print_area_size: f64,
    pub handle_tolerance: f64,

    // Background mapping
    pub min_scale: f64,
    pub max_scale: f64,

    // Viewport
    pub zoom_min: f64,
    pub zoom_max: f64,

    // Assets
    pub asset_base_url: String,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            canvas_size: CANVAS_SIZE,
            display_size: DISPLAY_SIZE,
            max_bleed: MAX_BLEED,
            default_bleed: DEFAULT_BLEED,
            min_mask_size: MIN_MASK_SIZE,
            min_print_area_size: MIN_PRINT_AREA_SIZE,
            handle_tolerance: HANDLE_TOLERANCE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
        }
    }
}

impl SurfaceOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SurfaceError::Config(format!("Failed to parse options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SurfaceError::Config(format!("Failed to serialize options: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options.
    ///
    /// A failure here is a caller contract violation, not bad user input.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("canvas_size", self.canvas_size),
            ("display_size", self.display_size),
            ("min_scale", self.min_scale),
            ("zoom_min", self.zoom_min),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SurfaceError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("max_bleed", self.max_bleed),
            ("default_bleed", self.default_bleed),
            ("min_mask_size", self.min_mask_size),
            ("min_print_area_size", self.min_print_area_size),
            ("handle_tolerance", self.handle_tolerance),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SurfaceError::Config(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        if !(self.max_scale >= self.min_scale) {
            return Err(SurfaceError::Config(format!(
                "max_scale ({}) must not be below min_scale ({})",
                self.max_scale, self.min_scale
            )));
        }

        if !(self.zoom_max >= self.zoom_min) {
            return Err(SurfaceError::Config(format!(
                "zoom_max ({}) must not be below zoom_min ({})",
                self.zoom_max, self.zoom_min
            )));
        }

        if self.default_bleed > self.max_bleed {
            return Err(SurfaceError::Config(format!(
                "default_bleed ({}) exceeds max_bleed ({})",
                self.default_bleed, self.max_bleed
            )));
        }

        if self.min_print_area_size > self.canvas_size {
            return Err(SurfaceError::Config(format!(
                "min_print_area_size ({}) exceeds canvas_size ({})",
                self.min_print_area_size, self.canvas_size
            )));
        }

        Ok(())
    }
}
