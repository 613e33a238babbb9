//! Shared constants for the design surface
//!
//! These are the defaults of [`SurfaceOptions`](crate::SurfaceOptions); the
//! engine itself always reads the configured values.

// =============================================================================
// Canvas
// =============================================================================

/// Side length of the square logical canvas (logical units)
pub const CANVAS_SIZE: f64 = 400.0;

/// Side length of the rendered background image the mapping is projected onto (pixels)
pub const DISPLAY_SIZE: f64 = 400.0;

// =============================================================================
// Bleed
// =============================================================================

/// Largest bleed margin accepted on any side (logical units)
pub const MAX_BLEED: f64 = 50.0;

/// Margin applied when bleed is first enabled (logical units)
pub const DEFAULT_BLEED: f64 = 3.0;

// =============================================================================
// Interactive sizing
// =============================================================================

/// Smallest crop mask width/height (logical units)
pub const MIN_MASK_SIZE: f64 = 20.0;

/// Smallest print area width/height reachable by dragging (logical units)
pub const MIN_PRINT_AREA_SIZE: f64 = 20.0;

/// Distance from a handle within which a pointer grabs it (logical units)
pub const HANDLE_TOLERANCE: f64 = 8.0;

// =============================================================================
// Background mapping
// =============================================================================

pub const DEFAULT_CENTER: f64 = 50.0;
pub const DEFAULT_SCALE: f64 = 1.0;
pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;

/// Centers are percentages of the background display
pub const CENTER_MIN: f64 = 0.0;
pub const CENTER_MAX: f64 = 100.0;

// =============================================================================
// Image content (non-mask pan/zoom)
// =============================================================================

pub const IMAGE_MIN_SCALE: f64 = 0.1;
pub const IMAGE_MAX_SCALE: f64 = 5.0;

// =============================================================================
// Viewport
// =============================================================================

pub const ZOOM_MIN: f64 = 0.25;
pub const ZOOM_MAX: f64 = 4.0;

/// Multiplier for one zoom-in / zoom-out step
pub const ZOOM_STEP: f64 = 1.2;

// =============================================================================
// Assets
// =============================================================================

/// Prefix used to repair relative background URLs on the internal update path
pub const DEFAULT_ASSET_BASE_URL: &str = "http://localhost:3000";

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
