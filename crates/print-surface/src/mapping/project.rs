use crate::bleed::calculate_bleed_bounds;
use crate::types::{BleedArea, Rect};
use crate::validation::{Boundary, ValidationError, ValidationReport};

use super::BackgroundMapping;

/// Project the bleed rectangle into the pixel space of the rendered
/// background image.
///
/// The bleed bounds are normalized by `display_size` (which is independent of
/// the logical canvas size), scaled about the normalized center `(0.5, 0.5)`,
/// shifted by the mapping's target center, then denormalized and rounded to
/// whole pixels.
///
/// Returns [`Rect::ZERO`] when the projection cannot be computed (no print
/// area, unusable display size, non-finite result).
pub fn map_to_background(
    bleed_area: Option<&BleedArea>,
    print_area: Option<&Rect>,
    mapping: &BackgroundMapping,
    display_size: f64,
) -> Rect {
    let Some(print_area) = print_area else {
        log::debug!("No print area; background mapping is unmappable");
        return Rect::ZERO;
    };

    if !(display_size.is_finite() && display_size > 0.0) {
        log::debug!("Display size {} is unusable for mapping", display_size);
        return Rect::ZERO;
    }

    let bounds = calculate_bleed_bounds(print_area, bleed_area);

    // Normalize into [0, 1] display space
    let norm_x = bounds.x / display_size;
    let norm_y = bounds.y / display_size;
    let norm_width = bounds.width / display_size;
    let norm_height = bounds.height / display_size;

    // Scale about the display center
    let scaled_x = (norm_x - 0.5) * mapping.scale + 0.5;
    let scaled_y = (norm_y - 0.5) * mapping.scale + 0.5;
    let scaled_width = norm_width * mapping.scale;
    let scaled_height = norm_height * mapping.scale;

    // Shift toward the target center
    let target_x = mapping.center_x / 100.0;
    let target_y = mapping.center_y / 100.0;
    let final_x = scaled_x + (target_x - 0.5);
    let final_y = scaled_y + (target_y - 0.5);

    let mapped = Rect::new(
        round_half_up(final_x * display_size),
        round_half_up(final_y * display_size),
        round_half_up(scaled_width * display_size),
        round_half_up(scaled_height * display_size),
    );

    if !mapped.is_finite() {
        log::debug!("Background mapping produced a non-finite rectangle");
        return Rect::ZERO;
    }

    mapped
}

/// Check that the projected bleed rectangle stays on the background image.
///
/// Each edge outside `[0, display_size]` is reported with its overflow in
/// pixels. An unmappable projection is reported as such.
pub fn validate_mapping_bounds(
    mapping: &BackgroundMapping,
    print_area: Option<&Rect>,
    bleed_area: Option<&BleedArea>,
    display_size: f64,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    let mapped = map_to_background(bleed_area, print_area, mapping, display_size);
    if mapped.is_zero() {
        report.push(ValidationError::Unmappable);
        return report;
    }

    report.check_within(&mapped, display_size, Boundary::Background);
    report
}

/// Round to the nearest integer with halves going toward positive infinity,
/// so -2.5 becomes -2 and 2.5 becomes 3.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
