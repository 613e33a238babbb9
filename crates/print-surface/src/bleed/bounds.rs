use crate::types::{BleedArea, Rect};

/// Calculate the bleed rectangle surrounding a print area.
///
/// Without a bleed area the print area is returned unchanged. No clamping is
/// done here: the result may extend past the canvas, and callers must run
/// [`validate_bleed_area`](super::validate_bleed_area) before acting on it.
///
/// # Arguments
/// * `print_area` - The designable rectangle, in logical units
/// * `bleed_area` - Optional per-side margins
pub fn calculate_bleed_bounds(print_area: &Rect, bleed_area: Option<&BleedArea>) -> Rect {
    let Some(bleed_area) = bleed_area else {
        return *print_area;
    };

    let margins = bleed_area.margins();
    Rect::new(
        print_area.x - margins.left,
        print_area.y - margins.top,
        print_area.width + margins.left + margins.right,
        print_area.height + margins.top + margins.bottom,
    )
}
