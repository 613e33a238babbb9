use crate::types::{BleedArea, Rect};
use crate::validation::{Boundary, ValidationError, ValidationReport};

use super::calculate_bleed_bounds;

/// Validate bleed margins and the bleed rectangle they produce.
///
/// Each margin must lie in `[0, max_bleed]`, and every edge of the bleed
/// rectangle must stay within `[0, canvas_size]`. Edge violations carry the
/// exact overflow distance. Without a bleed area only the print area's own
/// bounds are checked.
pub fn validate_bleed_area(
    bleed_area: Option<&BleedArea>,
    print_area: &Rect,
    canvas_size: f64,
    max_bleed: f64,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    if let Some(bleed) = bleed_area {
        for (field, value) in labelled_values(bleed) {
            check_margin(&mut report, field, value, max_bleed);
        }
    }

    let bounds = calculate_bleed_bounds(print_area, bleed_area);
    report.check_within(&bounds, canvas_size, Boundary::Canvas);
    report
}

/// Check that a print area has a positive size and lies inside the canvas
pub fn validate_print_area(print_area: &Rect, canvas_size: f64) -> ValidationReport {
    let mut report = ValidationReport::new();

    if !(print_area.width > 0.0) {
        report.push(ValidationError::NotPositive {
            field: "Print area width".to_string(),
        });
    }
    if !(print_area.height > 0.0) {
        report.push(ValidationError::NotPositive {
            field: "Print area height".to_string(),
        });
    }

    report.check_within(print_area, canvas_size, Boundary::Canvas);
    report
}

fn labelled_values(bleed: &BleedArea) -> Vec<(&'static str, f64)> {
    match *bleed {
        BleedArea::Uniform { value } => vec![("Bleed value", value)],
        BleedArea::Separate {
            top,
            right,
            bottom,
            left,
        } => vec![
            ("Top", top),
            ("Right", right),
            ("Bottom", bottom),
            ("Left", left),
        ],
    }
}

fn check_margin(report: &mut ValidationReport, field: &str, value: f64, max_bleed: f64) {
    if value.is_nan() {
        report.push(ValidationError::Invalid {
            field: field.to_string(),
            reason: "must be a number".to_string(),
        });
    } else if value < 0.0 {
        report.push(ValidationError::Negative {
            field: field.to_string(),
        });
    } else if value > max_bleed {
        report.push(ValidationError::ExceedsMax {
            field: field.to_string(),
            max: max_bleed,
        });
    }
}
