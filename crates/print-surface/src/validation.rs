//! Validation results shared by every checker in the crate.
//!
//! Validation is a query the editor polls on every drag frame, so problems are
//! returned as data in a [`ValidationReport`] and never raised.

use thiserror::Error;

use crate::types::{Rect, Side};

/// The surface an edge is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The logical design canvas, measured in units
    Canvas,
    /// The rendered background image, measured in pixels
    Background,
}

impl Boundary {
    fn label(self) -> &'static str {
        match self {
            Boundary::Canvas => "canvas",
            Boundary::Background => "background",
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Boundary::Canvas => "units",
            Boundary::Background => "pixels",
        }
    }
}

/// A single named field or edge out of range
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must not be negative")]
    Negative { field: String },

    #[error("{field} must not exceed {max}")]
    ExceedsMax { field: String, max: f64 },

    #[error("{field} must be greater than 0")]
    NotPositive { field: String },

    #[error("{} side exceeds {} boundary by {} {}", .side.name(), .boundary.label(), .by, .boundary.unit())]
    Overflow {
        side: Side,
        boundary: Boundary,
        by: f64,
    },

    #[error("background mapping could not be computed")]
    Unmappable,

    #[error("{field} {reason}")]
    Invalid { field: String, reason: String },
}

/// Outcome of a validation query; `valid` iff `errors` is empty
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    /// Human-readable messages in the order they were found
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Report every edge of `rect` that leaves `[0, extent]`, with the exact
    /// overflow distance.
    pub(crate) fn check_within(&mut self, rect: &Rect, extent: f64, boundary: Boundary) {
        if rect.x < 0.0 {
            self.push(ValidationError::Overflow {
                side: Side::Left,
                boundary,
                by: -rect.x,
            });
        }
        if rect.y < 0.0 {
            self.push(ValidationError::Overflow {
                side: Side::Top,
                boundary,
                by: -rect.y,
            });
        }
        if rect.right() > extent {
            self.push(ValidationError::Overflow {
                side: Side::Right,
                boundary,
                by: rect.right() - extent,
            });
        }
        if rect.bottom() > extent {
            self.push(ValidationError::Overflow {
                side: Side::Bottom,
                boundary,
                by: rect.bottom() - extent,
            });
        }
    }
}

/// Wire form: `{"valid": bool, "errors": [string]}`
#[cfg(feature = "serde")]
impl serde::Serialize for ValidationReport {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("ValidationReport", 2)?;
        s.serialize_field("valid", &self.is_valid())?;
        s.serialize_field("errors", &self.messages())?;
        s.end()
    }
}
