use thiserror::Error;

use crate::validation::ValidationReport;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Surface failed validation: {}", .0.messages().join("; "))]
    Validation(ValidationReport),
}

pub type Result<T> = std::result::Result<T, SurfaceError>;

/// `f64::clamp` panics on inverted or NaN bounds; this never does.
pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// A point in either screen pixels or logical units, depending on context
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Returned by computations that could not produce a rectangle.
    /// Callers must read it as "unmappable", never as a rectangle at the origin.
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y coordinate (y grows downward)
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// True when `other` lies entirely inside (or on the edges of) `self`
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Per-side distances, in logical units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// Create uniform margins on all sides
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// One edge of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn name(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

/// Print-safety margin around the print area.
///
/// Serialized with a `mode` tag so the wire form is
/// `{"mode":"uniform","value":3}` or
/// `{"mode":"separate","top":5,"right":0,"bottom":0,"left":10}`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "lowercase"))]
pub enum BleedArea {
    /// The same margin on every side
    Uniform { value: f64 },
    /// Independent margins; sides missing on the wire read as 0
    Separate {
        #[cfg_attr(feature = "serde", serde(default))]
        top: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        right: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        bottom: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        left: f64,
    },
}

impl BleedArea {
    pub fn uniform(value: f64) -> Self {
        BleedArea::Uniform { value }
    }

    pub fn separate(margins: Margins) -> Self {
        BleedArea::Separate {
            top: margins.top,
            right: margins.right,
            bottom: margins.bottom,
            left: margins.left,
        }
    }

    /// Expand the bleed into its four per-side margins
    pub fn margins(&self) -> Margins {
        match *self {
            BleedArea::Uniform { value } => Margins::uniform(value),
            BleedArea::Separate {
                top,
                right,
                bottom,
                left,
            } => Margins {
                top,
                right,
                bottom,
                left,
            },
        }
    }

    pub fn mode(&self) -> BleedMode {
        match self {
            BleedArea::Uniform { .. } => BleedMode::Uniform,
            BleedArea::Separate { .. } => BleedMode::Separate,
        }
    }
}

/// Discriminant of [`BleedArea`], used when the user flips the mode toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BleedMode {
    Uniform,
    Separate,
}
