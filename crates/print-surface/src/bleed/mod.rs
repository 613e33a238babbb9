//! Bleed area calculations
//!
//! - Deriving the bleed rectangle from a print area and its margins
//! - Validating margin values and the resulting bounds against the canvas

mod bounds;
mod validate;

pub use bounds::*;
pub use validate::*;
