//! Background-image mapping
//!
//! This module places the bleed area onto a merchant-supplied background photo:
//! - Constraining the stored center/scale record into its legal ranges
//! - Projecting the bleed rectangle into background pixel space
//! - Checking that the projection stays on the photo
//! - Validating and repairing the background image record itself

mod asset;
mod constrain;
mod project;

pub use asset::*;
pub use constrain::*;
pub use project::*;
