//! Crop masks for image elements
//!
//! A crop mask selects the visible window of one image element. This module
//! handles:
//! - Mask geometry in the element's local space and its clamping rules
//! - The crop-mode state machine (handle drags, apply, cancel)
//! - The separate image-content pan/zoom transform

mod content;
mod controller;
mod mask;

pub use content::*;
pub use controller::*;
pub use mask::*;
