//! Geometry engine for customizable print designs.
//!
//! Defines, validates and transforms the rectangles an editor manipulates:
//! the print area, its bleed margin, the bleed's placement on a background
//! photo, and crop masks on image elements. Pure computation: no rendering,
//! no image decoding, no persistence beyond JSON helpers.

pub mod bleed;
pub mod constants;
pub mod crop;
pub mod drag;
pub mod mapping;
mod options;
mod surface;
mod types;
mod validation;
pub mod viewport;

pub use bleed::{calculate_bleed_bounds, validate_bleed_area, validate_print_area};
pub use crop::{
    CropCommit, CropDragState, CropFrame, CropHandle, CropMask, CropMaskController, ImageContent,
};
pub use drag::{DragHandle, DragSession, DragState, SurfaceFrame, SurfaceLayers};
pub use mapping::{
    AssetError, BackgroundImage, BackgroundImageUpdate, BackgroundMapping, FileInfo, MappingPatch,
    constrain, map_to_background, merge_background_update, normalize_url,
    validate_background_image, validate_background_url, validate_mapping_bounds,
};
pub use options::*;
pub use surface::*;
pub use types::*;
pub use validation::*;
pub use viewport::Viewport;
