//! Crop-mode state machine.
//!
//! Entering crop mode on an image element creates a [`CropMaskController`].
//! Pointer events drive it between `Idle` and `Dragging(handle)`; the session
//! ends only through [`CropMaskController::apply`] or
//! [`CropMaskController::cancel`]. There is no implicit autosave.

use crate::options::SurfaceOptions;
use crate::types::{Point, Rect, clamp};
use crate::viewport::Viewport;

use super::mask::{CropMask, resize_about_center};

/// Grab points of a crop mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropHandle {
    /// Pan the photo behind the mask
    Move,
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl CropHandle {
    /// -1 for west-side handles, 1 for east-side, 0 otherwise
    fn horizontal(self) -> f64 {
        match self {
            CropHandle::E | CropHandle::NE | CropHandle::SE => 1.0,
            CropHandle::W | CropHandle::NW | CropHandle::SW => -1.0,
            _ => 0.0,
        }
    }

    /// -1 for north-side handles, 1 for south-side, 0 otherwise
    fn vertical(self) -> f64 {
        match self {
            CropHandle::S | CropHandle::SE | CropHandle::SW => 1.0,
            CropHandle::N | CropHandle::NE | CropHandle::NW => -1.0,
            _ => 0.0,
        }
    }
}

/// Observable state of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropDragState {
    Idle,
    Dragging(CropHandle),
}

/// Snapshot taken on pointer-down
#[derive(Debug, Clone, Copy)]
struct CropDrag {
    handle: CropHandle,
    origin: Point,
    start_mask: CropMask,
    start_element: Rect,
}

/// Geometry after one pointer-move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropFrame {
    /// The element's canvas rectangle (moves only for [`CropHandle::Move`])
    pub element: Rect,
    pub mask: CropMask,
}

/// What `apply` hands back for merging into the element's persisted state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropCommit {
    pub element: Rect,
    /// The element's new `shapeClip`
    pub shape_clip: CropMask,
}

#[derive(Debug, Clone)]
pub struct CropMaskController {
    element: Rect,
    mask: CropMask,
    original_element: Rect,
    original_mask: CropMask,
    min_mask_size: f64,
    drag: Option<CropDrag>,
}

impl CropMaskController {
    /// Enter crop mode on an element.
    ///
    /// # Arguments
    /// * `element` - The image element's canvas rectangle
    /// * `mask` - Existing mask, or `None` to start from the whole element
    /// * `options` - Supplies the minimum mask size enforced while resizing
    ///
    /// A stored mask is only pulled back inside the element. One smaller than
    /// the minimum keeps its size until a handle resizes it.
    pub fn begin(element: Rect, mask: Option<CropMask>, options: &SurfaceOptions) -> Self {
        let min_mask_size = options.min_mask_size;
        let mask = mask
            .unwrap_or_else(|| CropMask::full(element.width, element.height))
            .clamped_to(element.width, element.height, 0.0);

        Self {
            element,
            mask,
            original_element: element,
            original_mask: mask,
            min_mask_size,
            drag: None,
        }
    }

    pub fn element(&self) -> Rect {
        self.element
    }

    pub fn mask(&self) -> CropMask {
        self.mask
    }

    pub fn state(&self) -> CropDragState {
        match self.drag {
            Some(drag) => CropDragState::Dragging(drag.handle),
            None => CropDragState::Idle,
        }
    }

    /// Find the handle under an element-local point.
    ///
    /// Corners win over edges, edges over the interior.
    pub fn hit_test(&self, local: Point, tolerance: f64) -> Option<CropHandle> {
        let m = &self.mask;
        let near = |a: f64, b: f64| (a - b).abs() <= tolerance;
        let within = |v: f64, lo: f64, hi: f64| v >= lo - tolerance && v <= hi + tolerance;

        if !(within(local.x, m.left(), m.right()) && within(local.y, m.top(), m.bottom())) {
            return None;
        }

        let west = near(local.x, m.left());
        let east = near(local.x, m.right());
        let north = near(local.y, m.top());
        let south = near(local.y, m.bottom());

        let handle = match (north, south, west, east) {
            (true, _, true, _) => CropHandle::NW,
            (true, _, _, true) => CropHandle::NE,
            (_, true, true, _) => CropHandle::SW,
            (_, true, _, true) => CropHandle::SE,
            (true, _, _, _) => CropHandle::N,
            (_, true, _, _) => CropHandle::S,
            (_, _, true, _) => CropHandle::W,
            (_, _, _, true) => CropHandle::E,
            _ => CropHandle::Move,
        };
        Some(handle)
    }

    /// Hit test a screen-space pointer, going through the viewport
    pub fn hit_test_screen(
        &self,
        screen: Point,
        viewport: &Viewport,
        tolerance: f64,
    ) -> Option<CropHandle> {
        let logical = viewport.screen_to_logical(screen);
        let local = Point::new(logical.x - self.element.x, logical.y - self.element.y);
        // Tolerance is given in screen pixels
        self.hit_test(local, tolerance / viewport.zoom())
    }

    /// Start dragging `handle` from a screen-space pointer position
    pub fn pointer_down(&mut self, handle: CropHandle, screen: Point) {
        self.drag = Some(CropDrag {
            handle,
            origin: screen,
            start_mask: self.mask,
            start_element: self.element,
        });
    }

    /// Apply the pointer's travel since pointer-down.
    ///
    /// Returns `None` when no drag is in progress.
    pub fn pointer_move(&mut self, screen: Point, viewport: &Viewport) -> Option<CropFrame> {
        let drag = self.drag?;
        let (dx, dy) =
            viewport.screen_delta_to_logical(screen.x - drag.origin.x, screen.y - drag.origin.y);

        match drag.handle {
            CropHandle::Move => self.pan_behind_mask(&drag, dx, dy),
            handle => self.resize(&drag, handle, dx, dy),
        }

        Some(CropFrame {
            element: self.element,
            mask: self.mask,
        })
    }

    /// End the current drag. Geometry stays as last moved.
    pub fn pointer_up(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Commit the mask and the (possibly translated) element
    pub fn apply(self) -> CropCommit {
        log::debug!(
            "Applied crop mask {:?} on element at ({}, {})",
            self.mask,
            self.element.x,
            self.element.y
        );
        CropCommit {
            element: self.element,
            shape_clip: self.mask,
        }
    }

    /// Discard the session; returns the element as it was before crop mode
    pub fn cancel(self) -> Rect {
        log::debug!("Cancelled crop session, restoring mask {:?}", self.original_mask);
        self.original_element
    }

    /// Symmetric resize about the mask's own center
    fn resize(&mut self, drag: &CropDrag, handle: CropHandle, dx: f64, dy: f64) {
        let start = drag.start_mask;
        let extent = drag.start_element;

        // Edge handles leave the other axis as it was, even below the minimum
        let width = if handle.horizontal() == 0.0 {
            start.width
        } else {
            resize_about_center(
                start.x,
                start.width,
                2.0 * dx * handle.horizontal(),
                extent.width,
                self.min_mask_size,
            )
        };
        let height = if handle.vertical() == 0.0 {
            start.height
        } else {
            resize_about_center(
                start.y,
                start.height,
                2.0 * dy * handle.vertical(),
                extent.height,
                self.min_mask_size,
            )
        };

        self.mask = CropMask::new(start.x, start.y, width, height);
    }

    /// The move handle translates the element, not the mask.
    ///
    /// The element moves by `-d` and the mask's local center by `+d`, so the
    /// mask stays put on the canvas while the photo slides behind it. `d` is
    /// clipped to the largest delta that keeps the mask inside the element.
    fn pan_behind_mask(&mut self, drag: &CropDrag, dx: f64, dy: f64) {
        let start = drag.start_mask;
        let element = drag.start_element;

        let center_x = clamp(
            start.x + dx,
            start.width / 2.0,
            element.width - start.width / 2.0,
        );
        let center_y = clamp(
            start.y + dy,
            start.height / 2.0,
            element.height - start.height / 2.0,
        );
        let applied_dx = center_x - start.x;
        let applied_dy = center_y - start.y;

        self.mask = CropMask::new(center_x, center_y, start.width, start.height);
        self.element = element.translated(-applied_dx, -applied_dy);
    }
}
