//! Print-area drag sessions.
//!
//! Same shape as the crop controller, with two handles: `Move` for the whole
//! rectangle and `Resize` for the bottom-right corner. Every pointer-move
//! produces a [`SurfaceFrame`] with the bleed outline and background outline
//! recomputed, so live feedback never lags the rectangle being dragged.

use crate::bleed::calculate_bleed_bounds;
use crate::mapping::{BackgroundMapping, map_to_background};
use crate::options::SurfaceOptions;
use crate::types::{BleedArea, Point, Rect, clamp};
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragHandle {
    Move,
    /// Bottom-right corner
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging(DragHandle),
}

/// Overlays derived from the print area, fixed for the duration of a drag
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceLayers<'a> {
    pub bleed_area: Option<&'a BleedArea>,
    pub mapping: Option<&'a BackgroundMapping>,
}

/// Everything the editor draws for one drag frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFrame {
    pub print_area: Rect,
    pub bleed_bounds: Rect,
    /// Outline on the background photo; `None` without an enabled mapping,
    /// [`Rect::ZERO`] when unmappable
    pub background_rect: Option<Rect>,
}

impl SurfaceFrame {
    pub fn compute(print_area: Rect, layers: SurfaceLayers<'_>, display_size: f64) -> Self {
        let bleed_bounds = calculate_bleed_bounds(&print_area, layers.bleed_area);
        let background_rect = layers
            .mapping
            .filter(|m| m.enabled)
            .map(|m| map_to_background(layers.bleed_area, Some(&print_area), m, display_size));

        Self {
            print_area,
            bleed_bounds,
            background_rect,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    handle: DragHandle,
    origin: Point,
    start: Rect,
}

#[derive(Debug, Clone)]
pub struct DragSession {
    canvas_size: f64,
    display_size: f64,
    min_size: f64,
    current: Option<Rect>,
    drag: Option<ActiveDrag>,
}

impl DragSession {
    pub fn new(options: &SurfaceOptions) -> Self {
        Self::with_min_size(options, options.min_print_area_size)
    }

    /// Some call sites enforce a larger minimum than the configured default
    pub fn with_min_size(options: &SurfaceOptions, min_size: f64) -> Self {
        Self {
            canvas_size: options.canvas_size,
            display_size: options.display_size,
            min_size,
            current: None,
            drag: None,
        }
    }

    pub fn state(&self) -> DragState {
        match self.drag {
            Some(drag) => DragState::Dragging(drag.handle),
            None => DragState::Idle,
        }
    }

    /// Find the handle under a logical point.
    ///
    /// The resize handle is a square of `tolerance` around the bottom-right
    /// corner; anywhere else inside the rectangle moves it.
    pub fn hit_test(point: Point, rect: &Rect, tolerance: f64) -> Option<DragHandle> {
        if (point.x - rect.right()).abs() <= tolerance
            && (point.y - rect.bottom()).abs() <= tolerance
        {
            return Some(DragHandle::Resize);
        }
        rect.contains_point(point).then_some(DragHandle::Move)
    }

    /// Begin a drag from a screen-space pointer position
    pub fn pointer_down(&mut self, handle: DragHandle, screen: Point, print_area: Rect) {
        self.drag = Some(ActiveDrag {
            handle,
            origin: screen,
            start: print_area,
        });
        self.current = Some(print_area);
    }

    /// Apply the pointer's travel since pointer-down, corrected for zoom.
    ///
    /// Returns `None` when no drag is in progress.
    pub fn pointer_move(
        &mut self,
        screen: Point,
        viewport: &Viewport,
        layers: SurfaceLayers<'_>,
    ) -> Option<SurfaceFrame> {
        let drag = self.drag?;
        let (dx, dy) =
            viewport.screen_delta_to_logical(screen.x - drag.origin.x, screen.y - drag.origin.y);

        let rect = match drag.handle {
            DragHandle::Move => self.moved(&drag.start, dx, dy),
            DragHandle::Resize => self.resized(&drag.start, dx, dy),
        };
        self.current = Some(rect);

        Some(SurfaceFrame::compute(rect, layers, self.display_size))
    }

    /// End the drag, returning the final print area if one was in progress
    pub fn pointer_up(&mut self) -> Option<Rect> {
        self.drag.take()?;
        self.current.take()
    }

    /// Abandon the drag, returning the print area from pointer-down
    pub fn cancel(&mut self) -> Option<Rect> {
        self.current = None;
        self.drag.take().map(|d| d.start)
    }

    fn moved(&self, start: &Rect, dx: f64, dy: f64) -> Rect {
        Rect::new(
            clamp(start.x + dx, 0.0, self.canvas_size - start.width),
            clamp(start.y + dy, 0.0, self.canvas_size - start.height),
            start.width,
            start.height,
        )
    }

    fn resized(&self, start: &Rect, dx: f64, dy: f64) -> Rect {
        // Canvas bound wins over the minimum so the rect never leaves the canvas
        let width = (start.width + dx)
            .max(self.min_size)
            .min(self.canvas_size - start.x);
        let height = (start.height + dy)
            .max(self.min_size)
            .min(self.canvas_size - start.y);
        Rect::new(start.x, start.y, width, height)
    }
}
