//! One editing session over a product's design surface, and the record it
//! loads from and saves to.

use chrono::{DateTime, Utc};

use crate::bleed::{validate_bleed_area, validate_print_area};
use crate::drag::{DragHandle, DragSession, DragState, SurfaceFrame, SurfaceLayers};
use crate::mapping::{
    AssetError, BackgroundImage, BackgroundImageUpdate, BackgroundMapping, MappingPatch,
    constrain, merge_background_update, validate_background_image, validate_mapping_bounds,
};
use crate::options::SurfaceOptions;
use crate::types::*;
use crate::validation::ValidationReport;
use crate::viewport::Viewport;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The persisted geometry of a product or template.
///
/// Field names are the wire contract shared with the persistence layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SurfaceRecord {
    pub print_area: Rect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bleed_area: Option<BleedArea>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub product_background_image: Option<BackgroundImage>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bleed_area_mapping: Option<BackgroundMapping>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub default_viewport: Option<Viewport>,
}

impl SurfaceRecord {
    /// A record with only a print area
    pub fn new(print_area: Rect) -> Self {
        Self {
            print_area,
            bleed_area: None,
            product_background_image: None,
            bleed_area_mapping: None,
            default_viewport: None,
        }
    }

    /// Load a record from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let record = serde_json::from_slice(&bytes)?;
        Ok(record)
    }

    /// Save a record to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Run every check that applies to this record.
    ///
    /// The mapping is checked as the editor would see it, constrained to the
    /// configured scale limits.
    pub fn validate(&self, options: &SurfaceOptions) -> SurfaceReport {
        let print_area = validate_print_area(&self.print_area, options.canvas_size);
        let bleed = validate_bleed_area(
            self.bleed_area.as_ref(),
            &self.print_area,
            options.canvas_size,
            options.max_bleed,
        );
        let mapping = self
            .bleed_area_mapping
            .as_ref()
            .filter(|m| m.enabled)
            .map(|m| {
                validate_mapping_bounds(
                    &m.constrained(options.min_scale, options.max_scale),
                    Some(&self.print_area),
                    self.bleed_area.as_ref(),
                    options.display_size,
                )
            });
        let background_image = self
            .product_background_image
            .as_ref()
            .map(validate_background_image);

        SurfaceReport {
            print_area,
            bleed,
            mapping,
            background_image,
        }
    }
}

/// Validation of a whole surface, grouped by concern
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SurfaceReport {
    pub print_area: ValidationReport,
    pub bleed: ValidationReport,
    pub mapping: Option<ValidationReport>,
    pub background_image: Option<ValidationReport>,
}

impl SurfaceReport {
    pub fn is_valid(&self) -> bool {
        self.print_area.is_valid()
            && self.bleed.is_valid()
            && self.mapping.as_ref().is_none_or(ValidationReport::is_valid)
            && self
                .background_image
                .as_ref()
                .is_none_or(ValidationReport::is_valid)
    }

    /// All findings in one report, print area first
    pub fn combined(&self) -> ValidationReport {
        let mut report = self.print_area.clone();
        report.merge(self.bleed.clone());
        if let Some(mapping) = &self.mapping {
            report.merge(mapping.clone());
        }
        if let Some(image) = &self.background_image {
            report.merge(image.clone());
        }
        report
    }
}

/// Bring a requested print area inside the canvas with at least the minimum
/// size. Non-finite values collapse to the nearest legal value.
pub fn constrain_print_area(rect: &Rect, options: &SurfaceOptions) -> Rect {
    let canvas = options.canvas_size;
    let min = options.min_print_area_size;
    let width = clamp(rect.width, min, canvas);
    let height = clamp(rect.height, min, canvas);
    Rect::new(
        clamp(rect.x, 0.0, canvas - width),
        clamp(rect.y, 0.0, canvas - height),
        width,
        height,
    )
}

/// State owned by one editor instance: print area, bleed, mapping,
/// background image, viewport and the active drag.
#[derive(Debug, Clone)]
pub struct SurfaceEditor {
    options: SurfaceOptions,
    print_area: Rect,
    bleed_area: Option<BleedArea>,
    mapping: Option<BackgroundMapping>,
    background_image: Option<BackgroundImage>,
    default_viewport: Option<Viewport>,
    viewport: Viewport,
    drag: DragSession,
}

impl SurfaceEditor {
    pub fn new(options: SurfaceOptions, print_area: Rect) -> Result<Self> {
        Self::from_record(SurfaceRecord::new(print_area), options)
    }

    /// Open an editing session on a persisted record.
    ///
    /// The stored mapping is passed through [`constrain`] since it is never
    /// trusted raw.
    pub fn from_record(record: SurfaceRecord, options: SurfaceOptions) -> Result<Self> {
        options.validate()?;

        let mapping = record
            .bleed_area_mapping
            .map(|m| m.constrained(options.min_scale, options.max_scale));
        let default_viewport = record
            .default_viewport
            .map(|v| v.with_limits(options.zoom_min, options.zoom_max));
        let viewport = default_viewport
            .clone()
            .unwrap_or_else(|| Viewport::from_options(&options));

        Ok(Self {
            drag: DragSession::new(&options),
            print_area: record.print_area,
            bleed_area: record.bleed_area,
            mapping,
            background_image: record.product_background_image,
            default_viewport,
            viewport,
            options,
        })
    }

    /// Snapshot the current state as a record, without validating
    pub fn to_record(&self) -> SurfaceRecord {
        SurfaceRecord {
            print_area: self.print_area,
            bleed_area: self.bleed_area,
            product_background_image: self.background_image.clone(),
            bleed_area_mapping: self.mapping.clone(),
            default_viewport: self.default_viewport.clone(),
        }
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub fn print_area(&self) -> Rect {
        self.print_area
    }

    pub fn bleed_area(&self) -> Option<&BleedArea> {
        self.bleed_area.as_ref()
    }

    pub fn mapping(&self) -> Option<&BackgroundMapping> {
        self.mapping.as_ref()
    }

    pub fn background_image(&self) -> Option<&BackgroundImage> {
        self.background_image.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Persist the current viewport as the product's default on next save
    pub fn save_viewport_as_default(&mut self) {
        self.default_viewport = Some(self.viewport.clone());
    }

    // =========================================================================
    // Print area
    // =========================================================================

    /// Replace the print area from numeric input, constrained to the canvas
    pub fn set_print_area(&mut self, rect: Rect) -> SurfaceFrame {
        self.print_area = constrain_print_area(&rect, &self.options);
        self.frame()
    }

    // =========================================================================
    // Bleed
    // =========================================================================

    /// Turn bleed on with the default margin. Existing bleed is kept.
    pub fn enable_bleed(&mut self) -> &BleedArea {
        let default_bleed = self.options.default_bleed;
        self.bleed_area
            .get_or_insert_with(|| BleedArea::uniform(default_bleed))
    }

    pub fn disable_bleed(&mut self) {
        self.bleed_area = None;
    }

    pub fn set_bleed_uniform(&mut self, value: f64) {
        self.bleed_area = Some(BleedArea::uniform(value));
    }

    pub fn set_bleed_separate(&mut self, margins: Margins) {
        self.bleed_area = Some(BleedArea::separate(margins));
    }

    /// Switch between uniform and separate margins.
    ///
    /// Uniform → separate copies the value to every side. Separate → uniform
    /// keeps the largest side so the safety margin never shrinks. Does nothing
    /// while bleed is disabled.
    pub fn set_bleed_mode(&mut self, mode: BleedMode) {
        let Some(current) = self.bleed_area else {
            return;
        };
        if current.mode() == mode {
            return;
        }

        let margins = current.margins();
        self.bleed_area = Some(match mode {
            BleedMode::Separate => BleedArea::separate(margins),
            BleedMode::Uniform => BleedArea::uniform(
                margins
                    .top
                    .max(margins.right)
                    .max(margins.bottom)
                    .max(margins.left),
            ),
        });
    }

    // =========================================================================
    // Background mapping and image
    // =========================================================================

    /// Merge a partial mapping over the current one (or the defaults) and
    /// constrain the result
    pub fn update_mapping(&mut self, patch: MappingPatch) -> &BackgroundMapping {
        let base = self.mapping.take().unwrap_or_default();
        let mapping = constrain(patch.over(&base), self.options.min_scale, self.options.max_scale);
        self.mapping.insert(mapping)
    }

    pub fn clear_mapping(&mut self) {
        self.mapping = None;
    }

    /// Accept a background image update through the internal repair path
    pub fn set_background_image(
        &mut self,
        update: BackgroundImageUpdate,
        now: DateTime<Utc>,
    ) -> std::result::Result<&BackgroundImage, AssetError> {
        let merged = merge_background_update(
            self.background_image.as_ref(),
            update,
            &self.options.asset_base_url,
            now,
        )?;
        Ok(self.background_image.insert(merged))
    }

    pub fn clear_background_image(&mut self) {
        self.background_image = None;
    }

    // =========================================================================
    // Pointer events
    // =========================================================================

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Find the print-area handle under a screen-space pointer
    pub fn hit_test(&self, screen: Point) -> Option<DragHandle> {
        let logical = self.viewport.screen_to_logical(screen);
        let tolerance = self.options.handle_tolerance / self.viewport.zoom();
        DragSession::hit_test(logical, &self.print_area, tolerance)
    }

    pub fn pointer_down(&mut self, handle: DragHandle, screen: Point) {
        self.drag.pointer_down(handle, screen, self.print_area);
    }

    /// Move the print area with the pointer; returns the live frame
    pub fn pointer_move(&mut self, screen: Point) -> Option<SurfaceFrame> {
        let layers = SurfaceLayers {
            bleed_area: self.bleed_area.as_ref(),
            mapping: self.mapping.as_ref(),
        };
        let frame = self.drag.pointer_move(screen, &self.viewport, layers)?;
        self.print_area = frame.print_area;
        Some(frame)
    }

    pub fn pointer_up(&mut self) -> Option<Rect> {
        self.drag.pointer_up()
    }

    /// Abort the drag and restore the print area from pointer-down
    pub fn cancel_drag(&mut self) {
        if let Some(start) = self.drag.cancel() {
            self.print_area = start;
        }
    }

    // =========================================================================
    // Feedback and saving
    // =========================================================================

    /// Current print area with its derived outlines
    pub fn frame(&self) -> SurfaceFrame {
        SurfaceFrame::compute(
            self.print_area,
            SurfaceLayers {
                bleed_area: self.bleed_area.as_ref(),
                mapping: self.mapping.as_ref(),
            },
            self.options.display_size,
        )
    }

    pub fn validate(&self) -> SurfaceReport {
        self.to_record().validate(&self.options)
    }

    /// Validate and produce the record to hand to persistence.
    ///
    /// On success the mapping version is incremented and stamped with `now`.
    /// On failure nothing changes and the findings are returned.
    pub fn prepare_save(&mut self, now: DateTime<Utc>) -> Result<SurfaceRecord> {
        let report = self.validate();
        if !report.is_valid() {
            let combined = report.combined();
            log::warn!(
                "Refusing to save surface with {} validation error(s)",
                combined.errors.len()
            );
            return Err(SurfaceError::Validation(combined));
        }

        if let Some(mapping) = &self.mapping {
            let next = mapping.next_revision(now);
            log::debug!("Saving background mapping version {}", next.version);
            self.mapping = Some(next);
        }

        Ok(self.to_record())
    }
}
