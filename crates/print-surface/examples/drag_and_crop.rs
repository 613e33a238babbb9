use print_surface::*;

fn print_frame(label: &str, frame: &SurfaceFrame) {
    let p = frame.print_area;
    let b = frame.bleed_bounds;
    println!(
        "{:<12} print=({}, {}, {}x{}) bleed=({}, {}, {}x{})",
        label, p.x, p.y, p.width, p.height, b.x, b.y, b.width, b.height
    );
    if let Some(bg) = frame.background_rect {
        println!(
            "{:<12} background=({}, {}, {}x{})",
            "", bg.x, bg.y, bg.width, bg.height
        );
    }
}

fn main() -> Result<()> {
    let mut editor = SurfaceEditor::new(
        SurfaceOptions::default(),
        Rect::new(50.0, 50.0, 200.0, 150.0),
    )?;
    editor.enable_bleed();
    editor.update_mapping(MappingPatch {
        center_x: Some(45.0),
        scale: Some(1.2),
        ..Default::default()
    });
    print_frame("initial", &editor.frame());

    // Drag the print area at 200% zoom
    editor.viewport_mut().set_zoom(2.0);
    editor.pointer_down(DragHandle::Move, Point::new(300.0, 300.0));
    for step in 1..=3 {
        let pointer = Point::new(300.0 + 20.0 * step as f64, 300.0 + 10.0 * step as f64);
        if let Some(frame) = editor.pointer_move(pointer) {
            print_frame(&format!("move {}", step), &frame);
        }
    }
    editor.pointer_up();

    let report = editor.validate();
    println!("valid: {}", report.is_valid());
    for message in report.combined().messages() {
        println!("  - {}", message);
    }

    // Crop an image element: pan the photo behind a fixed mask
    let element = Rect::new(100.0, 100.0, 100.0, 100.0);
    let mut crop = CropMaskController::begin(
        element,
        Some(CropMask::new(50.0, 50.0, 40.0, 40.0)),
        editor.options(),
    );
    let viewport = Viewport::default();
    crop.pointer_down(CropHandle::Move, Point::new(0.0, 0.0));
    if let Some(frame) = crop.pointer_move(Point::new(10.0, -5.0), &viewport) {
        let on_canvas = frame.mask.canvas_rect(&frame.element);
        println!(
            "crop move    element=({}, {}) mask center=({}, {}) on canvas=({}, {})",
            frame.element.x, frame.element.y, frame.mask.x, frame.mask.y, on_canvas.x, on_canvas.y
        );
    }
    crop.pointer_up();

    crop.pointer_down(CropHandle::SE, Point::new(0.0, 0.0));
    crop.pointer_move(Point::new(40.0, 40.0), &viewport);
    crop.pointer_up();

    let commit = crop.apply();
    println!(
        "crop commit  shapeClip=({}, {}, {}x{})",
        commit.shape_clip.x, commit.shape_clip.y, commit.shape_clip.width, commit.shape_clip.height
    );

    Ok(())
}
