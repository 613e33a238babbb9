use print_surface::*;

fn session() -> DragSession {
    DragSession::new(&SurfaceOptions::default())
}

fn drag_to(
    session: &mut DragSession,
    handle: DragHandle,
    start: Rect,
    dx: f64,
    dy: f64,
    viewport: &Viewport,
) -> SurfaceFrame {
    session.pointer_down(handle, Point::new(200.0, 200.0), start);
    session
        .pointer_move(
            Point::new(200.0 + dx, 200.0 + dy),
            viewport,
            SurfaceLayers::default(),
        )
        .expect("drag in progress")
}

#[test]
fn test_move_drag() {
    let mut session = session();
    let start = Rect::new(50.0, 50.0, 200.0, 150.0);

    let frame = drag_to(&mut session, DragHandle::Move, start, 30.0, 20.0, &Viewport::default());
    assert_eq!(frame.print_area, Rect::new(80.0, 70.0, 200.0, 150.0));
    assert_eq!(frame.bleed_bounds, frame.print_area);
    assert_eq!(frame.background_rect, None);

    assert_eq!(session.pointer_up(), Some(Rect::new(80.0, 70.0, 200.0, 150.0)));
    assert_eq!(session.state(), DragState::Idle);
}

#[test]
fn test_move_is_clamped_to_canvas() {
    let mut session = session();
    let start = Rect::new(50.0, 50.0, 200.0, 150.0);
    let viewport = Viewport::default();

    let frame = drag_to(&mut session, DragHandle::Move, start, 500.0, 500.0, &viewport);
    assert_eq!(frame.print_area, Rect::new(200.0, 250.0, 200.0, 150.0));

    let frame = drag_to(&mut session, DragHandle::Move, start, -80.0, -10.0, &viewport);
    assert_eq!(frame.print_area, Rect::new(0.0, 40.0, 200.0, 150.0));
}

#[test]
fn test_resize_drag_respects_minimum_and_canvas() {
    let mut session = session();
    let start = Rect::new(100.0, 100.0, 100.0, 100.0);
    let viewport = Viewport::default();

    let frame = drag_to(&mut session, DragHandle::Resize, start, 50.0, -20.0, &viewport);
    assert_eq!(frame.print_area, Rect::new(100.0, 100.0, 150.0, 80.0));

    let frame = drag_to(&mut session, DragHandle::Resize, start, -500.0, -500.0, &viewport);
    assert_eq!(frame.print_area, Rect::new(100.0, 100.0, 20.0, 20.0));

    let frame = drag_to(&mut session, DragHandle::Resize, start, 500.0, 500.0, &viewport);
    assert_eq!(frame.print_area, Rect::new(100.0, 100.0, 300.0, 300.0));
}

#[test]
fn test_larger_minimum_size() {
    let mut session = DragSession::with_min_size(&SurfaceOptions::default(), 50.0);
    let start = Rect::new(0.0, 0.0, 100.0, 100.0);

    let frame = drag_to(&mut session, DragHandle::Resize, start, -90.0, -90.0, &Viewport::default());
    assert_eq!(frame.print_area, Rect::new(0.0, 0.0, 50.0, 50.0));
}

#[test]
fn test_drag_corrects_for_zoom() {
    let mut session = session();
    let mut viewport = Viewport::default();
    viewport.set_zoom(2.0);
    let start = Rect::new(50.0, 50.0, 100.0, 100.0);

    let frame = drag_to(&mut session, DragHandle::Move, start, 40.0, 20.0, &viewport);
    assert_eq!(frame.print_area, Rect::new(70.0, 60.0, 100.0, 100.0));

    let frame = drag_to(&mut session, DragHandle::Resize, start, 40.0, 20.0, &viewport);
    assert_eq!(frame.print_area, Rect::new(50.0, 50.0, 120.0, 110.0));
}

#[test]
fn test_frame_recomputes_overlays() {
    let mut session = session();
    let bleed = BleedArea::uniform(3.0);
    let mapping = BackgroundMapping::default();
    let layers = SurfaceLayers {
        bleed_area: Some(&bleed),
        mapping: Some(&mapping),
    };

    session.pointer_down(
        DragHandle::Move,
        Point::new(0.0, 0.0),
        Rect::new(50.0, 50.0, 200.0, 150.0),
    );
    let frame = session
        .pointer_move(Point::new(30.0, 20.0), &Viewport::default(), layers)
        .unwrap();

    assert_eq!(frame.print_area, Rect::new(80.0, 70.0, 200.0, 150.0));
    assert_eq!(frame.bleed_bounds, Rect::new(77.0, 67.0, 206.0, 156.0));
    assert_eq!(frame.background_rect, Some(Rect::new(77.0, 67.0, 206.0, 156.0)));
}

#[test]
fn test_disabled_mapping_has_no_background_rect() {
    let mapping = BackgroundMapping {
        enabled: false,
        ..Default::default()
    };
    let layers = SurfaceLayers {
        bleed_area: None,
        mapping: Some(&mapping),
    };

    let frame = SurfaceFrame::compute(Rect::new(0.0, 0.0, 100.0, 100.0), layers, 400.0);
    assert_eq!(frame.background_rect, None);
}

#[test]
fn test_idle_session_ignores_moves() {
    let mut session = session();
    assert_eq!(session.state(), DragState::Idle);
    assert!(
        session
            .pointer_move(Point::new(10.0, 10.0), &Viewport::default(), SurfaceLayers::default())
            .is_none()
    );
    assert_eq!(session.pointer_up(), None);
    assert_eq!(session.cancel(), None);
}

#[test]
fn test_cancel_returns_starting_rect() {
    let mut session = session();
    let start = Rect::new(50.0, 50.0, 200.0, 150.0);
    drag_to(&mut session, DragHandle::Move, start, 30.0, 20.0, &Viewport::default());
    assert_eq!(session.state(), DragState::Dragging(DragHandle::Move));

    assert_eq!(session.cancel(), Some(start));
    assert_eq!(session.state(), DragState::Idle);
    assert_eq!(session.pointer_up(), None);
}

#[test]
fn test_hit_test() {
    let rect = Rect::new(50.0, 50.0, 100.0, 100.0);

    assert_eq!(
        DragSession::hit_test(Point::new(152.0, 147.0), &rect, 8.0),
        Some(DragHandle::Resize)
    );
    assert_eq!(
        DragSession::hit_test(Point::new(100.0, 100.0), &rect, 8.0),
        Some(DragHandle::Move)
    );
    assert_eq!(DragSession::hit_test(Point::new(10.0, 10.0), &rect, 8.0), None);
}
