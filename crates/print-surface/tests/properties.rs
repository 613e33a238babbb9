use print_surface::*;
use proptest::prelude::*;

const EPS: f64 = 1e-9;

fn print_area() -> impl Strategy<Value = Rect> {
    (0.0..380.0f64, 0.0..380.0f64)
        .prop_flat_map(|(x, y)| (Just(x), Just(y), 20.0..=(400.0 - x), 20.0..=(400.0 - y)))
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn crop_handle() -> impl Strategy<Value = CropHandle> {
    prop_oneof![
        Just(CropHandle::Move),
        Just(CropHandle::N),
        Just(CropHandle::S),
        Just(CropHandle::E),
        Just(CropHandle::W),
        Just(CropHandle::NE),
        Just(CropHandle::NW),
        Just(CropHandle::SE),
        Just(CropHandle::SW),
    ]
}

proptest! {
    #[test]
    fn identity_mapping_reproduces_bleed_bounds(
        x in 0i32..300,
        y in 0i32..300,
        w in 20i32..100,
        h in 20i32..100,
        bleed in 0i32..20,
    ) {
        let print = Rect::new(x as f64, y as f64, w as f64, h as f64);
        let bleed = BleedArea::uniform(bleed as f64);
        let mapped = map_to_background(Some(&bleed), Some(&print), &BackgroundMapping::default(), 400.0);
        prop_assert_eq!(mapped, calculate_bleed_bounds(&print, Some(&bleed)));
    }

    #[test]
    fn bleed_bounds_contain_print_area(
        print in print_area(),
        top in 0.0..50.0f64,
        right in 0.0..50.0f64,
        bottom in 0.0..50.0f64,
        left in 0.0..50.0f64,
    ) {
        let bleed = BleedArea::separate(Margins { top, right, bottom, left });
        let bounds = calculate_bleed_bounds(&print, Some(&bleed));
        prop_assert!(bounds.x <= print.x + EPS);
        prop_assert!(bounds.y <= print.y + EPS);
        prop_assert!(bounds.right() + EPS >= print.right());
        prop_assert!(bounds.bottom() + EPS >= print.bottom());
    }

    #[test]
    fn constrain_is_idempotent_and_in_range(
        center_x in proptest::option::of(-500.0..500.0f64),
        center_y in proptest::option::of(-500.0..500.0f64),
        scale in proptest::option::of(-10.0..10.0f64),
    ) {
        let patch = MappingPatch { center_x, center_y, scale, ..Default::default() };
        let once = constrain(patch, 0.1, 5.0);
        prop_assert!((0.0..=100.0).contains(&once.center_x));
        prop_assert!((0.0..=100.0).contains(&once.center_y));
        prop_assert!((0.1..=5.0).contains(&once.scale));

        let twice = once.constrained(0.1, 5.0);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn crop_mask_stays_inside_element(
        handle in crop_handle(),
        width in 20.0..300.0f64,
        height in 20.0..300.0f64,
        dx in -400.0..400.0f64,
        dy in -400.0..400.0f64,
        zoom in 0.25..4.0f64,
    ) {
        let element = Rect::new(50.0, 50.0, width, height);
        let mut ctrl = CropMaskController::begin(element, None, &SurfaceOptions::default());
        let mut viewport = Viewport::default();
        viewport.set_zoom(zoom);

        ctrl.pointer_down(handle, Point::new(0.0, 0.0));
        let frame = ctrl.pointer_move(Point::new(dx, dy), &viewport).unwrap();
        let mask = frame.mask;

        prop_assert!(mask.left() >= -EPS);
        prop_assert!(mask.top() >= -EPS);
        prop_assert!(mask.right() <= width + EPS);
        prop_assert!(mask.bottom() <= height + EPS);
        prop_assert!(mask.width + EPS >= 20.0_f64.min(width));
        prop_assert!(mask.height + EPS >= 20.0_f64.min(height));
    }

    #[test]
    fn dragged_print_area_stays_on_canvas(
        start in print_area(),
        resize in any::<bool>(),
        dx in -800.0..800.0f64,
        dy in -800.0..800.0f64,
    ) {
        let mut session = DragSession::new(&SurfaceOptions::default());
        let handle = if resize { DragHandle::Resize } else { DragHandle::Move };

        session.pointer_down(handle, Point::new(0.0, 0.0), start);
        let frame = session
            .pointer_move(Point::new(dx, dy), &Viewport::default(), SurfaceLayers::default())
            .unwrap();
        let rect = frame.print_area;

        prop_assert!(rect.x >= 0.0 && rect.y >= 0.0);
        prop_assert!(rect.right() <= 400.0 + EPS);
        prop_assert!(rect.bottom() <= 400.0 + EPS);
        prop_assert!(rect.width + EPS >= 20.0 && rect.height + EPS >= 20.0);
    }
}
