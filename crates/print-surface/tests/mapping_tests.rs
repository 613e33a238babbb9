use chrono::{TimeZone, Utc};
use print_surface::*;

const DISPLAY: f64 = 400.0;

fn full_canvas() -> Rect {
    Rect::new(0.0, 0.0, 400.0, 400.0)
}

fn mapping(center_x: f64, center_y: f64, scale: f64) -> BackgroundMapping {
    constrain(
        MappingPatch {
            center_x: Some(center_x),
            center_y: Some(center_y),
            scale: Some(scale),
            ..Default::default()
        },
        0.1,
        5.0,
    )
}

// =============================================================================
// constrain
// =============================================================================

#[test]
fn test_constrain_fills_defaults() {
    let m = constrain(MappingPatch::default(), 0.1, 5.0);
    assert!(m.enabled);
    assert_eq!(m.center_x, 50.0);
    assert_eq!(m.center_y, 50.0);
    assert_eq!(m.scale, 1.0);
    assert_eq!(m.version, 0);
    assert!(m.applied_at.is_none());
}

#[test]
fn test_constrain_clamps_ranges() {
    let m = mapping(150.0, -5.0, 10.0);
    assert_eq!(m.center_x, 100.0);
    assert_eq!(m.center_y, 0.0);
    assert_eq!(m.scale, 5.0);

    let m = mapping(50.0, 50.0, 0.01);
    assert_eq!(m.scale, 0.1);
}

#[test]
fn test_constrain_uses_configured_scale_limits() {
    let m = constrain(
        MappingPatch {
            scale: Some(3.0),
            ..Default::default()
        },
        0.5,
        2.0,
    );
    assert_eq!(m.scale, 2.0);
}

#[test]
fn test_constrain_is_idempotent() {
    let once = mapping(120.0, 33.3, 7.0);
    let twice = once.constrained(0.1, 5.0);
    assert_eq!(once, twice);
}

#[test]
fn test_constrain_keeps_disabled_flag_and_version() {
    let m = constrain(
        MappingPatch {
            enabled: Some(false),
            version: Some(7),
            ..Default::default()
        },
        0.1,
        5.0,
    );
    assert!(!m.enabled);
    assert_eq!(m.version, 7);
}

#[test]
fn test_patch_over_existing_mapping() {
    let base = mapping(20.0, 30.0, 2.0);
    let patch = MappingPatch {
        center_x: Some(80.0),
        ..Default::default()
    };
    let m = constrain(patch.over(&base), 0.1, 5.0);
    assert_eq!(m.center_x, 80.0);
    assert_eq!(m.center_y, 30.0);
    assert_eq!(m.scale, 2.0);
}

#[test]
fn test_next_revision_bumps_version() {
    let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    let m = mapping(50.0, 50.0, 1.0);

    let saved = m.next_revision(now);
    assert_eq!(saved.version, 1);
    assert_eq!(saved.applied_at, Some(now));

    let saved_again = saved.next_revision(now);
    assert_eq!(saved_again.version, 2);
}

#[cfg(feature = "serde")]
#[test]
fn test_malformed_patch_fields_are_repaired() {
    let patch: MappingPatch =
        serde_json::from_str(r#"{"centerX":"75","centerY":"abc","scale":null,"enabled":true}"#)
            .unwrap();
    let m = constrain(patch, 0.1, 5.0);
    assert_eq!(m.center_x, 75.0);
    assert_eq!(m.center_y, 50.0);
    assert_eq!(m.scale, 1.0);
}

#[cfg(feature = "serde")]
#[test]
fn test_mapping_wire_names() {
    let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    let m = mapping(25.0, 75.0, 1.5).next_revision(now);

    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["enabled"], true);
    assert_eq!(json["centerX"], 25.0);
    assert_eq!(json["centerY"], 75.0);
    assert_eq!(json["scale"], 1.5);
    assert_eq!(json["version"], 1);
    assert_eq!(json["appliedAt"], "2026-01-02T03:04:05Z");
}

// =============================================================================
// map_to_background
// =============================================================================

#[test]
fn test_identity_mapping_round_trips_full_canvas() {
    let mapped = map_to_background(None, Some(&full_canvas()), &mapping(50.0, 50.0, 1.0), DISPLAY);
    assert_eq!(mapped, full_canvas());
}

#[test]
fn test_identity_mapping_keeps_bleed_bounds() {
    let print = Rect::new(50.0, 50.0, 200.0, 150.0);
    let bleed = BleedArea::uniform(3.0);

    let mapped = map_to_background(
        Some(&bleed),
        Some(&print),
        &mapping(50.0, 50.0, 1.0),
        DISPLAY,
    );
    assert_eq!(mapped, Rect::new(47.0, 47.0, 206.0, 156.0));
}

#[test]
fn test_center_shifts_mapped_rect() {
    let mapped = map_to_background(None, Some(&full_canvas()), &mapping(100.0, 50.0, 1.0), DISPLAY);
    assert_eq!(mapped, Rect::new(200.0, 0.0, 400.0, 400.0));

    let mapped = map_to_background(None, Some(&full_canvas()), &mapping(50.0, 25.0, 1.0), DISPLAY);
    assert_eq!(mapped, Rect::new(0.0, -100.0, 400.0, 400.0));
}

#[test]
fn test_display_size_is_independent_of_canvas() {
    let print = Rect::new(0.0, 0.0, 200.0, 200.0);

    let mapped = map_to_background(None, Some(&print), &mapping(50.0, 50.0, 2.0), 800.0);
    assert_eq!(mapped, Rect::new(-400.0, -400.0, 400.0, 400.0));
}

#[test]
fn test_missing_print_area_is_unmappable() {
    let mapped = map_to_background(None, None, &mapping(50.0, 50.0, 1.0), DISPLAY);
    assert!(mapped.is_zero());
}

#[test]
fn test_unusable_display_size_is_unmappable() {
    let m = mapping(50.0, 50.0, 1.0);
    assert!(map_to_background(None, Some(&full_canvas()), &m, 0.0).is_zero());
    assert!(map_to_background(None, Some(&full_canvas()), &m, -400.0).is_zero());
    assert!(map_to_background(None, Some(&full_canvas()), &m, f64::NAN).is_zero());
}

// =============================================================================
// validate_mapping_bounds
// =============================================================================

#[test]
fn test_right_edge_overflow_is_reported() {
    let report = validate_mapping_bounds(
        &mapping(100.0, 50.0, 1.0),
        Some(&full_canvas()),
        None,
        DISPLAY,
    );
    assert!(!report.is_valid());
    assert_eq!(report.errors.len(), 1);
    match &report.errors[0] {
        ValidationError::Overflow { side, by, .. } => {
            assert_eq!(*side, Side::Right);
            assert!(*by > 0.0);
            assert_eq!(*by, 200.0);
        }
        other => panic!("Expected Overflow, got {:?}", other),
    }
    assert_eq!(
        report.messages(),
        vec!["right side exceeds background boundary by 200 pixels"]
    );
}

#[test]
fn test_mapping_inside_background_is_valid() {
    let print = Rect::new(100.0, 100.0, 200.0, 200.0);
    let report = validate_mapping_bounds(&mapping(40.0, 60.0, 1.0), Some(&print), None, DISPLAY);
    assert!(report.is_valid());
}

#[test]
fn test_unmappable_mapping_is_invalid() {
    let report = validate_mapping_bounds(&mapping(50.0, 50.0, 1.0), None, None, DISPLAY);
    assert_eq!(
        report.messages(),
        vec!["background mapping could not be computed"]
    );
}

// =============================================================================
// Background image assets
// =============================================================================

#[test]
fn test_valid_background_urls() {
    assert!(validate_background_url("https://cdn.example.com/bg/photo.png").is_ok());
    assert!(validate_background_url("http://localhost:3000/uploads/bg.jpg").is_ok());
    assert!(validate_background_url("https://user@images.example.com:8443/a?b=c#d").is_ok());
    assert!(validate_background_url("https://[::1]:8080/x.png").is_ok());
}

#[test]
fn test_invalid_background_urls() {
    assert_eq!(validate_background_url(""), Err(AssetError::Empty));
    assert_eq!(validate_background_url("   "), Err(AssetError::Empty));
    assert_eq!(
        validate_background_url("/uploads/bg.png"),
        Err(AssetError::Relative("/uploads/bg.png".to_string()))
    );
    assert_eq!(
        validate_background_url("ftp://example.com/bg.png"),
        Err(AssetError::UnsupportedScheme)
    );
    assert!(matches!(
        validate_background_url("https://"),
        Err(AssetError::Malformed(_))
    ));
    assert!(matches!(
        validate_background_url("https://exa mple.com/bg.png"),
        Err(AssetError::Malformed(_))
    ));
    assert!(matches!(
        validate_background_url("https://example.com:99999/bg.png"),
        Err(AssetError::Malformed(_))
    ));
    assert!(matches!(
        validate_background_url("https://example..com/bg.png"),
        Err(AssetError::Malformed(_))
    ));
}

fn image(url: &str) -> BackgroundImage {
    BackgroundImage {
        url: url.to_string(),
        uploaded_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        file_info: FileInfo {
            filename: "bg.png".to_string(),
            original_name: Some("My Photo.png".to_string()),
            size: 1_048_576,
            size_mb: Some("1.00".to_string()),
        },
    }
}

#[test]
fn test_validation_rejects_what_merge_repairs() {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).unwrap();

    // External callers may not send relative URLs
    let report = validate_background_image(&image("/uploads/bg.png"));
    assert!(!report.is_valid());

    // The internal update path fixes them instead
    let merged = merge_background_update(
        None,
        BackgroundImageUpdate {
            url: Some("/uploads/bg.png".to_string()),
            ..Default::default()
        },
        "http://localhost:3000/",
        now,
    )
    .unwrap();
    assert_eq!(merged.url, "http://localhost:3000/uploads/bg.png");
    assert_eq!(merged.uploaded_at, now);
    assert_eq!(merged.file_info.filename, "bg.png");
    assert!(validate_background_image(&merged).is_valid());
}

#[test]
fn test_merge_does_not_repair_foreign_schemes() {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).unwrap();

    for url in ["ftp://files.example.com/bg.png", "data:image/png;base64,AAAA"] {
        let result = merge_background_update(
            None,
            BackgroundImageUpdate {
                url: Some(url.to_string()),
                ..Default::default()
            },
            "http://localhost:3000",
            now,
        );
        assert_eq!(result, Err(AssetError::UnsupportedScheme), "{}", url);
        assert_eq!(normalize_url(url, "http://localhost:3000"), url);
    }
}

#[test]
fn test_merge_keeps_existing_url_and_timestamp() {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).unwrap();
    let existing = image("https://cdn.example.com/bg.png");

    let merged = merge_background_update(
        Some(&existing),
        BackgroundImageUpdate {
            file_info: Some(FileInfo {
                filename: "bg.png".to_string(),
                original_name: None,
                size: 2_097_152,
                size_mb: None,
            }),
            ..Default::default()
        },
        "http://localhost:3000",
        now,
    )
    .unwrap();

    assert_eq!(merged.url, existing.url);
    assert_eq!(merged.uploaded_at, existing.uploaded_at);
    assert_eq!(merged.file_info.size_mb.as_deref(), Some("2.00"));
}

#[test]
fn test_merge_new_url_restamps_upload_time() {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).unwrap();
    let existing = image("https://cdn.example.com/bg.png");

    let merged = merge_background_update(
        Some(&existing),
        BackgroundImageUpdate {
            url: Some("https://cdn.example.com/other.png".to_string()),
            ..Default::default()
        },
        "http://localhost:3000",
        now,
    )
    .unwrap();
    assert_eq!(merged.uploaded_at, now);
}

#[test]
fn test_merge_without_any_url_fails() {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).unwrap();
    let result = merge_background_update(
        None,
        BackgroundImageUpdate::default(),
        "http://localhost:3000",
        now,
    );
    assert_eq!(result, Err(AssetError::Empty));
}

#[test]
fn test_normalize_url_passes_absolute_through() {
    assert_eq!(
        normalize_url("https://cdn.example.com/a.png", "http://localhost:3000"),
        "https://cdn.example.com/a.png"
    );
    assert_eq!(
        normalize_url("uploads/a.png", "http://localhost:3000"),
        "http://localhost:3000/uploads/a.png"
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_background_image_wire_names() {
    let json = serde_json::to_value(image("https://cdn.example.com/bg.png")).unwrap();
    assert_eq!(json["url"], "https://cdn.example.com/bg.png");
    assert_eq!(json["uploadedAt"], "2026-03-01T12:00:00Z");
    assert_eq!(json["fileInfo"]["filename"], "bg.png");
    assert_eq!(json["fileInfo"]["originalName"], "My Photo.png");
    assert_eq!(json["fileInfo"]["size"], 1_048_576);
    assert_eq!(json["fileInfo"]["sizeMB"], "1.00");
}
