// tests/geometry_tests.rs
use cardscan_core::{
    CornerQuad, GeometryError, NormalizedPoint, NormalizedRect, ViewPoint, ViewportSize,
    aggregate, contains, to_view_space,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_mapper_formula_over_unit_square() {
    let viewports = [(320.0, 480.0), (1080.0, 1920.0), (1.0, 1.0)];

    for &(w, h) in &viewports {
        for i in 0..=10 {
            for j in 0..=10 {
                let p = NormalizedPoint::new(i as f64 / 10.0, j as f64 / 10.0);
                let mapped = to_view_space(&p, w, h);
                assert!(close(mapped.x, p.x * w));
                assert!(close(mapped.y, (1.0 - p.y) * h));
            }
        }
    }
}

#[test]
fn test_mapper_extremes() {
    assert_eq!(
        to_view_space(&NormalizedPoint::new(0.0, 0.0), 640.0, 480.0),
        ViewPoint::new(0.0, 480.0)
    );
    assert_eq!(
        to_view_space(&NormalizedPoint::new(1.0, 1.0), 640.0, 480.0),
        ViewPoint::new(640.0, 0.0)
    );
}

#[test]
fn test_card_contains_face_and_word() {
    let card = CornerQuad::new(
        NormalizedPoint::new(0.1, 0.8),
        NormalizedPoint::new(0.9, 0.8),
        NormalizedPoint::new(0.1, 0.2),
        NormalizedPoint::new(0.9, 0.2),
    );
    let face = NormalizedRect::new(0.15, 0.4, 0.2, 0.3);
    let word = NormalizedRect::new(0.5, 0.6, 0.3, 0.05);
    let outside = NormalizedRect::new(0.85, 0.6, 0.1, 0.05);

    let bounds = card.bounding_box();
    assert!(contains(&bounds, &face));
    assert!(contains(&bounds, &word));
    assert!(!contains(&bounds, &outside));
}

#[test]
fn test_aggregated_word_maps_into_view() {
    let glyph = |left: f64, right: f64| {
        CornerQuad::from_rect(&NormalizedRect::new(left, 0.1, right - left, 0.2))
    };
    let word = aggregate(&[glyph(0.1, 0.2), glyph(0.2, 0.3)]).unwrap();
    let rect = ViewportSize::new(100.0, 100.0).map_rect(&word);

    assert!(close(rect.x, 10.0));
    assert!(close(rect.y, 70.0));
    assert!(close(rect.width, 20.0));
    assert!(close(rect.height, 20.0));
}

#[test]
fn test_aggregate_empty() {
    assert_eq!(aggregate(&[]), Err(GeometryError::EmptyInput));
}
