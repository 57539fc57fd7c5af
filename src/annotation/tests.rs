//! Unit tests for the annotation data model.

use bevy::prelude::*;

use super::*;

fn blue_pen() -> Stroke {
    Stroke::pen(vec![
        PenPoint::new(Vec2::new(0.0, 0.0), default_draw_color(), 2.0),
        PenPoint::new(Vec2::new(10.0, 10.0), default_draw_color(), 2.0),
    ])
}

#[test]
fn test_fresh_id_differs() {
    let stroke = blue_pen();
    let copy = stroke.with_fresh_id();

    assert_ne!(stroke.id, copy.id);
    assert_eq!(stroke.kind, copy.kind);
}

#[test]
fn test_highlight_never_rotates() {
    let highlight = Stroke::highlight(
        vec![HighlightRect::from_rect(Rect::new(0.0, 0.0, 50.0, 12.0))],
        default_highlight_color(),
    );
    assert!(!highlight.supports_rotation());
    assert!(blue_pen().supports_rotation());
}

#[test]
fn test_with_color_updates_every_pen_point() {
    let red = named_color("red").unwrap();
    let recolored = blue_pen().with_color(red).unwrap();

    let StrokeKind::Pen { points } = &recolored.kind else {
        panic!("expected pen stroke");
    };
    assert!(points.iter().all(|p| p.color == red));
}

#[test]
fn test_image_has_no_color_or_thickness() {
    let image = Stroke::image(Vec2::ZERO, Vec2::splat(10.0), vec![1u8, 2, 3]);

    assert!(image.color().is_none());
    assert!(image.with_color(Color::WHITE).is_none());
    assert!(image.with_thickness(4.0).is_none());
}

#[test]
fn test_with_text_only_for_text() {
    let text = Stroke::text(Vec2::ZERO, "hello", 16.0, Color::BLACK);
    let edited = text.with_text("bye").unwrap();

    let StrokeKind::Text { text: content, .. } = &edited.kind else {
        panic!("expected text stroke");
    };
    assert_eq!(content, "bye");
    assert!(blue_pen().with_text("x").is_none());
}

#[test]
fn test_type_names_match_serialized_tag() {
    let line = Stroke::shape(ShapeKind::Line, Vec2::ZERO, Vec2::ONE, Color::BLACK, 2.0);
    let json = serde_json::to_value(&line).unwrap();

    assert_eq!(json["type"], "shape");
    assert_eq!(json["shape"], "line");
    assert_eq!(line.type_name(), "line");

    let highlight = Stroke::highlight(vec![], default_highlight_color());
    let json = serde_json::to_value(&highlight).unwrap();
    assert_eq!(json["type"], highlight.type_name());
}

#[test]
fn test_stroke_deserializes_without_rotation() {
    let text = Stroke::text(Vec2::new(5.0, 6.0), "note", 16.0, Color::BLACK);
    let mut json = serde_json::to_value(&text).unwrap();
    json.as_object_mut().unwrap().remove("rotation");

    let parsed: Stroke = serde_json::from_value(json).unwrap();
    assert_eq!(parsed.rotation, 0.0);
    assert_eq!(parsed.kind, text.kind);
}

#[test]
fn test_is_finite_rejects_nan() {
    let mut stroke = blue_pen();
    assert!(stroke.is_finite());

    stroke.rotation = f32::NAN;
    assert!(!stroke.is_finite());
}

#[test]
fn test_palette_names_resolve() {
    for row in PALETTE {
        for name in row {
            assert!(named_color(name).is_some(), "{name} should resolve");
        }
    }
    assert_eq!(named_color(DEFAULT_DRAW_COLOR), Some(default_draw_color()));
    assert!(named_color("not-a-color").is_none());
}

#[test]
fn test_circle_radii_default_to_distance() {
    let radii = circle_radii(Vec2::ZERO, Vec2::new(3.0, 4.0), None);
    assert_eq!(radii, Vec2::splat(5.0));

    let ellipse = circle_radii(Vec2::ZERO, Vec2::new(3.0, 4.0), Some(Vec2::new(2.0, 8.0)));
    assert_eq!(ellipse, Vec2::new(2.0, 8.0));
}
