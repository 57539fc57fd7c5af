use std::f32::consts::FRAC_PI_2;

use super::*;
use crate::annotation::HighlightRect;
use crate::geometry::{Handle, compute_unrotated_bounds, handle_positions, rotate_point};

fn selected_rectangle(h: &mut Harness) -> Stroke {
    let rect = rectangle(Vec2::new(50.0, 50.0), Vec2::new(150.0, 100.0));
    h.load(1, vec![rect.clone()]);
    h.set_tool(Tool::Select);
    h.click(75.0, 100.0);
    assert!(h.editor.selection().contains(rect.id));
    rect
}

fn shape_corners(stroke: &Stroke) -> (Vec2, Vec2) {
    match &stroke.kind {
        StrokeKind::Shape { start, end, .. } => (*start, *end),
        _ => panic!("expected a shape"),
    }
}

#[test]
fn test_corner_resize_keeps_aspect_ratio() {
    let mut h = Harness::new();
    let original = selected_rectangle(&mut h);

    // SE handle of the padded selection box
    h.down(156.0, 106.0);
    assert!(matches!(h.editor.gesture(), Gesture::Resizing { .. }));
    h.move_to(206.0, 116.0);
    h.up(206.0, 116.0);

    let (start, end) = shape_corners(&h.strokes(1)[0]);
    assert_eq!(start, Vec2::new(50.0, 50.0));
    assert!((end - Vec2::new(200.0, 125.0)).length() < 0.001);
    assert_eq!(h.host.changes, vec!["Resize"]);

    assert!(h.undo());
    assert_eq!(h.strokes(1)[0], original);
}

#[test]
fn test_edge_resize_scales_one_axis() {
    let mut h = Harness::new();
    selected_rectangle(&mut h);

    // E handle
    h.drag((156.0, 75.0), (176.0, 90.0));

    let (start, end) = shape_corners(&h.strokes(1)[0]);
    assert_eq!(start, Vec2::new(50.0, 50.0));
    assert!((end - Vec2::new(170.0, 100.0)).length() < 0.001);
}

#[test]
fn test_resize_below_minimum_is_ignored() {
    let mut h = Harness::new();
    let original = selected_rectangle(&mut h);

    h.drag((156.0, 106.0), (61.0, 61.0));

    assert_eq!(h.strokes(1)[0], original);
    assert!(h.history().is_empty());
}

#[test]
fn test_rotate_with_ne_handle() {
    let mut h = Harness::new();
    let original = selected_rectangle(&mut h);

    // Center is (100, 75); the NE handle sits at (156, 44). A quarter turn
    // clockwise on screen moves it to (131, 131).
    h.down(156.0, 44.0);
    assert!(matches!(h.editor.gesture(), Gesture::Rotating { .. }));
    h.move_to(131.0, 131.0);
    h.up(131.0, 131.0);

    let rotated = &h.strokes(1)[0];
    assert!((rotated.rotation - FRAC_PI_2).abs() < 0.001);
    assert_eq!(shape_corners(rotated), shape_corners(&original));
    assert_eq!(h.host.changes, vec!["Rotate"]);

    assert!(h.undo());
    assert_eq!(h.strokes(1)[0].rotation, 0.0);
}

/// Drag the NE handle of the only stroke on page 1 by `angle` about its center
fn rotate_by(h: &mut Harness, angle: f32) {
    let stroke = h.strokes(1)[0].clone();
    let bounds = compute_unrotated_bounds(&stroke, h.editor.config().selection_padding);
    let (_, handle) = handle_positions(bounds, &stroke)
        .into_iter()
        .find(|(handle, _)| *handle == Handle::NE)
        .expect("selection box has an NE handle");
    let target = rotate_point(handle, bounds.center(), angle);

    h.down(handle.x, handle.y);
    assert!(matches!(h.editor.gesture(), Gesture::Rotating { .. }));
    h.move_to(target.x, target.y);
    h.up(target.x, target.y);
}

#[test]
fn test_second_rotation_builds_on_the_first() {
    let mut h = Harness::new();
    selected_rectangle(&mut h);

    rotate_by(&mut h, 30f32.to_radians());
    assert!((h.strokes(1)[0].rotation - 30f32.to_radians()).abs() < 0.001);

    rotate_by(&mut h, 45f32.to_radians());
    assert!((h.strokes(1)[0].rotation - 75f32.to_radians()).abs() < 0.001);
    assert_eq!(h.host.changes, vec!["Rotate", "Rotate"]);

    assert!(h.undo());
    assert!((h.strokes(1)[0].rotation - 30f32.to_radians()).abs() < 0.001);
}

#[test]
fn test_rotation_is_normalized() {
    let mut h = Harness::new();
    selected_rectangle(&mut h);

    // A quarter turn counter-clockwise lands at 3π/2, not -π/2
    h.drag((156.0, 44.0), (69.0, 19.0));

    let rotation = h.strokes(1)[0].rotation;
    assert!((rotation - 3.0 * FRAC_PI_2).abs() < 0.001);
}

#[test]
fn test_highlight_ne_handle_resizes() {
    let mut h = Harness::new();
    let highlight = Stroke::highlight(
        vec![HighlightRect {
            x: 50.0,
            y: 50.0,
            width: 100.0,
            height: 20.0,
        }],
        Color::srgba(1.0, 1.0, 0.0, 0.35),
    );
    h.load(1, vec![highlight]);
    h.set_tool(Tool::Select);
    h.click(100.0, 60.0);

    h.down(156.0, 44.0);
    assert!(matches!(
        h.editor.gesture(),
        Gesture::Resizing {
            handle: crate::geometry::Handle::NE,
            ..
        }
    ));
    h.move_to(176.0, 44.0);
    h.up(176.0, 44.0);

    let StrokeKind::Highlight { rects, .. } = &h.strokes(1)[0].kind else {
        panic!("expected a highlight");
    };
    assert!((rects[0].width - 120.0).abs() < 0.001);
    assert_eq!(h.strokes(1)[0].rotation, 0.0);
}

#[test]
fn test_cancel_reverts_live_transform() {
    let mut h = Harness::new();
    let original = selected_rectangle(&mut h);

    h.down(156.0, 106.0);
    h.move_to(206.0, 116.0);
    assert_ne!(h.strokes(1)[0], original);
    h.with(|editor, ctx| editor.pointer_cancel(ctx, &at(206.0, 116.0)));

    assert_eq!(h.strokes(1)[0], original);
    assert!(h.history().is_empty());
}

#[test]
fn test_hand_tool_pans_against_pointer() {
    let mut h = Harness::new();
    h.host.scroll = Vec2::new(0.0, 100.0);
    h.set_tool(Tool::Hand);

    h.down(100.0, 100.0);
    h.move_to(80.0, 70.0);
    assert_eq!(h.host.scroll, Vec2::new(20.0, 130.0));
    h.up(80.0, 70.0);
    assert!(h.editor.gesture().is_idle());
    assert!(h.history().is_empty());
}
