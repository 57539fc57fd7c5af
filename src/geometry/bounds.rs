//! Bounding boxes for strokes.

use bevy::prelude::*;

use crate::annotation::{ShapeKind, Stroke, StrokeKind, circle_radii};
use crate::constants::TEXT_WIDTH_FACTOR;

/// Approximate rendered width of a single line of text
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * TEXT_WIDTH_FACTOR
}

/// Rotate a point around a center by the given angle (in radians)
pub fn rotate_point(point: Vec2, center: Vec2, angle: f32) -> Vec2 {
    if angle == 0.0 {
        return point;
    }
    let (sin_a, cos_a) = angle.sin_cos();
    let translated = point - center;
    Vec2::new(
        translated.x * cos_a - translated.y * sin_a,
        translated.x * sin_a + translated.y * cos_a,
    ) + center
}

fn points_bounds(mut points: impl Iterator<Item = Vec2>) -> Rect {
    let Some(first) = points.next() else {
        return Rect::default();
    };
    let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
    Rect::from_corners(min, max)
}

/// Bounds of a stroke ignoring its rotation, grown by `padding` on every side
pub fn compute_unrotated_bounds(stroke: &Stroke, padding: f32) -> Rect {
    let raw = match &stroke.kind {
        StrokeKind::Pen { points } => points_bounds(points.iter().map(|p| p.position)),
        StrokeKind::Shape {
            shape: ShapeKind::Circle,
            start,
            end,
            radii,
            ..
        } => Rect::from_center_half_size(*start, circle_radii(*start, *end, *radii).abs()),
        StrokeKind::Shape { start, end, .. } => Rect::from_corners(*start, *end),
        StrokeKind::Text {
            position,
            text,
            font_size,
            ..
        } => Rect::from_corners(
            *position,
            *position + Vec2::new(text_width(text, *font_size), *font_size),
        ),
        StrokeKind::Highlight { rects, .. } => {
            points_bounds(rects.iter().flat_map(|r| {
                let rect = r.to_rect();
                [rect.min, rect.max]
            }))
        }
        StrokeKind::Image { position, size, .. } => {
            Rect::from_corners(*position, *position + *size)
        }
    };

    if padding == 0.0 {
        raw
    } else {
        raw.inflate(padding)
    }
}

/// Corners of the unrotated bounds, rotated with the stroke.
///
/// Order: top-left, top-right, bottom-right, bottom-left.
pub fn rotated_corners(stroke: &Stroke, padding: f32) -> [Vec2; 4] {
    let bounds = compute_unrotated_bounds(stroke, padding);
    let center = bounds.center();
    [
        bounds.min,
        Vec2::new(bounds.max.x, bounds.min.y),
        bounds.max,
        Vec2::new(bounds.min.x, bounds.max.y),
    ]
    .map(|corner| rotate_point(corner, center, stroke.rotation))
}

/// Axis-aligned bounds of a stroke including its rotation
pub fn compute_bounds(stroke: &Stroke, padding: f32) -> Rect {
    if stroke.rotation == 0.0 {
        return compute_unrotated_bounds(stroke, padding);
    }
    points_bounds(rotated_corners(stroke, padding).into_iter())
}

/// Whether two rectangles overlap (touching edges count)
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.min.x <= b.max.x && a.max.x >= b.min.x && a.min.y <= b.max.y && a.max.y >= b.min.y
}
