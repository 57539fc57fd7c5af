//! Translating and resizing strokes.

use bevy::prelude::*;

use crate::annotation::{ShapeKind, Stroke, StrokeKind};

use super::bounds::rotate_point;
use super::handles::Handle;

/// Copy of `stroke` moved by `delta`
pub fn translate_stroke(stroke: &Stroke, delta: Vec2) -> Stroke {
    let mut moved = stroke.clone();
    match &mut moved.kind {
        StrokeKind::Pen { points } => {
            for point in points.iter_mut() {
                point.position += delta;
            }
        }
        StrokeKind::Shape { start, end, .. } => {
            *start += delta;
            *end += delta;
        }
        StrokeKind::Text { position, .. } | StrokeKind::Image { position, .. } => {
            *position += delta;
        }
        StrokeKind::Highlight { rects, .. } => {
            for rect in rects.iter_mut() {
                rect.x += delta.x;
                rect.y += delta.y;
            }
        }
    }
    moved
}

fn axis_scale(extent: f32, pull: f32) -> Option<f32> {
    (extent > 0.0001).then(|| (extent + pull) / extent)
}

/// New raw bounds after dragging `handle` by `delta` (in the stroke's
/// unrotated frame).
///
/// Corners scale uniformly using whichever axis moved more, anchored at the
/// opposite corner. Edges scale only their axis. An axis with no extent keeps
/// its size. Returns `None` when a non-degenerate side would end up smaller
/// than `min_size`.
pub fn resized_bounds(old: Rect, handle: Handle, delta: Vec2, min_size: f32) -> Option<Rect> {
    let dir = handle.direction();
    let size = old.size();
    let pull = delta * dir;

    let sx = if dir.x != 0.0 { axis_scale(size.x, pull.x) } else { None };
    let sy = if dir.y != 0.0 { axis_scale(size.y, pull.y) } else { None };

    let scale = if handle.is_corner() {
        let uniform = match (sx, sy) {
            (Some(sx), Some(sy)) => {
                if delta.x.abs() >= delta.y.abs() {
                    sx
                } else {
                    sy
                }
            }
            (Some(s), None) | (None, Some(s)) => s,
            (None, None) => return None,
        };
        Vec2::splat(uniform)
    } else {
        Vec2::new(sx.unwrap_or(1.0), sy.unwrap_or(1.0))
    };

    let new_size = size * scale;
    let too_small = |old: f32, new: f32| old > 0.0001 && new < min_size;
    if too_small(size.x, new_size.x) || too_small(size.y, new_size.y) {
        return None;
    }

    let anchor = handle.anchor_on(old);
    // Edge handles keep the other axis where it was
    let min = Vec2::new(
        if dir.x > 0.0 {
            anchor.x
        } else if dir.x < 0.0 {
            anchor.x - new_size.x
        } else {
            old.center().x - new_size.x / 2.0
        },
        if dir.y > 0.0 {
            anchor.y
        } else if dir.y < 0.0 {
            anchor.y - new_size.y
        } else {
            old.center().y - new_size.y / 2.0
        },
    );
    Some(Rect::from_corners(min, min + new_size))
}

/// Rescale `original` from raw bounds `old` to raw bounds `new`.
///
/// Positions map linearly between the two boxes; sizes (radii, font size,
/// image size, highlight rects) scale with them. For a rotated stroke the
/// result is shifted so the handle's anchor stays put on screen.
pub fn resize_stroke(original: &Stroke, old: Rect, new: Rect, handle: Handle) -> Stroke {
    let old_size = old.size();
    let new_size = new.size();
    let scale = Vec2::new(
        if old_size.x > 0.0001 { new_size.x / old_size.x } else { 1.0 },
        if old_size.y > 0.0001 { new_size.y / old_size.y } else { 1.0 },
    );
    let map = |p: Vec2| new.min + (p - old.min) * scale;

    let mut resized = original.clone();
    match &mut resized.kind {
        StrokeKind::Pen { points } => {
            for point in points.iter_mut() {
                point.position = map(point.position);
            }
        }
        StrokeKind::Shape {
            shape: ShapeKind::Circle,
            start,
            end,
            radii,
            ..
        } => {
            let radius_vec = *end - *start;
            let current = radii.unwrap_or_else(|| Vec2::splat(radius_vec.length()));
            *start = map(*start);
            *end = *start + radius_vec * scale;
            if radii.is_some() || (scale.x - scale.y).abs() > 0.0001 {
                *radii = Some(current * scale);
            }
        }
        StrokeKind::Shape { start, end, .. } => {
            *start = map(*start);
            *end = map(*end);
        }
        StrokeKind::Text {
            position,
            font_size,
            ..
        } => {
            *position = map(*position);
            *font_size *= match handle {
                Handle::N | Handle::S => scale.y,
                _ => scale.x,
            };
        }
        StrokeKind::Image { position, size, .. } => {
            *position = map(*position);
            *size *= scale;
        }
        StrokeKind::Highlight { rects, .. } => {
            for rect in rects.iter_mut() {
                let min = map(Vec2::new(rect.x, rect.y));
                rect.x = min.x;
                rect.y = min.y;
                rect.width *= scale.x;
                rect.height *= scale.y;
            }
        }
    }

    if original.rotation != 0.0 && original.supports_rotation() {
        let anchor = handle.anchor_on(old);
        let before = rotate_point(anchor, old.center(), original.rotation);
        let after = rotate_point(handle.anchor_on(new), new.center(), original.rotation);
        resized = translate_stroke(&resized, before - after);
    }
    resized
}
