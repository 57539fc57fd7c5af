//! Drawing strokes, selection chrome and gesture overlays.

use bevy::prelude::*;

use crate::annotation::{PenPoint, ShapeKind, Stroke, StrokeKind, circle_radii};
use crate::error::{AnnotationError, AnnotationResult};
use crate::geometry::{Handle, compute_bounds, compute_unrotated_bounds};

use super::canvas::Canvas2d;
use super::image_cache::ImageCache;

pub const SELECTION_COLOR: Color = Color::srgb(0.2, 0.6, 1.0);
pub const MARQUEE_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
pub const MARQUEE_DASH: [f32; 2] = [5.0, 5.0];
const MULTI_SELECTION_DASH: [f32; 2] = [4.0, 4.0];

fn draw_pen(canvas: &mut dyn Canvas2d, points: &[PenPoint]) {
    let Some(first) = points.first() else {
        return;
    };
    if points.len() == 1 {
        canvas.fill_circle(first.position, first.thickness / 2.0, first.color);
        return;
    }
    let positions: Vec<Vec2> = points.iter().map(|p| p.position).collect();
    canvas.stroke_polyline(&positions, first.color, first.thickness);
}

/// Live pen path while the pointer is still down
pub fn draw_pen_preview(canvas: &mut dyn Canvas2d, points: &[PenPoint]) {
    draw_pen(canvas, points);
}

fn draw_unrotated(canvas: &mut dyn Canvas2d, stroke: &Stroke, images: &mut ImageCache) {
    match &stroke.kind {
        StrokeKind::Pen { points } => draw_pen(canvas, points),
        StrokeKind::Shape {
            shape,
            start,
            end,
            radii,
            color,
            thickness,
        } => match shape {
            ShapeKind::Line => canvas.stroke_polyline(&[*start, *end], *color, *thickness),
            ShapeKind::Rectangle => {
                canvas.stroke_rect(Rect::from_corners(*start, *end), *color, *thickness)
            }
            ShapeKind::Circle => canvas.stroke_ellipse(
                *start,
                circle_radii(*start, *end, *radii).abs(),
                *color,
                *thickness,
            ),
        },
        StrokeKind::Text {
            position,
            text,
            font_size,
            color,
        } => canvas.fill_text(text, *position, *font_size, *color),
        StrokeKind::Highlight { rects, color } => {
            for rect in rects {
                canvas.fill_rect(rect.to_rect(), *color);
            }
        }
        StrokeKind::Image {
            position,
            size,
            data,
        } => {
            // Not decoded yet (or undecodable): draw nothing this pass
            if let Some(image) = images.get_or_decode(data) {
                canvas.draw_image(&image, Rect::from_corners(*position, *position + *size));
            }
        }
    }
}

/// Draw one stroke, rotated about the center of its unrotated bounds
pub fn draw_stroke(
    canvas: &mut dyn Canvas2d,
    stroke: &Stroke,
    images: &mut ImageCache,
) -> AnnotationResult<()> {
    if !stroke.is_finite() {
        return Err(AnnotationError::InvalidGeometry("non-finite stroke coordinates"));
    }

    let rotated = stroke.rotation != 0.0 && stroke.supports_rotation();
    if rotated {
        let center = compute_unrotated_bounds(stroke, 0.0).center();
        canvas.save();
        canvas.translate(center);
        canvas.rotate(stroke.rotation);
        canvas.translate(-center);
    }

    draw_unrotated(canvas, stroke, images);

    if rotated {
        canvas.restore();
    }
    Ok(())
}

/// Oriented box with eight handles around a single selected stroke.
///
/// The `NE` handle is drawn as a circle when it rotates the stroke.
pub fn draw_single_selection(
    canvas: &mut dyn Canvas2d,
    stroke: &Stroke,
    padding: f32,
    handle_radius: f32,
) {
    let bounds = compute_unrotated_bounds(stroke, padding);
    let center = bounds.center();

    canvas.save();
    if stroke.supports_rotation() && stroke.rotation != 0.0 {
        canvas.translate(center);
        canvas.rotate(stroke.rotation);
        canvas.translate(-center);
    }

    canvas.stroke_rect(bounds, SELECTION_COLOR, 1.0);
    for handle in Handle::ALL {
        let position = handle.position_on(bounds);
        if handle == Handle::NE && stroke.supports_rotation() {
            canvas.stroke_ellipse(position, Vec2::splat(handle_radius), SELECTION_COLOR, 2.0);
        } else {
            canvas.fill_rect(
                Rect::from_center_half_size(position, Vec2::splat(handle_radius / 2.0)),
                SELECTION_COLOR,
            );
        }
    }
    canvas.restore();
}

/// Dashed axis-aligned boxes around every stroke of a multi-selection
pub fn draw_multi_selection(canvas: &mut dyn Canvas2d, strokes: &[&Stroke], padding: f32) {
    canvas.save();
    canvas.set_line_dash(&MULTI_SELECTION_DASH);
    for stroke in strokes {
        canvas.stroke_rect(compute_bounds(stroke, padding), SELECTION_COLOR, 1.0);
    }
    canvas.restore();
}

/// Dashed rubber band for rectangular select and capture
pub fn draw_marquee(canvas: &mut dyn Canvas2d, rect: Rect) {
    canvas.save();
    canvas.set_line_dash(&MARQUEE_DASH);
    canvas.stroke_rect(rect, MARQUEE_COLOR, 1.0);
    canvas.restore();
}
