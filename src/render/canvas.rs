//! 2D drawing seam.

use std::sync::Arc;

use bevy::prelude::*;
use image::RgbaImage;

/// Minimal immediate-mode 2D context, modeled on the HTML canvas API.
///
/// Coordinates are canvas bitmap pixels. `save`/`restore` push and pop the
/// transform and line dash.
pub trait Canvas2d {
    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
    /// Alternating dash/gap lengths; empty for solid lines
    fn set_line_dash(&mut self, pattern: &[f32]);
    fn stroke_polyline(&mut self, points: &[Vec2], color: Color, width: f32);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);
    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color, width: f32);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Text with its top-left corner at `position`
    fn fill_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color);
    fn draw_image(&mut self, image: &Arc<RgbaImage>, rect: Rect);
}
