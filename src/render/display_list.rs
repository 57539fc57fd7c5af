//! Recorded draw commands.

use std::sync::Arc;

use bevy::prelude::*;
use image::RgbaImage;

use super::canvas::Canvas2d;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    LineDash(Vec<f32>),
    Polyline {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
    },
    StrokeEllipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
        width: f32,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        position: Vec2,
        font_size: f32,
        color: Color,
    },
    Image {
        image: Arc<RgbaImage>,
        rect: Rect,
    },
}

/// A [`Canvas2d`] that only records what was drawn
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether every `Save` has a matching `Restore` and none underflows
    pub fn is_balanced(&self) -> bool {
        let mut depth: i32 = 0;
        for command in &self.commands {
            match command {
                DrawCommand::Save => depth += 1,
                DrawCommand::Restore => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }

    /// Play the recording onto another canvas
    pub fn replay(&self, canvas: &mut dyn Canvas2d) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear => canvas.clear(),
                DrawCommand::Save => canvas.save(),
                DrawCommand::Restore => canvas.restore(),
                DrawCommand::Translate(offset) => canvas.translate(*offset),
                DrawCommand::Rotate(angle) => canvas.rotate(*angle),
                DrawCommand::LineDash(pattern) => canvas.set_line_dash(pattern),
                DrawCommand::Polyline {
                    points,
                    color,
                    width,
                } => canvas.stroke_polyline(points, *color, *width),
                DrawCommand::StrokeRect { rect, color, width } => {
                    canvas.stroke_rect(*rect, *color, *width)
                }
                DrawCommand::StrokeEllipse {
                    center,
                    radii,
                    color,
                    width,
                } => canvas.stroke_ellipse(*center, *radii, *color, *width),
                DrawCommand::FillRect { rect, color } => canvas.fill_rect(*rect, *color),
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => canvas.fill_circle(*center, *radius, *color),
                DrawCommand::Text {
                    text,
                    position,
                    font_size,
                    color,
                } => canvas.fill_text(text, *position, *font_size, *color),
                DrawCommand::Image { image, rect } => canvas.draw_image(image, *rect),
            }
        }
    }
}

impl Canvas2d for DisplayList {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, angle: f32) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn set_line_dash(&mut self, pattern: &[f32]) {
        self.commands.push(DrawCommand::LineDash(pattern.to_vec()));
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: Color, width: f32) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokeEllipse {
            center,
            radii,
            color,
            width,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            font_size,
            color,
        });
    }

    fn draw_image(&mut self, image: &Arc<RgbaImage>, rect: Rect) {
        self.commands.push(DrawCommand::Image {
            image: Arc::clone(image),
            rect,
        });
    }
}
