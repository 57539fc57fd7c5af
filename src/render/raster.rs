//! Rasterizer for page annotation layers.
//!
//! Paints through `tiny_skia` into a transparent pixmap. Text is laid out
//! with `ab_glyph`, drawn by `imageproc` into a coverage mask and then
//! composited like an image, so it follows the current transform. Without a
//! font the runs are kept as [`PlacedText`] for the host to draw.

use std::sync::Arc;

use ab_glyph::{FontArc, PxScale};
use bevy::prelude::*;
use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tiny_skia as skia;

use super::canvas::Canvas2d;
use super::font::default_font;
use crate::error::{AnnotationError, AnnotationResult};

/// A text run positioned in bitmap coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedText {
    pub text: String,
    /// Top-left corner in bitmap pixels
    pub position: Vec2,
    /// Rotation in radians about `position`
    pub rotation: f32,
    pub font_size: f32,
    pub color: Color,
}

#[derive(Clone, Debug)]
struct RasterState {
    transform: skia::Transform,
    dash: Vec<f32>,
}

impl Default for RasterState {
    fn default() -> Self {
        Self {
            transform: skia::Transform::identity(),
            dash: Vec::new(),
        }
    }
}

pub struct RasterCanvas {
    pixmap: skia::Pixmap,
    state: RasterState,
    stack: Vec<RasterState>,
    texts: Vec<PlacedText>,
    font: Option<FontArc>,
}

fn solid(color: Color) -> skia::Paint<'static> {
    let [r, g, b, a] = color.to_srgba().to_u8_array();
    let mut paint = skia::Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn skia_rect(rect: Rect) -> Option<skia::Rect> {
    skia::Rect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y)
}

fn map_point(transform: skia::Transform, p: Vec2) -> Vec2 {
    Vec2::new(
        transform.sx * p.x + transform.kx * p.y + transform.tx,
        transform.ky * p.x + transform.sy * p.y + transform.ty,
    )
}

/// Straight-alpha RGBA into a premultiplied pixmap
fn pixmap_from_rgba(image: &RgbaImage) -> Option<skia::Pixmap> {
    let mut pixmap = skia::Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// One line of text rendered into its own pixmap, top-left at the origin
fn text_pixmap(font: &FontArc, text: &str, font_size: f32, color: Color) -> Option<skia::Pixmap> {
    let scale = PxScale::from(font_size);
    let (width, height) = text_size(scale, font, text);
    // Room for descenders below the measured box
    let height = height.max((font_size * 1.25).ceil() as u32);
    let mut coverage = GrayImage::new(width + 2, height + 2);
    draw_text_mut(&mut coverage, Luma([255]), 0, 0, scale, font, text);

    let [r, g, b, a] = color.to_srgba().to_u8_array();
    let mut pixmap = skia::Pixmap::new(coverage.width(), coverage.height())?;
    for (dst, covered) in pixmap.pixels_mut().iter_mut().zip(coverage.pixels()) {
        let alpha = (u16::from(a) * u16::from(covered.0[0]) / 255) as u8;
        *dst = skia::ColorU8::from_rgba(r, g, b, alpha).premultiply();
    }
    Some(pixmap)
}

impl RasterCanvas {
    /// Transparent canvas using the bundled UI font for text
    pub fn new(width: u32, height: u32) -> AnnotationResult<Self> {
        let pixmap = skia::Pixmap::new(width, height)
            .ok_or(AnnotationError::InvalidGeometry("empty or oversized page bitmap"))?;
        Ok(Self {
            pixmap,
            state: RasterState::default(),
            stack: Vec::new(),
            texts: Vec::new(),
            font: default_font(),
        })
    }

    pub fn with_font(mut self, font: Option<FontArc>) -> Self {
        self.font = font;
        self
    }

    /// Current contents as straight-alpha RGBA
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let color = src.demultiply();
            *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
        }
        image
    }

    pub fn into_image(self) -> RgbaImage {
        self.to_image()
    }

    /// Text runs that could not be rasterized for lack of a font
    pub fn texts(&self) -> &[PlacedText] {
        &self.texts
    }

    fn line_style(&self, width: f32) -> skia::Stroke {
        skia::Stroke {
            width,
            line_cap: skia::LineCap::Round,
            line_join: skia::LineJoin::Round,
            // Empty or malformed patterns draw solid
            dash: skia::StrokeDash::new(self.state.dash.clone(), 0.0),
            ..Default::default()
        }
    }

    fn stroke_path(&mut self, path: Option<skia::Path>, color: Color, width: f32) {
        let Some(path) = path else {
            return;
        };
        let style = self.line_style(width);
        self.pixmap
            .stroke_path(&path, &solid(color), &style, self.state.transform, None);
    }

    /// Fill `rect` with `source` stretched over it
    fn draw_pixmap(&mut self, source: &skia::Pixmap, rect: Rect) {
        let Some(target) = skia_rect(rect) else {
            return;
        };
        let scale = rect.size() / Vec2::new(source.width() as f32, source.height() as f32);
        let placement =
            skia::Transform::from_row(scale.x, 0.0, 0.0, scale.y, rect.min.x, rect.min.y);
        let paint = skia::Paint {
            shader: skia::Pattern::new(
                source.as_ref(),
                skia::SpreadMode::Pad,
                skia::FilterQuality::Bilinear,
                1.0,
                placement,
            ),
            anti_alias: true,
            ..Default::default()
        };
        self.pixmap
            .fill_rect(target, &paint, self.state.transform, None);
    }
}

impl Canvas2d for RasterCanvas {
    fn clear(&mut self) {
        self.pixmap.fill(skia::Color::TRANSPARENT);
        self.texts.clear();
        self.state = RasterState::default();
        self.stack.clear();
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.transform = self.state.transform.pre_translate(offset.x, offset.y);
    }

    fn rotate(&mut self, angle: f32) {
        self.state.transform = self
            .state
            .transform
            .pre_concat(skia::Transform::from_rotate(angle.to_degrees()));
    }

    fn set_line_dash(&mut self, pattern: &[f32]) {
        self.state.dash = pattern.to_vec();
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: Color, width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        let mut builder = skia::PathBuilder::new();
        builder.move_to(first.x, first.y);
        for point in rest {
            builder.line_to(point.x, point.y);
        }
        self.stroke_path(builder.finish(), color, width);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        let mut builder = skia::PathBuilder::new();
        builder.move_to(rect.min.x, rect.min.y);
        builder.line_to(rect.max.x, rect.min.y);
        builder.line_to(rect.max.x, rect.max.y);
        builder.line_to(rect.min.x, rect.max.y);
        builder.close();
        self.stroke_path(builder.finish(), color, width);
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color, width: f32) {
        let oval = skia_rect(Rect::from_center_half_size(center, radii))
            .and_then(skia::PathBuilder::from_oval);
        self.stroke_path(oval, color, width);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if let Some(rect) = skia_rect(rect) {
            self.pixmap
                .fill_rect(rect, &solid(color), self.state.transform, None);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let Some(path) = skia::PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &solid(color),
            skia::FillRule::Winding,
            self.state.transform,
            None,
        );
    }

    fn fill_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color) {
        if text.is_empty() || font_size <= 0.0 {
            return;
        }
        let Some(font) = self.font.clone() else {
            let transform = self.state.transform;
            self.texts.push(PlacedText {
                text: text.to_string(),
                position: map_point(transform, position),
                rotation: transform.ky.atan2(transform.sx),
                font_size,
                color,
            });
            return;
        };
        let Some(run) = text_pixmap(&font, text, font_size, color) else {
            return;
        };
        let size = Vec2::new(run.width() as f32, run.height() as f32);
        self.draw_pixmap(&run, Rect::from_corners(position, position + size));
    }

    fn draw_image(&mut self, image: &Arc<RgbaImage>, rect: Rect) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        // Zero-sized images have no pixmap
        if let Some(source) = pixmap_from_rgba(image) {
            self.draw_pixmap(&source, rect);
        }
    }
}
