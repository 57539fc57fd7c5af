//! Unit tests for the render pipeline.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use super::*;
use crate::annotation::{HighlightRect, PenPoint, ShapeKind, Stroke};

fn png_bytes(image: RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn wait_for_decode(cache: &mut ImageCache) -> Vec<u64> {
    for _ in 0..200 {
        let ready = cache.poll();
        if !ready.is_empty() || !cache.has_pending() {
            return ready;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("decode did not finish");
}

#[test]
fn test_rotated_stroke_is_balanced() {
    let mut rect = Stroke::shape(
        ShapeKind::Rectangle,
        Vec2::ZERO,
        Vec2::new(10.0, 10.0),
        Color::BLACK,
        1.0,
    );
    rect.rotation = 0.5;
    let mut list = DisplayList::new();
    let mut images = ImageCache::new();

    draw_stroke(&mut list, &rect, &mut images).unwrap();
    draw_single_selection(&mut list, &rect, 6.0, 8.0);
    draw_marquee(&mut list, Rect::new(0.0, 0.0, 5.0, 5.0));

    assert!(list.is_balanced());
    assert_eq!(list.commands()[0], DrawCommand::Save);
    assert!(list.commands().contains(&DrawCommand::Rotate(0.5)));
}

#[test]
fn test_unbalanced_list_detected() {
    let mut list = DisplayList::new();
    list.restore();
    list.save();
    assert!(!list.is_balanced());
}

#[test]
fn test_non_finite_stroke_rejected() {
    let line = Stroke::shape(
        ShapeKind::Line,
        Vec2::new(f32::NAN, 0.0),
        Vec2::ONE,
        Color::BLACK,
        1.0,
    );
    let mut list = DisplayList::new();

    assert!(draw_stroke(&mut list, &line, &mut ImageCache::new()).is_err());
    assert!(list.is_empty());
}

#[test]
fn test_single_point_pen_draws_dot() {
    let dot = Stroke::pen(vec![PenPoint::new(Vec2::new(3.0, 3.0), Color::BLACK, 4.0)]);
    let mut list = DisplayList::new();
    draw_stroke(&mut list, &dot, &mut ImageCache::new()).unwrap();

    assert_eq!(
        list.commands(),
        &[DrawCommand::FillCircle {
            center: Vec2::new(3.0, 3.0),
            radius: 2.0,
            color: Color::BLACK,
        }]
    );
}

#[test]
fn test_highlight_fills_each_rect() {
    let highlight = Stroke::highlight(
        vec![
            HighlightRect::from_rect(Rect::new(0.0, 0.0, 10.0, 5.0)),
            HighlightRect::from_rect(Rect::new(0.0, 10.0, 8.0, 15.0)),
        ],
        Color::WHITE,
    );
    let mut list = DisplayList::new();
    draw_stroke(&mut list, &highlight, &mut ImageCache::new()).unwrap();

    let fills = list
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
        .count();
    assert_eq!(fills, 2);
}

#[test]
fn test_raster_line_paints_pixels() {
    let mut canvas = RasterCanvas::new(20, 20).unwrap();
    canvas.clear();
    canvas.stroke_polyline(&[Vec2::new(0.0, 10.0), Vec2::new(20.0, 10.0)], Color::BLACK, 2.0);

    assert_eq!(canvas.to_image().get_pixel(10, 9)[3], 255);
    assert_eq!(canvas.to_image().get_pixel(10, 2)[3], 0);
}

#[test]
fn test_raster_fill_rect_respects_rotation() {
    let mut canvas = RasterCanvas::new(40, 40).unwrap();
    canvas.save();
    canvas.translate(Vec2::new(20.0, 20.0));
    canvas.rotate(std::f32::consts::FRAC_PI_2);
    canvas.fill_rect(Rect::new(0.0, -2.0, 15.0, 2.0), Color::WHITE);
    canvas.restore();

    // A quarter turn maps +x onto +y (canvas y grows down)
    assert_eq!(canvas.to_image().get_pixel(20, 30)[3], 255);
    assert_eq!(canvas.to_image().get_pixel(30, 20)[3], 0);
}

#[test]
fn test_raster_keeps_text_without_font() {
    let mut canvas = RasterCanvas::new(10, 10).unwrap().with_font(None);
    canvas.translate(Vec2::new(2.0, 3.0));
    canvas.fill_text("hi", Vec2::new(1.0, 1.0), 12.0, Color::BLACK);

    assert_eq!(canvas.texts().len(), 1);
    assert_eq!(canvas.texts()[0].position, Vec2::new(3.0, 4.0));
    assert!(canvas.to_image().pixels().all(|p| p[3] == 0));
}

#[test]
fn test_raster_paints_text_into_bitmap() {
    let font = default_font().expect("bundled font");
    let mut canvas = RasterCanvas::new(80, 40).unwrap().with_font(Some(font));
    canvas.fill_text("Hello", Vec2::new(4.0, 4.0), 20.0, Color::BLACK);

    assert!(canvas.texts().is_empty());
    let image = canvas.to_image();
    assert!(image.pixels().any(|p| p[3] > 128));
    // Nothing left of the anchor
    assert!((0..40).all(|y| image.get_pixel(1, y)[3] == 0));
}

#[test]
fn test_raster_dashed_line_leaves_gaps() {
    let mut canvas = RasterCanvas::new(20, 10).unwrap();
    canvas.set_line_dash(&[5.0, 5.0]);
    canvas.stroke_polyline(&[Vec2::new(0.0, 5.0), Vec2::new(20.0, 5.0)], Color::BLACK, 2.0);

    let image = canvas.to_image();
    assert_eq!(image.get_pixel(2, 5)[3], 255);
    assert_eq!(image.get_pixel(7, 5)[3], 0);
    assert_eq!(image.get_pixel(12, 5)[3], 255);
}

#[test]
fn test_long_pen_stroke_rasterizes() {
    let points: Vec<PenPoint> = (0..2000)
        .map(|i| {
            let t = i as f32 / 2000.0 * std::f32::consts::TAU * 20.0;
            PenPoint::new(Vec2::new(400.0 + t.cos() * 300.0, 400.0 + t.sin() * 300.0), Color::BLACK, 3.0)
        })
        .collect();
    let mut canvas = RasterCanvas::new(800, 800).unwrap();
    draw_stroke(&mut canvas, &Stroke::pen(points), &mut ImageCache::new()).unwrap();

    assert_eq!(canvas.to_image().get_pixel(700, 400)[3], 255);
    assert_eq!(canvas.to_image().get_pixel(400, 400)[3], 0);
}

#[test]
fn test_zero_sized_canvas_is_rejected() {
    assert!(RasterCanvas::new(0, 10).is_err());
}

#[test]
fn test_raster_translucent_blend() {
    let mut canvas = RasterCanvas::new(4, 4).unwrap();
    canvas.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::srgb(1.0, 0.0, 0.0));
    canvas.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::srgba(0.0, 0.0, 1.0, 0.5));

    let image = canvas.to_image();
    let pixel = image.get_pixel(1, 1);
    assert_eq!(pixel[3], 255);
    assert!(pixel[0] > 100 && pixel[2] > 100);
}

#[test]
fn test_image_cache_decodes_async() {
    let bytes: Arc<[u8]> = png_bytes(RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]))).into();
    let mut cache = ImageCache::new();

    assert!(cache.get_or_decode(&bytes).is_none());
    let ready = wait_for_decode(&mut cache);
    assert_eq!(ready, vec![content_key(&bytes)]);

    let image = cache.get_or_decode(&bytes).unwrap();
    assert_eq!(image.dimensions(), (2, 2));
}

#[test]
fn test_image_cache_remembers_failures() {
    let garbage: Arc<[u8]> = vec![1u8, 2, 3, 4].into();
    let mut cache = ImageCache::new();

    assert!(cache.get_or_decode(&garbage).is_none());
    assert!(wait_for_decode(&mut cache).is_empty());
    assert!(cache.has_failed(&garbage));

    // No new decode is started
    assert!(cache.get_or_decode(&garbage).is_none());
    assert!(!cache.has_pending());
}

#[test]
fn test_image_stroke_drawn_once_decoded() {
    let pixels = RgbaImage::from_pixel(1, 1, Rgba([0, 255, 0, 255]));
    let bytes = png_bytes(pixels.clone());
    let stroke = Stroke::image(Vec2::ZERO, Vec2::splat(4.0), bytes.clone());
    let mut cache = ImageCache::new();
    cache.insert(&bytes, pixels);

    let mut canvas = RasterCanvas::new(4, 4).unwrap();
    draw_stroke(&mut canvas, &stroke, &mut cache).unwrap();
    assert_eq!(*canvas.to_image().get_pixel(3, 3), Rgba([0, 255, 0, 255]));
}

#[test]
fn test_display_list_replays_onto_raster() {
    let mut list = DisplayList::new();
    list.clear();
    list.fill_circle(Vec2::new(5.0, 5.0), 2.0, Color::BLACK);

    let mut canvas = RasterCanvas::new(10, 10).unwrap();
    list.replay(&mut canvas);
    assert_eq!(canvas.to_image().get_pixel(5, 5)[3], 255);
}
