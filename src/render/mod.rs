//! Redraw and compositing pipeline.
//!
//! Drawing goes through the [`Canvas2d`] seam. [`DisplayList`] records the
//! calls so a host can replay them; [`RasterCanvas`] paints them into an RGBA
//! bitmap. Stroke drawing itself lives in [`strokes`] and never fails the
//! whole page: a stroke that can't be drawn is logged and skipped.
//!
//! ## Module Structure
//!
//! - [`canvas`] - the Canvas2d trait
//! - [`display_list`] - recorded draw commands
//! - [`raster`] - tiny-skia rasterizer producing `image::RgbaImage` layers
//! - [`font`] - the font text strokes are rasterized with
//! - [`image_cache`] - async decoding of image strokes
//! - [`strokes`] - stroke, selection chrome and overlay drawing

mod canvas;
mod display_list;
mod font;
mod image_cache;
mod raster;
mod strokes;

#[cfg(test)]
mod tests;

pub use canvas::Canvas2d;
pub use display_list::{DisplayList, DrawCommand};
pub use font::default_font;
pub use image_cache::{ImageCache, content_key, decode_image};
pub use raster::{PlacedText, RasterCanvas};
pub use strokes::{
    MARQUEE_COLOR, MARQUEE_DASH, SELECTION_COLOR, draw_marquee, draw_multi_selection,
    draw_pen_preview, draw_single_selection, draw_stroke,
};
