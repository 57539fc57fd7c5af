//! Rectangular capture: copy page pixels (document plus annotations) into
//! the clipboard as an image stroke.

use std::io::Cursor;

use bevy::prelude::*;
use image::{ImageFormat, RgbaImage, imageops};

use crate::annotation::{PageNumber, Stroke};
use crate::error::{AnnotationError, AnnotationResult};

use super::context::EditContext;
use super::host::PageBitmaps;
use super::DocumentEditor;

pub(super) fn encode_png(image: &RgbaImage) -> AnnotationResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| AnnotationError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Composite both layers and cut out `rect`, shrunk by `inset` on each side
/// so the marquee border is not part of the result.
pub fn crop_capture(bitmaps: &PageBitmaps, rect: Rect, inset: u32) -> AnnotationResult<RgbaImage> {
    let mut composed = bitmaps.base.clone();
    imageops::overlay(&mut composed, &bitmaps.annotations, 0, 0);

    let (page_width, page_height) = composed.dimensions();
    if page_width == 0 || page_height == 0 {
        return Err(AnnotationError::InvalidGeometry("empty page bitmap"));
    }
    if !rect.min.is_finite() || !rect.max.is_finite() {
        return Err(AnnotationError::InvalidGeometry("non-finite capture rect"));
    }

    let x = (rect.min.x.max(0.0) as u32 + inset).min(page_width - 1);
    let y = (rect.min.y.max(0.0) as u32 + inset).min(page_height - 1);
    let width = (rect.width() as u32)
        .saturating_sub(inset * 2)
        .max(1)
        .min(page_width - x);
    let height = (rect.height() as u32)
        .saturating_sub(inset * 2)
        .max(1)
        .min(page_height - y);

    Ok(imageops::crop_imm(&composed, x, y, width, height).to_image())
}

impl DocumentEditor {
    pub(super) fn capture_region(&mut self, ctx: &mut EditContext, page: PageNumber, rect: Rect) {
        ctx.redraw(page);

        let Some(bitmaps) = ctx.host.page_bitmaps(page) else {
            warn!("Capture failed: {}", AnnotationError::MissingBitmap(page));
            return;
        };
        let captured = match crop_capture(&bitmaps, rect, self.config.capture_border_inset) {
            Ok(image) => image,
            Err(e) => {
                warn!("Capture failed: {}", e);
                return;
            }
        };
        let data = match encode_png(&captured) {
            Ok(data) => data,
            Err(e) => {
                warn!("Capture failed: {}", e);
                return;
            }
        };

        let size = Vec2::new(captured.width() as f32, captured.height() as f32);
        let stroke = Stroke::image(rect.min, size, data.as_slice());
        self.images.insert(&data, captured);
        ctx.clipboard.set(vec![stroke], page);
        info!(
            "Captured {}x{} region of page {} to the clipboard",
            size.x, size.y, page
        );
    }
}
