//! System clipboard access through `arboard`.

use image::RgbaImage;

use crate::error::{AnnotationError, AnnotationResult};

fn clipboard_error(e: arboard::Error) -> AnnotationError {
    AnnotationError::Clipboard(e.to_string())
}

/// Read an image from the system clipboard.
///
/// Falls back to treating clipboard text as the path of an image file.
pub fn read_image() -> AnnotationResult<RgbaImage> {
    let mut clipboard = arboard::Clipboard::new().map_err(clipboard_error)?;

    match clipboard.get_image() {
        Ok(data) => RgbaImage::from_raw(
            data.width as u32,
            data.height as u32,
            data.bytes.into_owned(),
        )
        .ok_or_else(|| AnnotationError::Clipboard("image size does not match its data".into())),
        Err(image_error) => {
            let text = clipboard
                .get_text()
                .map_err(|_| clipboard_error(image_error))?;
            let path = std::path::Path::new(text.trim());
            if !path.is_file() {
                return Err(AnnotationError::Clipboard(
                    "clipboard holds no image".into(),
                ));
            }
            Ok(image::open(path)?.to_rgba8())
        }
    }
}
