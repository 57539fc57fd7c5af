//! Error type shared by the engine.
//!
//! Interactive entry points never hand these to callers; they are logged and
//! the operation degrades to a no-op. Lower-level helpers return them so the
//! caller can decide how loudly to complain.

use thiserror::Error;
use uuid::Uuid;

use crate::annotation::PageNumber;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("stroke {id} not found on page {page}")]
    StrokeNotFound { page: PageNumber, id: Uuid },

    #[error("stroke index {index} out of range on page {page}")]
    IndexOutOfRange { page: PageNumber, index: usize },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("pointer capture for pointer {0} was already released")]
    PointerCapture(u32),

    #[error("no bitmap available for page {0}")]
    MissingBitmap(PageNumber),

    #[error("no canvas layout for page {0}")]
    MissingLayout(PageNumber),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type AnnotationResult<T> = Result<T, AnnotationError>;
