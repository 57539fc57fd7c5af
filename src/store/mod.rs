//! Stroke storage.
//!
//! - [`PageAnnotations`] - page number to ordered stroke list (array order is z-order)
//! - [`DeletedPages`] - logical page deletion
//! - [`AnnotationDocument`] - everything persistence needs for one document

mod deleted;
mod pages;

#[cfg(test)]
mod tests;

pub use deleted::DeletedPages;
pub use pages::PageAnnotations;

use serde::{Deserialize, Serialize};

/// Annotation state of one open document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDocument {
    pub strokes: PageAnnotations,
    #[serde(default)]
    pub deleted_pages: DeletedPages,
}
