//! Annotation data model.
//!
//! - [`stroke`] - `Stroke` and its per-kind payloads
//! - [`color`] - named palette colors and defaults

mod color;
mod stroke;

#[cfg(test)]
mod tests;

pub use color::{
    DEFAULT_DRAW_COLOR, HIGHLIGHT_ALPHA, PALETTE, default_draw_color, default_highlight_color,
    named_color,
};
pub use stroke::{
    HighlightRect, PageNumber, PenPoint, ShapeKind, Stroke, StrokeId, StrokeKind, circle_radii,
};
