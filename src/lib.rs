//! Annotation engine for paginated documents.
//!
//! Pen, shape, text, highlight and image annotations live per page in an
//! [`store::AnnotationDocument`]. The [`editor::DocumentEditor`] turns pointer
//! and keyboard input into edits, records them in per-document
//! [`history`] sessions and renders pages through the [`render::Canvas2d`]
//! seam. [`host`] is the Bevy desktop front end.

pub mod annotation;
pub mod config;
pub mod constants;
pub mod coords;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod host;
pub mod paths;
pub mod render;
pub mod session;
pub mod store;
