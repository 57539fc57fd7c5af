//! Interaction state machine.
//!
//! [`DocumentEditor`] owns the annotations of one open document plus the
//! transient interaction state (tool, selection, active gesture, pending text
//! box). Every entry point takes an [`EditContext`] that carries the
//! document's history session, the shared clipboard and the host.
//!
//! ## Module Structure
//!
//! - [`tools`] - tool enum and drawing attributes
//! - [`events`] - pointer events and keyboard shortcuts
//! - [`host`] - the `DocumentHost` contract
//! - [`context`] - per-call edit context
//! - `pointer` - pointer down/move/up dispatch
//! - `draw_tool`, `eraser`, `text_tool`, `highlight` - ink tools
//! - `select_tool`, `transform`, `pan` - selection, drag/resize/rotate, hand
//! - `clipboard`, `capture` - copy/paste/clone/delete and pixel capture
//! - `commands` - undo/redo, attribute changes, shortcuts
//! - `render` - page rendering

mod capture;
mod clipboard;
mod commands;
pub mod context;
mod draw_tool;
mod eraser;
pub mod events;
mod gesture;
mod highlight;
pub mod host;
mod pan;
mod pointer;
mod render;
mod select_tool;
mod selection;
mod text_tool;
pub mod tools;
mod transform;

#[cfg(test)]
mod tests;

pub use clipboard::Clipboard;
pub use context::EditContext;
pub use events::{Modifiers, PointerEvent, PointerKind, Shortcut};
pub use gesture::{ContextAction, ContextMenu, CursorHint, Gesture, PendingText};
pub use host::{DocumentHost, PageBitmaps};
pub use selection::{Selection, SelectionEntry};
pub use tools::{Tool, ToolSettings};

use crate::annotation::{PageNumber, Stroke, StrokeId};
use crate::config::EditorConfig;
use crate::render::ImageCache;
use crate::session::FileId;
use crate::store::{AnnotationDocument, PageAnnotations};

/// Annotations and interaction state of one open document
pub struct DocumentEditor {
    file_id: FileId,
    document: AnnotationDocument,
    settings: ToolSettings,
    tool: Tool,
    selection: Selection,
    gesture: Gesture,
    pending_text: Option<PendingText>,
    context_menu: Option<ContextMenu>,
    color_preview: Option<commands::ColorPreview>,
    images: ImageCache,
    config: EditorConfig,
}

impl DocumentEditor {
    pub fn new(file_id: FileId, config: EditorConfig) -> Self {
        Self {
            file_id,
            document: AnnotationDocument::default(),
            settings: ToolSettings::default(),
            tool: Tool::default(),
            selection: Selection::default(),
            gesture: Gesture::Idle,
            pending_text: None,
            context_menu: None,
            color_preview: None,
            images: ImageCache::new(),
            config,
        }
    }

    /// Start from previously saved annotations
    pub fn with_document(mut self, document: AnnotationDocument) -> Self {
        self.document = document;
        self
    }

    pub fn with_settings(mut self, settings: ToolSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    pub fn document(&self) -> &AnnotationDocument {
        &self.document
    }

    pub fn strokes(&self) -> &PageAnnotations {
        &self.document.strokes
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Attribute changes here only affect strokes drawn afterwards
    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EditorConfig) {
        self.config = config;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn pending_text(&self) -> Option<&PendingText> {
        self.pending_text.as_ref()
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    pub fn is_page_deleted(&self, page: PageNumber) -> bool {
        self.document.deleted_pages.contains(page)
    }

    /// Selected strokes on `page`, in selection order
    fn selected_strokes_on(&self, page: PageNumber) -> Vec<(usize, Stroke)> {
        self.selection
            .on_page(page)
            .into_iter()
            .filter_map(|entry| {
                let index = self.resolve_index(entry.page, entry.index, entry.id)?;
                let stroke = self.document.strokes.get(page, index)?;
                Some((index, stroke.clone()))
            })
            .collect()
    }

    /// Current index of a stroke, trying the hint first
    fn resolve_index(&self, page: PageNumber, hint: usize, id: StrokeId) -> Option<usize> {
        match self.document.strokes.get(page, hint) {
            Some(stroke) if stroke.id == id => Some(hint),
            _ => self.document.strokes.find_by_id(page, id),
        }
    }
}
