//! Editor tests, driven through a mock host the way a page viewer would.

mod commands;
mod select;
mod transform;

use bevy::prelude::*;
use image::RgbaImage;

use super::*;
use crate::annotation::{PenPoint, ShapeKind, Stroke, StrokeKind};
use crate::config::EditorConfig;
use crate::coords::CanvasLayout;
use crate::error::{AnnotationError, AnnotationResult};
use crate::history::{HistoryAction, HistorySession};
use crate::session::{FileId, SessionManager};
use crate::store::AnnotationDocument;

/// Client size of every mock page
const PAGE_SIZE: f32 = 200.0;
/// Vertical distance between page tops in client pixels
const PAGE_STRIDE: f32 = 220.0;

/// Pages stacked vertically, each 200x200 client pixels
pub(super) struct MockHost {
    page_count: u32,
    /// Canvas pixels per client pixel
    scale: f32,
    pub viewport: Rect,
    pub scroll: Vec2,
    pub redraws: Vec<PageNumber>,
    pub changes: Vec<&'static str>,
    pub captured: Vec<u32>,
    pub released: Vec<u32>,
    pub fail_release: bool,
    pub text_rects: Vec<Rect>,
    pub text_selection_cleared: bool,
    pub bitmaps: Option<(RgbaImage, RgbaImage)>,
}

impl MockHost {
    pub fn new(page_count: u32) -> Self {
        Self {
            page_count,
            scale: 1.0,
            viewport: Rect::new(0.0, 0.0, PAGE_SIZE, 300.0),
            scroll: Vec2::ZERO,
            redraws: Vec::new(),
            changes: Vec::new(),
            captured: Vec::new(),
            released: Vec::new(),
            fail_release: false,
            text_rects: Vec::new(),
            text_selection_cleared: false,
            bitmaps: None,
        }
    }

    pub fn scaled(page_count: u32, scale: f32) -> Self {
        Self {
            scale,
            ..Self::new(page_count)
        }
    }
}

impl DocumentHost for MockHost {
    fn request_redraw(&mut self, page: PageNumber) {
        self.redraws.push(page);
    }

    fn on_stroke_change(&mut self, action: &HistoryAction) {
        self.changes.push(action.label());
    }

    fn canvas_layout(&self, page: PageNumber) -> Option<CanvasLayout> {
        if page == 0 || page > self.page_count {
            return None;
        }
        let top = (page - 1) as f32 * PAGE_STRIDE;
        Some(CanvasLayout::new(
            Rect::new(0.0, top, PAGE_SIZE, top + PAGE_SIZE),
            Vec2::splat(PAGE_SIZE * self.scale),
        ))
    }

    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: Vec2) {
        self.scroll = offset;
    }

    fn set_pointer_capture(&mut self, pointer_id: u32) -> AnnotationResult<()> {
        self.captured.push(pointer_id);
        Ok(())
    }

    fn release_pointer_capture(&mut self, pointer_id: u32) -> AnnotationResult<()> {
        if self.fail_release {
            return Err(AnnotationError::PointerCapture(pointer_id));
        }
        self.released.push(pointer_id);
        Ok(())
    }

    fn text_selection_rects(&self) -> Vec<Rect> {
        self.text_rects.clone()
    }

    fn clear_text_selection(&mut self) {
        self.text_rects.clear();
        self.text_selection_cleared = true;
    }

    fn page_bitmaps(&self, _page: PageNumber) -> Option<PageBitmaps> {
        self.bitmaps.as_ref().map(|(base, annotations)| PageBitmaps {
            base: base.clone(),
            annotations: annotations.clone(),
        })
    }
}

/// One document with its own session in a session manager
pub(super) struct Harness {
    pub editor: DocumentEditor,
    pub sessions: SessionManager,
    pub host: MockHost,
    pub file: FileId,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_host(MockHost::new(3))
    }

    pub fn with_host(host: MockHost) -> Self {
        let file = FileId::new();
        let mut sessions = SessionManager::default();
        sessions.start_session(file);
        Self {
            editor: DocumentEditor::new(file, EditorConfig::default()),
            sessions,
            host,
            file,
        }
    }

    /// Replace the document with these strokes on `page`
    pub fn load(&mut self, page: PageNumber, strokes: Vec<Stroke>) {
        let mut document = AnnotationDocument::default();
        for stroke in strokes {
            document.strokes.add_stroke(page, stroke);
        }
        self.editor = DocumentEditor::new(self.file, EditorConfig::default()).with_document(document);
    }

    pub fn with<R>(&mut self, f: impl FnOnce(&mut DocumentEditor, &mut EditContext) -> R) -> R {
        let mut ctx = self
            .sessions
            .edit_context(self.file, &mut self.host)
            .expect("document has a session");
        f(&mut self.editor, &mut ctx)
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.with(|editor, ctx| editor.set_tool(ctx, tool));
    }

    pub fn send_down(&mut self, event: PointerEvent) {
        self.with(|editor, ctx| editor.pointer_down(ctx, &event));
    }

    pub fn send_move(&mut self, event: PointerEvent) {
        self.with(|editor, ctx| editor.pointer_move(ctx, &event));
    }

    pub fn send_up(&mut self, event: PointerEvent) {
        self.with(|editor, ctx| editor.pointer_up(ctx, &event));
    }

    pub fn down(&mut self, x: f32, y: f32) {
        self.send_down(at(x, y));
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.send_move(at(x, y));
    }

    pub fn up(&mut self, x: f32, y: f32) {
        self.send_up(at(x, y));
    }

    pub fn click(&mut self, x: f32, y: f32) {
        self.down(x, y);
        self.up(x, y);
    }

    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.down(from.0, from.1);
        self.move_to(to.0, to.1);
        self.up(to.0, to.1);
    }

    pub fn strokes(&self, page: PageNumber) -> Vec<Stroke> {
        self.editor.strokes().strokes(page).to_vec()
    }

    pub fn history(&self) -> &HistorySession {
        self.sessions.session(self.file).expect("document has a session")
    }

    pub fn undo(&mut self) -> bool {
        self.with(|editor, ctx| editor.undo(ctx))
    }

    pub fn redo(&mut self) -> bool {
        self.with(|editor, ctx| editor.redo(ctx))
    }
}

/// Primary mouse button at a client position
pub(super) fn at(x: f32, y: f32) -> PointerEvent {
    PointerEvent::mouse(Vec2::new(x, y), None)
}

/// Pen stroke with a point every 5px between two points
pub(super) fn pen_line(from: Vec2, to: Vec2, color: Color) -> Stroke {
    let steps = (from.distance(to) / 5.0).ceil().max(1.0) as usize;
    Stroke::pen(
        (0..=steps)
            .map(|i| PenPoint::new(from.lerp(to, i as f32 / steps as f32), color, 2.0))
            .collect(),
    )
}

pub(super) fn rectangle(min: Vec2, max: Vec2) -> Stroke {
    Stroke::shape(ShapeKind::Rectangle, min, max, Color::BLACK, 2.0)
}
