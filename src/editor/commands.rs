//! Commands that don't come from a pointer: history navigation, attribute
//! changes, page operations and keyboard shortcuts.

use bevy::prelude::*;

use crate::annotation::{HIGHLIGHT_ALPHA, PageNumber, Stroke, StrokeId, StrokeKind};
use crate::history::{HistoryAction, ModifyKind, apply_redo, apply_undo};
use crate::render::content_key;

use super::context::EditContext;
use super::events::Shortcut;
use super::gesture::{ContextAction, Gesture};
use super::tools::Tool;
use super::DocumentEditor;

/// Live color preview over the selection
pub(super) struct ColorPreview {
    color: Color,
    /// Selected strokes as they were before the preview
    originals: Vec<(PageNumber, Stroke)>,
}

/// Highlights keep their translucency whatever color is picked
fn color_for(stroke: &Stroke, color: Color) -> Color {
    if stroke.is_highlight() {
        color.with_alpha(HIGHLIGHT_ALPHA)
    } else {
        color
    }
}

impl DocumentEditor {
    pub fn undo(&mut self, ctx: &mut EditContext) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        let Some(action) = ctx.history.undo() else {
            return false;
        };
        let pages = apply_undo(&action, &mut self.document);
        self.selection.refresh(&self.document.strokes);
        ctx.redraw_pages(pages);
        debug!("Undo: {}", action.label());
        true
    }

    pub fn redo(&mut self, ctx: &mut EditContext) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        let Some(action) = ctx.history.redo() else {
            return false;
        };
        let pages = apply_redo(&action, &mut self.document);
        self.selection.refresh(&self.document.strokes);
        ctx.redraw_pages(pages);
        debug!("Redo: {}", action.label());
        true
    }

    /// Remove every stroke on every page as one undoable step
    pub fn clear_all(&mut self, ctx: &mut EditContext) -> bool {
        if self.document.strokes.is_empty() {
            return false;
        }
        self.reset_tool_state(ctx);
        let previous = self.document.strokes.clear_all();
        let pages: Vec<PageNumber> = previous.pages().collect();
        info!("Cleared {} stroke(s)", previous.stroke_count());
        ctx.commit(HistoryAction::Clear { previous });
        ctx.redraw_pages(pages);
        true
    }

    /// Hide a page. Its strokes stay in the store so the deletion can be
    /// undone; the last visible page can't be deleted.
    pub fn delete_page(&mut self, ctx: &mut EditContext, page: PageNumber) -> bool {
        let page_count = ctx.host.page_count();
        if page == 0 || page > page_count || self.is_page_deleted(page) {
            return false;
        }
        if self.document.deleted_pages.active_pages(page_count).len() <= 1 {
            warn!("Refusing to delete page {}: it is the last visible page", page);
            return false;
        }

        if self.gesture.page() == Some(page) {
            self.abort_gesture(ctx);
        }
        if self.pending_text.is_some_and(|pending| pending.page == page) {
            self.pending_text = None;
        }
        if self.context_menu.is_some_and(|menu| menu.page == page) {
            self.context_menu = None;
        }
        let remaining = self
            .selection
            .entries()
            .iter()
            .filter(|entry| entry.page != page)
            .copied()
            .collect();
        self.selection.set(remaining);

        self.document.deleted_pages.delete(page);
        ctx.commit(HistoryAction::DeletePage { page });
        ctx.redraw(page);
        info!("Deleted page {}", page);
        true
    }

    /// Set the drawing color and recolor the selection
    pub fn set_color(&mut self, ctx: &mut EditContext, color: Color) {
        if self.tool == Tool::Highlight {
            self.settings.highlight_color = color.with_alpha(HIGHLIGHT_ALPHA);
        } else {
            self.settings.color = color;
        }
        self.modify_selection(ctx, ModifyKind::ColorChange, |stroke| {
            stroke.with_color(color_for(stroke, color))
        });
    }

    /// Set the line width and apply it to selected pens and shapes
    pub fn set_thickness(&mut self, ctx: &mut EditContext, thickness: f32) {
        if !thickness.is_finite() || thickness <= 0.0 {
            return;
        }
        self.settings.thickness = thickness;
        self.modify_selection(ctx, ModifyKind::ThicknessChange, |stroke| {
            stroke.with_thickness(thickness)
        });
    }

    /// Replace the content of a text stroke
    pub fn edit_text(
        &mut self,
        ctx: &mut EditContext,
        page: PageNumber,
        id: StrokeId,
        text: &str,
    ) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let Some(index) = self.document.strokes.find_by_id(page, id) else {
            return false;
        };
        let Some(previous) = self.document.strokes.get(page, index).cloned() else {
            return false;
        };
        let Some(stroke) = previous.with_text(text) else {
            return false;
        };
        if stroke == previous {
            return false;
        }
        self.document
            .strokes
            .replace_stroke_at(page, index, stroke.clone());
        ctx.commit(HistoryAction::Modify {
            kind: ModifyKind::TextChange,
            page,
            index,
            stroke,
            previous,
        });
        ctx.redraw(page);
        true
    }

    /// Apply `change` to every selected stroke, one `Modify` per stroke
    fn modify_selection(
        &mut self,
        ctx: &mut EditContext,
        kind: ModifyKind,
        change: impl Fn(&Stroke) -> Option<Stroke>,
    ) {
        let mut pages = Vec::new();
        for entry in self.selection.entries().to_vec() {
            let Some(index) = self.resolve_index(entry.page, entry.index, entry.id) else {
                continue;
            };
            let Some(previous) = self.document.strokes.get(entry.page, index).cloned() else {
                continue;
            };
            let Some(stroke) = change(&previous).filter(|stroke| *stroke != previous) else {
                continue;
            };
            self.document
                .strokes
                .replace_stroke_at(entry.page, index, stroke.clone());
            ctx.commit(HistoryAction::Modify {
                kind,
                page: entry.page,
                index,
                stroke,
                previous,
            });
            pages.push(entry.page);
        }
        ctx.redraw_pages(pages);
    }

    /// Show `color` on the selection without touching the real history.
    ///
    /// Previews can be repeated; each one starts from the strokes as they
    /// were before the first.
    pub fn preview_color(&mut self, ctx: &mut EditContext, color: Color) {
        if self.selection.is_empty() {
            return;
        }
        let preview = self.color_preview.get_or_insert_with(|| {
            ctx.history.set_temporary_mode(true);
            let originals = self
                .selection
                .entries()
                .iter()
                .filter_map(|entry| {
                    let index = match self.document.strokes.get(entry.page, entry.index) {
                        Some(stroke) if stroke.id == entry.id => Some(entry.index),
                        _ => self.document.strokes.find_by_id(entry.page, entry.id),
                    }?;
                    let stroke = self.document.strokes.get(entry.page, index)?;
                    Some((entry.page, stroke.clone()))
                })
                .collect();
            ColorPreview {
                color,
                originals,
            }
        });
        preview.color = color;

        let mut pages = Vec::new();
        for (page, original) in &preview.originals {
            let Some(index) = self.document.strokes.find_by_id(*page, original.id) else {
                continue;
            };
            let Some(stroke) = original.with_color(color_for(original, color)) else {
                continue;
            };
            self.document
                .strokes
                .replace_stroke_at(*page, index, stroke.clone());
            // Temporary buffer only; the host hears about the final color
            ctx.history.commit(HistoryAction::Modify {
                kind: ModifyKind::ColorChange,
                page: *page,
                index,
                stroke,
                previous: original.clone(),
            });
            pages.push(*page);
        }
        ctx.redraw_pages(pages);
    }

    /// Leave the preview. With `commit`, the previewed color is applied for
    /// real (and becomes undoable); otherwise the strokes go back unchanged.
    pub fn end_preview(&mut self, ctx: &mut EditContext, commit: bool) {
        let Some(preview) = self.color_preview.take() else {
            return;
        };
        let mut pages = Vec::with_capacity(preview.originals.len());
        for (page, original) in &preview.originals {
            if let Some(index) = self.document.strokes.find_by_id(*page, original.id) {
                self.document
                    .strokes
                    .replace_stroke_at(*page, index, original.clone());
                pages.push(*page);
            }
        }
        ctx.history.set_temporary_mode(false);

        if commit {
            self.set_color(ctx, preview.color);
        } else {
            ctx.redraw_pages(pages);
        }
    }

    /// Act on a keyboard shortcut. Only the active document reacts, and
    /// nothing but Escape gets through while a text box is open.
    pub fn handle_shortcut(&mut self, ctx: &mut EditContext, shortcut: Shortcut) -> bool {
        if !ctx.is_active {
            return false;
        }
        if self.pending_text.is_some() && shortcut != Shortcut::Escape {
            return false;
        }
        match shortcut {
            Shortcut::Undo => self.undo(ctx),
            Shortcut::Redo => self.redo(ctx),
            Shortcut::Copy => self.copy_selection(ctx) > 0,
            Shortcut::Paste => self.paste(ctx, None) > 0,
            Shortcut::Clone => self.clone_selection(ctx) > 0,
            Shortcut::Delete => self.delete_selection(ctx) > 0,
            Shortcut::Escape => {
                self.reset_tool_state(ctx);
                true
            }
            Shortcut::SelectTool(tool) => {
                self.set_tool(ctx, tool);
                true
            }
        }
    }

    pub fn context_action(&mut self, ctx: &mut EditContext, action: ContextAction) {
        match action {
            ContextAction::Copy => {
                self.copy_selection(ctx);
            }
            ContextAction::Clone => {
                self.clone_selection(ctx);
            }
            ContextAction::Delete => {
                self.delete_selection(ctx);
            }
        }
        self.context_menu = None;
    }

    /// Drop pending text, the active gesture, the selection and the menu
    pub fn reset_tool_state(&mut self, ctx: &mut EditContext) {
        self.end_preview(ctx, false);
        if let Some(pending) = self.pending_text.take() {
            ctx.redraw(pending.page);
        }
        self.abort_gesture(ctx);
        let pages = self.selection.pages();
        self.selection.clear();
        self.context_menu = None;
        ctx.redraw_pages(pages);
    }

    /// End the active gesture without completing it.
    ///
    /// Live transforms are reverted and unfinished ink is dropped. Strokes
    /// already erased stay erased and are recorded.
    pub(super) fn abort_gesture(&mut self, ctx: &mut EditContext) {
        let gesture = std::mem::take(&mut self.gesture);
        let pointer_id = gesture.pointer_id();
        match gesture {
            Gesture::Erasing { page, removed, .. } => self.finish_erasing(ctx, page, removed),
            Gesture::Moving {
                page, originals, ..
            } => self.restore_strokes(ctx, page, &originals),
            Gesture::Resizing { page, original, .. } | Gesture::Rotating { page, original, .. } => {
                self.restore_strokes(ctx, page, std::slice::from_ref(&original))
            }
            Gesture::Drawing { page, .. }
            | Gesture::Shape { page, .. }
            | Gesture::Marquee { page, .. } => ctx.redraw(page),
            Gesture::Panning { .. } | Gesture::Idle => {}
        }
        if let Some(pointer_id) = pointer_id {
            self.release_pointer(ctx, pointer_id);
        }
    }

    /// Collect finished image decodes and redraw the pages that show them
    pub fn poll_images(&mut self, ctx: &mut EditContext) {
        let ready = self.images.poll();
        if ready.is_empty() {
            return;
        }
        let pages: Vec<PageNumber> = self
            .document
            .strokes
            .pages()
            .filter(|page| {
                self.document.strokes.strokes(*page).iter().any(|stroke| {
                    matches!(&stroke.kind, StrokeKind::Image { data, .. } if ready.contains(&content_key(data)))
                })
            })
            .collect();
        ctx.redraw_pages(pages);
    }
}
