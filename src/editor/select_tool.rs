//! Select and rectangular-select tools.

use bevy::prelude::*;

use crate::annotation::PageNumber;
use crate::geometry::{Handle, compute_bounds, compute_unrotated_bounds, hit_test_stroke, rects_overlap, resize_handle_at};

use super::context::EditContext;
use super::events::PointerEvent;
use super::gesture::{ContextMenu, Gesture};
use super::selection::SelectionEntry;
use super::tools::Tool;
use super::DocumentEditor;

/// Marquees smaller than this on both axes count as a click
const MIN_MARQUEE_EXTENT: f32 = 2.0;

impl DocumentEditor {
    /// Index of the topmost stroke under `point`
    pub(super) fn topmost_hit(&self, page: PageNumber, point: Vec2) -> Option<usize> {
        self.document
            .strokes
            .strokes(page)
            .iter()
            .rposition(|stroke| hit_test_stroke(point, stroke, self.config.hit_threshold))
    }

    fn entry_at(&self, page: PageNumber, index: usize) -> Option<SelectionEntry> {
        self.document
            .strokes
            .get(page, index)
            .map(|stroke| SelectionEntry {
                page,
                index,
                id: stroke.id,
            })
    }

    pub(super) fn select_pointer_down(
        &mut self,
        ctx: &mut EditContext,
        event: &PointerEvent,
        page: PageNumber,
        point: Vec2,
    ) {
        let pointer_id = event.pointer_id;

        // Handles of a single selection win over everything else
        if let Some(entry) = self.selection.single().filter(|e| e.page == page)
            && let Some(index) = self.resolve_index(page, entry.index, entry.id)
            && let Some(stroke) = self.document.strokes.get(page, index).cloned()
        {
            let bounds = compute_unrotated_bounds(&stroke, self.config.selection_padding);
            if let Some(handle) = resize_handle_at(point, bounds, &stroke, self.config.handle_radius)
            {
                if handle == Handle::NE && stroke.supports_rotation() {
                    self.begin_rotate(pointer_id, page, stroke, point);
                } else {
                    self.begin_resize(pointer_id, page, handle, stroke, point);
                }
                return;
            }
        }

        let Some(entry) = self
            .topmost_hit(page, point)
            .and_then(|index| self.entry_at(page, index))
        else {
            if !event.modifiers.ctrl && !self.selection.is_empty() {
                let pages = self.selection.pages();
                self.selection.clear();
                ctx.redraw_pages(pages);
            }
            self.begin_marquee(pointer_id, page, point, false);
            return;
        };

        if event.modifiers.ctrl {
            self.selection.toggle(entry);
            ctx.redraw(page);
            return;
        }

        if !self.selection.contains(entry.id) {
            let mut pages = self.selection.pages();
            pages.push(page);
            self.selection.select_only(entry);
            ctx.redraw_pages(pages);
        }
        self.begin_move(pointer_id, page, point);
    }

    pub(super) fn begin_marquee(
        &mut self,
        pointer_id: u32,
        page: PageNumber,
        point: Vec2,
        capture: bool,
    ) {
        self.gesture = Gesture::Marquee {
            pointer_id,
            page,
            start: point,
            end: point,
            capture,
        };
    }

    pub(super) fn update_marquee(&mut self, ctx: &mut EditContext, point: Vec2) {
        if let Gesture::Marquee { page, end, .. } = &mut self.gesture {
            *end = point;
            ctx.redraw(*page);
        }
    }

    /// Select every stroke whose bounds touch the marquee
    pub(super) fn finish_marquee(&mut self, ctx: &mut EditContext, page: PageNumber, rect: Rect) {
        let mut pages = self.selection.pages();
        pages.push(page);

        let size = rect.size();
        if size.x < MIN_MARQUEE_EXTENT && size.y < MIN_MARQUEE_EXTENT {
            self.selection.clear();
            ctx.redraw_pages(pages);
            return;
        }

        // Array order is bottom to top, so the last entry is the topmost
        let entries: Vec<SelectionEntry> = self
            .document
            .strokes
            .strokes(page)
            .iter()
            .enumerate()
            .filter(|(_, stroke)| rects_overlap(compute_bounds(stroke, 0.0), rect))
            .map(|(index, stroke)| SelectionEntry {
                page,
                index,
                id: stroke.id,
            })
            .collect();
        debug!("Marquee selected {} stroke(s) on page {}", entries.len(), page);
        self.selection.set(entries);
        ctx.redraw_pages(pages);
    }

    /// Right click: offer copy/clone/delete for the stroke under the pointer
    pub(super) fn open_context_menu(
        &mut self,
        ctx: &mut EditContext,
        page: PageNumber,
        point: Vec2,
        client: Vec2,
    ) {
        if !self.tool.is_select_tool() {
            return;
        }
        let Some(entry) = self
            .topmost_hit(page, point)
            .and_then(|index| self.entry_at(page, index))
        else {
            return;
        };
        if !self.selection.contains(entry.id) {
            let mut pages = self.selection.pages();
            pages.push(page);
            self.selection.select_only(entry);
            ctx.redraw_pages(pages);
        }
        self.context_menu = Some(ContextMenu { page, client });
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// Switch tools, dropping whatever the previous tool had going
    pub fn set_tool(&mut self, ctx: &mut EditContext, tool: Tool) {
        if self.tool == tool {
            return;
        }
        self.reset_tool_state(ctx);
        self.tool = tool;
    }
}
