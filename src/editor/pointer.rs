//! Pointer event dispatch.
//!
//! A gesture belongs to the pointer that started it. While one is active,
//! presses from other pointers are dropped and their moves ignored.

use bevy::prelude::*;

use crate::geometry::{Handle, compute_unrotated_bounds, hit_test_stroke, resize_handle_at};
use crate::history::ModifyKind;

use super::context::EditContext;
use super::events::{PointerEvent, PointerKind};
use super::gesture::{CursorHint, Gesture};
use super::host::DocumentHost;
use super::tools::Tool;
use super::DocumentEditor;

impl DocumentEditor {
    pub fn pointer_down(&mut self, ctx: &mut EditContext, event: &PointerEvent) {
        if let Some(active) = self.gesture.pointer_id() {
            debug!(
                "Ignoring pointer {} while pointer {} owns the gesture",
                event.pointer_id, active
            );
            return;
        }
        if self.ignores_touch(event) {
            return;
        }
        self.context_menu = None;

        if self.tool == Tool::Hand && !event.is_barrel_erase() {
            self.begin_pan(ctx, event);
            self.capture_pointer(ctx, event.pointer_id);
            return;
        }

        let Some(page) = event
            .page
            .or_else(|| ctx.host.page_at_client_point(event.client))
        else {
            return;
        };
        if self.is_page_deleted(page) {
            return;
        }
        let Some(layout) = ctx.host.canvas_layout(page) else {
            debug!("No canvas layout for page {}, ignoring pointer down", page);
            return;
        };
        let point = layout.client_to_canvas(event.client);
        let pointer_id = event.pointer_id;

        if event.is_barrel_erase() {
            self.begin_erasing(ctx, pointer_id, page, point);
        } else if event.is_secondary() {
            self.open_context_menu(ctx, page, point, event.client);
        } else {
            match self.tool {
                Tool::Pen => self.begin_drawing(ctx, pointer_id, page, point),
                Tool::Eraser => self.begin_erasing(ctx, pointer_id, page, point),
                Tool::Shape(shape) => self.begin_shape(pointer_id, page, shape, point),
                Tool::Text => self.begin_text(ctx, page, point, event.client, layout.uniform_scale()),
                Tool::RectSelect => self.begin_marquee(pointer_id, page, point, false),
                Tool::Capture => self.begin_marquee(pointer_id, page, point, true),
                Tool::Select => self.select_pointer_down(ctx, event, page, point),
                // Highlight acts on release; Hand was handled above
                Tool::Highlight | Tool::Hand => {}
            }
        }

        if !self.gesture.is_idle() {
            self.capture_pointer(ctx, pointer_id);
        }
    }

    pub fn pointer_move(&mut self, ctx: &mut EditContext, event: &PointerEvent) {
        if self.gesture.pointer_id() != Some(event.pointer_id) {
            return;
        }
        if matches!(self.gesture, Gesture::Panning { .. }) {
            self.update_pan(ctx, event.client);
            return;
        }
        let Some(page) = self.gesture.page() else {
            return;
        };
        let Some(layout) = ctx.host.canvas_layout(page) else {
            return;
        };
        let point = layout.client_to_canvas(event.client);

        match self.gesture {
            Gesture::Drawing { .. } => self.extend_drawing(ctx, point),
            Gesture::Erasing { .. } => self.erase_at(ctx, point),
            Gesture::Shape { .. } => self.update_shape(ctx, point),
            Gesture::Marquee { .. } => self.update_marquee(ctx, point),
            Gesture::Moving { .. } => self.update_move(ctx, point),
            Gesture::Resizing { .. } => self.update_resize(ctx, point),
            Gesture::Rotating { .. } => self.update_rotate(ctx, point),
            Gesture::Panning { .. } | Gesture::Idle => {}
        }
    }

    pub fn pointer_up(&mut self, ctx: &mut EditContext, event: &PointerEvent) {
        if self.gesture.is_idle() {
            if self.tool == Tool::Highlight && !event.is_secondary() && !self.ignores_touch(event) {
                self.highlight_selection(ctx);
            }
            return;
        }
        if self.gesture.pointer_id() != Some(event.pointer_id) {
            return;
        }
        // A pen path ends at its last move; the release point is not added
        if !matches!(self.gesture, Gesture::Drawing { .. }) {
            self.pointer_move(ctx, event);
        }
        self.finish_gesture(ctx);
    }

    /// The pointer left the page area: end the gesture as if released
    pub fn pointer_leave(&mut self, ctx: &mut EditContext, event: &PointerEvent) {
        if self.gesture.pointer_id() == Some(event.pointer_id) {
            self.finish_gesture(ctx);
        }
    }

    /// The platform took the pointer away: undo the gesture's live effect
    pub fn pointer_cancel(&mut self, ctx: &mut EditContext, event: &PointerEvent) {
        if self.gesture.pointer_id() != Some(event.pointer_id) {
            return;
        }
        self.abort_gesture(ctx);
    }

    /// Complete the active gesture, committing whatever it produced
    pub(super) fn finish_gesture(&mut self, ctx: &mut EditContext) {
        let gesture = std::mem::take(&mut self.gesture);
        let pointer_id = gesture.pointer_id();

        match gesture {
            Gesture::Drawing { page, points, .. } => self.finish_drawing(ctx, page, points),
            Gesture::Erasing { page, removed, .. } => self.finish_erasing(ctx, page, removed),
            Gesture::Shape {
                page,
                shape,
                start,
                end,
                ..
            } => self.finish_shape(ctx, page, shape, start, end),
            Gesture::Marquee {
                page,
                start,
                end,
                capture,
                ..
            } => {
                let rect = Rect::from_corners(start, end);
                if capture {
                    self.capture_region(ctx, page, rect);
                } else {
                    self.finish_marquee(ctx, page, rect);
                }
            }
            Gesture::Moving {
                page,
                start,
                current,
                dragging,
                originals,
                ..
            } => self.finish_move(ctx, page, current - start, dragging, originals),
            Gesture::Resizing { page, original, .. } => {
                self.finish_transform(ctx, page, original, ModifyKind::Resize)
            }
            Gesture::Rotating { page, original, .. } => {
                self.finish_transform(ctx, page, original, ModifyKind::Rotate)
            }
            Gesture::Panning { .. } | Gesture::Idle => {}
        }

        if let Some(pointer_id) = pointer_id {
            self.release_pointer(ctx, pointer_id);
        }
    }

    /// Cursor to show at a client position
    pub fn cursor_at(&self, host: &dyn DocumentHost, client: Vec2) -> CursorHint {
        match &self.gesture {
            Gesture::Panning { .. } => return CursorHint::Grabbing,
            Gesture::Moving { dragging: true, .. } => return CursorHint::Move,
            Gesture::Resizing { handle, .. } => return CursorHint::Resize(*handle),
            Gesture::Rotating { .. } => return CursorHint::Rotate,
            _ => {}
        }

        match self.tool {
            Tool::Hand => CursorHint::Grab,
            Tool::Text | Tool::Highlight => CursorHint::Text,
            Tool::Pen | Tool::Eraser | Tool::Shape(_) | Tool::RectSelect | Tool::Capture => {
                CursorHint::Crosshair
            }
            Tool::Select => self.select_cursor_at(host, client),
        }
    }

    fn select_cursor_at(&self, host: &dyn DocumentHost, client: Vec2) -> CursorHint {
        let Some(page) = host.page_at_client_point(client) else {
            return CursorHint::Default;
        };
        let Some(layout) = host.canvas_layout(page) else {
            return CursorHint::Default;
        };
        let point = layout.client_to_canvas(client);

        if let Some(entry) = self.selection.single().filter(|e| e.page == page)
            && let Some(index) = self.resolve_index(page, entry.index, entry.id)
            && let Some(stroke) = self.document.strokes.get(page, index)
        {
            let bounds = compute_unrotated_bounds(stroke, self.config.selection_padding);
            if let Some(handle) =
                resize_handle_at(point, bounds, stroke, self.config.handle_radius)
            {
                return if handle == Handle::NE && stroke.supports_rotation() {
                    CursorHint::Rotate
                } else {
                    CursorHint::Resize(handle)
                };
            }
        }

        let over_selected = self.selection.on_page(page).iter().any(|entry| {
            self.resolve_index(page, entry.index, entry.id)
                .and_then(|index| self.document.strokes.get(page, index))
                .is_some_and(|stroke| hit_test_stroke(point, stroke, self.config.hit_threshold))
        });
        if over_selected {
            CursorHint::Move
        } else {
            CursorHint::Default
        }
    }

    /// Touch input only draws when the user opted in
    fn ignores_touch(&self, event: &PointerEvent) -> bool {
        event.kind == PointerKind::Touch
            && self.tool.is_drawing_tool()
            && !self.settings.enable_touch_drawing
    }

    fn capture_pointer(&self, ctx: &mut EditContext, pointer_id: u32) {
        if let Err(e) = ctx.host.set_pointer_capture(pointer_id) {
            debug!("Could not capture pointer {}: {}", pointer_id, e);
        }
    }

    pub(super) fn release_pointer(&self, ctx: &mut EditContext, pointer_id: u32) {
        if let Err(e) = ctx.host.release_pointer_capture(pointer_id) {
            debug!("Could not release pointer {}: {}", pointer_id, e);
        }
    }
}
