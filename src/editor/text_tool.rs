//! Text tool: a click opens a text box, confirming it places the text.

use bevy::prelude::*;

use crate::annotation::{PageNumber, Stroke};
use crate::constants::TEXT_ANCHOR_LIFT;
use crate::history::HistoryAction;

use super::context::EditContext;
use super::gesture::PendingText;
use super::DocumentEditor;

impl DocumentEditor {
    /// Open a text box at the click. Any box still open is dropped.
    pub(super) fn begin_text(
        &mut self,
        ctx: &mut EditContext,
        page: PageNumber,
        anchor: Vec2,
        client: Vec2,
        scale: f32,
    ) {
        if let Some(previous) = self.pending_text.take()
            && previous.page != page
        {
            ctx.redraw(previous.page);
        }
        self.pending_text = Some(PendingText {
            page,
            anchor,
            client,
            scale,
        });
        ctx.redraw(page);
    }

    /// Place the pending text. Blank input just closes the box.
    pub fn confirm_text(&mut self, ctx: &mut EditContext, text: &str) {
        let Some(pending) = self.pending_text.take() else {
            return;
        };
        if text.trim().is_empty() {
            ctx.redraw(pending.page);
            return;
        }

        let position = pending.anchor - Vec2::new(0.0, TEXT_ANCHOR_LIFT * pending.scale);
        let stroke = Stroke::text(
            position,
            text,
            self.settings.font_size * pending.scale,
            self.settings.color,
        );
        self.document.strokes.add_stroke(pending.page, stroke.clone());
        ctx.commit(HistoryAction::Add {
            page: pending.page,
            stroke,
        });
        ctx.redraw(pending.page);
    }

    pub fn cancel_text(&mut self, ctx: &mut EditContext) {
        if let Some(pending) = self.pending_text.take() {
            ctx.redraw(pending.page);
        }
    }
}
