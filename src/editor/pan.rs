//! Hand tool.

use bevy::prelude::*;

use super::context::EditContext;
use super::events::PointerEvent;
use super::gesture::Gesture;
use super::DocumentEditor;

impl DocumentEditor {
    pub(super) fn begin_pan(&mut self, ctx: &mut EditContext, event: &PointerEvent) {
        self.gesture = Gesture::Panning {
            pointer_id: event.pointer_id,
            start_client: event.client,
            start_scroll: ctx.host.scroll_offset(),
        };
    }

    /// Scroll so the point under the pointer follows it
    pub(super) fn update_pan(&mut self, ctx: &mut EditContext, client: Vec2) {
        if let Gesture::Panning {
            start_client,
            start_scroll,
            ..
        } = self.gesture
        {
            ctx.host
                .set_scroll_offset(start_scroll - (client - start_client));
        }
    }
}
