//! Cursor icons for the hint the editor gives at the pointer.

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use super::{ActiveDocument, PageView};
use crate::editor::CursorHint;
use crate::geometry::Handle as ResizeHandle;

pub fn cursor_icon(hint: CursorHint) -> CursorIcon {
    let icon = match hint {
        CursorHint::Default => SystemCursorIcon::Default,
        CursorHint::Crosshair => SystemCursorIcon::Crosshair,
        CursorHint::Text => SystemCursorIcon::Text,
        CursorHint::Move => SystemCursorIcon::Move,
        CursorHint::Rotate | CursorHint::Grab => SystemCursorIcon::Grab,
        CursorHint::Grabbing => SystemCursorIcon::Grabbing,
        CursorHint::Resize(ResizeHandle::N | ResizeHandle::S) => SystemCursorIcon::NsResize,
        CursorHint::Resize(ResizeHandle::E | ResizeHandle::W) => SystemCursorIcon::EwResize,
        CursorHint::Resize(ResizeHandle::NE | ResizeHandle::SW) => SystemCursorIcon::NeswResize,
        CursorHint::Resize(ResizeHandle::NW | ResizeHandle::SE) => SystemCursorIcon::NwseResize,
    };
    CursorIcon::System(icon)
}

pub fn update_cursor_icon(
    mut commands: Commands,
    window_query: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut contexts: EguiContexts,
    document: Res<ActiveDocument>,
    view: Res<PageView>,
    mut current: Local<Option<CursorHint>>,
) {
    let Ok((entity, window)) = window_query.single() else {
        return;
    };

    // Use default cursor over UI, the editor's hint over the pages
    let over_ui = contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.is_pointer_over_area());
    let hint = match window.cursor_position() {
        Some(client) if !over_ui => document.editor.cursor_at(&*view, client),
        _ => CursorHint::Default,
    };

    if *current != Some(hint) {
        commands.entity(entity).insert(cursor_icon(hint));
        *current = Some(hint);
    }
}
