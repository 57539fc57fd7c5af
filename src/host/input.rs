//! Mouse, touch and wheel input.
//!
//! Translates Bevy input state into the editor's pointer events. Presses
//! that land on egui panels are not forwarded; moves and releases of a
//! gesture that is already running always are.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::input::touch::{Touch, Touches};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use super::EditorParams;
use super::overlay::TextInputState;
use crate::editor::events::{BUTTON_PRIMARY, BUTTON_SECONDARY};
use crate::editor::{Modifiers, PointerEvent, PointerKind};

const MOUSE_POINTER_ID: u32 = 1;
/// Touch ids are offset so they never collide with the mouse
const TOUCH_POINTER_BASE: u32 = 2;
/// Pixels scrolled per wheel line
const LINE_SCROLL_PIXELS: f32 = 40.0;
/// Zoom factor per wheel line with Ctrl held
const LINE_ZOOM_STEP: f32 = 1.1;

pub fn modifiers(keyboard: &ButtonInput<KeyCode>) -> Modifiers {
    Modifiers {
        ctrl: keyboard.any_pressed([
            KeyCode::ControlLeft,
            KeyCode::ControlRight,
            KeyCode::SuperLeft,
            KeyCode::SuperRight,
        ]),
        shift: keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
    }
}

fn button_bit(button: MouseButton) -> u32 {
    match button {
        MouseButton::Left => BUTTON_PRIMARY,
        MouseButton::Right => BUTTON_SECONDARY,
        _ => 0,
    }
}

fn pointer_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.is_pointer_over_area() || ctx.wants_pointer_input())
}

/// Wheel scrolls the pages; Ctrl + wheel zooms
pub fn handle_scroll(
    mut wheel: MessageReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut params: EditorParams,
) {
    if pointer_over_ui(&mut contexts) {
        wheel.clear();
        return;
    }
    let zoom_modifier = modifiers(&keyboard).ctrl;

    for event in wheel.read() {
        if zoom_modifier {
            let factor = match event.unit {
                MouseScrollUnit::Line => LINE_ZOOM_STEP.powf(event.y),
                MouseScrollUnit::Pixel => 1.0 + event.y * 0.002,
            };
            let zoom = params.view.zoom() * factor;
            params.view.set_zoom(zoom);
        } else {
            let step = match event.unit {
                MouseScrollUnit::Line => LINE_SCROLL_PIXELS,
                MouseScrollUnit::Pixel => 1.0,
            };
            params.view.scroll_by(Vec2::new(-event.x, -event.y) * step);
        }
    }
}

pub fn handle_mouse_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut contexts: EguiContexts,
    mut params: EditorParams,
    mut text_input: ResMut<TextInputState>,
    mut last_cursor: Local<Option<Vec2>>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let gesture_running = !params.document.editor.gesture().is_idle();

    let Some(client) = window.cursor_position() else {
        // Cursor left the window
        if last_cursor.take().is_some() && gesture_running {
            let event = PointerEvent::mouse(Vec2::ZERO, None).with_buttons(0);
            params.edit(|editor, ctx| editor.pointer_leave(ctx, &event));
        }
        return;
    };

    let over_ui = pointer_over_ui(&mut contexts);
    let pressed = mouse_button
        .get_pressed()
        .fold(0, |bits, button| bits | button_bit(*button));
    let event = PointerEvent {
        pointer_id: MOUSE_POINTER_ID,
        kind: PointerKind::Mouse,
        page: None,
        client,
        buttons: pressed,
        modifiers: modifiers(&keyboard),
    };

    if !over_ui {
        for button in [MouseButton::Left, MouseButton::Right] {
            if !mouse_button.just_pressed(button) {
                continue;
            }
            // Clicking away from an open text box places its text
            if params.document.editor.pending_text().is_some() {
                let text = text_input.take();
                params.edit(|editor, ctx| editor.confirm_text(ctx, &text));
            }
            params.edit(|editor, ctx| editor.pointer_down(ctx, &event));
        }
    }

    if *last_cursor != Some(client) && !params.document.editor.gesture().is_idle() {
        params.edit(|editor, ctx| editor.pointer_move(ctx, &event));
    }

    for button in [MouseButton::Left, MouseButton::Right] {
        if !mouse_button.just_released(button) {
            continue;
        }
        if over_ui && params.document.editor.gesture().is_idle() {
            continue;
        }
        let released = event.with_buttons(button_bit(button));
        params.edit(|editor, ctx| editor.pointer_up(ctx, &released));
    }

    *last_cursor = Some(client);
}

/// Pointer id for a touch, `None` if the touch id does not fit
fn touch_pointer_id(id: u64) -> Option<u32> {
    u32::try_from(id).ok()?.checked_add(TOUCH_POINTER_BASE)
}

fn touch_event(touch: &Touch, keyboard: &ButtonInput<KeyCode>) -> Option<PointerEvent> {
    let Some(pointer_id) = touch_pointer_id(touch.id()) else {
        warn!("Ignoring touch with out-of-range id {}", touch.id());
        return None;
    };
    Some(PointerEvent {
        pointer_id,
        kind: PointerKind::Touch,
        page: None,
        client: touch.position(),
        buttons: BUTTON_PRIMARY,
        modifiers: modifiers(keyboard),
    })
}

/// Touch draws when enabled in the settings, otherwise it scrolls
pub fn handle_touch_input(
    touches: Res<Touches>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut params: EditorParams,
) {
    let over_ui = pointer_over_ui(&mut contexts);

    if !over_ui {
        for touch in touches.iter_just_pressed() {
            let Some(event) = touch_event(touch, &keyboard) else {
                continue;
            };
            params.edit(|editor, ctx| editor.pointer_down(ctx, &event));
        }
    }

    for touch in touches.iter() {
        if touch.delta() == Vec2::ZERO {
            continue;
        }
        let Some(event) = touch_event(touch, &keyboard) else {
            continue;
        };
        if params.document.editor.gesture().pointer_id() == Some(event.pointer_id) {
            params.edit(|editor, ctx| editor.pointer_move(ctx, &event));
        } else if !over_ui {
            params.view.scroll_by(-touch.delta());
        }
    }

    for touch in touches.iter_just_released() {
        let Some(event) = touch_event(touch, &keyboard) else {
            continue;
        };
        params.edit(|editor, ctx| editor.pointer_up(ctx, &event));
    }

    for touch in touches.iter_just_canceled() {
        let Some(event) = touch_event(touch, &keyboard) else {
            continue;
        };
        params.edit(|editor, ctx| editor.pointer_cancel(ctx, &event));
    }
}
