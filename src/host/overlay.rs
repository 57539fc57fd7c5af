//! egui overlays drawn over the pages: annotation text, the text input box,
//! the context menu and the config reset notice.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{ActiveDocument, EditorParams, PageView, egui_color};
use crate::config::ConfigResetNotification;
use crate::editor::{ContextAction, DocumentHost, PendingText};

/// Buffer of the text box the Text tool opened
#[derive(Resource, Default)]
pub struct TextInputState {
    target: Option<PendingText>,
    buffer: String,
    focused: bool,
}

impl TextInputState {
    /// Take the typed text, leaving the box empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}

fn egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(rect.min.x, rect.min.y),
        egui::pos2(rect.max.x, rect.max.y),
    )
}

/// Text strokes are not rasterized; paint them with egui on top of the page
pub fn page_text_ui(
    mut contexts: EguiContexts,
    document: Res<ActiveDocument>,
    view: Res<PageView>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let painter = ctx
        .layer_painter(egui::LayerId::background())
        .with_clip_rect(egui_rect(view.viewport()));

    for page in view.visible_pages() {
        if document.editor.is_page_deleted(page) {
            continue;
        }
        let Some(layout) = view.canvas_layout(page) else {
            continue;
        };
        let scale = layout.uniform_scale();

        for text in view.texts(page) {
            let position = layout.canvas_to_client(text.position);
            let color = egui_color(text.color);
            let galley = painter.layout_no_wrap(
                text.text.clone(),
                egui::FontId::proportional(text.font_size / scale),
                color,
            );
            painter.add(
                egui::epaint::TextShape::new(egui::pos2(position.x, position.y), galley, color)
                    .with_angle(text.rotation),
            );
        }
    }
    Ok(())
}

enum TextOutcome {
    Confirm,
    Cancel,
}

/// Input box for a pending text stroke
pub fn text_input_ui(
    mut contexts: EguiContexts,
    mut params: EditorParams,
    mut state: ResMut<TextInputState>,
) -> Result {
    let Some(pending) = params.document.editor.pending_text().copied() else {
        state.target = None;
        state.buffer.clear();
        return Ok(());
    };
    if state.target != Some(pending) {
        state.target = Some(pending);
        state.buffer.clear();
        state.focused = false;
    }

    let mut outcome = None;
    egui::Area::new(egui::Id::new("text_annotation_input"))
        .fixed_pos(egui::pos2(pending.client.x, pending.client.y))
        .pivot(egui::Align2::LEFT_CENTER)
        .show(contexts.ctx_mut()?, |ui| {
            ui.set_min_width(150.0);
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.buffer)
                        .hint_text("Enter text...")
                        .desired_width(200.0)
                        .font(egui::TextStyle::Body),
                );

                // Auto-focus once, so clicking elsewhere can still take focus away
                if !state.focused {
                    response.request_focus();
                    state.focused = true;
                }

                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    outcome = Some(TextOutcome::Cancel);
                } else if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
                {
                    outcome = Some(TextOutcome::Confirm);
                }

                ui.label("Press Enter to confirm, Esc to cancel");
            });
        });

    match outcome {
        Some(TextOutcome::Confirm) => {
            let text = state.take();
            params.edit(|editor, ctx| editor.confirm_text(ctx, &text));
        }
        Some(TextOutcome::Cancel) => {
            state.take();
            params.edit(|editor, ctx| editor.cancel_text(ctx));
        }
        None => {}
    }
    Ok(())
}

/// Right-click menu for the selection
pub fn context_menu_ui(mut contexts: EguiContexts, mut params: EditorParams) -> Result {
    let Some(menu) = params.document.editor.context_menu().copied() else {
        return Ok(());
    };

    let mut action = None;
    let mut close = false;
    egui::Area::new(egui::Id::new("annotation_context_menu"))
        .fixed_pos(egui::pos2(menu.client.x, menu.client.y))
        .order(egui::Order::Foreground)
        .show(contexts.ctx_mut()?, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(120.0);
                if ui.button("Copy").clicked() {
                    action = Some(ContextAction::Copy);
                }
                if ui.button("Duplicate").clicked() {
                    action = Some(ContextAction::Clone);
                }
                if ui.button("Delete").clicked() {
                    action = Some(ContextAction::Delete);
                }
            });
            close = ui.input(|i| i.key_pressed(egui::Key::Escape));
        });

    if let Some(action) = action {
        params.edit(|editor, ctx| editor.context_action(ctx, action));
    } else if close {
        params.document.editor.close_context_menu();
    }
    Ok(())
}

/// Tell the user their config file was unreadable and defaults are in use
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason).weak());
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
            }
        });
    Ok(())
}
