//! Tool bar and tool settings bar.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{EditorParams, egui_color};
use crate::annotation::{PALETTE, PageNumber, named_color};
use crate::config::{AppConfig, SaveConfigRequest};
use crate::editor::{DocumentHost, Tool};

const SWATCH_SIZE: f32 = 16.0;

/// Toolbar clicks, applied after the panel is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
enum ToolbarAction {
    SetTool(Tool),
    Undo,
    Redo,
    ClearAll,
    DeletePage(PageNumber),
}

/// Main toolbar with tools, history and page commands
pub fn toolbar_ui(mut contexts: EguiContexts, mut params: EditorParams) -> Result {
    let current_tool = params.document.editor.tool();
    let file_id = params.document.editor.file_id();
    let (undo_label, redo_label) = params
        .sessions
        .session(file_id)
        .map(|session| (session.undo_label(), session.redo_label()))
        .unwrap_or((None, None));
    let center_page = {
        let view = &params.view;
        view.page_at_client_point(view.viewport().center())
            .or_else(|| view.visible_pages().first().copied())
    };
    let unsaved = params.view.unsaved_changes();
    let zoom = params.view.zoom();

    let mut actions = Vec::new();
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                for tool in Tool::all() {
                    let button = egui::Button::new(
                        egui::RichText::new(tool_button_label(tool)).size(14.0).strong(),
                    )
                    .min_size(egui::vec2(0.0, 28.0))
                    .selected(current_tool == *tool);

                    let response = ui.add(button);
                    if response.clicked() {
                        actions.push(ToolbarAction::SetTool(*tool));
                    }
                    response.on_hover_text(tool.display_name());
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                let undo = ui.add_enabled(undo_label.is_some(), egui::Button::new("Undo"));
                if undo.clicked() {
                    actions.push(ToolbarAction::Undo);
                }
                undo.on_hover_text(undo_label.unwrap_or("Nothing to undo"));

                let redo = ui.add_enabled(redo_label.is_some(), egui::Button::new("Redo"));
                if redo.clicked() {
                    actions.push(ToolbarAction::Redo);
                }
                redo.on_hover_text(redo_label.unwrap_or("Nothing to redo"));

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                if ui.button("Clear all").clicked() {
                    actions.push(ToolbarAction::ClearAll);
                }
                if let Some(page) = center_page
                    && ui
                        .button("Delete page")
                        .on_hover_text(format!("Delete page {}", page))
                        .clicked()
                {
                    actions.push(ToolbarAction::DeletePage(page));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{:.0}%", zoom * 100.0));
                    if unsaved > 0 {
                        ui.colored_label(
                            egui::Color32::from_rgb(230, 180, 80),
                            egui::RichText::new(format!("● {} unsaved", unsaved)).strong(),
                        );
                    }
                });
            });
        });

    for action in actions {
        params.edit(|editor, ctx| match action {
            ToolbarAction::SetTool(tool) => editor.set_tool(ctx, tool),
            ToolbarAction::Undo => {
                editor.undo(ctx);
            }
            ToolbarAction::Redo => {
                editor.redo(ctx);
            }
            ToolbarAction::ClearAll => {
                editor.clear_all(ctx);
            }
            ToolbarAction::DeletePage(page) => {
                editor.delete_page(ctx, page);
            }
        });
    }
    Ok(())
}

/// What the settings bar changed this frame
#[derive(Debug, Clone, Copy, PartialEq)]
enum SettingsAction {
    PreviewColor(Color),
    EndPreview,
    SetColor(Color),
    SetThickness(f32),
}

/// Secondary toolbar: palette, line width, font size and touch input
pub fn tool_settings_ui(
    mut contexts: EguiContexts,
    mut params: EditorParams,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
    mut previewing: Local<Option<Color>>,
) -> Result {
    let tool = params.document.editor.tool();
    let settings = *params.document.editor.settings();
    let current_color = if tool == Tool::Highlight {
        settings.highlight_color.with_alpha(1.0)
    } else {
        settings.color
    };
    let mut thickness = settings.thickness;
    let mut font_size = settings.font_size;
    let mut touch_drawing = settings.enable_touch_drawing;

    let mut actions = Vec::new();
    let mut hovered_color = None;
    egui::TopBottomPanel::top("tool_settings")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 6))
                .fill(egui::Color32::from_rgb(45, 45, 48)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                ui.label(egui::RichText::new("Color:").color(egui::Color32::LIGHT_GRAY));
                ui.vertical(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(2.0, 2.0);
                    for row in PALETTE {
                        ui.horizontal(|ui| {
                            for name in row {
                                let Some(color) = named_color(name) else {
                                    continue;
                                };
                                let is_selected = color.to_srgba() == current_color.to_srgba();
                                let button = egui::Button::new("")
                                    .fill(egui_color(color))
                                    .min_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE))
                                    .stroke(if is_selected {
                                        egui::Stroke::new(2.0, egui::Color32::WHITE)
                                    } else {
                                        egui::Stroke::new(1.0, egui::Color32::DARK_GRAY)
                                    });
                                let response = ui.add(button);
                                if response.hovered() {
                                    hovered_color = Some(color);
                                }
                                if response.clicked() {
                                    actions.push(SettingsAction::SetColor(color));
                                }
                                response.on_hover_text(name);
                            }
                        });
                    }
                });

                ui.add_space(12.0);
                ui.separator();
                ui.add_space(12.0);

                ui.label("Width:");
                if ui
                    .add(
                        egui::DragValue::new(&mut thickness)
                            .range(1.0..=40.0)
                            .speed(0.5)
                            .suffix(" px"),
                    )
                    .changed()
                {
                    actions.push(SettingsAction::SetThickness(thickness));
                }

                ui.add_space(8.0);
                ui.label("Font Size:");
                ui.add(
                    egui::DragValue::new(&mut font_size)
                        .range(8.0..=72.0)
                        .speed(1.0)
                        .suffix(" px"),
                );

                ui.add_space(12.0);
                ui.separator();
                ui.add_space(12.0);

                ui.checkbox(&mut touch_drawing, "Draw with touch");
            });
        });

    let clicked = actions
        .iter()
        .any(|action| matches!(action, SettingsAction::SetColor(_)));
    if clicked {
        *previewing = None;
    } else if hovered_color != *previewing {
        actions.insert(
            0,
            match hovered_color {
                Some(color) => SettingsAction::PreviewColor(color),
                None => SettingsAction::EndPreview,
            },
        );
        *previewing = hovered_color;
    }

    for action in actions {
        params.edit(|editor, ctx| match action {
            SettingsAction::PreviewColor(color) => editor.preview_color(ctx, color),
            SettingsAction::EndPreview => editor.end_preview(ctx, false),
            SettingsAction::SetColor(color) => {
                editor.end_preview(ctx, false);
                editor.set_color(ctx, color);
            }
            SettingsAction::SetThickness(width) => editor.set_thickness(ctx, width),
        });
    }

    let settings = params.document.editor.settings_mut();
    settings.font_size = font_size;
    if settings.enable_touch_drawing != touch_drawing {
        settings.enable_touch_drawing = touch_drawing;
        config.data.enable_touch_drawing = touch_drawing;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
    Ok(())
}

/// Fit the page viewport to the space the panels left over
pub fn update_viewport(mut contexts: EguiContexts, mut params: EditorParams) -> Result {
    let available = contexts.ctx_mut()?.available_rect();
    params.view.set_viewport(Rect::new(
        available.min.x,
        available.min.y,
        available.max.x,
        available.max.y,
    ));
    Ok(())
}

/// Get the button label for a tool (with keyboard shortcut)
fn tool_button_label(tool: &Tool) -> &'static str {
    use crate::annotation::ShapeKind;

    match tool {
        Tool::Select => "Select [V]",
        Tool::RectSelect => "Box [B]",
        Tool::Pen => "Pen [P]",
        Tool::Eraser => "Eraser [E]",
        Tool::Shape(ShapeKind::Line) => "Line [L]",
        Tool::Shape(ShapeKind::Rectangle) => "Rect [R]",
        Tool::Shape(ShapeKind::Circle) => "Circle [C]",
        Tool::Text => "Text [T]",
        Tool::Highlight => "Highlight [H]",
        Tool::Hand => "Hand [Space]",
        Tool::Capture => "Capture [K]",
    }
}
