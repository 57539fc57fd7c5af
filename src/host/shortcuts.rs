//! Keyboard shortcuts.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::input::modifiers;
use super::{EditorParams, clipboard};
use crate::annotation::ShapeKind;
use crate::editor::{Modifiers, Shortcut, Tool};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Editor(Shortcut),
    /// Paste an image from the system clipboard
    PasteImage,
}

/// Map a key press to a command
pub fn command_for_key(key: KeyCode, modifiers: Modifiers) -> Option<KeyCommand> {
    use KeyCommand::Editor;

    if modifiers.ctrl {
        return match key {
            KeyCode::KeyZ if modifiers.shift => Some(Editor(Shortcut::Redo)),
            KeyCode::KeyZ => Some(Editor(Shortcut::Undo)),
            KeyCode::KeyY => Some(Editor(Shortcut::Redo)),
            KeyCode::KeyC => Some(Editor(Shortcut::Copy)),
            KeyCode::KeyV if modifiers.shift => Some(KeyCommand::PasteImage),
            KeyCode::KeyV => Some(Editor(Shortcut::Paste)),
            KeyCode::KeyD => Some(Editor(Shortcut::Clone)),
            _ => None,
        };
    }

    let shortcut = match key {
        KeyCode::Delete | KeyCode::Backspace => Shortcut::Delete,
        KeyCode::Escape => Shortcut::Escape,
        KeyCode::KeyP => Shortcut::SelectTool(Tool::Pen),
        KeyCode::KeyE => Shortcut::SelectTool(Tool::Eraser),
        KeyCode::KeyL => Shortcut::SelectTool(Tool::Shape(ShapeKind::Line)),
        KeyCode::KeyR => Shortcut::SelectTool(Tool::Shape(ShapeKind::Rectangle)),
        KeyCode::KeyC => Shortcut::SelectTool(Tool::Shape(ShapeKind::Circle)),
        KeyCode::KeyT => Shortcut::SelectTool(Tool::Text),
        KeyCode::KeyH => Shortcut::SelectTool(Tool::Highlight),
        KeyCode::KeyB => Shortcut::SelectTool(Tool::RectSelect),
        KeyCode::KeyV => Shortcut::SelectTool(Tool::Select),
        KeyCode::Space => Shortcut::SelectTool(Tool::Hand),
        KeyCode::KeyK => Shortcut::SelectTool(Tool::Capture),
        _ => return None,
    };
    Some(Editor(shortcut))
}

pub fn handle_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut params: EditorParams,
) {
    // Don't steal keys from text fields
    if contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.wants_keyboard_input())
    {
        return;
    }

    let modifiers = modifiers(&keyboard);
    for key in keyboard.get_just_pressed() {
        let Some(command) = command_for_key(*key, modifiers) else {
            continue;
        };
        match command {
            KeyCommand::Editor(shortcut) => {
                if params.edit(|editor, ctx| editor.handle_shortcut(ctx, shortcut)) == Some(true) {
                    debug!("Handled shortcut {:?}", shortcut);
                }
            }
            KeyCommand::PasteImage => match clipboard::read_image() {
                Ok(image) => {
                    params.edit(|editor, ctx| editor.paste_image(ctx, &image, None));
                }
                Err(e) => warn!("Cannot paste image: {}", e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };
    const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
    };
    const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
    };

    #[test]
    fn test_history_shortcuts() {
        assert_eq!(
            command_for_key(KeyCode::KeyZ, CTRL),
            Some(KeyCommand::Editor(Shortcut::Undo))
        );
        assert_eq!(
            command_for_key(KeyCode::KeyZ, CTRL_SHIFT),
            Some(KeyCommand::Editor(Shortcut::Redo))
        );
        assert_eq!(
            command_for_key(KeyCode::KeyY, CTRL),
            Some(KeyCommand::Editor(Shortcut::Redo))
        );
    }

    #[test]
    fn test_clipboard_shortcuts() {
        assert_eq!(
            command_for_key(KeyCode::KeyC, CTRL),
            Some(KeyCommand::Editor(Shortcut::Copy))
        );
        assert_eq!(
            command_for_key(KeyCode::KeyV, CTRL),
            Some(KeyCommand::Editor(Shortcut::Paste))
        );
        assert_eq!(
            command_for_key(KeyCode::KeyV, CTRL_SHIFT),
            Some(KeyCommand::PasteImage)
        );
        assert_eq!(
            command_for_key(KeyCode::KeyD, CTRL),
            Some(KeyCommand::Editor(Shortcut::Clone))
        );
    }

    #[test]
    fn test_plain_letters_pick_tools() {
        assert_eq!(
            command_for_key(KeyCode::KeyC, NONE),
            Some(KeyCommand::Editor(Shortcut::SelectTool(Tool::Shape(
                ShapeKind::Circle
            ))))
        );
        assert_eq!(
            command_for_key(KeyCode::KeyV, NONE),
            Some(KeyCommand::Editor(Shortcut::SelectTool(Tool::Select)))
        );
        assert_eq!(command_for_key(KeyCode::KeyQ, NONE), None);
        assert_eq!(command_for_key(KeyCode::KeyQ, CTRL), None);
    }

    #[test]
    fn test_delete_and_escape() {
        assert_eq!(
            command_for_key(KeyCode::Backspace, NONE),
            Some(KeyCommand::Editor(Shortcut::Delete))
        );
        assert_eq!(
            command_for_key(KeyCode::Escape, NONE),
            Some(KeyCommand::Editor(Shortcut::Escape))
        );
    }

    #[test]
    fn test_every_tool_has_a_key() {
        let keys = [
            KeyCode::KeyP,
            KeyCode::KeyE,
            KeyCode::KeyL,
            KeyCode::KeyR,
            KeyCode::KeyC,
            KeyCode::KeyT,
            KeyCode::KeyH,
            KeyCode::KeyB,
            KeyCode::KeyV,
            KeyCode::Space,
            KeyCode::KeyK,
        ];
        let mut tools: Vec<Tool> = keys
            .iter()
            .filter_map(|key| match command_for_key(*key, NONE) {
                Some(KeyCommand::Editor(Shortcut::SelectTool(tool))) => Some(tool),
                _ => None,
            })
            .collect();
        tools.dedup();
        assert_eq!(tools.len(), Tool::all().len());
        for tool in Tool::all() {
            assert!(tools.contains(tool), "{:?} has no key", tool);
        }
    }
}
