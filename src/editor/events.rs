//! Input events delivered by the host.

use bevy::prelude::*;

use crate::annotation::PageNumber;

use super::tools::Tool;

/// `buttons` bit for the primary button
pub const BUTTON_PRIMARY: u32 = 1;
/// `buttons` bit for the secondary button (right click, pen barrel)
pub const BUTTON_SECONDARY: u32 = 2;
/// `buttons` bit for the pen eraser end
pub const BUTTON_ERASER: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Ctrl, or Cmd on macOS
    pub ctrl: bool,
    pub shift: bool,
}

/// A pointer event in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: u32,
    pub kind: PointerKind,
    /// Page the event target belongs to, if the host knows it
    pub page: Option<PageNumber>,
    pub client: Vec2,
    /// Pressed buttons as a bit set (see the `BUTTON_*` constants)
    pub buttons: u32,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Primary-button mouse event
    pub fn mouse(client: Vec2, page: Option<PageNumber>) -> Self {
        Self {
            pointer_id: 1,
            kind: PointerKind::Mouse,
            page,
            client,
            buttons: BUTTON_PRIMARY,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_buttons(mut self, buttons: u32) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Pen barrel button or eraser end: erase whatever tool is active
    pub fn is_barrel_erase(&self) -> bool {
        self.kind == PointerKind::Pen && self.buttons & (BUTTON_SECONDARY | BUTTON_ERASER) != 0
    }

    /// Right click (not a pen barrel press)
    pub fn is_secondary(&self) -> bool {
        self.kind != PointerKind::Pen
            && self.buttons & BUTTON_SECONDARY != 0
            && self.buttons & BUTTON_PRIMARY == 0
    }
}

/// Keyboard commands the editor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    Copy,
    Paste,
    Clone,
    Delete,
    Escape,
    SelectTool(Tool),
}
