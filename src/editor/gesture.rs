//! In-flight pointer gestures and other transient editor state.

use bevy::prelude::*;

use crate::annotation::{PageNumber, PenPoint, ShapeKind, Stroke, StrokeId};
use crate::geometry::Handle;
use crate::history::ErasedStroke;

/// What the active pointer is doing.
///
/// Every variant except `Idle` belongs to the pointer that started it; events
/// from other pointers are ignored until it ends.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Drawing {
        pointer_id: u32,
        page: PageNumber,
        points: Vec<PenPoint>,
    },
    Erasing {
        pointer_id: u32,
        page: PageNumber,
        /// Stroke order when the gesture started, for undo indices
        original_ids: Vec<StrokeId>,
        removed: Vec<ErasedStroke>,
    },
    Shape {
        pointer_id: u32,
        page: PageNumber,
        shape: ShapeKind,
        start: Vec2,
        end: Vec2,
    },
    Marquee {
        pointer_id: u32,
        page: PageNumber,
        start: Vec2,
        end: Vec2,
        /// Copy pixels instead of selecting strokes
        capture: bool,
    },
    /// Pressed on a selected stroke; becomes a drag past the start distance
    Moving {
        pointer_id: u32,
        page: PageNumber,
        start: Vec2,
        current: Vec2,
        dragging: bool,
        originals: Vec<Stroke>,
    },
    Resizing {
        pointer_id: u32,
        page: PageNumber,
        handle: Handle,
        start: Vec2,
        original: Stroke,
        /// Raw bounds of `original`, unrotated
        bounds: Rect,
    },
    Rotating {
        pointer_id: u32,
        page: PageNumber,
        original: Stroke,
        center: Vec2,
        start_angle: f32,
    },
    Panning {
        pointer_id: u32,
        start_client: Vec2,
        start_scroll: Vec2,
    },
}

impl Gesture {
    pub fn pointer_id(&self) -> Option<u32> {
        match self {
            Gesture::Idle => None,
            Gesture::Drawing { pointer_id, .. }
            | Gesture::Erasing { pointer_id, .. }
            | Gesture::Shape { pointer_id, .. }
            | Gesture::Marquee { pointer_id, .. }
            | Gesture::Moving { pointer_id, .. }
            | Gesture::Resizing { pointer_id, .. }
            | Gesture::Rotating { pointer_id, .. }
            | Gesture::Panning { pointer_id, .. } => Some(*pointer_id),
        }
    }

    pub fn page(&self) -> Option<PageNumber> {
        match self {
            Gesture::Idle | Gesture::Panning { .. } => None,
            Gesture::Drawing { page, .. }
            | Gesture::Erasing { page, .. }
            | Gesture::Shape { page, .. }
            | Gesture::Marquee { page, .. }
            | Gesture::Moving { page, .. }
            | Gesture::Resizing { page, .. }
            | Gesture::Rotating { page, .. } => Some(*page),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}

/// A text box waiting for input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingText {
    pub page: PageNumber,
    /// Click point in canvas pixels
    pub anchor: Vec2,
    /// Click point in client pixels, where the host shows its input box
    pub client: Vec2,
    /// Canvas pixels per client pixel
    pub scale: f32,
}

/// Right-click menu over a selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    pub page: PageNumber,
    pub client: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    Copy,
    Clone,
    Delete,
}

/// Cursor the host should show at a given position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Crosshair,
    Text,
    Move,
    Rotate,
    Resize(Handle),
    Grab,
    Grabbing,
}
