//! Reversible annotation edits.

use crate::annotation::{PageNumber, Stroke};
use crate::store::PageAnnotations;

/// What a [`HistoryAction::Modify`] changed
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ModifyKind {
    Move,
    Resize,
    Rotate,
    ColorChange,
    ThicknessChange,
    TextChange,
}

impl ModifyKind {
    pub fn label(&self) -> &'static str {
        match self {
            ModifyKind::Move => "Move",
            ModifyKind::Resize => "Resize",
            ModifyKind::Rotate => "Rotate",
            ModifyKind::ColorChange => "Change color",
            ModifyKind::ThicknessChange => "Change thickness",
            ModifyKind::TextChange => "Edit text",
        }
    }
}

/// A stroke removed by an erase, with its index before the gesture started
#[derive(Clone, Debug, PartialEq)]
pub struct ErasedStroke {
    pub index: usize,
    pub stroke: Stroke,
}

/// A reversible edit
#[derive(Clone, Debug, PartialEq)]
pub enum HistoryAction {
    /// A stroke was appended to a page
    Add { page: PageNumber, stroke: Stroke },
    /// One erase gesture (or delete) removed these strokes
    Erase {
        page: PageNumber,
        strokes: Vec<ErasedStroke>,
    },
    /// A stroke changed in place; `previous` is its state before the change
    Modify {
        kind: ModifyKind,
        page: PageNumber,
        index: usize,
        stroke: Stroke,
        previous: Stroke,
    },
    /// Every page was cleared
    Clear { previous: PageAnnotations },
    /// A page was logically deleted
    DeletePage { page: PageNumber },
}

impl HistoryAction {
    /// Short description for undo/redo tooltips and logs
    pub fn label(&self) -> &'static str {
        match self {
            HistoryAction::Add { .. } => "Add annotation",
            HistoryAction::Erase { .. } => "Erase",
            HistoryAction::Modify { kind, .. } => kind.label(),
            HistoryAction::Clear { .. } => "Clear all",
            HistoryAction::DeletePage { .. } => "Delete page",
        }
    }

    /// Pages whose rendering this action affects
    pub fn pages(&self) -> Vec<PageNumber> {
        match self {
            HistoryAction::Add { page, .. }
            | HistoryAction::Erase { page, .. }
            | HistoryAction::Modify { page, .. }
            | HistoryAction::DeletePage { page } => vec![*page],
            HistoryAction::Clear { previous } => previous.pages().collect(),
        }
    }
}
