//! Replaying history actions against a document.
//!
//! A stroke that can no longer be found means the log and the store went out
//! of sync. That is logged and the stroke is skipped; the rest of the action
//! still applies.

use bevy::prelude::*;

use crate::annotation::{PageNumber, Stroke};
use crate::error::AnnotationError;
use crate::store::{AnnotationDocument, PageAnnotations};

use super::action::HistoryAction;

fn report_missing(page: PageNumber, stroke: &Stroke) {
    warn!(
        "History out of sync: {}",
        AnnotationError::StrokeNotFound {
            page,
            id: stroke.id
        }
    );
}

/// Put `stroke` back in place of the stroke with the same id.
///
/// `index` is tried first and id lookup is the fallback for stale indices.
fn replace_in_place(store: &mut PageAnnotations, page: PageNumber, index: usize, stroke: &Stroke) {
    let slot = match store.get(page, index) {
        Some(current) if current.id == stroke.id => Some(index),
        _ => store.find_by_id(page, stroke.id),
    };
    match slot {
        Some(slot) => {
            store.replace_stroke_at(page, slot, stroke.clone());
        }
        None => report_missing(page, stroke),
    }
}

fn union_pages(a: &PageAnnotations, b: &PageAnnotations) -> Vec<PageNumber> {
    let mut pages: Vec<PageNumber> = a.pages().chain(b.pages()).collect();
    pages.sort_unstable();
    pages.dedup();
    pages
}

/// Revert `action`. Returns the pages that need a redraw.
pub fn apply_undo(action: &HistoryAction, document: &mut AnnotationDocument) -> Vec<PageNumber> {
    let store = &mut document.strokes;
    match action {
        HistoryAction::Add { page, stroke } => {
            if store.remove_by_id(*page, stroke.id).is_none() {
                report_missing(*page, stroke);
            }
        }
        HistoryAction::Erase { page, strokes } => {
            let mut ordered: Vec<_> = strokes.iter().collect();
            ordered.sort_by_key(|erased| erased.index);
            for erased in ordered {
                store.insert_stroke_at(*page, erased.index, erased.stroke.clone());
            }
        }
        HistoryAction::Modify {
            page,
            index,
            previous,
            ..
        } => replace_in_place(store, *page, *index, previous),
        HistoryAction::Clear { previous } => {
            let pages = union_pages(store, previous);
            store.restore(previous.clone());
            return pages;
        }
        HistoryAction::DeletePage { page } => {
            document.deleted_pages.restore(*page);
        }
    }
    action.pages()
}

/// Re-apply `action`. Returns the pages that need a redraw.
pub fn apply_redo(action: &HistoryAction, document: &mut AnnotationDocument) -> Vec<PageNumber> {
    let store = &mut document.strokes;
    match action {
        HistoryAction::Add { page, stroke } => {
            store.add_stroke(*page, stroke.clone());
        }
        HistoryAction::Erase { page, strokes } => {
            for erased in strokes {
                if store.remove_by_id(*page, erased.stroke.id).is_none() {
                    report_missing(*page, &erased.stroke);
                }
            }
        }
        HistoryAction::Modify {
            page,
            index,
            stroke,
            ..
        } => replace_in_place(store, *page, *index, stroke),
        HistoryAction::Clear { previous } => {
            let pages = union_pages(store, previous);
            store.clear_all();
            return pages;
        }
        HistoryAction::DeletePage { page } => {
            document.deleted_pages.delete(*page);
        }
    }
    action.pages()
}
