//! Turning the document's text selection into highlight strokes.

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::annotation::{HighlightRect, PageNumber, Stroke};
use crate::geometry::merge_line_rects;
use crate::history::HistoryAction;

use super::context::EditContext;
use super::DocumentEditor;

impl DocumentEditor {
    /// Highlight the host's current text selection, one stroke per page.
    ///
    /// Returns the number of strokes added.
    pub fn highlight_selection(&mut self, ctx: &mut EditContext) -> usize {
        let client_rects = ctx.host.text_selection_rects();
        if client_rects.is_empty() {
            return 0;
        }

        let mut per_page: BTreeMap<PageNumber, Vec<Rect>> = BTreeMap::new();
        for rect in client_rects {
            if rect.is_empty() {
                continue;
            }
            let Some(page) = ctx.host.page_at_client_point(rect.center()) else {
                continue;
            };
            if self.is_page_deleted(page) {
                continue;
            }
            let Some(layout) = ctx.host.canvas_layout(page) else {
                continue;
            };
            per_page
                .entry(page)
                .or_default()
                .push(layout.client_rect_to_canvas(rect));
        }

        let mut added = 0;
        for (page, rects) in per_page {
            let merged = merge_line_rects(&rects, self.config.highlight_merge_tolerance);
            if merged.is_empty() {
                continue;
            }
            let stroke = Stroke::highlight(
                merged.into_iter().map(HighlightRect::from_rect).collect(),
                self.settings.highlight_color,
            );
            self.document.strokes.add_stroke(page, stroke.clone());
            ctx.commit(HistoryAction::Add { page, stroke });
            ctx.redraw(page);
            added += 1;
        }

        ctx.host.clear_text_selection();
        if added > 0 {
            debug!("Added {} highlight stroke(s)", added);
        }
        added
    }
}
