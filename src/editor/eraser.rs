//! Eraser: removes whole strokes under the pointer.
//!
//! Strokes disappear as soon as the pointer touches them; the history only
//! sees one `Erase` per gesture, with every stroke's index from before the
//! gesture started.

use bevy::prelude::*;

use crate::annotation::{PageNumber, Stroke, StrokeKind};
use crate::geometry::hit_test_stroke;
use crate::history::{ErasedStroke, HistoryAction};

use super::context::EditContext;
use super::gesture::Gesture;
use super::DocumentEditor;

fn touches(stroke: &Stroke, point: Vec2, radius: f32) -> bool {
    match &stroke.kind {
        StrokeKind::Pen { points } => points.iter().any(|p| p.position.distance(point) < radius),
        _ => hit_test_stroke(point, stroke, radius),
    }
}

impl DocumentEditor {
    pub(super) fn begin_erasing(
        &mut self,
        ctx: &mut EditContext,
        pointer_id: u32,
        page: PageNumber,
        point: Vec2,
    ) {
        let original_ids = self
            .document
            .strokes
            .strokes(page)
            .iter()
            .map(|stroke| stroke.id)
            .collect();
        self.gesture = Gesture::Erasing {
            pointer_id,
            page,
            original_ids,
            removed: Vec::new(),
        };
        self.erase_at(ctx, point);
    }

    pub(super) fn erase_at(&mut self, ctx: &mut EditContext, point: Vec2) {
        let Gesture::Erasing {
            page,
            original_ids,
            removed,
            ..
        } = &mut self.gesture
        else {
            return;
        };
        let page = *page;
        let radius = self.config.eraser_radius;

        let hits: Vec<usize> = self
            .document
            .strokes
            .strokes(page)
            .iter()
            .enumerate()
            .filter(|(_, stroke)| touches(stroke, point, radius))
            .map(|(index, _)| index)
            .collect();
        if hits.is_empty() {
            return;
        }

        // Back to front so earlier indices stay valid
        for index in hits.into_iter().rev() {
            let Some(stroke) = self.document.strokes.remove_stroke_at(page, index) else {
                continue;
            };
            // Strokes added after the gesture started keep their current slot
            let original_index = original_ids
                .iter()
                .position(|id| *id == stroke.id)
                .unwrap_or_else(|| {
                    debug!("Erased stroke {} appeared on page {} mid-gesture", stroke.id, page);
                    index
                });
            removed.push(ErasedStroke {
                index: original_index,
                stroke,
            });
        }

        self.selection.refresh(&self.document.strokes);
        ctx.redraw(page);
    }

    pub(super) fn finish_erasing(
        &mut self,
        ctx: &mut EditContext,
        page: PageNumber,
        mut removed: Vec<ErasedStroke>,
    ) {
        if removed.is_empty() {
            return;
        }
        removed.sort_by_key(|erased| erased.index);
        debug!("Erased {} stroke(s) on page {}", removed.len(), page);
        ctx.commit(HistoryAction::Erase {
            page,
            strokes: removed,
        });
        ctx.redraw(page);
    }
}
