//! Dragging, resizing and rotating selected strokes.
//!
//! Every update recomputes from the snapshot taken when the gesture started,
//! so rounding never accumulates across pointer moves.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::annotation::{PageNumber, Stroke};
use crate::geometry::{Handle, compute_unrotated_bounds, resize_stroke, resized_bounds, rotate_point, translate_stroke};
use crate::history::{HistoryAction, ModifyKind};

use super::context::EditContext;
use super::gesture::Gesture;
use super::DocumentEditor;

fn angle_of(vector: Vec2) -> f32 {
    vector.y.atan2(vector.x)
}

impl DocumentEditor {
    /// Arm a move of the selected strokes on `page`
    pub(super) fn begin_move(&mut self, pointer_id: u32, page: PageNumber, point: Vec2) {
        let originals = self
            .selected_strokes_on(page)
            .into_iter()
            .map(|(_, stroke)| stroke)
            .collect();
        self.gesture = Gesture::Moving {
            pointer_id,
            page,
            start: point,
            current: point,
            dragging: false,
            originals,
        };
    }

    pub(super) fn update_move(&mut self, ctx: &mut EditContext, point: Vec2) {
        let Gesture::Moving {
            page,
            start,
            current,
            dragging,
            originals,
            ..
        } = &mut self.gesture
        else {
            return;
        };
        *current = point;
        if !*dragging {
            if point.distance(*start) <= self.config.drag_start_distance {
                return;
            }
            *dragging = true;
        }

        let delta = point - *start;
        for original in originals.iter() {
            if let Some(index) = self.document.strokes.find_by_id(*page, original.id) {
                self.document
                    .strokes
                    .replace_stroke_at(*page, index, translate_stroke(original, delta));
            }
        }
        ctx.redraw(*page);
    }

    /// Record one `Move` per stroke, or snap back if the net motion is tiny
    pub(super) fn finish_move(
        &mut self,
        ctx: &mut EditContext,
        page: PageNumber,
        delta: Vec2,
        dragging: bool,
        originals: Vec<Stroke>,
    ) {
        if !dragging {
            return;
        }
        if delta.length() <= self.config.move_commit_distance {
            self.restore_strokes(ctx, page, &originals);
            return;
        }

        for previous in originals {
            let Some(index) = self.document.strokes.find_by_id(page, previous.id) else {
                warn!("Moved stroke {} vanished from page {}", previous.id, page);
                continue;
            };
            let Some(stroke) = self.document.strokes.get(page, index).cloned() else {
                continue;
            };
            ctx.commit(HistoryAction::Modify {
                kind: ModifyKind::Move,
                page,
                index,
                stroke,
                previous,
            });
        }
        self.selection.refresh(&self.document.strokes);
        ctx.redraw(page);
    }

    pub(super) fn begin_resize(
        &mut self,
        pointer_id: u32,
        page: PageNumber,
        handle: Handle,
        original: Stroke,
        point: Vec2,
    ) {
        let bounds = compute_unrotated_bounds(&original, 0.0);
        self.gesture = Gesture::Resizing {
            pointer_id,
            page,
            handle,
            start: point,
            original,
            bounds,
        };
    }

    pub(super) fn update_resize(&mut self, ctx: &mut EditContext, point: Vec2) {
        let Gesture::Resizing {
            page,
            handle,
            start,
            original,
            bounds,
            ..
        } = &self.gesture
        else {
            return;
        };

        // Pointer motion in the stroke's own (unrotated) frame
        let rotation = if original.supports_rotation() {
            original.rotation
        } else {
            0.0
        };
        let local_delta = rotate_point(point - *start, Vec2::ZERO, -rotation);
        let Some(new_bounds) =
            resized_bounds(*bounds, *handle, local_delta, self.config.min_resize_extent)
        else {
            return;
        };

        let resized = resize_stroke(original, *bounds, new_bounds, *handle);
        if !resized.is_finite() {
            return;
        }
        if let Some(index) = self.document.strokes.find_by_id(*page, original.id) {
            self.document.strokes.replace_stroke_at(*page, index, resized);
        }
        ctx.redraw(*page);
    }

    pub(super) fn begin_rotate(
        &mut self,
        pointer_id: u32,
        page: PageNumber,
        original: Stroke,
        point: Vec2,
    ) {
        let center = compute_unrotated_bounds(&original, 0.0).center();
        self.gesture = Gesture::Rotating {
            pointer_id,
            page,
            original,
            center,
            start_angle: angle_of(point - center),
        };
    }

    pub(super) fn update_rotate(&mut self, ctx: &mut EditContext, point: Vec2) {
        let Gesture::Rotating {
            page,
            original,
            center,
            start_angle,
            ..
        } = &self.gesture
        else {
            return;
        };
        if point == *center {
            return;
        }

        let angle = angle_of(point - *center);
        let mut rotated = original.clone();
        rotated.rotation = (original.rotation + angle - *start_angle).rem_euclid(TAU);
        if let Some(index) = self.document.strokes.find_by_id(*page, original.id) {
            self.document.strokes.replace_stroke_at(*page, index, rotated);
        }
        ctx.redraw(*page);
    }

    /// Commit a resize or rotate if the stroke actually changed
    pub(super) fn finish_transform(
        &mut self,
        ctx: &mut EditContext,
        page: PageNumber,
        previous: Stroke,
        kind: ModifyKind,
    ) {
        let Some(index) = self.document.strokes.find_by_id(page, previous.id) else {
            warn!("Transformed stroke {} vanished from page {}", previous.id, page);
            return;
        };
        let Some(stroke) = self.document.strokes.get(page, index).cloned() else {
            return;
        };
        if stroke != previous {
            ctx.commit(HistoryAction::Modify {
                kind,
                page,
                index,
                stroke,
                previous,
            });
        }
        ctx.redraw(page);
    }

    /// Put gesture-start snapshots back in place
    pub(super) fn restore_strokes(
        &mut self,
        ctx: &mut EditContext,
        page: PageNumber,
        originals: &[Stroke],
    ) {
        for original in originals {
            if let Some(index) = self.document.strokes.find_by_id(page, original.id) {
                self.document
                    .strokes
                    .replace_stroke_at(page, index, original.clone());
            }
        }
        ctx.redraw(page);
    }
}
