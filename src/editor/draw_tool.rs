//! Pen and shape tools.

use bevy::prelude::*;

use crate::annotation::{PageNumber, PenPoint, ShapeKind, Stroke};
use crate::history::HistoryAction;

use super::context::EditContext;
use super::gesture::Gesture;
use super::DocumentEditor;

impl DocumentEditor {
    pub(super) fn begin_drawing(
        &mut self,
        ctx: &mut EditContext,
        pointer_id: u32,
        page: PageNumber,
        point: Vec2,
    ) {
        self.gesture = Gesture::Drawing {
            pointer_id,
            page,
            points: vec![self.pen_point(point)],
        };
        ctx.redraw(page);
    }

    pub(super) fn extend_drawing(&mut self, ctx: &mut EditContext, point: Vec2) {
        let pen_point = self.pen_point(point);
        let Gesture::Drawing { page, points, .. } = &mut self.gesture else {
            return;
        };
        if points.last().is_some_and(|last| last.position == point) {
            return;
        }
        points.push(pen_point);
        ctx.redraw(*page);
    }

    /// Commit the path; a single tap leaves nothing behind
    pub(super) fn finish_drawing(
        &mut self,
        ctx: &mut EditContext,
        page: PageNumber,
        points: Vec<PenPoint>,
    ) {
        if points.len() < 2 {
            ctx.redraw(page);
            return;
        }
        let stroke = Stroke::pen(points);
        self.document.strokes.add_stroke(page, stroke.clone());
        ctx.commit(HistoryAction::Add { page, stroke });
        ctx.redraw(page);
    }

    fn pen_point(&self, position: Vec2) -> PenPoint {
        PenPoint::new(position, self.settings.color, self.settings.thickness)
    }

    pub(super) fn begin_shape(
        &mut self,
        pointer_id: u32,
        page: PageNumber,
        shape: ShapeKind,
        point: Vec2,
    ) {
        self.gesture = Gesture::Shape {
            pointer_id,
            page,
            shape,
            start: point,
            end: point,
        };
    }

    pub(super) fn update_shape(&mut self, ctx: &mut EditContext, point: Vec2) {
        if let Gesture::Shape { page, end, .. } = &mut self.gesture {
            *end = point;
            ctx.redraw(*page);
        }
    }

    pub(super) fn finish_shape(
        &mut self,
        ctx: &mut EditContext,
        page: PageNumber,
        shape: ShapeKind,
        start: Vec2,
        end: Vec2,
    ) {
        let extent = (end - start).abs();
        let degenerate = match shape {
            ShapeKind::Line | ShapeKind::Circle => extent == Vec2::ZERO,
            ShapeKind::Rectangle => extent.x == 0.0 || extent.y == 0.0,
        };
        if degenerate {
            ctx.redraw(page);
            return;
        }

        let stroke = Stroke::shape(
            shape,
            start,
            end,
            self.settings.color,
            self.settings.thickness,
        );
        self.document.strokes.add_stroke(page, stroke.clone());
        ctx.commit(HistoryAction::Add { page, stroke });
        ctx.redraw(page);
    }
}
