//! Page rendering: strokes, selection chrome and the live gesture overlay.

use bevy::prelude::*;

use crate::annotation::{PageNumber, Stroke};
use crate::render::{
    Canvas2d, ImageCache, draw_marquee, draw_multi_selection, draw_pen_preview,
    draw_single_selection, draw_stroke,
};

use super::gesture::Gesture;
use super::DocumentEditor;

fn draw_isolated(canvas: &mut dyn Canvas2d, stroke: &Stroke, images: &mut ImageCache) {
    if let Err(e) = draw_stroke(canvas, stroke, images) {
        warn!("Skipping stroke {}: {}", stroke.id, e);
    }
}

impl DocumentEditor {
    /// Repaint one page from scratch.
    ///
    /// The primary selected stroke is drawn after all others so it is never
    /// hidden while being edited.
    pub fn render_page(&mut self, page: PageNumber, canvas: &mut dyn Canvas2d) {
        canvas.clear();
        if self.is_page_deleted(page) {
            return;
        }

        let primary_index = self
            .selection
            .primary()
            .filter(|entry| entry.page == page)
            .and_then(|entry| self.resolve_index(page, entry.index, entry.id));
        let single = self
            .selection
            .single()
            .filter(|entry| entry.page == page)
            .is_some();
        let selected: Vec<Stroke> = self
            .selected_strokes_on(page)
            .into_iter()
            .map(|(_, stroke)| stroke)
            .collect();

        let strokes = self.document.strokes.strokes(page);
        for (index, stroke) in strokes.iter().enumerate() {
            if Some(index) != primary_index {
                draw_isolated(canvas, stroke, &mut self.images);
            }
        }
        if let Some(stroke) = primary_index.and_then(|index| strokes.get(index)) {
            draw_isolated(canvas, stroke, &mut self.images);
        }

        let padding = self.config.selection_padding;
        match selected.as_slice() {
            [] => {}
            [only] if single => {
                draw_single_selection(canvas, only, padding, self.config.handle_radius)
            }
            many => {
                let refs: Vec<&Stroke> = many.iter().collect();
                draw_multi_selection(canvas, &refs, padding);
            }
        }

        self.draw_gesture_overlay(page, canvas);
    }

    fn draw_gesture_overlay(&mut self, page: PageNumber, canvas: &mut dyn Canvas2d) {
        if self.gesture.page() != Some(page) {
            return;
        }
        match &self.gesture {
            Gesture::Drawing { points, .. } => draw_pen_preview(canvas, points),
            Gesture::Shape {
                shape, start, end, ..
            } => {
                let preview = Stroke::shape(
                    *shape,
                    *start,
                    *end,
                    self.settings.color,
                    self.settings.thickness,
                );
                draw_isolated(canvas, &preview, &mut self.images);
            }
            Gesture::Marquee { start, end, .. } => {
                draw_marquee(canvas, Rect::from_corners(*start, *end))
            }
            _ => {}
        }
    }
}
