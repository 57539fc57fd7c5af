//! Copy, paste, clone and delete.

use bevy::prelude::*;
use image::RgbaImage;

use crate::annotation::{PageNumber, Stroke, StrokeKind};
use crate::constants::PASTED_IMAGE_MAX_PAGE_FRACTION;
use crate::coords::CanvasLayout;
use crate::geometry::{compute_bounds, translate_stroke};
use crate::history::{ErasedStroke, HistoryAction};

use super::capture::encode_png;
use super::context::EditContext;
use super::selection::SelectionEntry;
use super::tools::Tool;
use super::DocumentEditor;

/// Strokes copied from one document, pasteable into any document.
///
/// Owned by the session manager so copy in one tab and paste in another
/// works.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    strokes: Vec<Stroke>,
    source_page: Option<PageNumber>,
    /// Pastes since the last copy, drives the cascade offset
    paste_count: u32,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn source_page(&self) -> Option<PageNumber> {
        self.source_page
    }

    pub fn paste_count(&self) -> u32 {
        self.paste_count
    }

    pub fn set(&mut self, strokes: Vec<Stroke>, source_page: PageNumber) {
        self.strokes = strokes;
        self.source_page = Some(source_page);
        self.paste_count = 0;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn union_bounds(strokes: &[Stroke]) -> Option<Rect> {
    strokes
        .iter()
        .map(|stroke| compute_bounds(stroke, 0.0))
        .reduce(|a, b| a.union(b))
}

/// Shift `delta` so that `bounds + delta` lies inside `area` where possible.
/// Groups larger than the area are aligned to its top-left.
fn clamp_delta(bounds: Rect, area: Rect, mut delta: Vec2) -> Vec2 {
    let max_after = bounds.max + delta;
    delta -= (max_after - area.max).max(Vec2::ZERO);
    let min_after = bounds.min + delta;
    delta += (area.min - min_after).max(Vec2::ZERO);
    delta
}

impl DocumentEditor {
    /// Copy the selection into the shared clipboard. Returns how many
    /// strokes were copied.
    pub fn copy_selection(&mut self, ctx: &mut EditContext) -> usize {
        let Some(primary) = self.selection.primary() else {
            return 0;
        };
        let group: Vec<Stroke> = self
            .selected_strokes_on(primary.page)
            .into_iter()
            .map(|(_, stroke)| stroke)
            .collect();

        let strokes = if group.len() > 1 {
            group
        } else {
            match self
                .resolve_index(primary.page, primary.index, primary.id)
                .and_then(|index| self.document.strokes.get(primary.page, index))
            {
                Some(stroke) => vec![stroke.clone()],
                None => return 0,
            }
        };

        let count = strokes.len();
        ctx.clipboard.set(strokes, primary.page);
        self.context_menu = None;
        debug!("Copied {} stroke(s) from page {}", count, primary.page);
        count
    }

    /// Page nearest the viewport's vertical center
    fn paste_target(&self, ctx: &EditContext) -> Option<(PageNumber, CanvasLayout)> {
        let viewport_center = ctx.host.viewport().center().y;
        self.document
            .deleted_pages
            .active_pages(ctx.host.page_count())
            .into_iter()
            .filter_map(|page| ctx.host.canvas_layout(page).map(|layout| (page, layout)))
            .min_by(|(_, a), (_, b)| {
                let da = (a.client_rect.center().y - viewport_center).abs();
                let db = (b.client_rect.center().y - viewport_center).abs();
                da.total_cmp(&db)
            })
    }

    fn target_layout(
        &self,
        ctx: &EditContext,
        target: Option<PageNumber>,
    ) -> Option<(PageNumber, CanvasLayout)> {
        match target {
            Some(page) if !self.is_page_deleted(page) => {
                ctx.host.canvas_layout(page).map(|layout| (page, layout))
            }
            Some(_) => None,
            None => self.paste_target(ctx),
        }
    }

    /// Center of the visible part of a page, in canvas pixels
    fn visible_center(ctx: &EditContext, layout: &CanvasLayout) -> Vec2 {
        let visible = layout.client_rect.intersect(ctx.host.viewport());
        if visible.is_empty() {
            layout.canvas_bounds().center()
        } else {
            layout.client_rect_to_canvas(visible).center()
        }
    }

    /// Paste the clipboard onto `target` (or the page in view), recentered
    /// with a cascading offset. Returns how many strokes were pasted.
    pub fn paste(&mut self, ctx: &mut EditContext, target: Option<PageNumber>) -> usize {
        if ctx.clipboard.is_empty() {
            return 0;
        }
        let Some((page, layout)) = self.target_layout(ctx, target) else {
            debug!("No page to paste onto");
            return 0;
        };
        let Some(group_bounds) = union_bounds(ctx.clipboard.strokes()) else {
            return 0;
        };

        let cascade_steps = ctx.clipboard.paste_count % self.config.max_paste_cascade.max(1);
        let cascade = Vec2::splat(self.config.paste_offset * cascade_steps as f32);
        let delta = Self::visible_center(ctx, &layout) - group_bounds.center() + cascade;
        let delta = clamp_delta(group_bounds, layout.canvas_bounds(), delta);

        let pasted: Vec<Stroke> = ctx
            .clipboard
            .strokes()
            .iter()
            .map(|stroke| translate_stroke(stroke, delta).with_fresh_id())
            .collect();
        ctx.clipboard.paste_count += 1;

        let count = pasted.len();
        self.add_and_select(ctx, page, pasted);
        self.tool = Tool::Select;
        info!("Pasted {} stroke(s) onto page {}", count, page);
        count
    }

    /// Duplicate the selection in place, shifted by the paste offset
    pub fn clone_selection(&mut self, ctx: &mut EditContext) -> usize {
        let Some(primary) = self.selection.primary() else {
            return 0;
        };
        let offset = Vec2::splat(self.config.paste_offset);
        let clones: Vec<Stroke> = self
            .selected_strokes_on(primary.page)
            .into_iter()
            .map(|(_, stroke)| translate_stroke(&stroke, offset).with_fresh_id())
            .collect();
        if clones.is_empty() {
            return 0;
        }
        self.context_menu = None;
        let count = clones.len();
        self.add_and_select(ctx, primary.page, clones);
        count
    }

    /// Add strokes one `Add` each and make them the selection
    fn add_and_select(&mut self, ctx: &mut EditContext, page: PageNumber, strokes: Vec<Stroke>) {
        let mut pages = self.selection.pages();
        pages.push(page);

        let mut entries = Vec::with_capacity(strokes.len());
        for stroke in strokes {
            let id = stroke.id;
            let index = self.document.strokes.add_stroke(page, stroke.clone());
            ctx.commit(HistoryAction::Add { page, stroke });
            entries.push(SelectionEntry { page, index, id });
        }
        self.selection.set(entries);
        ctx.redraw_pages(pages);
    }

    /// Remove every selected stroke, one `Erase` per page
    pub fn delete_selection(&mut self, ctx: &mut EditContext) -> usize {
        let mut deleted = 0;
        let pages = self.selection.pages();
        for page in &pages {
            let page = *page;
            let mut indices: Vec<usize> = self
                .selected_strokes_on(page)
                .into_iter()
                .map(|(index, _)| index)
                .collect();
            indices.sort_unstable();
            indices.dedup();

            let mut erased = Vec::with_capacity(indices.len());
            for index in indices.iter().rev() {
                if let Some(stroke) = self.document.strokes.remove_stroke_at(page, *index) {
                    erased.push(ErasedStroke {
                        index: *index,
                        stroke,
                    });
                }
            }
            if erased.is_empty() {
                continue;
            }
            erased.reverse();
            deleted += erased.len();
            ctx.commit(HistoryAction::Erase {
                page,
                strokes: erased,
            });
        }
        self.selection.clear();
        self.context_menu = None;
        ctx.redraw_pages(pages);
        deleted
    }

    /// Place a bitmap (from the system clipboard) as an image stroke.
    ///
    /// Images wider than half the page are scaled down to fit.
    pub fn paste_image(
        &mut self,
        ctx: &mut EditContext,
        image: &RgbaImage,
        target: Option<PageNumber>,
    ) -> bool {
        if image.width() == 0 || image.height() == 0 {
            return false;
        }
        let Some((page, layout)) = self.target_layout(ctx, target) else {
            debug!("No page to paste the image onto");
            return false;
        };
        let data = match encode_png(image) {
            Ok(data) => data,
            Err(e) => {
                warn!("Could not paste image: {}", e);
                return false;
            }
        };

        let natural = Vec2::new(image.width() as f32, image.height() as f32);
        let max_width = layout.bitmap_size.x * PASTED_IMAGE_MAX_PAGE_FRACTION;
        let size = if natural.x > max_width && max_width > 0.0 {
            natural * (max_width / natural.x)
        } else {
            natural
        };

        let center = Self::visible_center(ctx, &layout);
        let bounds = Rect::from_center_size(center, size);
        let delta = clamp_delta(bounds, layout.canvas_bounds(), Vec2::ZERO);
        let stroke = Stroke::image(bounds.min + delta, size, data);

        if let StrokeKind::Image { data, .. } = &stroke.kind {
            self.images.insert(data, image.clone());
        }
        self.add_and_select(ctx, page, vec![stroke]);
        self.tool = Tool::Select;
        info!(
            "Pasted {}x{} image onto page {}",
            image.width(),
            image.height(),
            page
        );
        true
    }
}
