//! The contract between the editor and whoever displays the document.

use bevy::prelude::*;
use image::RgbaImage;

use crate::annotation::PageNumber;
use crate::coords::CanvasLayout;
use crate::error::AnnotationResult;
use crate::history::HistoryAction;

/// Pixels of one page, both at canvas bitmap resolution
pub struct PageBitmaps {
    /// Rendered document page
    pub base: RgbaImage,
    /// Annotation layer drawn over it
    pub annotations: RgbaImage,
}

/// Services the editor needs from the page viewer.
///
/// Everything is in client coordinates unless the name says otherwise.
pub trait DocumentHost {
    /// Ask for `page` to be re-rendered; repeated requests may be coalesced
    fn request_redraw(&mut self, page: PageNumber);

    /// Called for every committed history action
    fn on_stroke_change(&mut self, _action: &HistoryAction) {}

    /// Placement and bitmap size of a page canvas, `None` if not laid out
    fn canvas_layout(&self, page: PageNumber) -> Option<CanvasLayout>;

    fn page_count(&self) -> u32;

    fn page_at_client_point(&self, point: Vec2) -> Option<PageNumber> {
        (1..=self.page_count()).find(|page| {
            self.canvas_layout(*page)
                .is_some_and(|layout| layout.contains_client(point))
        })
    }

    /// Visible part of the scroll container
    fn viewport(&self) -> Rect;

    fn scroll_offset(&self) -> Vec2;

    fn set_scroll_offset(&mut self, offset: Vec2);

    fn set_pointer_capture(&mut self, _pointer_id: u32) -> AnnotationResult<()> {
        Ok(())
    }

    fn release_pointer_capture(&mut self, _pointer_id: u32) -> AnnotationResult<()> {
        Ok(())
    }

    /// Client rects of the current document text selection
    fn text_selection_rects(&self) -> Vec<Rect> {
        Vec::new()
    }

    fn clear_text_selection(&mut self) {}

    /// Base and annotation bitmaps of a page, for capture
    fn page_bitmaps(&self, _page: PageNumber) -> Option<PageBitmaps> {
        None
    }
}
