//! Scrollable page layout for the desktop window.
//!
//! Pages are stacked vertically and centered horizontally. Client
//! coordinates are logical window pixels with the origin at the top left,
//! the same space `Window::cursor_position` reports.

use std::collections::{BTreeSet, HashMap};

use bevy::prelude::*;
use image::{Rgba, RgbaImage};

use crate::annotation::PageNumber;
use crate::constants::{DEFAULT_PAGE_COUNT, DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH, PAGE_GAP};
use crate::coords::CanvasLayout;
use crate::editor::{DocumentHost, PageBitmaps};
use crate::error::{AnnotationError, AnnotationResult};
use crate::history::HistoryAction;
use crate::render::PlacedText;

pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 4.0;

/// The page viewer the editor talks to
#[derive(Resource)]
pub struct PageView {
    page_count: u32,
    /// Bitmap size of every page in canvas pixels
    page_size: Vec2,
    /// Client pixels per canvas pixel
    zoom: f32,
    scroll: Vec2,
    /// Part of the window not covered by panels
    viewport: Rect,
    dirty: BTreeSet<PageNumber>,
    captured: Option<u32>,
    /// Last rendered annotation layer per page
    layers: HashMap<PageNumber, RgbaImage>,
    texts: HashMap<PageNumber, Vec<PlacedText>>,
    /// Committed actions since the document was last marked clean
    unsaved_changes: usize,
}

impl Default for PageView {
    fn default() -> Self {
        Self::new(
            DEFAULT_PAGE_COUNT,
            Vec2::new(DEFAULT_PAGE_WIDTH, DEFAULT_PAGE_HEIGHT),
        )
    }
}

impl PageView {
    pub fn new(page_count: u32, page_size: Vec2) -> Self {
        Self {
            page_count,
            page_size,
            zoom: 1.0,
            scroll: Vec2::ZERO,
            viewport: Rect::new(0.0, 0.0, page_size.x, page_size.y),
            dirty: (1..=page_count).collect(),
            captured: None,
            layers: HashMap::new(),
            texts: HashMap::new(),
            unsaved_changes: 0,
        }
    }

    pub fn page_size(&self) -> Vec2 {
        self.page_size
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Change the zoom, keeping the viewport center on the same content
    pub fn set_zoom(&mut self, zoom: f32) {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if zoom == self.zoom {
            return;
        }
        let center = self.scroll + self.viewport.size() / 2.0;
        let ratio = zoom / self.zoom;
        self.zoom = zoom;
        self.scroll = center * ratio - self.viewport.size() / 2.0;
        self.clamp_scroll();
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.clamp_scroll();
        }
    }

    /// Height of all pages plus gaps, in client pixels
    pub fn content_height(&self) -> f32 {
        let pages = self.page_count as f32;
        pages * self.page_size.y * self.zoom + (pages + 1.0) * PAGE_GAP
    }

    pub fn content_width(&self) -> f32 {
        self.page_size.x * self.zoom + 2.0 * PAGE_GAP
    }

    fn clamp_scroll(&mut self) {
        let max = Vec2::new(
            (self.content_width() - self.viewport.width()).max(0.0),
            (self.content_height() - self.viewport.height()).max(0.0),
        );
        self.scroll = self.scroll.clamp(Vec2::ZERO, max);
    }

    /// Scroll by a client-pixel delta
    pub fn scroll_by(&mut self, delta: Vec2) {
        self.scroll += delta;
        self.clamp_scroll();
    }

    /// Page rect in client coordinates
    pub fn page_rect(&self, page: PageNumber) -> Option<Rect> {
        if page == 0 || page > self.page_count {
            return None;
        }
        let size = self.page_size * self.zoom;
        let free_x = (self.viewport.width() - size.x).max(2.0 * PAGE_GAP);
        let x = self.viewport.min.x + free_x / 2.0 - self.scroll.x;
        let y = self.viewport.min.y + PAGE_GAP + (page - 1) as f32 * (size.y + PAGE_GAP)
            - self.scroll.y;
        Some(Rect::from_corners(Vec2::new(x, y), Vec2::new(x, y) + size))
    }

    /// Pages whose rect overlaps the viewport
    pub fn visible_pages(&self) -> Vec<PageNumber> {
        (1..=self.page_count)
            .filter(|page| {
                self.page_rect(*page)
                    .is_some_and(|rect| !rect.intersect(self.viewport).is_empty())
            })
            .collect()
    }

    /// Mark every page for re-rendering
    pub fn invalidate_all(&mut self) {
        self.dirty.extend(1..=self.page_count);
    }

    /// Take the set of pages that asked for a redraw since the last call
    pub fn take_dirty(&mut self) -> BTreeSet<PageNumber> {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_dirty(&self, page: PageNumber) -> bool {
        self.dirty.contains(&page)
    }

    /// Store a page's freshly rendered annotation layer
    pub fn set_layer(&mut self, page: PageNumber, layer: RgbaImage, texts: Vec<PlacedText>) {
        self.layers.insert(page, layer);
        self.texts.insert(page, texts);
    }

    pub fn texts(&self, page: PageNumber) -> &[PlacedText] {
        self.texts.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn captured_pointer(&self) -> Option<u32> {
        self.captured
    }

    pub fn unsaved_changes(&self) -> usize {
        self.unsaved_changes
    }

    /// Plain white page; the desktop viewer has no document renderer
    pub fn blank_page(&self) -> RgbaImage {
        RgbaImage::from_pixel(
            self.page_size.x as u32,
            self.page_size.y as u32,
            Rgba([255, 255, 255, 255]),
        )
    }
}

impl DocumentHost for PageView {
    fn request_redraw(&mut self, page: PageNumber) {
        if page >= 1 && page <= self.page_count {
            self.dirty.insert(page);
        }
    }

    fn on_stroke_change(&mut self, action: &HistoryAction) {
        self.unsaved_changes += 1;
        debug!("{} on pages {:?}", action.label(), action.pages());
    }

    fn canvas_layout(&self, page: PageNumber) -> Option<CanvasLayout> {
        self.page_rect(page)
            .map(|rect| CanvasLayout::new(rect, self.page_size))
    }

    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: Vec2) {
        self.scroll = offset;
        self.clamp_scroll();
    }

    fn set_pointer_capture(&mut self, pointer_id: u32) -> AnnotationResult<()> {
        self.captured = Some(pointer_id);
        Ok(())
    }

    fn release_pointer_capture(&mut self, pointer_id: u32) -> AnnotationResult<()> {
        if self.captured != Some(pointer_id) {
            return Err(AnnotationError::PointerCapture(pointer_id));
        }
        self.captured = None;
        Ok(())
    }

    fn page_bitmaps(&self, page: PageNumber) -> Option<PageBitmaps> {
        let annotations = self.layers.get(&page)?.clone();
        Some(PageBitmaps {
            base: self.blank_page(),
            annotations,
        })
    }
}
