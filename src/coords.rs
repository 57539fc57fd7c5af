//! Mapping between client (CSS) pixels and canvas bitmap pixels.

use bevy::prelude::*;

/// Where a page canvas sits on screen and how large its bitmap is.
///
/// The bitmap is usually larger than its on-screen rect (device pixel ratio
/// times zoom), so every pointer position is scaled on the way in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasLayout {
    /// Canvas rect in client coordinates
    pub client_rect: Rect,
    /// Bitmap size in canvas pixels
    pub bitmap_size: Vec2,
}

impl CanvasLayout {
    pub fn new(client_rect: Rect, bitmap_size: Vec2) -> Self {
        Self {
            client_rect,
            bitmap_size,
        }
    }

    /// Canvas pixels per client pixel, per axis
    pub fn scale(&self) -> Vec2 {
        let size = self.client_rect.size();
        let axis = |bitmap: f32, client: f32| if client > 0.0 { bitmap / client } else { 1.0 };
        Vec2::new(
            axis(self.bitmap_size.x, size.x),
            axis(self.bitmap_size.y, size.y),
        )
    }

    /// Horizontal scale, used where a single factor is needed (font size)
    pub fn uniform_scale(&self) -> f32 {
        self.scale().x
    }

    pub fn client_to_canvas(&self, client: Vec2) -> Vec2 {
        (client - self.client_rect.min) * self.scale()
    }

    pub fn canvas_to_client(&self, canvas: Vec2) -> Vec2 {
        self.client_rect.min + canvas / self.scale()
    }

    pub fn client_rect_to_canvas(&self, rect: Rect) -> Rect {
        Rect::from_corners(
            self.client_to_canvas(rect.min),
            self.client_to_canvas(rect.max),
        )
    }

    pub fn contains_client(&self, client: Vec2) -> bool {
        self.client_rect.contains(client)
    }

    /// Whole bitmap in canvas coordinates
    pub fn canvas_bounds(&self) -> Rect {
        Rect::from_corners(Vec2::ZERO, self.bitmap_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidpi_layout() -> CanvasLayout {
        CanvasLayout::new(Rect::new(100.0, 50.0, 500.0, 350.0), Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_client_to_canvas_scales() {
        let layout = hidpi_layout();
        assert_eq!(layout.scale(), Vec2::splat(2.0));
        assert_eq!(layout.client_to_canvas(Vec2::new(110.0, 60.0)), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_canvas_to_client_inverts() {
        let layout = hidpi_layout();
        let client = Vec2::new(321.0, 123.0);
        let back = layout.canvas_to_client(layout.client_to_canvas(client));
        assert!(back.distance(client) < 0.001);
    }

    #[test]
    fn test_zero_sized_rect_does_not_divide_by_zero() {
        let layout = CanvasLayout::new(Rect::new(0.0, 0.0, 0.0, 0.0), Vec2::new(10.0, 10.0));
        assert_eq!(layout.scale(), Vec2::ONE);
    }
}
