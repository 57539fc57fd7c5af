//! Selection handles.

use bevy::prelude::*;

use crate::annotation::Stroke;

use super::bounds::rotate_point;

/// One of the eight handles around a selected stroke.
///
/// `NE` doubles as the rotation handle when the stroke can rotate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Handle {
    N,
    S,
    E,
    W,
    NW,
    NE,
    SW,
    SE,
}

impl Handle {
    /// Corners first so they win over edge midpoints on tiny boxes
    pub const ALL: [Handle; 8] = [
        Handle::NW,
        Handle::NE,
        Handle::SW,
        Handle::SE,
        Handle::N,
        Handle::S,
        Handle::E,
        Handle::W,
    ];

    pub fn is_corner(&self) -> bool {
        matches!(self, Handle::NW | Handle::NE | Handle::SW | Handle::SE)
    }

    /// Direction the handle pulls along each axis (-1, 0 or 1).
    ///
    /// Canvas y grows downwards, so north is -1.
    pub fn direction(&self) -> Vec2 {
        match self {
            Handle::N => Vec2::new(0.0, -1.0),
            Handle::S => Vec2::new(0.0, 1.0),
            Handle::E => Vec2::new(1.0, 0.0),
            Handle::W => Vec2::new(-1.0, 0.0),
            Handle::NW => Vec2::new(-1.0, -1.0),
            Handle::NE => Vec2::new(1.0, -1.0),
            Handle::SW => Vec2::new(-1.0, 1.0),
            Handle::SE => Vec2::new(1.0, 1.0),
        }
    }

    /// Position of this handle on an unrotated rect
    pub fn position_on(&self, bounds: Rect) -> Vec2 {
        let dir = self.direction();
        let center = bounds.center();
        let half = bounds.half_size();
        center + dir * half
    }

    /// Point that stays fixed while this handle is dragged
    pub fn anchor_on(&self, bounds: Rect) -> Vec2 {
        let dir = self.direction();
        bounds.center() - dir * bounds.half_size()
    }
}

/// Handle positions for a selection box, rotated with the stroke
pub fn handle_positions(bounds: Rect, stroke: &Stroke) -> [(Handle, Vec2); 8] {
    let center = bounds.center();
    let angle = if stroke.supports_rotation() {
        stroke.rotation
    } else {
        0.0
    };
    Handle::ALL.map(|handle| {
        (
            handle,
            rotate_point(handle.position_on(bounds), center, angle),
        )
    })
}

/// The handle under `point`, if any
pub fn resize_handle_at(point: Vec2, bounds: Rect, stroke: &Stroke, radius: f32) -> Option<Handle> {
    handle_positions(bounds, stroke)
        .into_iter()
        .find(|(_, pos)| pos.distance(point) <= radius)
        .map(|(handle, _)| handle)
}
