//! Highlight rect merging.

use bevy::prelude::*;

fn same_line(a: Rect, b: Rect) -> bool {
    a.min.y < b.max.y && b.min.y < a.max.y
}

fn touches_horizontally(a: Rect, b: Rect, tolerance: f32) -> bool {
    b.min.x <= a.max.x + tolerance && a.min.x <= b.max.x + tolerance
}

/// Merge text selection rects into one rect per contiguous run on a line.
///
/// Rects that overlap vertically and touch or overlap horizontally (within
/// `tolerance`) are unioned. Empty rects are dropped.
pub fn merge_line_rects(rects: &[Rect], tolerance: f32) -> Vec<Rect> {
    let mut sorted: Vec<Rect> = rects
        .iter()
        .copied()
        .filter(|r| r.width() > 0.0 && r.height() > 0.0)
        .collect();
    sorted.sort_by(|a, b| {
        a.min
            .y
            .total_cmp(&b.min.y)
            .then(a.min.x.total_cmp(&b.min.x))
    });

    let mut merged: Vec<Rect> = Vec::new();
    for rect in sorted {
        match merged
            .iter_mut()
            .find(|m| same_line(**m, rect) && touches_horizontally(**m, rect, tolerance))
        {
            Some(existing) => *existing = existing.union(rect),
            None => merged.push(rect),
        }
    }
    merged
}
