//! Pure geometry over strokes.
//!
//! Everything here works in canvas bitmap coordinates (y grows downwards) and
//! has no side effects.
//!
//! ## Module Structure
//!
//! - [`bounds`] - unrotated and rotated bounding boxes, text metrics
//! - [`hit_test`] - point-to-stroke proximity
//! - [`handles`] - selection handles and their hit areas
//! - [`transform`] - translate and resize strokes
//! - [`highlight`] - merging text selection rects into line rects

mod bounds;
mod handles;
mod highlight;
mod transform;


pub use bounds::{
    compute_bounds, compute_unrotated_bounds, rects_overlap, rotate_point, rotated_corners,
    text_width,
};
pub use handles::{Handle, handle_positions, resize_handle_at};
pub use highlight::merge_line_rects;
pub use hit_test::{distance_to_segment, hit_test_stroke, point_near_segment};
pub use transform::{resize_stroke, resized_bounds, translate_stroke};
