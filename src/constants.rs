//! Centralized constants used across the engine.
//!
//! Distances are in canvas bitmap pixels unless stated otherwise. Most of
//! them are defaults for [`crate::config::EditorConfig`] and can be
//! overridden from the config file.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Radius around the cursor inside which the eraser removes strokes
pub const ERASER_RADIUS: f32 = 10.0;

/// Distance within which a click counts as hitting a stroke
pub const HIT_THRESHOLD: f32 = 10.0;

/// Hit radius of the eight resize handles
pub const HANDLE_RADIUS: f32 = 8.0;

/// Padding between a stroke and its selection box
pub const SELECTION_PADDING: f32 = 6.0;

/// Pointer travel needed before pressing a selected stroke turns into a drag
pub const DRAG_START_DISTANCE: f32 = 5.0;

/// Net movement below which a finished drag is not recorded
pub const MOVE_COMMIT_DISTANCE: f32 = 1.0;

/// Smallest width/height a resize may produce
pub const MIN_RESIZE_EXTENT: f32 = 10.0;

/// Offset added per repeated paste so copies don't stack exactly
pub const PASTE_CASCADE_OFFSET: f32 = 20.0;

/// Paste cascade wraps back to the center after this many pastes
pub const MAX_PASTE_CASCADE: u32 = 10;

/// Maximum number of actions kept in a history session
pub const MAX_HISTORY_SIZE: usize = 200;

/// Approximate glyph advance as a fraction of the font size.
/// Used instead of real font metrics for text bounds.
pub const TEXT_WIDTH_FACTOR: f32 = 0.6;

/// Text is placed this many CSS pixels above the click point
pub const TEXT_ANCHOR_LIFT: f32 = 4.0;

/// Horizontal gap still treated as "same line" when merging highlight rects
pub const HIGHLIGHT_MERGE_TOLERANCE: f32 = 2.0;

/// Pixels trimmed off each side of a capture so the marquee border is excluded
pub const CAPTURE_BORDER_INSET: u32 = 1;

/// Pasted clipboard images are scaled to at most this fraction of the page width
pub const PASTED_IMAGE_MAX_PAGE_FRACTION: f32 = 0.5;

/// Default page bitmap size used by the desktop host (US Letter at 96 DPI)
pub const DEFAULT_PAGE_WIDTH: f32 = 816.0;
pub const DEFAULT_PAGE_HEIGHT: f32 = 1056.0;

/// Vertical gap between pages in the desktop host
pub const PAGE_GAP: f32 = 24.0;

/// Number of blank pages the desktop host opens with
pub const DEFAULT_PAGE_COUNT: u32 = 3;
