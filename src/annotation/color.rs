//! Named colors for the drawing palette.

use bevy::prelude::*;

/// Toolbar palette, row by row
pub const PALETTE: [[&str; 6]; 5] = [
    ["black", "dimgray", "gray", "darkgray", "silver", "white"],
    ["magenta", "red", "orangered", "orange", "gold", "yellow"],
    ["green", "darkgreen", "lime", "teal", "cyan", "navy"],
    ["blue", "darkblue", "royalblue", "purple", "magenta", "pink"],
    ["brown", "sienna", "olive", "maroon", "coral", "salmon"],
];

pub const DEFAULT_DRAW_COLOR: &str = "blue";

/// Alpha used for highlight fills
pub const HIGHLIGHT_ALPHA: f32 = 0.35;

/// Resolve a palette color name (CSS naming, case-insensitive)
pub fn named_color(name: &str) -> Option<Color> {
    let (r, g, b) = match name.to_ascii_lowercase().as_str() {
        "black" => (0, 0, 0),
        "dimgray" => (105, 105, 105),
        "gray" => (128, 128, 128),
        "darkgray" => (169, 169, 169),
        "silver" => (192, 192, 192),
        "white" => (255, 255, 255),
        "magenta" => (255, 0, 255),
        "red" => (255, 0, 0),
        "orangered" => (255, 69, 0),
        "orange" => (255, 165, 0),
        "gold" => (255, 215, 0),
        "yellow" => (255, 255, 0),
        "green" => (0, 128, 0),
        "darkgreen" => (0, 100, 0),
        "lime" => (0, 255, 0),
        "teal" => (0, 128, 128),
        "cyan" => (0, 255, 255),
        "navy" => (0, 0, 128),
        "blue" => (0, 0, 255),
        "darkblue" => (0, 0, 139),
        "royalblue" => (65, 105, 225),
        "purple" => (128, 0, 128),
        "pink" => (255, 192, 203),
        "brown" => (165, 42, 42),
        "sienna" => (160, 82, 45),
        "olive" => (128, 128, 0),
        "maroon" => (128, 0, 0),
        "coral" => (255, 127, 80),
        "salmon" => (250, 128, 114),
        _ => return None,
    };
    Some(Color::srgb_u8(r, g, b))
}

pub fn default_draw_color() -> Color {
    Color::srgb_u8(0, 0, 255)
}

pub fn default_highlight_color() -> Color {
    Color::srgba(1.0, 1.0, 0.0, HIGHLIGHT_ALPHA)
}
