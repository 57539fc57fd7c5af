//! Font used to rasterize text strokes.

use std::sync::OnceLock;

use ab_glyph::FontArc;
use bevy::prelude::*;
use bevy_egui::egui;

/// egui's default proportional face, so rasterized text matches the UI.
///
/// Parsed once; `None` when egui was built without its bundled fonts.
pub fn default_font() -> Option<FontArc> {
    static FONT: OnceLock<Option<FontArc>> = OnceLock::new();
    FONT.get_or_init(load_default_font).clone()
}

fn load_default_font() -> Option<FontArc> {
    let fonts = egui::FontDefinitions::default();
    let Some(data) = fonts
        .families
        .get(&egui::FontFamily::Proportional)
        .and_then(|names| names.first())
        .and_then(|name| fonts.font_data.get(name))
    else {
        warn!("No bundled font available, text strokes will not be rasterized");
        return None;
    };
    match FontArc::try_from_vec(data.font.to_vec()) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!("Failed to parse bundled font: {}", e);
            None
        }
    }
}
