use bevy::prelude::*;

use crate::annotation::{ShapeKind, default_draw_color, default_highlight_color, named_color};
use crate::config::AppConfigData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    Shape(ShapeKind),
    Text,
    Highlight,
    RectSelect,
    Select,
    Hand,
    Capture,
}

impl Tool {
    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Pen => "Pen (P)",
            Tool::Eraser => "Eraser (E)",
            Tool::Shape(ShapeKind::Line) => "Line (L)",
            Tool::Shape(ShapeKind::Rectangle) => "Rectangle (R)",
            Tool::Shape(ShapeKind::Circle) => "Circle (C)",
            Tool::Text => "Text (T)",
            Tool::Highlight => "Highlight (H)",
            Tool::RectSelect => "Box select (B)",
            Tool::Select => "Select (V)",
            Tool::Hand => "Hand (Space)",
            Tool::Capture => "Capture (K)",
        }
    }

    pub fn all() -> &'static [Tool] {
        &[
            Tool::Select,
            Tool::RectSelect,
            Tool::Pen,
            Tool::Eraser,
            Tool::Shape(ShapeKind::Line),
            Tool::Shape(ShapeKind::Rectangle),
            Tool::Shape(ShapeKind::Circle),
            Tool::Text,
            Tool::Highlight,
            Tool::Hand,
            Tool::Capture,
        ]
    }

    /// Tools that put ink on the page; touch input skips these unless enabled
    pub fn is_drawing_tool(&self) -> bool {
        matches!(
            self,
            Tool::Pen | Tool::Eraser | Tool::Shape(_) | Tool::Text | Tool::Highlight
        )
    }

    /// Tools that show selection chrome and accept the context menu
    pub fn is_select_tool(&self) -> bool {
        matches!(self, Tool::Select | Tool::RectSelect)
    }
}

/// Current drawing attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSettings {
    pub color: Color,
    pub highlight_color: Color,
    /// Line width in canvas pixels
    pub thickness: f32,
    /// Font size in CSS pixels; scaled to canvas pixels when text is placed
    pub font_size: f32,
    pub enable_touch_drawing: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            color: default_draw_color(),
            highlight_color: default_highlight_color(),
            thickness: 2.0,
            font_size: 16.0,
            enable_touch_drawing: false,
        }
    }
}

impl ToolSettings {
    pub fn from_config(config: &AppConfigData) -> Self {
        let color = named_color(&config.default_color).unwrap_or_else(|| {
            warn!(
                "Unknown default color {:?}, falling back to blue",
                config.default_color
            );
            default_draw_color()
        });
        Self {
            color,
            thickness: config.default_thickness,
            font_size: config.default_font_size,
            enable_touch_drawing: config.enable_touch_drawing,
            ..default()
        }
    }
}
