//! Stroke data model.
//!
//! A stroke is one annotation object on a page. Each variant carries only the
//! fields its kind needs; the common part is the id and the rotation.

use std::sync::Arc;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 1-based page number, as shown to the user
pub type PageNumber = u32;

/// Unique identifier for a stroke.
///
/// Survives index shifts in the page array, so history and selection can
/// re-locate a stroke after other strokes were removed.
pub type StrokeId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
}

impl ShapeKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeKind::Line => "Line",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
        }
    }
}

/// One sample of a pen path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenPoint {
    pub position: Vec2,
    pub color: Color,
    pub thickness: f32,
}

impl PenPoint {
    pub fn new(position: Vec2, color: Color, thickness: f32) -> Self {
        Self {
            position,
            color,
            thickness,
        }
    }
}

/// Axis-aligned rectangle that is part of a highlight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl HighlightRect {
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: rect.min.x,
            y: rect.min.y,
            width: rect.width(),
            height: rect.height(),
        }
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StrokeKind {
    /// Freehand polyline; every point carries its own draw attributes
    Pen { points: Vec<PenPoint> },

    /// Line, rectangle or circle spanned by two points.
    ///
    /// A circle is centered on `start` with radius `|end - start|`, unless
    /// `radii` is set, which turns it into an ellipse.
    Shape {
        shape: ShapeKind,
        start: Vec2,
        end: Vec2,
        #[serde(default)]
        radii: Option<Vec2>,
        color: Color,
        thickness: f32,
    },

    /// Text drawn with its top-left corner at `position`
    Text {
        position: Vec2,
        text: String,
        font_size: f32,
        color: Color,
    },

    /// Translucent rectangles merged from a text selection
    #[serde(rename = "highlight-rect")]
    Highlight {
        rects: Vec<HighlightRect>,
        color: Color,
    },

    /// Encoded raster image (PNG/JPEG bytes), decoded lazily for rendering
    Image {
        position: Vec2,
        size: Vec2,
        data: Arc<[u8]>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    /// Rotation in radians about the center of the unrotated bounds
    #[serde(default)]
    pub rotation: f32,
    #[serde(flatten)]
    pub kind: StrokeKind,
}

impl Stroke {
    pub fn new(kind: StrokeKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            rotation: 0.0,
            kind,
        }
    }

    pub fn pen(points: Vec<PenPoint>) -> Self {
        Self::new(StrokeKind::Pen { points })
    }

    pub fn shape(shape: ShapeKind, start: Vec2, end: Vec2, color: Color, thickness: f32) -> Self {
        Self::new(StrokeKind::Shape {
            shape,
            start,
            end,
            radii: None,
            color,
            thickness,
        })
    }

    pub fn text(position: Vec2, text: impl Into<String>, font_size: f32, color: Color) -> Self {
        Self::new(StrokeKind::Text {
            position,
            text: text.into(),
            font_size,
            color,
        })
    }

    pub fn highlight(rects: Vec<HighlightRect>, color: Color) -> Self {
        Self::new(StrokeKind::Highlight { rects, color })
    }

    pub fn image(position: Vec2, size: Vec2, data: impl Into<Arc<[u8]>>) -> Self {
        Self::new(StrokeKind::Image {
            position,
            size,
            data: data.into(),
        })
    }

    /// Copy of this stroke under a new id (used by paste and clone)
    pub fn with_fresh_id(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    /// Type tag as used in the serialized form
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            StrokeKind::Pen { .. } => "pen",
            StrokeKind::Shape { shape, .. } => match shape {
                ShapeKind::Line => "line",
                ShapeKind::Rectangle => "rectangle",
                ShapeKind::Circle => "circle",
            },
            StrokeKind::Text { .. } => "text",
            StrokeKind::Highlight { .. } => "highlight-rect",
            StrokeKind::Image { .. } => "image",
        }
    }

    /// Highlights are bound to text lines and never rotate
    pub fn supports_rotation(&self) -> bool {
        !matches!(self.kind, StrokeKind::Highlight { .. })
    }

    pub fn is_highlight(&self) -> bool {
        matches!(self.kind, StrokeKind::Highlight { .. })
    }

    pub fn color(&self) -> Option<Color> {
        match &self.kind {
            StrokeKind::Pen { points } => points.first().map(|p| p.color),
            StrokeKind::Shape { color, .. }
            | StrokeKind::Text { color, .. }
            | StrokeKind::Highlight { color, .. } => Some(*color),
            StrokeKind::Image { .. } => None,
        }
    }

    /// Same stroke recolored, or `None` for kinds without a color
    pub fn with_color(&self, new_color: Color) -> Option<Self> {
        let mut stroke = self.clone();
        match &mut stroke.kind {
            StrokeKind::Pen { points } => {
                for point in points.iter_mut() {
                    point.color = new_color;
                }
            }
            StrokeKind::Shape { color, .. }
            | StrokeKind::Text { color, .. }
            | StrokeKind::Highlight { color, .. } => *color = new_color,
            StrokeKind::Image { .. } => return None,
        }
        Some(stroke)
    }

    pub fn thickness(&self) -> Option<f32> {
        match &self.kind {
            StrokeKind::Pen { points } => points.first().map(|p| p.thickness),
            StrokeKind::Shape { thickness, .. } => Some(*thickness),
            _ => None,
        }
    }

    /// Same stroke with a new line width, or `None` for kinds that have none
    pub fn with_thickness(&self, new_thickness: f32) -> Option<Self> {
        let mut stroke = self.clone();
        match &mut stroke.kind {
            StrokeKind::Pen { points } => {
                for point in points.iter_mut() {
                    point.thickness = new_thickness;
                }
            }
            StrokeKind::Shape { thickness, .. } => *thickness = new_thickness,
            _ => return None,
        }
        Some(stroke)
    }

    /// Same text stroke with replaced content, or `None` for non-text strokes
    pub fn with_text(&self, new_text: &str) -> Option<Self> {
        let mut stroke = self.clone();
        match &mut stroke.kind {
            StrokeKind::Text { text, .. } => *text = new_text.to_string(),
            _ => return None,
        }
        Some(stroke)
    }

    /// Whether every coordinate is a finite number
    pub fn is_finite(&self) -> bool {
        let finite = match &self.kind {
            StrokeKind::Pen { points } => points
                .iter()
                .all(|p| p.position.is_finite() && p.thickness.is_finite()),
            StrokeKind::Shape {
                start, end, radii, ..
            } => start.is_finite() && end.is_finite() && radii.is_none_or(|r| r.is_finite()),
            StrokeKind::Text {
                position,
                font_size,
                ..
            } => position.is_finite() && font_size.is_finite(),
            StrokeKind::Highlight { rects, .. } => rects.iter().all(|r| {
                r.x.is_finite() && r.y.is_finite() && r.width.is_finite() && r.height.is_finite()
            }),
            StrokeKind::Image { position, size, .. } => position.is_finite() && size.is_finite(),
        };
        finite && self.rotation.is_finite()
    }
}

/// Horizontal and vertical radius of a circle/ellipse shape
pub fn circle_radii(start: Vec2, end: Vec2, radii: Option<Vec2>) -> Vec2 {
    radii.unwrap_or_else(|| Vec2::splat(start.distance(end)))
}
