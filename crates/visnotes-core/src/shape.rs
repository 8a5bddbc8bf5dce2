//! Shape model for Visual Notes.
//!
//! A [`Shape`] is a base record (id, anchor position, style, z-order) plus a
//! [`ShapeKind`] carrying the kind-specific geometry. The kind tag never
//! changes after creation; updates only touch geometry and style fields.
//!
//! Anchor conventions: rectangle, triangle and oval anchor at their top-left
//! corner; circle, star, the regular polygons and diamond anchor at their
//! center; heart anchors at its top-center; arrows anchor at their tip edge
//! (see [`ArrowDirection`]).

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use visnotes_geometry::Point;

/// Opaque shape identifier, unique within a live shape collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    /// Fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ShapeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Pure style attributes; none of them affect geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    pub color: String,
    pub opacity: f64,
    pub border_color: String,
    pub border_width: f64,
}

impl ShapeStyle {
    /// Style with full opacity and a 2px border
    pub fn new(color: impl Into<String>, border_color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            opacity: 1.0,
            border_color: border_color.into(),
            border_width: 2.0,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new("#007AFF", "#2c3e50")
    }
}

/// Direction an arrow points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl ArrowDirection {
    /// Up or down
    pub fn is_vertical(self) -> bool {
        matches!(self, ArrowDirection::Up | ArrowDirection::Down)
    }
}

/// The kind tag of a shape, without its geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Rectangle,
    Circle,
    Triangle,
    Oval,
    Star,
    Hexagon,
    Diamond,
    Pentagon,
    Octagon,
    Heptagon,
    Heart,
    Arrow,
    Path,
}

impl ShapeType {
    pub const ALL: [ShapeType; 13] = [
        ShapeType::Rectangle,
        ShapeType::Circle,
        ShapeType::Triangle,
        ShapeType::Oval,
        ShapeType::Star,
        ShapeType::Hexagon,
        ShapeType::Diamond,
        ShapeType::Pentagon,
        ShapeType::Octagon,
        ShapeType::Heptagon,
        ShapeType::Heart,
        ShapeType::Arrow,
        ShapeType::Path,
    ];

    /// Serialized tag, e.g. `"rectangle"`
    pub fn name(self) -> &'static str {
        match self {
            ShapeType::Rectangle => "rectangle",
            ShapeType::Circle => "circle",
            ShapeType::Triangle => "triangle",
            ShapeType::Oval => "oval",
            ShapeType::Star => "star",
            ShapeType::Hexagon => "hexagon",
            ShapeType::Diamond => "diamond",
            ShapeType::Pentagon => "pentagon",
            ShapeType::Octagon => "octagon",
            ShapeType::Heptagon => "heptagon",
            ShapeType::Heart => "heart",
            ShapeType::Arrow => "arrow",
            ShapeType::Path => "path",
        }
    }

    /// Number of sides for the regular polygon kinds
    pub fn polygon_sides(self) -> Option<usize> {
        match self {
            ShapeType::Pentagon => Some(5),
            ShapeType::Hexagon => Some(6),
            ShapeType::Heptagon => Some(7),
            ShapeType::Octagon => Some(8),
            _ => None,
        }
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind-specific geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle {
        width: f64,
        height: f64,
    },
    Circle {
        radius: f64,
    },
    /// Isosceles triangle, apex at the top-center of its box
    Triangle {
        width: f64,
        height: f64,
    },
    /// Ellipse with radii `rx`/`ry`; the anchor is its bounding box's top-left
    Oval {
        rx: f64,
        ry: f64,
    },
    #[serde(rename_all = "camelCase")]
    Star {
        points: u32,
        inner_radius: f64,
        outer_radius: f64,
    },
    Hexagon {
        size: f64,
    },
    Diamond {
        width: f64,
        height: f64,
    },
    Pentagon {
        size: f64,
    },
    Octagon {
        size: f64,
    },
    Heptagon {
        size: f64,
    },
    Heart {
        width: f64,
        height: f64,
    },
    Arrow {
        width: f64,
        height: f64,
        direction: ArrowDirection,
    },
    /// Freehand stroke; samples are in canvas space
    Path {
        points: Vec<Point>,
    },
}

impl ShapeKind {
    /// Tag for this kind
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Rectangle { .. } => ShapeType::Rectangle,
            ShapeKind::Circle { .. } => ShapeType::Circle,
            ShapeKind::Triangle { .. } => ShapeType::Triangle,
            ShapeKind::Oval { .. } => ShapeType::Oval,
            ShapeKind::Star { .. } => ShapeType::Star,
            ShapeKind::Hexagon { .. } => ShapeType::Hexagon,
            ShapeKind::Diamond { .. } => ShapeType::Diamond,
            ShapeKind::Pentagon { .. } => ShapeType::Pentagon,
            ShapeKind::Octagon { .. } => ShapeType::Octagon,
            ShapeKind::Heptagon { .. } => ShapeType::Heptagon,
            ShapeKind::Heart { .. } => ShapeType::Heart,
            ShapeKind::Arrow { .. } => ShapeType::Arrow,
            ShapeKind::Path { .. } => ShapeType::Path,
        }
    }

    /// Half-extent of a regular polygon kind
    pub fn polygon_size(&self) -> Option<f64> {
        match self {
            ShapeKind::Hexagon { size }
            | ShapeKind::Pentagon { size }
            | ShapeKind::Octagon { size }
            | ShapeKind::Heptagon { size } => Some(*size),
            _ => None,
        }
    }
}

/// A shape on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ShapeId,
    pub x: f64,
    pub y: f64,
    #[serde(flatten)]
    pub style: ShapeStyle,
    /// Stacking key; higher draws on top and wins hit-test ties
    pub z_index: i64,
    #[serde(flatten)]
    pub kind: ShapeKind,
}

impl Shape {
    /// Shape with the default style and z-index 0
    pub fn new(id: ShapeId, x: f64, y: f64, kind: ShapeKind) -> Self {
        Self {
            id,
            x,
            y,
            style: ShapeStyle::default(),
            z_index: 0,
            kind,
        }
    }

    /// Replace the style
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the z-index
    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    /// Tag for this shape's kind
    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    /// The `x, y` anchor (center or corner depending on kind)
    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
