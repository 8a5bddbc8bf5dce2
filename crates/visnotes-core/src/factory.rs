//! New shapes with their default geometry and palette.

use std::time::{SystemTime, UNIX_EPOCH};

use visnotes_geometry::Point;

use crate::shape::{ArrowDirection, Shape, ShapeId, ShapeKind, ShapeStyle, ShapeType};

/// Monotonic z-index source.
///
/// Values track wall-clock milliseconds but never repeat or go backwards,
/// so a shape created later always stacks above earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ZClock {
    last: i64,
}

impl ZClock {
    /// Clock starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Next value from the wall clock
    pub fn tick(&mut self) -> i64 {
        self.tick_at(now_millis())
    }

    /// Next value given the current time in milliseconds. Saturates at
    /// `i64::MAX`.
    pub fn tick_at(&mut self, now_ms: i64) -> i64 {
        self.last = now_ms.max(self.last.saturating_add(1));
        self.last
    }

    /// Make sure future values stack above `z_index` (after loading shapes)
    pub fn observe(&mut self, z_index: i64) {
        self.last = self.last.max(z_index);
    }

    /// Most recent value handed out
    pub fn last(&self) -> i64 {
        self.last
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Fill and border colors for a freshly created shape
pub fn default_style(shape_type: ShapeType) -> ShapeStyle {
    let (fill, border) = match shape_type {
        ShapeType::Rectangle => ("#3498db", "#2c3e50"),
        ShapeType::Circle => ("#e74c3c", "#c0392b"),
        ShapeType::Triangle => ("#2ecc71", "#27ae60"),
        ShapeType::Oval => ("#9b59b6", "#8e44ad"),
        ShapeType::Star => ("#f1c40f", "#f39c12"),
        ShapeType::Hexagon => ("#1abc9c", "#16a085"),
        ShapeType::Diamond => ("#e67e22", "#d35400"),
        ShapeType::Pentagon => ("#27ae60", "#1e8449"),
        ShapeType::Octagon => ("#d35400", "#a04000"),
        ShapeType::Heptagon => ("#7f8c8d", "#34495e"),
        ShapeType::Heart => ("#c0392b", "#922b21"),
        ShapeType::Arrow => ("#2980b9", "#1a5276"),
        ShapeType::Path => ("#000000", "#000000"),
    };
    ShapeStyle::new(fill, border)
}

/// Default geometry for a kind, `None` for freehand paths
pub fn default_kind(shape_type: ShapeType) -> Option<ShapeKind> {
    let kind = match shape_type {
        ShapeType::Rectangle => ShapeKind::Rectangle {
            width: 100.0,
            height: 100.0,
        },
        ShapeType::Circle => ShapeKind::Circle { radius: 50.0 },
        ShapeType::Triangle => ShapeKind::Triangle {
            width: 100.0,
            height: 100.0,
        },
        ShapeType::Oval => ShapeKind::Oval { rx: 60.0, ry: 40.0 },
        ShapeType::Star => ShapeKind::Star {
            points: 5,
            inner_radius: 25.0,
            outer_radius: 50.0,
        },
        ShapeType::Hexagon => ShapeKind::Hexagon { size: 50.0 },
        ShapeType::Pentagon => ShapeKind::Pentagon { size: 50.0 },
        ShapeType::Octagon => ShapeKind::Octagon { size: 50.0 },
        ShapeType::Heptagon => ShapeKind::Heptagon { size: 50.0 },
        ShapeType::Diamond => ShapeKind::Diamond {
            width: 80.0,
            height: 100.0,
        },
        ShapeType::Heart => ShapeKind::Heart {
            width: 80.0,
            height: 80.0,
        },
        ShapeType::Arrow => ShapeKind::Arrow {
            width: 100.0,
            height: 60.0,
            direction: ArrowDirection::Right,
        },
        ShapeType::Path => return None,
    };
    Some(kind)
}

/// Builds new shapes with fresh ids and increasing z-indices
#[derive(Debug, Clone, Default)]
pub struct ShapeFactory {
    clock: ZClock,
}

impl ShapeFactory {
    /// Factory with a fresh clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory driven by an existing clock
    pub fn with_clock(clock: ZClock) -> Self {
        Self { clock }
    }

    /// Access the z-index clock
    pub fn clock_mut(&mut self) -> &mut ZClock {
        &mut self.clock
    }

    /// A shape of `shape_type` anchored at `at` (see [`crate::shape`] for
    /// what the anchor means per kind). Freehand paths need samples and go
    /// through [`ShapeFactory::create_path`] instead.
    pub fn create(&mut self, shape_type: ShapeType, at: Point) -> Option<Shape> {
        let kind = default_kind(shape_type)?;
        Some(
            Shape::new(ShapeId::new(), at.x, at.y, kind)
                .with_style(default_style(shape_type))
                .with_z_index(self.clock.tick()),
        )
    }

    /// An arrow of the default size pointing `direction`
    pub fn create_arrow(&mut self, at: Point, direction: ArrowDirection) -> Shape {
        let kind = ShapeKind::Arrow {
            width: 100.0,
            height: 60.0,
            direction,
        };
        Shape::new(ShapeId::new(), at.x, at.y, kind)
            .with_style(default_style(ShapeType::Arrow))
            .with_z_index(self.clock.tick())
    }

    /// A freehand stroke through `points`; strokes of fewer than two
    /// samples are dropped.
    pub fn create_path(&mut self, points: Vec<Point>, color: &str, stroke_width: f64) -> Option<Shape> {
        if points.len() < 2 {
            return None;
        }
        let style = ShapeStyle {
            color: color.to_owned(),
            opacity: 1.0,
            border_color: color.to_owned(),
            border_width: stroke_width,
        };
        Some(
            Shape::new(ShapeId::new(), 0.0, 0.0, ShapeKind::Path { points })
                .with_style(style)
                .with_z_index(self.clock.tick()),
        )
    }
}
