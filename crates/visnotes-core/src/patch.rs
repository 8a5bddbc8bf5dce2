//! Partial shape updates.
//!
//! A [`ShapePatch`] is a shallow diff: fields left as `None` are untouched
//! when the patch is applied. Fields that do not exist on the target's kind
//! (a `radius` sent to a rectangle) are ignored, and the kind tag itself can
//! never be patched.
//!
//! [`ShapeUpdate`] is what the store accepts: either a static patch, as
//! captured by commands, or a function computing a patch from the current
//! value, as used by live gestures.

use serde::{Deserialize, Serialize};
use visnotes_geometry::Point;

use crate::shape::{ArrowDirection, Shape, ShapeKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ry: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<ArrowDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_points: Option<Vec<Point>>,
}

impl ShapePatch {
    /// Patch that only moves the anchor
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Snapshot of a shape's anchor and kind geometry (no style, no z-order).
    ///
    /// Applying the snapshot back restores the geometry exactly, which is
    /// what gesture start/end capture for undo.
    pub fn geometry_of(shape: &Shape) -> Self {
        let mut patch = Self::position(shape.x, shape.y);
        match &shape.kind {
            ShapeKind::Rectangle { width, height }
            | ShapeKind::Triangle { width, height }
            | ShapeKind::Diamond { width, height }
            | ShapeKind::Heart { width, height } => {
                patch.width = Some(*width);
                patch.height = Some(*height);
            }
            ShapeKind::Arrow {
                width,
                height,
                direction,
            } => {
                patch.width = Some(*width);
                patch.height = Some(*height);
                patch.direction = Some(*direction);
            }
            ShapeKind::Circle { radius } => patch.radius = Some(*radius),
            ShapeKind::Oval { rx, ry } => {
                patch.rx = Some(*rx);
                patch.ry = Some(*ry);
            }
            ShapeKind::Star {
                points,
                inner_radius,
                outer_radius,
            } => {
                patch.star_points = Some(*points);
                patch.inner_radius = Some(*inner_radius);
                patch.outer_radius = Some(*outer_radius);
            }
            ShapeKind::Hexagon { size }
            | ShapeKind::Pentagon { size }
            | ShapeKind::Octagon { size }
            | ShapeKind::Heptagon { size } => patch.size = Some(*size),
            ShapeKind::Path { points } => patch.path_points = Some(points.clone()),
        }
        patch
    }

    /// Fields set in `other` win over fields set in `self`
    pub fn merged(mut self, other: &ShapePatch) -> Self {
        merge_field(&mut self.x, &other.x);
        merge_field(&mut self.y, &other.y);
        merge_field(&mut self.color, &other.color);
        merge_field(&mut self.opacity, &other.opacity);
        merge_field(&mut self.border_color, &other.border_color);
        merge_field(&mut self.border_width, &other.border_width);
        merge_field(&mut self.z_index, &other.z_index);
        merge_field(&mut self.width, &other.width);
        merge_field(&mut self.height, &other.height);
        merge_field(&mut self.radius, &other.radius);
        merge_field(&mut self.rx, &other.rx);
        merge_field(&mut self.ry, &other.ry);
        merge_field(&mut self.outer_radius, &other.outer_radius);
        merge_field(&mut self.inner_radius, &other.inner_radius);
        merge_field(&mut self.star_points, &other.star_points);
        merge_field(&mut self.size, &other.size);
        merge_field(&mut self.direction, &other.direction);
        merge_field(&mut self.path_points, &other.path_points);
        self
    }

    /// Merge this patch into `shape`
    pub fn apply_to(&self, shape: &mut Shape) {
        assign(&mut shape.x, &self.x);
        assign(&mut shape.y, &self.y);
        assign(&mut shape.style.color, &self.color);
        assign(&mut shape.style.opacity, &self.opacity);
        assign(&mut shape.style.border_color, &self.border_color);
        assign(&mut shape.style.border_width, &self.border_width);
        assign(&mut shape.z_index, &self.z_index);

        match &mut shape.kind {
            ShapeKind::Rectangle { width, height }
            | ShapeKind::Triangle { width, height }
            | ShapeKind::Diamond { width, height }
            | ShapeKind::Heart { width, height } => {
                assign(width, &self.width);
                assign(height, &self.height);
            }
            ShapeKind::Arrow {
                width,
                height,
                direction,
            } => {
                assign(width, &self.width);
                assign(height, &self.height);
                assign(direction, &self.direction);
            }
            ShapeKind::Circle { radius } => assign(radius, &self.radius),
            ShapeKind::Oval { rx, ry } => {
                assign(rx, &self.rx);
                assign(ry, &self.ry);
            }
            ShapeKind::Star {
                points,
                inner_radius,
                outer_radius,
            } => {
                assign(points, &self.star_points);
                assign(inner_radius, &self.inner_radius);
                assign(outer_radius, &self.outer_radius);
            }
            ShapeKind::Hexagon { size }
            | ShapeKind::Pentagon { size }
            | ShapeKind::Octagon { size }
            | ShapeKind::Heptagon { size } => assign(size, &self.size),
            ShapeKind::Path { points } => assign(points, &self.path_points),
        }
    }
}

fn assign<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *slot = v.clone();
    }
}

fn merge_field<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        slot.clone_from(value);
    }
}

/// An update request: a static diff or a function of the current value
pub enum ShapeUpdate<'a> {
    Patch(ShapePatch),
    With(Box<dyn FnOnce(&Shape) -> ShapePatch + 'a>),
}

impl<'a> ShapeUpdate<'a> {
    /// Functional form: the patch is computed from the shape as stored at apply time
    pub fn with(f: impl FnOnce(&Shape) -> ShapePatch + 'a) -> Self {
        ShapeUpdate::With(Box::new(f))
    }

    /// Resolve into a concrete patch against the current value
    pub fn resolve(self, current: &Shape) -> ShapePatch {
        match self {
            ShapeUpdate::Patch(patch) => patch,
            ShapeUpdate::With(f) => f(current),
        }
    }
}

impl std::fmt::Debug for ShapeUpdate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeUpdate::Patch(patch) => f.debug_tuple("Patch").field(patch).finish(),
            ShapeUpdate::With(_) => write!(f, "With(<fn>)"),
        }
    }
}

impl From<ShapePatch> for ShapeUpdate<'_> {
    fn from(patch: ShapePatch) -> Self {
        ShapeUpdate::Patch(patch)
    }
}

impl From<&ShapePatch> for ShapeUpdate<'_> {
    fn from(patch: &ShapePatch) -> Self {
        ShapeUpdate::Patch(patch.clone())
    }
}
