//! Resize and move patch computation for drag gestures.
//!
//! Both functions take the shape as it was when the gesture started and the
//! total drag offset since then, so repeated updates during a drag never
//! accumulate rounding.

use visnotes_geometry::{Bounds, Point};

use crate::hit_test::{ResizeHandle, shape_bounds};
use crate::patch::ShapePatch;
use crate::shape::{Shape, ShapeKind};

/// Smallest width/height a box-like shape can be dragged down to
pub const MIN_BOX_SIZE: f64 = 20.0;

/// Smallest radius (or half-extent) a radial shape can be dragged down to
pub const MIN_RADIUS: f64 = 10.0;

/// Heart bounds are 1.2x its stored width
const HEART_BOX_RATIO: f64 = 1.2;

/// Patch resizing `start` by dragging `handle` by (dx, dy).
///
/// Box-like kinds move the dragged corner of their bounding box. When a
/// dimension would fall under [`MIN_BOX_SIZE`] it is clamped and that axis
/// snaps back to the start edge. Radial kinds grow by half the drag
/// distance, shrinking when the drag points toward the center, and never
/// drop under [`MIN_RADIUS`]. Freehand paths are not resizable.
pub fn resize_patch(start: &Shape, handle: ResizeHandle, dx: f64, dy: f64) -> Option<ShapePatch> {
    match &start.kind {
        ShapeKind::Path { .. } => None,
        ShapeKind::Circle { radius } => Some(ShapePatch {
            radius: Some(radial_resize(*radius, handle, dx, dy)),
            ..Default::default()
        }),
        ShapeKind::Star {
            inner_radius,
            outer_radius,
            ..
        } => {
            let outer = radial_resize(*outer_radius, handle, dx, dy);
            let inner = if *outer_radius > 0.0 {
                inner_radius * outer / outer_radius
            } else {
                *inner_radius
            };
            Some(ShapePatch {
                outer_radius: Some(outer),
                inner_radius: Some(inner),
                ..Default::default()
            })
        }
        ShapeKind::Hexagon { size }
        | ShapeKind::Pentagon { size }
        | ShapeKind::Octagon { size }
        | ShapeKind::Heptagon { size } => Some(ShapePatch {
            size: Some(radial_resize(*size, handle, dx, dy)),
            ..Default::default()
        }),
        _ => Some(box_resize(start, handle, dx, dy)),
    }
}

/// Patch translating `start` by (dx, dy). Freehand samples move with it.
pub fn move_patch(start: &Shape, dx: f64, dy: f64) -> ShapePatch {
    let mut patch = ShapePatch::position(start.x + dx, start.y + dy);
    if let ShapeKind::Path { points } = &start.kind {
        patch.path_points = Some(points.iter().map(|p| p.offset(dx, dy)).collect());
    }
    patch
}

/// Signed drag distance: positive when dragging away from the center
/// through `handle`'s corner.
fn radial_resize(current: f64, handle: ResizeHandle, dx: f64, dy: f64) -> f64 {
    let sx = if handle.is_left() { -1.0 } else { 1.0 };
    let sy = if handle.is_top() { -1.0 } else { 1.0 };
    let outward = sx * dx + sy * dy;
    let distance = dx.hypot(dy);
    let signed = if outward < 0.0 { -distance } else { distance };
    (current + signed * 0.5).max(MIN_RADIUS)
}

fn box_resize(start: &Shape, handle: ResizeHandle, dx: f64, dy: f64) -> ShapePatch {
    let b = shape_bounds(start);
    let width_ratio = match start.kind {
        ShapeKind::Heart { .. } => HEART_BOX_RATIO,
        _ => 1.0,
    };
    let (min_x, width) = drag_axis(b.min_x, b.width(), handle.is_left(), dx, MIN_BOX_SIZE * width_ratio);
    let (min_y, height) = drag_axis(b.min_y, b.height(), handle.is_top(), dy, MIN_BOX_SIZE);
    let resized = Bounds::from_rect(min_x, min_y, width, height);

    let mut patch = ShapePatch::default();
    let anchor = match start.kind {
        ShapeKind::Rectangle { .. } | ShapeKind::Triangle { .. } => {
            patch.width = Some(width);
            patch.height = Some(height);
            resized.top_left()
        }
        ShapeKind::Oval { .. } => {
            patch.rx = Some(width / 2.0);
            patch.ry = Some(height / 2.0);
            resized.top_left()
        }
        ShapeKind::Diamond { .. } => {
            patch.width = Some(width);
            patch.height = Some(height);
            resized.center()
        }
        ShapeKind::Heart { .. } => {
            patch.width = Some(width / HEART_BOX_RATIO);
            patch.height = Some(height);
            Point::new(resized.center().x, resized.min_y)
        }
        ShapeKind::Arrow { direction, .. } => {
            patch.width = Some(width);
            patch.height = Some(height);
            if direction.is_vertical() {
                Point::new(resized.center().x, resized.min_y)
            } else {
                Point::new(resized.min_x, resized.center().y)
            }
        }
        _ => start.anchor(),
    };
    patch.x = Some(anchor.x);
    patch.y = Some(anchor.y);
    patch
}

/// Moves one edge of an axis. Returns the new (min, extent).
fn drag_axis(min: f64, extent: f64, drag_min_edge: bool, delta: f64, floor: f64) -> (f64, f64) {
    let (new_min, new_extent) = if drag_min_edge {
        (min + delta, extent - delta)
    } else {
        (min, extent + delta)
    };
    if new_extent < floor {
        (min, floor)
    } else {
        (new_min, new_extent)
    }
}
