//! Canvas geometry for Visual Notes.
//!
//! Pure, allocation-light primitives shared by the shape model and the
//! gesture layer: points, the pan/zoom transform between screen and canvas
//! space, axis-aligned bounds, and the containment predicates used for hit
//! testing. Nothing in here knows what a shape is.

mod bounds;
mod point;
mod polygon;
mod transform;

pub use bounds::Bounds;
pub use point::Point;
pub use polygon::{
    near_any, point_in_ellipse, point_in_polygon, point_in_triangle, regular_polygon_vertices,
    star_vertices,
};
pub use transform::CanvasTransform;
