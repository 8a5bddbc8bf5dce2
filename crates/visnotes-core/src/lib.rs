//! Shape model, hit testing and the live shape store for Visual Notes.
//!
//! - [`shape`]: the tagged shape record and its kinds
//! - [`patch`]: partial updates, static or computed from the current value
//! - [`hit_test`]: containment, topmost lookup, bounds, resize handles
//! - [`resize`]: patches for resize and move drags
//! - [`store`]: the shape collection plus selection
//! - [`factory`]: default shapes and the z-index clock

pub mod error;
pub mod factory;
pub mod hit_test;
pub mod patch;
pub mod resize;
pub mod shape;
pub mod store;

pub use error::{Result, ShapeError};
pub use factory::{ShapeFactory, ZClock, default_kind, default_style};
pub use hit_test::{
    HANDLE_HIT_RADIUS, HandleAnchor, PATH_HIT_TOLERANCE, ResizeHandle, bounds_of,
    find_resize_handle, find_resize_handle_within, find_shape_at_point, is_point_in_shape,
    resize_handles, shape_bounds, shape_vertices,
};
pub use patch::{ShapePatch, ShapeUpdate};
pub use resize::{MIN_BOX_SIZE, MIN_RADIUS, move_patch, resize_patch};
pub use shape::{ArrowDirection, Shape, ShapeId, ShapeKind, ShapeStyle, ShapeType};
pub use store::ShapeStore;
pub use visnotes_geometry::{Bounds, CanvasTransform, Point};
