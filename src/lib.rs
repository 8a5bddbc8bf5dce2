//! Visual Notes shape editing.
//!
//! Re-exports the workspace crates under one roof:
//! [`geometry`] for points, bounds and the viewport transform,
//! [`shapes`] for shapes, hit testing and the store,
//! [`session`] for commands, undo history and the editor.

pub use visnotes_core as shapes;
pub use visnotes_geometry as geometry;
pub use visnotes_session as session;

pub use visnotes_core::{
    ArrowDirection, Bounds, CanvasTransform, Point, ResizeHandle, Shape, ShapeError, ShapeId,
    ShapeKind, ShapePatch, ShapeStore, ShapeStyle, ShapeType, ShapeUpdate,
};
pub use visnotes_session::{
    AddShapeCommand, ClearAllCommand, Command, CommandManager, DeleteShapeCommand, Editor,
    EditorConfig, GestureKind, Subscription, UpdateShapeCommand,
};
