//! Editing session for Visual Notes.
//!
//! Undoable changes are [`Command`]s run through a [`CommandManager`],
//! which keeps a bounded undo stack and tells subscribers whenever
//! history moves. [`Editor`] ties the manager to a shape store, the
//! viewport transform and the drag gesture in progress.

pub mod command;
pub mod commands;
pub mod config;
pub mod editor;
pub mod manager;

pub use command::Command;
pub use commands::{AddShapeCommand, ClearAllCommand, DeleteShapeCommand, UpdateShapeCommand};
pub use config::{DrawingConfig, EditorConfig};
pub use editor::{Editor, GestureKind};
pub use manager::{CommandManager, DEFAULT_MAX_HISTORY, Subscription};
