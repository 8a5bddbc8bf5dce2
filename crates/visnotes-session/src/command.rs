//! Command abstraction for undoable shape edits.

use visnotes_core::{Result, ShapeStore};

/// A reversible mutation of the shape store.
///
/// Implementations capture everything they need to invert themselves when
/// they are constructed or first executed, never lazily at undo time.
/// `execute` followed by `undo` must leave the store (shapes and
/// selection) exactly as it was, and `undo` followed by `execute` must
/// reproduce the post-execute state.
pub trait Command: std::fmt::Debug {
    /// Apply the change
    fn execute(&mut self, store: &mut ShapeStore) -> Result<()>;

    /// Revert the change made by the last `execute`
    fn undo(&mut self, store: &mut ShapeStore) -> Result<()>;

    /// Short display name, e.g. for an "Undo Add Shape" menu item
    fn name(&self) -> &'static str;
}
