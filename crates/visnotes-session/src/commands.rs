//! The concrete shape commands: add, delete, update and clear-all.

use visnotes_core::{Result, Shape, ShapeError, ShapeId, ShapePatch, ShapeStore};

use crate::command::Command;

/// Insert a shape and select it
#[derive(Debug, Clone)]
pub struct AddShapeCommand {
    shape: Shape,
    prior_selection: Option<ShapeId>,
}

impl AddShapeCommand {
    /// Command adding `shape`
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            prior_selection: None,
        }
    }

    /// The shape being added
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

impl Command for AddShapeCommand {
    fn execute(&mut self, store: &mut ShapeStore) -> Result<()> {
        self.prior_selection = store.selected_id().cloned();
        store.add_shape(self.shape.clone())?;
        store.select_shape(Some(self.shape.id.clone()));
        Ok(())
    }

    fn undo(&mut self, store: &mut ShapeStore) -> Result<()> {
        store.delete_shape(&self.shape.id);
        store.select_shape(self.prior_selection.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Add Shape"
    }
}

/// Remove a shape; undo puts it back where it was and reselects it
#[derive(Debug, Clone)]
pub struct DeleteShapeCommand {
    shape: Shape,
    index: Option<usize>,
    prior_selection: Option<ShapeId>,
}

impl DeleteShapeCommand {
    /// Command deleting `shape`
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            index: None,
            prior_selection: None,
        }
    }

    /// The shape being deleted
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

impl Command for DeleteShapeCommand {
    fn execute(&mut self, store: &mut ShapeStore) -> Result<()> {
        let prior_selection = store.selected_id().cloned();
        let (index, _) = store
            .delete_shape(&self.shape.id)
            .ok_or_else(|| ShapeError::NotFound(self.shape.id.clone()))?;
        store.select_shape(None);
        self.index = Some(index);
        self.prior_selection = prior_selection;
        Ok(())
    }

    fn undo(&mut self, store: &mut ShapeStore) -> Result<()> {
        let index = self.index.unwrap_or(store.len());
        store.insert_shape(index, self.shape.clone())?;
        store.select_shape(self.prior_selection.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Delete Shape"
    }
}

/// Apply a before/after pair of patches captured around a gesture
#[derive(Debug, Clone)]
pub struct UpdateShapeCommand {
    id: ShapeId,
    old: ShapePatch,
    new: ShapePatch,
}

impl UpdateShapeCommand {
    /// Command switching `id` between the `old` and `new` patches
    pub fn new(id: ShapeId, old: ShapePatch, new: ShapePatch) -> Self {
        Self { id, old, new }
    }

    /// Target shape
    pub fn id(&self) -> &ShapeId {
        &self.id
    }
}

impl Command for UpdateShapeCommand {
    fn execute(&mut self, store: &mut ShapeStore) -> Result<()> {
        store.update_shape(&self.id, &self.new);
        Ok(())
    }

    fn undo(&mut self, store: &mut ShapeStore) -> Result<()> {
        store.update_shape(&self.id, &self.old);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Update Shape"
    }
}

/// Empty the canvas; undo restores every shape and the selection
#[derive(Debug, Clone)]
pub struct ClearAllCommand {
    shapes: Vec<Shape>,
    selection: Option<ShapeId>,
}

impl ClearAllCommand {
    /// Captures the store's current contents
    pub fn new(store: &ShapeStore) -> Self {
        Self {
            shapes: store.snapshot(),
            selection: store.selected_id().cloned(),
        }
    }
}

impl Command for ClearAllCommand {
    fn execute(&mut self, store: &mut ShapeStore) -> Result<()> {
        store.clear_all();
        Ok(())
    }

    fn undo(&mut self, store: &mut ShapeStore) -> Result<()> {
        store.set_shapes(self.shapes.clone())?;
        store.select_shape(self.selection.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Clear All"
    }
}
