//! The live shape collection and the current selection.
//!
//! Shapes are kept in insertion order; that order is what hit testing
//! falls back on when two shapes share a z-index. Ids are unique at all
//! times and the selection never points at a missing shape.

use visnotes_geometry::Point;

use crate::error::{Result, ShapeError};
use crate::hit_test::find_shape_at_point;
use crate::patch::ShapeUpdate;
use crate::shape::{Shape, ShapeId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
    selected: Option<ShapeId>,
}

impl ShapeStore {
    /// Empty store, nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `shapes`, rejecting duplicate ids
    pub fn with_shapes(shapes: Vec<Shape>) -> Result<Self> {
        let mut store = Self::new();
        store.set_shapes(shapes)?;
        Ok(store)
    }

    /// Shapes in insertion order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shape with `id`, if present
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| &s.id == id)
    }

    /// Position of `id` in insertion order
    pub fn index_of(&self, id: &ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| &s.id == id)
    }

    /// Whether a shape with `id` exists
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Number of shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True when the canvas is empty
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Id of the selected shape
    pub fn selected_id(&self) -> Option<&ShapeId> {
        self.selected.as_ref()
    }

    /// The selected shape itself
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Append a shape
    pub fn add_shape(&mut self, shape: Shape) -> Result<()> {
        let index = self.shapes.len();
        self.insert_shape(index, shape)
    }

    /// Insert a shape at `index` (clamped to the end)
    pub fn insert_shape(&mut self, index: usize, shape: Shape) -> Result<()> {
        if self.contains(&shape.id) {
            return Err(ShapeError::DuplicateId(shape.id));
        }
        let index = index.min(self.shapes.len());
        tracing::trace!(id = %shape.id, kind = %shape.shape_type(), index, "insert shape");
        self.shapes.insert(index, shape);
        Ok(())
    }

    /// Remove a shape, returning where it was and what it was.
    /// Unknown ids are a no-op.
    pub fn delete_shape(&mut self, id: &ShapeId) -> Option<(usize, Shape)> {
        let index = self.index_of(id)?;
        let shape = self.shapes.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        tracing::trace!(%id, index, "delete shape");
        Some((index, shape))
    }

    /// Merge an update into the shape with `id`.
    ///
    /// Returns `false` (and changes nothing) when no such shape exists.
    pub fn update_shape<'a>(&mut self, id: &ShapeId, update: impl Into<ShapeUpdate<'a>>) -> bool {
        let Some(shape) = self.shapes.iter_mut().find(|s| &s.id == id) else {
            tracing::trace!(%id, "update of unknown shape ignored");
            return false;
        };
        let patch = update.into().resolve(shape);
        patch.apply_to(shape);
        tracing::trace!(%id, ?patch, "update shape");
        true
    }

    /// Select a shape, or clear the selection with `None`.
    ///
    /// Selecting an id that is not in the store clears the selection.
    pub fn select_shape(&mut self, id: Option<ShapeId>) {
        self.selected = id.filter(|id| self.contains(id));
        tracing::trace!(selected = ?self.selected, "select shape");
    }

    /// Replace the whole collection.
    ///
    /// Fails without touching the store if `shapes` contains duplicate ids.
    /// A selection that no longer resolves is cleared.
    pub fn set_shapes(&mut self, shapes: Vec<Shape>) -> Result<()> {
        let mut seen = std::collections::HashSet::with_capacity(shapes.len());
        if let Some(dup) = shapes.iter().find(|s| !seen.insert(&s.id)) {
            return Err(ShapeError::DuplicateId(dup.id.clone()));
        }
        self.shapes = shapes;
        if self.selected.as_ref().is_some_and(|id| !self.contains(id)) {
            self.selected = None;
        }
        tracing::trace!(count = self.shapes.len(), "set shapes");
        Ok(())
    }

    /// Remove every shape and clear the selection
    pub fn clear_all(&mut self) {
        self.shapes.clear();
        self.selected = None;
        tracing::trace!("clear all shapes");
    }

    /// Topmost shape at a canvas point
    pub fn shape_at(&self, point: Point) -> Option<&Shape> {
        find_shape_at_point(point, &self.shapes)
    }

    /// Owned copy of the collection, for capturing before a destructive change
    pub fn snapshot(&self) -> Vec<Shape> {
        self.shapes.clone()
    }
}
