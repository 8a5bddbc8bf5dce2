//! An editing session: shapes, history, viewport and the active drag.
//!
//! Every mutation that should be undoable goes through the session's
//! [`CommandManager`]. Live drag updates are applied straight to the store
//! and only the net change is recorded when the drag ends.

use visnotes_core::{
    ArrowDirection, CanvasTransform, Point, ResizeHandle, Result, Shape, ShapeError, ShapeFactory,
    ShapeId, ShapePatch, ShapeStore, ShapeType, ShapeUpdate, find_resize_handle_within,
    move_patch, resize_patch,
};

use crate::commands::{AddShapeCommand, ClearAllCommand, DeleteShapeCommand, UpdateShapeCommand};
use crate::config::EditorConfig;
use crate::manager::{CommandManager, Subscription};

/// What a drag does to its shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize(ResizeHandle),
}

#[derive(Debug, Clone)]
struct Gesture {
    kind: GestureKind,
    /// The shape as it was when the drag started
    start: Shape,
    /// Offset already applied to the store
    applied: (f64, f64),
}

#[derive(Debug)]
pub struct Editor {
    store: ShapeStore,
    history: CommandManager,
    transform: CanvasTransform,
    factory: ShapeFactory,
    config: EditorConfig,
    gesture: Option<Gesture>,
}

impl Editor {
    /// Session with default settings
    pub fn new() -> Self {
        Self::build(EditorConfig::default())
    }

    /// Session with custom settings, rejected if they do not validate
    pub fn with_config(config: EditorConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EditorConfig) -> Self {
        Self {
            store: ShapeStore::new(),
            history: CommandManager::with_max_history(config.max_history),
            transform: CanvasTransform::IDENTITY,
            factory: ShapeFactory::new(),
            config,
            gesture: None,
        }
    }

    /// Replace the canvas with previously saved shapes. History is cleared
    /// and new shapes will stack above everything loaded.
    pub fn load_shapes(&mut self, shapes: Vec<Shape>) -> Result<()> {
        self.gesture = None;
        let top = shapes.iter().map(|s| s.z_index).max();
        self.store.set_shapes(shapes)?;
        if let Some(top) = top {
            self.factory.clock_mut().observe(top);
        }
        self.history.clear_history();
        tracing::debug!(count = self.store.len(), "shapes loaded");
        Ok(())
    }

    /// Live shapes and selection
    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn shapes(&self) -> &[Shape] {
        self.store.shapes()
    }

    /// The selected shape, if any
    pub fn selected(&self) -> Option<&Shape> {
        self.store.selected_shape()
    }

    /// Undo/redo history
    pub fn history(&self) -> &CommandManager {
        &self.history
    }

    /// Settings this session was built with
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current pan/zoom
    pub fn transform(&self) -> CanvasTransform {
        self.transform
    }

    // --- Shape Creation and Removal ---

    /// Add a default shape of `shape_type` at a canvas point.
    ///
    /// Returns `None` for [`ShapeType::Path`]; strokes go through
    /// [`Editor::add_path`].
    pub fn add_shape(&mut self, shape_type: ShapeType, at: Point) -> Result<Option<ShapeId>> {
        let Some(shape) = self.factory.create(shape_type, at) else {
            return Ok(None);
        };
        self.insert(shape).map(Some)
    }

    /// Add a default-sized arrow at a canvas point
    pub fn add_arrow(&mut self, at: Point, direction: ArrowDirection) -> Result<ShapeId> {
        let shape = self.factory.create_arrow(at, direction);
        self.insert(shape)
    }

    /// Add a freehand stroke through canvas points, styled from the drawing
    /// config. Strokes with fewer than two samples are dropped.
    pub fn add_path(&mut self, points: Vec<Point>) -> Result<Option<ShapeId>> {
        let drawing = &self.config.drawing;
        let Some(shape) = self
            .factory
            .create_path(points, &drawing.color, drawing.stroke_width)
        else {
            return Ok(None);
        };
        self.insert(shape).map(Some)
    }

    /// Add a fully built shape
    pub fn insert(&mut self, shape: Shape) -> Result<ShapeId> {
        let id = shape.id.clone();
        self.history
            .execute(AddShapeCommand::new(shape), &mut self.store)?;
        Ok(id)
    }

    /// Delete the selected shape. Returns `false` when nothing is selected.
    /// An active drag is cancelled first.
    pub fn delete_selected(&mut self) -> Result<bool> {
        self.cancel_gesture();
        let Some(shape) = self.store.selected_shape().cloned() else {
            return Ok(false);
        };
        self.history
            .execute(DeleteShapeCommand::new(shape), &mut self.store)?;
        Ok(true)
    }

    /// Remove every shape as one undoable step. Returns `false` on an empty
    /// canvas. An active drag is cancelled first.
    pub fn clear_all(&mut self) -> Result<bool> {
        self.cancel_gesture();
        if self.store.is_empty() {
            return Ok(false);
        }
        let command = ClearAllCommand::new(&self.store);
        self.history.execute(command, &mut self.store)?;
        Ok(true)
    }

    /// Restyle a shape as one undoable step
    pub fn restyle(&mut self, id: &ShapeId, patch: ShapePatch) -> Result<()> {
        let shape = self.store.get(id).ok_or_else(|| ShapeError::NotFound(id.clone()))?;
        let old = ShapePatch {
            color: patch.color.as_ref().map(|_| shape.style.color.clone()),
            opacity: patch.opacity.map(|_| shape.style.opacity),
            border_color: patch.border_color.as_ref().map(|_| shape.style.border_color.clone()),
            border_width: patch.border_width.map(|_| shape.style.border_width),
            z_index: patch.z_index.map(|_| shape.z_index),
            ..Default::default()
        };
        let new = ShapePatch {
            color: patch.color,
            opacity: patch.opacity,
            border_color: patch.border_color,
            border_width: patch.border_width,
            z_index: patch.z_index,
            ..Default::default()
        };
        if new.is_empty() {
            return Ok(());
        }
        self.history
            .execute(UpdateShapeCommand::new(id.clone(), old, new), &mut self.store)
    }

    // --- Selection ---

    /// Select the topmost shape under a screen point, or clear the
    /// selection when there is none. Not recorded in history.
    pub fn tap(&mut self, screen: Point) -> Option<ShapeId> {
        let canvas = self.transform.screen_to_canvas(screen);
        let hit = self.store.shape_at(canvas).map(|s| s.id.clone());
        self.store.select_shape(hit.clone());
        hit
    }

    /// Set or clear the selection; not recorded
    pub fn select(&mut self, id: Option<ShapeId>) {
        self.store.select_shape(id);
    }

    // --- Drag Gestures ---

    /// Start a drag at a canvas point.
    ///
    /// A resize handle of the selected shape takes priority; otherwise the
    /// topmost shape under the point is selected and moved. Returns `None`
    /// when the point hits nothing.
    pub fn begin_gesture(&mut self, at: Point) -> Result<Option<GestureKind>> {
        let radius = self.config.handle_hit_radius;
        let handle = self
            .store
            .selected_shape()
            .and_then(|shape| find_resize_handle_within(at, shape, radius).map(|h| (shape.id.clone(), h)));

        if let Some((id, handle)) = handle {
            self.begin_resize(&id, handle)?;
            return Ok(Some(GestureKind::Resize(handle)));
        }

        let Some(id) = self.store.shape_at(at).map(|s| s.id.clone()) else {
            return Ok(None);
        };
        self.store.select_shape(Some(id.clone()));
        self.begin_move(&id)?;
        Ok(Some(GestureKind::Move))
    }

    /// Start moving shape `id`
    pub fn begin_move(&mut self, id: &ShapeId) -> Result<()> {
        self.begin(id, GestureKind::Move)
    }

    /// Start resizing shape `id` by `handle`
    pub fn begin_resize(&mut self, id: &ShapeId, handle: ResizeHandle) -> Result<()> {
        self.begin(id, GestureKind::Resize(handle))
    }

    fn begin(&mut self, id: &ShapeId, kind: GestureKind) -> Result<()> {
        self.end_gesture()?;
        let start = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| ShapeError::NotFound(id.clone()))?;
        tracing::debug!(%id, ?kind, "gesture started");
        self.gesture = Some(Gesture {
            kind,
            start,
            applied: (0.0, 0.0),
        });
        Ok(())
    }

    /// Kind of the active drag, if any
    pub fn gesture(&self) -> Option<GestureKind> {
        self.gesture.as_ref().map(|g| g.kind)
    }

    /// Apply the drag's total canvas offset since it started. Live updates
    /// are not recorded. Returns `false` when no drag is active.
    pub fn update_gesture(&mut self, dx: f64, dy: f64) -> bool {
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };
        let id = gesture.start.id.clone();
        match gesture.kind {
            GestureKind::Move => {
                let (step_x, step_y) = (dx - gesture.applied.0, dy - gesture.applied.1);
                gesture.applied = (dx, dy);
                self.store.update_shape(
                    &id,
                    ShapeUpdate::with(move |current| move_patch(current, step_x, step_y)),
                )
            }
            GestureKind::Resize(handle) => match resize_patch(&gesture.start, handle, dx, dy) {
                Some(patch) => {
                    gesture.applied = (dx, dy);
                    self.store.update_shape(&id, patch)
                }
                None => false,
            },
        }
    }

    /// Finish the drag, recording its net change as one undoable update.
    /// Returns `false` when nothing changed (or no drag was active).
    pub fn end_gesture(&mut self) -> Result<bool> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(false);
        };
        let id = gesture.start.id.clone();
        let Some(current) = self.store.get(&id) else {
            return Ok(false);
        };
        let old = ShapePatch::geometry_of(&gesture.start);
        let new = ShapePatch::geometry_of(current);
        if old == new {
            tracing::trace!(%id, "gesture ended without changes");
            return Ok(false);
        }
        tracing::debug!(%id, kind = ?gesture.kind, "gesture ended");
        self.history
            .execute(UpdateShapeCommand::new(id, old, new), &mut self.store)?;
        Ok(true)
    }

    /// Abort the drag and put the shape back, unrecorded
    pub fn cancel_gesture(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            let id = gesture.start.id.clone();
            self.store
                .update_shape(&id, ShapePatch::geometry_of(&gesture.start));
            tracing::debug!(%id, "gesture cancelled");
        }
    }

    // --- Viewport ---

    /// Replace the pan/zoom; rejects a zero or non-finite transform
    pub fn set_transform(&mut self, transform: CanvasTransform) -> Result<()> {
        if !transform.is_valid() {
            return Err(ShapeError::InvalidTransform {
                scale: transform.scale,
            });
        }
        self.transform = transform;
        Ok(())
    }

    /// Pan by a screen-space delta
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.transform.pan(dx, dy);
    }

    /// Zoom by `factor` around a screen point, within the configured limits
    pub fn zoom(&mut self, anchor: Point, factor: f64) -> Result<()> {
        let mut next = self.transform;
        next.zoom_about(anchor, factor, self.config.min_zoom, self.config.max_zoom);
        self.set_transform(next)
    }

    /// Map a screen point into canvas space
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        self.transform.screen_to_canvas(screen)
    }

    // --- History ---

    /// Undo the last command. An active drag is cancelled first.
    pub fn undo(&mut self) -> Result<bool> {
        self.cancel_gesture();
        self.history.undo(&mut self.store)
    }

    /// Redo the last undone command. An active drag is cancelled first.
    pub fn redo(&mut self) -> Result<bool> {
        self.cancel_gesture();
        self.history.redo(&mut self.store)
    }

    /// Whether there is anything to undo
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether there is anything to redo
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Get told after every recorded change, undo and redo
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.history.subscribe(callback)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
