//! Bounded linear undo/redo history with change notification.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use visnotes_core::{Result, ShapeStore};

use crate::command::Command;

/// Undo entries kept before the oldest is dropped
pub const DEFAULT_MAX_HISTORY: usize = 50;

type Callback = Rc<dyn Fn()>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    callbacks: Vec<(u64, Callback)>,
}

/// Handle returned by [`CommandManager::subscribe`].
///
/// Dropping it keeps the callback registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug, Clone)]
pub struct Subscription {
    registry: Weak<RefCell<Subscribers>>,
    id: u64,
}

impl Subscription {
    /// Remove the callback. Safe to call any number of times, and after
    /// the manager is gone.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().callbacks.retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("callbacks", &format!("<{} callbacks>", self.callbacks.len()))
            .finish()
    }
}

/// Owns the undo and redo stacks.
///
/// Executing a command clears the redo stack. The undo stack holds at most
/// `max_history` entries; past that the oldest is dropped for good.
/// Subscribers are called synchronously, in registration order, after every
/// execute, undo or redo that did something.
pub struct CommandManager {
    undo_stack: VecDeque<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
    max_history: usize,
    subscribers: Rc<RefCell<Subscribers>>,
}

impl CommandManager {
    /// Manager keeping [`DEFAULT_MAX_HISTORY`] entries
    pub fn new() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }

    /// Manager keeping at most `max_history` entries
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_history,
            subscribers: Rc::default(),
        }
    }

    /// Undo entries kept before the oldest is dropped
    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Change the cap, dropping the oldest entries if over it
    pub fn set_max_history(&mut self, max_history: usize) {
        self.max_history = max_history;
        self.enforce_limit();
    }

    /// Run a command and record it
    pub fn execute<C: Command + 'static>(&mut self, command: C, store: &mut ShapeStore) -> Result<()> {
        self.execute_boxed(Box::new(command), store)
    }

    /// Run a boxed command and record it.
    ///
    /// A command that fails is not recorded and the redo stack is kept.
    pub fn execute_boxed(&mut self, mut command: Box<dyn Command>, store: &mut ShapeStore) -> Result<()> {
        command.execute(store)?;
        tracing::debug!(command = command.name(), "execute");
        self.undo_stack.push_back(command);
        self.redo_stack.clear();
        self.enforce_limit();
        self.notify();
        Ok(())
    }

    /// Undo the most recent command. Returns `false` when there was nothing
    /// to undo.
    ///
    /// If the command's own undo fails it is not pushed to the redo stack.
    pub fn undo(&mut self, store: &mut ShapeStore) -> Result<bool> {
        let Some(mut command) = self.undo_stack.pop_back() else {
            tracing::trace!("undo with empty history");
            return Ok(false);
        };
        command.undo(store)?;
        tracing::debug!(command = command.name(), "undo");
        self.redo_stack.push(command);
        self.notify();
        Ok(true)
    }

    /// Re-run the most recently undone command. Returns `false` when there
    /// was nothing to redo.
    pub fn redo(&mut self, store: &mut ShapeStore) -> Result<bool> {
        let Some(mut command) = self.redo_stack.pop() else {
            tracing::trace!("redo with empty history");
            return Ok(false);
        };
        command.execute(store)?;
        tracing::debug!(command = command.name(), "redo");
        self.undo_stack.push_back(command);
        self.notify();
        Ok(true)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo entries
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redo entries
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Name of the command the next undo would revert
    pub fn undo_name(&self) -> Option<&'static str> {
        self.undo_stack.back().map(|c| c.name())
    }

    /// Name of the command the next redo would re-run
    pub fn redo_name(&self) -> Option<&'static str> {
        self.redo_stack.last().map(|c| c.name())
    }

    /// Forget all history. Subscribers are told if anything was dropped.
    pub fn clear_history(&mut self) {
        if self.undo_stack.is_empty() && self.redo_stack.is_empty() {
            return;
        }
        self.undo_stack.clear();
        self.redo_stack.clear();
        tracing::debug!("history cleared");
        self.notify();
    }

    /// Register a change callback
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let mut subscribers = self.subscribers.borrow_mut();
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.callbacks.push((id, Rc::new(callback)));
        Subscription {
            registry: Rc::downgrade(&self.subscribers),
            id,
        }
    }

    /// Live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().callbacks.len()
    }

    fn enforce_limit(&mut self) {
        while self.undo_stack.len() > self.max_history {
            if let Some(evicted) = self.undo_stack.pop_front() {
                tracing::debug!(command = evicted.name(), max = self.max_history, "history full, dropping oldest");
            }
        }
    }

    fn notify(&self) {
        // Snapshot first so callbacks may subscribe or unsubscribe.
        let callbacks: Vec<Callback> = self
            .subscribers
            .borrow()
            .callbacks
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl Default for CommandManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommandManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandManager")
            .field("undo_stack", &self.undo_stack)
            .field("redo_stack", &self.redo_stack)
            .field("max_history", &self.max_history)
            .field("subscribers", &self.subscribers.borrow())
            .finish()
    }
}
