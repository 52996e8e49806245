use std::sync::Arc;

use crate::stroke::{Stroke, StrokeRef};

/// Linear undo/redo over committed strokes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    /// Strokes on the canvas, in paint order
    committed: Vec<StrokeRef>,
    /// Strokes removed by undo, most recent last
    redo_stack: Vec<StrokeRef>,
}

impl History {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stroke on top of the canvas. Invalidates the redo stack.
    pub fn commit(&mut self, stroke: StrokeRef) {
        self.committed.push(stroke);
        self.redo_stack.clear();
    }

    /// Move the top stroke to the redo stack. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        let Some(stroke) = self.committed.pop() else {
            return false;
        };
        self.redo_stack.push(stroke);
        true
    }

    /// Move the last undone stroke back onto the canvas
    pub fn redo(&mut self) -> bool {
        let Some(stroke) = self.redo_stack.pop() else {
            return false;
        };
        self.committed.push(stroke);
        true
    }

    /// Drop everything, including what could be redone
    pub fn clear(&mut self) {
        self.committed.clear();
        self.redo_stack.clear();
    }

    /// Mutable access to the top stroke.
    ///
    /// Copy-on-write: if a snapshot still shares the stroke, it keeps the old
    /// version.
    pub fn last_mut(&mut self) -> Option<&mut Stroke> {
        self.committed.last_mut().map(Arc::make_mut)
    }

    pub fn committed(&self) -> &[StrokeRef] {
        &self.committed
    }

    pub fn redo_stack(&self) -> &[StrokeRef] {
        &self.redo_stack
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
