//! Variable frames for the interpreter.
//!
//! A stack of flat frames (not a parent-linked scope chain). The root frame
//! holds top-level variables; every lambda invocation pushes one frame seeded
//! with the bindings it captured, and pops it on exit. Lookup walks from the
//! active frame outward.

use rustc_hash::FxHashMap;

use jscratch_ir::Name;

use crate::errors::{frame_limit_exceeded, EvalError};
use crate::value::Value;

/// Bindings of one frame.
pub type Frame = FxHashMap<Name, Value>;

/// Stack of frames with exactly one active (the last).
pub struct VariableStack {
    frames: Vec<Frame>,
    max_depth: usize,
}

impl VariableStack {
    /// Default limit on the number of frames, root included.
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    pub fn new() -> Self {
        Self::with_max_depth(Self::DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        VariableStack {
            frames: vec![Frame::default()],
            max_depth: max_depth.max(1),
        }
    }

    /// Drop every frame and binding, leaving an empty root frame.
    pub fn reset(&mut self) {
        self.frames.truncate(1);
        if let Some(root) = self.frames.first_mut() {
            root.clear();
        } else {
            self.frames.push(Frame::default());
        }
    }

    /// Number of frames, root included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Push a frame seeded with `bindings`; it becomes the active frame.
    pub fn push_frame(&mut self, bindings: Frame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(frame_limit_exceeded(self.max_depth));
        }
        self.frames.push(bindings);
        Ok(())
    }

    /// Pop the active frame. The root frame is never popped.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    fn active_mut(&mut self) -> &mut Frame {
        if self.frames.is_empty() {
            self.frames.push(Frame::default());
        }
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Bind `name` in the active frame, replacing any binding there.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.active_mut().insert(name, value);
    }

    /// Look `name` up, nearest frame first.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(&name))
            .cloned()
    }

    /// Write to the nearest frame holding `name`, else define it in the
    /// active frame.
    pub fn assign(&mut self, name: Name, value: Value) {
        if let Some(slot) = self
            .frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(&name))
        {
            *slot = value;
            return;
        }
        self.define(name, value);
    }

    /// Snapshot of the active frame's bindings, for closures.
    pub fn capture(&self) -> Frame {
        self.frames.last().cloned().unwrap_or_default()
    }
}

impl Default for VariableStack {
    fn default() -> Self {
        Self::new()
    }
}
