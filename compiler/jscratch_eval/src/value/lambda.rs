//! Lambda values.

use std::fmt;
use std::rc::Rc;

use jscratch_ir::{FunctionalShape, LambdaBody, Name, SharedArena};

use super::Value;
use crate::variable_stack::Frame;

/// A lambda created by the interpreter.
///
/// Holds everything needed to run the body later, after the statement that
/// created it has finished: the arena owning the body, the bindings of the
/// frame that was active at creation, and the receiver in effect.
pub struct LambdaValue {
    pub(crate) params: Vec<Name>,
    pub(crate) body: LambdaBody,
    pub(crate) arena: SharedArena,
    pub(crate) captured: Frame,
    pub(crate) this: Value,
    pub(crate) shape: FunctionalShape,
    /// Qualified name of the target interface.
    pub(crate) target: Rc<str>,
}

impl LambdaValue {
    /// Name of the interface's single abstract method.
    pub fn method_name(&self) -> &'static str {
        self.shape.method
    }

    pub fn shape(&self) -> FunctionalShape {
        self.shape
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The arena owning the body.
    pub fn arena(&self) -> &SharedArena {
        &self.arena
    }
}

impl fmt::Debug for LambdaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaValue")
            .field("target", &self.target)
            .field("params", &self.params)
            .field("captured", &self.captured.len())
            .finish_non_exhaustive()
    }
}
