//! Tree-walking interpreter for the Java subset.
//!
//! # Architecture
//!
//! Evaluation is an exhaustive match on node kinds:
//!
//! - `expr` - identifiers, calls, operators, assignment, indexing, chains
//! - `alloc` - array and object allocation, lambda construction
//! - `call` - lambda invocation
//! - `stmt` - statements, loops and the loop ceiling
//!
//! All mutable state lives in the [`ExecContext`] passed to every call, so
//! an `Interpreter` itself is immutable and cheap to copy.
//!
//! # Receivers
//!
//! Identifiers and method calls are evaluated against a receiver. `None`
//! means the ambient receiver (`ctx.this()`), which is also the only case
//! where local variables are visible. Inside a chain `a.b.c` each segment is
//! evaluated with `Some(previous result)`.
//!
//! # Arena Threading
//!
//! Node IDs are only valid in the arena that produced them. A lambda keeps
//! the arena it was created in; invoking it evaluates the body on a copy of
//! the interpreter pointed at that arena.

mod alloc;
mod builder;
mod call;
mod expr;
mod stmt;

pub use builder::InterpreterBuilder;

use jscratch_ir::{Name, PrimitiveType, ResolvedType, SharedArena, StringInterner};

use crate::bridge::{ClassResolver, HostBridge};
use crate::context::ExecContext;
use crate::value::{ComponentType, Value};
use crate::variable_stack::VariableStack;

/// Evaluation limits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Iterations any single loop may run before `LoopLimitExceeded`.
    pub loop_limit: u64,
    /// Maximum number of variable frames (nested lambda invocations + 1).
    pub max_frames: usize,
}

impl EvalConfig {
    pub const DEFAULT_LOOP_LIMIT: u64 = 100_000;
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            loop_limit: Self::DEFAULT_LOOP_LIMIT,
            max_frames: VariableStack::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Tree-walking interpreter over one syntax arena.
#[derive(Clone)]
pub struct Interpreter<'a> {
    pub(crate) arena: SharedArena,
    pub(crate) interner: &'a StringInterner,
    pub(crate) bridge: &'a dyn HostBridge,
    pub(crate) classes: &'a dyn ClassResolver,
    pub(crate) config: EvalConfig,
}

impl<'a> Interpreter<'a> {
    pub fn arena(&self) -> &SharedArena {
        &self.arena
    }

    pub fn config(&self) -> EvalConfig {
        self.config
    }

    /// A fresh context whose variable stack honors this interpreter's frame
    /// limit.
    pub fn new_context(&self, this: Value) -> ExecContext {
        ExecContext::new(this, VariableStack::with_max_depth(self.config.max_frames))
    }

    /// Same interpreter over another arena.
    pub(crate) fn with_arena(&self, arena: SharedArena) -> Interpreter<'a> {
        Interpreter {
            arena,
            ..self.clone()
        }
    }

    #[inline]
    pub(crate) fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Source-like rendering of a resolved type.
    pub(crate) fn type_display(&self, ty: &ResolvedType) -> String {
        match ty {
            ResolvedType::Void => "void".to_string(),
            ResolvedType::Null => "null".to_string(),
            ResolvedType::Primitive(p) => p.keyword().to_string(),
            ResolvedType::Class(class) => self.name(class.name).to_string(),
            ResolvedType::Array(component) => format!("{}[]", self.type_display(component)),
        }
    }

    /// Runtime element type for an array of `ty`.
    pub(crate) fn component_type(&self, ty: &ResolvedType) -> ComponentType {
        match ty {
            ResolvedType::Primitive(p) => ComponentType::Primitive(*p),
            ResolvedType::Void | ResolvedType::Null => {
                ComponentType::Reference("java.lang.Object".into())
            }
            other => ComponentType::Reference(self.type_display(other).into()),
        }
    }
}

/// Java's `Introspector.decapitalize`: `Name` → `name`, but `URL` stays `URL`.
pub(crate) fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if chars.next().is_some_and(char::is_uppercase) && first.is_uppercase() {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    out.extend(first.to_lowercase());
    out.push_str(&s[first.len_utf8()..]);
    out
}

/// `true` for primitive numeric kinds.
pub(crate) fn is_numeric_primitive(ty: Option<PrimitiveType>) -> bool {
    ty.is_some_and(PrimitiveType::is_numeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decapitalize_follows_bean_rules() {
        assert_eq!(decapitalize("Name"), "name");
        assert_eq!(decapitalize("URL"), "URL");
        assert_eq!(decapitalize("X"), "x");
        assert_eq!(decapitalize(""), "");
    }
}
