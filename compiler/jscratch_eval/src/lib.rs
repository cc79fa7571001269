//! jscratch Eval - tree-walking evaluator for the Java subset.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Interpreter`: exhaustive dispatch over expression and statement kinds
//! - `ExecContext`: receiver, variable stack, break flag and cancel token
//! - `VariableStack`: flat frames, one per lambda invocation
//! - `evaluate_binary` / `evaluate_unary`: Java operator semantics on `Value`
//! - `HostBridge` / `ClassResolver`: the only way to reach host code
//! - `capture`: process-wide console capture for one run
//!
//! Evaluation is single-threaded. Values use `Rc` and an `ExecContext` must
//! not be shared between two evaluations running at the same time.

mod bridge;
pub mod capture;
mod coerce;
mod context;
pub mod errors;
pub mod interpreter;
mod operators;
mod stack;
pub mod testing;
mod unary_operators;
mod value;
mod variable_stack;

#[cfg(test)]
mod tests;

pub use bridge::{ClassResolver, HostBridge, HostException};
pub use coerce::{coerce_to, coerce_to_type};
pub use context::{CancelToken, ExecContext};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{EvalConfig, Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, values_equal};
pub use unary_operators::{evaluate_unary, step_value};
pub use value::{
    ArrayRef, ClassRef, ComponentType, HostClass, HostObject, LambdaValue, ObjectRef,
    PropertyAccess, Value,
};
pub use variable_stack::{Frame, VariableStack};
