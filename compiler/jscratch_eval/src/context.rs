//! Execution state threaded through every evaluator call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::{cancelled, loop_limit_exceeded, EvalError};
use crate::value::Value;
use crate::variable_stack::VariableStack;

/// Cooperative cancellation flag.
///
/// Clones share the flag, so a UI thread can hold one and cancel a run in
/// progress. Checked between top-level statements and once per loop
/// iteration.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Per-evaluator execution state.
///
/// The receiver and the variable stack are supplied at construction;
/// [`ExecContext::reset`] restores a clean state at the start of each run.
pub struct ExecContext {
    this: Value,
    vars: VariableStack,
    break_pending: bool,
    cancel: CancelToken,
}

impl ExecContext {
    pub fn new(this: Value, vars: VariableStack) -> Self {
        ExecContext {
            this,
            vars,
            break_pending: false,
            cancel: CancelToken::new(),
        }
    }

    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Clear all variables, any pending break and any earlier cancel request.
    pub fn reset(&mut self) {
        self.vars.reset();
        self.break_pending = false;
        self.cancel.clear();
    }

    /// Current receiver (`this`).
    #[inline]
    pub fn this(&self) -> &Value {
        &self.this
    }

    /// Replace the receiver, returning the previous one.
    pub(crate) fn replace_this(&mut self, this: Value) -> Value {
        std::mem::replace(&mut self.this, this)
    }

    #[inline]
    pub fn vars(&self) -> &VariableStack {
        &self.vars
    }

    #[inline]
    pub fn vars_mut(&mut self) -> &mut VariableStack {
        &mut self.vars
    }

    #[inline]
    pub fn is_break_pending(&self) -> bool {
        self.break_pending
    }

    pub(crate) fn request_break(&mut self) {
        self.break_pending = true;
    }

    /// Clear the break flag, returning whether it was set.
    pub fn take_break(&mut self) -> bool {
        std::mem::take(&mut self.break_pending)
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn check_cancelled(&self) -> Result<(), EvalError> {
        if self.cancel.is_cancelled() {
            Err(cancelled())
        } else {
            Ok(())
        }
    }
}

/// Iteration counter owned by one loop execution.
pub(crate) struct LoopGuard {
    count: u64,
    limit: u64,
}

impl LoopGuard {
    pub(crate) fn new(limit: u64) -> Self {
        LoopGuard { count: 0, limit }
    }

    /// Record one completed iteration.
    ///
    /// Fails once `limit` iterations have run, or when cancellation was
    /// requested.
    pub(crate) fn tick(&mut self, ctx: &ExecContext) -> Result<(), EvalError> {
        self.count = self.count.saturating_add(1);
        if self.count >= self.limit {
            return Err(loop_limit_exceeded(self.limit));
        }
        ctx.check_cancelled()
    }

    pub(crate) fn iterations(&self) -> u64 {
        self.count
    }
}
