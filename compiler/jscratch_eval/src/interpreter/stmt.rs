//! Statement execution.
//!
//! Every statement yields a value: blocks yield their last statement's
//! result, loops yield `Void`, and declarations yield what they bound. The
//! driver reports the top-level result of each statement.

use jscratch_ir::{Declarator, ExprId, Name, ResolvedType, StmtId, StmtKind};
use tracing::debug;

use super::Interpreter;
use crate::coerce::coerce_to_type;
use crate::context::{ExecContext, LoopGuard};
use crate::errors::{not_implemented, null_receiver, type_mismatch, EvalError, EvalResult};
use crate::operators::require_bool;
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

impl Interpreter<'_> {
    /// Execute one statement.
    pub fn exec_stmt(&self, id: StmtId, ctx: &mut ExecContext) -> EvalResult {
        let arena = self.arena.clone();
        let stmt = arena.stmt(id);
        ensure_sufficient_stack(|| self.exec_kind(&stmt.kind, ctx))
            .map_err(|e| e.with_span(stmt.span))
    }

    fn exec_kind(&self, kind: &StmtKind, ctx: &mut ExecContext) -> EvalResult {
        match kind {
            StmtKind::Block(stmts) => self.exec_block(stmts, ctx),
            StmtKind::Expr(expr) => self.eval_expr(*expr, ctx),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.eval_expr(*cond, ctx)?;
                if require_bool(&cond, "if condition")? {
                    self.exec_stmt(*then_branch, ctx)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(*else_branch, ctx)
                } else {
                    Ok(Value::Void)
                }
            }
            StmtKind::While { cond, body } => self.exec_while(*cond, *body, ctx),
            StmtKind::DoWhile { body, cond } => self.exec_do_while(*body, *cond, ctx),
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => self.exec_for(init, *cond, update, *body, ctx),
            StmtKind::ForEach {
                var,
                ty,
                iterable,
                body,
            } => self.exec_for_each(*var, ty, *iterable, *body, ctx),
            StmtKind::VarDecl { ty, declarators } => self.exec_var_decl(ty, declarators, ctx),
            StmtKind::Return(value) => match value {
                Some(value) => self.eval_expr(*value, ctx),
                None => Ok(Value::Null),
            },
            StmtKind::Break => {
                ctx.request_break();
                Ok(Value::Void)
            }
            // Single-threaded: the lock expression is never evaluated.
            StmtKind::Synchronized { lock: _, body } => self.exec_stmt(*body, ctx),
            StmtKind::Unsupported(kind) => Err(not_implemented(kind.as_str())),
        }
    }

    /// Run statements in order; stops early once a `break` is pending.
    fn exec_block(&self, stmts: &[StmtId], ctx: &mut ExecContext) -> EvalResult {
        let mut result = Value::Void;
        for &stmt in stmts {
            result = self.exec_stmt(stmt, ctx)?;
            if ctx.is_break_pending() {
                break;
            }
        }
        Ok(result)
    }

    fn condition(&self, cond: ExprId, ctx: &mut ExecContext) -> Result<bool, EvalError> {
        let value = self.eval_expr(cond, ctx)?;
        require_bool(&value, "loop condition")
    }

    fn exec_while(&self, cond: ExprId, body: StmtId, ctx: &mut ExecContext) -> EvalResult {
        let mut guard = LoopGuard::new(self.config.loop_limit);
        while self.condition(cond, ctx)? {
            self.exec_stmt(body, ctx)?;
            if ctx.take_break() {
                break;
            }
            guard.tick(ctx)?;
        }
        debug!(iterations = guard.iterations(), "while loop finished");
        Ok(Value::Void)
    }

    fn exec_do_while(&self, body: StmtId, cond: ExprId, ctx: &mut ExecContext) -> EvalResult {
        let mut guard = LoopGuard::new(self.config.loop_limit);
        loop {
            self.exec_stmt(body, ctx)?;
            if ctx.take_break() {
                break;
            }
            guard.tick(ctx)?;
            if !self.condition(cond, ctx)? {
                break;
            }
        }
        debug!(iterations = guard.iterations(), "do-while loop finished");
        Ok(Value::Void)
    }

    fn exec_for(
        &self,
        init: &[StmtId],
        cond: Option<ExprId>,
        update: &[ExprId],
        body: StmtId,
        ctx: &mut ExecContext,
    ) -> EvalResult {
        for &stmt in init {
            self.exec_stmt(stmt, ctx)?;
        }
        let mut guard = LoopGuard::new(self.config.loop_limit);
        loop {
            if let Some(cond) = cond {
                if !self.condition(cond, ctx)? {
                    break;
                }
            }
            self.exec_stmt(body, ctx)?;
            if ctx.take_break() {
                break;
            }
            for &expr in update {
                self.eval_expr(expr, ctx)?;
            }
            guard.tick(ctx)?;
        }
        debug!(iterations = guard.iterations(), "for loop finished");
        Ok(Value::Void)
    }

    /// Iterates arrays and host iterables. The loop variable is rebound in
    /// the active frame on every iteration, so lambdas created in the body
    /// each capture their own element.
    fn exec_for_each(
        &self,
        var: Name,
        ty: &ResolvedType,
        iterable: ExprId,
        body: StmtId,
        ctx: &mut ExecContext,
    ) -> EvalResult {
        let source = self.eval_expr(iterable, ctx)?;
        let elements = match &source {
            Value::Array(array) => array.to_vec(),
            Value::Object(object) => object.iter_values().ok_or_else(|| {
                type_mismatch("array or java.lang.Iterable", &source.type_name())
            })?,
            Value::Null => return Err(null_receiver("iterator")),
            other => {
                return Err(type_mismatch(
                    "array or java.lang.Iterable",
                    &other.type_name(),
                ))
            }
        };

        let mut guard = LoopGuard::new(self.config.loop_limit);
        for element in elements {
            let element = coerce_to_type(element, ty)?;
            ctx.vars_mut().define(var, element);
            self.exec_stmt(body, ctx)?;
            if ctx.take_break() {
                break;
            }
            guard.tick(ctx)?;
        }
        debug!(iterations = guard.iterations(), "for-each loop finished");
        Ok(Value::Void)
    }

    /// Binds each initialized declarator. A single binding yields its value;
    /// several yield a `name = value` summary.
    fn exec_var_decl(
        &self,
        ty: &ResolvedType,
        declarators: &[Declarator],
        ctx: &mut ExecContext,
    ) -> EvalResult {
        let mut bound = Vec::with_capacity(declarators.len());
        for declarator in declarators {
            let Some(init) = declarator.init else {
                continue;
            };
            let value = self.eval_expr(init, ctx)?;
            let value = coerce_to_type(value, ty)?;
            ctx.vars_mut().define(declarator.name, value.clone());
            bound.push((declarator.name, value));
        }

        Ok(match bound.len() {
            0 => Value::Void,
            1 => bound.pop().map_or(Value::Void, |(_, value)| value),
            _ => {
                let summary = bound
                    .iter()
                    .map(|(name, value)| format!("{} = {value}", self.name(*name)))
                    .collect::<Vec<_>>()
                    .join(", ");
                Value::str(&summary)
            }
        })
    }
}
