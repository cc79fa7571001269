//! Allocation and lambda construction.

use std::rc::Rc;

use jscratch_ir::{
    Allocation, ArrayInit, ClassDecl, Declaration, Expr, ExprId, FunctionalShape, LambdaBody,
    Name, ResolvedType,
};
use tracing::trace;

use super::Interpreter;
use crate::coerce::{coerce_to_type, to_index};
use crate::context::ExecContext;
use crate::errors::{
    host_exception, negative_array_size, not_implemented, type_mismatch, unresolved_reference,
    EvalResult,
};
use crate::value::{ArrayRef, LambdaValue, Value};

impl Interpreter<'_> {
    pub(super) fn eval_alloc(
        &self,
        allocation: &Allocation,
        expr: &Expr,
        ctx: &mut ExecContext,
    ) -> EvalResult {
        match allocation {
            Allocation::Array { component, init } => self.alloc_array(component, init, ctx),
            Allocation::Object { class, args } => self.alloc_object(*class, args, expr, ctx),
        }
    }

    fn alloc_array(
        &self,
        component: &ResolvedType,
        init: &ArrayInit,
        ctx: &mut ExecContext,
    ) -> EvalResult {
        let component_type = self.component_type(component);
        let array = match init {
            ArrayInit::Elements(elements) => {
                let values = elements
                    .iter()
                    .map(|&element| {
                        let value = self.eval_expr(element, ctx)?;
                        coerce_to_type(value, component)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                ArrayRef::new(component_type, values)
            }
            ArrayInit::Dimension(dimension) => {
                let size = self.eval_expr(*dimension, ctx)?;
                let size = to_index(&size)?;
                let Ok(len) = usize::try_from(size) else {
                    return Err(negative_array_size(size));
                };
                ArrayRef::with_len(component_type, len)
            }
        };
        Ok(Value::Array(array))
    }

    /// `new C()` uses the class's default constructor; `new C(args)` needs the
    /// resolver to have picked a constructor.
    fn alloc_object(
        &self,
        class: ClassDecl,
        args: &[ExprId],
        expr: &Expr,
        ctx: &mut ExecContext,
    ) -> EvalResult {
        if let Some(Declaration::Constructor(constructor)) = &expr.decl {
            let args = self.eval_args(args, ctx)?;
            return self
                .bridge
                .invoke_constructor(constructor, args)
                .map_err(host_exception);
        }
        if !args.is_empty() {
            return Err(unresolved_reference(&format!(
                "constructor {}",
                self.name(class.name)
            )));
        }
        let Some(runtime) = self.classes.class_of(class) else {
            return Err(unresolved_reference(self.name(class.name)));
        };
        runtime.new_instance().map_err(host_exception)
    }

    /// Build a lambda value targeting the node's resolved interface.
    ///
    /// The active frame's bindings are copied now, so later writes to those
    /// variables are not seen by the lambda.
    pub(super) fn make_lambda(
        &self,
        params: &[Name],
        body: LambdaBody,
        expr: &Expr,
        ctx: &mut ExecContext,
    ) -> EvalResult {
        let target = match &expr.ty {
            Some(ResolvedType::Class(class)) => self.name(class.name),
            Some(other) => {
                return Err(not_implemented(&format!(
                    "lambda targeting {}",
                    self.type_display(other)
                )))
            }
            None => return Err(not_implemented("lambda without a target type")),
        };
        let Some(shape) = FunctionalShape::for_interface(target) else {
            return Err(not_implemented(&format!("lambda targeting {target}")));
        };
        if params.len() != shape.arity() {
            return Err(type_mismatch(
                &format!("{} parameter(s) for {target}", shape.arity()),
                &params.len().to_string(),
            ));
        }

        let captured = ctx.vars().capture();
        trace!(interface = target, captured = captured.len(), "lambda created");
        Ok(Value::Lambda(Rc::new(LambdaValue {
            params: params.to_vec(),
            body,
            arena: self.arena.clone(),
            captured,
            this: ctx.this().clone(),
            shape,
            target: target.into(),
        })))
    }
}
