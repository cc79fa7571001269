//! Expression evaluation.

use jscratch_ir::{
    AssignOp, BinaryOp, Declaration, Expr, ExprId, ExprKind, Literal, MethodDecl, Name,
    ResolvedType, UnaryOp,
};

use super::{decapitalize, is_numeric_primitive, Interpreter};
use crate::coerce::{coerce_to, coerce_to_type, to_index};
use crate::context::ExecContext;
use crate::errors::{
    host_exception, index_out_of_bounds, invalid_operator, method_not_found, not_an_array,
    not_implemented, null_receiver, unresolved_reference, EvalError, EvalResult,
};
use crate::operators::{evaluate_binary, require_bool};
use crate::stack::ensure_sufficient_stack;
use crate::unary_operators::{evaluate_unary, step_value};
use crate::value::{ArrayRef, Value};

impl Interpreter<'_> {
    /// Evaluate an expression against the ambient receiver.
    pub fn eval_expr(&self, id: ExprId, ctx: &mut ExecContext) -> EvalResult {
        self.eval_in(id, None, ctx)
    }

    /// Evaluate an expression against `receiver` (`None` = ambient `this`).
    pub(crate) fn eval_in(
        &self,
        id: ExprId,
        receiver: Option<&Value>,
        ctx: &mut ExecContext,
    ) -> EvalResult {
        let arena = self.arena.clone();
        let expr = arena.expr(id);
        ensure_sufficient_stack(|| self.eval_kind(expr, receiver, ctx))
            .map_err(|e| e.with_span(expr.span))
    }

    fn eval_kind(
        &self,
        expr: &Expr,
        receiver: Option<&Value>,
        ctx: &mut ExecContext,
    ) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(self.eval_literal(*lit)),
            ExprKind::Ident(name) => self.eval_ident(*name, expr, receiver, ctx),
            ExprKind::MethodCall { name, args } => {
                self.eval_method_call(*name, args, expr, receiver, ctx)
            }
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, *left, *right, ctx),
            ExprKind::Unary { op, operand } => self.eval_unary(*op, *operand, ctx),
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            } => {
                let cond = self.eval_expr(*cond, ctx)?;
                if require_bool(&cond, "condition")? {
                    self.eval_expr(*then_expr, ctx)
                } else {
                    self.eval_expr(*else_expr, ctx)
                }
            }
            ExprKind::Assign { op, target, value } => self.eval_assign(*op, *target, *value, ctx),
            ExprKind::Index { array, index } => {
                let array = self.eval_in(*array, receiver, ctx)?;
                let index = self.eval_expr(*index, ctx)?;
                let array = as_array(&array)?;
                let index = to_index(&index)?;
                array
                    .get(index)
                    .ok_or_else(|| index_out_of_bounds(index, array.len()))
            }
            ExprKind::Chain(segments) => {
                let mut current: Option<Value> = None;
                for (i, &segment) in segments.iter().enumerate() {
                    let segment_receiver = if i == 0 { receiver } else { current.as_ref() };
                    let value = self.eval_in(segment, segment_receiver, ctx)?;
                    current = Some(value);
                }
                Ok(current.unwrap_or(Value::Void))
            }
            ExprKind::Alloc(allocation) => self.eval_alloc(allocation, expr, ctx),
            ExprKind::Lambda { params, body } => self.make_lambda(params, *body, expr, ctx),
            ExprKind::TypeRef => self.eval_type_ref(expr),
        }
    }

    fn eval_literal(&self, lit: Literal) -> Value {
        match lit {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(b),
            Literal::Int(n) => Value::Int(n),
            Literal::Long(n) => Value::Long(n),
            Literal::Float(bits) => Value::Float(f32::from_bits(bits)),
            Literal::Double(bits) => Value::Double(f64::from_bits(bits)),
            Literal::Char(c) => Value::Char(c),
            Literal::Str(name) => Value::str(self.name(name)),
        }
    }

    /// Identifier lookup, in order: `this`, array `length`, local variables
    /// (ambient receiver only), fields, then class/package declarations.
    fn eval_ident(
        &self,
        name: Name,
        expr: &Expr,
        receiver: Option<&Value>,
        ctx: &mut ExecContext,
    ) -> EvalResult {
        let target = receiver.unwrap_or_else(|| ctx.this()).clone();

        if name == Name::THIS {
            return Ok(target);
        }
        if name == Name::LENGTH {
            if let Value::Array(array) = &target {
                return Ok(Value::Int(array_len(array)));
            }
        }
        if receiver.is_none() {
            if let Some(value) = ctx.vars().lookup(name) {
                return Ok(value);
            }
        }

        let text = self.name(name);
        if let Some(value) = self.read_field(text, &target, expr.decl.as_ref()) {
            return Ok(value);
        }

        match &expr.decl {
            Some(Declaration::Class(class)) => self
                .classes
                .class_of(*class)
                .map(Value::Class)
                .ok_or_else(|| unresolved_reference(self.name(class.name))),
            Some(Declaration::Package(package)) => {
                Ok(Value::Package(self.name(package.name).into()))
            }
            _ if receiver.is_some() && target.is_null() => Err(null_receiver(text)),
            _ => Err(unresolved_reference(text)),
        }
    }

    /// Field read on `target`, or a static field named by the declaration.
    fn read_field(&self, name: &str, target: &Value, decl: Option<&Declaration>) -> Option<Value> {
        if let Some(Declaration::Field(field)) = decl {
            if field.is_static {
                if let Some(value) = self
                    .classes
                    .class_of(field.declaring)
                    .and_then(|class| class.static_field(name))
                {
                    return Some(value);
                }
            }
        }
        match target {
            Value::Object(object) => object.field(name),
            Value::Class(class) => class.static_field(name),
            _ => None,
        }
    }

    fn eval_method_call(
        &self,
        name: Name,
        args: &[ExprId],
        expr: &Expr,
        receiver: Option<&Value>,
        ctx: &mut ExecContext,
    ) -> EvalResult {
        let target = receiver.unwrap_or_else(|| ctx.this()).clone();
        let text = self.name(name);

        if let Value::Lambda(lambda) = &target {
            if lambda.method_name() == text {
                let args = self.eval_args(args, ctx)?;
                return self.invoke_lambda(lambda, args, ctx);
            }
        }

        if let Some(Declaration::Method(method)) = &expr.decl {
            return self.invoke_resolved(method, &target, args, ctx);
        }

        if target.is_null() {
            return Err(null_receiver(text));
        }
        self.property_fallback(text, &target, args, ctx)
    }

    fn invoke_resolved(
        &self,
        method: &MethodDecl,
        target: &Value,
        args: &[ExprId],
        ctx: &mut ExecContext,
    ) -> EvalResult {
        if target.is_null() && !method.is_static {
            return Err(null_receiver(self.name(method.name)));
        }
        let args = self.eval_args(args, ctx)?;
        self.bridge
            .invoke_method(method, target, args)
            .map_err(host_exception)
    }

    /// `getX()`/`isX()`/`setX(v)` on objects exposing named properties.
    fn property_fallback(
        &self,
        method: &str,
        target: &Value,
        args: &[ExprId],
        ctx: &mut ExecContext,
    ) -> EvalResult {
        let not_found = || method_not_found(method, &target.type_name());
        let Value::Object(object) = target else {
            return Err(not_found());
        };
        let Some(properties) = object.properties() else {
            return Err(not_found());
        };

        let getter = method
            .strip_prefix("get")
            .or_else(|| method.strip_prefix("is"));
        match (getter, method.strip_prefix("set"), args) {
            (Some(property), _, []) if !property.is_empty() => properties
                .get_property(&decapitalize(property))
                .ok_or_else(not_found),
            (_, Some(property), [arg]) if !property.is_empty() => {
                let value = self.eval_expr(*arg, ctx)?;
                if properties.set_property(&decapitalize(property), value) {
                    Ok(Value::Void)
                } else {
                    Err(not_found())
                }
            }
            _ => Err(not_found()),
        }
    }

    /// Evaluate call arguments left to right under the ambient receiver.
    pub(crate) fn eval_args(
        &self,
        args: &[ExprId],
        ctx: &mut ExecContext,
    ) -> Result<Vec<Value>, EvalError> {
        args.iter().map(|&arg| self.eval_expr(arg, ctx)).collect()
    }

    fn eval_binary(
        &self,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
        ctx: &mut ExecContext,
    ) -> EvalResult {
        match op {
            BinaryOp::And | BinaryOp::Or => {
                let left = self.eval_expr(left, ctx)?;
                let left = require_bool(&left, "operand")?;
                // `&&` stops on false, `||` on true.
                if left == (op == BinaryOp::Or) {
                    return Ok(Value::Bool(left));
                }
                let right = self.eval_expr(right, ctx)?;
                Ok(Value::Bool(require_bool(&right, "operand")?))
            }
            _ => {
                let left = self.eval_expr(left, ctx)?;
                let right = self.eval_expr(right, ctx)?;
                evaluate_binary(left, right, op)
            }
        }
    }

    fn eval_unary(&self, op: UnaryOp, operand: ExprId, ctx: &mut ExecContext) -> EvalResult {
        if !op.is_step() {
            let value = self.eval_expr(operand, ctx)?;
            return evaluate_unary(value, op);
        }

        let name = match self.arena.expr(operand).kind {
            ExprKind::Ident(name) if name != Name::THIS => name,
            _ => return Err(invalid_operator(op.as_symbol(), "a non-variable operand")),
        };
        let Some(old) = ctx.vars().lookup(name) else {
            return Err(unresolved_reference(self.name(name)));
        };
        let new = step_value(&old, matches!(op, UnaryOp::PreInc | UnaryOp::PostInc))?;
        ctx.vars_mut().assign(name, new.clone());
        Ok(match op {
            UnaryOp::PostInc | UnaryOp::PostDec => old,
            _ => new,
        })
    }

    fn eval_assign(
        &self,
        op: AssignOp,
        target: ExprId,
        value: ExprId,
        ctx: &mut ExecContext,
    ) -> EvalResult {
        let rhs = self.eval_expr(value, ctx)?;
        let arena = self.arena.clone();
        let target_expr = arena.expr(target);

        match &target_expr.kind {
            ExprKind::Ident(name) if *name != Name::THIS => {
                let name = *name;
                let result = match op.binary() {
                    Some(binary) => {
                        let Some(current) = ctx.vars().lookup(name) else {
                            return Err(unresolved_reference(self.name(name)));
                        };
                        combine(&current, rhs, binary)?
                    }
                    None => match &target_expr.ty {
                        Some(ty) => coerce_to_type(rhs, ty)?,
                        None => rhs,
                    },
                };
                ctx.vars_mut().assign(name, result.clone());
                Ok(result)
            }
            ExprKind::Index { array, index } => {
                let array = self.eval_expr(*array, ctx)?;
                let index = self.eval_expr(*index, ctx)?;
                let array = as_array(&array)?;
                let index = to_index(&index)?;
                let result = match op.binary() {
                    Some(binary) => {
                        let current = array
                            .get(index)
                            .ok_or_else(|| index_out_of_bounds(index, array.len()))?;
                        combine(&current, rhs, binary)?
                    }
                    None => match array.component().primitive() {
                        Some(primitive) => coerce_to(rhs, primitive)?,
                        None => rhs,
                    },
                };
                if array.set(index, result.clone()) {
                    Ok(result)
                } else {
                    Err(index_out_of_bounds(index, array.len()))
                }
            }
            _ => Err(not_implemented("assignment to this target")),
        }
    }

    fn eval_type_ref(&self, expr: &Expr) -> EvalResult {
        let class = match (&expr.ty, &expr.decl) {
            (Some(ResolvedType::Class(class)), _) | (_, Some(Declaration::Class(class))) => *class,
            (Some(ty), _) => {
                return Err(not_implemented(&format!(
                    "class literal for {}",
                    self.type_display(ty)
                )))
            }
            (None, _) => return Err(unresolved_reference("type")),
        };
        self.classes
            .class_of(class)
            .map(Value::Class)
            .ok_or_else(|| unresolved_reference(self.name(class.name)))
    }
}

/// Compound assignment: apply `op`, then narrow back to the target's
/// primitive kind (`E1 op= E2` is `(T)(E1 op E2)`).
fn combine(current: &Value, rhs: Value, op: BinaryOp) -> EvalResult {
    let kind = current.primitive_type();
    let combined = evaluate_binary(current.clone(), rhs, op)?;
    if is_numeric_primitive(kind) && !matches!(combined, Value::Str(_)) {
        if let Some(kind) = kind {
            return coerce_to(combined, kind);
        }
    }
    Ok(combined)
}

fn as_array(value: &Value) -> Result<&ArrayRef, EvalError> {
    match value {
        Value::Array(array) => Ok(array),
        other => Err(not_an_array(&other.type_name())),
    }
}

fn array_len(array: &ArrayRef) -> i32 {
    i32::try_from(array.len()).unwrap_or(i32::MAX)
}
