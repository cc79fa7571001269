//! Binary operator implementations for the evaluator.
//!
//! Direct enum-based dispatch over the fixed set of Java operand kinds.
//! `&&` and `||` short-circuit in the interpreter; when both operands are
//! already evaluated they are handled here like the eager `&`/`|`.

#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    reason = "shift distances are masked and unsigned shift reinterprets the bit pattern"
)]

use jscratch_ir::BinaryOp;

use crate::coerce::{promote, Numeric, Promoted};
use crate::errors::{division_by_zero, invalid_operator, type_mismatch, EvalError, EvalResult};
use crate::value::Value;

/// Evaluate a binary operation on two evaluated operands.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        // String concatenation wins for `+` when either side is a string.
        BinaryOp::Add if is_textual(&left) || is_textual(&right) => {
            Ok(Value::Str(format!("{left}{right}").into()))
        }

        BinaryOp::Eq => Ok(Value::Bool(values_equal(&left, &right))),
        BinaryOp::NotEq => Ok(Value::Bool(!values_equal(&left, &right))),

        BinaryOp::And | BinaryOp::Or | BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor
            if left.as_bool().is_some() || right.as_bool().is_some() =>
        {
            eval_boolean(&left, &right, op)
        }

        _ => eval_numeric(&left, &right, op),
    }
}

#[inline]
fn is_textual(value: &Value) -> bool {
    matches!(value, Value::Str(_))
}

/// `==` semantics: numerics by promoted value, strings by content,
/// references by identity.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    if let (Some(a), Some(b)) = (Numeric::of(left), Numeric::of(right)) {
        return numeric_equal(promote(a, b));
    }
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        _ => left.same_reference(right),
    }
}

#[expect(clippy::float_cmp, reason = "Java == compares floats exactly")]
fn numeric_equal(operands: Promoted) -> bool {
    match operands {
        Promoted::Int(a, b) => a == b,
        Promoted::Long(a, b) => a == b,
        Promoted::Float(a, b) => a == b,
        Promoted::Double(a, b) => a == b,
    }
}

fn eval_boolean(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let (Some(a), Some(b)) = (left.as_bool(), right.as_bool()) else {
        let culprit = if left.as_bool().is_some() { right } else { left };
        return Err(invalid_operator(op.as_symbol(), &culprit.type_name()));
    };
    let result = match op {
        BinaryOp::And | BinaryOp::BitAnd => a & b,
        BinaryOp::Or | BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        _ => return Err(invalid_operator(op.as_symbol(), "boolean")),
    };
    Ok(Value::Bool(result))
}

fn eval_numeric(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let Some(a) = Numeric::of(left) else {
        return Err(invalid_operator(op.as_symbol(), &left.type_name()));
    };
    let Some(b) = Numeric::of(right) else {
        return Err(invalid_operator(op.as_symbol(), &right.type_name()));
    };

    // Shifts promote each operand on its own; the result has the left kind.
    if op.is_shift() {
        return eval_shift(a, b, op);
    }

    match promote(a, b) {
        Promoted::Int(a, b) => eval_int(a, b, op),
        Promoted::Long(a, b) => eval_long(a, b, op),
        Promoted::Float(a, b) => eval_float(a, b, op),
        Promoted::Double(a, b) => eval_double(a, b, op),
    }
}

fn eval_int(a: i32, b: i32, op: BinaryOp) -> EvalResult {
    let value = match op {
        BinaryOp::Add => Value::Int(a.wrapping_add(b)),
        BinaryOp::Sub => Value::Int(a.wrapping_sub(b)),
        BinaryOp::Mul => Value::Int(a.wrapping_mul(b)),
        BinaryOp::Div => {
            if b == 0 {
                return Err(division_by_zero());
            }
            Value::Int(a.wrapping_div(b))
        }
        BinaryOp::Rem => {
            if b == 0 {
                return Err(division_by_zero());
            }
            Value::Int(a.wrapping_rem(b))
        }
        BinaryOp::BitAnd => Value::Int(a & b),
        BinaryOp::BitOr => Value::Int(a | b),
        BinaryOp::BitXor => Value::Int(a ^ b),
        _ => return compare(a.cmp(&b), op, "int"),
    };
    Ok(value)
}

fn eval_long(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    let value = match op {
        BinaryOp::Add => Value::Long(a.wrapping_add(b)),
        BinaryOp::Sub => Value::Long(a.wrapping_sub(b)),
        BinaryOp::Mul => Value::Long(a.wrapping_mul(b)),
        BinaryOp::Div => {
            if b == 0 {
                return Err(division_by_zero());
            }
            Value::Long(a.wrapping_div(b))
        }
        BinaryOp::Rem => {
            if b == 0 {
                return Err(division_by_zero());
            }
            Value::Long(a.wrapping_rem(b))
        }
        BinaryOp::BitAnd => Value::Long(a & b),
        BinaryOp::BitOr => Value::Long(a | b),
        BinaryOp::BitXor => Value::Long(a ^ b),
        _ => return compare(a.cmp(&b), op, "long"),
    };
    Ok(value)
}

fn eval_float(a: f32, b: f32, op: BinaryOp) -> EvalResult {
    let value = match op {
        BinaryOp::Add => Value::Float(a + b),
        BinaryOp::Sub => Value::Float(a - b),
        BinaryOp::Mul => Value::Float(a * b),
        BinaryOp::Div => Value::Float(a / b),
        BinaryOp::Rem => Value::Float(a % b),
        _ => return compare_float(a.partial_cmp(&b), op, "float"),
    };
    Ok(value)
}

fn eval_double(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    let value = match op {
        BinaryOp::Add => Value::Double(a + b),
        BinaryOp::Sub => Value::Double(a - b),
        BinaryOp::Mul => Value::Double(a * b),
        BinaryOp::Div => Value::Double(a / b),
        BinaryOp::Rem => Value::Double(a % b),
        _ => return compare_float(a.partial_cmp(&b), op, "double"),
    };
    Ok(value)
}

fn compare(ordering: std::cmp::Ordering, op: BinaryOp, type_name: &str) -> EvalResult {
    use std::cmp::Ordering::{Greater, Less};
    let result = match op {
        BinaryOp::Lt => ordering == Less,
        BinaryOp::LtEq => ordering != Greater,
        BinaryOp::Gt => ordering == Greater,
        BinaryOp::GtEq => ordering != Less,
        _ => return Err(invalid_operator(op.as_symbol(), type_name)),
    };
    Ok(Value::Bool(result))
}

/// Relational comparison where NaN compares false against everything.
fn compare_float(
    ordering: Option<std::cmp::Ordering>,
    op: BinaryOp,
    type_name: &str,
) -> EvalResult {
    match ordering {
        Some(ordering) => compare(ordering, op, type_name),
        None if op.is_relational() => Ok(Value::Bool(false)),
        None => Err(invalid_operator(op.as_symbol(), type_name)),
    }
}

fn eval_shift(value: Numeric, distance: Numeric, op: BinaryOp) -> EvalResult {
    if !value.is_integral() {
        return Err(invalid_operator(op.as_symbol(), kind_name(value)));
    }
    if !distance.is_integral() {
        return Err(invalid_operator(op.as_symbol(), kind_name(distance)));
    }
    let distance = distance.to_i64();
    let result = match value {
        Numeric::Int(n) => {
            // Only the low five bits of the distance count.
            let s = (distance & 0x1f) as u32;
            Value::Int(match op {
                BinaryOp::Shl => n.wrapping_shl(s),
                BinaryOp::Shr => n.wrapping_shr(s),
                _ => (n as u32).wrapping_shr(s) as i32,
            })
        }
        Numeric::Long(n) => {
            let s = (distance & 0x3f) as u32;
            Value::Long(match op {
                BinaryOp::Shl => n.wrapping_shl(s),
                BinaryOp::Shr => n.wrapping_shr(s),
                _ => (n as u64).wrapping_shr(s) as i64,
            })
        }
        Numeric::Float(_) | Numeric::Double(_) => {
            return Err(invalid_operator(op.as_symbol(), kind_name(value)));
        }
    };
    Ok(result)
}

fn kind_name(n: Numeric) -> &'static str {
    match n {
        Numeric::Int(_) => "int",
        Numeric::Long(_) => "long",
        Numeric::Float(_) => "float",
        Numeric::Double(_) => "double",
    }
}

/// A boolean operand, or a type mismatch naming where one was required.
pub(crate) fn require_bool(value: &Value, context: &str) -> Result<bool, EvalError> {
    value
        .as_bool()
        .ok_or_else(|| type_mismatch(&format!("boolean {context}"), &value.type_name()))
}
