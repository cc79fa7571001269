//! Unary operator implementations for the evaluator.
//!
//! Increment and decrement need a variable to write back to, so the
//! interpreter handles them; [`step_value`] computes the stepped value.

use jscratch_ir::UnaryOp;

use crate::coerce::{char_code, char_from_code, Numeric};
use crate::errors::{invalid_operator, EvalResult};
use crate::value::Value;

/// Evaluate `-x`, `+x`, `!x` or `~x`.
pub fn evaluate_unary(value: Value, op: UnaryOp) -> EvalResult {
    match (op, Numeric::of(&value)) {
        (UnaryOp::Not, _) => match value {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            other => Err(invalid_operator(op.as_symbol(), &other.type_name())),
        },

        // Unary numeric promotion: byte, short and char become int.
        (UnaryOp::Plus, Some(n)) => Ok(n.into_value()),
        (UnaryOp::Neg, Some(n)) => Ok(match n {
            Numeric::Int(n) => Value::Int(n.wrapping_neg()),
            Numeric::Long(n) => Value::Long(n.wrapping_neg()),
            Numeric::Float(n) => Value::Float(-n),
            Numeric::Double(n) => Value::Double(-n),
        }),
        (UnaryOp::BitNot, Some(Numeric::Int(n))) => Ok(Value::Int(!n)),
        (UnaryOp::BitNot, Some(Numeric::Long(n))) => Ok(Value::Long(!n)),

        _ => Err(invalid_operator(op.as_symbol(), &value.type_name())),
    }
}

/// `value + 1` or `value - 1`, keeping the kind of `value` (so `byte` and
/// `char` wrap within their own range).
pub fn step_value(value: &Value, increment: bool) -> EvalResult {
    let delta: i8 = if increment { 1 } else { -1 };
    let stepped = match value {
        Value::Byte(n) => Value::Byte(n.wrapping_add(delta)),
        Value::Short(n) => Value::Short(n.wrapping_add(i16::from(delta))),
        Value::Char(c) => Value::Char(char_from_code(i64::from(
            char_code(*c).wrapping_add(i32::from(delta)),
        ))),
        Value::Int(n) => Value::Int(n.wrapping_add(i32::from(delta))),
        Value::Long(n) => Value::Long(n.wrapping_add(i64::from(delta))),
        Value::Float(n) => Value::Float(n + f32::from(delta)),
        Value::Double(n) => Value::Double(n + f64::from(delta)),
        other => {
            let symbol = if increment { "++" } else { "--" };
            return Err(invalid_operator(symbol, &other.type_name()));
        }
    };
    Ok(stepped)
}
