//! Numeric promotion and primitive conversion.
//!
//! Conversions follow Java casting semantics: narrowing truncates, float to
//! integral saturates with NaN mapping to zero.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    reason = "Java primitive conversions are defined as these casts"
)]

use jscratch_ir::{PrimitiveType, ResolvedType};

use crate::errors::{type_mismatch, EvalError};
use crate::value::Value;

/// A numeric operand after unary promotion (`byte`, `short`, `char` → `int`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Numeric {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Numeric {
    /// `None` for non-numeric values (booleans, references, strings).
    pub(crate) fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Char(c) => Some(Numeric::Int(char_code(*c))),
            Value::Byte(n) => Some(Numeric::Int(i32::from(*n))),
            Value::Short(n) => Some(Numeric::Int(i32::from(*n))),
            Value::Int(n) => Some(Numeric::Int(*n)),
            Value::Long(n) => Some(Numeric::Long(*n)),
            Value::Float(n) => Some(Numeric::Float(*n)),
            Value::Double(n) => Some(Numeric::Double(*n)),
            _ => None,
        }
    }

    pub(crate) fn to_i64(self) -> i64 {
        match self {
            Numeric::Int(n) => i64::from(n),
            Numeric::Long(n) => n,
            Numeric::Float(n) => n as i64,
            Numeric::Double(n) => n as i64,
        }
    }

    pub(crate) fn to_f32(self) -> f32 {
        match self {
            Numeric::Int(n) => n as f32,
            Numeric::Long(n) => n as f32,
            Numeric::Float(n) => n,
            Numeric::Double(n) => n as f32,
        }
    }

    pub(crate) fn to_f64(self) -> f64 {
        match self {
            Numeric::Int(n) => f64::from(n),
            Numeric::Long(n) => n as f64,
            Numeric::Float(n) => f64::from(n),
            Numeric::Double(n) => n,
        }
    }

    /// Convert to `int`, truncating like a Java `(int)` cast.
    pub(crate) fn to_i32(self) -> i32 {
        match self {
            Numeric::Int(n) => n,
            Numeric::Long(n) => n as i32,
            Numeric::Float(n) => n as i32,
            Numeric::Double(n) => n as i32,
        }
    }

    pub(crate) fn into_value(self) -> Value {
        match self {
            Numeric::Int(n) => Value::Int(n),
            Numeric::Long(n) => Value::Long(n),
            Numeric::Float(n) => Value::Float(n),
            Numeric::Double(n) => Value::Double(n),
        }
    }

    pub(crate) fn is_integral(self) -> bool {
        matches!(self, Numeric::Int(_) | Numeric::Long(_))
    }
}

/// Both operands widened to their common kind (double > float > long > int).
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Promoted {
    Int(i32, i32),
    Long(i64, i64),
    Float(f32, f32),
    Double(f64, f64),
}

/// Binary numeric promotion.
pub(crate) fn promote(left: Numeric, right: Numeric) -> Promoted {
    use Numeric::{Double, Float, Int, Long};
    match (left, right) {
        (Double(_), _) | (_, Double(_)) => Promoted::Double(left.to_f64(), right.to_f64()),
        (Float(_), _) | (_, Float(_)) => Promoted::Float(left.to_f32(), right.to_f32()),
        (Long(_), _) | (_, Long(_)) => Promoted::Long(left.to_i64(), right.to_i64()),
        (Int(a), Int(b)) => Promoted::Int(a, b),
    }
}

/// UTF-16 code unit of a char; supplementary characters keep their low 16 bits.
#[inline]
pub(crate) fn char_code(c: char) -> i32 {
    i32::from(u32::from(c) as u16)
}

/// The char for a UTF-16 code unit; lone surrogates map to U+FFFD.
pub(crate) fn char_from_code(code: i64) -> char {
    char::from_u32(u32::from(code as u16)).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Convert `value` to the primitive type `ty`.
///
/// Numeric values (including `char`) convert between all numeric types;
/// `boolean` only accepts booleans. Anything else is a type mismatch.
pub fn coerce_to(value: Value, ty: PrimitiveType) -> Result<Value, EvalError> {
    if ty == PrimitiveType::Boolean {
        return match value {
            Value::Bool(_) => Ok(value),
            other => Err(type_mismatch("boolean", &other.type_name())),
        };
    }
    let Some(n) = Numeric::of(&value) else {
        return Err(type_mismatch(ty.keyword(), &value.type_name()));
    };
    Ok(match ty {
        PrimitiveType::Byte => Value::Byte(n.to_i32() as i8),
        PrimitiveType::Short => Value::Short(n.to_i32() as i16),
        PrimitiveType::Char => Value::Char(char_from_code(i64::from(n.to_i32()))),
        PrimitiveType::Int => Value::Int(n.to_i32()),
        PrimitiveType::Long => Value::Long(n.to_i64()),
        PrimitiveType::Float => Value::Float(n.to_f32()),
        PrimitiveType::Double => Value::Double(n.to_f64()),
        PrimitiveType::Boolean => value,
    })
}

/// Convert to a declared type: primitives are coerced, references pass
/// through unchanged.
pub fn coerce_to_type(value: Value, ty: &ResolvedType) -> Result<Value, EvalError> {
    match ty.primitive() {
        Some(primitive) => coerce_to(value, primitive),
        None => Ok(value),
    }
}

/// Convert an array index or dimension to `int`.
pub(crate) fn to_index(value: &Value) -> Result<i32, EvalError> {
    match Numeric::of(value) {
        Some(n) if n.is_integral() => Ok(n.to_i32()),
        _ => Err(type_mismatch("int", &value.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn promotion_priority() {
        assert_eq!(
            promote(Numeric::Int(1), Numeric::Long(2)),
            Promoted::Long(1, 2)
        );
        assert_eq!(
            promote(Numeric::Long(1), Numeric::Float(2.0)),
            Promoted::Float(1.0, 2.0)
        );
        assert_eq!(
            promote(Numeric::Float(1.0), Numeric::Double(2.0)),
            Promoted::Double(1.0, 2.0)
        );
    }

    #[test]
    fn small_types_promote_to_int() {
        assert_eq!(Numeric::of(&Value::Char('A')), Some(Numeric::Int(65)));
        assert_eq!(Numeric::of(&Value::Byte(-3)), Some(Numeric::Int(-3)));
        assert_eq!(Numeric::of(&Value::Bool(true)), None);
    }

    #[test]
    fn narrowing_truncates() {
        assert_eq!(
            coerce_to(Value::Int(300), PrimitiveType::Byte).unwrap(),
            Value::Byte(44)
        );
        assert_eq!(
            coerce_to(Value::Double(3.9), PrimitiveType::Int).unwrap(),
            Value::Int(3)
        );
        assert_eq!(
            coerce_to(Value::Double(f64::NAN), PrimitiveType::Long).unwrap(),
            Value::Long(0)
        );
        assert_eq!(
            coerce_to(Value::Int(66), PrimitiveType::Char).unwrap(),
            Value::Char('B')
        );
    }

    #[test]
    fn widening_to_double() {
        assert_eq!(
            coerce_to(Value::Int(1), PrimitiveType::Double).unwrap(),
            Value::Double(1.0)
        );
    }

    #[test]
    fn boolean_rejects_numbers() {
        assert!(coerce_to(Value::Int(1), PrimitiveType::Boolean).is_err());
        assert!(coerce_to(Value::str("1"), PrimitiveType::Int).is_err());
    }

    #[test]
    fn indexes_must_be_integral() {
        assert_eq!(to_index(&Value::Char('\u{2}')).unwrap(), 2);
        assert!(to_index(&Value::Double(1.0)).is_err());
    }
}
