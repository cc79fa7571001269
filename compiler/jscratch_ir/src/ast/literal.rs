//! Literal values.

use crate::Name;

/// A source literal.
///
/// Floating point payloads are stored as bits so literals stay `Eq + Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    /// `f32::to_bits` of the value.
    Float(u32),
    /// `f64::to_bits` of the value.
    Double(u64),
    Char(char),
    /// Interned string contents.
    Str(Name),
}

impl Literal {
    pub fn float(value: f32) -> Self {
        Literal::Float(value.to_bits())
    }

    pub fn double(value: f64) -> Self {
        Literal::Double(value.to_bits())
    }
}
