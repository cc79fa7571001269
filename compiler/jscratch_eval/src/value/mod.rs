//! Runtime values.
//!
//! Primitives are stored unboxed by kind; reference values (`Array`,
//! `Object`, `Class`, `Lambda`) are shared handles compared by identity.

mod array;
mod host;
mod lambda;

use std::fmt;
use std::rc::Rc;

use jscratch_ir::PrimitiveType;

pub use array::{ArrayRef, ComponentType};
pub use host::{ClassRef, HostClass, HostObject, ObjectRef, PropertyAccess};
pub use lambda::LambdaValue;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    /// Result of `void` calls and statements without a value.
    Void,
    Null,
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(Rc<str>),
    Array(ArrayRef),
    Object(ObjectRef),
    Class(ClassRef),
    /// A package prefix, by qualified name.
    Package(Rc<str>),
    Lambda(Rc<LambdaValue>),
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    /// Default value of a primitive type (`0`, `false`, `'\0'`).
    pub fn zero_of(ty: PrimitiveType) -> Self {
        match ty {
            PrimitiveType::Boolean => Value::Bool(false),
            PrimitiveType::Byte => Value::Byte(0),
            PrimitiveType::Short => Value::Short(0),
            PrimitiveType::Char => Value::Char('\0'),
            PrimitiveType::Int => Value::Int(0),
            PrimitiveType::Long => Value::Long(0),
            PrimitiveType::Float => Value::Float(0.0),
            PrimitiveType::Double => Value::Double(0.0),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The primitive kind of this value, if it is a primitive.
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self {
            Value::Bool(_) => Some(PrimitiveType::Boolean),
            Value::Char(_) => Some(PrimitiveType::Char),
            Value::Byte(_) => Some(PrimitiveType::Byte),
            Value::Short(_) => Some(PrimitiveType::Short),
            Value::Int(_) => Some(PrimitiveType::Int),
            Value::Long(_) => Some(PrimitiveType::Long),
            Value::Float(_) => Some(PrimitiveType::Float),
            Value::Double(_) => Some(PrimitiveType::Double),
            _ => None,
        }
    }

    /// Java-facing type name for error messages.
    pub fn type_name(&self) -> String {
        match self {
            Value::Void => "void".to_string(),
            Value::Null => "null".to_string(),
            Value::Str(_) => "java.lang.String".to_string(),
            Value::Array(array) => array.type_name(),
            Value::Object(object) => object.class_name().to_string(),
            Value::Class(_) => "java.lang.Class".to_string(),
            Value::Package(name) => format!("package {name}"),
            Value::Lambda(lambda) => lambda.target().to_string(),
            primitive => primitive
                .primitive_type()
                .map_or("void", PrimitiveType::keyword)
                .to_string(),
        }
    }

    /// Reference identity for reference values, `false` otherwise.
    pub fn same_reference(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b) || a.name() == b.name(),
            (Value::Lambda(a), Value::Lambda(b)) => Rc::ptr_eq(a, b),
            (Value::Package(a), Value::Package(b)) => a == b,
            _ => false,
        }
    }
}

/// Structural equality for primitives and strings, identity for references.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => self.same_reference(other),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "Void"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Byte(n) => write!(f, "Byte({n})"),
            Value::Short(n) => write!(f, "Short({n})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Long(n) => write!(f, "Long({n})"),
            Value::Float(n) => write!(f, "Float({n:?})"),
            Value::Double(n) => write!(f, "Double({n:?})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Array(array) => write!(f, "Array({array:?})"),
            Value::Object(object) => write!(f, "Object({})", object.display()),
            Value::Class(class) => write!(f, "Class({})", class.name()),
            Value::Package(name) => write!(f, "Package({name})"),
            Value::Lambda(lambda) => write!(f, "Lambda({})", lambda.target()),
        }
    }
}

/// `String.valueOf` rendering.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => Ok(()),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Byte(n) => write!(f, "{n}"),
            Value::Short(n) => write!(f, "{n}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::Float(n) => f.write_str(&java_float(*n)),
            Value::Double(n) => f.write_str(&java_double(*n)),
            Value::Str(s) => f.write_str(s),
            Value::Array(array) => array.write_elements(f, &mut Vec::new(), false),
            Value::Object(object) => f.write_str(&object.display()),
            Value::Class(class) => write!(f, "class {}", class.name()),
            Value::Package(name) => write!(f, "package {name}"),
            Value::Lambda(lambda) => write!(f, "{}$$Lambda", lambda.target()),
        }
    }
}

/// `Double.toString`: plain notation in `[1e-3, 1e7)`, otherwise
/// `d.dddE±n`; always at least one fractional digit.
fn java_double(d: f64) -> String {
    if d.is_nan() {
        return "NaN".to_string();
    }
    if d.is_infinite() {
        return if d > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if d == 0.0 {
        return if d.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }
    if (1e-3..1e7).contains(&d.abs()) {
        plain_with_fraction(format!("{d}"))
    } else {
        scientific(&format!("{d:e}"))
    }
}

/// `Float.toString`, same rules with `f32` precision.
fn java_float(v: f32) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }
    if (1e-3..1e7).contains(&v.abs()) {
        plain_with_fraction(format!("{v}"))
    } else {
        scientific(&format!("{v:e}"))
    }
}

fn plain_with_fraction(mut s: String) -> String {
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

/// Rewrite Rust's `1.5e-5` as Java's `1.5E-5` (and `1e10` as `1.0E10`).
fn scientific(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exponent)) => {
            let mantissa = plain_with_fraction(mantissa.to_string());
            format!("{mantissa}E{exponent}")
        }
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn doubles_render_like_java() {
        assert_eq!(Value::Double(1.0).to_string(), "1.0");
        assert_eq!(Value::Double(3.5).to_string(), "3.5");
        assert_eq!(Value::Double(1e10).to_string(), "1.0E10");
        assert_eq!(Value::Double(1.5e-5).to_string(), "1.5E-5");
        assert_eq!(Value::Double(-0.0).to_string(), "-0.0");
        assert_eq!(Value::Double(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Double(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::Double(1234567.0).to_string(), "1234567.0");
    }

    #[test]
    fn floats_render_like_java() {
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(0.1).to_string(), "0.1");
        assert_eq!(Value::Float(1e8).to_string(), "1.0E8");
    }

    #[test]
    fn scalars_render_like_java() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Char('x').to_string(), "x");
        assert_eq!(Value::Long(-4).to_string(), "-4");
        assert_eq!(Value::str("hi").to_string(), "hi");
        assert_eq!(Value::Void.to_string(), "");
    }

    #[test]
    fn arrays_render_elements() {
        let array = ArrayRef::new(
            ComponentType::Primitive(PrimitiveType::Int),
            vec![Value::Int(1), Value::Int(2)],
        );
        assert_eq!(Value::Array(array).to_string(), "[1, 2]");
    }

    #[test]
    fn self_containing_array_renders_once() {
        let outer = ArrayRef::with_len(ComponentType::Reference("java.lang.Object".into()), 2);
        let inner = ArrayRef::new(
            ComponentType::Reference("java.lang.Object".into()),
            vec![Value::Array(outer.clone()), Value::Int(1)],
        );
        assert!(outer.set(0, Value::Array(outer.clone())));
        assert!(outer.set(1, Value::Array(inner)));
        assert_eq!(Value::Array(outer).to_string(), "[[...], [[...], 1]]");
    }

    #[test]
    fn equality_is_per_kind() {
        assert_eq!(Value::Int(1), Value::Int(1));
        assert_ne!(Value::Int(1), Value::Long(1));
        assert_eq!(Value::str("a"), Value::str("a"));

        let component = ComponentType::Primitive(PrimitiveType::Int);
        let a = ArrayRef::with_len(component.clone(), 1);
        let b = ArrayRef::with_len(component, 1);
        assert_eq!(Value::Array(a.clone()), Value::Array(a.clone()));
        assert_ne!(Value::Array(a), Value::Array(b));
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Int(1).type_name(), "int");
        assert_eq!(Value::str("").type_name(), "java.lang.String");
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Char('a').type_name(), "char");
    }
}
