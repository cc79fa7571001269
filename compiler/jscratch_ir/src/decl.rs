//! Resolver annotations.
//!
//! The external resolver attaches a [`Declaration`] and a [`ResolvedType`] to
//! expression nodes it understood. Both are optional: the interpreter has a
//! documented fallback for every missing annotation.

use crate::Name;

/// Java primitive types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    /// Java keyword for this type.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Everything except `boolean`.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Boolean)
    }
}

/// A class the resolver identified, by qualified name.
///
/// The runtime class object is obtained from the host's `ClassResolver`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDecl {
    /// Fully qualified name, e.g. `java.lang.Math`.
    pub name: Name,
}

impl ClassDecl {
    pub const fn new(name: Name) -> Self {
        ClassDecl { name }
    }
}

/// Static type attached by the resolver.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolvedType {
    Void,
    Null,
    Primitive(PrimitiveType),
    Class(ClassDecl),
    Array(Box<ResolvedType>),
}

impl ResolvedType {
    /// The primitive type, if this is one.
    #[inline]
    pub fn primitive(&self) -> Option<PrimitiveType> {
        match self {
            Self::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Component type of an array type.
    #[inline]
    pub fn component(&self) -> Option<&ResolvedType> {
        match self {
            Self::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Class of a class type.
    #[inline]
    pub fn class(&self) -> Option<ClassDecl> {
        match self {
            Self::Class(class) => Some(*class),
            _ => None,
        }
    }

    pub fn array_of(component: ResolvedType) -> Self {
        Self::Array(Box::new(component))
    }
}

/// A resolved method.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodDecl {
    pub declaring: ClassDecl,
    pub name: Name,
    pub params: Vec<ResolvedType>,
    pub ret: ResolvedType,
    pub is_static: bool,
}

/// A resolved constructor.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructorDecl {
    pub declaring: ClassDecl,
    pub params: Vec<ResolvedType>,
}

/// A resolved field.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDecl {
    pub declaring: ClassDecl,
    pub name: Name,
    pub ty: ResolvedType,
    pub is_static: bool,
}

/// A resolved local variable.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableDecl {
    pub name: Name,
    pub ty: ResolvedType,
}

/// A resolved package prefix, e.g. `java.util` in `java.util.List`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackageDecl {
    pub name: Name,
}

/// What an identifier, call or allocation refers to.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Declaration {
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Field(FieldDecl),
    Variable(VariableDecl),
    Class(ClassDecl),
    Package(PackageDecl),
}

/// The functional interfaces a lambda may target.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ShapeKind {
    /// One numeric argument, numeric result (`IntUnaryOperator` and friends).
    UnaryNumeric(PrimitiveType),
    /// Two numeric arguments, numeric result (`DoubleBinaryOperator` and friends).
    BinaryNumeric(PrimitiveType),
    /// One argument, no result (`Consumer`, `IntConsumer`, UI event handlers).
    /// The argument is coerced when the interface fixes a primitive type.
    Callback(Option<PrimitiveType>),
}

/// A supported lambda target: its shape and the name of its single method.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionalShape {
    pub kind: ShapeKind,
    pub method: &'static str,
}

impl FunctionalShape {
    /// Look up the shape of a functional interface by qualified name.
    ///
    /// Returns `None` for interfaces the interpreter does not support.
    pub fn for_interface(qualified_name: &str) -> Option<Self> {
        use PrimitiveType::{Double, Int, Long};
        use ShapeKind::{BinaryNumeric, Callback, UnaryNumeric};

        let (kind, method) = match qualified_name {
            "java.util.function.IntUnaryOperator" => (UnaryNumeric(Int), "applyAsInt"),
            "java.util.function.LongUnaryOperator" => (UnaryNumeric(Long), "applyAsLong"),
            "java.util.function.DoubleUnaryOperator" => (UnaryNumeric(Double), "applyAsDouble"),
            "java.util.function.IntBinaryOperator" => (BinaryNumeric(Int), "applyAsInt"),
            "java.util.function.LongBinaryOperator" => (BinaryNumeric(Long), "applyAsLong"),
            "java.util.function.DoubleBinaryOperator" => (BinaryNumeric(Double), "applyAsDouble"),
            "java.util.function.Consumer" => (Callback(None), "accept"),
            "java.util.function.IntConsumer" => (Callback(Some(Int)), "accept"),
            "java.util.function.LongConsumer" => (Callback(Some(Long)), "accept"),
            "java.util.function.DoubleConsumer" => (Callback(Some(Double)), "accept"),
            "javafx.event.EventHandler" => (Callback(None), "handle"),
            _ => return None,
        };
        Some(FunctionalShape { kind, method })
    }

    /// Number of parameters the single method takes.
    pub const fn arity(self) -> usize {
        match self.kind {
            ShapeKind::UnaryNumeric(_) | ShapeKind::Callback(_) => 1,
            ShapeKind::BinaryNumeric(_) => 2,
        }
    }

    /// Primitive type every parameter is coerced to, if fixed.
    pub const fn param_type(self) -> Option<PrimitiveType> {
        match self.kind {
            ShapeKind::UnaryNumeric(p) | ShapeKind::BinaryNumeric(p) => Some(p),
            ShapeKind::Callback(p) => p,
        }
    }

    /// Primitive result type, or `None` for callbacks.
    pub const fn result_type(self) -> Option<PrimitiveType> {
        match self.kind {
            ShapeKind::UnaryNumeric(p) | ShapeKind::BinaryNumeric(p) => Some(p),
            ShapeKind::Callback(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_interfaces_have_shapes() {
        let shape = FunctionalShape::for_interface("java.util.function.IntBinaryOperator");
        assert_eq!(
            shape,
            Some(FunctionalShape {
                kind: ShapeKind::BinaryNumeric(PrimitiveType::Int),
                method: "applyAsInt",
            })
        );
        assert_eq!(shape.map(FunctionalShape::arity), Some(2));
    }

    #[test]
    fn callbacks_have_no_result() {
        let shape = FunctionalShape::for_interface("javafx.event.EventHandler");
        assert_eq!(shape.map(|s| s.method), Some("handle"));
        assert_eq!(shape.and_then(FunctionalShape::result_type), None);
        assert_eq!(shape.map(FunctionalShape::arity), Some(1));
    }

    #[test]
    fn unsupported_interfaces_have_no_shape() {
        assert!(FunctionalShape::for_interface("java.util.function.Supplier").is_none());
        assert!(FunctionalShape::for_interface("java.lang.Runnable").is_none());
    }

    #[test]
    fn resolved_type_accessors() {
        let ty = ResolvedType::array_of(ResolvedType::Primitive(PrimitiveType::Int));
        assert_eq!(
            ty.component().and_then(ResolvedType::primitive),
            Some(PrimitiveType::Int)
        );
        assert!(ty.primitive().is_none());
        assert!(ty.class().is_none());
    }
}
