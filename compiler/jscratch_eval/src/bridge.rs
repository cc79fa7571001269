//! Boundary to the host runtime.
//!
//! The interpreter never performs reflection itself. Resolved calls go
//! through [`HostBridge`]; resolved classes are turned into runtime class
//! objects by a [`ClassResolver`].

use jscratch_ir::{ClassDecl, ConstructorDecl, MethodDecl};

use crate::value::{ClassRef, Value};

/// An exception thrown by host code.
///
/// Carried through evaluation unmodified and rendered the way
/// `Throwable.toString()` renders it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{class_name}: {message}")]
pub struct HostException {
    /// Qualified exception class, e.g. `java.lang.IllegalArgumentException`.
    pub class_name: String,
    pub message: String,
}

impl HostException {
    pub fn new(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        HostException {
            class_name: class_name.into(),
            message: message.into(),
        }
    }
}

/// Invocation of resolved methods and constructors.
///
/// Arguments arrive already evaluated, left to right. For static methods the
/// receiver is whatever the call was evaluated against (often a
/// [`Value::Class`] or `Value::Null`) and should be ignored.
pub trait HostBridge {
    fn invoke_method(
        &self,
        decl: &MethodDecl,
        receiver: &Value,
        args: Vec<Value>,
    ) -> Result<Value, HostException>;

    fn invoke_constructor(
        &self,
        decl: &ConstructorDecl,
        args: Vec<Value>,
    ) -> Result<Value, HostException>;
}

/// Maps resolver class declarations to runtime class objects.
pub trait ClassResolver {
    /// `None` when the host does not know the class.
    fn class_of(&self, decl: ClassDecl) -> Option<ClassRef>;
}

/// Stand-in host for interpreters built without one.
pub(crate) struct NoHost;

pub(crate) static NO_HOST: NoHost = NoHost;

impl NoHost {
    fn unsupported() -> HostException {
        HostException::new(
            "java.lang.UnsupportedOperationException",
            "no host runtime attached",
        )
    }
}

impl HostBridge for NoHost {
    fn invoke_method(
        &self,
        _decl: &MethodDecl,
        _receiver: &Value,
        _args: Vec<Value>,
    ) -> Result<Value, HostException> {
        Err(Self::unsupported())
    }

    fn invoke_constructor(
        &self,
        _decl: &ConstructorDecl,
        _args: Vec<Value>,
    ) -> Result<Value, HostException> {
        Err(Self::unsupported())
    }
}

impl ClassResolver for NoHost {
    fn class_of(&self, _decl: ClassDecl) -> Option<ClassRef> {
        None
    }
}
