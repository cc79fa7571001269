//! Evaluation errors.
//!
//! `EvalErrorKind` separates the interpreter's subset limits
//! (`NotImplemented`) from runtime failures and from exceptions thrown by
//! host code. Factory functions populate both `kind` and `message`.

use std::fmt;

use jscratch_ir::Span;

use crate::bridge::HostException;
use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Lookup
    UnresolvedReference {
        name: String,
    },
    NullReceiver {
        member: String,
    },
    MethodNotFound {
        method: String,
        type_name: String,
    },

    // Arrays
    NotAnArray {
        type_name: String,
    },
    IndexOutOfBounds {
        index: i32,
        length: usize,
    },
    NegativeArraySize {
        size: i32,
    },

    // Type/Operator
    TypeMismatch {
        expected: String,
        got: String,
    },
    InvalidOperator {
        op: &'static str,
        type_name: String,
    },
    /// `ArithmeticException` semantics, e.g. integer division by zero.
    Arithmetic {
        message: String,
    },

    // Limits
    LoopLimitExceeded {
        limit: u64,
    },
    FrameLimitExceeded {
        depth: usize,
    },
    Cancelled,

    /// A construct outside the interpreted subset.
    NotImplemented {
        feature: String,
    },

    /// An exception thrown by host code, propagated unmodified.
    Host(HostException),
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedReference { name } => write!(f, "cannot resolve symbol '{name}'"),
            Self::NullReceiver { member } => {
                write!(f, "cannot invoke '{member}' because the receiver is null")
            }
            Self::MethodNotFound { method, type_name } => {
                write!(f, "no method '{method}' on {type_name}")
            }

            Self::NotAnArray { type_name } => write!(f, "{type_name} is not an array"),
            Self::IndexOutOfBounds { index, length } => {
                write!(f, "Index {index} out of bounds for length {length}")
            }
            Self::NegativeArraySize { size } => write!(f, "negative array size: {size}"),

            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::InvalidOperator { op, type_name } => {
                write!(f, "operator '{op}' cannot be applied to {type_name}")
            }
            Self::Arithmetic { message } => write!(f, "{message}"),

            Self::LoopLimitExceeded { limit } => {
                write!(f, "loop exceeded the limit of {limit} iterations")
            }
            Self::FrameLimitExceeded { depth } => {
                write!(f, "lambda nesting exceeded the limit of {depth} frames")
            }
            Self::Cancelled => write!(f, "execution cancelled"),

            Self::NotImplemented { feature } => {
                write!(f, "{feature} is not supported in scratch execution")
            }

            Self::Host(exception) => write!(f, "{exception}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// Node the error was raised at, when known.
    pub span: Option<Span>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
        }
    }

    /// Attach a source span unless one is already set.
    ///
    /// The innermost node wins, so callers can attach unconditionally on the
    /// way out.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() && !span.is_dummy() {
            self.span = Some(span);
        }
        self
    }

    #[inline]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self.kind, EvalErrorKind::NotImplemented { .. })
    }

    #[inline]
    pub fn is_host_exception(&self) -> bool {
        matches!(self.kind, EvalErrorKind::Host(_))
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, EvalErrorKind::Cancelled)
    }

    /// The host exception, if this error carries one.
    pub fn host_exception(&self) -> Option<&HostException> {
        match &self.kind {
            EvalErrorKind::Host(exception) => Some(exception),
            _ => None,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(span) = self.span {
            write!(f, " at {span}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

impl From<HostException> for EvalError {
    fn from(exception: HostException) -> Self {
        host_exception(exception)
    }
}

// Lookup Errors

#[cold]
pub fn unresolved_reference(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnresolvedReference {
        name: name.to_string(),
    })
}

#[cold]
pub fn null_receiver(member: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NullReceiver {
        member: member.to_string(),
    })
}

#[cold]
pub fn method_not_found(method: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MethodNotFound {
        method: method.to_string(),
        type_name: type_name.to_string(),
    })
}

// Array Errors

#[cold]
pub fn not_an_array(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAnArray {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: i32, length: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, length })
}

#[cold]
pub fn negative_array_size(size: i32) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegativeArraySize { size })
}

// Type/Operator Errors

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn invalid_operator(op: &'static str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperator {
        op,
        type_name: type_name.to_string(),
    })
}

/// Integer `/` or `%` by zero.
#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::Arithmetic {
        message: "/ by zero".to_string(),
    })
}

// Limit Errors

#[cold]
pub fn loop_limit_exceeded(limit: u64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::LoopLimitExceeded { limit })
}

#[cold]
pub fn frame_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FrameLimitExceeded { depth })
}

#[cold]
pub fn cancelled() -> EvalError {
    EvalError::from_kind(EvalErrorKind::Cancelled)
}

#[cold]
pub fn not_implemented(feature: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotImplemented {
        feature: feature.to_string(),
    })
}

#[cold]
pub fn host_exception(exception: HostException) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Host(exception))
}
