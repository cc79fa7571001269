//! Expression Types
//!
//! Expression nodes live in the [`SyntaxArena`](crate::SyntaxArena); children
//! are referenced by [`ExprId`] / [`StmtId`].

use std::fmt;

use super::{AssignOp, BinaryOp, Literal, UnaryOp};
use crate::{ClassDecl, Declaration, ExprId, Name, ResolvedType, Span, StmtId};

/// Expression node.
///
/// `decl` and `ty` are resolver annotations; either may be missing.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub decl: Option<Declaration>,
    pub ty: Option<ResolvedType>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            decl: None,
            ty: None,
        }
    }

    #[must_use]
    pub fn with_decl(mut self, decl: Declaration) -> Self {
        self.decl = Some(decl);
        self
    }

    #[must_use]
    pub fn with_type(mut self, ty: ResolvedType) -> Self {
        self.ty = Some(ty);
        self
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    Literal(Literal),

    /// Bare identifier, including `this` and `length`.
    Ident(Name),

    /// `name(args)`. The receiver is the ambient `this`, or the previous
    /// segment when the call is part of a [`ExprKind::Chain`].
    MethodCall { name: Name, args: Vec<ExprId> },

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    Unary { op: UnaryOp, operand: ExprId },

    /// `cond ? then_expr : else_expr`
    Ternary {
        cond: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    },

    /// `target op= value`. Targets are identifiers or index expressions.
    Assign {
        op: AssignOp,
        target: ExprId,
        value: ExprId,
    },

    /// `array[index]`
    Index { array: ExprId, index: ExprId },

    /// `a.b.c`: segments folded left to right, each evaluated with the
    /// previous result as receiver.
    Chain(Vec<ExprId>),

    /// `new T[..]` or `new C(args)`
    Alloc(Allocation),

    /// `(params) -> body`. The target interface is the node's resolved type.
    Lambda { params: Vec<Name>, body: LambdaBody },

    /// A type used as a value, e.g. `String.class` or the `Math` in
    /// `Math.abs(x)`. The type is the node's resolved type.
    TypeRef,
}

/// Allocation forms.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Allocation {
    /// `new T[] { .. }` or `new T[n]`. `component` is the element type.
    Array {
        component: ResolvedType,
        init: ArrayInit,
    },
    /// `new C(args)`. Non-empty argument lists need a resolved constructor.
    Object { class: ClassDecl, args: Vec<ExprId> },
}

/// How an array allocation gets its elements.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrayInit {
    Elements(Vec<ExprId>),
    Dimension(ExprId),
}

/// A lambda body.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LambdaBody {
    Expr(ExprId),
    Block(StmtId),
}
