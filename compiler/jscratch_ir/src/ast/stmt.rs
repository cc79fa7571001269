//! Statement Types

use std::fmt;

use crate::{ExprId, Name, ResolvedType, Span, StmtId};

/// Statement node.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    Block(Vec<StmtId>),

    Expr(ExprId),

    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },

    While { cond: ExprId, body: StmtId },

    DoWhile { body: StmtId, cond: ExprId },

    /// `for (init; cond; update) body`. A missing condition loops forever.
    For {
        init: Vec<StmtId>,
        cond: Option<ExprId>,
        update: Vec<ExprId>,
        body: StmtId,
    },

    /// `for (ty var : iterable) body`
    ForEach {
        var: Name,
        ty: ResolvedType,
        iterable: ExprId,
        body: StmtId,
    },

    /// `ty a = 1, b;`
    VarDecl {
        ty: ResolvedType,
        declarators: Vec<Declarator>,
    },

    Return(Option<ExprId>),

    Break,

    /// `synchronized (lock) body`
    Synchronized { lock: ExprId, body: StmtId },

    /// A statement form the interpreter refuses to run.
    Unsupported(UnsupportedStmt),
}

/// One `name = init` in a variable declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declarator {
    pub name: Name,
    pub init: Option<ExprId>,
}

/// Statement forms outside the interpreted subset.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnsupportedStmt {
    Assert,
    Switch,
    Try,
    Throw,
    Labeled,
    Continue,
    ClassDecl,
    ConstructorCall,
}

impl UnsupportedStmt {
    /// Human-readable name used in `NotImplemented` messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assert => "assert",
            Self::Switch => "switch",
            Self::Try => "try",
            Self::Throw => "throw",
            Self::Labeled => "labeled statement",
            Self::Continue => "continue",
            Self::ClassDecl => "class declaration",
            Self::ConstructorCall => "constructor call",
        }
    }
}
