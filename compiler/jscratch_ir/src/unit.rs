//! One REPL submission: ordered statement roots plus resolver diagnostics.

use crate::{SharedArena, Span, StmtId};

/// A diagnostic the resolver attached to a statement.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SemanticError {
    pub message: String,
    pub span: Span,
}

impl SemanticError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        SemanticError {
            message: message.into(),
            span,
        }
    }
}

/// A top-level statement and any errors the resolver found in it.
///
/// Statements with errors are skipped and reported rather than executed.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceStatement {
    pub root: StmtId,
    pub errors: Vec<SemanticError>,
}

impl SourceStatement {
    pub fn new(root: StmtId) -> Self {
        SourceStatement {
            root,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: SemanticError) -> Self {
        self.errors.push(error);
        self
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// The statements of one submission, in source order.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceUnit {
    pub arena: SharedArena,
    pub statements: Vec<SourceStatement>,
}

impl SourceUnit {
    pub fn new(arena: SharedArena, statements: Vec<SourceStatement>) -> Self {
        SourceUnit { arena, statements }
    }

    /// A unit whose statements carry no errors.
    pub fn from_roots(arena: SharedArena, roots: impl IntoIterator<Item = StmtId>) -> Self {
        SourceUnit {
            arena,
            statements: roots.into_iter().map(SourceStatement::new).collect(),
        }
    }
}
