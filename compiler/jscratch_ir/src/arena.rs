//! Flat storage for syntax nodes.

use crate::{Expr, ExprId, Stmt, StmtId};

/// Arena holding every expression and statement of one source unit.
///
/// Nodes are appended and never removed; IDs stay valid for the arena's
/// lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntaxArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
}

/// Convert an arena length to a `u32` index.
///
/// # Panics
/// Panics if the arena exceeds `u32::MAX` entries.
fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("syntax arena exceeded u32::MAX {what}"))
}

impl SyntaxArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, returning its ID.
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions"));
        self.exprs.push(expr);
        id
    }

    /// Allocate a statement, returning its ID.
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len(), "statements"));
        self.stmts.push(stmt);
        id
    }

    /// # Panics
    /// Panics if `id` was not allocated in this arena.
    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// # Panics
    /// Panics if `id` was not allocated in this arena.
    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    /// Mutable access for late annotation.
    #[inline]
    pub fn expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }
}

/// Shared reference to a finished arena.
///
/// Lambda values carry one so their bodies can be evaluated after the
/// statement that created them has finished.
#[derive(Clone, Debug)]
pub struct SharedArena(std::sync::Arc<SyntaxArena>);

impl SharedArena {
    pub fn new(arena: SyntaxArena) -> Self {
        Self(std::sync::Arc::new(arena))
    }

    /// Whether both handles point at the same arena.
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        std::sync::Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Serializes the arena contents; deserializing allocates a new shared arena.
#[cfg(feature = "serde")]
impl serde::Serialize for SharedArena {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&*self.0, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SharedArena {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <SyntaxArena as serde::Deserialize<'de>>::deserialize(deserializer).map(SharedArena::new)
    }
}

impl std::ops::Deref for SharedArena {
    type Target = SyntaxArena;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExprKind, Literal, Span, StmtKind};

    #[test]
    fn ids_are_sequential() {
        let mut arena = SyntaxArena::new();
        let a = arena.alloc_expr(Expr::new(ExprKind::Literal(Literal::Int(1)), Span::DUMMY));
        let b = arena.alloc_expr(Expr::new(ExprKind::Literal(Literal::Int(2)), Span::DUMMY));
        assert_eq!(a.raw(), 0);
        assert_eq!(b.raw(), 1);
        let s = arena.alloc_stmt(Stmt::new(StmtKind::Expr(b), Span::new(0, 1)));
        assert_eq!(arena.stmt(s).kind, StmtKind::Expr(b));
        assert_eq!(arena.expr_count(), 2);
        assert_eq!(arena.stmt_count(), 1);
    }

    #[test]
    fn shared_arena_derefs() {
        let mut arena = SyntaxArena::new();
        let id = arena.alloc_expr(Expr::new(ExprKind::Literal(Literal::Null), Span::DUMMY));
        let shared = SharedArena::new(arena);
        let other = shared.clone();
        assert!(shared.ptr_eq(&other));
        assert_eq!(other.expr(id).kind, ExprKind::Literal(Literal::Null));
    }
}
