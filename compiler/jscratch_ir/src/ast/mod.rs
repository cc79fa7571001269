//! AST Node Types
//!
//! Expression and statement nodes stored in the flat syntax arena.

mod expr;
mod literal;
mod operators;
mod stmt;

pub use expr::{Allocation, ArrayInit, Expr, ExprKind, LambdaBody};
pub use literal::Literal;
pub use operators::{AssignOp, BinaryOp, UnaryOp};
pub use stmt::{Declarator, Stmt, StmtKind, UnsupportedStmt};

#[cfg(test)]
mod tests;
