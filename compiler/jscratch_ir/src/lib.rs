//! jscratch IR - syntax tree types for the scratch interpreter.
//!
//! The parser and the semantic resolver live outside this workspace. They
//! hand the interpreter a flat syntax arena whose expression nodes may carry
//! resolver annotations (a [`Declaration`] and a [`ResolvedType`]). This crate
//! defines that boundary:
//!
//! - [`SyntaxArena`]: flat storage for expression and statement nodes
//! - [`ExprKind`] / [`StmtKind`]: the closed set of node kinds
//! - [`Declaration`] and friends: what the resolver attaches to nodes
//! - [`SourceUnit`]: the ordered statement roots of one REPL submission
//! - [`StringInterner`]: interned identifiers shared with the front end
//! - [`AstBuilder`]: convenience constructors for embedders and tests
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: children are `ExprId`/`StmtId` indices, never boxes
//! - **Intern Names**: identifiers are `Name(u32)` handles
//! - **Closed Kinds**: every consumer matches exhaustively, so adding a node
//!   kind is a compile error at every dispatch site
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the arena, every node kind, the
//!   resolver annotations and [`SourceUnit`]. Names serialize as interner
//!   indices, so a unit must be decoded against the interner it was built with.

mod arena;
pub mod ast;
mod build;
mod decl;
mod ids;
mod interner;
mod name;
mod span;
mod unit;

pub use arena::{SharedArena, SyntaxArena};
pub use ast::{
    Allocation, ArrayInit, AssignOp, BinaryOp, Declarator, Expr, ExprKind, LambdaBody, Literal,
    Stmt, StmtKind, UnaryOp, UnsupportedStmt,
};
pub use build::AstBuilder;
pub use decl::{
    ClassDecl, ConstructorDecl, Declaration, FieldDecl, FunctionalShape, MethodDecl, PackageDecl,
    PrimitiveType, ResolvedType, ShapeKind, VariableDecl,
};
pub use ids::{ExprId, StmtId};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
pub use unit::{SemanticError, SourceStatement, SourceUnit};
