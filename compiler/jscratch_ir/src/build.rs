//! Convenience constructors for syntax trees.
//!
//! Embedders that translate a foreign syntax tree, and tests, use the builder
//! instead of pushing raw nodes. Every method takes `&self` so calls nest:
//! `b.binary(b.int(1), BinaryOp::Add, b.int(2))`.

use std::cell::RefCell;

use crate::{
    Allocation, ArrayInit, AssignOp, BinaryOp, ClassDecl, ConstructorDecl, Declaration,
    Declarator, Expr, ExprId, ExprKind, FieldDecl, LambdaBody, Literal, MethodDecl, Name,
    PackageDecl, ResolvedType, SharedArena, SharedInterner, Span, Stmt, StmtId, StmtKind,
    SyntaxArena, UnaryOp, UnsupportedStmt, VariableDecl,
};

/// Incremental builder over a [`SyntaxArena`].
pub struct AstBuilder {
    arena: RefCell<SyntaxArena>,
    interner: SharedInterner,
}

impl AstBuilder {
    pub fn new(interner: SharedInterner) -> Self {
        AstBuilder {
            arena: RefCell::new(SyntaxArena::new()),
            interner,
        }
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Freeze the arena for evaluation.
    pub fn finish(self) -> SharedArena {
        SharedArena::new(self.arena.into_inner())
    }

    // Expressions

    /// Push a fully formed expression node.
    pub fn expr(&self, expr: Expr) -> ExprId {
        self.arena.borrow_mut().alloc_expr(expr)
    }

    fn push(&self, kind: ExprKind) -> ExprId {
        self.expr(Expr::new(kind, Span::DUMMY))
    }

    /// Attach a declaration to an existing node.
    pub fn annotate(&self, id: ExprId, decl: Declaration) -> ExprId {
        self.arena.borrow_mut().expr_mut(id).decl = Some(decl);
        id
    }

    /// Attach a resolved type to an existing node.
    pub fn typed(&self, id: ExprId, ty: ResolvedType) -> ExprId {
        self.arena.borrow_mut().expr_mut(id).ty = Some(ty);
        id
    }

    pub fn literal(&self, lit: Literal) -> ExprId {
        self.push(ExprKind::Literal(lit))
    }

    pub fn int(&self, value: i32) -> ExprId {
        self.literal(Literal::Int(value))
    }

    pub fn long(&self, value: i64) -> ExprId {
        self.literal(Literal::Long(value))
    }

    pub fn float(&self, value: f32) -> ExprId {
        self.literal(Literal::float(value))
    }

    pub fn double(&self, value: f64) -> ExprId {
        self.literal(Literal::double(value))
    }

    pub fn boolean(&self, value: bool) -> ExprId {
        self.literal(Literal::Bool(value))
    }

    pub fn char(&self, value: char) -> ExprId {
        self.literal(Literal::Char(value))
    }

    pub fn str(&self, value: &str) -> ExprId {
        let name = self.name(value);
        self.literal(Literal::Str(name))
    }

    pub fn null(&self) -> ExprId {
        self.literal(Literal::Null)
    }

    pub fn ident(&self, name: &str) -> ExprId {
        let name = self.name(name);
        self.push(ExprKind::Ident(name))
    }

    pub fn this(&self) -> ExprId {
        self.push(ExprKind::Ident(Name::THIS))
    }

    pub fn binary(&self, left: ExprId, op: BinaryOp, right: ExprId) -> ExprId {
        self.push(ExprKind::Binary { op, left, right })
    }

    pub fn unary(&self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.push(ExprKind::Unary { op, operand })
    }

    pub fn ternary(&self, cond: ExprId, then_expr: ExprId, else_expr: ExprId) -> ExprId {
        self.push(ExprKind::Ternary {
            cond,
            then_expr,
            else_expr,
        })
    }

    pub fn assign(&self, target: ExprId, op: AssignOp, value: ExprId) -> ExprId {
        self.push(ExprKind::Assign { op, target, value })
    }

    pub fn index(&self, array: ExprId, index: ExprId) -> ExprId {
        self.push(ExprKind::Index { array, index })
    }

    /// An unresolved call; annotate it with [`AstBuilder::method_decl`] to
    /// route it through the host bridge.
    pub fn call(&self, name: &str, args: impl IntoIterator<Item = ExprId>) -> ExprId {
        let name = self.name(name);
        self.push(ExprKind::MethodCall {
            name,
            args: args.into_iter().collect(),
        })
    }

    pub fn chain(&self, segments: impl IntoIterator<Item = ExprId>) -> ExprId {
        self.push(ExprKind::Chain(segments.into_iter().collect()))
    }

    /// `new T[] { elements }`
    pub fn new_array(
        &self,
        component: ResolvedType,
        elements: impl IntoIterator<Item = ExprId>,
    ) -> ExprId {
        let ty = ResolvedType::array_of(component.clone());
        let id = self.push(ExprKind::Alloc(Allocation::Array {
            component,
            init: ArrayInit::Elements(elements.into_iter().collect()),
        }));
        self.typed(id, ty)
    }

    /// `new T[dimension]`
    pub fn new_array_sized(&self, component: ResolvedType, dimension: ExprId) -> ExprId {
        let ty = ResolvedType::array_of(component.clone());
        let id = self.push(ExprKind::Alloc(Allocation::Array {
            component,
            init: ArrayInit::Dimension(dimension),
        }));
        self.typed(id, ty)
    }

    /// `new C(args)`
    pub fn new_object(&self, class: ClassDecl, args: impl IntoIterator<Item = ExprId>) -> ExprId {
        let id = self.push(ExprKind::Alloc(Allocation::Object {
            class,
            args: args.into_iter().collect(),
        }));
        self.typed(id, ResolvedType::Class(class))
    }

    /// `(params) -> body` targeting the interface named `target`.
    pub fn lambda(&self, params: &[&str], body: LambdaBody, target: &str) -> ExprId {
        let params = params.iter().map(|p| self.name(p)).collect();
        let id = self.push(ExprKind::Lambda { params, body });
        let target = self.class(target);
        self.typed(id, ResolvedType::Class(target))
    }

    pub fn type_ref(&self, ty: ResolvedType) -> ExprId {
        let id = self.push(ExprKind::TypeRef);
        self.typed(id, ty)
    }

    // Declarations

    pub fn class(&self, qualified_name: &str) -> ClassDecl {
        ClassDecl::new(self.name(qualified_name))
    }

    pub fn class_type(&self, qualified_name: &str) -> ResolvedType {
        ResolvedType::Class(self.class(qualified_name))
    }

    /// An identifier resolved to a class, e.g. `Math` in `Math.max(a, b)`.
    pub fn class_ident(&self, simple_name: &str, qualified_name: &str) -> ExprId {
        let id = self.ident(simple_name);
        let class = self.class(qualified_name);
        self.annotate(id, Declaration::Class(class))
    }

    /// An identifier resolved to a package prefix.
    pub fn package_ident(&self, simple_name: &str, qualified_name: &str) -> ExprId {
        let id = self.ident(simple_name);
        let name = self.name(qualified_name);
        self.annotate(id, Declaration::Package(PackageDecl { name }))
    }

    pub fn method_decl(
        &self,
        declaring: &str,
        name: &str,
        params: Vec<ResolvedType>,
        ret: ResolvedType,
        is_static: bool,
    ) -> Declaration {
        Declaration::Method(MethodDecl {
            declaring: self.class(declaring),
            name: self.name(name),
            params,
            ret,
            is_static,
        })
    }

    pub fn constructor_decl(&self, declaring: &str, params: Vec<ResolvedType>) -> Declaration {
        Declaration::Constructor(ConstructorDecl {
            declaring: self.class(declaring),
            params,
        })
    }

    pub fn field_decl(
        &self,
        declaring: &str,
        name: &str,
        ty: ResolvedType,
        is_static: bool,
    ) -> Declaration {
        Declaration::Field(FieldDecl {
            declaring: self.class(declaring),
            name: self.name(name),
            ty,
            is_static,
        })
    }

    pub fn variable_decl(&self, name: &str, ty: ResolvedType) -> Declaration {
        Declaration::Variable(VariableDecl {
            name: self.name(name),
            ty,
        })
    }

    // Statements

    pub fn stmt(&self, kind: StmtKind) -> StmtId {
        self.arena
            .borrow_mut()
            .alloc_stmt(Stmt::new(kind, Span::DUMMY))
    }

    pub fn expr_stmt(&self, expr: ExprId) -> StmtId {
        self.stmt(StmtKind::Expr(expr))
    }

    pub fn block(&self, stmts: impl IntoIterator<Item = StmtId>) -> StmtId {
        self.stmt(StmtKind::Block(stmts.into_iter().collect()))
    }

    pub fn if_stmt(
        &self,
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    ) -> StmtId {
        self.stmt(StmtKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    pub fn while_stmt(&self, cond: ExprId, body: StmtId) -> StmtId {
        self.stmt(StmtKind::While { cond, body })
    }

    pub fn do_while(&self, body: StmtId, cond: ExprId) -> StmtId {
        self.stmt(StmtKind::DoWhile { body, cond })
    }

    pub fn for_stmt(
        &self,
        init: impl IntoIterator<Item = StmtId>,
        cond: Option<ExprId>,
        update: impl IntoIterator<Item = ExprId>,
        body: StmtId,
    ) -> StmtId {
        self.stmt(StmtKind::For {
            init: init.into_iter().collect(),
            cond,
            update: update.into_iter().collect(),
            body,
        })
    }

    pub fn for_each(&self, ty: ResolvedType, var: &str, iterable: ExprId, body: StmtId) -> StmtId {
        let var = self.name(var);
        self.stmt(StmtKind::ForEach {
            var,
            ty,
            iterable,
            body,
        })
    }

    /// `ty name = init, ...;`
    pub fn var_decl(&self, ty: ResolvedType, declarators: &[(&str, Option<ExprId>)]) -> StmtId {
        let declarators = declarators
            .iter()
            .map(|&(name, init)| Declarator {
                name: self.name(name),
                init,
            })
            .collect();
        self.stmt(StmtKind::VarDecl { ty, declarators })
    }

    /// `ty name = init;`
    pub fn local(&self, ty: ResolvedType, name: &str, init: ExprId) -> StmtId {
        self.var_decl(ty, &[(name, Some(init))])
    }

    pub fn return_stmt(&self, value: Option<ExprId>) -> StmtId {
        self.stmt(StmtKind::Return(value))
    }

    pub fn break_stmt(&self) -> StmtId {
        self.stmt(StmtKind::Break)
    }

    pub fn synchronized(&self, lock: ExprId, body: StmtId) -> StmtId {
        self.stmt(StmtKind::Synchronized { lock, body })
    }

    pub fn unsupported(&self, kind: UnsupportedStmt) -> StmtId {
        self.stmt(StmtKind::Unsupported(kind))
    }
}
