//! Serialized source units evaluate like the originals.

use jscratch_ir::{
    AssignOp, AstBuilder, BinaryOp, LambdaBody, SemanticError, SourceStatement, SourceUnit, Span,
    StringInterner, UnaryOp,
};
use pretty_assertions::assert_eq;

use super::INT;
use crate::testing::MockHost;
use crate::{InterpreterBuilder, Value};

const INT_UNARY: &str = "java.util.function.IntUnaryOperator";

/// `int total = 0; for (int i = 0; i < 4; i++) total += twice.applyAsInt(i);`
/// plus one statement the resolver rejected.
fn sample_unit(b: &AstBuilder) -> Vec<SourceStatement> {
    let body = b.binary(b.ident("x"), BinaryOp::Mul, b.int(2));
    let lambda = b.lambda(&["x"], LambdaBody::Expr(body), INT_UNARY);
    let twice = b.local(b.class_type(INT_UNARY), "twice", lambda);
    let total = b.local(INT, "total", b.int(0));

    let init = b.local(INT, "i", b.int(0));
    let cond = b.binary(b.ident("i"), BinaryOp::Lt, b.int(4));
    let update = b.unary(UnaryOp::PostInc, b.ident("i"));
    let applied = b.chain([b.ident("twice"), b.call("applyAsInt", [b.ident("i")])]);
    let add = b.expr_stmt(b.assign(b.ident("total"), AssignOp::Add, applied));
    let for_loop = b.for_stmt([init], Some(cond), [update], b.block([add]));

    let rejected = SourceStatement::new(b.expr_stmt(b.ident("missing")))
        .with_error(SemanticError::new("cannot find symbol: missing", Span::new(3, 10)));
    vec![
        SourceStatement::new(twice),
        SourceStatement::new(total),
        SourceStatement::new(for_loop),
        rejected,
    ]
}

#[test]
fn source_unit_survives_bincode() {
    let interner = StringInterner::shared();
    let b = AstBuilder::new(interner.clone());
    let statements = sample_unit(&b);
    let unit = SourceUnit::new(b.finish(), statements);

    let bytes = bincode::serialize(&unit).unwrap();
    let decoded: SourceUnit = bincode::deserialize(&bytes).unwrap();

    assert_eq!(*decoded.arena, *unit.arena);
    assert_eq!(decoded.statements, unit.statements);
    assert!(!decoded.arena.ptr_eq(&unit.arena));

    let host = MockHost::new(interner.clone());
    let interpreter = InterpreterBuilder::new(&interner, decoded.arena.clone())
        .bridge(&host)
        .classes(&host)
        .build();
    let mut ctx = interpreter.new_context(Value::Null);
    for statement in decoded.statements.iter().filter(|s| !s.has_errors()) {
        interpreter.exec_stmt(statement.root, &mut ctx).unwrap();
    }
    assert_eq!(ctx.vars().lookup(interner.intern("total")), Some(Value::Int(12)));
}
