//! Lambda construction, capture and invocation.

use jscratch_ir::{
    AssignOp, AstBuilder, BinaryOp, ExprId, LambdaBody, ResolvedType, StmtId, StringInterner,
    UnaryOp,
};
use pretty_assertions::assert_eq;

use super::{run, run_with, DOUBLE, INT};
use crate::errors::EvalErrorKind;
use crate::{EvalConfig, ExecContext, Interpreter, InterpreterBuilder, Value};

const INT_UNARY: &str = "java.util.function.IntUnaryOperator";
const INT_BINARY: &str = "java.util.function.IntBinaryOperator";
const DOUBLE_UNARY: &str = "java.util.function.DoubleUnaryOperator";
const INT_CONSUMER: &str = "java.util.function.IntConsumer";

/// `target.method(args)` on a lambda-valued expression.
fn apply(b: &AstBuilder, target: ExprId, method: &str, args: Vec<ExprId>) -> ExprId {
    let call = b.call(method, args);
    b.chain([target, call])
}

fn iface(b: &AstBuilder, name: &str) -> ResolvedType {
    b.class_type(name)
}

#[test]
fn binary_operator_lambda() {
    let run = run(|b| {
        let body = b.binary(b.ident("a"), BinaryOp::Add, b.ident("b"));
        let lambda = b.lambda(&["a", "b"], LambdaBody::Expr(body), INT_BINARY);
        let f = b.local(iface(b, INT_BINARY), "f", lambda);
        let call = apply(b, b.ident("f"), "applyAsInt", vec![b.int(2), b.int(3)]);
        vec![f, b.local(INT, "r", call)]
    });
    assert_eq!(run.var("r"), Some(Value::Int(5)));
    assert_eq!(
        run.var("f").map(|f| f.to_string()),
        Some(format!("{INT_BINARY}$$Lambda"))
    );
}

#[test]
fn lambdas_capture_per_iteration_values() {
    let run = run(|b| {
        let array = b.new_array_sized(iface(b, INT_UNARY), b.int(3));
        let fs = b.local(ResolvedType::array_of(iface(b, INT_UNARY)), "fs", array);

        let init = b.local(INT, "i", b.int(0));
        let cond = b.binary(b.ident("i"), BinaryOp::Lt, b.int(3));
        let update = b.unary(UnaryOp::PostInc, b.ident("i"));
        let body = b.binary(b.ident("x"), BinaryOp::Add, b.ident("i"));
        let lambda = b.lambda(&["x"], LambdaBody::Expr(body), INT_UNARY);
        let store = b.assign(b.index(b.ident("fs"), b.ident("i")), AssignOp::Assign, lambda);
        let for_loop = b.for_stmt([init], Some(cond), [update], b.block([b.expr_stmt(store)]));

        let first = apply(b, b.index(b.ident("fs"), b.int(0)), "applyAsInt", vec![b.int(10)]);
        let last = apply(b, b.index(b.ident("fs"), b.int(2)), "applyAsInt", vec![b.int(10)]);
        vec![fs, for_loop, b.local(INT, "first", first), b.local(INT, "last", last)]
    });
    assert!(run.result.is_ok(), "{:?}", run.result);
    assert_eq!(run.var("first"), Some(Value::Int(10)));
    assert_eq!(run.var("last"), Some(Value::Int(12)));
}

#[test]
fn later_writes_are_not_seen_by_the_lambda() {
    let run = run(|b| {
        let k = b.local(INT, "k", b.int(1));
        let body = b.binary(b.ident("x"), BinaryOp::Mul, b.ident("k"));
        let lambda = b.lambda(&["x"], LambdaBody::Expr(body), INT_UNARY);
        let f = b.local(iface(b, INT_UNARY), "f", lambda);
        let rebind = b.expr_stmt(b.assign(b.ident("k"), AssignOp::Assign, b.int(100)));
        let call = apply(b, b.ident("f"), "applyAsInt", vec![b.int(7)]);
        vec![k, f, rebind, b.local(INT, "r", call)]
    });
    assert_eq!(run.var("r"), Some(Value::Int(7)));
}

#[test]
fn writes_inside_the_lambda_stay_inside() {
    let run = run(|b| {
        let n = b.local(INT, "n", b.int(0));
        let body = b.assign(b.ident("n"), AssignOp::Add, b.ident("x"));
        let lambda = b.lambda(&["x"], LambdaBody::Expr(body), INT_UNARY);
        let f = b.local(iface(b, INT_UNARY), "f", lambda);
        let call = apply(b, b.ident("f"), "applyAsInt", vec![b.int(5)]);
        vec![n, f, b.local(INT, "r", call)]
    });
    assert_eq!(run.var("r"), Some(Value::Int(5)));
    assert_eq!(run.var("n"), Some(Value::Int(0)));
    assert_eq!(run.ctx.vars().depth(), 1);
}

#[test]
fn parameters_and_results_are_coerced() {
    let run = run(|b| {
        let lambda = b.lambda(&["x"], LambdaBody::Expr(b.int(1)), DOUBLE_UNARY);
        let f = b.local(iface(b, DOUBLE_UNARY), "f", lambda);
        let call = apply(b, b.ident("f"), "applyAsDouble", vec![b.int(3)]);

        let echo = b.lambda(&["x"], LambdaBody::Expr(b.ident("x")), INT_UNARY);
        let g = b.local(iface(b, INT_UNARY), "g", echo);
        let code = apply(b, b.ident("g"), "applyAsInt", vec![b.char('a')]);
        vec![f, b.local(DOUBLE, "d", call), g, b.local(INT, "code", code)]
    });
    assert_eq!(run.var("d"), Some(Value::Double(1.0)));
    assert_eq!(run.var("code"), Some(Value::Int(97)));
}

#[test]
fn block_bodied_callback_yields_void() {
    let run = run(|b| {
        let total = b.local(INT, "seen", b.int(0));
        let body = b.block([
            b.expr_stmt(b.assign(b.ident("seen"), AssignOp::Add, b.ident("v"))),
            b.break_stmt(),
        ]);
        let lambda = b.lambda(&["v"], LambdaBody::Block(body), INT_CONSUMER);
        let f = b.local(iface(b, INT_CONSUMER), "f", lambda);
        let call = apply(b, b.ident("f"), "accept", vec![b.int(4)]);
        vec![total, f, b.expr_stmt(call)]
    });
    assert_eq!(run.result.unwrap(), Value::Void);
    assert!(!run.ctx.is_break_pending());
}

#[test]
fn unsupported_target_interface() {
    let run = run(|b| {
        let lambda = b.lambda(&[], LambdaBody::Expr(b.int(1)), "java.util.function.Supplier");
        vec![b.expr_stmt(lambda)]
    });
    let err = run.result.unwrap_err();
    assert!(err.is_not_implemented());
    assert_eq!(
        err.message,
        "lambda targeting java.util.function.Supplier is not supported in scratch execution"
    );
}

#[test]
fn arity_must_match_the_interface() {
    let run = run(|b| {
        let lambda = b.lambda(&["a"], LambdaBody::Expr(b.ident("a")), INT_BINARY);
        vec![b.expr_stmt(lambda)]
    });
    assert!(matches!(
        run.result.unwrap_err().kind,
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn runaway_recursion_hits_the_frame_limit() {
    let config = EvalConfig {
        max_frames: 16,
        ..EvalConfig::default()
    };
    let run = run_with(config, |b| {
        // IntUnaryOperator f = x -> f.applyAsInt(x); f.applyAsInt(1);
        let recurse = apply(b, b.ident("f"), "applyAsInt", vec![b.ident("x")]);
        let lambda = b.lambda(&["x"], LambdaBody::Expr(recurse), INT_UNARY);
        let f = b.local(iface(b, INT_UNARY), "f", lambda);
        let call = apply(b, b.ident("f"), "applyAsInt", vec![b.int(1)]);
        vec![f, b.expr_stmt(call)]
    });
    assert_eq!(
        run.result.unwrap_err().kind,
        EvalErrorKind::FrameLimitExceeded { depth: 16 }
    );
    assert_eq!(run.ctx.vars().depth(), 1);
}

/// Build statements, run them, then hand back the interpreter state so a
/// test can invoke a lambda after the statements finished.
fn deferred(
    build: impl FnOnce(&AstBuilder) -> Vec<StmtId>,
    check: impl FnOnce(&Interpreter<'_>, &mut ExecContext),
) {
    let interner = StringInterner::shared();
    let b = AstBuilder::new(interner.clone());
    let roots = build(&b);
    let interpreter = InterpreterBuilder::new(&interner, b.finish()).build();
    let mut ctx = interpreter.new_context(Value::Null);
    for root in roots {
        interpreter.exec_stmt(root, &mut ctx).unwrap();
    }
    check(&interpreter, &mut ctx);
}

#[test]
fn deferred_invocation_sees_captured_bindings() {
    deferred(
        |b| {
            let base = b.local(INT, "base", b.int(40));
            let body = b.binary(b.ident("base"), BinaryOp::Add, b.ident("x"));
            let lambda = b.lambda(&["x"], LambdaBody::Expr(body), INT_UNARY);
            vec![base, b.local(iface(b, INT_UNARY), "handler", lambda)]
        },
        |interpreter, ctx| {
            let name = interpreter.interner.intern("handler");
            let handler = ctx.vars().lookup(name);
            let Some(Value::Lambda(lambda)) = &handler else {
                panic!("expected a lambda, got {handler:?}");
            };
            // The statement that created it is long finished and the
            // top-level frame has been cleared.
            ctx.reset();
            let result = interpreter
                .invoke_lambda(lambda, vec![Value::Int(2)], ctx)
                .unwrap();
            assert_eq!(result, Value::Int(42));
            assert_eq!(ctx.vars().depth(), 1);
        },
    );
}
