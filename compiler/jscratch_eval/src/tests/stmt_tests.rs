//! Statement execution: loops, break, declarations, unsupported kinds.

use jscratch_ir::{
    AssignOp, AstBuilder, BinaryOp, ExprId, ResolvedType, StmtId, StringInterner, UnaryOp,
    UnsupportedStmt,
};
use pretty_assertions::assert_eq;

use super::{run, run_with, BOOLEAN, DOUBLE, INT, LONG};
use crate::errors::EvalErrorKind;
use crate::{EvalConfig, InterpreterBuilder, Value};

/// `i < bound`
fn less_than(b: &AstBuilder, name: &str, bound: i32) -> ExprId {
    b.binary(b.ident(name), BinaryOp::Lt, b.int(bound))
}

/// `name += value;`
fn add_assign(b: &AstBuilder, name: &str, value: ExprId) -> StmtId {
    b.expr_stmt(b.assign(b.ident(name), AssignOp::Add, value))
}

#[test]
fn while_true_hits_the_loop_limit() {
    let config = EvalConfig {
        loop_limit: 500,
        ..EvalConfig::default()
    };
    let run = run_with(config, |b| {
        let n = b.local(INT, "n", b.int(0));
        let body = b.block([b.expr_stmt(b.unary(UnaryOp::PostInc, b.ident("n")))]);
        vec![n, b.while_stmt(b.boolean(true), body)]
    });
    assert_eq!(
        run.result.as_ref().unwrap_err().kind,
        EvalErrorKind::LoopLimitExceeded { limit: 500 }
    );
    assert_eq!(run.var("n"), Some(Value::Int(500)));
}

#[test]
fn default_loop_limit_is_one_hundred_thousand() {
    let run = run(|b| vec![b.while_stmt(b.boolean(true), b.block([]))]);
    assert_eq!(
        run.result.unwrap_err().kind,
        EvalErrorKind::LoopLimitExceeded { limit: 100_000 }
    );
}

#[test]
fn loop_just_under_the_limit_completes() {
    let config = EvalConfig {
        loop_limit: 11,
        ..EvalConfig::default()
    };
    let run = run_with(config, |b| {
        let i = b.local(INT, "i", b.int(0));
        let step = b.expr_stmt(b.unary(UnaryOp::PreInc, b.ident("i")));
        vec![i, b.while_stmt(less_than(b, "i", 10), b.block([step]))]
    });
    assert!(run.result.is_ok());
    assert_eq!(run.var("i"), Some(Value::Int(10)));
}

#[test]
fn for_loop_break_skips_the_update() {
    let run = run(|b| {
        let last = b.local(INT, "last", b.int(-1));
        let init = b.local(INT, "x", b.int(0));
        let record = b.expr_stmt(b.assign(b.ident("last"), AssignOp::Assign, b.ident("x")));
        let is_three = b.binary(b.ident("x"), BinaryOp::Eq, b.int(3));
        let brk = b.if_stmt(is_three, b.break_stmt(), None);
        let body = b.block([record, brk]);
        let update = b.unary(UnaryOp::PostInc, b.ident("x"));
        let for_loop = b.for_stmt([init], Some(less_than(b, "x", 10)), [update], body);
        vec![last, for_loop]
    });
    assert!(run.result.is_ok());
    assert_eq!(run.var("last"), Some(Value::Int(3)));
    assert_eq!(run.var("x"), Some(Value::Int(3)));
    assert!(!run.ctx.is_break_pending());
}

#[test]
fn break_leaves_only_the_inner_loop() {
    let run = run(|b| {
        let count = b.local(INT, "count", b.int(0));
        let i = b.local(INT, "i", b.int(0));
        let inner = b.while_stmt(
            b.boolean(true),
            b.block([add_assign(b, "count", b.int(1)), b.break_stmt()]),
        );
        let outer_body = b.block([inner, b.expr_stmt(b.unary(UnaryOp::PreInc, b.ident("i")))]);
        vec![count, i, b.while_stmt(less_than(b, "i", 3), outer_body)]
    });
    assert!(run.result.is_ok());
    assert_eq!(run.var("count"), Some(Value::Int(3)));
}

#[test]
fn statements_after_break_do_not_run() {
    let run = run(|b| {
        let hits = b.local(INT, "hits", b.int(0));
        let body = b.block([b.break_stmt(), add_assign(b, "hits", b.int(1))]);
        vec![hits, b.while_stmt(b.boolean(true), body)]
    });
    assert_eq!(run.var("hits"), Some(Value::Int(0)));
}

#[test]
fn do_while_runs_at_least_once() {
    let run = run(|b| {
        let n = b.local(INT, "n", b.int(10));
        let body = b.block([add_assign(b, "n", b.int(1))]);
        vec![n, b.do_while(body, b.boolean(false))]
    });
    assert_eq!(run.var("n"), Some(Value::Int(11)));
}

#[test]
fn for_without_condition_runs_until_break() {
    let run = run(|b| {
        let n = b.local(INT, "n", b.int(0));
        let done = b.binary(b.ident("n"), BinaryOp::GtEq, b.int(4));
        let body = b.block([
            b.if_stmt(done, b.break_stmt(), None),
            add_assign(b, "n", b.int(1)),
        ]);
        vec![n, b.for_stmt([], None, [], body)]
    });
    assert_eq!(run.var("n"), Some(Value::Int(4)));
}

#[test]
fn for_each_over_a_primitive_array() {
    let run = run(|b| {
        let total = b.local(LONG, "total", b.long(0));
        let array = b.new_array(INT, [b.int(1), b.int(2), b.int(3)]);
        let body = b.block([add_assign(b, "total", b.ident("v"))]);
        vec![total, b.for_each(INT, "v", array, body)]
    });
    assert_eq!(run.var("total"), Some(Value::Long(6)));
}

#[test]
fn for_each_coerces_the_loop_variable() {
    let run = run(|b| {
        let last = b.local(DOUBLE, "last", b.double(0.0));
        let array = b.new_array(INT, [b.int(7)]);
        let record = b.expr_stmt(b.assign(b.ident("last"), AssignOp::Assign, b.ident("d")));
        vec![last, b.for_each(DOUBLE, "d", array, b.block([record]))]
    });
    assert_eq!(run.var("last"), Some(Value::Double(7.0)));
}

#[test]
fn for_each_over_a_host_iterable() {
    let run = run(|b| {
        let list_class = b.class("java.util.ArrayList");
        let alloc = b.new_object(list_class, []);
        let decl = b.local(ResolvedType::Class(list_class), "list", alloc);
        let add = |text: &str| {
            let call = b.call("add", [b.str(text)]);
            let call = b.annotate(
                call,
                b.method_decl(
                    "java.util.ArrayList",
                    "add",
                    vec![b.class_type("java.lang.Object")],
                    BOOLEAN,
                    false,
                ),
            );
            b.expr_stmt(b.chain([b.ident("list"), call]))
        };
        let first = add("x");
        let second = add("y");
        let joined = b.local(b.class_type("java.lang.String"), "joined", b.str(""));
        let body = b.block([add_assign(b, "joined", b.ident("s"))]);
        let each = b.for_each(b.class_type("java.lang.String"), "s", b.ident("list"), body);
        vec![decl, first, second, joined, each]
    });
    assert_eq!(run.var("joined"), Some(Value::str("xy")));
}

#[test]
fn for_each_over_non_iterable() {
    let run = run(|b| vec![b.for_each(INT, "v", b.int(3), b.block([]))]);
    assert!(matches!(
        run.result.unwrap_err().kind,
        EvalErrorKind::TypeMismatch { .. }
    ));

    let run = super::run(|b| vec![b.for_each(INT, "v", b.null(), b.block([]))]);
    assert!(matches!(
        run.result.unwrap_err().kind,
        EvalErrorKind::NullReceiver { .. }
    ));
}

#[test]
fn var_decl_results() {
    let single = run(|b| vec![b.local(INT, "x", b.int(1))]);
    assert_eq!(single.result.unwrap(), Value::Int(1));

    let several = super::run(|b| {
        vec![b.var_decl(
            INT,
            &[("a", Some(b.int(1))), ("b", None), ("c", Some(b.int(3)))],
        )]
    });
    assert_eq!(several.result.as_ref().unwrap(), &Value::str("a = 1, c = 3"));
    assert_eq!(several.var("b"), None);

    let none = super::run(|b| vec![b.var_decl(INT, &[("z", None)])]);
    assert_eq!(none.result.unwrap(), Value::Void);
}

#[test]
fn var_decl_coerces_to_the_declared_type() {
    let run = run(|b| vec![b.local(LONG, "big", b.int(5))]);
    assert_eq!(run.var("big"), Some(Value::Long(5)));

    let run = super::run(|b| vec![b.local(INT, "bad", b.str("x"))]);
    assert!(matches!(
        run.result.unwrap_err().kind,
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn block_yields_its_last_result() {
    let run = run(|b| vec![b.block([b.expr_stmt(b.int(1)), b.expr_stmt(b.int(2))])]);
    assert_eq!(run.result.unwrap(), Value::Int(2));
}

#[test]
fn if_requires_a_boolean() {
    let run = run(|b| vec![b.if_stmt(b.int(1), b.block([]), None)]);
    assert!(matches!(
        run.result.unwrap_err().kind,
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn if_else_picks_a_branch() {
    let run = run(|b| {
        let x = b.local(INT, "x", b.int(0));
        let then_branch = b.expr_stmt(b.assign(b.ident("x"), AssignOp::Assign, b.int(1)));
        let else_branch = b.expr_stmt(b.assign(b.ident("x"), AssignOp::Assign, b.int(2)));
        vec![x, b.if_stmt(b.boolean(false), then_branch, Some(else_branch))]
    });
    assert_eq!(run.var("x"), Some(Value::Int(2)));
}

#[test]
fn return_yields_its_value_or_null() {
    let run = run(|b| vec![b.return_stmt(Some(b.int(4)))]);
    assert_eq!(run.result.unwrap(), Value::Int(4));

    let run = super::run(|b| vec![b.return_stmt(None)]);
    assert_eq!(run.result.unwrap(), Value::Null);
}

#[test]
fn synchronized_runs_the_body_without_evaluating_the_lock() {
    let run = run(|b| {
        let x = b.local(INT, "x", b.int(0));
        // The lock is unresolvable; evaluating it would fail.
        let body = b.block([add_assign(b, "x", b.int(5))]);
        vec![x, b.synchronized(b.ident("lock"), body)]
    });
    assert!(run.result.is_ok());
    assert_eq!(run.var("x"), Some(Value::Int(5)));
}

#[test]
fn unsupported_statements_are_not_implemented() {
    for kind in [
        UnsupportedStmt::Switch,
        UnsupportedStmt::Try,
        UnsupportedStmt::Throw,
        UnsupportedStmt::Continue,
        UnsupportedStmt::Labeled,
        UnsupportedStmt::Assert,
        UnsupportedStmt::ClassDecl,
        UnsupportedStmt::ConstructorCall,
    ] {
        let run = run(|b| vec![b.unsupported(kind)]);
        let err = run.result.unwrap_err();
        assert!(err.is_not_implemented(), "{kind:?}");
        assert_eq!(
            err.message,
            format!("{} is not supported in scratch execution", kind.as_str())
        );
    }
}

#[test]
fn cancellation_stops_a_loop() {
    let interner = StringInterner::shared();
    let b = AstBuilder::new(interner.clone());
    let root = b.while_stmt(b.boolean(true), b.block([]));
    let interpreter = InterpreterBuilder::new(&interner, b.finish()).build();
    let mut ctx = interpreter.new_context(Value::Null);
    ctx.cancel_token().cancel();
    let err = interpreter.exec_stmt(root, &mut ctx).unwrap_err();
    assert!(err.is_cancelled());
}
