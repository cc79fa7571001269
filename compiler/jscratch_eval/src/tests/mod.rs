//! Evaluator tests.
//!
//! Trees are built with `AstBuilder` and run against the mock host from
//! [`crate::testing`].

mod lambda_tests;
mod serde_tests;
mod stmt_tests;

use jscratch_ir::{
    AstBuilder, ExprId, PrimitiveType, ResolvedType, SharedInterner, StmtId, StringInterner,
};

use crate::testing::MockHost;
use crate::{EvalConfig, EvalResult, ExecContext, InterpreterBuilder, Value};

pub(super) const INT: ResolvedType = ResolvedType::Primitive(PrimitiveType::Int);
pub(super) const LONG: ResolvedType = ResolvedType::Primitive(PrimitiveType::Long);
pub(super) const DOUBLE: ResolvedType = ResolvedType::Primitive(PrimitiveType::Double);
pub(super) const BYTE: ResolvedType = ResolvedType::Primitive(PrimitiveType::Byte);
pub(super) const CHAR: ResolvedType = ResolvedType::Primitive(PrimitiveType::Char);
pub(super) const BOOLEAN: ResolvedType = ResolvedType::Primitive(PrimitiveType::Boolean);

/// State left behind by a run.
pub(super) struct Run {
    interner: SharedInterner,
    pub ctx: ExecContext,
    /// Result of the last statement, or the first failure.
    pub result: EvalResult,
    /// Number of host bridge calls made.
    pub host_calls: usize,
}

impl Run {
    pub fn var(&self, name: &str) -> Option<Value> {
        self.ctx.vars().lookup(self.interner.intern(name))
    }
}

/// Run statements in order, stopping at the first failure.
pub(super) fn run(build: impl FnOnce(&AstBuilder) -> Vec<StmtId>) -> Run {
    run_with(EvalConfig::default(), build)
}

pub(super) fn run_with(
    config: EvalConfig,
    build: impl FnOnce(&AstBuilder) -> Vec<StmtId>,
) -> Run {
    let interner = StringInterner::shared();
    let b = AstBuilder::new(interner.clone());
    let roots = build(&b);
    let host = MockHost::new(interner.clone());
    let interpreter = InterpreterBuilder::new(&interner, b.finish())
        .bridge(&host)
        .classes(&host)
        .config(config)
        .build();

    let mut ctx = interpreter.new_context(Value::Null);
    let mut result = Ok(Value::Void);
    for root in roots {
        result = interpreter.exec_stmt(root, &mut ctx);
        if result.is_err() {
            break;
        }
    }
    let host_calls = host.calls();
    Run {
        interner,
        ctx,
        result,
        host_calls,
    }
}

/// Evaluate a single expression in a fresh context.
pub(super) fn eval(build: impl FnOnce(&AstBuilder) -> ExprId) -> EvalResult {
    run(|b| {
        let expr = build(b);
        vec![b.expr_stmt(expr)]
    })
    .result
}
