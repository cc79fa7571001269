//! Lambda invocation.

use jscratch_ir::LambdaBody;
use tracing::trace;

use super::Interpreter;
use crate::coerce::coerce_to;
use crate::context::ExecContext;
use crate::errors::{type_mismatch, EvalResult};
use crate::value::{LambdaValue, Value};

impl Interpreter<'_> {
    /// Invoke a lambda with already-evaluated arguments.
    ///
    /// Pushes a frame seeded with the captured bindings plus the parameters,
    /// evaluates the body in the lambda's own arena and with its own
    /// receiver, then pops the frame whether or not the body failed.
    pub fn invoke_lambda(
        &self,
        lambda: &LambdaValue,
        args: Vec<Value>,
        ctx: &mut ExecContext,
    ) -> EvalResult {
        if args.len() != lambda.params.len() {
            return Err(type_mismatch(
                &format!("{} argument(s) for {}", lambda.params.len(), lambda.target),
                &args.len().to_string(),
            ));
        }

        let mut frame = lambda.captured.clone();
        for (&param, arg) in lambda.params.iter().zip(args) {
            let arg = match lambda.shape.param_type() {
                Some(ty) => coerce_to(arg, ty)?,
                None => arg,
            };
            frame.insert(param, arg);
        }

        ctx.vars_mut().push_frame(frame)?;
        trace!(
            interface = &*lambda.target,
            depth = ctx.vars().depth(),
            "lambda invoked"
        );
        let outer_this = ctx.replace_this(lambda.this.clone());

        let body = self.with_arena(lambda.arena.clone());
        let result = match lambda.body {
            LambdaBody::Expr(expr) => body.eval_expr(expr, ctx),
            LambdaBody::Block(block) => body.exec_stmt(block, ctx),
        };

        // A `break` cannot leave the lambda body.
        ctx.take_break();
        ctx.replace_this(outer_this);
        ctx.vars_mut().pop_frame();

        let result = result?;
        match lambda.shape.result_type() {
            Some(ty) => coerce_to(result, ty),
            None => Ok(Value::Void),
        }
    }
}
