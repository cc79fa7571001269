//! Statement-by-statement execution of a source unit.

use std::sync::Arc;

use jscratch_eval::capture;
use jscratch_eval::{
    CancelToken, ClassResolver, EvalConfig, EvalError, EvalResult, ExecContext, HostBridge,
    Interpreter, InterpreterBuilder, LambdaValue, Value, VariableStack,
};
use jscratch_ir::{SharedArena, SourceUnit, StringInterner};
use tracing::{debug, debug_span, info, warn};

use crate::client::{ClientSink, ConsoleClient};

/// How a run ended.
#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
    /// Every statement ran or was skipped.
    Completed,
    /// A statement failed; later statements did not run.
    Failed(EvalError),
    /// Cancellation was requested through the console's [`CancelToken`].
    Cancelled,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }
}

/// Executes source units against one receiver and one variable stack.
///
/// Variables do not survive between runs: each run starts from a cleared
/// stack. Lambdas created by a run stay callable through
/// [`Console::invoke_callback`] after it returns.
pub struct Console<'a> {
    interner: &'a StringInterner,
    bridge: Option<&'a dyn HostBridge>,
    classes: Option<&'a dyn ClassResolver>,
    config: EvalConfig,
    ctx: ExecContext,
}

/// Builder for [`Console`].
pub struct ConsoleBuilder<'a> {
    interner: &'a StringInterner,
    bridge: Option<&'a dyn HostBridge>,
    classes: Option<&'a dyn ClassResolver>,
    config: EvalConfig,
    receiver: Value,
}

impl<'a> ConsoleBuilder<'a> {
    #[must_use]
    pub fn bridge(mut self, bridge: &'a dyn HostBridge) -> Self {
        self.bridge = Some(bridge);
        self
    }

    #[must_use]
    pub fn classes(mut self, classes: &'a dyn ClassResolver) -> Self {
        self.classes = Some(classes);
        self
    }

    #[must_use]
    pub fn loop_limit(mut self, limit: u64) -> Self {
        self.config.loop_limit = limit;
        self
    }

    #[must_use]
    pub fn max_frames(mut self, frames: usize) -> Self {
        self.config.max_frames = frames;
        self
    }

    /// The object `this` refers to. Defaults to `null`.
    #[must_use]
    pub fn receiver(mut self, receiver: Value) -> Self {
        self.receiver = receiver;
        self
    }

    pub fn build(self) -> Console<'a> {
        let vars = VariableStack::with_max_depth(self.config.max_frames);
        Console {
            interner: self.interner,
            bridge: self.bridge,
            classes: self.classes,
            config: self.config,
            ctx: ExecContext::new(self.receiver, vars),
        }
    }
}

impl<'a> Console<'a> {
    pub fn builder(interner: &'a StringInterner) -> ConsoleBuilder<'a> {
        ConsoleBuilder {
            interner,
            bridge: None,
            classes: None,
            config: EvalConfig::default(),
            receiver: Value::Null,
        }
    }

    pub fn config(&self) -> EvalConfig {
        self.config
    }

    /// Token that stops the run in progress.
    ///
    /// A request made while no run is in progress is discarded when the next
    /// run starts.
    pub fn cancel_token(&self) -> CancelToken {
        self.ctx.cancel_token()
    }

    /// Current value of a top-level variable.
    pub fn variable(&self, name: &str) -> Option<Value> {
        self.ctx.vars().lookup(self.interner.intern(name))
    }

    pub fn context(&self) -> &ExecContext {
        &self.ctx
    }

    fn interpreter(&self, arena: SharedArena) -> Interpreter<'a> {
        let mut builder = InterpreterBuilder::new(self.interner, arena).config(self.config);
        if let Some(bridge) = self.bridge {
            builder = builder.bridge(bridge);
        }
        if let Some(classes) = self.classes {
            builder = builder.classes(classes);
        }
        builder.build()
    }

    /// Execute every statement of `unit` in order.
    ///
    /// Console output produced while the run is in progress is delivered to
    /// `client`. The first failing statement ends the run; a host exception
    /// is also printed to the client's error stream.
    #[tracing::instrument(level = "info", skip_all, fields(statements = unit.statements.len()))]
    pub fn run(&mut self, unit: &SourceUnit, client: &Arc<dyn ConsoleClient>) -> RunOutcome {
        self.ctx.reset();
        let _capture = capture::begin(Arc::new(ClientSink(Arc::clone(client))));
        let interpreter = self.interpreter(unit.arena.clone());

        for (index, statement) in unit.statements.iter().enumerate() {
            if self.ctx.check_cancelled().is_err() {
                info!(index, "run cancelled");
                return RunOutcome::Cancelled;
            }
            if statement.has_errors() {
                debug!(index, errors = statement.errors.len(), "statement skipped");
                client.statement_skipped(index, &statement.errors);
                continue;
            }

            let result = {
                let _span = debug_span!("statement", index).entered();
                interpreter.exec_stmt(statement.root, &mut self.ctx)
            };
            // A `break` outside any loop ends only its own statement.
            self.ctx.take_break();

            match result {
                Ok(value) => client.statement_result(index, &value),
                Err(error) if error.is_cancelled() => {
                    info!(index, "run cancelled");
                    client.statement_failed(index, &error);
                    return RunOutcome::Cancelled;
                }
                Err(error) => {
                    warn!(index, %error, "run aborted");
                    report_host_exception(&error);
                    client.statement_failed(index, &error);
                    return RunOutcome::Failed(error);
                }
            }
        }
        RunOutcome::Completed
    }

    /// Invoke a lambda created by an earlier run, e.g. from a UI event.
    ///
    /// Names resolve against the bindings the lambda captured first, then
    /// against the top-level variables of the latest run. Output goes to
    /// `client`.
    pub fn invoke_callback(
        &mut self,
        lambda: &LambdaValue,
        args: Vec<Value>,
        client: &Arc<dyn ConsoleClient>,
    ) -> EvalResult {
        let _capture = capture::begin(Arc::new(ClientSink(Arc::clone(client))));
        let interpreter = self.interpreter(lambda.arena().clone());
        let result = interpreter.invoke_lambda(lambda, args, &mut self.ctx);
        if let Err(error) = &result {
            warn!(interface = lambda.target(), %error, "callback failed");
            report_host_exception(error);
        }
        result
    }
}

fn report_host_exception(error: &EvalError) {
    if let Some(exception) = error.host_exception() {
        capture::err().println(&exception.to_string());
    }
}
