//! The receiving end of a console run.

use std::sync::Arc;

use jscratch_eval::capture::{OutputSink, Stream};
use jscratch_eval::{EvalError, Value};
use jscratch_ir::SemanticError;

/// Receives statement outcomes and console output, in the order they occur.
///
/// `index` is the statement's position in the submitted unit.
pub trait ConsoleClient: Send + Sync {
    fn statement_result(&self, index: usize, value: &Value);

    /// The statement failed or was cancelled, and the run stops after it.
    fn statement_failed(&self, index: usize, error: &EvalError);

    /// The statement was not executed because the resolver rejected it.
    fn statement_skipped(&self, index: usize, errors: &[SemanticError]);

    /// One line printed by host code, without its terminator.
    fn output_line(&self, stream: Stream, text: &str);
}

/// Forwards captured console lines to a client.
pub(crate) struct ClientSink(pub(crate) Arc<dyn ConsoleClient>);

impl OutputSink for ClientSink {
    fn line(&self, stream: Stream, text: &str) {
        self.0.output_line(stream, text);
    }
}
