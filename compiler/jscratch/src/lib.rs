//! jscratch - run Java scratch snippets statement by statement.
//!
//! The front end parses and resolves a submission into a [`SourceUnit`];
//! a [`Console`] then executes its statements in order and reports each
//! outcome to a [`ConsoleClient`]:
//!
//! - a statement with resolver errors is reported as skipped
//! - a successful statement reports its value
//! - the first failure is reported and ends the run
//!
//! Text printed by host code during the run reaches the client line by line.
//!
//! # Debugging
//!
//! Call [`init_tracing`] and set `RUST_LOG`:
//! - `RUST_LOG=jscratch=debug` - one span per statement, skipped statements
//! - `RUST_LOG=jscratch_eval=trace` - lambda frames and loop exits
//!
//! [`SourceUnit`]: jscratch_ir::SourceUnit

mod client;
mod console;
mod tracing_setup;

pub use client::ConsoleClient;
pub use console::{Console, ConsoleBuilder, RunOutcome};
pub use tracing_setup::init_tracing;
