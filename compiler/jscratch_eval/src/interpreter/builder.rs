//! `InterpreterBuilder` for creating Interpreter instances.

use jscratch_ir::{SharedArena, StringInterner};

use super::{EvalConfig, Interpreter};
use crate::bridge::{ClassResolver, HostBridge, NO_HOST};

/// Builder for [`Interpreter`].
///
/// Without a bridge or class resolver, every host call fails with an
/// `UnsupportedOperationException` and no class resolves.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    arena: SharedArena,
    bridge: Option<&'a dyn HostBridge>,
    classes: Option<&'a dyn ClassResolver>,
    config: EvalConfig,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner, arena: SharedArena) -> Self {
        Self {
            interner,
            arena,
            bridge: None,
            classes: None,
            config: EvalConfig::default(),
        }
    }

    /// Set the host bridge used for resolved calls and constructors.
    #[must_use]
    pub fn bridge(mut self, bridge: &'a dyn HostBridge) -> Self {
        self.bridge = Some(bridge);
        self
    }

    /// Set the resolver from class declarations to runtime classes.
    #[must_use]
    pub fn classes(mut self, classes: &'a dyn ClassResolver) -> Self {
        self.classes = Some(classes);
        self
    }

    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Iterations a single loop may run.
    #[must_use]
    pub fn loop_limit(mut self, limit: u64) -> Self {
        self.config.loop_limit = limit;
        self
    }

    /// Maximum variable frame depth.
    #[must_use]
    pub fn max_frames(mut self, frames: usize) -> Self {
        self.config.max_frames = frames;
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            arena: self.arena,
            interner: self.interner,
            bridge: self.bridge.unwrap_or(&NO_HOST),
            classes: self.classes.unwrap_or(&NO_HOST),
            config: self.config,
        }
    }
}
