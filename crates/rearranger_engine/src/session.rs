//! A host-facing rearrangement session.
//!
//! The session owns the compiled rules and the extension registry. Each
//! [`RearrangeSession::run`] arranges one entry tree, asks for confirmation
//! when the settings require it, hands the emit plan to the sink and then
//! notifies extensions.

use tracing::info;

use rearranger_foundation::{EntryTree, Result};
use rearranger_settings::RearrangerSettings;

use crate::assembler::OutputAssembler;
use crate::engine::RearrangementEngine;
use crate::extension::{Extension, ExtensionRegistry};
use crate::instance::RuleInstanceTree;
use crate::sink::EmitSink;

/// Result of one session run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The plan was emitted.
    Applied(RuleInstanceTree),
    /// The confirm callback declined; nothing was emitted.
    Declined,
}

impl Outcome {
    /// Returns true if the plan was emitted.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Compiled rules plus registered extensions.
#[derive(Debug)]
pub struct RearrangeSession {
    engine: RearrangementEngine,
    extensions: ExtensionRegistry,
}

impl RearrangeSession {
    /// Compiles a snapshot of `settings` into a new session.
    ///
    /// # Errors
    /// Returns a configuration error if the settings are invalid.
    pub fn new(settings: &RearrangerSettings) -> Result<Self> {
        Ok(Self {
            engine: RearrangementEngine::from_settings(settings)?,
            extensions: ExtensionRegistry::new(),
        })
    }

    /// Returns the engine.
    #[must_use]
    pub fn engine(&self) -> &RearrangementEngine {
        &self.engine
    }

    /// Returns the extension registry.
    #[must_use]
    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }

    /// Registers an extension.
    ///
    /// # Errors
    /// Returns a `DuplicateExtension` error if the name is taken.
    pub fn register_extension(&mut self, extension: impl Extension + 'static) -> Result<()> {
        self.extensions.register(Box::new(extension))
    }

    /// Arranges `tree` and emits the result.
    ///
    /// `confirm` is consulted only when the settings ask before
    /// rearranging; it sees the computed arrangement.
    ///
    /// # Errors
    /// Returns an error if arrangement fails, the sink rejects the plan or
    /// an extension fails.
    pub fn run<F>(
        &mut self,
        tree: &EntryTree,
        confirm: F,
        sink: &mut dyn EmitSink,
    ) -> Result<Outcome>
    where
        F: FnOnce(&RuleInstanceTree) -> bool,
    {
        let arrangement = self.engine.arrange(tree)?;

        if self.engine.rules().settings().ask_before_rearranging && !confirm(&arrangement) {
            info!(entries = arrangement.len(), "rearrangement declined");
            return Ok(Outcome::Declined);
        }

        let plan = OutputAssembler::emit_plan(&arrangement, tree)?;
        sink.emit(tree, &plan)?;
        self.extensions.notify(tree, &arrangement)?;

        info!(
            entries = arrangement.len(),
            steps = plan.len(),
            "rearrangement applied"
        );
        Ok(Outcome::Applied(arrangement))
    }
}
