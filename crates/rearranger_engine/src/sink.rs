//! The emit boundary.
//!
//! The host implements [`EmitSink`] to copy source ranges into a new
//! document in plan order.

use rearranger_foundation::{EntryTree, Result};

use crate::assembler::EmitItem;

/// Receives the emit plan of an applied rearrangement.
pub trait EmitSink {
    /// Writes the plan.
    ///
    /// # Errors
    /// Returns an error if the host cannot apply the plan.
    fn emit(&mut self, tree: &EntryTree, plan: &[EmitItem]) -> Result<()>;
}

/// Collects the plan; useful for previews and tests.
impl EmitSink for Vec<EmitItem> {
    fn emit(&mut self, _tree: &EntryTree, plan: &[EmitItem]) -> Result<()> {
        self.extend_from_slice(plan);
        Ok(())
    }
}
