//! Host extensions notified after a rearrangement is applied.
//!
//! Extensions are registered explicitly under a unique name and called in
//! registration order.

use tracing::debug;

use rearranger_foundation::{EntryTree, Error, ErrorKind, Result};

use crate::instance::RuleInstanceTree;

// =============================================================================
// Extension
// =============================================================================

/// A collaborator that observes applied arrangements.
pub trait Extension {
    /// Unique registration name.
    fn name(&self) -> &str;

    /// Called once the emit plan has been handed to the sink.
    ///
    /// # Errors
    /// Returns a message describing the failure; the session reports it as
    /// an `Extension` error.
    fn after_arrange(
        &mut self,
        tree: &EntryTree,
        arrangement: &RuleInstanceTree,
    ) -> std::result::Result<(), String>;
}

// =============================================================================
// ExtensionRegistry
// =============================================================================

/// Registered extensions, in registration order.
#[derive(Default)]
pub struct ExtensionRegistry {
    extensions: Vec<Box<dyn Extension>>,
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an extension.
    ///
    /// # Errors
    /// Returns a `DuplicateExtension` error if the name is taken.
    pub fn register(&mut self, extension: Box<dyn Extension>) -> Result<()> {
        let name = extension.name().to_string();
        if self.extensions.iter().any(|e| e.name() == name) {
            return Err(Error::new(ErrorKind::DuplicateExtension(name)));
        }
        debug!(extension = %name, "registered extension");
        self.extensions.push(extension);
        Ok(())
    }

    /// Returns the registered names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.extensions.iter().map(|e| e.name()).collect()
    }

    /// Returns the number of registered extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Notifies every extension, stopping at the first failure.
    ///
    /// # Errors
    /// Returns an `Extension` error naming the failing extension.
    pub fn notify(&mut self, tree: &EntryTree, arrangement: &RuleInstanceTree) -> Result<()> {
        for extension in &mut self.extensions {
            extension
                .after_arrange(tree, arrangement)
                .map_err(|message| {
                    Error::new(ErrorKind::Extension {
                        name: extension.name().to_string(),
                        message,
                    })
                })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("extensions", &self.names())
            .finish()
    }
}
