//! Error types for the rearranger.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::entry::EntryId;

/// The main error type for rearranger operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(
        attribute: impl Into<String>,
        pattern: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::InvalidPattern {
            attribute: attribute.into(),
            pattern: pattern.into(),
            message: message.into(),
        })
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfiguration(message.into()))
    }

    /// Creates an entry not found error.
    #[must_use]
    pub fn entry_not_found(id: EntryId) -> Self {
        Self::new(ErrorKind::EntryNotFound(id))
    }

    /// Creates a structural invariant violation error.
    #[must_use]
    pub fn invariant_violation(violation: InvariantViolation) -> Self {
        Self::new(ErrorKind::InvariantViolation(violation))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Returns true if this error was caused by the supplied configuration.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A rule predicate carries a regular expression that does not compile.
    #[error("invalid {attribute} pattern '{pattern}': {message}")]
    InvalidPattern {
        /// Which predicate held the pattern (e.g. "name", "type").
        attribute: String,
        /// The offending pattern text.
        pattern: String,
        /// Message from the regex compiler.
        message: String,
    },

    /// Contradictory or otherwise unusable configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The arranged output is not a permutation of the input entries.
    #[error("structural invariant violated: {0}")]
    InvariantViolation(InvariantViolation),

    /// Entry id does not belong to the tree being arranged.
    #[error("entry not found: {0:?}")]
    EntryNotFound(EntryId),

    /// The entry tree was built with an impossible shape.
    #[error("invalid entry tree: {0}")]
    InvalidTree(String),

    /// Two extensions were registered under the same name.
    #[error("duplicate extension: {0}")]
    DuplicateExtension(String),

    /// An extension failed while being notified.
    #[error("extension {name} failed: {message}")]
    Extension {
        /// Registered name of the extension.
        name: String,
        /// What went wrong.
        message: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Returns the category this kind belongs to.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPattern { .. } | Self::InvalidConfiguration(_) => {
                ErrorCategory::Configuration
            }
            Self::InvariantViolation(_)
            | Self::EntryNotFound(_)
            | Self::InvalidTree(_)
            | Self::Internal(_) => ErrorCategory::Structural,
            Self::DuplicateExtension(_) | Self::Extension { .. } => ErrorCategory::Host,
        }
    }
}

/// Broad classes of failure a caller may want to distinguish.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The rule configuration was rejected before matching began.
    Configuration,
    /// An internal invariant failed; the run was aborted.
    Structural,
    /// A host-registered collaborator failed.
    Host,
}

/// Entries that broke the permutation invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Entries that appeared more than once.
    pub duplicated: Vec<EntryId>,
    /// Entries that did not appear at all.
    pub missing: Vec<EntryId>,
    /// Entries that appeared but are not part of the input tree.
    pub unknown: Vec<EntryId>,
}

impl InvariantViolation {
    /// Returns true if nothing was duplicated, missing, or unknown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.duplicated.is_empty() && self.missing.is_empty() && self.unknown.is_empty()
    }
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.duplicated.is_empty() {
            parts.push(format!("{} duplicated", self.duplicated.len()));
        }
        if !self.missing.is_empty() {
            parts.push(format!("{} missing", self.missing.len()));
        }
        if !self.unknown.is_empty() {
            parts.push(format!("{} unknown", self.unknown.len()));
        }
        if parts.is_empty() {
            write!(f, "no violations")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// Which of the two configured rule lists an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleList {
    /// Rules for top-level classes and interfaces.
    Class,
    /// Rules for class members.
    Member,
}

impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Member => write!(f, "member"),
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Rule list the failing rule belongs to.
    pub list: Option<RuleList>,
    /// Index of the failing rule within its list.
    pub rule: Option<usize>,
    /// Name of the scope being arranged.
    pub scope: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule position.
    #[must_use]
    pub fn with_rule(mut self, list: RuleList, index: usize) -> Self {
        self.list = Some(list);
        self.rule = Some(index);
        self
    }

    /// Sets the scope name.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(list), Some(rule)) = (self.list, self.rule) {
            write!(f, "in {list} rule #{}", rule + 1)?;
        }
        if let Some(scope) = &self.scope {
            if self.rule.is_some() {
                write!(f, " ")?;
            }
            write!(f, "while arranging {scope}")?;
        }
        Ok(())
    }
}

/// Result type alias using the rearranger error.
pub type Result<T> = std::result::Result<T, Error>;
