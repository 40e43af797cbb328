//! Core declaration model for the rearranger.
//!
//! This crate provides:
//! - [`DeclarationEntry`] - One field, method, initializer, type or comment
//! - [`EntryTree`] - Arena of entries with parent/child links
//! - [`Modifiers`] - Modifier and derived-property flags
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entry;
pub mod error;
pub mod modifiers;
pub mod tree;

pub use entry::{DeclarationEntry, EntryId, EntryKind, Parameter, TextRange};
pub use error::{
    Error, ErrorCategory, ErrorContext, ErrorKind, InvariantViolation, Result, RuleList,
};
pub use modifiers::{Modifiers, Protection, canonical_signature};
pub use tree::EntryTree;
