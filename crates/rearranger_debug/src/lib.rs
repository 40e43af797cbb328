//! Previews and explanations for the rearranger.
//!
//! This crate provides:
//! - [`OutlineFormatter`] - Indented outline of a computed arrangement
//! - [`explain_entry`] / [`explain_placement`] - Why an entry was claimed
//!   by a rule and where it ended up

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod explain;
pub mod preview;

pub use explain::{EntryExplanation, RuleVerdict, explain_entry, explain_placement};
pub use preview::{ArrangementFormatter, OutlineFormatter};
