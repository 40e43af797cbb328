//! Rule matching, rearrangement, related-item grouping and output assembly.
//!
//! This crate provides:
//! - [`RuleSet`] - Validated, compiled rules for one run
//! - [`AttributeMatcher`] - Compiled predicate of one attribute group
//! - [`RearrangementEngine`] - Per-scope match, sort, group and recurse
//! - [`RelatedItemGrouper`] - Keeps related methods next to their primary
//! - [`OutputAssembler`] - Flattening, permutation check and emit plans
//! - [`RearrangeSession`] - Confirmation, emit sink and extensions
//!
//! The one-call entry point is [`rearrange`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod accessor;
pub mod assembler;
pub mod engine;
pub mod extension;
pub mod grouper;
pub mod instance;
pub mod matcher;
pub mod pattern;
pub mod ruleset;
pub mod session;
pub mod sink;

pub use accessor::{Accessor, AccessorKind, ScopeContext, classify};
pub use assembler::{EmitItem, OutputAssembler};
pub use engine::{RearrangementEngine, rearrange};
pub use extension::{Extension, ExtensionRegistry};
pub use grouper::RelatedItemGrouper;
pub use instance::{
    BucketOrigin, PlacedEntry, Relation, RuleInstance, RuleInstanceTree, ScopeInstance,
};
pub use matcher::{AttributeMatcher, MatchFailure, MethodType};
pub use pattern::CompiledPattern;
pub use ruleset::{CompiledGroup, CompiledRule, RuleMatch, RuleSet, TieBreak, resolve_claim};
pub use session::{Outcome, RearrangeSession};
pub use sink::EmitSink;
