//! Rule configuration for the rearranger.
//!
//! This crate provides:
//! - [`RearrangerSettings`] - The immutable configuration snapshot for one run
//! - [`Rule`] / [`AttributeGroup`] / [`CommentRule`] - Rule list entries
//! - [`Criterion`] - Attribute predicates as tagged variants
//! - [`RelatedMethodsSettings`] - Relations that keep methods together
//! - [`DisplaySettings`] - Preview options
//!
//! Everything here is plain data. Matching and ordering live in
//! `rearranger_engine`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod criteria;
pub mod display;
pub mod related;
pub mod rule;
pub mod settings;

pub use criteria::{
    Criterion, MethodTypeCriterion, ModifierCriterion, ParameterCountCriterion, PatternCriterion,
    ProtectionCriterion,
};
pub use display::DisplaySettings;
pub use related::{
    CallerChoice, ExtractedMethodsSettings, ExtractedOrder, Placement, PrimaryMethodSetting,
    RelatedMethodsSettings, RelationKind,
};
pub use rule::{
    AttributeGroup, CommentRule, DEFAULT_PRIORITY, EmitCondition, GetterSetterDefinition,
    NameCriterion, OverloadOrder, Rule, RuleTarget, SortOptions,
};
pub use settings::{RearrangerSettings, UnmatchedPlacement};
