//! Rule definitions.
//!
//! A rule is either an [`AttributeGroup`] (a predicate plus sorting
//! directives that claims matching entries) or a [`CommentRule`] (a
//! separator comment emitted between groups).

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rearranger_foundation::{EntryKind, Modifiers, Protection};

use crate::criteria::{
    Criterion, MethodTypeCriterion, ModifierCriterion, ParameterCountCriterion, PatternCriterion,
    ProtectionCriterion,
};

// =============================================================================
// Targets and sorting
// =============================================================================

/// Kind of entry a rule applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RuleTarget {
    /// Field declarations.
    Fields,
    /// Methods, constructors, and initializer blocks.
    Methods,
    /// Classes and enums.
    Classes,
    /// Interfaces.
    Interfaces,
}

impl RuleTarget {
    /// Returns true if entries of `kind` can ever match this target.
    #[must_use]
    pub const fn accepts(self, kind: EntryKind) -> bool {
        matches!(
            (self, kind),
            (Self::Fields, EntryKind::Field)
                | (Self::Methods, EntryKind::Method | EntryKind::Initializer)
                | (Self::Classes, EntryKind::Class | EntryKind::Enum)
                | (Self::Interfaces, EntryKind::Interface)
        )
    }

    /// Returns the plural noun used in descriptions.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Fields => "fields",
            Self::Methods => "methods",
            Self::Classes => "classes",
            Self::Interfaces => "interfaces",
        }
    }
}

/// Ordering of overloaded methods sharing a name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverloadOrder {
    /// Keep the original encounter order.
    #[default]
    RetainOriginal,
    /// Fewest parameters first.
    Ascending,
    /// Most parameters first.
    Descending,
}

impl fmt::Display for OverloadOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RetainOriginal => write!(f, "original order"),
            Self::Ascending => write!(f, "ascending parameter count"),
            Self::Descending => write!(f, "descending parameter count"),
        }
    }
}

/// How entries claimed by one rule are ordered.
///
/// Keys apply in the order modifiers, type, name. With no key set entries
/// stay in encounter order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SortOptions {
    /// Sort by protection, then static, final, abstract.
    pub by_modifiers: bool,
    /// Sort by declared/return type.
    pub by_type: bool,
    /// Sort by name.
    pub by_name: bool,
    /// Compare type and name case-insensitively.
    pub ignore_case: bool,
    /// Overload order for this rule; falls back to the global setting.
    pub overload_order: Option<OverloadOrder>,
}

impl SortOptions {
    /// No sorting.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Sort by name (case-sensitive).
    #[must_use]
    pub fn by_name() -> Self {
        Self {
            by_name: true,
            ..Self::default()
        }
    }

    /// Enables modifier sorting.
    #[must_use]
    pub fn with_modifiers(mut self) -> Self {
        self.by_modifiers = true;
        self
    }

    /// Enables type sorting.
    #[must_use]
    pub fn with_type(mut self) -> Self {
        self.by_type = true;
        self
    }

    /// Enables case-insensitive comparison.
    #[must_use]
    pub fn case_insensitive(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Overrides the overload order.
    #[must_use]
    pub fn with_overload_order(mut self, order: OverloadOrder) -> Self {
        self.overload_order = Some(order);
        self
    }

    /// Returns true if any sort key is set.
    #[must_use]
    pub const fn is_sorted(&self) -> bool {
        self.by_modifiers || self.by_type || self.by_name
    }
}

impl fmt::Display for SortOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = Vec::new();
        if self.by_modifiers {
            keys.push("modifiers");
        }
        if self.by_type {
            keys.push("type");
        }
        if self.by_name {
            keys.push("name");
        }
        if keys.is_empty() {
            return write!(f, "unsorted");
        }
        write!(f, "sorted by {}", keys.join(", "))?;
        if self.ignore_case {
            write!(f, ", ignoring case")?;
        }
        Ok(())
    }
}

// =============================================================================
// Getter/setter definition
// =============================================================================

/// How a getter or setter name is validated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NameCriterion {
    /// The name only needs the right prefix (`get`, `is`, `set`).
    #[default]
    CorrectPrefix,
    /// The prefix-stripped name must name a field in the same scope.
    MatchesField,
}

/// What makes a method a getter or setter.
///
/// A getter is named `getX` (or `isX` returning `boolean`), takes no
/// parameters and returns a value. A setter is named `setX`, takes one
/// parameter and returns `void`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GetterSetterDefinition {
    /// Name check for getters.
    pub getter_name: NameCriterion,
    /// Name check for setters.
    pub setter_name: NameCriterion,
}

impl GetterSetterDefinition {
    /// Requires getters and setters to name an existing field.
    #[must_use]
    pub fn matching_fields() -> Self {
        Self {
            getter_name: NameCriterion::MatchesField,
            setter_name: NameCriterion::MatchesField,
        }
    }
}

// =============================================================================
// Attribute group
// =============================================================================

/// Default rule priority.
pub const DEFAULT_PRIORITY: i32 = 1;

/// A rule that claims entries satisfying every criterion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttributeGroup {
    /// Kind of entry the rule applies to.
    pub target: RuleTarget,
    /// Criteria that must all pass.
    pub criteria: Vec<Criterion>,
    /// Ordering of claimed entries.
    pub sort: SortOptions,
    /// Higher priority wins when several rules match an entry.
    pub priority: i32,
    /// Entries claimed here are never moved as extracted helpers.
    pub exclude_from_extracted: bool,
    /// Overrides the global getter/setter definition.
    pub getter_setter: Option<GetterSetterDefinition>,
    /// Replaces the generated description.
    pub label: Option<String>,
}

impl AttributeGroup {
    /// Creates a rule matching every entry of `target`.
    #[must_use]
    pub fn new(target: RuleTarget) -> Self {
        Self {
            target,
            criteria: Vec::new(),
            sort: SortOptions::none(),
            priority: DEFAULT_PRIORITY,
            exclude_from_extracted: false,
            getter_setter: None,
            label: None,
        }
    }

    /// Creates a field rule.
    #[must_use]
    pub fn fields() -> Self {
        Self::new(RuleTarget::Fields)
    }

    /// Creates a method rule.
    #[must_use]
    pub fn methods() -> Self {
        Self::new(RuleTarget::Methods)
    }

    /// Creates a class rule.
    #[must_use]
    pub fn classes() -> Self {
        Self::new(RuleTarget::Classes)
    }

    /// Creates an interface rule.
    #[must_use]
    pub fn interfaces() -> Self {
        Self::new(RuleTarget::Interfaces)
    }

    /// Adds a criterion.
    #[must_use]
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Restricts to the given protection levels.
    #[must_use]
    pub fn with_protection(self, levels: impl IntoIterator<Item = Protection>) -> Self {
        self.with_criterion(Criterion::Protection(ProtectionCriterion::any_of(levels)))
    }

    /// Requires a modifier flag.
    #[must_use]
    pub fn with_modifier(self, modifier: Modifiers) -> Self {
        self.with_criterion(Criterion::Modifier(ModifierCriterion::required(modifier)))
    }

    /// Forbids a modifier flag.
    #[must_use]
    pub fn without_modifier(self, modifier: Modifiers) -> Self {
        self.with_criterion(Criterion::Modifier(ModifierCriterion::forbidden(modifier)))
    }

    /// Requires the name to match a pattern.
    #[must_use]
    pub fn with_name(self, pattern: impl Into<String>) -> Self {
        self.with_criterion(Criterion::Name(PatternCriterion::matching(pattern)))
    }

    /// Requires the type to match a pattern.
    #[must_use]
    pub fn with_type(self, pattern: impl Into<String>) -> Self {
        self.with_criterion(Criterion::Type(PatternCriterion::matching(pattern)))
    }

    /// Requires the leading comment to match a pattern.
    #[must_use]
    pub fn with_comment(self, pattern: impl Into<String>) -> Self {
        self.with_criterion(Criterion::Comment(PatternCriterion::matching(pattern)))
    }

    /// Sets the minimum parameter count.
    #[must_use]
    pub fn with_min_params(mut self, min: u32) -> Self {
        self.update_parameter_bounds(|bounds| bounds.min = Some(min));
        self
    }

    /// Sets the maximum parameter count.
    #[must_use]
    pub fn with_max_params(mut self, max: u32) -> Self {
        self.update_parameter_bounds(|bounds| bounds.max = Some(max));
        self
    }

    fn update_parameter_bounds(&mut self, update: impl FnOnce(&mut ParameterCountCriterion)) {
        for criterion in &mut self.criteria {
            if let Criterion::ParameterCount(bounds) = criterion {
                update(bounds);
                return;
            }
        }
        let mut bounds = ParameterCountCriterion::default();
        update(&mut bounds);
        self.criteria.push(Criterion::ParameterCount(bounds));
    }

    /// Restricts to method types.
    #[must_use]
    pub fn with_method_type(self, method_type: MethodTypeCriterion) -> Self {
        self.with_criterion(Criterion::MethodType(method_type))
    }

    /// Sets the sort options.
    #[must_use]
    pub fn with_sort(mut self, sort: SortOptions) -> Self {
        self.sort = sort;
        self
    }

    /// Sorts claimed entries by name.
    #[must_use]
    pub fn sorted_by_name(self) -> Self {
        self.with_sort(SortOptions::by_name())
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Keeps claimed entries out of extracted-method grouping.
    #[must_use]
    pub fn excluding_from_extracted(mut self) -> Self {
        self.exclude_from_extracted = true;
        self
    }

    /// Overrides the getter/setter definition for this rule.
    #[must_use]
    pub fn with_getter_setter_definition(mut self, definition: GetterSetterDefinition) -> Self {
        self.getter_setter = Some(definition);
        self
    }

    /// Sets a custom label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the enabled criteria.
    pub fn enabled_criteria(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter().filter(|c| c.is_enabled())
    }
}

impl fmt::Display for AttributeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            return write!(f, "{label}");
        }

        let mut words = Vec::new();
        let mut clauses = Vec::new();
        let mut noun = self.target.plural().to_string();
        for criterion in self.enabled_criteria() {
            match criterion {
                Criterion::Protection(_) | Criterion::Modifier(_) => {
                    words.push(criterion.to_string());
                }
                Criterion::MethodType(method_type) => noun = method_type.to_string(),
                _ => clauses.push(criterion.to_string()),
            }
        }
        if words.is_empty() && clauses.is_empty() && noun == self.target.plural() {
            write!(f, "all {noun}")?;
        } else {
            words.push(noun);
            write!(f, "{}", words.join(" "))?;
        }
        if !clauses.is_empty() {
            write!(f, " {}", clauses.join(" and "))?;
        }
        if self.sort.is_sorted() {
            write!(f, " ({})", self.sort)?;
        }
        if self.priority != DEFAULT_PRIORITY {
            write!(f, " [priority {}]", self.priority)?;
        }
        Ok(())
    }
}

// =============================================================================
// Comment rule
// =============================================================================

/// When a separator comment is emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EmitCondition {
    /// Always emit.
    #[default]
    Always,
    /// Emit if a preceding group claimed something.
    Preceding,
    /// Emit if a subsequent group claimed something.
    Subsequent,
    /// Emit if both a preceding and a subsequent group claimed something.
    Surrounded,
}

/// A separator comment placed between groups.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommentRule {
    /// Comment text as it should be emitted.
    pub text: String,
    /// When the comment is emitted.
    pub condition: EmitCondition,
    /// How many neighbouring group rules the condition inspects (`None` = all).
    pub look_around: Option<usize>,
}

impl CommentRule {
    /// Creates an unconditional separator.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            condition: EmitCondition::Always,
            look_around: None,
        }
    }

    /// Sets the emit condition.
    #[must_use]
    pub fn with_condition(mut self, condition: EmitCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Limits the condition to the nearest `count` group rules.
    #[must_use]
    pub fn with_look_around(mut self, count: usize) -> Self {
        self.look_around = Some(count);
        self
    }
}

impl fmt::Display for CommentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "comment {:?}", self.text)?;
        let scope = self
            .look_around
            .map_or_else(|| "any".to_string(), |n| format!("the next {n}"));
        match self.condition {
            EmitCondition::Always => Ok(()),
            EmitCondition::Preceding => write!(f, " if {scope} preceding rules matched"),
            EmitCondition::Subsequent => write!(f, " if {scope} subsequent rules matched"),
            EmitCondition::Surrounded => {
                write!(f, " if {scope} preceding and subsequent rules matched")
            }
        }
    }
}

// =============================================================================
// Rule
// =============================================================================

/// One entry in a rule list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rule {
    /// Claims matching entries.
    Group(AttributeGroup),
    /// Emits a separator comment.
    Comment(CommentRule),
}

impl Rule {
    /// Returns the attribute group, if this is one.
    #[must_use]
    pub fn as_group(&self) -> Option<&AttributeGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Comment(_) => None,
        }
    }

    /// Returns the comment rule, if this is one.
    #[must_use]
    pub fn as_comment(&self) -> Option<&CommentRule> {
        match self {
            Self::Comment(comment) => Some(comment),
            Self::Group(_) => None,
        }
    }
}

impl From<AttributeGroup> for Rule {
    fn from(group: AttributeGroup) -> Self {
        Self::Group(group)
    }
}

impl From<CommentRule> for Rule {
    fn from(comment: CommentRule) -> Self {
        Self::Comment(comment)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(group) => write!(f, "{group}"),
            Self::Comment(comment) => write!(f, "{comment}"),
        }
    }
}
