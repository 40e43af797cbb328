//! Attribute matching.
//!
//! An [`AttributeMatcher`] is the compiled form of one attribute group.
//! Every criterion is a tagged variant evaluated by [`evaluate`]; a rule
//! matches an entry when the entry's kind fits the rule's target and every
//! enabled criterion passes.

use std::fmt;

use rearranger_foundation::{DeclarationEntry, EntryKind, Error, Modifiers, Result};
use rearranger_settings::{
    AttributeGroup, Criterion, GetterSetterDefinition, MethodTypeCriterion, ModifierCriterion,
    ParameterCountCriterion, PatternCriterion, ProtectionCriterion, RuleTarget,
};

use crate::accessor::{ScopeContext, classify};
use crate::pattern::CompiledPattern;

// =============================================================================
// Compiled criteria
// =============================================================================

/// A regular-expression criterion ready for matching.
#[derive(Clone, Debug)]
pub struct TextTest {
    /// Full-match pattern.
    pub pattern: CompiledPattern,
    /// Pass when the pattern does not match.
    pub invert: bool,
}

/// The test a compiled criterion performs.
#[derive(Clone, Debug)]
pub enum CriterionTest {
    /// Protection level is in a set.
    Protection(ProtectionCriterion),
    /// Modifier flag comparison.
    Modifier(ModifierCriterion),
    /// Name pattern.
    Name(TextTest),
    /// Type pattern.
    Type(TextTest),
    /// Leading comment pattern.
    Comment(TextTest),
    /// Parameter count bounds.
    ParameterCount(ParameterCountCriterion),
    /// Method-type discriminator.
    MethodType(MethodTypeCriterion),
}

/// One enabled criterion of a rule.
#[derive(Clone, Debug)]
pub struct CompiledCriterion {
    /// Position in the rule's criteria list.
    pub index: usize,
    /// The criterion as configured.
    pub source: Criterion,
    /// What to test.
    pub test: CriterionTest,
}

impl CompiledCriterion {
    /// Compiles a configured criterion.
    ///
    /// # Errors
    /// Returns an error for invalid patterns or contradictory bounds.
    pub fn compile(index: usize, criterion: &Criterion) -> Result<Self> {
        let text = |attribute: &str, c: &PatternCriterion| {
            CompiledPattern::compile(attribute, &c.pattern).map(|pattern| TextTest {
                pattern,
                invert: c.invert,
            })
        };
        let test = match criterion {
            Criterion::Protection(c) => CriterionTest::Protection(c.clone()),
            Criterion::Modifier(c) => CriterionTest::Modifier(*c),
            Criterion::Name(c) => CriterionTest::Name(text("name", c)?),
            Criterion::Type(c) => CriterionTest::Type(text("type", c)?),
            Criterion::Comment(c) => CriterionTest::Comment(text("comment", c)?),
            Criterion::ParameterCount(c) => {
                if c.is_contradictory() {
                    return Err(Error::invalid_configuration(format!(
                        "minimum parameter count {} exceeds maximum {}",
                        c.min.unwrap_or_default(),
                        c.max.unwrap_or_default()
                    )));
                }
                CriterionTest::ParameterCount(*c)
            }
            Criterion::MethodType(c) => CriterionTest::MethodType(*c),
        };
        Ok(Self {
            index,
            source: criterion.clone(),
            test,
        })
    }
}

/// Evaluates one criterion against an entry.
#[must_use]
pub fn evaluate(
    test: &CriterionTest,
    entry: &DeclarationEntry,
    getter_setter: &GetterSetterDefinition,
    scope: &ScopeContext,
) -> bool {
    match test {
        CriterionTest::Protection(c) => {
            c.levels.is_empty() || c.levels.contains(&entry.modifiers.protection()) != c.invert
        }
        CriterionTest::Modifier(c) => {
            !c.enabled || ((entry.modifiers.holds(c.modifier) == c.expected) ^ c.invert)
        }
        CriterionTest::Name(t) => t.pattern.is_match(&entry.name) ^ t.invert,
        CriterionTest::Type(t) => t.pattern.is_match(&entry.type_name) ^ t.invert,
        CriterionTest::Comment(t) => t.pattern.is_match(&entry.comment) ^ t.invert,
        CriterionTest::ParameterCount(bounds) => {
            if entry.kind != EntryKind::Method {
                return false;
            }
            let count = u32::try_from(entry.parameter_count()).unwrap_or(u32::MAX);
            bounds.min.is_none_or(|min| count >= min) && bounds.max.is_none_or(|max| count <= max)
        }
        CriterionTest::MethodType(c) => {
            if !c.any_enabled() {
                return true;
            }
            let method_type = MethodType::of(entry, getter_setter, scope);
            let selected = (c.constructor && method_type == Some(MethodType::Constructor))
                || (c.getter_setter && method_type == Some(MethodType::GetterSetter))
                || (c.canonical && method_type == Some(MethodType::Canonical))
                || (c.other && method_type == Some(MethodType::Other));
            selected ^ c.invert
        }
    }
}

/// The method-type category of a method entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodType {
    /// Constructor.
    Constructor,
    /// Getter or setter.
    GetterSetter,
    /// `equals`, `hashCode`, `toString`, `compareTo`.
    Canonical,
    /// Any other method.
    Other,
}

impl MethodType {
    /// Categorises a method; returns `None` for non-methods.
    ///
    /// Categories are exclusive and checked in order: constructor, then
    /// getter/setter under the rule's own definition, then canonical, so a
    /// method reads as exactly one category.
    #[must_use]
    pub fn of(
        entry: &DeclarationEntry,
        getter_setter: &GetterSetterDefinition,
        scope: &ScopeContext,
    ) -> Option<Self> {
        if entry.kind != EntryKind::Method {
            return None;
        }
        let method_type = if entry.is_constructor() {
            Self::Constructor
        } else if classify(entry, getter_setter, scope).is_some() {
            Self::GetterSetter
        } else if entry.has(Modifiers::CANONICAL) {
            Self::Canonical
        } else {
            Self::Other
        };
        Some(method_type)
    }
}

// =============================================================================
// Attribute matcher
// =============================================================================

/// Why an entry did not satisfy a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchFailure {
    /// The rule targets a different kind of entry.
    KindMismatch {
        /// The rule's target.
        target: RuleTarget,
        /// The entry's kind.
        kind: EntryKind,
    },
    /// A criterion rejected the entry.
    Criterion {
        /// Position of the criterion in the rule.
        index: usize,
        /// The rejecting criterion.
        criterion: Criterion,
    },
}

impl fmt::Display for MatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KindMismatch { target, kind } => {
                write!(f, "rule applies to {} but entry is a {kind}", target.plural())
            }
            Self::Criterion { criterion, .. } => {
                write!(f, "{} criterion failed: {criterion}", criterion.attribute())
            }
        }
    }
}

/// Compiled predicate of one attribute group.
#[derive(Clone, Debug)]
pub struct AttributeMatcher {
    target: RuleTarget,
    criteria: Vec<CompiledCriterion>,
    getter_setter: GetterSetterDefinition,
}

impl AttributeMatcher {
    /// Compiles a group, using `default_getter_setter` unless the group
    /// overrides it.
    ///
    /// # Errors
    /// Returns an error for invalid patterns or contradictory bounds.
    pub fn compile(
        group: &AttributeGroup,
        default_getter_setter: GetterSetterDefinition,
    ) -> Result<Self> {
        let criteria = group
            .criteria
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_enabled())
            .map(|(index, c)| CompiledCriterion::compile(index, c))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            target: group.target,
            criteria,
            getter_setter: group.getter_setter.unwrap_or(default_getter_setter),
        })
    }

    /// Returns the getter/setter definition this rule uses.
    #[must_use]
    pub fn getter_setter(&self) -> &GetterSetterDefinition {
        &self.getter_setter
    }

    /// Returns the target kind.
    #[must_use]
    pub fn target(&self) -> RuleTarget {
        self.target
    }

    /// Returns true if the entry satisfies the rule.
    #[must_use]
    pub fn matches(&self, entry: &DeclarationEntry, scope: &ScopeContext) -> bool {
        self.target.accepts(entry.kind)
            && self
                .criteria
                .iter()
                .all(|c| evaluate(&c.test, entry, &self.getter_setter, scope))
    }

    /// Returns the first reason the entry fails the rule, if any.
    #[must_use]
    pub fn first_failure(
        &self,
        entry: &DeclarationEntry,
        scope: &ScopeContext,
    ) -> Option<MatchFailure> {
        if !self.target.accepts(entry.kind) {
            return Some(MatchFailure::KindMismatch {
                target: self.target,
                kind: entry.kind,
            });
        }
        self.criteria
            .iter()
            .find(|c| !evaluate(&c.test, entry, &self.getter_setter, scope))
            .map(|c| MatchFailure::Criterion {
                index: c.index,
                criterion: c.source.clone(),
            })
    }
}
