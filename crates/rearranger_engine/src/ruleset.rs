//! Compiled rule set.
//!
//! [`RuleSet::compile`] validates a settings snapshot up front: every
//! pattern is compiled and every contradiction reported before any entry
//! is matched. Nothing in a compiled rule set changes afterwards.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use rearranger_foundation::{DeclarationEntry, EntryKind, Error, ErrorContext, Result, RuleList};
use rearranger_settings::{AttributeGroup, CommentRule, Placement, RearrangerSettings, Rule};

use crate::accessor::ScopeContext;
use crate::matcher::AttributeMatcher;
use crate::pattern::CompiledPattern;

// =============================================================================
// Compiled rules
// =============================================================================

/// An attribute group with its compiled matcher.
#[derive(Clone, Debug)]
pub struct CompiledGroup {
    /// Position in the rule list.
    pub index: usize,
    /// The group as configured.
    pub group: AttributeGroup,
    /// Compiled predicate.
    pub matcher: AttributeMatcher,
}

/// One compiled rule list entry.
#[derive(Clone, Debug)]
pub enum CompiledRule {
    /// Claims matching entries.
    Group(CompiledGroup),
    /// Emits a separator comment.
    Comment {
        /// Position in the rule list.
        index: usize,
        /// The comment rule as configured.
        rule: CommentRule,
    },
}

impl CompiledRule {
    /// Returns the position in the rule list.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Group(group) => group.index,
            Self::Comment { index, .. } => *index,
        }
    }

    /// Returns the group, if this is one.
    #[must_use]
    pub fn as_group(&self) -> Option<&CompiledGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Comment { .. } => None,
        }
    }
}

/// A primary-method setting with its compiled name pattern.
#[derive(Clone, Debug)]
pub struct CompiledPrimaryMethod {
    /// Full-match primary name pattern.
    pub pattern: CompiledPattern,
    /// Related-name templates, with every group reference braced.
    pub related: Vec<String>,
    /// Where related methods go.
    pub placement: Placement,
}

// =============================================================================
// Claim resolution
// =============================================================================

/// A rule whose predicate matched an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleMatch {
    /// Position of the rule in its list.
    pub rule: usize,
    /// The rule's priority.
    pub priority: i32,
}

/// What decided which rule claimed an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreak {
    /// Only one rule matched.
    Unopposed,
    /// The winner had the strictly highest priority.
    HigherPriority,
    /// Several rules shared the highest priority; the earliest declared won.
    EarlierDeclaration,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unopposed => write!(f, "only matching rule"),
            Self::HigherPriority => write!(f, "highest priority"),
            Self::EarlierDeclaration => write!(f, "declared first among equal priorities"),
        }
    }
}

/// Picks the claiming rule: highest priority, then earliest declared.
///
/// `matches` must be in declaration order.
#[must_use]
pub fn resolve_claim(matches: &[RuleMatch]) -> Option<(RuleMatch, TieBreak)> {
    let best = matches.iter().map(|m| m.priority).max()?;
    let winner = *matches.iter().find(|m| m.priority == best)?;
    let tied = matches.iter().filter(|m| m.priority == best).count();
    let tie_break = if matches.len() == 1 {
        TieBreak::Unopposed
    } else if tied == 1 {
        TieBreak::HigherPriority
    } else {
        TieBreak::EarlierDeclaration
    };
    Some((winner, tie_break))
}

// =============================================================================
// Rule set
// =============================================================================

/// Validated, immutable rules for one or more rearrangement runs.
#[derive(Clone, Debug)]
pub struct RuleSet {
    settings: RearrangerSettings,
    class_rules: Vec<CompiledRule>,
    member_rules: Vec<CompiledRule>,
    comment_pattern: Option<CompiledPattern>,
    primary_methods: Vec<CompiledPrimaryMethod>,
}

impl RuleSet {
    /// Compiles a snapshot of `settings`.
    ///
    /// # Errors
    /// Returns a configuration error if a pattern does not compile, a rule's
    /// parameter bounds contradict each other, a comment rule's text does not
    /// match the global comment pattern, a related-name template refers to a
    /// missing capture group, or a relation kind is listed twice.
    pub fn compile(settings: &RearrangerSettings) -> Result<Self> {
        let settings = settings.snapshot();

        let comment_pattern = if settings.global_comment_pattern.is_empty() {
            None
        } else {
            Some(CompiledPattern::compile(
                "global comment",
                &settings.global_comment_pattern,
            )?)
        };

        let class_rules = compile_list(&settings, RuleList::Class, comment_pattern.as_ref())?;
        let member_rules = compile_list(&settings, RuleList::Member, comment_pattern.as_ref())?;

        let primary_methods = settings
            .related
            .primary_methods
            .iter()
            .map(|p| {
                let pattern = CompiledPattern::compile("primary method", &p.primary)?;
                let related = p
                    .related
                    .iter()
                    .map(|t| pattern.normalize_template(t))
                    .collect::<Result<Vec<_>>>()?;
                Ok(CompiledPrimaryMethod {
                    pattern,
                    related,
                    placement: p.placement,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        for kind in &settings.related.precedence {
            if !seen.insert(*kind) {
                return Err(Error::invalid_configuration(format!(
                    "relation '{kind}' listed twice in precedence"
                )));
            }
        }

        debug!(
            class_rules = class_rules.len(),
            member_rules = member_rules.len(),
            primary_methods = primary_methods.len(),
            "compiled rule set"
        );

        Ok(Self {
            settings,
            class_rules,
            member_rules,
            comment_pattern,
            primary_methods,
        })
    }

    /// Returns the settings snapshot the rules were compiled from.
    #[must_use]
    pub fn settings(&self) -> &RearrangerSettings {
        &self.settings
    }

    /// Returns one compiled rule list.
    #[must_use]
    pub fn rules(&self, list: RuleList) -> &[CompiledRule] {
        match list {
            RuleList::Class => &self.class_rules,
            RuleList::Member => &self.member_rules,
        }
    }

    /// Returns the group at `index` in `list`, if that rule is a group.
    #[must_use]
    pub fn group(&self, list: RuleList, index: usize) -> Option<&CompiledGroup> {
        self.rules(list).get(index).and_then(CompiledRule::as_group)
    }

    /// Returns every group in `list` matching the entry, in declaration order.
    #[must_use]
    pub fn matching_rules(
        &self,
        list: RuleList,
        entry: &DeclarationEntry,
        scope: &ScopeContext,
    ) -> Vec<RuleMatch> {
        self.rules(list)
            .iter()
            .filter_map(CompiledRule::as_group)
            .filter(|g| g.matcher.matches(entry, scope))
            .map(|g| RuleMatch {
                rule: g.index,
                priority: g.group.priority,
            })
            .collect()
    }

    /// Returns true if the entry is a separator comment left by an earlier
    /// run (a comment whose text matches the global comment pattern).
    #[must_use]
    pub fn is_stale_separator(&self, entry: &DeclarationEntry) -> bool {
        entry.kind == EntryKind::Comment
            && self
                .comment_pattern
                .as_ref()
                .is_some_and(|p| p.is_match(&entry.comment))
    }

    /// Returns the compiled primary-method settings.
    #[must_use]
    pub fn primary_methods(&self) -> &[CompiledPrimaryMethod] {
        &self.primary_methods
    }
}

fn compile_list(
    settings: &RearrangerSettings,
    list: RuleList,
    comment_pattern: Option<&CompiledPattern>,
) -> Result<Vec<CompiledRule>> {
    settings
        .rules(list)
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            compile_rule(settings, index, rule, comment_pattern)
                .map_err(|e| e.with_context(ErrorContext::new().with_rule(list, index)))
        })
        .collect()
}

fn compile_rule(
    settings: &RearrangerSettings,
    index: usize,
    rule: &Rule,
    comment_pattern: Option<&CompiledPattern>,
) -> Result<CompiledRule> {
    match rule {
        Rule::Group(group) => Ok(CompiledRule::Group(CompiledGroup {
            index,
            group: group.clone(),
            matcher: AttributeMatcher::compile(group, settings.getter_setter)?,
        })),
        Rule::Comment(comment) => {
            if let Some(pattern) = comment_pattern {
                if !pattern.is_match(&comment.text) {
                    return Err(Error::invalid_configuration(format!(
                        "comment {:?} does not match global comment pattern '{}'",
                        comment.text,
                        pattern.as_str()
                    )));
                }
            }
            Ok(CompiledRule::Comment {
                index,
                rule: comment.clone(),
            })
        }
    }
}
