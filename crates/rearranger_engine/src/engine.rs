//! The rearrangement engine.
//!
//! For every scope (the file, then each type body) the engine:
//!
//! 1. collects the scope's direct children in source order,
//! 2. computes every matching rule per entry and lets the winner claim it,
//! 3. sorts each bucket by its rule's sort options,
//! 4. pulls related entries next to their primary,
//! 5. marks separator comments whose emit condition holds,
//! 6. recurses into every type entry it placed.
//!
//! Entries claimed by no rule land in a leftover bucket. The engine never
//! mutates the entry tree or the settings; it only computes an ordering.

use std::collections::HashMap;

use tracing::{debug, trace};

use rearranger_foundation::{
    DeclarationEntry, EntryId, EntryKind, EntryTree, Modifiers, Protection, Result, RuleList,
};
use rearranger_settings::{
    CommentRule, EmitCondition, OverloadOrder, RearrangerSettings, SortOptions, UnmatchedPlacement,
};

use crate::accessor::ScopeContext;
use crate::assembler::OutputAssembler;
use crate::grouper::RelatedItemGrouper;
use crate::instance::{BucketOrigin, PlacedEntry, RuleInstance, RuleInstanceTree, ScopeInstance};
use crate::ruleset::{CompiledRule, RuleSet, resolve_claim};

// =============================================================================
// Engine
// =============================================================================

/// Arranges entry trees with a compiled rule set.
#[derive(Clone, Debug)]
pub struct RearrangementEngine {
    rules: RuleSet,
}

impl RearrangementEngine {
    /// Creates an engine for a compiled rule set.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Compiles a snapshot of `settings` and creates an engine for it.
    ///
    /// # Errors
    /// Returns a configuration error if the settings are invalid.
    pub fn from_settings(settings: &RearrangerSettings) -> Result<Self> {
        RuleSet::compile(settings).map(Self::new)
    }

    /// Returns the compiled rules.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Arranges every scope of `tree`.
    ///
    /// # Errors
    /// Returns an `InvariantViolation` error if the result is not a
    /// permutation of the tree's entries.
    pub fn arrange(&self, tree: &EntryTree) -> Result<RuleInstanceTree> {
        let root = self.arrange_scope(tree, None, RuleList::Class)?;
        let arrangement = RuleInstanceTree { root };
        OutputAssembler::verify(&arrangement, tree)?;
        debug!(entries = arrangement.len(), "arrangement complete");
        Ok(arrangement)
    }

    fn arrange_scope(
        &self,
        tree: &EntryTree,
        scope: Option<EntryId>,
        list: RuleList,
    ) -> Result<ScopeInstance> {
        let candidates = tree.scope_children(scope);
        let context = ScopeContext::build(tree, scope);
        let rules = self.rules.rules(list);

        let mut stale = RuleInstance::new(BucketOrigin::StaleSeparators);
        let mut leftover = RuleInstance::new(BucketOrigin::Leftover);
        let mut claimed: Vec<Vec<PlacedEntry>> = vec![Vec::new(); rules.len()];

        for &id in candidates {
            let entry = tree.entry(id)?;
            if self.rules.is_stale_separator(entry) {
                stale.entries.push(PlacedEntry::new(id, None));
                continue;
            }
            let matches = self.rules.matching_rules(list, entry, &context);
            match resolve_claim(&matches) {
                Some((winner, tie_break)) => {
                    trace!(entry = %id, rule = winner.rule, %tie_break, "claimed");
                    claimed[winner.rule].push(PlacedEntry::new(id, Some(winner.rule)));
                }
                None => {
                    trace!(entry = %id, "unmatched");
                    leftover.entries.push(PlacedEntry::new(id, None));
                }
            }
        }

        let mut buckets = Vec::with_capacity(rules.len() + 2);
        for rule in rules {
            match rule {
                CompiledRule::Group(group) => {
                    let mut bucket = RuleInstance::new(BucketOrigin::Rule {
                        index: group.index,
                        priority: group.group.priority,
                    });
                    bucket.entries = std::mem::take(&mut claimed[group.index]);
                    self.sort_bucket(tree, &group.group.sort, &mut bucket.entries);
                    buckets.push(bucket);
                }
                CompiledRule::Comment { index, .. } => {
                    buckets.push(RuleInstance::new(BucketOrigin::Comment { index: *index }));
                }
            }
        }

        let leftover_count = leftover.len();
        if !leftover.is_empty() {
            match self.rules.settings().unmatched_placement {
                UnmatchedPlacement::End => buckets.push(leftover),
                UnmatchedPlacement::Start => buckets.insert(0, leftover),
            }
        }

        let mut buckets =
            RelatedItemGrouper::new(&self.rules, list, tree, scope, &context).group(buckets);
        mark_separators(rules, &mut buckets);

        if !stale.is_empty() {
            buckets.push(stale);
        }

        for bucket in &mut buckets {
            for placed in &mut bucket.entries {
                if tree.entry(placed.id)?.kind.is_type() {
                    placed.members = Some(self.arrange_members(tree, placed.id)?);
                }
            }
        }

        debug!(
            scope = ?scope,
            rules = %list,
            candidates = candidates.len(),
            buckets = buckets.len(),
            leftover = leftover_count,
            "arranged scope"
        );

        Ok(ScopeInstance {
            scope,
            rules: Some(list),
            buckets,
        })
    }

    fn arrange_members(&self, tree: &EntryTree, id: EntryId) -> Result<ScopeInstance> {
        let nested = tree.parent(id).is_some();
        if nested && !self.rules.settings().rearrange_inner_classes {
            original_order(tree, id)
        } else {
            self.arrange_scope(tree, Some(id), RuleList::Member)
        }
    }

    fn sort_bucket(&self, tree: &EntryTree, sort: &SortOptions, entries: &mut [PlacedEntry]) {
        if sort.is_sorted() {
            entries.sort_by_cached_key(|p| SortKey::new(tree.get(p.id), sort));
        }
        let order = sort
            .overload_order
            .unwrap_or(self.rules.settings().overloaded_order);
        apply_overload_order(tree, order, entries);
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Total ordering key for one entry under a rule's sort options.
///
/// Disabled keys are `None` and compare equal, so a stable sort keeps
/// encounter order among ties.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct SortKey {
    modifiers: Option<(Protection, bool, bool, bool)>,
    type_name: Option<String>,
    name: Option<String>,
}

impl SortKey {
    fn new(entry: Option<&DeclarationEntry>, sort: &SortOptions) -> Self {
        let Some(entry) = entry else {
            return Self {
                modifiers: None,
                type_name: None,
                name: None,
            };
        };
        let fold = |s: &str| {
            if sort.ignore_case {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        Self {
            modifiers: sort.by_modifiers.then(|| {
                (
                    entry.modifiers.protection(),
                    !entry.has(Modifiers::STATIC),
                    !entry.has(Modifiers::FINAL),
                    !entry.has(Modifiers::ABSTRACT),
                )
            }),
            type_name: sort.by_type.then(|| fold(&entry.type_name)),
            name: sort.by_name.then(|| fold(&entry.name)),
        }
    }
}

/// Reorders same-named methods among the positions they already occupy.
fn apply_overload_order(tree: &EntryTree, order: OverloadOrder, entries: &mut [PlacedEntry]) {
    if order == OverloadOrder::RetainOriginal {
        return;
    }

    let mut slots: HashMap<&str, Vec<usize>> = HashMap::new();
    for (position, placed) in entries.iter().enumerate() {
        if let Some(entry) = tree.get(placed.id) {
            if entry.kind == EntryKind::Method {
                slots.entry(entry.name.as_str()).or_default().push(position);
            }
        }
    }

    for positions in slots.into_values().filter(|p| p.len() > 1) {
        let mut group: Vec<PlacedEntry> = positions.iter().map(|&i| entries[i].clone()).collect();
        let count = |p: &PlacedEntry| tree.get(p.id).map_or(0, DeclarationEntry::parameter_count);
        match order {
            OverloadOrder::Ascending => group.sort_by_key(count),
            OverloadOrder::Descending => group.sort_by_key(|p| std::cmp::Reverse(count(p))),
            OverloadOrder::RetainOriginal => {}
        }
        for (slot, placed) in positions.into_iter().zip(group) {
            entries[slot] = placed;
        }
    }
}

// =============================================================================
// Separators
// =============================================================================

fn mark_separators(rules: &[CompiledRule], buckets: &mut [RuleInstance]) {
    let sizes: Vec<(usize, usize)> = buckets
        .iter()
        .filter_map(|b| match b.origin {
            BucketOrigin::Rule { index, .. } => Some((index, b.len())),
            _ => None,
        })
        .collect();

    for bucket in buckets.iter_mut() {
        let BucketOrigin::Comment { index } = bucket.origin else {
            continue;
        };
        let Some(CompiledRule::Comment { rule, .. }) = rules.get(index) else {
            continue;
        };
        if should_emit(rule, index, &sizes) {
            bucket.separator = Some(rule.text.clone());
        }
    }
}

fn should_emit(rule: &CommentRule, index: usize, sizes: &[(usize, usize)]) -> bool {
    let limit = rule.look_around.unwrap_or(usize::MAX);
    let mut preceding = sizes
        .iter()
        .rev()
        .filter(|(i, _)| *i < index)
        .take(limit);
    let mut subsequent = sizes.iter().filter(|(i, _)| *i > index).take(limit);
    match rule.condition {
        EmitCondition::Always => true,
        EmitCondition::Preceding => preceding.any(|(_, n)| *n > 0),
        EmitCondition::Subsequent => subsequent.any(|(_, n)| *n > 0),
        EmitCondition::Surrounded => {
            preceding.any(|(_, n)| *n > 0) && subsequent.any(|(_, n)| *n > 0)
        }
    }
}

// =============================================================================
// Unarranged scopes
// =============================================================================

fn original_order(tree: &EntryTree, scope: EntryId) -> Result<ScopeInstance> {
    let mut bucket = RuleInstance::new(BucketOrigin::OriginalOrder);
    for &id in tree.children(scope) {
        let mut placed = PlacedEntry::new(id, None);
        if tree.entry(id)?.kind.is_type() {
            placed.members = Some(original_order(tree, id)?);
        }
        bucket.entries.push(placed);
    }
    Ok(ScopeInstance {
        scope: Some(scope),
        rules: None,
        buckets: vec![bucket],
    })
}

/// Compiles `settings` and arranges `tree` in one call.
///
/// # Errors
/// Returns a configuration error if the settings are invalid, or an
/// `InvariantViolation` error if the result is not a permutation of the
/// tree's entries.
pub fn rearrange(tree: &EntryTree, settings: &RearrangerSettings) -> Result<RuleInstanceTree> {
    RearrangementEngine::from_settings(settings)?.arrange(tree)
}
