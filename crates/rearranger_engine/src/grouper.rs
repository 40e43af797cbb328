//! Related-item grouping.
//!
//! After buckets are filled and sorted, related entries (methods named after
//! a primary, accessors of a property, setter of a getter, overloads,
//! extracted helpers) are pulled out of their own buckets and placed right
//! next to their primary.
//!
//! Relations are derived from entry attributes, source order and the rule
//! that claimed each entry, never from the incoming sequence. Regrouping an
//! already grouped scope therefore moves nothing.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use rearranger_foundation::{DeclarationEntry, EntryId, EntryKind, EntryTree, Protection, RuleList};
use rearranger_settings::{
    CallerChoice, ExtractedOrder, GetterSetterDefinition, OverloadOrder, Placement, RelationKind,
};

use crate::accessor::{AccessorKind, ScopeContext, classify};
use crate::instance::{BucketOrigin, PlacedEntry, Relation, RuleInstance};
use crate::ruleset::RuleSet;

// =============================================================================
// Links
// =============================================================================

/// Ordering of siblings attached to the same primary.
type ChildKey = (usize, usize, String, usize);

#[derive(Clone, Debug)]
struct Link {
    primary: EntryId,
    kind: RelationKind,
    placement: Placement,
    key: ChildKey,
}

/// An entry taking part in grouping.
struct Member<'t> {
    id: EntryId,
    rule: Option<usize>,
    source: usize,
    entry: &'t DeclarationEntry,
}

impl Member<'_> {
    fn is_method(&self) -> bool {
        self.entry.kind == EntryKind::Method
    }
}

// =============================================================================
// Grouper
// =============================================================================

/// Moves related entries next to their primary within one scope.
pub struct RelatedItemGrouper<'a> {
    rules: &'a RuleSet,
    list: RuleList,
    tree: &'a EntryTree,
    scope: &'a ScopeContext,
    source_order: HashMap<EntryId, usize>,
}

impl<'a> RelatedItemGrouper<'a> {
    /// Creates a grouper for the direct children of `scope_id`.
    #[must_use]
    pub fn new(
        rules: &'a RuleSet,
        list: RuleList,
        tree: &'a EntryTree,
        scope_id: Option<EntryId>,
        scope: &'a ScopeContext,
    ) -> Self {
        let source_order = tree
            .scope_children(scope_id)
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        Self {
            rules,
            list,
            tree,
            scope,
            source_order,
        }
    }

    /// Regroups the buckets of one scope.
    ///
    /// Rule and leftover buckets take part; comment and stale-separator
    /// buckets pass through untouched. Every entry stays in the output
    /// exactly once.
    #[must_use]
    pub fn group(&self, mut buckets: Vec<RuleInstance>) -> Vec<RuleInstance> {
        let mut members: Vec<Member<'_>> = buckets
            .iter()
            .filter(|b| is_groupable(b))
            .flat_map(|b| b.entries.iter())
            .filter_map(|p| {
                Some(Member {
                    id: p.id,
                    rule: p.rule,
                    source: *self.source_order.get(&p.id)?,
                    entry: self.tree.get(p.id)?,
                })
            })
            .collect();
        members.sort_by_key(|m| m.source);

        let links = self.link(&members);
        if links.is_empty() {
            for bucket in buckets.iter_mut().filter(|b| is_groupable(b)) {
                for placed in &mut bucket.entries {
                    placed.relation = None;
                }
            }
            return buckets;
        }

        let mut children: HashMap<EntryId, Vec<(ChildKey, EntryId)>> = HashMap::new();
        for (&related, link) in &links {
            children
                .entry(link.primary)
                .or_default()
                .push((link.key.clone(), related));
        }
        for list in children.values_mut() {
            list.sort();
        }

        let mut pool: HashMap<EntryId, PlacedEntry> = HashMap::new();
        let mut roots: Vec<Vec<EntryId>> = Vec::with_capacity(buckets.len());
        for bucket in &mut buckets {
            if is_groupable(bucket) {
                let mut bucket_roots = Vec::new();
                for mut placed in bucket.entries.drain(..) {
                    placed.relation = links.get(&placed.id).map(|l| Relation {
                        primary: l.primary,
                        kind: l.kind,
                    });
                    if !links.contains_key(&placed.id) {
                        bucket_roots.push(placed.id);
                    }
                    pool.insert(placed.id, placed);
                }
                roots.push(bucket_roots);
            } else {
                roots.push(Vec::new());
            }
        }

        for (bucket, bucket_roots) in buckets.iter_mut().zip(roots) {
            for root in bucket_roots {
                emit(root, &links, &children, &mut pool, &mut bucket.entries);
            }
        }

        debug!(related = links.len(), "grouped related entries");
        buckets
    }

    fn getter_setter_for(&self, member: &Member<'_>) -> GetterSetterDefinition {
        member
            .rule
            .and_then(|r| self.rules.group(self.list, r))
            .map_or(self.rules.settings().getter_setter, |g| {
                *g.matcher.getter_setter()
            })
    }

    fn link(&self, members: &[Member<'_>]) -> HashMap<EntryId, Link> {
        let settings = self.rules.settings();
        let mut links = HashMap::new();

        for (rank, kind) in settings.related.precedence.iter().enumerate() {
            let proposals = match kind {
                RelationKind::ByName => self.by_name(members, rank),
                RelationKind::GetterSetterWithProperty
                    if settings.keep_getters_setters_with_property =>
                {
                    self.accessors_with_property(members, rank)
                }
                RelationKind::GetterSetter if settings.keep_getters_setters_together => {
                    self.setters_with_getters(members, rank)
                }
                RelationKind::Overloads if settings.keep_overloaded_methods_together => {
                    self.overloads(members, rank)
                }
                RelationKind::Extracted if settings.related.extracted.enabled => {
                    self.extracted(members, rank)
                }
                _ => Vec::new(),
            };
            for (related, link) in proposals {
                propose(&mut links, related, link);
            }
        }
        links
    }

    fn by_name(&self, members: &[Member<'_>], rank: usize) -> Vec<(EntryId, Link)> {
        let mut out = Vec::new();
        for setting in self.rules.primary_methods() {
            for primary in members.iter().filter(|m| m.is_method()) {
                let Some(captures) = setting.pattern.captures(&primary.entry.name) else {
                    continue;
                };
                for (position, template) in setting.related.iter().enumerate() {
                    let mut name = String::new();
                    captures.expand(template, &mut name);
                    for related in members
                        .iter()
                        .filter(|m| m.is_method() && m.id != primary.id && m.entry.name == name)
                    {
                        out.push((
                            related.id,
                            Link {
                                primary: primary.id,
                                kind: RelationKind::ByName,
                                placement: setting.placement,
                                key: (rank, position, String::new(), related.source),
                            },
                        ));
                    }
                }
            }
        }
        out
    }

    fn accessors_with_property(
        &self,
        members: &[Member<'_>],
        rank: usize,
    ) -> Vec<(EntryId, Link)> {
        let mut fields: HashMap<&str, EntryId> = HashMap::new();
        for field in members.iter().filter(|m| m.entry.kind == EntryKind::Field) {
            fields.entry(field.entry.name.as_str()).or_insert(field.id);
        }

        members
            .iter()
            .filter_map(|m| {
                let accessor = classify(m.entry, &self.getter_setter_for(m), self.scope)?;
                let field = *fields.get(accessor.property.as_str())?;
                let minor = usize::from(accessor.kind == AccessorKind::Setter);
                Some((
                    m.id,
                    Link {
                        primary: field,
                        kind: RelationKind::GetterSetterWithProperty,
                        placement: Placement::After,
                        key: (rank, minor, String::new(), m.source),
                    },
                ))
            })
            .collect()
    }

    fn setters_with_getters(&self, members: &[Member<'_>], rank: usize) -> Vec<(EntryId, Link)> {
        let accessors: Vec<_> = members
            .iter()
            .filter_map(|m| {
                classify(m.entry, &self.getter_setter_for(m), self.scope).map(|a| (m, a))
            })
            .collect();

        let mut getters: HashMap<&str, EntryId> = HashMap::new();
        for (member, accessor) in &accessors {
            if accessor.kind == AccessorKind::Getter {
                getters.entry(accessor.property.as_str()).or_insert(member.id);
            }
        }

        accessors
            .iter()
            .filter(|(_, a)| a.kind == AccessorKind::Setter)
            .filter_map(|(setter, accessor)| {
                let getter = *getters.get(accessor.property.as_str())?;
                Some((
                    setter.id,
                    Link {
                        primary: getter,
                        kind: RelationKind::GetterSetter,
                        placement: Placement::After,
                        key: (rank, 0, String::new(), setter.source),
                    },
                ))
            })
            .collect()
    }

    fn overload_order_for(&self, member: &Member<'_>) -> OverloadOrder {
        member
            .rule
            .and_then(|r| self.rules.group(self.list, r))
            .and_then(|g| g.group.sort.overload_order)
            .unwrap_or(self.rules.settings().overloaded_order)
    }

    fn overloads(&self, members: &[Member<'_>], rank: usize) -> Vec<(EntryId, Link)> {
        let mut by_name: Vec<(&str, Vec<&Member<'_>>)> = Vec::new();
        for method in members.iter().filter(|m| m.is_method()) {
            match by_name.iter_mut().find(|(n, _)| *n == method.entry.name) {
                Some((_, group)) => group.push(method),
                None => by_name.push((method.entry.name.as_str(), vec![method])),
            }
        }

        let mut out = Vec::new();
        for (_, group) in by_name.into_iter().filter(|(_, g)| g.len() > 1) {
            let order = self.overload_order_for(group[0]);
            let rank_of = |m: &Member<'_>| match order {
                OverloadOrder::RetainOriginal => 0,
                OverloadOrder::Ascending => m.entry.parameter_count(),
                OverloadOrder::Descending => usize::MAX - m.entry.parameter_count(),
            };
            let Some(primary) = group.iter().min_by_key(|m| (rank_of(*m), m.source)) else {
                continue;
            };
            for other in group.iter().filter(|m| m.id != primary.id) {
                out.push((
                    other.id,
                    Link {
                        primary: primary.id,
                        kind: RelationKind::Overloads,
                        placement: Placement::After,
                        key: (rank, rank_of(*other), String::new(), other.source),
                    },
                ));
            }
        }
        out
    }

    fn extracted(&self, members: &[Member<'_>], rank: usize) -> Vec<(EntryId, Link)> {
        let extracted = &self.rules.settings().related.extracted;
        let excluded = |m: &Member<'_>| {
            m.rule
                .and_then(|r| self.rules.group(self.list, r))
                .is_some_and(|g| g.group.exclude_from_extracted)
        };

        let mut out = Vec::new();
        for helper in members.iter().filter(|m| m.is_method() && !m.entry.is_constructor()) {
            let private = helper.entry.modifiers.protection() == Protection::Private;
            if (!private && !extracted.include_non_private) || excluded(helper) {
                continue;
            }
            let mut callers = members.iter().filter(|m| {
                m.id != helper.id
                    && m.entry.kind.is_callable()
                    && m.entry.calls.iter().any(|c| *c == helper.entry.name)
            });
            let caller = match extracted.caller {
                CallerChoice::First => callers.next(),
                CallerChoice::Last => callers.last(),
            };
            let Some(caller) = caller else {
                continue;
            };

            let (minor, alpha) = match extracted.order {
                ExtractedOrder::Original => (0, String::new()),
                ExtractedOrder::Alphabetical => (0, helper.entry.name.clone()),
                ExtractedOrder::Invocation => (
                    caller
                        .entry
                        .calls
                        .iter()
                        .position(|c| *c == helper.entry.name)
                        .unwrap_or(usize::MAX),
                    String::new(),
                ),
            };
            out.push((
                helper.id,
                Link {
                    primary: caller.id,
                    kind: RelationKind::Extracted,
                    placement: extracted.placement,
                    key: (rank, minor, alpha, helper.source),
                },
            ));
        }
        out
    }
}

fn is_groupable(bucket: &RuleInstance) -> bool {
    matches!(
        bucket.origin,
        BucketOrigin::Rule { .. } | BucketOrigin::Leftover
    )
}

/// Records a relation unless the entry already has one or it would close a
/// cycle.
fn propose(links: &mut HashMap<EntryId, Link>, related: EntryId, link: Link) {
    if links.contains_key(&related) || link.primary == related {
        return;
    }
    let mut cursor = Some(link.primary);
    while let Some(current) = cursor {
        if current == related {
            warn!(
                entry = %related,
                primary = %link.primary,
                relation = %link.kind,
                "skipping relation that would form a cycle"
            );
            return;
        }
        cursor = links.get(&current).map(|l| l.primary);
    }
    trace!(entry = %related, primary = %link.primary, relation = %link.kind, "related");
    links.insert(related, link);
}

fn emit(
    id: EntryId,
    links: &HashMap<EntryId, Link>,
    children: &HashMap<EntryId, Vec<(ChildKey, EntryId)>>,
    pool: &mut HashMap<EntryId, PlacedEntry>,
    out: &mut Vec<PlacedEntry>,
) {
    let attached = children.get(&id).map(Vec::as_slice).unwrap_or_default();
    let placed_at = |child: &EntryId, placement: Placement| {
        links.get(child).is_some_and(|l| l.placement == placement)
    };

    for (_, child) in attached.iter().filter(|(_, c)| placed_at(c, Placement::Before)) {
        emit(*child, links, children, pool, out);
    }
    if let Some(placed) = pool.remove(&id) {
        out.push(placed);
    }
    for (_, child) in attached.iter().filter(|(_, c)| placed_at(c, Placement::After)) {
        emit(*child, links, children, pool, out);
    }
}
