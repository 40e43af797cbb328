//! Rule instances: the result of one rearrangement run.
//!
//! The tree mirrors the entry tree's scopes. Each scope holds an ordered
//! list of buckets, and each type entry placed in a bucket carries the
//! arrangement of its own members.

use rearranger_foundation::{EntryId, RuleList};
use rearranger_settings::RelationKind;

/// Why a bucket exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BucketOrigin {
    /// Entries claimed by an attribute group.
    Rule {
        /// Position of the rule in its list.
        index: usize,
        /// The rule's priority.
        priority: i32,
    },
    /// Position of a separator comment rule; holds no entries.
    Comment {
        /// Position of the rule in its list.
        index: usize,
    },
    /// Entries claimed by no rule, in original order.
    Leftover,
    /// Members of a scope that is not rearranged, in original order.
    OriginalOrder,
    /// Separator comments generated by an earlier run.
    StaleSeparators,
}

/// Links a related entry to the primary it was moved next to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relation {
    /// The primary entry.
    pub primary: EntryId,
    /// Which relation applied.
    pub kind: RelationKind,
}

/// One entry in its final position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedEntry {
    /// The entry.
    pub id: EntryId,
    /// Rule that claimed the entry, if any.
    pub rule: Option<usize>,
    /// Set when the entry was moved next to a primary.
    pub relation: Option<Relation>,
    /// Arrangement of the entry's members (type entries only).
    pub members: Option<ScopeInstance>,
}

impl PlacedEntry {
    /// Creates a placement with no relation and no members.
    #[must_use]
    pub fn new(id: EntryId, rule: Option<usize>) -> Self {
        Self {
            id,
            rule,
            relation: None,
            members: None,
        }
    }
}

/// The ordered entries of one bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleInstance {
    /// Why the bucket exists.
    pub origin: BucketOrigin,
    /// Entries in final order.
    pub entries: Vec<PlacedEntry>,
    /// Separator comment to emit before the bucket.
    pub separator: Option<String>,
}

impl RuleInstance {
    /// Creates an empty bucket.
    #[must_use]
    pub fn new(origin: BucketOrigin) -> Self {
        Self {
            origin,
            entries: Vec::new(),
            separator: None,
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the bucket holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entry ids in order.
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.entries.iter().map(|p| p.id)
    }
}

/// The arrangement of one scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeInstance {
    /// The scope (`None` = file scope).
    pub scope: Option<EntryId>,
    /// Rule list used for the scope (`None` when kept in original order).
    pub rules: Option<RuleList>,
    /// Buckets in output order.
    pub buckets: Vec<RuleInstance>,
}

impl ScopeInstance {
    /// Creates an arrangement with no buckets.
    #[must_use]
    pub fn new(scope: Option<EntryId>, rules: Option<RuleList>) -> Self {
        Self {
            scope,
            rules,
            buckets: Vec::new(),
        }
    }

    /// Iterates over the scope's direct entries in output order.
    pub fn entries(&self) -> impl Iterator<Item = &PlacedEntry> {
        self.buckets.iter().flat_map(|b| b.entries.iter())
    }

    /// Returns the direct entry ids in output order.
    #[must_use]
    pub fn ids(&self) -> Vec<EntryId> {
        self.entries().map(|p| p.id).collect()
    }

    /// Counts every entry in this scope and nested scopes.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.entries()
            .map(|p| 1 + p.members.as_ref().map_or(0, ScopeInstance::total_entries))
            .sum()
    }

    /// Finds an entry anywhere below this scope.
    #[must_use]
    pub fn find(&self, id: EntryId) -> Option<&PlacedEntry> {
        self.entries().find_map(|p| {
            if p.id == id {
                Some(p)
            } else {
                p.members.as_ref().and_then(|m| m.find(id))
            }
        })
    }

    /// Finds the bucket holding a direct entry.
    #[must_use]
    pub fn bucket_of(&self, id: EntryId) -> Option<&RuleInstance> {
        self.buckets.iter().find(|b| b.ids().any(|e| e == id))
    }

    /// Finds the arrangement of a nested scope.
    #[must_use]
    pub fn scope_of(&self, scope: EntryId) -> Option<&ScopeInstance> {
        self.find(scope).and_then(|p| p.members.as_ref())
    }
}

/// The complete result of arranging one entry tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleInstanceTree {
    /// Arrangement of the file scope.
    pub root: ScopeInstance,
}

impl RuleInstanceTree {
    /// Returns the number of placed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.total_entries()
    }

    /// Returns true if nothing was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds an entry anywhere in the tree.
    #[must_use]
    pub fn find(&self, id: EntryId) -> Option<&PlacedEntry> {
        self.root.find(id)
    }

    /// Finds the arrangement of a scope (`None` = file scope).
    #[must_use]
    pub fn scope(&self, scope: Option<EntryId>) -> Option<&ScopeInstance> {
        match scope {
            None => Some(&self.root),
            Some(id) => self.root.scope_of(id),
        }
    }
}
