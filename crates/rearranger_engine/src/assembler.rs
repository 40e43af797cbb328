//! Output assembly.
//!
//! Turns a nested [`RuleInstanceTree`] into the linear forms the emitter
//! consumes: a flat entry order, or an emit plan that also carries member
//! boundaries and separator comments.

use std::collections::HashMap;

use rearranger_foundation::{
    DeclarationEntry, EntryId, EntryTree, Error, InvariantViolation, Result,
};

use crate::instance::{BucketOrigin, RuleInstanceTree, ScopeInstance};

/// One step of the emit plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmitItem {
    /// Copy the entry's source range (with its attached comments).
    Entry(EntryId),
    /// The members of the preceding type entry begin.
    BeginMembers(EntryId),
    /// The members of the type entry end.
    EndMembers(EntryId),
    /// Insert a generated separator comment.
    Separator(String),
}

/// Flattens arrangements and checks the permutation invariant.
pub struct OutputAssembler;

impl OutputAssembler {
    /// Lists every placed entry depth-first: each entry is followed by its
    /// own members before the next sibling.
    #[must_use]
    pub fn flatten(arrangement: &RuleInstanceTree) -> Vec<EntryId> {
        let mut out = Vec::with_capacity(arrangement.len());
        flatten_scope(&arrangement.root, &mut out);
        out
    }

    /// Checks that the arrangement places every entry of `tree` exactly once.
    ///
    /// # Errors
    /// Returns an `InvariantViolation` error listing duplicated, missing
    /// and unknown entries.
    pub fn verify(arrangement: &RuleInstanceTree, tree: &EntryTree) -> Result<()> {
        let mut seen: HashMap<EntryId, usize> = HashMap::new();
        for id in Self::flatten(arrangement) {
            *seen.entry(id).or_default() += 1;
        }

        let mut violation = InvariantViolation::default();
        for (&id, &count) in &seen {
            if !tree.contains(id) {
                violation.unknown.push(id);
            } else if count > 1 {
                violation.duplicated.push(id);
            }
        }
        violation.missing = tree
            .preorder()
            .into_iter()
            .filter(|id| !seen.contains_key(id))
            .collect();

        if violation.is_empty() {
            return Ok(());
        }
        violation.duplicated.sort();
        violation.unknown.sort();
        Err(Error::invariant_violation(violation))
    }

    /// Flattens and verifies in one step.
    ///
    /// # Errors
    /// Returns an `InvariantViolation` error if the arrangement is not a
    /// permutation of the tree's entries.
    pub fn assemble(arrangement: &RuleInstanceTree, tree: &EntryTree) -> Result<Vec<EntryId>> {
        Self::verify(arrangement, tree)?;
        Ok(Self::flatten(arrangement))
    }

    /// Resolves the flat order to entries.
    ///
    /// # Errors
    /// Returns an error if the arrangement is not a permutation of the
    /// tree's entries.
    pub fn entries<'t>(
        arrangement: &RuleInstanceTree,
        tree: &'t EntryTree,
    ) -> Result<Vec<&'t DeclarationEntry>> {
        Self::assemble(arrangement, tree)?
            .into_iter()
            .map(|id| tree.entry(id))
            .collect()
    }

    /// Builds the emit plan.
    ///
    /// Stale separators are left out; a bucket whose separator condition
    /// held is preceded by its comment text.
    ///
    /// # Errors
    /// Returns an `InvariantViolation` error if the arrangement is not a
    /// permutation of the tree's entries.
    pub fn emit_plan(arrangement: &RuleInstanceTree, tree: &EntryTree) -> Result<Vec<EmitItem>> {
        Self::verify(arrangement, tree)?;
        let mut plan = Vec::with_capacity(arrangement.len());
        plan_scope(&arrangement.root, &mut plan);
        Ok(plan)
    }
}

fn flatten_scope(scope: &ScopeInstance, out: &mut Vec<EntryId>) {
    for placed in scope.entries() {
        out.push(placed.id);
        if let Some(members) = &placed.members {
            flatten_scope(members, out);
        }
    }
}

fn plan_scope(scope: &ScopeInstance, plan: &mut Vec<EmitItem>) {
    for bucket in &scope.buckets {
        if bucket.origin == BucketOrigin::StaleSeparators {
            continue;
        }
        if let Some(text) = &bucket.separator {
            plan.push(EmitItem::Separator(text.clone()));
        }
        for placed in &bucket.entries {
            plan.push(EmitItem::Entry(placed.id));
            if let Some(members) = &placed.members {
                plan.push(EmitItem::BeginMembers(placed.id));
                plan_scope(members, plan);
                plan.push(EmitItem::EndMembers(placed.id));
            }
        }
    }
}
