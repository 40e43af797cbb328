//! Arena-backed tree of declaration entries.
//!
//! The root of the tree is the file scope; its children are the top-level
//! declarations. Type declarations own their member lists, and every entry
//! keeps a back-reference to its enclosing scope.

#![allow(clippy::cast_possible_truncation)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entry::{DeclarationEntry, EntryId};
use crate::error::{Error, ErrorKind, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct Node {
    entry: DeclarationEntry,
    parent: Option<EntryId>,
    children: Vec<EntryId>,
}

/// Read-only (once built) tree of declaration entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntryTree {
    nodes: Vec<Node>,
    roots: Vec<EntryId>,
}

impl EntryTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, entry: DeclarationEntry, parent: Option<EntryId>) -> EntryId {
        let id = EntryId::new(self.nodes.len() as u32);
        self.nodes.push(Node {
            entry,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Adds a top-level declaration to the file scope.
    pub fn add_root(&mut self, entry: DeclarationEntry) -> EntryId {
        let id = self.push(entry, None);
        self.roots.push(id);
        id
    }

    /// Adds a member to a type declaration.
    ///
    /// # Errors
    /// Returns an error if the parent does not exist or is not a class,
    /// interface, or enum.
    pub fn add_child(&mut self, parent: EntryId, entry: DeclarationEntry) -> Result<EntryId> {
        let parent_kind = self.entry(parent)?.kind;
        if !parent_kind.is_type() {
            return Err(Error::new(ErrorKind::InvalidTree(format!(
                "{parent_kind} {parent} cannot own members"
            ))));
        }
        let id = self.push(entry, Some(parent));
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    /// Returns the entry with the given id, if it exists.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&DeclarationEntry> {
        self.nodes.get(id.index()).map(|n| &n.entry)
    }

    /// Returns the entry with the given id.
    ///
    /// # Errors
    /// Returns an error if the id does not belong to this tree.
    pub fn entry(&self, id: EntryId) -> Result<&DeclarationEntry> {
        self.get(id).ok_or_else(|| Error::entry_not_found(id))
    }

    /// Returns true if the id belongs to this tree.
    #[must_use]
    pub fn contains(&self, id: EntryId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Returns the enclosing scope of an entry (`None` for top-level entries).
    #[must_use]
    pub fn parent(&self, id: EntryId) -> Option<EntryId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    /// Returns the direct members of a type declaration.
    #[must_use]
    pub fn children(&self, id: EntryId) -> &[EntryId] {
        self.nodes
            .get(id.index())
            .map_or(&[], |n| n.children.as_slice())
    }

    /// Returns the top-level declarations in source order.
    #[must_use]
    pub fn roots(&self) -> &[EntryId] {
        &self.roots
    }

    /// Returns the direct children of a scope (`None` = file scope).
    #[must_use]
    pub fn scope_children(&self, scope: Option<EntryId>) -> &[EntryId] {
        match scope {
            Some(id) => self.children(id),
            None => self.roots(),
        }
    }

    /// Returns the nesting depth of an entry (top-level entries are depth 0).
    #[must_use]
    pub fn depth(&self, id: EntryId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(p) = current {
            depth += 1;
            current = self.parent(p);
        }
        depth
    }

    /// Returns the total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all entry ids in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        (0..self.nodes.len()).map(|i| EntryId::new(i as u32))
    }

    /// Returns every entry reachable from the file scope, depth-first in
    /// source order.
    #[must_use]
    pub fn preorder(&self) -> Vec<EntryId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<EntryId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }
}
