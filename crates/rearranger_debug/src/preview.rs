//! Arrangement previews.
//!
//! Renders a computed arrangement as an indented outline so the host can
//! show it before the user confirms.
//!
//! ```text
//! class Point
//!   [rule 2: all fields]
//!   x
//!   y
//!   [rule 4: getters/setters]
//!   getX() : int  <- rule 4
//!   setX(int) : void  <- rule 4 (getter/setter pair of getX)
//! ```

use std::fmt::Write;

use rearranger_engine::{
    BucketOrigin, PlacedEntry, RuleInstance, RuleInstanceTree, RuleSet, ScopeInstance,
};
use rearranger_foundation::{DeclarationEntry, EntryKind, EntryTree, RuleList};
use rearranger_settings::DisplaySettings;

// =============================================================================
// Formatter Trait
// =============================================================================

/// Renders an arrangement to text.
pub trait ArrangementFormatter {
    /// Formats the whole arrangement.
    fn format(&self, arrangement: &RuleInstanceTree, tree: &EntryTree, rules: &RuleSet) -> String;
}

// =============================================================================
// Outline Formatter
// =============================================================================

/// Indented outline honouring [`DisplaySettings`].
#[derive(Clone, Debug, Default)]
pub struct OutlineFormatter {
    /// What to show.
    pub display: DisplaySettings,
    /// Spaces per nesting level.
    pub indent: usize,
}

impl OutlineFormatter {
    /// Creates a formatter with the given display settings.
    #[must_use]
    pub fn new(display: DisplaySettings) -> Self {
        Self { display, indent: 2 }
    }

    /// Creates a formatter using the display settings the rules were
    /// compiled with.
    #[must_use]
    pub fn for_rules(rules: &RuleSet) -> Self {
        Self::new(rules.settings().display)
    }

    /// Builder method to set the indent width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    fn visible(&self, entry: &DeclarationEntry) -> bool {
        match entry.kind {
            EntryKind::Field => self.display.show_fields,
            EntryKind::Comment => self.display.show_comments,
            _ => true,
        }
    }

    /// Formats one entry's label.
    #[must_use]
    pub fn label(&self, entry: &DeclarationEntry) -> String {
        let d = &self.display;
        match entry.kind {
            EntryKind::Class | EntryKind::Interface | EntryKind::Enum => {
                format!("{} {}", entry.kind, entry.name)
            }
            EntryKind::Method => {
                let mut label = entry.signature(d.show_parameter_types, d.show_parameter_names);
                let typed = !entry.is_constructor() && !entry.type_name.is_empty();
                if d.show_type_after_method && typed {
                    let _ = write!(label, " : {}", entry.type_name);
                }
                label
            }
            _ => entry.display_name(),
        }
    }

    fn heading(bucket: &RuleInstance, list: Option<RuleList>, rules: &RuleSet) -> Option<String> {
        match bucket.origin {
            BucketOrigin::Rule { index, .. } => {
                let description = list
                    .and_then(|l| rules.group(l, index))
                    .map_or_else(String::new, |g| g.group.to_string());
                Some(format!("[rule {}: {description}]", index + 1))
            }
            BucketOrigin::Comment { .. } => None,
            BucketOrigin::Leftover => Some("[unmatched]".to_string()),
            BucketOrigin::OriginalOrder => Some("[original order]".to_string()),
            BucketOrigin::StaleSeparators => Some("[stale separators]".to_string()),
        }
    }

    fn write_scope(
        &self,
        out: &mut String,
        scope: &ScopeInstance,
        tree: &EntryTree,
        rules: &RuleSet,
        depth: usize,
    ) {
        let pad = " ".repeat(depth * self.indent);
        for bucket in &scope.buckets {
            if bucket.origin == BucketOrigin::StaleSeparators && !self.display.show_comments {
                continue;
            }
            if let Some(text) = &bucket.separator {
                let _ = writeln!(out, "{pad}{text}");
            }
            let shown = bucket
                .entries
                .iter()
                .any(|p| tree.get(p.id).is_some_and(|e| self.visible(e)));
            if !shown {
                continue;
            }
            if self.display.show_rules {
                if let Some(heading) = Self::heading(bucket, scope.rules, rules) {
                    let _ = writeln!(out, "{pad}{heading}");
                }
            }
            for placed in &bucket.entries {
                self.write_entry(out, placed, tree, rules, depth);
            }
        }
    }

    fn write_entry(
        &self,
        out: &mut String,
        placed: &PlacedEntry,
        tree: &EntryTree,
        rules: &RuleSet,
        depth: usize,
    ) {
        let Some(entry) = tree.get(placed.id) else {
            return;
        };
        if !self.visible(entry) {
            return;
        }

        let pad = " ".repeat(depth * self.indent);
        let _ = write!(out, "{pad}{}", self.label(entry));
        if self.display.show_matched_rules {
            if let Some(rule) = placed.rule {
                let _ = write!(out, "  <- rule {}", rule + 1);
            }
            if let Some(relation) = placed.relation {
                let primary = tree.get(relation.primary).map_or_else(
                    || relation.primary.to_string(),
                    DeclarationEntry::display_name,
                );
                let _ = write!(out, " ({} of {primary})", relation.kind);
            }
        }
        out.push('\n');

        if let Some(members) = &placed.members {
            self.write_scope(out, members, tree, rules, depth + 1);
        }
    }
}

impl ArrangementFormatter for OutlineFormatter {
    fn format(
        &self,
        arrangement: &RuleInstanceTree,
        tree: &EntryTree,
        rules: &RuleSet,
    ) -> String {
        let mut out = String::new();
        self.write_scope(&mut out, &arrangement.root, tree, rules, 0);
        out
    }
}
