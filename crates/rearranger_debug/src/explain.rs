//! "Why is this entry here?" explanations.
//!
//! Replays rule matching for a single entry: every rule in the entry's
//! list with its priority, whether it matched, and for the rules that did
//! not, the first criterion that rejected the entry. When an arrangement is
//! supplied, the explanation also records the bucket the entry landed in
//! and the relation that moved it.
//!
//! ```text
//! setX(int) in member rules
//!   rule 1 [priority 1] all fields: rule applies to fields but entry is a method
//!   rule 2 [priority 1] getters/setters: matched
//!   rule 3 [priority 1] all methods: matched
//!   claimed by rule 2 (declared first among equal priorities)
//!   moved next to getX (getter/setter pair)
//! ```

use std::fmt;

use rearranger_engine::{
    BucketOrigin, CompiledRule, MatchFailure, Relation, RuleInstanceTree, RuleMatch, RuleSet,
    ScopeContext, TieBreak, resolve_claim,
};
use rearranger_foundation::{DeclarationEntry, EntryId, EntryTree, Result, RuleList};

// =============================================================================
// Rule Verdict
// =============================================================================

/// How one rule judged the entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleVerdict {
    /// Position of the rule in its list.
    pub rule: usize,
    /// Human-readable rule description.
    pub description: String,
    /// The rule's priority.
    pub priority: i32,
    /// First reason the rule rejected the entry (`None` = matched).
    pub failure: Option<MatchFailure>,
}

impl RuleVerdict {
    /// Returns true if the rule matched.
    #[must_use]
    pub fn matched(&self) -> bool {
        self.failure.is_none()
    }
}

// =============================================================================
// Entry Explanation
// =============================================================================

/// Everything that decided an entry's position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryExplanation {
    /// The explained entry.
    pub entry: EntryId,
    /// Display name of the entry.
    pub name: String,
    /// Rule list consulted (`None` when the scope keeps original order).
    pub list: Option<RuleList>,
    /// True if the entry is a separator left by an earlier run.
    pub stale_separator: bool,
    /// One verdict per attribute group, in declaration order.
    pub verdicts: Vec<RuleVerdict>,
    /// The claiming rule, if any.
    pub winner: Option<RuleMatch>,
    /// What decided the claim.
    pub tie_break: Option<TieBreak>,
    /// Bucket the entry was placed in (needs an arrangement).
    pub bucket: Option<BucketOrigin>,
    /// Relation that moved the entry (needs an arrangement).
    pub relation: Option<Relation>,
    /// Display name of the relation's primary.
    pub primary_name: Option<String>,
}

impl EntryExplanation {
    /// Returns the verdicts of the rules that matched.
    pub fn matched(&self) -> impl Iterator<Item = &RuleVerdict> {
        self.verdicts.iter().filter(|v| v.matched())
    }

    /// Returns true if no rule claimed the entry.
    #[must_use]
    pub fn is_unmatched(&self) -> bool {
        self.winner.is_none()
    }
}

/// Explains how the rules judge one entry.
///
/// # Errors
/// Returns an `EntryNotFound` error if `id` is not part of `tree`.
pub fn explain_entry(rules: &RuleSet, tree: &EntryTree, id: EntryId) -> Result<EntryExplanation> {
    let entry = tree.entry(id)?;
    let parent = tree.parent(id);
    let nested_scope = parent.is_some_and(|p| tree.parent(p).is_some());

    let mut explanation = EntryExplanation {
        entry: id,
        name: entry.display_name(),
        list: None,
        stale_separator: false,
        verdicts: Vec::new(),
        winner: None,
        tie_break: None,
        bucket: None,
        relation: None,
        primary_name: None,
    };

    if nested_scope && !rules.settings().rearrange_inner_classes {
        return Ok(explanation);
    }
    let list = if parent.is_some() {
        RuleList::Member
    } else {
        RuleList::Class
    };
    explanation.list = Some(list);

    if rules.is_stale_separator(entry) {
        explanation.stale_separator = true;
        return Ok(explanation);
    }

    let scope = ScopeContext::build(tree, parent);
    explanation.verdicts = rules
        .rules(list)
        .iter()
        .filter_map(CompiledRule::as_group)
        .map(|g| RuleVerdict {
            rule: g.index,
            description: g.group.to_string(),
            priority: g.group.priority,
            failure: g.matcher.first_failure(entry, &scope),
        })
        .collect();

    let matches: Vec<RuleMatch> = explanation
        .matched()
        .map(|v| RuleMatch {
            rule: v.rule,
            priority: v.priority,
        })
        .collect();
    if let Some((winner, tie_break)) = resolve_claim(&matches) {
        explanation.winner = Some(winner);
        explanation.tie_break = Some(tie_break);
    }
    Ok(explanation)
}

/// Explains an entry and where it ended up in `arrangement`.
///
/// # Errors
/// Returns an `EntryNotFound` error if `id` is not part of `tree`.
pub fn explain_placement(
    rules: &RuleSet,
    tree: &EntryTree,
    arrangement: &RuleInstanceTree,
    id: EntryId,
) -> Result<EntryExplanation> {
    let mut explanation = explain_entry(rules, tree, id)?;
    if let Some(scope) = arrangement.scope(tree.parent(id)) {
        explanation.bucket = scope.bucket_of(id).map(|b| b.origin);
    }
    explanation.relation = arrangement.find(id).and_then(|p| p.relation);
    explanation.primary_name = explanation
        .relation
        .and_then(|r| tree.get(r.primary))
        .map(DeclarationEntry::display_name);
    Ok(explanation)
}

impl fmt::Display for EntryExplanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(list) = self.list else {
            return writeln!(f, "{} keeps its original position", self.name);
        };
        writeln!(f, "{} in {list} rules", self.name)?;
        if self.stale_separator {
            return writeln!(f, "  generated separator from an earlier run; set aside");
        }

        for verdict in &self.verdicts {
            write!(
                f,
                "  rule {} [priority {}] {}: ",
                verdict.rule + 1,
                verdict.priority,
                verdict.description
            )?;
            match &verdict.failure {
                None => writeln!(f, "matched")?,
                Some(failure) => writeln!(f, "{failure}")?,
            }
        }

        match (self.winner, self.tie_break) {
            (Some(winner), Some(tie_break)) => {
                writeln!(f, "  claimed by rule {} ({tie_break})", winner.rule + 1)?;
            }
            _ => writeln!(f, "  claimed by no rule; kept with unmatched entries")?,
        }

        if let Some(relation) = self.relation {
            let primary = self
                .primary_name
                .clone()
                .unwrap_or_else(|| relation.primary.to_string());
            writeln!(f, "  moved next to {primary} ({})", relation.kind)?;
        }
        Ok(())
    }
}
