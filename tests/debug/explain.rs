//! Integration tests for placement explanations

use rearranger_debug::{explain_entry, explain_placement};
use rearranger_engine::{BucketOrigin, MatchFailure, RearrangementEngine, RuleSet, TieBreak};
use rearranger_foundation::{DeclarationEntry, EntryId, EntryTree, RuleList};
use rearranger_settings::{AttributeGroup, RearrangerSettings};

fn fields_tree() -> (EntryTree, EntryId, EntryId) {
    let mut tree = EntryTree::new();
    let class = tree.add_root(DeclarationEntry::class("A"));
    let y = tree
        .add_child(class, DeclarationEntry::field("y", "int"))
        .unwrap();
    let x = tree
        .add_child(class, DeclarationEntry::field("x", "int"))
        .unwrap();
    (tree, x, y)
}

fn prioritised() -> RearrangerSettings {
    RearrangerSettings::new()
        .with_member_rule(AttributeGroup::fields())
        .with_member_rule(AttributeGroup::fields().with_name("x").with_priority(2))
}

#[test]
fn higher_priority_claims_over_declaration_order() {
    let (tree, x, _) = fields_tree();
    let rules = RuleSet::compile(&prioritised()).unwrap();
    let explanation = explain_entry(&rules, &tree, x).unwrap();

    assert_eq!(explanation.matched().count(), 2);
    assert_eq!(explanation.winner.map(|w| w.rule), Some(1));
    assert_eq!(explanation.tie_break, Some(TieBreak::HigherPriority));
    let text = explanation.to_string();
    assert!(text.starts_with("x in member rules\n"));
    assert!(text.contains("rule 2 [priority 2] fields whose names match 'x' [priority 2]: matched"));
    assert!(text.contains("claimed by rule 2 (highest priority)"));
}

#[test]
fn rejected_rules_name_the_failing_criterion() {
    let (tree, _, y) = fields_tree();
    let rules = RuleSet::compile(&prioritised()).unwrap();
    let explanation = explain_entry(&rules, &tree, y).unwrap();

    let verdict = &explanation.verdicts[1];
    assert!(!verdict.matched());
    assert!(matches!(
        verdict.failure,
        Some(MatchFailure::Criterion { index: 0, .. })
    ));
    assert_eq!(explanation.tie_break, Some(TieBreak::Unopposed));
    assert!(
        explanation
            .to_string()
            .contains("name criterion failed: whose names match 'x'")
    );
}

#[test]
fn placement_names_the_bucket() {
    let (tree, x, y) = fields_tree();
    let engine = RearrangementEngine::from_settings(&prioritised()).unwrap();
    let arrangement = engine.arrange(&tree).unwrap();

    let placed_x = explain_placement(engine.rules(), &tree, &arrangement, x).unwrap();
    assert_eq!(
        placed_x.bucket,
        Some(BucketOrigin::Rule {
            index: 1,
            priority: 2
        })
    );
    assert_eq!(placed_x.relation, None);

    let placed_y = explain_placement(engine.rules(), &tree, &arrangement, y).unwrap();
    assert_eq!(
        placed_y.bucket,
        Some(BucketOrigin::Rule {
            index: 0,
            priority: 1
        })
    );
}

#[test]
fn unarranged_scopes_keep_original_positions() {
    let mut tree = EntryTree::new();
    let outer = tree.add_root(DeclarationEntry::class("Outer"));
    let inner = tree
        .add_child(outer, DeclarationEntry::class("Inner"))
        .unwrap();
    let field = tree
        .add_child(inner, DeclarationEntry::field("z", "int"))
        .unwrap();
    let settings = RearrangerSettings::new()
        .with_member_rule(AttributeGroup::fields())
        .with_rearrange_inner_classes(false);
    let engine = RearrangementEngine::from_settings(&settings).unwrap();
    let arrangement = engine.arrange(&tree).unwrap();

    let explanation = explain_placement(engine.rules(), &tree, &arrangement, field).unwrap();
    assert_eq!(explanation.list, None);
    assert!(explanation.verdicts.is_empty());
    assert_eq!(explanation.bucket, Some(BucketOrigin::OriginalOrder));
    assert_eq!(explanation.to_string(), "z keeps its original position\n");

    let member = explain_entry(engine.rules(), &tree, inner).unwrap();
    assert_eq!(member.list, Some(RuleList::Member));
}

#[test]
fn stale_separators_are_explained_as_such() {
    let mut tree = EntryTree::new();
    let class = tree.add_root(DeclarationEntry::class("A"));
    let stale = tree
        .add_child(class, DeclarationEntry::comment_block("// - Old"))
        .unwrap();
    let settings = RearrangerSettings::new().with_global_comment_pattern("// - .*");
    let rules = RuleSet::compile(&settings).unwrap();

    let explanation = explain_entry(&rules, &tree, stale).unwrap();
    assert!(explanation.stale_separator);
    assert!(explanation.verdicts.is_empty());
    assert_eq!(
        explanation.to_string(),
        "comment \"// - Old\" in member rules\n  generated separator from an earlier run; set aside\n"
    );
}
