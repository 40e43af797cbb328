//! Integration tests for output assembly and the emit plan

use rearranger_engine::{EmitItem, OutputAssembler, PlacedEntry, RuleInstanceTree, rearrange};
use rearranger_foundation::{DeclarationEntry, EntryId, EntryTree, ErrorKind};
use rearranger_settings::{AttributeGroup, CommentRule, RearrangerSettings};

struct Nested {
    tree: EntryTree,
    outer: EntryId,
    x: EntryId,
    run: EntryId,
    inner: EntryId,
    y: EntryId,
}

/// `class Outer { void run(); int x; class Inner { int y; } }`
fn nested() -> Nested {
    let mut tree = EntryTree::new();
    let outer = tree.add_root(DeclarationEntry::class("Outer"));
    let run = tree
        .add_child(outer, DeclarationEntry::method("run", "void"))
        .unwrap();
    let x = tree
        .add_child(outer, DeclarationEntry::field("x", "int"))
        .unwrap();
    let inner = tree
        .add_child(outer, DeclarationEntry::class("Inner"))
        .unwrap();
    let y = tree
        .add_child(inner, DeclarationEntry::field("y", "int"))
        .unwrap();
    Nested {
        tree,
        outer,
        x,
        run,
        inner,
        y,
    }
}

fn sectioned() -> RearrangerSettings {
    RearrangerSettings::new()
        .with_member_rule(CommentRule::new("// Fields"))
        .with_member_rule(AttributeGroup::fields())
        .with_member_rule(CommentRule::new("// Methods"))
        .with_member_rule(AttributeGroup::methods())
}

fn arranged(n: &Nested) -> RuleInstanceTree {
    rearrange(&n.tree, &sectioned()).unwrap()
}

#[test]
fn flatten_is_depth_first() {
    let n = nested();
    let flat = OutputAssembler::flatten(&arranged(&n));
    assert_eq!(flat, vec![n.outer, n.x, n.run, n.inner, n.y]);
}

#[test]
fn entries_resolve_in_output_order() {
    let n = nested();
    let names: Vec<_> = OutputAssembler::entries(&arranged(&n), &n.tree)
        .unwrap()
        .into_iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Outer", "x", "run", "Inner", "y"]);
}

#[test]
fn emit_plan_nests_members_and_separators() {
    let n = nested();
    let plan = OutputAssembler::emit_plan(&arranged(&n), &n.tree).unwrap();
    assert_eq!(
        plan,
        vec![
            EmitItem::Entry(n.outer),
            EmitItem::BeginMembers(n.outer),
            EmitItem::Separator("// Fields".to_string()),
            EmitItem::Entry(n.x),
            EmitItem::Separator("// Methods".to_string()),
            EmitItem::Entry(n.run),
            EmitItem::Entry(n.inner),
            EmitItem::BeginMembers(n.inner),
            EmitItem::Separator("// Fields".to_string()),
            EmitItem::Entry(n.y),
            EmitItem::Separator("// Methods".to_string()),
            EmitItem::EndMembers(n.inner),
            EmitItem::EndMembers(n.outer),
        ]
    );
}

#[test]
fn stale_separators_are_left_out_of_the_plan() {
    let mut tree = EntryTree::new();
    let class = tree.add_root(DeclarationEntry::class("A"));
    let stale = tree
        .add_child(class, DeclarationEntry::comment_block("// - Old"))
        .unwrap();
    let x = tree
        .add_child(class, DeclarationEntry::field("x", "int"))
        .unwrap();

    let settings = RearrangerSettings::new()
        .with_global_comment_pattern("// - .*")
        .with_member_rule(CommentRule::new("// - Fields"))
        .with_member_rule(AttributeGroup::fields());
    let arrangement = rearrange(&tree, &settings).unwrap();

    assert_eq!(OutputAssembler::flatten(&arrangement), vec![class, x, stale]);
    assert_eq!(
        OutputAssembler::emit_plan(&arrangement, &tree).unwrap(),
        vec![
            EmitItem::Entry(class),
            EmitItem::BeginMembers(class),
            EmitItem::Separator("// - Fields".to_string()),
            EmitItem::Entry(x),
            EmitItem::EndMembers(class),
        ]
    );
}

#[test]
fn verify_reports_duplicates_and_missing_entries() {
    let n = nested();
    let mut arrangement = arranged(&n);
    let members = arrangement.root.buckets[0].entries[0]
        .members
        .as_mut()
        .unwrap();
    let fields = members
        .buckets
        .iter_mut()
        .find(|b| b.ids().any(|id| id == n.x))
        .unwrap();
    fields.entries.clear();
    fields.entries.push(PlacedEntry::new(n.run, None));

    let err = OutputAssembler::verify(&arrangement, &n.tree).unwrap_err();
    let ErrorKind::InvariantViolation(violation) = &err.kind else {
        panic!("expected invariant violation, got {err}");
    };
    assert_eq!(violation.duplicated, vec![n.run]);
    assert_eq!(violation.missing, vec![n.x]);
    assert!(violation.unknown.is_empty());
    assert!(OutputAssembler::emit_plan(&arrangement, &n.tree).is_err());
}

#[test]
fn verify_reports_unknown_entries() {
    let n = nested();
    let mut arrangement = arranged(&n);
    arrangement.root.buckets[0]
        .entries
        .push(PlacedEntry::new(EntryId::new(99), None));

    let err = OutputAssembler::assemble(&arrangement, &n.tree).unwrap_err();
    let ErrorKind::InvariantViolation(violation) = &err.kind else {
        panic!("expected invariant violation, got {err}");
    };
    assert_eq!(violation.unknown, vec![EntryId::new(99)]);
    assert!(violation.duplicated.is_empty() && violation.missing.is_empty());
}
