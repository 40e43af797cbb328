//! Integration tests for arrangement outlines

use rearranger_debug::{ArrangementFormatter, OutlineFormatter};
use rearranger_engine::RearrangementEngine;
use rearranger_foundation::{DeclarationEntry, EntryTree};
use rearranger_settings::{AttributeGroup, DisplaySettings, RearrangerSettings};

/// `class Outer { int x; class Inner { int b; int a; } }`
fn nested() -> EntryTree {
    let mut tree = EntryTree::new();
    let outer = tree.add_root(DeclarationEntry::class("Outer"));
    tree.add_child(outer, DeclarationEntry::field("x", "int"))
        .unwrap();
    let inner = tree
        .add_child(outer, DeclarationEntry::class("Inner"))
        .unwrap();
    for name in ["b", "a"] {
        tree.add_child(inner, DeclarationEntry::field(name, "int"))
            .unwrap();
    }
    tree
}

fn outline(tree: &EntryTree, settings: &RearrangerSettings, formatter: &OutlineFormatter) -> String {
    let engine = RearrangementEngine::from_settings(settings).unwrap();
    let arrangement = engine.arrange(tree).unwrap();
    formatter.format(&arrangement, tree, engine.rules())
}

#[test]
fn nested_scopes_are_indented() {
    let settings = RearrangerSettings::new().with_member_rule(AttributeGroup::fields());
    let formatter = OutlineFormatter::new(DisplaySettings::default()).with_indent(4);
    assert_eq!(
        outline(&nested(), &settings, &formatter),
        "class Outer\n    x\n    class Inner\n        b\n        a\n"
    );
}

#[test]
fn unarranged_scopes_get_their_own_heading() {
    let settings = RearrangerSettings::new()
        .with_member_rule(AttributeGroup::fields())
        .with_rearrange_inner_classes(false);
    let formatter = OutlineFormatter::new(DisplaySettings::default().with_show_rules(true));
    assert_eq!(
        outline(&nested(), &settings, &formatter),
        "[unmatched]\n\
         class Outer\n  \
         [rule 1: all fields]\n  \
         x\n  \
         [unmatched]\n  \
         class Inner\n    \
         [original order]\n    \
         b\n    \
         a\n"
    );
}

#[test]
fn stale_separators_show_only_with_comments() {
    let mut tree = EntryTree::new();
    let class = tree.add_root(DeclarationEntry::class("A"));
    tree.add_child(class, DeclarationEntry::comment_block("// - Old"))
        .unwrap();
    tree.add_child(class, DeclarationEntry::field("x", "int"))
        .unwrap();
    let settings = RearrangerSettings::new()
        .with_global_comment_pattern("// - .*")
        .with_member_rule(AttributeGroup::fields());

    let quiet = OutlineFormatter::new(DisplaySettings::default());
    assert_eq!(outline(&tree, &settings, &quiet), "class A\n  x\n");

    let chatty = OutlineFormatter::new(
        DisplaySettings::default()
            .with_show_rules(true)
            .with_show_comments(true),
    );
    assert_eq!(
        outline(&tree, &settings, &chatty),
        "[unmatched]\n\
         class A\n  \
         [rule 1: all fields]\n  \
         x\n  \
         [stale separators]\n  \
         comment \"// - Old\"\n"
    );
}

#[test]
fn formatter_can_follow_the_rule_settings() {
    let settings = RearrangerSettings::new().with_display(DisplaySettings::verbose());
    let engine = RearrangementEngine::from_settings(&settings).unwrap();
    let formatter = OutlineFormatter::for_rules(engine.rules());
    assert_eq!(formatter.display, DisplaySettings::verbose());
    assert_eq!(formatter.indent, 2);
}

#[test]
fn constructors_have_no_return_type() {
    let formatter = OutlineFormatter::new(DisplaySettings::default());
    let ctor = DeclarationEntry::constructor("Point").with_parameter("x", "int");
    assert_eq!(formatter.label(&ctor), "Point(int)");

    let init = DeclarationEntry::initializer(true);
    assert_eq!(formatter.label(&init), "static {...}");

    let iface = DeclarationEntry::interface("Shape");
    assert_eq!(formatter.label(&iface), "interface Shape");
}
