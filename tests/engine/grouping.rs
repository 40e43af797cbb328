//! Integration tests for related-entry grouping through the full engine

use rearranger_engine::{Relation, rearrange};
use rearranger_foundation::{
    DeclarationEntry, EntryId, EntryTree, ErrorKind, Modifiers, Protection,
};
use rearranger_settings::{
    AttributeGroup, CallerChoice, ExtractedMethodsSettings, ExtractedOrder, OverloadOrder,
    Placement, PrimaryMethodSetting, RearrangerSettings, RelatedMethodsSettings, RelationKind,
};

/// Builds one class and returns its id plus member ids in declaration order.
fn class_with(members: Vec<DeclarationEntry>) -> (EntryTree, EntryId, Vec<EntryId>) {
    let mut tree = EntryTree::new();
    let class = tree.add_root(DeclarationEntry::class("Sample"));
    let ids = members
        .into_iter()
        .map(|m| tree.add_child(class, m).unwrap())
        .collect();
    (tree, class, ids)
}

fn member_order(tree: &EntryTree, class: EntryId, settings: &RearrangerSettings) -> Vec<EntryId> {
    rearrange(tree, settings)
        .unwrap()
        .scope(Some(class))
        .unwrap()
        .ids()
}

fn private(name: &str) -> DeclarationEntry {
    DeclarationEntry::method(name, "void").with_modifiers(Modifiers::PRIVATE)
}

#[test]
fn accessors_follow_their_field() {
    let (tree, class, ids) = class_with(vec![
        DeclarationEntry::method("getY", "int"),
        DeclarationEntry::field("x", "int"),
        DeclarationEntry::field("y", "int"),
        DeclarationEntry::method("getX", "int"),
        DeclarationEntry::method("setX", "void").with_parameter("x", "int"),
    ]);
    let [get_y, x, y, get_x, set_x] = ids[..] else {
        unreachable!()
    };

    let settings = RearrangerSettings::new()
        .with_member_rule(AttributeGroup::fields())
        .with_member_rule(AttributeGroup::methods())
        .with_keep_getters_setters_with_property(true);
    assert_eq!(
        member_order(&tree, class, &settings),
        vec![x, get_x, set_x, y, get_y]
    );
}

#[test]
fn precedence_decides_the_primary() {
    let (tree, _, ids) = class_with(vec![
        DeclarationEntry::field("x", "int"),
        DeclarationEntry::method("getX", "int"),
        DeclarationEntry::method("setX", "void").with_parameter("x", "int"),
    ]);
    let [x, get_x, set_x] = ids[..] else {
        unreachable!()
    };

    let base = RearrangerSettings::new()
        .with_member_rule(AttributeGroup::fields())
        .with_member_rule(AttributeGroup::methods())
        .with_keep_getters_setters_with_property(true)
        .with_keep_getters_setters_together(true);

    let arrangement = rearrange(&tree, &base).unwrap();
    assert_eq!(
        arrangement.find(set_x).unwrap().relation,
        Some(Relation {
            primary: x,
            kind: RelationKind::GetterSetterWithProperty,
        })
    );

    let pairs_first = base.with_related(RelatedMethodsSettings::default().with_precedence([
        RelationKind::GetterSetter,
        RelationKind::GetterSetterWithProperty,
    ]));
    let arrangement = rearrange(&tree, &pairs_first).unwrap();
    assert_eq!(
        arrangement.find(set_x).unwrap().relation,
        Some(Relation {
            primary: get_x,
            kind: RelationKind::GetterSetter,
        })
    );
    assert_eq!(
        arrangement.find(get_x).unwrap().relation.map(|r| r.primary),
        Some(x)
    );
}

#[test]
fn overloads_gather_in_descending_order() {
    let (tree, class, ids) = class_with(vec![
        DeclarationEntry::method("foo", "void").with_parameter("a", "int"),
        DeclarationEntry::method("bar", "void"),
        DeclarationEntry::method("foo", "void")
            .with_parameter("a", "int")
            .with_parameter("b", "int"),
        DeclarationEntry::method("foo", "void"),
    ]);
    let [foo1, bar, foo2, foo0] = ids[..] else {
        unreachable!()
    };

    let settings = RearrangerSettings::new()
        .with_member_rule(AttributeGroup::methods())
        .with_keep_overloaded_methods_together(true)
        .with_overloaded_order(OverloadOrder::Descending);
    assert_eq!(
        member_order(&tree, class, &settings),
        vec![foo2, foo1, foo0, bar]
    );
}

#[test]
fn extracted_helpers_join_the_last_caller() {
    let (tree, class, ids) = class_with(vec![
        DeclarationEntry::method("open", "void").with_call("check"),
        private("check"),
        DeclarationEntry::method("close", "void").with_call("check"),
    ]);
    let [open, check, close] = ids[..] else {
        unreachable!()
    };

    let first = RearrangerSettings::new()
        .with_member_rule(AttributeGroup::methods())
        .with_related(
            RelatedMethodsSettings::default().with_extracted(ExtractedMethodsSettings::enabled()),
        );
    assert_eq!(member_order(&tree, class, &first), vec![open, check, close]);

    let last = first.with_related(RelatedMethodsSettings::default().with_extracted(
        ExtractedMethodsSettings::enabled().with_caller(CallerChoice::Last),
    ));
    assert_eq!(member_order(&tree, class, &last), vec![open, close, check]);
}

#[test]
fn extracted_helpers_can_precede_the_caller_alphabetically() {
    let (tree, class, ids) = class_with(vec![
        private("zeta"),
        DeclarationEntry::method("main", "void")
            .with_call("zeta")
            .with_call("alpha"),
        private("alpha"),
    ]);
    let [zeta, main, alpha] = ids[..] else {
        unreachable!()
    };

    let settings = RearrangerSettings::new()
        .with_member_rule(AttributeGroup::methods())
        .with_related(
            RelatedMethodsSettings::default().with_extracted(
                ExtractedMethodsSettings::enabled()
                    .with_order(ExtractedOrder::Alphabetical)
                    .with_placement(Placement::Before),
            ),
        );
    assert_eq!(member_order(&tree, class, &settings), vec![alpha, zeta, main]);
}

#[test]
fn excluded_rules_keep_helpers_in_place() {
    let (tree, class, ids) = class_with(vec![
        private("helper"),
        DeclarationEntry::method("run", "void").with_call("helper"),
    ]);
    let [helper, run] = ids[..] else {
        unreachable!()
    };

    let settings = RearrangerSettings::new()
        .with_member_rule(
            AttributeGroup::methods()
                .with_protection([Protection::Private])
                .excluding_from_extracted(),
        )
        .with_member_rule(AttributeGroup::methods())
        .with_related(
            RelatedMethodsSettings::default().with_extracted(ExtractedMethodsSettings::enabled()),
        );
    assert_eq!(member_order(&tree, class, &settings), vec![helper, run]);
}

#[test]
fn public_helpers_need_opting_in() {
    let (tree, class, ids) = class_with(vec![
        DeclarationEntry::method("helper", "void").with_modifiers(Modifiers::PUBLIC),
        DeclarationEntry::method("run", "void").with_call("helper"),
    ]);
    let [helper, run] = ids[..] else {
        unreachable!()
    };

    let extracted = ExtractedMethodsSettings::enabled();
    let settings = RearrangerSettings::new()
        .with_member_rule(AttributeGroup::methods())
        .with_related(RelatedMethodsSettings::default().with_extracted(extracted));
    assert_eq!(member_order(&tree, class, &settings), vec![helper, run]);

    let settings = settings.with_related(
        RelatedMethodsSettings::default()
            .with_extracted(extracted.with_include_non_private(true)),
    );
    assert_eq!(member_order(&tree, class, &settings), vec![run, helper]);
}

#[test]
fn chains_of_helpers_nest_depth_first() {
    let (tree, class, ids) = class_with(vec![
        private("leaf"),
        private("middle").with_call("leaf"),
        DeclarationEntry::method("top", "void").with_call("middle"),
        DeclarationEntry::method("other", "void"),
    ]);
    let [leaf, middle, top, other] = ids[..] else {
        unreachable!()
    };

    let settings = RearrangerSettings::new()
        .with_member_rule(AttributeGroup::methods())
        .with_related(
            RelatedMethodsSettings::default().with_extracted(ExtractedMethodsSettings::enabled()),
        );
    assert_eq!(
        member_order(&tree, class, &settings),
        vec![top, middle, leaf, other]
    );
}

#[test]
fn disabled_relations_move_nothing() {
    let (tree, class, ids) = class_with(vec![
        DeclarationEntry::method("setX", "void").with_parameter("x", "int"),
        DeclarationEntry::method("run", "void"),
        DeclarationEntry::method("getX", "int"),
    ]);

    let settings = RearrangerSettings::new().with_member_rule(AttributeGroup::methods());
    let arrangement = rearrange(&tree, &settings).unwrap();
    let scope = arrangement.scope(Some(class)).unwrap();
    assert_eq!(scope.ids(), ids);
    assert!(scope.entries().all(|p| p.relation.is_none()));
}

#[test]
fn related_names_can_follow_the_captured_text() {
    let (tree, class, ids) = class_with(vec![
        DeclarationEntry::method("EditHelper", "void"),
        DeclarationEntry::method("close", "void"),
        DeclarationEntry::method("doEdit", "void"),
    ]);
    let [helper, close, edit] = ids[..] else {
        unreachable!()
    };

    let settings = RearrangerSettings::new()
        .with_member_rule(AttributeGroup::methods())
        .with_related(RelatedMethodsSettings::default().with_primary_method(
            PrimaryMethodSetting::new(r"do(\w+)").with_related("$1Helper"),
        ));
    let arrangement = rearrange(&tree, &settings).unwrap();
    assert_eq!(
        arrangement.scope(Some(class)).unwrap().ids(),
        vec![close, edit, helper]
    );
    assert_eq!(
        arrangement.find(helper).and_then(|p| p.relation),
        Some(Relation {
            primary: edit,
            kind: RelationKind::ByName,
        })
    );
}

#[test]
fn related_names_must_use_existing_groups() {
    let (tree, _, _) = class_with(vec![DeclarationEntry::method("doEdit", "void")]);
    let settings = RearrangerSettings::new()
        .with_member_rule(AttributeGroup::methods())
        .with_related(RelatedMethodsSettings::default().with_primary_method(
            PrimaryMethodSetting::new(r"do(\w+)").with_related("$2Helper"),
        ));
    let err = rearrange(&tree, &settings).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidConfiguration(_)));
}
