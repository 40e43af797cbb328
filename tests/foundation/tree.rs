//! Integration tests for the entry tree

use rearranger_foundation::{DeclarationEntry, EntryId, EntryTree, ErrorKind};

#[test]
fn preorder_visits_members_before_next_sibling() {
    let mut tree = EntryTree::new();
    let a = tree.add_root(DeclarationEntry::class("A"));
    let inner = tree.add_child(a, DeclarationEntry::class("Inner")).unwrap();
    let f = tree.add_child(inner, DeclarationEntry::field("f", "int")).unwrap();
    let m = tree.add_child(a, DeclarationEntry::method("m", "void")).unwrap();
    let b = tree.add_root(DeclarationEntry::interface("B"));

    assert_eq!(tree.preorder(), vec![a, inner, f, m, b]);
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.depth(f), 2);
    assert_eq!(tree.parent(inner), Some(a));
    assert_eq!(tree.scope_children(None), &[a, b]);
    assert_eq!(tree.scope_children(Some(a)), &[inner, m]);
}

#[test]
fn members_need_a_type_parent() {
    let mut tree = EntryTree::new();
    let a = tree.add_root(DeclarationEntry::class("A"));
    let field = tree.add_child(a, DeclarationEntry::field("x", "int")).unwrap();

    let err = tree
        .add_child(field, DeclarationEntry::field("y", "int"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidTree(_)));

    let err = tree
        .add_child(EntryId::new(10), DeclarationEntry::field("y", "int"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EntryNotFound(_)));
    assert_eq!(tree.len(), 2);
}
