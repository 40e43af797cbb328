//! Integration tests for host sessions, sinks and extensions

use std::cell::RefCell;
use std::rc::Rc;

use rearranger_engine::{
    EmitItem, EmitSink, Extension, Outcome, RearrangeSession, RuleInstanceTree,
};
use rearranger_foundation::{DeclarationEntry, EntryTree, Error, ErrorCategory, ErrorKind, Result};
use rearranger_settings::{AttributeGroup, RearrangerSettings};

fn tree() -> EntryTree {
    let mut tree = EntryTree::new();
    let class = tree.add_root(DeclarationEntry::class("A"));
    tree.add_child(class, DeclarationEntry::method("run", "void"))
        .unwrap();
    tree.add_child(class, DeclarationEntry::field("x", "int"))
        .unwrap();
    tree
}

fn settings() -> RearrangerSettings {
    RearrangerSettings::new()
        .with_member_rule(AttributeGroup::fields())
        .with_member_rule(AttributeGroup::methods())
}

/// Records the names it sees, sharing the log with the test.
struct Recorder {
    name: &'static str,
    log: Rc<RefCell<Vec<String>>>,
}

impl Extension for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    fn after_arrange(
        &mut self,
        tree: &EntryTree,
        arrangement: &RuleInstanceTree,
    ) -> std::result::Result<(), String> {
        let first = arrangement
            .root
            .ids()
            .first()
            .and_then(|&id| tree.get(id))
            .map(|e| e.name.clone())
            .unwrap_or_default();
        self.log.borrow_mut().push(format!("{}:{first}", self.name));
        Ok(())
    }
}

struct Failing;

impl Extension for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn after_arrange(
        &mut self,
        _tree: &EntryTree,
        _arrangement: &RuleInstanceTree,
    ) -> std::result::Result<(), String> {
        Err("disk full".to_string())
    }
}

struct ReadOnlySink;

impl EmitSink for ReadOnlySink {
    fn emit(&mut self, _tree: &EntryTree, _plan: &[EmitItem]) -> Result<()> {
        Err(Error::internal("document is read-only"))
    }
}

#[test]
fn applied_runs_emit_the_plan() {
    let mut session = RearrangeSession::new(&settings()).unwrap();
    let mut plan: Vec<EmitItem> = Vec::new();
    let outcome = session.run(&tree(), |_| true, &mut plan).unwrap();

    let Outcome::Applied(arrangement) = outcome else {
        panic!("expected the run to apply");
    };
    assert_eq!(arrangement.len(), 3);
    let names: Vec<_> = plan
        .iter()
        .filter_map(|item| match item {
            EmitItem::Entry(id) => Some(tree().get(*id).unwrap().name.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["A", "x", "run"]);
}

#[test]
fn confirm_sees_the_arrangement() {
    let settings = settings().with_ask_before_rearranging(true);
    let mut session = RearrangeSession::new(&settings).unwrap();
    let mut seen = 0;
    let mut plan: Vec<EmitItem> = Vec::new();
    let outcome = session
        .run(
            &tree(),
            |arrangement| {
                seen = arrangement.len();
                false
            },
            &mut plan,
        )
        .unwrap();
    assert_eq!(outcome, Outcome::Declined);
    assert_eq!(seen, 3);
    assert!(plan.is_empty());
}

#[test]
fn extensions_run_in_registration_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut session = RearrangeSession::new(&settings()).unwrap();
    for name in ["first", "second"] {
        session
            .register_extension(Recorder {
                name,
                log: Rc::clone(&log),
            })
            .unwrap();
    }
    assert_eq!(session.extensions().names(), vec!["first", "second"]);

    let mut plan: Vec<EmitItem> = Vec::new();
    session.run(&tree(), |_| true, &mut plan).unwrap();
    assert_eq!(*log.borrow(), vec!["first:A", "second:A"]);
}

#[test]
fn duplicate_extension_names_are_rejected() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut session = RearrangeSession::new(&settings()).unwrap();
    session
        .register_extension(Recorder {
            name: "audit",
            log: Rc::clone(&log),
        })
        .unwrap();
    let err = session
        .register_extension(Recorder {
            name: "audit",
            log,
        })
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateExtension(_)));
    assert_eq!(session.extensions().len(), 1);
}

#[test]
fn sink_failures_skip_extensions() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut session = RearrangeSession::new(&settings()).unwrap();
    session
        .register_extension(Recorder {
            name: "audit",
            log: Rc::clone(&log),
        })
        .unwrap();

    let err = session.run(&tree(), |_| true, &mut ReadOnlySink).unwrap_err();
    assert!(err.to_string().contains("read-only"));
    assert!(log.borrow().is_empty());
}

#[test]
fn extension_failures_are_reported() {
    let mut session = RearrangeSession::new(&settings()).unwrap();
    session.register_extension(Failing).unwrap();

    let mut plan: Vec<EmitItem> = Vec::new();
    let err = session.run(&tree(), |_| true, &mut plan).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Host);
    assert_eq!(err.to_string(), "extension failing failed: disk full");
    assert!(!plan.is_empty());
}

#[test]
fn invalid_settings_fail_to_open_a_session() {
    let settings = RearrangerSettings::new().with_member_rule(AttributeGroup::fields().with_name("["));
    let err = RearrangeSession::new(&settings).unwrap_err();
    assert!(err.is_configuration());
}
