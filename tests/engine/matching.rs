//! Integration tests for rule compilation and attribute matching

use rearranger_engine::{AttributeMatcher, MatchFailure, RuleSet, ScopeContext, classify};
use rearranger_foundation::{
    DeclarationEntry, EntryTree, ErrorKind, Modifiers, Protection, RuleList,
};
use rearranger_settings::{
    AttributeGroup, Criterion, GetterSetterDefinition, MethodTypeCriterion, ModifierCriterion,
    PatternCriterion, RearrangerSettings,
};

fn matcher(group: &AttributeGroup) -> AttributeMatcher {
    AttributeMatcher::compile(group, GetterSetterDefinition::default()).unwrap()
}

fn matches(group: &AttributeGroup, entry: &DeclarationEntry) -> bool {
    matcher(group).matches(entry, &ScopeContext::default())
}

// =============================================================================
// Patterns
// =============================================================================

#[test]
fn name_patterns_match_whole_names() {
    let rule = AttributeGroup::fields().with_name("LOG");
    assert!(matches(&rule, &DeclarationEntry::field("LOG", "Logger")));
    assert!(!matches(&rule, &DeclarationEntry::field("LOGGER", "Logger")));
    assert!(!matches(&rule, &DeclarationEntry::field("MY_LOG", "Logger")));
}

#[test]
fn empty_pattern_matches_only_empty_text() {
    let rule = AttributeGroup::fields().with_comment("");
    assert!(matches(&rule, &DeclarationEntry::field("x", "int")));
    assert!(!matches(
        &rule,
        &DeclarationEntry::field("x", "int").with_comment("/** doc */")
    ));
}

#[test]
fn alternation_is_anchored_as_a_whole() {
    let rule = AttributeGroup::methods().with_name("get.*|is.*");
    assert!(matches(&rule, &DeclarationEntry::method("isOpen", "boolean")));
    assert!(matches(&rule, &DeclarationEntry::method("getX", "int")));
    assert!(!matches(&rule, &DeclarationEntry::method("forget", "void")));
}

#[test]
fn inverted_type_pattern() {
    let rule = AttributeGroup::fields()
        .with_criterion(Criterion::Type(PatternCriterion::matching("int").inverted()));
    assert!(!matches(&rule, &DeclarationEntry::field("x", "int")));
    assert!(matches(&rule, &DeclarationEntry::field("s", "String")));
}

#[test]
fn invalid_patterns_fail_compilation() {
    let settings = RearrangerSettings::new().with_class_rule(AttributeGroup::classes().with_name("("));
    let err = RuleSet::compile(&settings).unwrap_err();
    let ErrorKind::InvalidPattern { attribute, pattern, .. } = &err.kind else {
        panic!("expected invalid pattern, got {err}");
    };
    assert_eq!(attribute, "name");
    assert_eq!(pattern, "(");
    assert_eq!(err.context.as_ref().unwrap().list, Some(RuleList::Class));
}

// =============================================================================
// Modifiers and bounds
// =============================================================================

#[test]
fn disabled_criteria_always_pass() {
    let rule = AttributeGroup::fields()
        .with_criterion(Criterion::Modifier(
            ModifierCriterion::required(Modifiers::STATIC).with_enabled(false),
        ))
        .with_criterion(Criterion::Name(PatternCriterion::disabled()));
    assert!(matches(&rule, &DeclarationEntry::field("x", "int")));
}

#[test]
fn modifier_truth_table() {
    let plain = DeclarationEntry::field("x", "int");
    let fin = DeclarationEntry::field("y", "int").with_modifiers(Modifiers::FINAL);

    let required = AttributeGroup::fields().with_modifier(Modifiers::FINAL);
    assert!(!matches(&required, &plain));
    assert!(matches(&required, &fin));

    let forbidden = AttributeGroup::fields().without_modifier(Modifiers::FINAL);
    assert!(matches(&forbidden, &plain));
    assert!(!matches(&forbidden, &fin));

    let inverted = AttributeGroup::fields().with_criterion(Criterion::Modifier(
        ModifierCriterion::required(Modifiers::FINAL).inverted(),
    ));
    assert!(matches(&inverted, &plain));
    assert!(!matches(&inverted, &fin));
}

#[test]
fn package_modifier_agrees_with_package_protection() {
    let package = DeclarationEntry::field("count", "int");
    let private = DeclarationEntry::field("total", "int").with_modifiers(Modifiers::PRIVATE);

    let by_flag = AttributeGroup::fields().with_modifier(Modifiers::PACKAGE);
    let by_level = AttributeGroup::fields().with_protection([Protection::Package]);
    for rule in [&by_flag, &by_level] {
        assert!(matches(rule, &package));
        assert!(!matches(rule, &private));
    }

    let not_package = AttributeGroup::fields().without_modifier(Modifiers::PACKAGE);
    assert!(!matches(&not_package, &package));
    assert!(matches(&not_package, &private));
}

#[test]
fn parameter_bounds_apply_to_methods_only() {
    let rule = AttributeGroup::methods().with_min_params(1).with_max_params(2);
    let none = DeclarationEntry::method("a", "void");
    let one = DeclarationEntry::method("b", "void").with_parameter("x", "int");
    let three = DeclarationEntry::method("c", "void")
        .with_parameter("x", "int")
        .with_parameter("y", "int")
        .with_parameter("z", "int");
    assert!(!matches(&rule, &none));
    assert!(matches(&rule, &one));
    assert!(!matches(&rule, &three));
    assert!(!matches(&rule, &DeclarationEntry::initializer(true)));
}

#[test]
fn contradictory_bounds_are_rejected() {
    let settings = RearrangerSettings::new()
        .with_member_rule(AttributeGroup::methods().with_min_params(3).with_max_params(1));
    let err = RuleSet::compile(&settings).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err.context.as_ref().unwrap().rule, Some(0));
}

// =============================================================================
// Method types
// =============================================================================

#[test]
fn method_types_classify_methods() {
    let ctor = DeclarationEntry::constructor("A");
    let getter = DeclarationEntry::method("getName", "String");
    let equals = DeclarationEntry::method("equals", "boolean").with_parameter("o", "Object");
    let other = DeclarationEntry::method("run", "void");

    let ctors = AttributeGroup::methods().with_method_type(MethodTypeCriterion::constructors());
    let accessors =
        AttributeGroup::methods().with_method_type(MethodTypeCriterion::getters_setters());
    let canonical =
        AttributeGroup::methods().with_method_type(MethodTypeCriterion::canonical_methods());
    let rest = AttributeGroup::methods().with_method_type(MethodTypeCriterion::other_methods());

    assert!(matches(&ctors, &ctor) && !matches(&ctors, &getter));
    assert!(matches(&accessors, &getter) && !matches(&accessors, &other));
    assert!(matches(&canonical, &equals) && !matches(&canonical, &other));
    assert!(matches(&rest, &other) && !matches(&rest, &equals));

    let not_ctors = AttributeGroup::methods()
        .with_method_type(MethodTypeCriterion::constructors().inverted());
    assert!(!matches(&not_ctors, &ctor));
    assert!(matches(&not_ctors, &other));
}

#[test]
fn getters_can_require_a_field() {
    let mut tree = EntryTree::new();
    let class = tree.add_root(DeclarationEntry::class("A"));
    tree.add_child(class, DeclarationEntry::field("name", "String")).unwrap();
    let scope = ScopeContext::build(&tree, Some(class));

    let strict = GetterSetterDefinition::matching_fields();
    let get_name = DeclarationEntry::method("getName", "String");
    let get_age = DeclarationEntry::method("getAge", "int");
    assert!(classify(&get_name, &strict, &scope).is_some());
    assert!(classify(&get_age, &strict, &scope).is_none());
    assert!(classify(&get_age, &GetterSetterDefinition::default(), &scope).is_some());
}

#[test]
fn first_failure_names_the_criterion() {
    let rule = AttributeGroup::fields()
        .with_modifier(Modifiers::STATIC)
        .with_name("LOG.*");
    let m = matcher(&rule);
    let scope = ScopeContext::default();

    let entry = DeclarationEntry::field("LOG", "Logger");
    let failure = m.first_failure(&entry, &scope).unwrap();
    assert!(matches!(failure, MatchFailure::Criterion { index: 0, .. }));
    assert_eq!(failure.to_string(), "modifier criterion failed: static");

    let method = DeclarationEntry::method("run", "void");
    assert!(matches!(
        m.first_failure(&method, &scope),
        Some(MatchFailure::KindMismatch { .. })
    ));
}
