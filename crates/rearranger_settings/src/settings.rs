//! Complete rearranger configuration.

use im::Vector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rearranger_foundation::{Modifiers, RuleList};

use crate::criteria::MethodTypeCriterion;
use crate::display::DisplaySettings;
use crate::related::RelatedMethodsSettings;
use crate::rule::{AttributeGroup, GetterSetterDefinition, OverloadOrder, Rule};

/// Where entries claimed by no rule are placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnmatchedPlacement {
    /// After every rule bucket.
    #[default]
    End,
    /// Before every rule bucket.
    Start,
}

/// Immutable configuration for one rearrangement run.
///
/// Rule lists are persistent vectors, so [`snapshot`](Self::snapshot) and
/// the `with_*` builders share structure with the original.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RearrangerSettings {
    /// Rules for top-level declarations.
    pub class_rules: Vector<Rule>,
    /// Rules for class members.
    pub member_rules: Vector<Rule>,
    /// Keep a setter next to the getter of the same property.
    pub keep_getters_setters_together: bool,
    /// Keep getters and setters next to the field they access.
    pub keep_getters_setters_with_property: bool,
    /// Keep overloaded methods next to the first overload.
    pub keep_overloaded_methods_together: bool,
    /// Overload order used when a rule does not set one.
    pub overloaded_order: OverloadOrder,
    /// Pattern identifying generated separator comments (empty = none).
    pub global_comment_pattern: String,
    /// Ask the host to confirm before applying.
    pub ask_before_rearranging: bool,
    /// Arrange nested class bodies with the member rules.
    pub rearrange_inner_classes: bool,
    /// Getter/setter definition used when a rule has none.
    pub getter_setter: GetterSetterDefinition,
    /// Related-method configuration.
    pub related: RelatedMethodsSettings,
    /// Placement of the leftover bucket.
    pub unmatched_placement: UnmatchedPlacement,
    /// Preview options.
    pub display: DisplaySettings,
}

impl Default for RearrangerSettings {
    fn default() -> Self {
        Self {
            class_rules: Vector::new(),
            member_rules: Vector::new(),
            keep_getters_setters_together: false,
            keep_getters_setters_with_property: false,
            keep_overloaded_methods_together: false,
            overloaded_order: OverloadOrder::RetainOriginal,
            global_comment_pattern: String::new(),
            ask_before_rearranging: false,
            rearrange_inner_classes: true,
            getter_setter: GetterSetterDefinition::default(),
            related: RelatedMethodsSettings::default(),
            unmatched_placement: UnmatchedPlacement::End,
            display: DisplaySettings::default(),
        }
    }
}

impl RearrangerSettings {
    /// Creates settings with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stock configuration for Java sources.
    ///
    /// Members: static fields, fields, static initializers, constructors,
    /// getters/setters, canonical methods, other methods, inner interfaces,
    /// inner classes. Top level: interfaces, then classes.
    #[must_use]
    pub fn java_defaults() -> Self {
        Self::new()
            .with_class_rule(AttributeGroup::interfaces())
            .with_class_rule(AttributeGroup::classes())
            .with_member_rule(AttributeGroup::fields().with_modifier(Modifiers::STATIC))
            .with_member_rule(AttributeGroup::fields())
            .with_member_rule(
                AttributeGroup::methods().with_modifier(Modifiers::STATIC_INITIALIZER),
            )
            .with_member_rule(
                AttributeGroup::methods().with_method_type(MethodTypeCriterion::constructors()),
            )
            .with_member_rule(
                AttributeGroup::methods()
                    .with_method_type(MethodTypeCriterion::getters_setters()),
            )
            .with_member_rule(
                AttributeGroup::methods()
                    .with_method_type(MethodTypeCriterion::canonical_methods()),
            )
            .with_member_rule(AttributeGroup::methods())
            .with_member_rule(AttributeGroup::interfaces())
            .with_member_rule(AttributeGroup::classes())
            .with_keep_getters_setters_together(true)
            .with_keep_overloaded_methods_together(true)
    }

    /// Returns an independent copy for one run.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Returns the rules of one list.
    #[must_use]
    pub fn rules(&self, list: RuleList) -> &Vector<Rule> {
        match list {
            RuleList::Class => &self.class_rules,
            RuleList::Member => &self.member_rules,
        }
    }

    /// Appends a top-level rule.
    #[must_use]
    pub fn with_class_rule(mut self, rule: impl Into<Rule>) -> Self {
        self.class_rules.push_back(rule.into());
        self
    }

    /// Appends a member rule.
    #[must_use]
    pub fn with_member_rule(mut self, rule: impl Into<Rule>) -> Self {
        self.member_rules.push_back(rule.into());
        self
    }

    /// Replaces the member rules.
    #[must_use]
    pub fn with_member_rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.member_rules = rules.into_iter().collect();
        self
    }

    /// Replaces the top-level rules.
    #[must_use]
    pub fn with_class_rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.class_rules = rules.into_iter().collect();
        self
    }

    /// Builder method for the getter/setter pairing toggle.
    #[must_use]
    pub fn with_keep_getters_setters_together(mut self, keep: bool) -> Self {
        self.keep_getters_setters_together = keep;
        self
    }

    /// Builder method for the accessor-with-property toggle.
    #[must_use]
    pub fn with_keep_getters_setters_with_property(mut self, keep: bool) -> Self {
        self.keep_getters_setters_with_property = keep;
        self
    }

    /// Builder method for the overload grouping toggle.
    #[must_use]
    pub fn with_keep_overloaded_methods_together(mut self, keep: bool) -> Self {
        self.keep_overloaded_methods_together = keep;
        self
    }

    /// Builder method for the default overload order.
    #[must_use]
    pub fn with_overloaded_order(mut self, order: OverloadOrder) -> Self {
        self.overloaded_order = order;
        self
    }

    /// Builder method for the generated-comment pattern.
    #[must_use]
    pub fn with_global_comment_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.global_comment_pattern = pattern.into();
        self
    }

    /// Builder method for the confirmation flag.
    #[must_use]
    pub fn with_ask_before_rearranging(mut self, ask: bool) -> Self {
        self.ask_before_rearranging = ask;
        self
    }

    /// Builder method for nested class arrangement.
    #[must_use]
    pub fn with_rearrange_inner_classes(mut self, rearrange: bool) -> Self {
        self.rearrange_inner_classes = rearrange;
        self
    }

    /// Builder method for the default getter/setter definition.
    #[must_use]
    pub fn with_getter_setter(mut self, definition: GetterSetterDefinition) -> Self {
        self.getter_setter = definition;
        self
    }

    /// Builder method for related-method settings.
    #[must_use]
    pub fn with_related(mut self, related: RelatedMethodsSettings) -> Self {
        self.related = related;
        self
    }

    /// Builder method for leftover placement.
    #[must_use]
    pub fn with_unmatched_placement(mut self, placement: UnmatchedPlacement) -> Self {
        self.unmatched_placement = placement;
        self
    }

    /// Builder method for display settings.
    #[must_use]
    pub fn with_display(mut self, display: DisplaySettings) -> Self {
        self.display = display;
        self
    }
}
