//! Related-method settings.
//!
//! Relations keep secondary entries (getters/setters, overloads, extracted
//! helpers, methods named after a primary) adjacent to a primary entry.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A kind of relation between a primary entry and its related entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RelationKind {
    /// Methods whose names derive from a configured primary name pattern.
    ByName,
    /// Getter and setter follow the field they access.
    GetterSetterWithProperty,
    /// Setter follows the getter of the same property.
    GetterSetter,
    /// Overloads follow the first overload of the same name.
    Overloads,
    /// Private helpers follow the method that calls them.
    Extracted,
}

impl RelationKind {
    /// Default precedence, strongest first.
    pub const DEFAULT_PRECEDENCE: [RelationKind; 5] = [
        RelationKind::ByName,
        RelationKind::GetterSetterWithProperty,
        RelationKind::GetterSetter,
        RelationKind::Overloads,
        RelationKind::Extracted,
    ];
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByName => write!(f, "related by name"),
            Self::GetterSetterWithProperty => write!(f, "accessor of property"),
            Self::GetterSetter => write!(f, "getter/setter pair"),
            Self::Overloads => write!(f, "overload"),
            Self::Extracted => write!(f, "extracted method"),
        }
    }
}

/// Whether related entries go before or after their primary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Placement {
    /// Immediately before the primary.
    Before,
    /// Immediately after the primary.
    #[default]
    After,
}

/// Names a primary method and the methods that must stay next to it.
///
/// `related` entries are templates expanded against the primary name's
/// capture groups: with primary `do(\w+)`, the template `undo$1` relates
/// `undoEdit` to `doEdit`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrimaryMethodSetting {
    /// Pattern a primary method's name must fully match.
    pub primary: String,
    /// Related-name templates.
    pub related: Vec<String>,
    /// Where related methods go.
    pub placement: Placement,
}

impl PrimaryMethodSetting {
    /// Creates a setting with no related templates.
    #[must_use]
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            related: Vec::new(),
            placement: Placement::After,
        }
    }

    /// Adds a related-name template.
    #[must_use]
    pub fn with_related(mut self, template: impl Into<String>) -> Self {
        self.related.push(template.into());
        self
    }

    /// Sets the placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

/// Which caller an extracted helper is attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CallerChoice {
    /// The caller that appears first in the source.
    #[default]
    First,
    /// The caller that appears last in the source.
    Last,
}

/// Order of helpers attached to the same caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExtractedOrder {
    /// Source order.
    Original,
    /// By name.
    Alphabetical,
    /// Order of first invocation in the caller's body.
    #[default]
    Invocation,
}

/// Settings for keeping extracted helpers with their caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtractedMethodsSettings {
    /// Whether the relation applies.
    pub enabled: bool,
    /// Also move helpers that are not private.
    pub include_non_private: bool,
    /// Which caller a helper with several callers joins.
    pub caller: CallerChoice,
    /// Order of helpers under one caller.
    pub order: ExtractedOrder,
    /// Where helpers go relative to the caller.
    pub placement: Placement,
}

impl Default for ExtractedMethodsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            include_non_private: false,
            caller: CallerChoice::First,
            order: ExtractedOrder::Invocation,
            placement: Placement::After,
        }
    }
}

impl ExtractedMethodsSettings {
    /// Enabled settings with defaults otherwise.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Builder method to include non-private helpers.
    #[must_use]
    pub fn with_include_non_private(mut self, include: bool) -> Self {
        self.include_non_private = include;
        self
    }

    /// Builder method to choose the caller.
    #[must_use]
    pub fn with_caller(mut self, caller: CallerChoice) -> Self {
        self.caller = caller;
        self
    }

    /// Builder method to set helper order.
    #[must_use]
    pub fn with_order(mut self, order: ExtractedOrder) -> Self {
        self.order = order;
        self
    }

    /// Builder method to set placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

/// All related-method configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelatedMethodsSettings {
    /// Primary methods with their related-name templates.
    pub primary_methods: Vec<PrimaryMethodSetting>,
    /// Extracted-helper relation.
    pub extracted: ExtractedMethodsSettings,
    /// Relation kinds in precedence order. An entry related to several
    /// primaries joins the one from the earliest kind listed here.
    pub precedence: Vec<RelationKind>,
}

impl Default for RelatedMethodsSettings {
    fn default() -> Self {
        Self {
            primary_methods: Vec::new(),
            extracted: ExtractedMethodsSettings::default(),
            precedence: RelationKind::DEFAULT_PRECEDENCE.to_vec(),
        }
    }
}

impl RelatedMethodsSettings {
    /// Adds a primary method setting.
    #[must_use]
    pub fn with_primary_method(mut self, setting: PrimaryMethodSetting) -> Self {
        self.primary_methods.push(setting);
        self
    }

    /// Sets extracted-method settings.
    #[must_use]
    pub fn with_extracted(mut self, extracted: ExtractedMethodsSettings) -> Self {
        self.extracted = extracted;
        self
    }

    /// Replaces the precedence list.
    #[must_use]
    pub fn with_precedence(mut self, precedence: impl IntoIterator<Item = RelationKind>) -> Self {
        self.precedence = precedence.into_iter().collect();
        self
    }
}
