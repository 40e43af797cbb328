//! Attribute criteria.
//!
//! A rule's predicate is a list of [`Criterion`] values that must all pass.
//! Each criterion is plain data; evaluation lives in the engine's matcher.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rearranger_foundation::{Modifiers, Protection};

// =============================================================================
// Criterion
// =============================================================================

/// One predicate over a declaration entry's attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Criterion {
    /// Entry's protection level is one of a set.
    Protection(ProtectionCriterion),
    /// Entry has (or lacks) a modifier flag.
    Modifier(ModifierCriterion),
    /// Entry's name matches a pattern.
    Name(PatternCriterion),
    /// Entry's declared or return type matches a pattern.
    Type(PatternCriterion),
    /// Entry's leading comment matches a pattern.
    Comment(PatternCriterion),
    /// Method's parameter count lies within bounds.
    ParameterCount(ParameterCountCriterion),
    /// Method is one of the selected method types.
    MethodType(MethodTypeCriterion),
}

impl Criterion {
    /// Returns the attribute name used in diagnostics.
    #[must_use]
    pub const fn attribute(&self) -> &'static str {
        match self {
            Self::Protection(_) => "protection",
            Self::Modifier(_) => "modifier",
            Self::Name(_) => "name",
            Self::Type(_) => "type",
            Self::Comment(_) => "comment",
            Self::ParameterCount(_) => "parameter count",
            Self::MethodType(_) => "method type",
        }
    }

    /// Returns true if the criterion constrains anything.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Protection(c) => !c.levels.is_empty(),
            Self::Modifier(c) => c.enabled,
            Self::Name(c) | Self::Type(c) | Self::Comment(c) => c.enabled,
            Self::ParameterCount(c) => c.min.is_some() || c.max.is_some(),
            Self::MethodType(c) => c.any_enabled(),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protection(c) => write!(f, "{c}"),
            Self::Modifier(c) => write!(f, "{c}"),
            Self::Name(c) => c.describe(f, "names"),
            Self::Type(c) => c.describe(f, "types"),
            Self::Comment(c) => c.describe(f, "comments"),
            Self::ParameterCount(c) => write!(f, "{c}"),
            Self::MethodType(c) => write!(f, "{c}"),
        }
    }
}

// =============================================================================
// Protection
// =============================================================================

/// Matches entries whose protection is one of the selected levels.
///
/// With no level selected the criterion always passes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProtectionCriterion {
    /// Accepted protection levels.
    pub levels: Vec<Protection>,
    /// Accept every level except the selected ones.
    pub invert: bool,
}

impl ProtectionCriterion {
    /// Creates a criterion accepting the given levels.
    #[must_use]
    pub fn any_of(levels: impl IntoIterator<Item = Protection>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
            invert: false,
        }
    }

    /// Inverts the selection.
    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.invert = !self.invert;
        self
    }
}

impl fmt::Display for ProtectionCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = self.levels.iter().map(|p| p.keyword()).collect();
        if self.invert {
            write!(f, "not ")?;
        }
        write!(f, "{}", words.join(" or "))
    }
}

// =============================================================================
// Modifier
// =============================================================================

/// Tests a single modifier flag.
///
/// `match = !enabled || (has(modifier) == expected) ^ invert`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModifierCriterion {
    /// The flag under test.
    pub modifier: Modifiers,
    /// Disabled criteria always pass.
    pub enabled: bool,
    /// Whether the flag should be present.
    pub expected: bool,
    /// Invert the comparison result.
    pub invert: bool,
}

impl ModifierCriterion {
    /// Requires the flag to be present.
    #[must_use]
    pub const fn required(modifier: Modifiers) -> Self {
        Self {
            modifier,
            enabled: true,
            expected: true,
            invert: false,
        }
    }

    /// Requires the flag to be absent.
    #[must_use]
    pub const fn forbidden(modifier: Modifiers) -> Self {
        Self {
            modifier,
            enabled: true,
            expected: false,
            invert: false,
        }
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Inverts the comparison.
    #[must_use]
    pub const fn inverted(mut self) -> Self {
        self.invert = !self.invert;
        self
    }

    /// Returns true if the criterion effectively requires the flag.
    #[must_use]
    pub const fn wants_present(&self) -> bool {
        self.expected != self.invert
    }
}

impl fmt::Display for ModifierCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = self.modifier.keyword().unwrap_or("flagged");
        if self.wants_present() {
            write!(f, "{word}")
        } else {
            write!(f, "non-{word}")
        }
    }
}

// =============================================================================
// Patterns
// =============================================================================

/// Regular-expression test against a string attribute.
///
/// The pattern must match the whole attribute. An enabled empty pattern
/// therefore matches only the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternCriterion {
    /// Disabled criteria always pass.
    pub enabled: bool,
    /// Regular expression text.
    pub pattern: String,
    /// Pass when the pattern does not match.
    pub invert: bool,
}

impl PatternCriterion {
    /// Creates an enabled criterion for the pattern.
    #[must_use]
    pub fn matching(pattern: impl Into<String>) -> Self {
        Self {
            enabled: true,
            pattern: pattern.into(),
            invert: false,
        }
    }

    /// Creates a disabled criterion.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Inverts the result.
    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.invert = !self.invert;
        self
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>, noun: &str) -> fmt::Result {
        let verb = if self.invert { "do not match" } else { "match" };
        write!(f, "whose {noun} {verb} '{}'", self.pattern)
    }
}

// =============================================================================
// Parameter count
// =============================================================================

/// Inclusive bounds on a method's parameter count.
///
/// Entries that are not methods never satisfy an enabled bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterCountCriterion {
    /// Minimum number of parameters.
    pub min: Option<u32>,
    /// Maximum number of parameters.
    pub max: Option<u32>,
}

impl ParameterCountCriterion {
    /// Creates bounds.
    #[must_use]
    pub const fn new(min: Option<u32>, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Returns true if `min > max`.
    #[must_use]
    pub fn is_contradictory(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

impl fmt::Display for ParameterCountCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => write!(f, "with exactly {min} parameters"),
            (Some(min), Some(max)) => write!(f, "with {min} to {max} parameters"),
            (Some(min), None) => write!(f, "with at least {min} parameters"),
            (None, Some(max)) => write!(f, "with at most {max} parameters"),
            (None, None) => write!(f, "with any number of parameters"),
        }
    }
}

// =============================================================================
// Method type
// =============================================================================

/// Discriminates constructors, getters/setters, canonical and other methods.
///
/// Passes if any enabled sub-type applies (inverted as a whole when
/// `invert` is set). With no sub-type enabled it always passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MethodTypeCriterion {
    /// Accept constructors.
    pub constructor: bool,
    /// Accept getters and setters.
    pub getter_setter: bool,
    /// Accept `equals`, `hashCode`, `toString`, `compareTo`.
    pub canonical: bool,
    /// Accept methods of none of the other types.
    pub other: bool,
    /// Invert the whole discriminator.
    pub invert: bool,
}

impl MethodTypeCriterion {
    /// Accepts constructors only.
    #[must_use]
    pub fn constructors() -> Self {
        Self {
            constructor: true,
            ..Self::default()
        }
    }

    /// Accepts getters and setters only.
    #[must_use]
    pub fn getters_setters() -> Self {
        Self {
            getter_setter: true,
            ..Self::default()
        }
    }

    /// Accepts canonical methods only.
    #[must_use]
    pub fn canonical_methods() -> Self {
        Self {
            canonical: true,
            ..Self::default()
        }
    }

    /// Accepts methods of no other type.
    #[must_use]
    pub fn other_methods() -> Self {
        Self {
            other: true,
            ..Self::default()
        }
    }

    /// Inverts the discriminator.
    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.invert = !self.invert;
        self
    }

    /// Returns true if at least one sub-type is selected.
    #[must_use]
    pub const fn any_enabled(&self) -> bool {
        self.constructor || self.getter_setter || self.canonical || self.other
    }

    /// Returns the display nouns of the selected sub-types.
    #[must_use]
    pub fn nouns(&self) -> Vec<&'static str> {
        let mut nouns = Vec::new();
        if self.constructor {
            nouns.push("constructors");
        }
        if self.getter_setter {
            nouns.push("getters/setters");
        }
        if self.canonical {
            nouns.push("canonical methods");
        }
        if self.other {
            nouns.push("other methods");
        }
        nouns
    }
}

impl fmt::Display for MethodTypeCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.invert {
            write!(f, "all but ")?;
        }
        write!(f, "{}", self.nouns().join(" or "))
    }
}
