//! Preview display settings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Controls what the arrangement preview shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplaySettings {
    /// Show a heading per rule bucket.
    pub show_rules: bool,
    /// Annotate each entry with the rule that claimed it.
    pub show_matched_rules: bool,
    /// Include fields in the outline.
    pub show_fields: bool,
    /// Show parameter types in method signatures.
    pub show_parameter_types: bool,
    /// Show parameter names in method signatures.
    pub show_parameter_names: bool,
    /// Show the return type after the signature (`foo() : int`).
    pub show_type_after_method: bool,
    /// Include free-standing comments.
    pub show_comments: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_rules: false,
            show_matched_rules: false,
            show_fields: true,
            show_parameter_types: true,
            show_parameter_names: false,
            show_type_after_method: true,
            show_comments: false,
        }
    }
}

impl DisplaySettings {
    /// Shows everything.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            show_rules: true,
            show_matched_rules: true,
            show_fields: true,
            show_parameter_types: true,
            show_parameter_names: true,
            show_type_after_method: true,
            show_comments: true,
        }
    }

    /// Builder method to show rule headings.
    #[must_use]
    pub fn with_show_rules(mut self, show: bool) -> Self {
        self.show_rules = show;
        self
    }

    /// Builder method to annotate matched rules.
    #[must_use]
    pub fn with_show_matched_rules(mut self, show: bool) -> Self {
        self.show_matched_rules = show;
        self
    }

    /// Builder method to include fields.
    #[must_use]
    pub fn with_show_fields(mut self, show: bool) -> Self {
        self.show_fields = show;
        self
    }

    /// Builder method to show parameter types.
    #[must_use]
    pub fn with_show_parameter_types(mut self, show: bool) -> Self {
        self.show_parameter_types = show;
        self
    }

    /// Builder method to show parameter names.
    #[must_use]
    pub fn with_show_parameter_names(mut self, show: bool) -> Self {
        self.show_parameter_names = show;
        self
    }

    /// Builder method to show return types.
    #[must_use]
    pub fn with_show_type_after_method(mut self, show: bool) -> Self {
        self.show_type_after_method = show;
        self
    }

    /// Builder method to include comments.
    #[must_use]
    pub fn with_show_comments(mut self, show: bool) -> Self {
        self.show_comments = show;
        self
    }
}
