//! Declaration entries.
//!
//! An entry is one field, method, initializer, class, interface, enum, or
//! free-standing comment as seen by the host parser. Entries are plain
//! data: the host fills in every attribute rules can query, and the
//! rearranger never touches the source document itself.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::modifiers::{Modifiers, canonical_signature};

/// Identifier of an entry within its [`EntryTree`](crate::EntryTree).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntryId(u32);

impl EntryId {
    /// Creates an entry id from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the arena index of this id.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of declaration an entry represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntryKind {
    /// Field declaration.
    Field,
    /// Method or constructor.
    Method,
    /// Instance or static initializer block.
    Initializer,
    /// Class declaration.
    Class,
    /// Interface declaration.
    Interface,
    /// Enum declaration.
    Enum,
    /// Free-standing comment block.
    Comment,
    /// Anything the host could not classify.
    Other,
}

impl EntryKind {
    /// Returns true for kinds that own a member list.
    #[must_use]
    pub const fn is_type(self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::Enum)
    }

    /// Returns true for methods and initializers.
    #[must_use]
    pub const fn is_callable(self) -> bool {
        matches!(self, Self::Method | Self::Initializer)
    }

    /// Returns a lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Method => "method",
            Self::Initializer => "initializer",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Comment => "comment",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Half-open byte range `[start, end)` into the original source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextRange {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl TextRange {
    /// Creates a new range.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of the range in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the range covers no text.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Returns the smallest range covering both ranges.
    #[must_use]
    pub fn cover(self, other: TextRange) -> TextRange {
        TextRange::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// A single method parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Declared type, as written.
    pub type_name: String,
}

impl Parameter {
    /// Creates a new parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// One declaration in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeclarationEntry {
    /// What kind of declaration this is.
    pub kind: EntryKind,
    /// Modifier and derived-property flags.
    pub modifiers: Modifiers,
    /// Declared name (empty for initializers and comments).
    pub name: String,
    /// Field type or method return type (empty when not applicable).
    pub type_name: String,
    /// Method parameters.
    pub parameters: Vec<Parameter>,
    /// Names of methods invoked from the body, in invocation order.
    pub calls: Vec<String>,
    /// Text of the leading documentation or comment, or of the comment itself
    /// for comment entries.
    pub comment: String,
    /// Source range of the declaration.
    pub range: TextRange,
    /// Comment ranges attached before the declaration.
    pub leading_comments: Vec<TextRange>,
    /// Comment ranges attached after the declaration (same line).
    pub trailing_comments: Vec<TextRange>,
}

impl DeclarationEntry {
    /// Creates an entry of the given kind with no attributes set.
    #[must_use]
    pub fn new(kind: EntryKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            modifiers: Modifiers::empty(),
            name: name.into(),
            type_name: String::new(),
            parameters: Vec::new(),
            calls: Vec::new(),
            comment: String::new(),
            range: TextRange::default(),
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
        }
    }

    /// Creates a field entry.
    #[must_use]
    pub fn field(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(EntryKind::Field, name).with_type(type_name)
    }

    /// Creates a method entry returning `return_type`.
    ///
    /// The canonical flag is derived once parameters are added.
    #[must_use]
    pub fn method(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self::new(EntryKind::Method, name)
            .with_type(return_type)
            .with_canonical_flag()
    }

    /// Creates a constructor entry.
    #[must_use]
    pub fn constructor(name: impl Into<String>) -> Self {
        Self::new(EntryKind::Method, name).with_modifiers(Modifiers::CONSTRUCTOR)
    }

    /// Creates an initializer block entry.
    #[must_use]
    pub fn initializer(is_static: bool) -> Self {
        let entry = Self::new(EntryKind::Initializer, "");
        if is_static {
            entry.with_modifiers(Modifiers::STATIC | Modifiers::STATIC_INITIALIZER)
        } else {
            entry
        }
    }

    /// Creates a class entry.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(EntryKind::Class, name)
    }

    /// Creates an interface entry.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(EntryKind::Interface, name)
    }

    /// Creates a free-standing comment entry.
    #[must_use]
    pub fn comment_block(text: impl Into<String>) -> Self {
        let mut entry = Self::new(EntryKind::Comment, "");
        entry.comment = text.into();
        entry
    }

    /// Adds modifier flags.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Sets the field type or return type.
    #[must_use]
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, type_name));
        self.with_canonical_flag()
    }

    /// Records a call from this entry's body.
    #[must_use]
    pub fn with_call(mut self, callee: impl Into<String>) -> Self {
        self.calls.push(callee.into());
        self
    }

    /// Sets the leading comment text.
    #[must_use]
    pub fn with_comment(mut self, text: impl Into<String>) -> Self {
        self.comment = text.into();
        self
    }

    /// Sets the source range.
    #[must_use]
    pub fn with_range(mut self, range: TextRange) -> Self {
        self.range = range;
        self
    }

    /// Attaches a leading comment range.
    #[must_use]
    pub fn with_leading_comment(mut self, range: TextRange) -> Self {
        self.leading_comments.push(range);
        self
    }

    /// Attaches a trailing comment range.
    #[must_use]
    pub fn with_trailing_comment(mut self, range: TextRange) -> Self {
        self.trailing_comments.push(range);
        self
    }

    fn with_canonical_flag(mut self) -> Self {
        if self.kind == EntryKind::Method && !self.is_constructor() {
            self.modifiers.set(
                Modifiers::CANONICAL,
                canonical_signature(&self.name, self.parameters.len()),
            );
        }
        self
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Returns true if the entry is a constructor.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.modifiers.contains(Modifiers::CONSTRUCTOR)
    }

    /// Returns true if the entry has the given modifier flag(s).
    #[must_use]
    pub fn has(&self, modifiers: Modifiers) -> bool {
        self.modifiers.contains(modifiers)
    }

    /// Returns the range covering the declaration and its attached comments.
    #[must_use]
    pub fn full_range(&self) -> TextRange {
        self.leading_comments
            .iter()
            .chain(&self.trailing_comments)
            .fold(self.range, |acc, r| acc.cover(*r))
    }

    /// Returns a short signature such as `foo(int, String)` for display.
    #[must_use]
    pub fn signature(&self, show_types: bool, show_names: bool) -> String {
        if !self.kind.is_callable() || self.kind == EntryKind::Initializer {
            return self.display_name();
        }
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| match (show_types, show_names) {
                (true, true) => format!("{} {}", p.type_name, p.name),
                (true, false) => p.type_name.clone(),
                (false, true) => p.name.clone(),
                (false, false) => String::new(),
            })
            .filter(|s| !s.is_empty())
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }

    /// Returns the name, or a placeholder for unnamed entries.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.kind {
            EntryKind::Initializer if self.has(Modifiers::STATIC) => "static {...}".to_string(),
            EntryKind::Initializer => "{...}".to_string(),
            EntryKind::Comment => {
                let first = self.comment.lines().next().unwrap_or("").trim();
                format!("comment \"{first}\"")
            }
            _ => self.name.clone(),
        }
    }
}
