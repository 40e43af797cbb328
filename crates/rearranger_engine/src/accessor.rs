//! Getter and setter recognition.

use std::collections::HashSet;

use rearranger_foundation::{DeclarationEntry, EntryId, EntryKind, EntryTree};
use rearranger_settings::{GetterSetterDefinition, NameCriterion};

/// Whether an accessor reads or writes its property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessorKind {
    /// `getX()` / `isX()`
    Getter,
    /// `setX(value)`
    Setter,
}

/// A method recognised as a getter or setter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accessor {
    /// Getter or setter.
    pub kind: AccessorKind,
    /// Property name (`x` for `getX`).
    pub property: String,
}

/// Attributes of one scope that matching depends on.
#[derive(Clone, Debug, Default)]
pub struct ScopeContext {
    field_names: HashSet<String>,
}

impl ScopeContext {
    /// Collects the field names declared directly in `scope`.
    #[must_use]
    pub fn build(tree: &EntryTree, scope: Option<EntryId>) -> Self {
        let field_names = tree
            .scope_children(scope)
            .iter()
            .filter_map(|&id| tree.get(id))
            .filter(|e| e.kind == EntryKind::Field)
            .map(|e| e.name.clone())
            .collect();
        Self { field_names }
    }

    /// Returns true if the scope declares a field with this name.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field_names.contains(name)
    }
}

/// Lowercases the first character unless the first two are both uppercase
/// (`Name` -> `name`, `URL` -> `URL`).
#[must_use]
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && second.is_uppercase() => {
            name.to_string()
        }
        (Some(first), _) => first.to_lowercase().chain(name.chars().skip(1)).collect(),
        (None, _) => String::new(),
    }
}

fn strip_accessor_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = name.strip_prefix(prefix)?;
    match rest.chars().next() {
        Some(c) if !c.is_lowercase() => Some(rest),
        _ => None,
    }
}

fn name_accepted(criterion: NameCriterion, property: &str, scope: &ScopeContext) -> bool {
    match criterion {
        NameCriterion::CorrectPrefix => true,
        NameCriterion::MatchesField => scope.has_field(property),
    }
}

/// Classifies a method as getter or setter under `definition`.
#[must_use]
pub fn classify(
    entry: &DeclarationEntry,
    definition: &GetterSetterDefinition,
    scope: &ScopeContext,
) -> Option<Accessor> {
    if entry.kind != EntryKind::Method || entry.is_constructor() {
        return None;
    }

    let returns_void = entry.type_name == "void";
    match entry.parameter_count() {
        0 if !returns_void && !entry.type_name.is_empty() => {
            let stem = strip_accessor_prefix(&entry.name, "get").or_else(|| {
                let boolean = matches!(entry.type_name.as_str(), "boolean" | "Boolean");
                boolean
                    .then(|| strip_accessor_prefix(&entry.name, "is"))
                    .flatten()
            })?;
            let property = decapitalize(stem);
            name_accepted(definition.getter_name, &property, scope).then_some(Accessor {
                kind: AccessorKind::Getter,
                property,
            })
        }
        1 if returns_void => {
            let stem = strip_accessor_prefix(&entry.name, "set")?;
            let property = decapitalize(stem);
            name_accepted(definition.setter_name, &property, scope).then_some(Accessor {
                kind: AccessorKind::Setter,
                property,
            })
        }
        _ => None,
    }
}
