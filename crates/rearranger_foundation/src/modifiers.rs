//! Declaration modifier bitset.
//!
//! `Modifiers` is computed by the host parser for every entry and queried
//! by rule predicates. Besides the Java keywords it carries derived flags
//! (constructor, overridden, canonical, ...) so matching never needs to go
//! back to the syntax tree.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Modifier and derived-property flags of a declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u32 {
        // === Protection (bits 0-3) ===

        /// `public`
        const PUBLIC = 1 << 0;
        /// `private`
        const PRIVATE = 1 << 1;
        /// `protected`
        const PROTECTED = 1 << 2;
        /// No access keyword (package-private).
        const PACKAGE = 1 << 3;

        // === Keywords (bits 4-11) ===

        /// `static`
        const STATIC = 1 << 4;
        /// `final`
        const FINAL = 1 << 5;
        /// `abstract`
        const ABSTRACT = 1 << 6;
        /// `synchronized`
        const SYNCHRONIZED = 1 << 7;
        /// `native`
        const NATIVE = 1 << 8;
        /// `transient`
        const TRANSIENT = 1 << 9;
        /// `volatile`
        const VOLATILE = 1 << 10;

        // === Derived method properties (bits 12-19) ===

        /// Method is a constructor.
        const CONSTRUCTOR = 1 << 12;
        /// Method is overridden by a subclass.
        const OVERRIDDEN = 1 << 13;
        /// Method overrides a superclass method.
        const OVERRIDING = 1 << 14;
        /// Method implements an interface method.
        const IMPLEMENTS_INTERFACE = 1 << 15;
        /// Method implements an abstract superclass method.
        const IMPLEMENTS_ABSTRACT = 1 << 16;
        /// `equals`, `hashCode`, `toString` or `compareTo`.
        const CANONICAL = 1 << 17;
        /// Initializer block declared `static`.
        const STATIC_INITIALIZER = 1 << 18;

        // === Derived field properties (bits 20-23) ===

        /// Field is initialized to an anonymous class.
        const INIT_TO_ANON_CLASS = 1 << 20;
    }
}

/// Access protection of a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Protection {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// Package-private (no keyword).
    Package,
    /// `private`
    Private,
}

impl Protection {
    /// All protection levels, most visible first.
    pub const ALL: [Protection; 4] = [
        Protection::Public,
        Protection::Protected,
        Protection::Package,
        Protection::Private,
    ];

    /// Returns the modifier flag for this level.
    #[must_use]
    pub const fn flag(self) -> Modifiers {
        match self {
            Self::Public => Modifiers::PUBLIC,
            Self::Protected => Modifiers::PROTECTED,
            Self::Package => Modifiers::PACKAGE,
            Self::Private => Modifiers::PRIVATE,
        }
    }

    /// Returns the keyword, or `package` for package-private.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Package => "package",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl Modifiers {
    /// Returns the declared protection level.
    ///
    /// Entries without any protection flag are package-private.
    #[must_use]
    pub fn protection(self) -> Protection {
        if self.contains(Self::PUBLIC) {
            Protection::Public
        } else if self.contains(Self::PROTECTED) {
            Protection::Protected
        } else if self.contains(Self::PRIVATE) {
            Protection::Private
        } else {
            Protection::Package
        }
    }

    /// The four protection flags.
    pub const ACCESS: Self = Self::PUBLIC
        .union(Self::PRIVATE)
        .union(Self::PROTECTED)
        .union(Self::PACKAGE);

    /// Returns true if the declaration carries `flag`.
    ///
    /// Protection flags are answered from [`Modifiers::protection`], so
    /// `PACKAGE` holds for any entry without an access keyword.
    #[must_use]
    pub fn holds(self, flag: Self) -> bool {
        if Self::ACCESS.contains(flag) && flag.bits().count_ones() == 1 {
            self.protection().flag() == flag
        } else {
            self.contains(flag)
        }
    }

    /// Returns the keyword text for a single flag, if it has one.
    #[must_use]
    pub fn keyword(self) -> Option<&'static str> {
        let keyword = match self {
            f if f == Self::PUBLIC => "public",
            f if f == Self::PRIVATE => "private",
            f if f == Self::PROTECTED => "protected",
            f if f == Self::PACKAGE => "package",
            f if f == Self::STATIC => "static",
            f if f == Self::FINAL => "final",
            f if f == Self::ABSTRACT => "abstract",
            f if f == Self::SYNCHRONIZED => "synchronized",
            f if f == Self::NATIVE => "native",
            f if f == Self::TRANSIENT => "transient",
            f if f == Self::VOLATILE => "volatile",
            f if f == Self::CONSTRUCTOR => "constructor",
            f if f == Self::OVERRIDDEN => "overridden",
            f if f == Self::OVERRIDING => "overriding",
            f if f == Self::IMPLEMENTS_INTERFACE => "implementing",
            f if f == Self::IMPLEMENTS_ABSTRACT => "implementing abstract",
            f if f == Self::CANONICAL => "canonical",
            f if f == Self::STATIC_INITIALIZER => "static initializer",
            f if f == Self::INIT_TO_ANON_CLASS => "anonymous class initialized",
            _ => return None,
        };
        Some(keyword)
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().filter_map(Modifiers::keyword).collect();
        write!(f, "Modifiers({})", names.join(" "))
    }
}

/// Returns true if the name and arity identify one of the canonical
/// `Object`/`Comparable` methods.
#[must_use]
pub fn canonical_signature(name: &str, parameter_count: usize) -> bool {
    matches!(
        (name, parameter_count),
        ("equals" | "compareTo", 1) | ("hashCode" | "toString", 0)
    )
}
