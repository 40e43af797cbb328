//! Rearranger - rule-driven reordering of class members
//!
//! This crate re-exports all layers of the rearranger for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: rearranger_debug       - Outline previews, rule-match explanations
//! Layer 2: rearranger_engine      - Matching, rearrangement, grouping, assembly
//! Layer 1: rearranger_settings    - Rule configuration
//! Layer 0: rearranger_foundation  - Entries, entry tree, modifiers, errors
//! ```
//!
//! # Example
//!
//! ```
//! use rearranger::engine::{OutputAssembler, rearrange};
//! use rearranger::foundation::{DeclarationEntry, EntryTree};
//! use rearranger::settings::{AttributeGroup, RearrangerSettings};
//!
//! let mut tree = EntryTree::new();
//! let class = tree.add_root(DeclarationEntry::class("Point"));
//! let run = tree.add_child(class, DeclarationEntry::method("run", "void"))?;
//! let x = tree.add_child(class, DeclarationEntry::field("x", "int"))?;
//!
//! let settings = RearrangerSettings::new()
//!     .with_member_rule(AttributeGroup::fields())
//!     .with_member_rule(AttributeGroup::methods());
//! let arrangement = rearrange(&tree, &settings)?;
//! assert_eq!(OutputAssembler::flatten(&arrangement), vec![class, x, run]);
//! # Ok::<(), rearranger::foundation::Error>(())
//! ```

pub use rearranger_debug as debug;
pub use rearranger_engine as engine;
pub use rearranger_foundation as foundation;
pub use rearranger_settings as settings;
