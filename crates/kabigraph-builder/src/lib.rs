//! Type-graph construction.
//!
//! The C parser front end is an external collaborator: it hands over
//! symbol trees (identifier, base-type chain, modifier bitmask, member
//! and argument lists) as JSON documents. This crate mirrors that dump in
//! a 1:1 deserialization layer (`sym`), reconstructs declaration strings
//! from base-type chains (`walk`, `modstr`), and grows the graph store
//! one exported symbol at a time (`build`).

pub mod build;
pub mod modstr;
pub mod sym;
pub mod walk;


pub use build::{Builder, KSYM_PREFIX};
pub use modstr::{Modifiers, modifier_string};
pub use sym::{Symbol, TranslationUnit, Type, parse_unit};
