//! The name table: an append-only interned string table partitioned into
//! three kinds — UTF-8 source identifiers, compound constant names, and
//! synthetically generated unique names. Every name is addressed by a
//! small tagged handle ([`NameRef`]).

mod name_ref;
mod substitution;
mod table;

pub use name_ref::{NameKind, NameRef, UniqueNameKind};
pub use substitution::NameSubstitution;
pub use table::{KernelError, NameTable};
