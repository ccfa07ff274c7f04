//! The symbol table: five disjoint append-only arenas (classes/modules,
//! methods, fields/static-fields, type members, type arguments),
//! pre-populated at construction with a fixed set of builtin symbols.
//! Exposed as a two-phase `GlobalStateBuilder` / `GlobalState` pair so the
//! mutable and frozen halves of the lifecycle are distinguished in the
//! type system: mutation only typechecks against the builder, and the
//! frozen form can be shared across threads without locking.

mod builtins;
pub mod flags;
mod symbol;
mod symbol_ref;
mod table;

pub use builtins::Builtins;
pub use symbol::{
    Argument, ClassOrModuleSymbol, FieldSymbol, MethodSymbol, TypeArgumentSymbol,
    TypeMemberSymbol, Variance,
};
pub use symbol_ref::{SymbolKind, SymbolRef};
pub use table::{GlobalState, GlobalStateBuilder};
