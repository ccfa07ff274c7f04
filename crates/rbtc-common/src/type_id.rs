//! `TypeId` — a bare handle into the type arena owned by `rbtc-types`.
//!
//! Lives here rather than in `rbtc-types` to break what would otherwise be
//! a dependency cycle: `rbtc-symbols` needs to store a method's or field's
//! result type, but `rbtc-types::Type::ClassType` needs to name a
//! `SymbolRef` from `rbtc-symbols`. Both crates depend on this one bare
//! newtype instead of on each other.

use serde::Serialize;

/// A handle into the type arena. The sentinel types (`top`, `bottom`,
/// `untyped`) occupy fixed, documented indices — see
/// `rbtc_types::arena::TypeArena::new` for where they're installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Absence of a type (e.g. a method with no resolved return type yet).
    pub const NONE: TypeId = TypeId(u32::MAX);
    /// The universal supertype.
    pub const TOP: TypeId = TypeId(0);
    /// The uninhabited subtype.
    pub const BOTTOM: TypeId = TypeId(1);
    /// The gradual-typing dynamic type.
    pub const UNTYPED: TypeId = TypeId(2);

    pub fn is_none(self) -> bool {
        self == TypeId::NONE
    }
}

impl Default for TypeId {
    fn default() -> Self {
        TypeId::NONE
    }
}
