//! `SymbolRef` — a 3-bit kind tag packed with a 29-bit arena index.

use serde::Serialize;

const KIND_BITS: u32 = 3;
const INDEX_BITS: u32 = 32 - KIND_BITS;
const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;

/// Upper bound on entries in any one symbol arena.
pub const MAX_ARENA_ENTRIES: usize = 1 << INDEX_BITS;

/// Which of the five arenas a [`SymbolRef`] addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum SymbolKind {
    ClassOrModule = 0,
    Method = 1,
    Field = 2,
    TypeMember = 3,
    TypeArgument = 4,
}

impl SymbolKind {
    fn from_tag(tag: u32) -> SymbolKind {
        match tag {
            0 => SymbolKind::ClassOrModule,
            1 => SymbolKind::Method,
            2 => SymbolKind::Field,
            3 => SymbolKind::TypeMember,
            4 => SymbolKind::TypeArgument,
            other => panic!("invalid SymbolKind tag {other}"),
        }
    }
}

/// A handle to a declaration: a 3-bit kind tag plus a 29-bit arena index.
/// A handle of one kind must never be used to index another arena —
/// accessors in `table.rs` assert the tag on every access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SymbolRef(u32);

impl SymbolRef {
    /// Index 0 of the class/module arena, reserved as the universal
    /// "no symbol" sentinel.
    pub const NO_SYMBOL: SymbolRef = SymbolRef::pack_const(SymbolKind::ClassOrModule, 0);

    pub(crate) const fn pack_const(kind: SymbolKind, index: u32) -> SymbolRef {
        SymbolRef(((kind as u32) << INDEX_BITS) | index)
    }

    pub(crate) fn pack(kind: SymbolKind, index: u32) -> SymbolRef {
        assert!(
            index <= INDEX_MASK,
            "symbol arena index {index} exceeds {INDEX_BITS}-bit range"
        );
        SymbolRef::pack_const(kind, index)
    }

    pub fn kind(self) -> SymbolKind {
        SymbolKind::from_tag(self.0 >> INDEX_BITS)
    }

    pub fn index(self) -> u32 {
        self.0 & INDEX_MASK
    }

    /// `exists()` is `index != 0` regardless of kind.
    pub fn exists(self) -> bool {
        self.index() != 0
    }
}

impl Default for SymbolRef {
    fn default() -> Self {
        SymbolRef::NO_SYMBOL
    }
}
