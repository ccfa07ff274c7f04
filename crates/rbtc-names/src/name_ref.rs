//! `NameRef` — a 2-bit kind tag packed with a 30-bit arena index.

use serde::Serialize;

const KIND_BITS: u32 = 2;
const INDEX_BITS: u32 = 32 - KIND_BITS;
const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;

/// Upper bound on entries in any one arena.
pub const MAX_ARENA_ENTRIES: usize = 1 << INDEX_BITS;

/// Which arena a [`NameRef`] addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum NameKind {
    Utf8 = 0,
    Constant = 1,
    Unique = 2,
}

impl NameKind {
    fn from_tag(tag: u32) -> NameKind {
        match tag {
            0 => NameKind::Utf8,
            1 => NameKind::Constant,
            2 => NameKind::Unique,
            other => panic!("invalid NameKind tag {other}"),
        }
    }
}

/// The flavor of a synthetically generated unique name, e.g. a mangled
/// singleton-class name produced by `lookupSingletonClass`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum UniqueNameKind {
    SingletonClass,
    AttachedClass,
    Desugar,
    TypeMemberDefault,
}

/// A handle to an interned name: a 2-bit kind tag plus a 30-bit arena
/// index. Stable for the lifetime of the owning [`crate::NameTable`] —
/// handles are never invalidated once issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NameRef(u32);

impl NameRef {
    pub(crate) fn pack(kind: NameKind, index: u32) -> NameRef {
        assert!(
            index <= INDEX_MASK,
            "name arena index {index} exceeds {INDEX_BITS}-bit range"
        );
        NameRef(((kind as u32) << INDEX_BITS) | index)
    }

    pub fn kind(self) -> NameKind {
        NameKind::from_tag(self.0 >> INDEX_BITS)
    }

    pub fn index(self) -> u32 {
        self.0 & INDEX_MASK
    }

    /// Index 0 of the UTF-8 arena is reserved for the empty-name sentinel.
    pub fn exists(self) -> bool {
        !(self.kind() == NameKind::Utf8 && self.index() == 0)
    }
}
