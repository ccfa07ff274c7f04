//! Record shapes for the five symbol arenas.

use crate::symbol_ref::SymbolRef;
use rbtc_common::{Loc, TypeId};
use rbtc_names::NameRef;
use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

/// A declared class or module.
#[derive(Clone, Debug, Serialize)]
pub struct ClassOrModuleSymbol {
    pub owner: SymbolRef,
    pub name: NameRef,
    pub flags: u32,
    /// `SymbolRef::NO_SYMBOL` for symbols with no superclass
    /// (`BasicObject`, and synthetic roots).
    pub superclass: SymbolRef,
    pub mixins: Vec<SymbolRef>,
    pub members: FxHashMap<NameRef, SymbolRef>,
    pub type_members: Vec<SymbolRef>,
    pub locs: SmallVec<[Loc; 1]>,
    /// The symbol a `flags::class_flags::ALIAS` symbol stands for.
    /// `SymbolRef::NO_SYMBOL` on every non-alias symbol.
    pub alias_target: SymbolRef,
}

impl ClassOrModuleSymbol {
    pub fn new(owner: SymbolRef, name: NameRef, flags: u32) -> Self {
        ClassOrModuleSymbol {
            owner,
            name,
            flags,
            superclass: SymbolRef::NO_SYMBOL,
            mixins: Vec::new(),
            members: FxHashMap::default(),
            type_members: Vec::new(),
            locs: SmallVec::new(),
            alias_target: SymbolRef::NO_SYMBOL,
        }
    }

    pub fn has_flags(&self, flags: u32) -> bool {
        (self.flags & flags) == flags
    }
}

/// One formal parameter of a method.
#[derive(Clone, Debug, Serialize)]
pub struct Argument {
    pub name: NameRef,
    pub ty: TypeId,
    pub flags: u32,
    pub default_loc: Option<Loc>,
}

impl Argument {
    pub fn new(name: NameRef, ty: TypeId, flags: u32) -> Self {
        Argument {
            name,
            ty,
            flags,
            default_loc: None,
        }
    }

    pub fn has_flags(&self, flags: u32) -> bool {
        (self.flags & flags) == flags
    }
}

/// A callable method.
#[derive(Clone, Debug, Serialize)]
pub struct MethodSymbol {
    pub owner: SymbolRef,
    pub name: NameRef,
    pub flags: u32,
    pub arguments: Vec<Argument>,
    pub result_type: TypeId,
    pub locs: SmallVec<[Loc; 1]>,
}

impl MethodSymbol {
    pub fn new(owner: SymbolRef, name: NameRef, flags: u32) -> Self {
        MethodSymbol {
            owner,
            name,
            flags,
            arguments: Vec::new(),
            result_type: TypeId::UNTYPED,
            locs: SmallVec::new(),
        }
    }

    pub fn has_flags(&self, flags: u32) -> bool {
        (self.flags & flags) == flags
    }

    /// Number of leading positional-required arguments — the "expected"
    /// count reported by `MethodArgumentCountMismatch`.
    pub fn min_positional_count(&self) -> usize {
        self.arguments
            .iter()
            .filter(|a| {
                !a.has_flags(crate::flags::arg_flags::KEYWORD)
                    && !a.has_flags(crate::flags::arg_flags::OPTIONAL)
                    && !a.has_flags(crate::flags::arg_flags::REPEATED)
                    && !a.has_flags(crate::flags::arg_flags::BLOCK)
            })
            .count()
    }
}

/// A field or static field.
#[derive(Clone, Debug, Serialize)]
pub struct FieldSymbol {
    pub owner: SymbolRef,
    pub name: NameRef,
    pub flags: u32,
    pub result_type: TypeId,
    pub locs: SmallVec<[Loc; 1]>,
}

impl FieldSymbol {
    pub fn new(owner: SymbolRef, name: NameRef, flags: u32) -> Self {
        FieldSymbol {
            owner,
            name,
            flags,
            result_type: TypeId::UNTYPED,
            locs: SmallVec::new(),
        }
    }
}

/// Declared variance of a type member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Variance {
    Invariant,
    Covariant,
    Contravariant,
}

/// A generic type parameter declared on a class or method.
#[derive(Clone, Debug, Serialize)]
pub struct TypeMemberSymbol {
    pub owner: SymbolRef,
    pub name: NameRef,
    pub variance: Variance,
    pub lower_bound: TypeId,
    pub upper_bound: TypeId,
    pub locs: SmallVec<[Loc; 1]>,
}

impl TypeMemberSymbol {
    pub fn new(owner: SymbolRef, name: NameRef, variance: Variance) -> Self {
        TypeMemberSymbol {
            owner,
            name,
            variance,
            lower_bound: TypeId::BOTTOM,
            upper_bound: TypeId::TOP,
            locs: SmallVec::new(),
        }
    }
}

/// A concrete binding of a [`TypeMemberSymbol`] at one application site,
/// e.g. the `String` bound to `Elem` when applying `Array[String]`.
#[derive(Clone, Debug, Serialize)]
pub struct TypeArgumentSymbol {
    pub owner: SymbolRef,
    pub type_member: SymbolRef,
    pub bound_type: TypeId,
}
