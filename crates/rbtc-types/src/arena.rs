//! The type arena: append-only storage with structural interning, so
//! two structurally-equal types always share one [`TypeId`].

use crate::ty::{AliasType, AndType, AppliedType, ClassType, LiteralType, LiteralValue, OrType, ShapeType, TupleType, Type};
use rbtc_common::TypeId;
use rbtc_symbols::{Builtins, SymbolRef};
use rustc_hash::FxHashMap;

pub struct TypeArena {
    types: Vec<Type>,
    index: FxHashMap<Type, TypeId>,
}

impl TypeArena {
    /// Installs the three sentinels — `ClassType` over the builtin
    /// `<top>`/`<bottom>`/`<untyped>` symbols — at `TypeId::{TOP,BOTTOM,
    /// UNTYPED}`, matching the fixed indices other crates depend on.
    pub fn new(builtins: &Builtins) -> TypeArena {
        let mut arena = TypeArena {
            types: Vec::new(),
            index: FxHashMap::default(),
        };
        let top = arena.class_type(builtins.top);
        let bottom = arena.class_type(builtins.bottom);
        let untyped = arena.class_type(builtins.untyped);
        assert_eq!(top, TypeId::TOP);
        assert_eq!(bottom, TypeId::BOTTOM);
        assert_eq!(untyped, TypeId::UNTYPED);
        arena
    }

    fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(existing) = self.index.get(&ty) {
            return *existing;
        }
        let id = TypeId(self.types.len() as u32);
        self.index.insert(ty.clone(), id);
        self.types.push(ty);
        id
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.0 as usize]
    }

    pub fn class_type(&mut self, symbol: SymbolRef) -> TypeId {
        self.intern(Type::ClassType(ClassType { symbol }))
    }

    pub fn applied_type(&mut self, symbol: SymbolRef, type_args: Vec<TypeId>) -> TypeId {
        self.intern(Type::AppliedType(AppliedType { symbol, type_args }))
    }

    pub fn or_type(&mut self, left: TypeId, right: TypeId) -> TypeId {
        self.intern(Type::OrType(OrType { left, right }))
    }

    pub fn and_type(&mut self, left: TypeId, right: TypeId) -> TypeId {
        self.intern(Type::AndType(AndType { left, right }))
    }

    pub fn tuple_type(&mut self, underlying: TypeId, elements: Vec<TypeId>) -> TypeId {
        self.intern(Type::TupleType(TupleType {
            underlying,
            elements,
        }))
    }

    pub fn shape_type(&mut self, underlying: TypeId, keys: Vec<TypeId>, values: Vec<TypeId>) -> TypeId {
        self.intern(Type::ShapeType(ShapeType {
            underlying,
            keys,
            values,
        }))
    }

    pub fn literal_type(&mut self, underlying: TypeId, raw: LiteralValue) -> TypeId {
        self.intern(Type::LiteralType(LiteralType { underlying, raw }))
    }

    pub fn alias_type(&mut self, symbol: SymbolRef) -> TypeId {
        self.intern(Type::AliasType(AliasType { symbol }))
    }

    /// The nominal class a type ultimately stands for: itself if it's
    /// already a `ClassType`, its `underlying`'s class if it's a proxy
    /// whose underlying is a `ClassType`, else `None`.
    pub fn as_class_symbol(&self, id: TypeId) -> Option<SymbolRef> {
        match self.get(id).as_class_symbol() {
            Some(sym) => Some(sym),
            None => self
                .get(id)
                .underlying()
                .and_then(|u| self.get(u).as_class_symbol()),
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/arena_tests.rs"]
mod tests;
