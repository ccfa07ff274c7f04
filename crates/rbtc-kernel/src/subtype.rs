//! `isSubType` — the core subtyping decision procedure the rest of the
//! kernel is built on.

use rbtc_symbols::{GlobalState, SymbolRef};
use rbtc_types::{Type, TypeArena};
use rbtc_common::TypeId;

/// The nominal symbol a ground type stands for, dealiasing through
/// `AliasType` via `gs`. `None` for `And`/`Or`, which have no single
/// symbol.
pub(crate) fn ground_symbol(gs: &GlobalState, arena: &TypeArena, id: TypeId) -> Option<SymbolRef> {
    match arena.get(id) {
        Type::ClassType(c) => Some(c.symbol),
        Type::AppliedType(a) => Some(a.symbol),
        Type::AliasType(a) => {
            let resolved = gs.dealias(a.symbol);
            Some(if resolved.exists() { resolved } else { a.symbol })
        }
        _ => None,
    }
}

fn keys_equal(arena: &TypeArena, a: TypeId, b: TypeId) -> bool {
    match (arena.get(a), arena.get(b)) {
        (Type::LiteralType(x), Type::LiteralType(y)) => x.raw == y.raw,
        _ => a == b,
    }
}

/// `t1 <: t2`. See the decision procedure this mirrors: identity, then
/// the three sentinels (`untyped`, `bottom`, `top`), then proxy
/// dispatch, then the ground `ClassType`/`AndType`/`OrType` case.
pub fn is_sub_type(gs: &GlobalState, arena: &TypeArena, t1: TypeId, t2: TypeId) -> bool {
    if t1 == t2 {
        return true;
    }
    if t1 == TypeId::UNTYPED || t2 == TypeId::UNTYPED {
        return true;
    }
    if t1 == TypeId::BOTTOM {
        return true;
    }
    if t2 == TypeId::TOP {
        return true;
    }
    if t2 == TypeId::BOTTOM || t1 == TypeId::TOP {
        return false;
    }

    let ty1 = arena.get(t1);
    let ty2 = arena.get(t2);
    let proxy1 = ty1.is_proxy();
    let proxy2 = ty2.is_proxy();

    if proxy1 && proxy2 {
        return match (ty1, ty2) {
            (Type::TupleType(a), Type::TupleType(b)) => {
                a.elements.len() >= b.elements.len()
                    && a.elements
                        .iter()
                        .zip(b.elements.iter())
                        .all(|(x, y)| is_sub_type(gs, arena, *x, *y))
            }
            (Type::ShapeType(a), Type::ShapeType(b)) => b.keys.iter().zip(b.values.iter()).all(|(k2, v2)| {
                a.keys
                    .iter()
                    .position(|k1| keys_equal(arena, *k1, *k2))
                    .is_some_and(|idx| is_sub_type(gs, arena, a.values[idx], *v2))
            }),
            (Type::LiteralType(a), Type::LiteralType(b)) => {
                a.raw == b.raw && arena.as_class_symbol(a.underlying) == arena.as_class_symbol(b.underlying)
            }
            _ => is_sub_type(gs, arena, ty1.underlying().unwrap(), ty2.underlying().unwrap()),
        };
    }
    if proxy1 && !proxy2 {
        return is_sub_type(gs, arena, ty1.underlying().unwrap(), t2);
    }
    if !proxy1 && proxy2 {
        return false;
    }

    // Ground case. Check the Or/And rules in an order that is correct
    // without needing to swap t1/t2 (isSubType is not symmetric).
    if let Type::OrType(or1) = ty1 {
        return is_sub_type(gs, arena, or1.left, t2) && is_sub_type(gs, arena, or1.right, t2);
    }
    if let Type::AndType(and2) = ty2 {
        return is_sub_type(gs, arena, t1, and2.left) && is_sub_type(gs, arena, t1, and2.right);
    }
    if let Type::OrType(or2) = ty2 {
        return is_sub_type(gs, arena, t1, or2.left) || is_sub_type(gs, arena, t1, or2.right);
    }
    if let Type::AndType(and1) = ty1 {
        return is_sub_type(gs, arena, and1.left, t2) || is_sub_type(gs, arena, and1.right, t2);
    }

    match (ground_symbol(gs, arena, t1), ground_symbol(gs, arena, t2)) {
        (Some(s1), Some(s2)) => s1 == s2 || gs.derives_from(s1, s2),
        _ => false,
    }
}

/// `isSubType(t1,t2) ∧ isSubType(t2,t1)`.
pub fn equiv(gs: &GlobalState, arena: &TypeArena, t1: TypeId, t2: TypeId) -> bool {
    is_sub_type(gs, arena, t1, t2) && is_sub_type(gs, arena, t2, t1)
}

#[cfg(test)]
#[path = "tests/subtype_tests.rs"]
mod tests;
