//! `lub`/`glb` — least-upper-bound and greatest-lower-bound over the
//! type lattice. Both are commutative by construction: every branch
//! either calls through to a commutative sub-operation or canonicalizes
//! the pair of operands by numeric `TypeId` before building a fresh
//! `Or`/`And`, so `lub(a, b)` and `lub(b, a)` intern to the same id.

use crate::subtype::{ground_symbol, is_sub_type};
use rbtc_symbols::GlobalState;
use rbtc_types::{Type, TypeArena};
use rbtc_common::TypeId;

fn canonical_pair(a: TypeId, b: TypeId) -> (TypeId, TypeId) {
    if a.0 <= b.0 {
        (a, b)
    } else {
        (b, a)
    }
}

fn canonical_or(arena: &mut TypeArena, a: TypeId, b: TypeId) -> TypeId {
    let (lo, hi) = canonical_pair(a, b);
    arena.or_type(lo, hi)
}

fn canonical_and(arena: &mut TypeArena, a: TypeId, b: TypeId) -> TypeId {
    let (lo, hi) = canonical_pair(a, b);
    arena.and_type(lo, hi)
}

/// Least upper bound.
pub fn lub(gs: &GlobalState, arena: &mut TypeArena, t1: TypeId, t2: TypeId) -> TypeId {
    if t1 == t2 {
        return t1;
    }
    if t1 == TypeId::UNTYPED || t2 == TypeId::UNTYPED {
        return TypeId::UNTYPED;
    }
    if t1 == TypeId::BOTTOM {
        return t2;
    }
    if t2 == TypeId::BOTTOM {
        return t1;
    }
    if t1 == TypeId::TOP || t2 == TypeId::TOP {
        return TypeId::TOP;
    }

    let ty1 = arena.get(t1).clone();
    let ty2 = arena.get(t2).clone();

    if ty1.is_proxy() && ty2.is_proxy() {
        return lub_proxy_proxy(gs, arena, &ty1, &ty2, t1, t2);
    }
    if ty1.is_proxy() {
        let under = ty1.underlying().unwrap();
        return lub(gs, arena, under, t2);
    }
    if ty2.is_proxy() {
        let under = ty2.underlying().unwrap();
        return lub(gs, arena, t1, under);
    }

    lub_ground(gs, arena, t1, t2)
}

fn lub_proxy_proxy(
    gs: &GlobalState,
    arena: &mut TypeArena,
    ty1: &Type,
    ty2: &Type,
    t1: TypeId,
    t2: TypeId,
) -> TypeId {
    match (ty1, ty2) {
        (Type::TupleType(a), Type::TupleType(b)) if a.elements.len() == b.elements.len() => {
            let underlying = lub(gs, arena, a.underlying, b.underlying);
            let elements: Vec<TypeId> = a
                .elements
                .iter()
                .zip(b.elements.iter())
                .map(|(x, y)| lub(gs, arena, *x, *y))
                .collect();
            arena.tuple_type(underlying, elements)
        }
        (Type::ShapeType(a), Type::ShapeType(b)) if same_key_set(arena, a, b) => {
            let underlying = lub(gs, arena, a.underlying, b.underlying);
            let mut keys = Vec::with_capacity(a.keys.len());
            let mut values = Vec::with_capacity(a.keys.len());
            for (k1, v1) in a.keys.iter().zip(a.values.iter()) {
                let idx = b.keys.iter().position(|k2| keys_match(arena, *k1, *k2)).unwrap();
                keys.push(*k1);
                values.push(lub(gs, arena, *v1, b.values[idx]));
            }
            arena.shape_type(underlying, keys, values)
        }
        _ => {
            let u1 = ty1.underlying().unwrap();
            let u2 = ty2.underlying().unwrap();
            lub(gs, arena, u1, u2)
        }
    }
}

fn same_key_set(arena: &TypeArena, a: &rbtc_types::ShapeType, b: &rbtc_types::ShapeType) -> bool {
    a.keys.len() == b.keys.len() && a.keys.iter().all(|k1| b.keys.iter().any(|k2| keys_match(arena, *k1, *k2)))
}

fn keys_match(arena: &TypeArena, a: TypeId, b: TypeId) -> bool {
    match (arena.get(a), arena.get(b)) {
        (Type::LiteralType(x), Type::LiteralType(y)) => x.raw == y.raw,
        _ => a == b,
    }
}

fn lub_ground(gs: &GlobalState, arena: &mut TypeArena, t1: TypeId, t2: TypeId) -> TypeId {
    if let Type::OrType(or2) = arena.get(t2).clone() {
        return lub_distribute_over_or(gs, arena, t1, or2.left, or2.right);
    }
    if let Type::OrType(or1) = arena.get(t1).clone() {
        return lub_distribute_over_or(gs, arena, t2, or1.left, or1.right);
    }

    if let Type::AndType(and2) = arena.get(t2).clone() {
        return lub_class_and(gs, arena, t1, and2.left, and2.right);
    }
    if let Type::AndType(and1) = arena.get(t1).clone() {
        return lub_class_and(gs, arena, t2, and1.left, and1.right);
    }

    match (ground_symbol(gs, arena, t1), ground_symbol(gs, arena, t2)) {
        (Some(s1), Some(s2)) => {
            if s1 == s2 || gs.derives_from(s1, s2) {
                t2
            } else if gs.derives_from(s2, s1) {
                t1
            } else {
                canonical_or(arena, t1, t2)
            }
        }
        _ => canonical_or(arena, t1, t2),
    }
}

/// `lub(single, Or(l, r))`, distributing: take the lub against each
/// branch, and keep whichever absorbs the other; otherwise form a fresh
/// union.
fn lub_distribute_over_or(gs: &GlobalState, arena: &mut TypeArena, single: TypeId, l: TypeId, r: TypeId) -> TypeId {
    let n1 = lub(gs, arena, single, l);
    let n2 = lub(gs, arena, single, r);
    if is_sub_type(gs, arena, n1, n2) {
        n2
    } else if is_sub_type(gs, arena, n2, n1) {
        n1
    } else {
        canonical_or(arena, n1, n2)
    }
}

/// `lub(single, And(left, right))`: exact when `single` is already
/// comparable with one side, an approximation (a fresh `Or`) otherwise —
/// `lub` must still be a sound upper bound on intersection input, and an
/// `Or` of the two operands always is one, unlike an `And`.
fn lub_class_and(gs: &GlobalState, arena: &mut TypeArena, single: TypeId, left: TypeId, right: TypeId) -> TypeId {
    let and_ty = arena.and_type(left.min_with(right), left.max_with(right));
    if is_sub_type(gs, arena, single, left) && is_sub_type(gs, arena, single, right) {
        return and_ty;
    }
    if is_sub_type(gs, arena, left, single) && is_sub_type(gs, arena, right, single) {
        return single;
    }
    if is_sub_type(gs, arena, single, left) {
        return left;
    }
    if is_sub_type(gs, arena, single, right) {
        return right;
    }
    canonical_or(arena, single, and_ty)
}

trait MinMax {
    fn min_with(self, other: Self) -> Self;
    fn max_with(self, other: Self) -> Self;
}

impl MinMax for TypeId {
    fn min_with(self, other: Self) -> Self {
        if self.0 <= other.0 { self } else { other }
    }
    fn max_with(self, other: Self) -> Self {
        if self.0 <= other.0 { other } else { self }
    }
}

/// Greatest lower bound — dual of [`lub`].
pub fn glb(gs: &GlobalState, arena: &mut TypeArena, t1: TypeId, t2: TypeId) -> TypeId {
    if t1 == t2 {
        return t1;
    }
    if t1 == TypeId::UNTYPED || t2 == TypeId::UNTYPED {
        return TypeId::UNTYPED;
    }
    if t1 == TypeId::TOP {
        return t2;
    }
    if t2 == TypeId::TOP {
        return t1;
    }
    if t1 == TypeId::BOTTOM || t2 == TypeId::BOTTOM {
        return TypeId::BOTTOM;
    }

    let ty1 = arena.get(t1).clone();
    let ty2 = arena.get(t2).clone();

    if ty1.is_proxy() && ty2.is_proxy() {
        return glb_proxy_proxy(gs, arena, &ty1, &ty2);
    }
    if ty1.is_proxy() {
        return if is_sub_type(gs, arena, t1, t2) { t1 } else { glb(gs, arena, ty1.underlying().unwrap(), t2) };
    }
    if ty2.is_proxy() {
        return if is_sub_type(gs, arena, t2, t1) { t2 } else { glb(gs, arena, t1, ty2.underlying().unwrap()) };
    }

    glb_ground(gs, arena, t1, t2)
}

fn glb_proxy_proxy(gs: &GlobalState, arena: &mut TypeArena, ty1: &Type, ty2: &Type) -> TypeId {
    match (ty1, ty2) {
        (Type::TupleType(a), Type::TupleType(b)) if a.elements.len() == b.elements.len() => {
            let underlying = glb(gs, arena, a.underlying, b.underlying);
            let elements: Vec<TypeId> = a
                .elements
                .iter()
                .zip(b.elements.iter())
                .map(|(x, y)| glb(gs, arena, *x, *y))
                .collect();
            arena.tuple_type(underlying, elements)
        }
        (Type::ShapeType(a), Type::ShapeType(b)) if same_key_set(arena, a, b) => {
            let underlying = glb(gs, arena, a.underlying, b.underlying);
            let mut keys = Vec::with_capacity(a.keys.len());
            let mut values = Vec::with_capacity(a.keys.len());
            for (k1, v1) in a.keys.iter().zip(a.values.iter()) {
                let idx = b.keys.iter().position(|k2| keys_match(arena, *k1, *k2)).unwrap();
                keys.push(*k1);
                values.push(glb(gs, arena, *v1, b.values[idx]));
            }
            arena.shape_type(underlying, keys, values)
        }
        _ => TypeId::BOTTOM,
    }
}

fn glb_ground(gs: &GlobalState, arena: &mut TypeArena, t1: TypeId, t2: TypeId) -> TypeId {
    if let Type::AndType(and2) = arena.get(t2).clone() {
        return glb_distribute_over_and(gs, arena, t1, and2.left, and2.right);
    }
    if let Type::AndType(and1) = arena.get(t1).clone() {
        return glb_distribute_over_and(gs, arena, t2, and1.left, and1.right);
    }

    if let Type::OrType(or2) = arena.get(t2).clone() {
        return glb_class_or(gs, arena, t1, or2.left, or2.right);
    }
    if let Type::OrType(or1) = arena.get(t1).clone() {
        return glb_class_or(gs, arena, t2, or1.left, or1.right);
    }

    match (ground_symbol(gs, arena, t1), ground_symbol(gs, arena, t2)) {
        (Some(s1), Some(s2)) => {
            if s1 == s2 || gs.derives_from(s1, s2) {
                t1
            } else if gs.derives_from(s2, s1) {
                t2
            } else {
                canonical_and(arena, t1, t2)
            }
        }
        _ => canonical_and(arena, t1, t2),
    }
}

fn glb_distribute_over_and(gs: &GlobalState, arena: &mut TypeArena, single: TypeId, l: TypeId, r: TypeId) -> TypeId {
    let n1 = glb(gs, arena, single, l);
    let n2 = glb(gs, arena, single, r);
    if is_sub_type(gs, arena, n1, n2) {
        n1
    } else if is_sub_type(gs, arena, n2, n1) {
        n2
    } else {
        canonical_and(arena, n1, n2)
    }
}

fn glb_class_or(gs: &GlobalState, arena: &mut TypeArena, single: TypeId, left: TypeId, right: TypeId) -> TypeId {
    let in_left = is_sub_type(gs, arena, single, left);
    let in_right = is_sub_type(gs, arena, single, right);
    if in_left && in_right {
        single
    } else if in_left {
        glb(gs, arena, single, left)
    } else if in_right {
        glb(gs, arena, single, right)
    } else {
        TypeId::BOTTOM
    }
}

#[cfg(test)]
#[path = "tests/lattice_tests.rs"]
mod tests;
