//! Flow-sensitive narrowing helpers consumed by the surrounding
//! inference pass: dropping branches of a type that are known to be
//! (in)compatible with a runtime test, and the truthy/falsy predicates
//! an `if`/`unless` condition narrows on.

use crate::subtype::is_sub_type;
use rbtc_symbols::GlobalState;
use rbtc_types::{Type, TypeArena};
use rbtc_common::TypeId;

/// Removes any branch of an `Or` that derives from `class`, collapses
/// an `And` to `bottom` if either side derives from it, and passes a
/// `ClassType`/`untyped` through unchanged if it doesn't derive.
/// Always `dropSubtypesOf(from, class) <: from`.
pub fn drop_subtypes_of(gs: &GlobalState, arena: &mut TypeArena, from: TypeId, class: TypeId) -> TypeId {
    if from == TypeId::UNTYPED {
        return from;
    }
    match arena.get(from).clone() {
        Type::OrType(o) => {
            let left = drop_subtypes_of(gs, arena, o.left, class);
            let right = drop_subtypes_of(gs, arena, o.right, class);
            match (left == TypeId::BOTTOM, right == TypeId::BOTTOM) {
                (true, true) => TypeId::BOTTOM,
                (true, false) => right,
                (false, true) => left,
                (false, false) => arena.or_type(left, right),
            }
        }
        Type::AndType(a) => {
            if is_sub_type(gs, arena, a.left, class) || is_sub_type(gs, arena, a.right, class) {
                TypeId::BOTTOM
            } else {
                from
            }
        }
        _ => {
            if is_sub_type(gs, arena, from, class) {
                TypeId::BOTTOM
            } else {
                from
            }
        }
    }
}

/// Whether `t` intersects the complement of the falsy set — i.e. some
/// value of this type could make a conditional take the truthy branch.
pub fn can_be_truthy(gs: &GlobalState, arena: &mut TypeArena, t: TypeId) -> bool {
    if t == TypeId::UNTYPED {
        return true;
    }
    let falsy = falsy_type(gs, arena);
    !is_sub_type(gs, arena, t, falsy)
}

/// Whether `t` intersects `NilClass | FalseClass`.
pub fn can_be_falsy(gs: &GlobalState, arena: &mut TypeArena, t: TypeId) -> bool {
    if t == TypeId::UNTYPED {
        return true;
    }
    let falsy = falsy_type(gs, arena);
    crate::lattice::glb(gs, arena, t, falsy) != TypeId::BOTTOM
}

/// `NilClass | FalseClass`, the falsy set of this language.
fn falsy_type(gs: &GlobalState, arena: &mut TypeArena) -> TypeId {
    let builtins = gs.builtins();
    let nil = arena.class_type(builtins.nil_class);
    let false_ty = arena.class_type(builtins.false_class);
    arena.or_type(nil, false_ty)
}

/// Point-wise applies `drop_subtypes_of` across the structure of `what`,
/// approximating `from - what`. Always `approximate_subtract(x, y) <: x`.
pub fn approximate_subtract(gs: &GlobalState, arena: &mut TypeArena, from: TypeId, what: TypeId) -> TypeId {
    match arena.get(what).clone() {
        Type::OrType(o) => {
            let step1 = approximate_subtract(gs, arena, from, o.left);
            approximate_subtract(gs, arena, step1, o.right)
        }
        _ => drop_subtypes_of(gs, arena, from, what),
    }
}

#[cfg(test)]
#[path = "tests/narrow_tests.rs"]
mod tests;
