//! Hand-enumerated lattice laws, checked over every pair (and triple,
//! where the law needs one) drawn from a fixed pool of types spanning
//! every variant of the type ADT: ground classes, unions, intersections,
//! tuples, shapes, and literals.

use rbtc_common::{KernelOptions, TypeId};
use rbtc_kernel::{drop_subtypes_of, equiv, glb, is_sub_type, lub};
use rbtc_symbols::{GlobalState, GlobalStateBuilder};
use rbtc_types::{LiteralValue, TypeArena};

struct Pool {
    gs: GlobalState,
    arena: TypeArena,
    types: Vec<TypeId>,
}

fn pool() -> Pool {
    let mut b = GlobalStateBuilder::new(KernelOptions::default());
    let builtins = b.builtins();
    let path = b.names_mut().enter_name_utf8("path").unwrap();
    let gs = b.freeze();
    let mut arena = TypeArena::new(&builtins);

    let int_ty = arena.class_type(builtins.integer);
    let float_ty = arena.class_type(builtins.float);
    let string_ty = arena.class_type(builtins.string);
    let symbol_ty = arena.class_type(builtins.symbol);
    let object_ty = arena.class_type(builtins.object);
    let array_ty = arena.class_type(builtins.array);
    let hash_ty = arena.class_type(builtins.hash);

    let int_or_string = arena.or_type(int_ty, string_ty);
    let float_or_symbol = arena.or_type(float_ty, symbol_ty);
    let int_and_object = arena.and_type(int_ty, object_ty);
    let pair = arena.tuple_type(array_ty, vec![int_ty, string_ty]);
    let triple = arena.tuple_type(array_ty, vec![int_ty, string_ty, float_ty]);
    let three = arena.literal_type(int_ty, LiteralValue::Integer(3));
    let four = arena.literal_type(int_ty, LiteralValue::Integer(4));
    let key = arena.literal_type(symbol_ty, LiteralValue::Sym(path));
    let shape = arena.shape_type(hash_ty, vec![key], vec![int_ty]);

    let types = vec![
        TypeId::TOP,
        TypeId::BOTTOM,
        TypeId::UNTYPED,
        int_ty,
        float_ty,
        string_ty,
        symbol_ty,
        object_ty,
        array_ty,
        hash_ty,
        int_or_string,
        float_or_symbol,
        int_and_object,
        pair,
        triple,
        three,
        four,
        key,
        shape,
    ];
    Pool { gs, arena, types }
}

#[test]
fn reflexivity_holds_for_every_type_in_the_pool() {
    let p = pool();
    for &t in &p.types {
        assert!(is_sub_type(&p.gs, &p.arena, t, t), "{t:?} is not a subtype of itself");
    }
}

#[test]
fn antisymmetry_modulo_equiv_holds_for_every_pair() {
    let p = pool();
    for &a in &p.types {
        for &c in &p.types {
            if is_sub_type(&p.gs, &p.arena, a, c) && is_sub_type(&p.gs, &p.arena, c, a) {
                assert!(equiv(&p.gs, &p.arena, a, c), "{a:?} <: {c:?} <: {a:?} but not equiv");
            }
        }
    }
}

#[test]
fn transitivity_holds_for_every_triple() {
    let p = pool();
    for &a in &p.types {
        for &b in &p.types {
            for &c in &p.types {
                if is_sub_type(&p.gs, &p.arena, a, b) && is_sub_type(&p.gs, &p.arena, b, c) {
                    assert!(
                        is_sub_type(&p.gs, &p.arena, a, c),
                        "{a:?} <: {b:?} <: {c:?} but {a:?} is not <: {c:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn lub_is_an_upper_bound_for_every_pair() {
    let mut p = pool();
    let pairs: Vec<(TypeId, TypeId)> = p.types.iter().flat_map(|&a| p.types.iter().map(move |&c| (a, c))).collect();
    for (a, c) in pairs {
        let joined = lub(&p.gs, &mut p.arena, a, c);
        assert!(is_sub_type(&p.gs, &p.arena, a, joined), "{a:?} is not <: lub({a:?}, {c:?})");
        assert!(is_sub_type(&p.gs, &p.arena, c, joined), "{c:?} is not <: lub({a:?}, {c:?})");
    }
}

#[test]
fn glb_is_a_lower_bound_for_every_pair() {
    let mut p = pool();
    let pairs: Vec<(TypeId, TypeId)> = p.types.iter().flat_map(|&a| p.types.iter().map(move |&c| (a, c))).collect();
    for (a, c) in pairs {
        let met = glb(&p.gs, &mut p.arena, a, c);
        assert!(is_sub_type(&p.gs, &p.arena, met, a), "glb({a:?}, {c:?}) is not <: {a:?}");
        assert!(is_sub_type(&p.gs, &p.arena, met, c), "glb({a:?}, {c:?}) is not <: {c:?}");
    }
}

#[test]
fn lub_and_glb_commute_for_every_pair() {
    let mut p = pool();
    let pairs: Vec<(TypeId, TypeId)> = p.types.iter().flat_map(|&a| p.types.iter().map(move |&c| (a, c))).collect();
    for (a, c) in pairs {
        let lub_ac = lub(&p.gs, &mut p.arena, a, c);
        let lub_ca = lub(&p.gs, &mut p.arena, c, a);
        assert!(equiv(&p.gs, &p.arena, lub_ac, lub_ca), "lub not commutative for {a:?}, {c:?}");

        let glb_ac = glb(&p.gs, &mut p.arena, a, c);
        let glb_ca = glb(&p.gs, &mut p.arena, c, a);
        assert!(equiv(&p.gs, &p.arena, glb_ac, glb_ca), "glb not commutative for {a:?}, {c:?}");
    }
}

#[test]
fn lub_and_glb_are_idempotent_for_every_type() {
    let mut p = pool();
    for &t in p.types.clone().iter() {
        let joined = lub(&p.gs, &mut p.arena, t, t);
        assert!(equiv(&p.gs, &p.arena, joined, t), "lub({t:?}, {t:?}) != {t:?}");
        let met = glb(&p.gs, &mut p.arena, t, t);
        assert!(equiv(&p.gs, &p.arena, met, t), "glb({t:?}, {t:?}) != {t:?}");
    }
}

#[test]
fn sentinel_laws_hold_for_every_type() {
    let mut p = pool();
    for &t in p.types.clone().iter() {
        let bottom_join_t = lub(&p.gs, &mut p.arena, TypeId::BOTTOM, t);
        assert!(equiv(&p.gs, &p.arena, bottom_join_t, t));
        assert_eq!(lub(&p.gs, &mut p.arena, TypeId::TOP, t), TypeId::TOP);
        assert_eq!(lub(&p.gs, &mut p.arena, TypeId::UNTYPED, t), TypeId::UNTYPED);
        assert_eq!(glb(&p.gs, &mut p.arena, TypeId::TOP, t), t);
        assert_eq!(glb(&p.gs, &mut p.arena, TypeId::BOTTOM, t), TypeId::BOTTOM);
        assert_eq!(glb(&p.gs, &mut p.arena, TypeId::UNTYPED, t), TypeId::UNTYPED);
    }
}

#[test]
fn drop_subtypes_of_never_widens() {
    let mut p = pool();
    let builtins = p.gs.builtins();
    let int_ty = p.arena.class_type(builtins.integer);
    let string_ty = p.arena.class_type(builtins.string);
    let float_ty = p.arena.class_type(builtins.float);
    let int_or_string = p.arena.or_type(int_ty, string_ty);
    let union = p.arena.or_type(int_or_string, float_ty);
    for &drop in &[int_ty, string_ty, float_ty, TypeId::TOP, TypeId::BOTTOM] {
        let narrowed = drop_subtypes_of(&p.gs, &mut p.arena, union, drop);
        assert!(
            is_sub_type(&p.gs, &p.arena, narrowed, union),
            "dropSubtypesOf({union:?}, {drop:?}) = {narrowed:?} is not <: {union:?}"
        );
    }
}

#[test]
fn every_proxy_is_a_subtype_of_its_underlying_class() {
    let mut p = pool();
    for &t in p.types.clone().iter() {
        if matches!(p.arena.get(t), rbtc_types::Type::ClassType(_)) {
            continue;
        }
        if let Some(symbol) = p.arena.as_class_symbol(t) {
            let class_ty = p.arena.class_type(symbol);
            assert!(is_sub_type(&p.gs, &p.arena, t, class_ty), "{t:?} is not <: its underlying class {class_ty:?}");
        }
    }
}

#[test]
fn longer_tuple_is_a_subtype_of_its_shorter_prefix() {
    let mut p = pool();
    let builtins = p.gs.builtins();
    let int_ty = p.arena.class_type(builtins.integer);
    let string_ty = p.arena.class_type(builtins.string);
    let float_ty = p.arena.class_type(builtins.float);
    let array_ty = p.arena.class_type(builtins.array);
    let triple = p.arena.tuple_type(array_ty, vec![int_ty, string_ty, float_ty]);
    let pair = p.arena.tuple_type(array_ty, vec![int_ty, string_ty]);
    assert!(is_sub_type(&p.gs, &p.arena, triple, pair));
    assert!(!is_sub_type(&p.gs, &p.arena, pair, triple));
}

#[test]
fn lub_against_an_intersection_of_unrelated_classes_is_still_an_upper_bound() {
    let mut p = pool();
    let builtins = p.gs.builtins();
    let string_ty = p.arena.class_type(builtins.string);
    let symbol_ty = p.arena.class_type(builtins.symbol);
    let array_ty = p.arena.class_type(builtins.array);
    let unrelated_and = p.arena.and_type(symbol_ty, array_ty);
    let joined = lub(&p.gs, &mut p.arena, string_ty, unrelated_and);
    assert!(
        is_sub_type(&p.gs, &p.arena, string_ty, joined),
        "{string_ty:?} is not <: lub({string_ty:?}, {unrelated_and:?}) = {joined:?}"
    );
    assert!(
        is_sub_type(&p.gs, &p.arena, unrelated_and, joined),
        "{unrelated_and:?} is not <: lub({string_ty:?}, {unrelated_and:?}) = {joined:?}"
    );
}

#[test]
fn literal_lub_folds_to_the_shared_underlying_class() {
    let mut p = pool();
    let builtins = p.gs.builtins();
    let int_ty = p.arena.class_type(builtins.integer);
    let three = p.arena.literal_type(int_ty, LiteralValue::Integer(3));
    let four = p.arena.literal_type(int_ty, LiteralValue::Integer(4));
    assert_eq!(lub(&p.gs, &mut p.arena, three, four), int_ty);
}
