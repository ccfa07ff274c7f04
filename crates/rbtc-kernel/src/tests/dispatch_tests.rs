use super::*;
use crate::lattice::lub;
use rbtc_common::{AndDispatchStrategy, ErrorClass, FileId, KernelOptions, Loc, NoopMetrics, VecErrorSink};
use rbtc_names::NameRef;
use rbtc_symbols::flags::arg_flags;
use rbtc_symbols::{Argument, GlobalState, GlobalStateBuilder, SymbolRef};
use rbtc_types::LiteralValue;

struct Fixture {
    gs: GlobalState,
    arena: TypeArena,
    plus: NameRef,
    unknown: NameRef,
    fetch: NameRef,
    key: NameRef,
    build_array: NameRef,
    build_hash: NameRef,
    bogus_class: SymbolRef,
}

fn loc() -> Loc {
    Loc::new(FileId(1), 0, 1)
}

fn origin(ty: TypeId) -> TypeAndOrigins {
    TypeAndOrigins::new(ty, loc())
}

/// Declares `Integer#plus(other: Integer) -> Integer` and
/// `Integer#fetch(key: Symbol, default: Integer = ...) -> Integer`
/// (`default` keyword-optional), plus a name that is never declared
/// anywhere, for exercising the matcher and the unknown-method path. Also
/// declares `Bogus#pluz` (one edit away from `plus`) on an unrelated
/// class so the suggestion path has something plausible to find.
fn fixture_with_options(options: KernelOptions) -> Fixture {
    let mut b = GlobalStateBuilder::new(options);
    let builtins = b.builtins();

    let plus = b.names_mut().enter_name_utf8("plus").unwrap();
    let other = b.names_mut().enter_name_utf8("other").unwrap();
    let unknown = b.names_mut().enter_name_utf8("zzz_nope").unwrap();
    let fetch = b.names_mut().enter_name_utf8("fetch").unwrap();
    let key = b.names_mut().enter_name_utf8("key").unwrap();
    let default = b.names_mut().enter_name_utf8("default").unwrap();
    let pluz = b.names_mut().enter_name_utf8("pluz").unwrap();
    let bogus_name = b.names_mut().enter_name_utf8("Bogus").unwrap();
    let build_array = b.names_mut().enter_name_utf8("buildArray").unwrap();
    let build_hash = b.names_mut().enter_name_utf8("buildHash").unwrap();

    let mut arena = TypeArena::new(&builtins);
    let int_ty = arena.class_type(builtins.integer);
    let symbol_ty = arena.class_type(builtins.symbol);

    b.enter_method(
        builtins.integer,
        plus,
        0,
        vec![Argument::new(other, int_ty, 0)],
        int_ty,
    );
    b.enter_method(
        builtins.integer,
        fetch,
        0,
        vec![
            Argument::new(key, symbol_ty, arg_flags::KEYWORD),
            Argument::new(default, int_ty, arg_flags::KEYWORD | arg_flags::OPTIONAL),
        ],
        int_ty,
    );

    let bogus_class = b.enter_class(builtins.object, bogus_name, 0);
    b.enter_method(bogus_class, pluz, 0, vec![], int_ty);

    Fixture {
        gs: b.freeze(),
        arena,
        plus,
        unknown,
        fetch,
        key,
        build_array,
        build_hash,
        bogus_class,
    }
}

fn fixture() -> Fixture {
    fixture_with_options(KernelOptions::default())
}

#[test]
fn known_method_dispatches_to_its_declared_result_type() {
    let mut f = fixture();
    let options = KernelOptions::default();
    let metrics = NoopMetrics;
    let mut sink = VecErrorSink::new();
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    let receiver = f.arena.class_type(f.gs.builtins().integer);
    let arg = f.arena.class_type(f.gs.builtins().integer);
    let result = dispatch_call(&mut ctx, &mut f.arena, receiver, f.plus, &[origin(arg)], None, loc());
    assert_eq!(result, receiver);
    assert!(sink.is_empty());
}

#[test]
fn unknown_method_reports_and_returns_untyped() {
    let mut f = fixture();
    let options = KernelOptions::default();
    let metrics = NoopMetrics;
    let mut sink = VecErrorSink::new();
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    let receiver = f.arena.class_type(f.gs.builtins().integer);
    let result = dispatch_call(&mut ctx, &mut f.arena, receiver, f.unknown, &[], None, loc());
    assert_eq!(result, TypeId::UNTYPED);
    assert!(sink.has_class(ErrorClass::UnknownMethod));
}

#[test]
fn unknown_method_on_a_class_with_a_near_miss_name_suggests_it() {
    let mut f = fixture();
    let options = KernelOptions::default();
    let metrics = NoopMetrics;
    let mut sink = VecErrorSink::new();
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    let receiver = f.arena.class_type(f.bogus_class);
    dispatch_call(&mut ctx, &mut f.arena, receiver, f.plus, &[], None, loc());
    let diag = sink.diagnostics.first().expect("expected a diagnostic");
    assert!(diag.header.contains("did you mean `pluz`?"));
}

#[test]
fn missing_required_positional_argument_reports_count_mismatch() {
    let mut f = fixture();
    let options = KernelOptions::default();
    let metrics = NoopMetrics;
    let mut sink = VecErrorSink::new();
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    let receiver = f.arena.class_type(f.gs.builtins().integer);
    dispatch_call(&mut ctx, &mut f.arena, receiver, f.plus, &[], None, loc());
    assert!(sink.has_class(ErrorClass::MethodArgumentCountMismatch));
}

#[test]
fn extra_positional_argument_reports_count_mismatch() {
    let mut f = fixture();
    let options = KernelOptions::default();
    let metrics = NoopMetrics;
    let mut sink = VecErrorSink::new();
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    let receiver = f.arena.class_type(f.gs.builtins().integer);
    let int_ty = f.arena.class_type(f.gs.builtins().integer);
    let args = [origin(int_ty), origin(int_ty)];
    dispatch_call(&mut ctx, &mut f.arena, receiver, f.plus, &args, None, loc());
    assert!(sink.has_class(ErrorClass::MethodArgumentCountMismatch));
}

#[test]
fn positional_argument_of_the_wrong_type_reports_a_mismatch() {
    let mut f = fixture();
    let options = KernelOptions::default();
    let metrics = NoopMetrics;
    let mut sink = VecErrorSink::new();
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    let receiver = f.arena.class_type(f.gs.builtins().integer);
    let string_ty = f.arena.class_type(f.gs.builtins().string);
    dispatch_call(&mut ctx, &mut f.arena, receiver, f.plus, &[origin(string_ty)], None, loc());
    assert!(sink.has_class(ErrorClass::MethodArgumentMismatch));
}

#[test]
fn keyword_arguments_are_matched_by_name_from_a_trailing_shape() {
    let mut f = fixture();
    let options = KernelOptions::default();
    let metrics = NoopMetrics;
    let mut sink = VecErrorSink::new();
    let symbol_ty = f.arena.class_type(f.gs.builtins().symbol);
    let hash_ty = f.arena.class_type(f.gs.builtins().hash);
    let key_sym = f.arena.literal_type(symbol_ty, LiteralValue::Sym(f.key));
    // The `key:` formal is declared `Symbol`, so the passed value must be too.
    let shape = f.arena.shape_type(hash_ty, vec![key_sym], vec![symbol_ty]);
    let receiver = f.arena.class_type(f.gs.builtins().integer);
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    dispatch_call(&mut ctx, &mut f.arena, receiver, f.fetch, &[origin(shape)], None, loc());
    assert!(sink.is_empty(), "optional `default` keyword may be omitted: {:?}", sink.diagnostics);
}

#[test]
fn unrecognized_keyword_in_a_trailing_shape_is_reported() {
    let mut f = fixture();
    let options = KernelOptions::default();
    let metrics = NoopMetrics;
    let mut sink = VecErrorSink::new();
    let symbol_ty = f.arena.class_type(f.gs.builtins().symbol);
    let int_ty = f.arena.class_type(f.gs.builtins().integer);
    let hash_ty = f.arena.class_type(f.gs.builtins().hash);
    let key_sym = f.arena.literal_type(symbol_ty, LiteralValue::Sym(f.key));
    let bogus_sym = f.arena.literal_type(symbol_ty, LiteralValue::Sym(f.unknown));
    let shape = f.arena.shape_type(hash_ty, vec![key_sym, bogus_sym], vec![symbol_ty, int_ty]);
    let receiver = f.arena.class_type(f.gs.builtins().integer);
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    dispatch_call(&mut ctx, &mut f.arena, receiver, f.fetch, &[origin(shape)], None, loc());
    assert!(sink.has_class(ErrorClass::UnknownKeyword));
}

#[test]
fn missing_required_keyword_is_reported() {
    let mut f = fixture();
    let options = KernelOptions::default();
    let metrics = NoopMetrics;
    let mut sink = VecErrorSink::new();
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    let receiver = f.arena.class_type(f.gs.builtins().integer);
    dispatch_call(&mut ctx, &mut f.arena, receiver, f.fetch, &[], None, loc());
    assert!(sink.has_class(ErrorClass::MethodArgumentCountMismatch));
}

#[test]
fn union_receiver_dispatches_both_branches_and_takes_the_lub() {
    let mut f = fixture();
    let options = KernelOptions::default();
    let metrics = NoopMetrics;
    let int_ty = f.arena.class_type(f.gs.builtins().integer);
    let object_ty = f.arena.class_type(f.gs.builtins().object);
    let union = f.arena.or_type(int_ty, object_ty);
    let mut sink = VecErrorSink::new();
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    let result = dispatch_call(&mut ctx, &mut f.arena, union, f.plus, &[origin(int_ty)], None, loc());
    // `Object` has no `plus`, so the union result is UNTYPED lub'd with Integer.
    let expected = lub(&f.gs, &mut f.arena, TypeId::UNTYPED, int_ty);
    assert_eq!(result, expected);
    assert!(sink.has_class(ErrorClass::UnknownMethod));
}

#[test]
fn untyped_receiver_short_circuits_to_untyped_without_diagnostics() {
    let mut f = fixture();
    let options = KernelOptions::default();
    let metrics = NoopMetrics;
    let mut sink = VecErrorSink::new();
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    let result = dispatch_call(&mut ctx, &mut f.arena, TypeId::UNTYPED, f.unknown, &[], None, loc());
    assert_eq!(result, TypeId::UNTYPED);
    assert!(sink.is_empty());
}

#[test]
fn and_type_dispatch_prefers_the_left_branch_but_falls_back_to_the_right() {
    let mut f = fixture_with_options(KernelOptions {
        and_dispatch_strategy: AndDispatchStrategy::TryBothPreferLeft,
        ..KernelOptions::default()
    });
    let options = *f.gs.options();
    let metrics = NoopMetrics;
    let int_ty = f.arena.class_type(f.gs.builtins().integer);
    let bogus_ty = f.arena.class_type(f.bogus_class);
    let intersection = f.arena.and_type(bogus_ty, int_ty);
    let arg = f.arena.class_type(f.gs.builtins().integer);
    let mut sink = VecErrorSink::new();
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    // `plus` is not on Bogus, so TryBothPreferLeft must fall back to Integer.
    let result = dispatch_call(&mut ctx, &mut f.arena, intersection, f.plus, &[origin(arg)], None, loc());
    assert_eq!(result, int_ty);
    assert!(sink.is_empty());
}

#[test]
fn and_type_dispatch_left_only_never_falls_back() {
    let mut f = fixture_with_options(KernelOptions {
        and_dispatch_strategy: AndDispatchStrategy::LeftOnly,
        ..KernelOptions::default()
    });
    let options = *f.gs.options();
    let metrics = NoopMetrics;
    let int_ty = f.arena.class_type(f.gs.builtins().integer);
    let bogus_ty = f.arena.class_type(f.bogus_class);
    let intersection = f.arena.and_type(bogus_ty, int_ty);
    let arg = f.arena.class_type(f.gs.builtins().integer);
    let mut sink = VecErrorSink::new();
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    dispatch_call(&mut ctx, &mut f.arena, intersection, f.plus, &[origin(arg)], None, loc());
    assert!(sink.has_class(ErrorClass::UnknownMethod));
}

#[test]
fn magic_build_array_produces_a_tuple_of_the_argument_types() {
    let mut f = fixture();
    let options = KernelOptions::default();
    let metrics = NoopMetrics;
    let mut sink = VecErrorSink::new();
    let receiver = f.arena.class_type(f.gs.builtins().magic);
    let int_ty = f.arena.class_type(f.gs.builtins().integer);
    let string_ty = f.arena.class_type(f.gs.builtins().string);
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    let result = dispatch_call(&mut ctx, &mut f.arena, receiver, f.build_array, &[origin(int_ty), origin(string_ty)], None, loc());
    match f.arena.get(result) {
        Type::TupleType(t) => assert_eq!(t.elements, vec![int_ty, string_ty]),
        other => panic!("expected a tuple, got {other:?}"),
    }
    assert!(sink.is_empty());
}

#[test]
fn magic_build_hash_produces_a_shape_of_the_key_value_pairs() {
    let mut f = fixture();
    let options = KernelOptions::default();
    let metrics = NoopMetrics;
    let mut sink = VecErrorSink::new();
    let receiver = f.arena.class_type(f.gs.builtins().magic);
    let symbol_ty = f.arena.class_type(f.gs.builtins().symbol);
    let int_ty = f.arena.class_type(f.gs.builtins().integer);
    let key_sym = f.arena.literal_type(symbol_ty, LiteralValue::Sym(f.key));
    let mut ctx = DispatchContext { gs: &f.gs, options: &options, metrics: &metrics, sink: &mut sink };
    let result = dispatch_call(&mut ctx, &mut f.arena, receiver, f.build_hash, &[origin(key_sym), origin(int_ty)], None, loc());
    match f.arena.get(result) {
        Type::ShapeType(s) => {
            assert_eq!(s.keys, vec![key_sym]);
            assert_eq!(s.values, vec![int_ty]);
        }
        other => panic!("expected a shape, got {other:?}"),
    }
    assert!(sink.is_empty());
}
