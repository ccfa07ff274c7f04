//! `dispatchCall` — resolves a call site (receiver type, method name,
//! argument types) to a result type, posting structured diagnostics for
//! anything that doesn't line up.

use crate::lattice::lub;
use crate::subtype::{ground_symbol, is_sub_type};
use crate::suggest::suggest_method;
use rbtc_common::{
    AndDispatchStrategy, Diagnostic, DiagnosticSection, ErrorClass, ErrorLine, ErrorSink,
    KernelOptions, Loc, Metrics, TypeAndOrigins, TypeId,
};
use rbtc_names::NameRef;
use rbtc_symbols::flags::arg_flags;
use rbtc_symbols::{Argument, GlobalState, MethodSymbol};
use rbtc_types::{Type, TypeArena};

/// Everything `dispatch_call` threads through to reach the argument
/// matcher and the error sink.
pub struct DispatchContext<'a> {
    pub gs: &'a GlobalState,
    pub options: &'a KernelOptions,
    pub metrics: &'a dyn Metrics,
    pub sink: &'a mut dyn ErrorSink,
}

/// `dispatchCall(gs, receiver, fun, args) → Type`, posting errors to
/// `ctx.sink` along the way. `block`, if present, is the type of a
/// trailing `&block` actual; it binds only to a `block` formal.
pub fn dispatch_call(
    ctx: &mut DispatchContext,
    arena: &mut TypeArena,
    receiver: TypeId,
    fun: NameRef,
    args: &[TypeAndOrigins],
    block: Option<&TypeAndOrigins>,
    call_loc: Loc,
) -> TypeId {
    let name = ctx.gs.names().short_name(fun);
    let _span = tracing::span!(tracing::Level::DEBUG, "dispatch_call", method = %name).entered();
    ctx.metrics.inc("dispatch_call");

    match arena.get(receiver).clone() {
        Type::OrType(o) => {
            ctx.metrics.inc("dispatch_or");
            let left = dispatch_call(ctx, arena, o.left, fun, args, block, call_loc);
            let right = dispatch_call(ctx, arena, o.right, fun, args, block, call_loc);
            lub(ctx.gs, arena, left, right)
        }
        Type::AndType(a) => dispatch_and(ctx, arena, a.left, a.right, fun, args, block, call_loc),
        Type::TupleType(t) => dispatch_call(ctx, arena, t.underlying, fun, args, block, call_loc),
        Type::ShapeType(t) => dispatch_call(ctx, arena, t.underlying, fun, args, block, call_loc),
        Type::LiteralType(t) => dispatch_call(ctx, arena, t.underlying, fun, args, block, call_loc),
        _ => match ground_symbol(ctx.gs, arena, receiver) {
            Some(symbol) => class_dispatch(ctx, arena, symbol, receiver, fun, args, block, call_loc),
            None => TypeId::UNTYPED,
        },
    }
}

/// `AndType::dispatchCall`: the source left this unimplemented. We
/// attempt the left component first and fall back to the right one when
/// it has no such method, which dispatches successfully whenever either
/// mixed-in component defines the call — the common case for
/// `Mixin & Mixin` receivers.
fn dispatch_and(
    ctx: &mut DispatchContext,
    arena: &mut TypeArena,
    left: TypeId,
    right: TypeId,
    fun: NameRef,
    args: &[TypeAndOrigins],
    block: Option<&TypeAndOrigins>,
    call_loc: Loc,
) -> TypeId {
    ctx.metrics.inc("dispatch_and");
    if ctx.options.and_dispatch_strategy == AndDispatchStrategy::LeftOnly {
        return dispatch_call(ctx, arena, left, fun, args, block, call_loc);
    }
    let left_symbol = ground_symbol(ctx.gs, arena, left);
    let left_has_method = left_symbol.is_some_and(|s| ctx.gs.find_member_transitive(s, fun).exists());
    if left_has_method {
        dispatch_call(ctx, arena, left, fun, args, block, call_loc)
    } else {
        dispatch_call(ctx, arena, right, fun, args, block, call_loc)
    }
}

fn class_dispatch(
    ctx: &mut DispatchContext,
    arena: &mut TypeArena,
    symbol: rbtc_symbols::SymbolRef,
    receiver: TypeId,
    fun: NameRef,
    args: &[TypeAndOrigins],
    block: Option<&TypeAndOrigins>,
    call_loc: Loc,
) -> TypeId {
    let builtins = ctx.gs.builtins();
    if symbol == builtins.untyped {
        return TypeId::UNTYPED;
    }
    if symbol == builtins.magic {
        if let Some(result) = magic_dispatch(ctx, arena, fun, args) {
            return result;
        }
    }

    let method = ctx.gs.find_member_transitive(symbol, fun);
    if !method.exists() {
        ctx.metrics.inc("unknown_method");
        let name = ctx.gs.names().show(fun);
        let receiver_name = rbtc_types::show(arena, receiver, ctx.gs.names(), ctx.gs);
        let mut header = format!("Method `{name}` does not exist on `{receiver_name}`");
        if let Some(suggestion) = suggest_method(ctx.gs, symbol, fun, ctx.options.suggestion_max_distance) {
            header.push_str(&format!(" (did you mean `{suggestion}`?)"));
        }
        ctx.sink.report(Diagnostic::new(call_loc, ErrorClass::UnknownMethod, header));
        return TypeId::UNTYPED;
    }

    let m = ctx.gs.method(method).clone();
    match_arguments(ctx, arena, &m, args, call_loc);
    // A block actual binds only to a declared block formal; this kernel
    // does not yet check its type against one, matching a documented gap
    // in the call-matching algorithm it's modeled on.
    let _ = block;
    m.result_type
}

/// `Magic.buildArray(*args)` / `Magic.buildHash(k1, v1, k2, v2, ...)`:
/// produce a proxy type directly from the argument types rather than
/// dispatching to a declared method.
fn magic_dispatch(
    ctx: &mut DispatchContext,
    arena: &mut TypeArena,
    fun: NameRef,
    args: &[TypeAndOrigins],
) -> Option<TypeId> {
    let name = ctx.gs.names().short_name(fun);
    let builtins = ctx.gs.builtins();
    match name.as_str() {
        "buildArray" => {
            let underlying = arena.class_type(builtins.array);
            let elements = args.iter().map(|a| a.ty).collect();
            Some(arena.tuple_type(underlying, elements))
        }
        "buildHash" => {
            let underlying = arena.class_type(builtins.hash);
            let mut keys = Vec::with_capacity(args.len() / 2);
            let mut values = Vec::with_capacity(args.len() / 2);
            for pair in args.chunks(2) {
                if let [k, v] = pair {
                    keys.push(k.ty);
                    values.push(v.ty);
                }
            }
            Some(arena.shape_type(underlying, keys, values))
        }
        _ => None,
    }
}

fn is_keyword(a: &Argument) -> bool {
    a.has_flags(arg_flags::KEYWORD)
}
fn is_block(a: &Argument) -> bool {
    a.has_flags(arg_flags::BLOCK)
}
fn is_repeated(a: &Argument) -> bool {
    a.has_flags(arg_flags::REPEATED)
}
fn is_optional(a: &Argument) -> bool {
    a.has_flags(arg_flags::OPTIONAL)
}

fn key_matches_name(arena: &TypeArena, key: TypeId, formal_name: NameRef) -> bool {
    match arena.get(key) {
        Type::LiteralType(lit) => match &lit.raw {
            rbtc_types::LiteralValue::Sym(n) | rbtc_types::LiteralValue::Str(n) => *n == formal_name,
            _ => false,
        },
        _ => false,
    }
}

/// Walks formals and actuals in lockstep per the positional / keyword /
/// rest / block argument-matching rules, posting a diagnostic for every
/// mismatch without aborting the rest of the match.
fn match_arguments(ctx: &mut DispatchContext, arena: &mut TypeArena, method: &MethodSymbol, args: &[TypeAndOrigins], call_loc: Loc) {
    let keyword_formals: Vec<&Argument> = method.arguments.iter().filter(|a| is_keyword(a) && !is_block(a)).collect();
    let keyword_rest = keyword_formals.iter().any(|a| is_repeated(a));
    let positional_formals: Vec<&Argument> = method.arguments.iter().filter(|a| !is_keyword(a) && !is_block(a)).collect();

    let (positional_actuals, trailing_shape) = split_trailing_keyword_shape(arena, args, &keyword_formals);

    // Step 1: positional matching.
    let mut ai = 0usize;
    let mut missing_required = false;
    for formal in &positional_formals {
        if is_repeated(formal) {
            while ai < positional_actuals.len() {
                check_positional(ctx, arena, formal, &positional_actuals[ai], ai, call_loc);
                ai += 1;
            }
            continue;
        }
        if ai < positional_actuals.len() {
            check_positional(ctx, arena, formal, &positional_actuals[ai], ai, call_loc);
            ai += 1;
        } else if !is_optional(formal) {
            missing_required = true;
        }
    }
    if missing_required {
        emit_count_mismatch(ctx, method.min_positional_count(), positional_actuals.len(), call_loc);
    }

    // Steps 2-3: keyword matching.
    if !keyword_formals.is_empty() {
        match trailing_shape {
            Some(shape_id) => match_keyword_shape(ctx, arena, &keyword_formals, keyword_rest, shape_id, call_loc),
            None => {
                let satisfied_by_untyped = args.last().is_some_and(|a| a.ty == TypeId::UNTYPED);
                if !satisfied_by_untyped {
                    for kf in &keyword_formals {
                        if !is_optional(kf) {
                            emit_missing_keyword(ctx, kf.name, call_loc);
                        }
                    }
                }
            }
        }
    }

    // Step 4: leftover positional actuals after every formal is consumed.
    if ai < positional_actuals.len() {
        emit_count_mismatch(ctx, method.min_positional_count(), positional_actuals.len(), call_loc);
    }
}

fn split_trailing_keyword_shape<'a>(
    arena: &TypeArena,
    args: &'a [TypeAndOrigins],
    keyword_formals: &[&Argument],
) -> (&'a [TypeAndOrigins], Option<TypeId>) {
    if keyword_formals.is_empty() {
        return (args, None);
    }
    match args.last() {
        Some(last) if matches!(arena.get(last.ty), Type::ShapeType(_)) => (&args[..args.len() - 1], Some(last.ty)),
        _ => (args, None),
    }
}

fn check_positional(ctx: &mut DispatchContext, arena: &mut TypeArena, formal: &Argument, actual: &TypeAndOrigins, index: usize, call_loc: Loc) {
    if !is_sub_type(ctx.gs, arena, actual.ty, formal.ty) {
        emit_argument_mismatch(ctx, arena, formal.ty, actual, index, call_loc);
    }
}

fn match_keyword_shape(ctx: &mut DispatchContext, arena: &mut TypeArena, keyword_formals: &[&Argument], keyword_rest: bool, shape_id: TypeId, call_loc: Loc) {
    let shape = match arena.get(shape_id).clone() {
        Type::ShapeType(s) => s,
        _ => return,
    };
    for kf in keyword_formals {
        let found = shape.keys.iter().position(|k| key_matches_name(arena, *k, kf.name));
        match found {
            Some(idx) => {
                if !is_sub_type(ctx.gs, arena, shape.values[idx], kf.ty) {
                    let origin = TypeAndOrigins::new(shape.values[idx], call_loc);
                    emit_argument_mismatch(ctx, arena, kf.ty, &origin, 0, call_loc);
                }
            }
            None if !is_optional(kf) => emit_missing_keyword(ctx, kf.name, call_loc),
            None => {}
        }
    }
    if !keyword_rest {
        for key in &shape.keys {
            if !keyword_formals.iter().any(|kf| key_matches_name(arena, *key, kf.name)) {
                let name = describe_key(ctx.gs, arena, *key);
                ctx.sink.report(Diagnostic::new(
                    call_loc,
                    ErrorClass::UnknownKeyword,
                    format!("Unrecognized keyword argument `{name}`"),
                ));
            }
        }
    }
}

fn describe_key(gs: &GlobalState, arena: &TypeArena, key: TypeId) -> String {
    match arena.get(key) {
        Type::LiteralType(lit) => match &lit.raw {
            rbtc_types::LiteralValue::Sym(n) | rbtc_types::LiteralValue::Str(n) => gs.names().show(*n),
            _ => "?".to_string(),
        },
        _ => "?".to_string(),
    }
}

fn emit_count_mismatch(ctx: &mut DispatchContext, expected: usize, found: usize, call_loc: Loc) {
    ctx.sink.report(Diagnostic::new(
        call_loc,
        ErrorClass::MethodArgumentCountMismatch,
        format!("Expected {expected} argument(s), found {found}"),
    ));
}

fn emit_missing_keyword(ctx: &mut DispatchContext, name: NameRef, call_loc: Loc) {
    let text = ctx.gs.names().show(name);
    ctx.sink.report(Diagnostic::new(
        call_loc,
        ErrorClass::MethodArgumentCountMismatch,
        format!("Missing required keyword argument `{text}`"),
    ));
}

fn emit_argument_mismatch(ctx: &mut DispatchContext, arena: &TypeArena, expected: TypeId, actual: &TypeAndOrigins, index: usize, call_loc: Loc) {
    let expected_text = rbtc_types::show(arena, expected, ctx.gs.names(), ctx.gs);
    let expected_lines = vec![ErrorLine::new(call_loc, expected_text)];
    let got_text = rbtc_types::show(arena, actual.ty, ctx.gs.names(), ctx.gs);
    let got_lines: Vec<ErrorLine> = actual
        .origins
        .iter()
        .map(|loc| ErrorLine::new(*loc, got_text.clone()))
        .collect();
    let diag = Diagnostic::new(
        call_loc,
        ErrorClass::MethodArgumentMismatch,
        format!("Argument {} does not satisfy the declared type", index + 1),
    )
    .with_section(DiagnosticSection::new("Expected", expected_lines))
    .with_section(DiagnosticSection::new("Got", got_lines));
    ctx.sink.report(diag);
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
