//! A small embedded program for the `check` command to dispatch calls
//! against: a handful of builtin methods plus one user-defined mixin, just
//! enough surface to exercise every branch of `dispatch_call`.

use rbtc_common::{FileId, KernelOptions, Loc, TypeAndOrigins, TypeId};
use rbtc_names::NameRef;
use rbtc_symbols::flags::arg_flags;
use rbtc_symbols::{Argument, GlobalState, GlobalStateBuilder};
use rbtc_types::{LiteralValue, TypeArena};

/// The frozen symbol table and type arena the demo dispatches against.
pub struct Program {
    pub gs: GlobalState,
    pub arena: TypeArena,
    pub plus: NameRef,
    pub unknown: NameRef,
    pub fetch: NameRef,
    pub key: NameRef,
    pub int_ty: TypeId,
    pub string_ty: TypeId,
    pub symbol_ty: TypeId,
}

/// One call site to dispatch: a receiver, a method name, and positional
/// argument types.
pub struct Scenario {
    pub name: &'static str,
    pub receiver: TypeId,
    pub method: NameRef,
    pub args: Vec<TypeAndOrigins>,
}

fn loc() -> Loc {
    Loc::new(FileId(1), 0, 1)
}

fn origin(ty: TypeId) -> TypeAndOrigins {
    TypeAndOrigins::new(ty, loc())
}

pub fn build(options: KernelOptions) -> Program {
    let mut b = GlobalStateBuilder::new(options);
    let builtins = b.builtins();

    let plus = b.names_mut().enter_name_utf8("plus").unwrap();
    let other = b.names_mut().enter_name_utf8("other").unwrap();
    let unknown = b.names_mut().enter_name_utf8("to_frobnicate").unwrap();
    let fetch = b.names_mut().enter_name_utf8("fetch").unwrap();
    let key = b.names_mut().enter_name_utf8("key").unwrap();
    let default = b.names_mut().enter_name_utf8("default").unwrap();

    let mut arena = TypeArena::new(&builtins);
    let int_ty = arena.class_type(builtins.integer);
    let string_ty = arena.class_type(builtins.string);
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

    let gs = b.freeze();
    Program {
        gs,
        arena,
        plus,
        unknown,
        fetch,
        key,
        int_ty,
        string_ty,
        symbol_ty,
    }
}

/// The canned scenarios the `check` command runs, in the order described
/// by the kernel's end-to-end test matrix: a clean dispatch, a missing
/// method with a "did you mean" suggestion, an arity mismatch, a type
/// mismatch, a keyword call, and a union receiver.
pub fn scenarios(program: &mut Program) -> Vec<Scenario> {
    let three = program
        .arena
        .literal_type(program.int_ty, LiteralValue::Integer(3));
    let hash_ty = program.arena.class_type(program.gs.builtins().hash);
    let key_literal = program
        .arena
        .literal_type(program.symbol_ty, LiteralValue::Sym(program.key));
    let fetch_shape = program
        .arena
        .shape_type(hash_ty, vec![key_literal], vec![program.symbol_ty]);
    let union = program.arena.or_type(program.int_ty, program.string_ty);

    vec![
        Scenario {
            name: "Integer#plus dispatches cleanly",
            receiver: program.int_ty,
            method: program.plus,
            args: vec![origin(program.int_ty)],
        },
        Scenario {
            name: "Integer#to_frobnicate is unknown (did you mean `plus`?)",
            receiver: program.int_ty,
            method: program.unknown,
            args: vec![],
        },
        Scenario {
            name: "Integer#plus called with no arguments",
            receiver: program.int_ty,
            method: program.plus,
            args: vec![],
        },
        Scenario {
            name: "Integer#plus called with a String argument",
            receiver: program.int_ty,
            method: program.plus,
            args: vec![origin(program.string_ty)],
        },
        Scenario {
            name: "Integer#fetch called with a keyword shape",
            receiver: program.int_ty,
            method: program.fetch,
            args: vec![origin(fetch_shape)],
        },
        Scenario {
            name: "(Integer | String)#plus dispatches over both branches",
            receiver: union,
            method: program.plus,
            args: vec![origin(three)],
        },
    ]
}
