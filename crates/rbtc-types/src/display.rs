//! Rendering a [`crate::Type`] to the text a diagnostic shows the user.

use crate::arena::TypeArena;
use crate::ty::{LiteralValue, Type};
use rbtc_common::TypeId;
use rbtc_names::NameTable;
use rbtc_symbols::{GlobalState, SymbolRef};

fn qualified_name(symbols: &GlobalState, names: &NameTable, sym: SymbolRef) -> String {
    let class = symbols.class(sym);
    let short = names.short_name(class.name);
    let root = symbols.builtins().root;
    if class.owner.exists() && class.owner != root {
        format!("{}::{}", qualified_name(symbols, names, class.owner), short)
    } else {
        short
    }
}

/// Kind rank used to decide when an `Or`/`And` operand needs
/// parenthesizing: wrap it only when its top-level connective differs
/// from the enclosing one.
fn is_or(arena: &TypeArena, id: TypeId) -> bool {
    matches!(arena.get(id), Type::OrType(_))
}

fn is_and(arena: &TypeArena, id: TypeId) -> bool {
    matches!(arena.get(id), Type::AndType(_))
}

fn show_operand(arena: &TypeArena, names: &NameTable, symbols: &GlobalState, id: TypeId, parenthesize: bool) -> String {
    let rendered = show(arena, id, names, symbols);
    if parenthesize {
        format!("({rendered})")
    } else {
        rendered
    }
}

fn show_literal_value(names: &NameTable, value: &LiteralValue) -> String {
    match value {
        LiteralValue::Integer(v) => v.to_string(),
        LiteralValue::Float(bits) => f64::from_bits(*bits).to_string(),
        LiteralValue::Str(n) => format!("\"{}\"", names.short_name(*n)),
        LiteralValue::Sym(n) => format!(":{}", names.short_name(*n)),
        LiteralValue::True => "true".to_string(),
        LiteralValue::False => "false".to_string(),
    }
}

/// Renders `id` the way `4.3`'s Display rule describes: `ClassType` as
/// its symbol's full name, `Or`/`And` with `|`/`&` and kind-driven
/// parenthesization, proxies as `Underlying(value)`, `[e1, e2]`, or
/// `{k => v}`.
pub fn show(arena: &TypeArena, id: TypeId, names: &NameTable, symbols: &GlobalState) -> String {
    match arena.get(id) {
        Type::ClassType(t) => qualified_name(symbols, names, t.symbol),
        Type::AppliedType(t) => {
            let name = qualified_name(symbols, names, t.symbol);
            let args: Vec<String> = t
                .type_args
                .iter()
                .map(|a| show(arena, *a, names, symbols))
                .collect();
            format!("{}[{}]", name, args.join(", "))
        }
        Type::OrType(t) => {
            let left = show_operand(arena, names, symbols, t.left, is_and(arena, t.left));
            let right = show_operand(arena, names, symbols, t.right, is_and(arena, t.right));
            format!("{left} | {right}")
        }
        Type::AndType(t) => {
            let left = show_operand(arena, names, symbols, t.left, is_or(arena, t.left));
            let right = show_operand(arena, names, symbols, t.right, is_or(arena, t.right));
            format!("{left} & {right}")
        }
        Type::TupleType(t) => {
            let elems: Vec<String> = t
                .elements
                .iter()
                .map(|e| show(arena, *e, names, symbols))
                .collect();
            format!("[{}]", elems.join(", "))
        }
        Type::ShapeType(t) => {
            let entries: Vec<String> = t
                .keys
                .iter()
                .zip(t.values.iter())
                .map(|(k, v)| {
                    format!(
                        "{} => {}",
                        show(arena, *k, names, symbols),
                        show(arena, *v, names, symbols)
                    )
                })
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Type::LiteralType(t) => {
            let underlying = qualified_name(
                symbols,
                names,
                arena
                    .as_class_symbol(t.underlying)
                    .expect("literal underlying must be a class"),
            );
            format!("{}({})", underlying, show_literal_value(names, &t.raw))
        }
        Type::AliasType(t) => qualified_name(symbols, names, t.symbol),
    }
}
