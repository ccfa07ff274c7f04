//! Variant structs making up the [`Type`] sum and their shared handle,
//! [`rbtc_common::TypeId`].

use rbtc_common::TypeId;
use rbtc_names::NameRef;
use rbtc_symbols::SymbolRef;
use serde::Serialize;

/// A nominal leaf: a bare reference to a class or module symbol, with no
/// type arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ClassType {
    pub symbol: SymbolRef,
}

/// A generic instantiation, e.g. `Array[String]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AppliedType {
    pub symbol: SymbolRef,
    pub type_args: Vec<TypeId>,
}

/// `left | right`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct OrType {
    pub left: TypeId,
    pub right: TypeId,
}

/// `left & right`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AndType {
    pub left: TypeId,
    pub right: TypeId,
}

/// Proxy for `[A, B, C]`. `underlying` is always a [`Type::ClassType`] of
/// the array class, precomputed by the caller (building it requires
/// `lub`, which lives one layer up in the kernel).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TupleType {
    pub underlying: TypeId,
    pub elements: Vec<TypeId>,
}

/// Proxy for `{k1: V1, k2: V2}`. `keys` are literal types (string or
/// symbol), parallel to `values`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ShapeType {
    pub underlying: TypeId,
    pub keys: Vec<TypeId>,
    pub values: Vec<TypeId>,
}

/// A concrete scalar value: an integer, float, string, symbol, or
/// boolean literal. Floats compare and hash bitwise since NaN/negative
/// zero must still round-trip through the arena's interning map.
#[derive(Clone, Debug, Serialize)]
pub enum LiteralValue {
    Integer(i64),
    Float(u64),
    Str(NameRef),
    Sym(NameRef),
    True,
    False,
}

impl LiteralValue {
    pub fn float(value: f64) -> LiteralValue {
        LiteralValue::Float(value.to_bits())
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            LiteralValue::Float(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }
}

impl PartialEq for LiteralValue {
    fn eq(&self, other: &Self) -> bool {
        use LiteralValue::*;
        match (self, other) {
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Sym(a), Sym(b)) => a == b,
            (True, True) | (False, False) => true,
            _ => false,
        }
    }
}

impl Eq for LiteralValue {}

impl std::hash::Hash for LiteralValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            LiteralValue::Integer(v) => v.hash(state),
            LiteralValue::Float(bits) => bits.hash(state),
            LiteralValue::Str(n) | LiteralValue::Sym(n) => n.hash(state),
            LiteralValue::True | LiteralValue::False => {}
        }
    }
}

/// Proxy for a literal value, e.g. the type of `42` or `:foo`.
/// `underlying` is the nominal class the value belongs to (`Integer`,
/// `String`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LiteralType {
    pub underlying: TypeId,
    pub raw: LiteralValue,
}

/// A late-bound reference to a constant that may itself resolve to a
/// type alias. Kept distinct from [`ClassType`] since dealiasing can
/// only happen once `GlobalState` is available.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AliasType {
    pub symbol: SymbolRef,
}

/// The closed sum of type variants. The three sentinels (top, bottom,
/// untyped) are ordinary `ClassType`s over the builtin `<top>`/`<bottom>`/
/// `<untyped>` symbols, installed by [`crate::TypeArena::new`] at the
/// fixed indices `rbtc_common::TypeId::{TOP,BOTTOM,UNTYPED}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    ClassType(ClassType),
    AppliedType(AppliedType),
    OrType(OrType),
    AndType(AndType),
    TupleType(TupleType),
    ShapeType(ShapeType),
    LiteralType(LiteralType),
    AliasType(AliasType),
}

impl Type {
    pub fn is_proxy(&self) -> bool {
        matches!(
            self,
            Type::TupleType(_) | Type::ShapeType(_) | Type::LiteralType(_)
        )
    }

    /// The proxy's underlying nominal type, or `None` for non-proxies.
    pub fn underlying(&self) -> Option<TypeId> {
        match self {
            Type::TupleType(t) => Some(t.underlying),
            Type::ShapeType(t) => Some(t.underlying),
            Type::LiteralType(t) => Some(t.underlying),
            _ => None,
        }
    }

    pub fn as_class_symbol(&self) -> Option<SymbolRef> {
        match self {
            Type::ClassType(t) => Some(t.symbol),
            _ => None,
        }
    }
}
