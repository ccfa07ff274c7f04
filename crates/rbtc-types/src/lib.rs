//! The type lattice: a closed ADT of nominal, structural-proxy, and
//! combinator variants, interned into a [`TypeArena`] for structural
//! sharing.

mod arena;
mod display;
mod ty;

pub use arena::TypeArena;
pub use display::show;
pub use ty::{
    AliasType, AndType, AppliedType, ClassType, LiteralType, LiteralValue, OrType, ShapeType,
    TupleType, Type,
};
