//! The subtyping, lattice, and method-dispatch kernel.
//!
//! Everything here is a free function over an explicit `&GlobalState` /
//! `&mut TypeArena` pair rather than a boxed query-database trait: the
//! kernel has exactly one implementation of each operation, so there is
//! nothing for a trait boundary to abstract over.

mod dispatch;
mod lattice;
mod narrow;
mod subtype;
mod suggest;

pub use dispatch::{dispatch_call, DispatchContext};
pub use lattice::{glb, lub};
pub use narrow::{approximate_subtract, can_be_falsy, can_be_truthy, drop_subtypes_of};
pub use subtype::{equiv, is_sub_type};
pub use suggest::suggest_method;
