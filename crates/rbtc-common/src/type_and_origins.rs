//! A type paired with the source locations that explain how it was
//! derived, carried at each CFG use-site so diagnostics can show
//! "expected ... (from here) / got ... (from here)".

use crate::loc::Loc;
use crate::type_id::TypeId;
use serde::Serialize;
use smallvec::SmallVec;

#[derive(Clone, Debug, Serialize)]
pub struct TypeAndOrigins {
    pub ty: TypeId,
    pub origins: SmallVec<[Loc; 1]>,
}

impl TypeAndOrigins {
    pub fn new(ty: TypeId, origin: Loc) -> TypeAndOrigins {
        let mut origins = SmallVec::new();
        origins.push(origin);
        TypeAndOrigins { ty, origins }
    }

    pub fn untyped() -> TypeAndOrigins {
        TypeAndOrigins {
            ty: TypeId::UNTYPED,
            origins: SmallVec::new(),
        }
    }
}
