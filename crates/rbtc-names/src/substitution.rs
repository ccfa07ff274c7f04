//! Cross-table name substitution: a pre-built map from source handles to
//! destination handles, built once and reused per file.

use crate::name_ref::NameRef;
use crate::table::NameTable;
use rustc_hash::FxHashMap;

/// A pre-built map translating every name in a source table into its
/// equivalent in a destination table, interning as needed. Built once per
/// `(from, to)` pair and reused across every file that needs it.
pub struct NameSubstitution {
    map: FxHashMap<NameRef, NameRef>,
}

impl NameSubstitution {
    /// Build a substitution for every UTF-8 name currently interned in
    /// `from`, interning each into `to` if it isn't already there.
    ///
    /// Constant and unique names are intentionally excluded: constants
    /// re-derive from their substituted UTF-8 base via
    /// [`NameTable::enter_name_constant`], and unique names are
    /// table-local by construction (their dedup key embeds the table's
    /// own base names), so carrying them across tables verbatim would be
    /// unsound.
    pub fn build(from: &NameTable, to: &mut NameTable) -> NameSubstitution {
        let mut map = FxHashMap::default();
        for name in from.iter_utf8() {
            let text = from.short_name(name);
            // An overflowing destination table is a configuration error far
            // outside what a single substitution build should ever hit in
            // practice; degrade to an identity mapping rather than panicking.
            if let Ok(dest) = to.enter_name_utf8(&text) {
                map.insert(name, dest);
            }
        }
        NameSubstitution { map }
    }

    /// Translate a name through this substitution. Names absent from the
    /// map (constants, uniques) pass through unchanged — callers that
    /// need to substitute those must re-derive them from their
    /// substituted base via the destination table directly.
    pub fn substitute(&self, name: NameRef) -> NameRef {
        self.map.get(&name).copied().unwrap_or(name)
    }
}

impl NameTable {
    /// Iterate every interned UTF-8 name, in insertion order. Skips index
    /// 0, the reserved empty-name sentinel.
    pub fn iter_utf8(&self) -> impl Iterator<Item = NameRef> + '_ {
        (1..self.len_utf8()).map(|i| NameRef::pack(crate::name_ref::NameKind::Utf8, i as u32))
    }

    pub(crate) fn len_utf8(&self) -> usize {
        self.utf8_len()
    }
}
