//! The append-only, three-arena interning table.

use crate::name_ref::{MAX_ARENA_ENTRIES, NameKind, NameRef, UniqueNameKind};
use rustc_hash::FxHashMap;

/// Errors the name table itself can raise. In practice an arena
/// exceeding 2^30 entries is unreachable, but we return a real error
/// rather than panicking so callers embedding this in a long-running
/// service degrade gracefully.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelError {
    NameTableOverflow,
}

struct UniqueRecord {
    kind: UniqueNameKind,
    base: NameRef,
    counter: u32,
}

/// The interned-name store. See module docs for the overall design.
#[derive(Default)]
pub struct NameTable {
    utf8: Vec<String>,
    utf8_index: FxHashMap<String, NameRef>,

    constants: Vec<NameRef>,
    constant_index: FxHashMap<NameRef, NameRef>,

    uniques: Vec<UniqueRecord>,
    unique_index: FxHashMap<(UniqueNameKind, NameRef, u32), NameRef>,
}

impl NameTable {
    pub fn new() -> NameTable {
        let mut table = NameTable::default();
        // Index 0 of the UTF-8 arena is the reserved empty-name sentinel
        // (NameRef::exists() treats it as absent).
        table.utf8.push(String::new());
        table
    }

    /// Deduplicating insert of a raw source identifier.
    pub fn enter_name_utf8(&mut self, s: &str) -> Result<NameRef, KernelError> {
        if let Some(&existing) = self.utf8_index.get(s) {
            tracing::trace!(name = s, existing = ?existing, "enter_name_utf8: already interned");
            return Ok(existing);
        }
        if self.utf8.len() >= MAX_ARENA_ENTRIES {
            tracing::debug!(name = s, capacity = MAX_ARENA_ENTRIES, "enter_name_utf8: arena overflow");
            return Err(KernelError::NameTableOverflow);
        }
        let index = self.utf8.len() as u32;
        let name = NameRef::pack(NameKind::Utf8, index);
        self.utf8.push(s.to_string());
        self.utf8_index.insert(s.to_string(), name);
        tracing::trace!(name = s, index, "enter_name_utf8: interned");
        Ok(name)
    }

    /// Wraps a UTF-8 name as a constant name (`Foo` vs `foo`).
    pub fn enter_name_constant(&mut self, base: NameRef) -> NameRef {
        debug_assert_eq!(base.kind(), NameKind::Utf8, "constant base must be UTF-8");
        if let Some(&existing) = self.constant_index.get(&base) {
            return existing;
        }
        let index = self.constants.len() as u32;
        let name = NameRef::pack(NameKind::Constant, index);
        self.constants.push(base);
        self.constant_index.insert(base, name);
        name
    }

    /// Generates a fresh synthetic name distinct from any source name.
    /// `(kind, base, counter)` is the deduplication key.
    pub fn enter_name_unique(
        &mut self,
        kind: UniqueNameKind,
        base: NameRef,
        counter: u32,
    ) -> NameRef {
        let key = (kind, base, counter);
        if let Some(&existing) = self.unique_index.get(&key) {
            return existing;
        }
        let index = self.uniques.len() as u32;
        let name = NameRef::pack(NameKind::Unique, index);
        self.uniques.push(UniqueRecord {
            kind,
            base,
            counter,
        });
        self.unique_index.insert(key, name);
        name
    }

    /// Non-inserting lookup of a raw source identifier.
    pub fn lookup(&self, s: &str) -> Option<NameRef> {
        self.utf8_index.get(s).copied()
    }

    /// The human-readable suffix for a name.
    pub fn short_name(&self, name: NameRef) -> String {
        match name.kind() {
            NameKind::Utf8 => self.utf8[name.index() as usize].clone(),
            NameKind::Constant => {
                let base = self.constants[name.index() as usize];
                self.short_name(base)
            }
            NameKind::Unique => {
                let record = &self.uniques[name.index() as usize];
                format!("{:?}({})", record.kind, self.short_name(record.base))
            }
        }
    }

    /// The fully-qualified rendering of a name.
    pub fn show(&self, name: NameRef) -> String {
        match name.kind() {
            NameKind::Utf8 | NameKind::Constant => self.short_name(name),
            NameKind::Unique => {
                let record = &self.uniques[name.index() as usize];
                format!(
                    "<{:?}:{}#{}>",
                    record.kind,
                    self.show(record.base),
                    record.counter
                )
            }
        }
    }

    /// The original UTF-8 base this name ultimately wraps — `self` for a
    /// UTF-8 name, the wrapped name for a constant, the root base for a
    /// unique name.
    pub fn origin_utf8(&self, name: NameRef) -> NameRef {
        match name.kind() {
            NameKind::Utf8 => name,
            NameKind::Constant => self.origin_utf8(self.constants[name.index() as usize]),
            NameKind::Unique => self.origin_utf8(self.uniques[name.index() as usize].base),
        }
    }

    pub fn len(&self) -> usize {
        self.utf8.len() + self.constants.len() + self.uniques.len()
    }

    pub(crate) fn utf8_len(&self) -> usize {
        self.utf8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
