//! The two-phase symbol table: a mutable [`GlobalStateBuilder`] used while
//! declarations are being entered, frozen into a read-only [`GlobalState`]
//! once resolution begins.

use crate::builtins::{self, Builtins};
use crate::flags::class_flags;
use crate::symbol::{
    Argument, ClassOrModuleSymbol, FieldSymbol, MethodSymbol, TypeArgumentSymbol,
    TypeMemberSymbol, Variance,
};
use crate::symbol_ref::{SymbolKind, SymbolRef};
use rbtc_common::KernelOptions;
use rbtc_names::{NameRef, NameTable, UniqueNameKind};
use rustc_hash::FxHashMap;

#[derive(Default)]
struct Arenas {
    classes: Vec<ClassOrModuleSymbol>,
    methods: Vec<MethodSymbol>,
    fields: Vec<FieldSymbol>,
    type_members: Vec<TypeMemberSymbol>,
    type_arguments: Vec<TypeArgumentSymbol>,
}

impl Arenas {
    fn push_class(&mut self, symbol: ClassOrModuleSymbol) -> SymbolRef {
        self.classes.push(symbol);
        SymbolRef::pack(SymbolKind::ClassOrModule, self.classes.len() as u32)
    }
}

/// Shared state accessed identically by both halves of the lifecycle.
struct Data {
    names: NameTable,
    arenas: Arenas,
    builtins: Builtins,
    /// `class -> its singleton class`, populated lazily.
    singleton_classes: FxHashMap<SymbolRef, SymbolRef>,
}

impl Data {
    fn class(&self, r: SymbolRef) -> &ClassOrModuleSymbol {
        assert_eq!(r.kind(), SymbolKind::ClassOrModule, "not a class/module ref");
        &self.arenas.classes[r.index() as usize - 1]
    }

    fn class_mut(&mut self, r: SymbolRef) -> &mut ClassOrModuleSymbol {
        assert_eq!(r.kind(), SymbolKind::ClassOrModule, "not a class/module ref");
        &mut self.arenas.classes[r.index() as usize - 1]
    }

    fn method(&self, r: SymbolRef) -> &MethodSymbol {
        assert_eq!(r.kind(), SymbolKind::Method, "not a method ref");
        &self.arenas.methods[r.index() as usize - 1]
    }

    fn field(&self, r: SymbolRef) -> &FieldSymbol {
        assert_eq!(r.kind(), SymbolKind::Field, "not a field ref");
        &self.arenas.fields[r.index() as usize - 1]
    }

    fn type_member(&self, r: SymbolRef) -> &TypeMemberSymbol {
        assert_eq!(r.kind(), SymbolKind::TypeMember, "not a type member ref");
        &self.arenas.type_members[r.index() as usize - 1]
    }

    fn type_argument(&self, r: SymbolRef) -> &TypeArgumentSymbol {
        assert_eq!(r.kind(), SymbolKind::TypeArgument, "not a type argument ref");
        &self.arenas.type_arguments[r.index() as usize - 1]
    }

    /// Walks from `from`'s mixins and up its `superclass` chain, bounded
    /// by `max_steps` so a malformed (cyclic) ancestry cannot hang the
    /// caller. Strict: `from` is never its own ancestor.
    fn derives_from(&self, from: SymbolRef, ancestor: SymbolRef, max_steps: usize) -> bool {
        if self.class(from).mixins.iter().any(|m| *m == ancestor) {
            return true;
        }
        let mut cur = self.class(from).superclass;
        for _ in 0..max_steps {
            if !cur.exists() {
                return false;
            }
            if cur == ancestor {
                return true;
            }
            if self.class(cur).mixins.iter().any(|m| *m == ancestor) {
                return true;
            }
            let next = self.class(cur).superclass;
            if next == cur {
                return false;
            }
            cur = next;
        }
        false
    }

    fn find_member(&self, owner: SymbolRef, name: NameRef) -> SymbolRef {
        self.class(owner)
            .members
            .get(&name)
            .copied()
            .unwrap_or(SymbolRef::NO_SYMBOL)
    }

    fn find_member_transitive(&self, owner: SymbolRef, name: NameRef, max_steps: usize) -> SymbolRef {
        let mut cur = owner;
        for _ in 0..max_steps {
            let found = self.find_member(cur, name);
            if found.exists() {
                return found;
            }
            for mixin in self.class(cur).mixins.iter().rev() {
                let found = self.find_member(*mixin, name);
                if found.exists() {
                    return found;
                }
            }
            let next = self.class(cur).superclass;
            if !next.exists() || next == cur {
                break;
            }
            cur = next;
        }
        SymbolRef::NO_SYMBOL
    }
}

/// The mutable half of the lifecycle. Every `enter_*` method is idempotent
/// on repeated calls with the same owner/name: re-entering an existing
/// declaration returns the existing ref rather than allocating a new one.
pub struct GlobalStateBuilder {
    data: Data,
    options: KernelOptions,
}

impl GlobalStateBuilder {
    pub fn new(options: KernelOptions) -> GlobalStateBuilder {
        let mut names = NameTable::new();
        let mut arenas = Arenas::default();
        let builtins = {
            let mut push = |symbol: ClassOrModuleSymbol| arenas.push_class(symbol);
            builtins::install(&mut names, &mut push)
        };
        GlobalStateBuilder {
            data: Data {
                names,
                arenas,
                builtins,
                singleton_classes: FxHashMap::default(),
            },
            options,
        }
    }

    pub fn names(&self) -> &NameTable {
        &self.data.names
    }

    pub fn names_mut(&mut self) -> &mut NameTable {
        &mut self.data.names
    }

    pub fn builtins(&self) -> Builtins {
        self.data.builtins
    }

    pub fn options(&self) -> &KernelOptions {
        &self.options
    }

    /// Returns the existing class/module if `owner.name` is already
    /// declared, otherwise allocates a fresh one.
    pub fn enter_class(&mut self, owner: SymbolRef, name: NameRef, flags: u32) -> SymbolRef {
        if let Some(existing) = self.data.class(owner).members.get(&name) {
            tracing::trace!(?owner, ?name, existing = ?existing, "enter_class: already declared");
            return *existing;
        }
        let symbol = ClassOrModuleSymbol::new(owner, name, flags);
        let r = self.data.arenas.push_class(symbol);
        self.data.class_mut(owner).members.insert(name, r);
        tracing::trace!(?owner, ?name, flags, declared = ?r, "enter_class: declared");
        r
    }

    pub fn set_superclass(&mut self, class: SymbolRef, superclass: SymbolRef) {
        self.data.class_mut(class).superclass = superclass;
    }

    pub fn add_mixin(&mut self, class: SymbolRef, mixin: SymbolRef) {
        self.data.class_mut(class).mixins.push(mixin);
    }

    /// Marks `alias` (normally entered with `class_flags::ALIAS`) as
    /// standing for `target`. `dealias` walks this link.
    pub fn set_alias_target(&mut self, alias: SymbolRef, target: SymbolRef) {
        self.data.class_mut(alias).alias_target = target;
    }

    pub fn enter_method(
        &mut self,
        owner: SymbolRef,
        name: NameRef,
        flags: u32,
        arguments: Vec<Argument>,
        result_type: rbtc_common::TypeId,
    ) -> SymbolRef {
        if let Some(existing) = self.data.class(owner).members.get(&name) {
            return *existing;
        }
        let mut symbol = MethodSymbol::new(owner, name, flags);
        symbol.arguments = arguments;
        symbol.result_type = result_type;
        self.data.arenas.methods.push(symbol);
        let r = SymbolRef::pack(SymbolKind::Method, self.data.arenas.methods.len() as u32);
        self.data.class_mut(owner).members.insert(name, r);
        r
    }

    pub fn enter_field(
        &mut self,
        owner: SymbolRef,
        name: NameRef,
        flags: u32,
        result_type: rbtc_common::TypeId,
    ) -> SymbolRef {
        if let Some(existing) = self.data.class(owner).members.get(&name) {
            return *existing;
        }
        let mut symbol = FieldSymbol::new(owner, name, flags);
        symbol.result_type = result_type;
        self.data.arenas.fields.push(symbol);
        let r = SymbolRef::pack(SymbolKind::Field, self.data.arenas.fields.len() as u32);
        self.data.class_mut(owner).members.insert(name, r);
        r
    }

    pub fn enter_type_member(
        &mut self,
        owner: SymbolRef,
        name: NameRef,
        variance: Variance,
    ) -> SymbolRef {
        if let Some(existing) = self
            .data
            .class(owner)
            .type_members
            .iter()
            .find(|r| self.data.type_member(**r).name == name)
        {
            return *existing;
        }
        let symbol = TypeMemberSymbol::new(owner, name, variance);
        self.data.arenas.type_members.push(symbol);
        let r = SymbolRef::pack(
            SymbolKind::TypeMember,
            self.data.arenas.type_members.len() as u32,
        );
        self.data.class_mut(owner).type_members.push(r);
        r
    }

    pub fn enter_type_argument(
        &mut self,
        owner: SymbolRef,
        type_member: SymbolRef,
        bound_type: rbtc_common::TypeId,
    ) -> SymbolRef {
        self.data.arenas.type_arguments.push(TypeArgumentSymbol {
            owner,
            type_member,
            bound_type,
        });
        SymbolRef::pack(
            SymbolKind::TypeArgument,
            self.data.arenas.type_arguments.len() as u32,
        )
    }

    /// Looks up the singleton class of `class`, creating it on first
    /// request. Only available on the builder: the frozen `GlobalState`
    /// must not allocate, so it only ever sees singleton classes created
    /// before freezing.
    pub fn lookup_singleton_class(&mut self, class: SymbolRef) -> SymbolRef {
        if let Some(existing) = self.data.singleton_classes.get(&class) {
            return *existing;
        }
        let base_name = self.data.class(class).name;
        let unique = self
            .data
            .names
            .enter_name_unique(UniqueNameKind::SingletonClass, base_name, 0);
        let owner = self.data.class(class).owner;
        let singleton = ClassOrModuleSymbol::new(owner, unique, class_flags::SINGLETON);
        let r = self.data.arenas.push_class(singleton);
        self.data.class_mut(r).superclass = self.data.builtins.object;
        self.data.singleton_classes.insert(class, r);
        r
    }

    pub fn freeze(self) -> GlobalState {
        tracing::debug!(
            classes = self.data.arenas.classes.len(),
            methods = self.data.arenas.methods.len(),
            fields = self.data.arenas.fields.len(),
            "freeze: symbol table sealed"
        );
        GlobalState {
            data: self.data,
            options: self.options,
        }
    }
}

/// The frozen, read-only half. Immutable and `Sync`: safe to share across
/// threads without locking once resolution begins.
pub struct GlobalState {
    data: Data,
    options: KernelOptions,
}

impl GlobalState {
    pub fn names(&self) -> &NameTable {
        &self.data.names
    }

    pub fn builtins(&self) -> Builtins {
        self.data.builtins
    }

    pub fn options(&self) -> &KernelOptions {
        &self.options
    }

    pub fn class(&self, r: SymbolRef) -> &ClassOrModuleSymbol {
        self.data.class(r)
    }

    pub fn method(&self, r: SymbolRef) -> &MethodSymbol {
        self.data.method(r)
    }

    pub fn field(&self, r: SymbolRef) -> &FieldSymbol {
        self.data.field(r)
    }

    pub fn type_member(&self, r: SymbolRef) -> &TypeMemberSymbol {
        self.data.type_member(r)
    }

    pub fn type_argument(&self, r: SymbolRef) -> &TypeArgumentSymbol {
        self.data.type_argument(r)
    }

    /// Whether `from` derives from `ancestor`, walking the superclass
    /// chain and checking mixins at each step. Bounded by
    /// `options().max_derives_from_walk`.
    pub fn derives_from(&self, from: SymbolRef, ancestor: SymbolRef) -> bool {
        self.data
            .derives_from(from, ancestor, self.options.max_derives_from_walk)
    }

    /// Looks up `name` directly on `owner`, without walking ancestors.
    /// Returns `SymbolRef::NO_SYMBOL` rather than panicking when absent.
    pub fn find_member(&self, owner: SymbolRef, name: NameRef) -> SymbolRef {
        self.data.find_member(owner, name)
    }

    /// Looks up `name` on `owner`, then its mixins, then up the
    /// superclass chain, stopping at the first hit.
    pub fn find_member_transitive(&self, owner: SymbolRef, name: NameRef) -> SymbolRef {
        self.data
            .find_member_transitive(owner, name, self.options.max_derives_from_walk)
    }

    /// The singleton class of `class`, if one was created before
    /// freezing. Returns `SymbolRef::NO_SYMBOL` otherwise — callers that
    /// need create-on-demand semantics must run before `freeze()`.
    pub fn singleton_class_of(&self, class: SymbolRef) -> SymbolRef {
        self.data
            .singleton_classes
            .get(&class)
            .copied()
            .unwrap_or(SymbolRef::NO_SYMBOL)
    }

    /// Follows a singleton class back to the class it is attached to.
    /// Returns `SymbolRef::NO_SYMBOL` if `r` isn't a singleton class.
    pub fn attached_class(&self, r: SymbolRef) -> SymbolRef {
        self.data
            .singleton_classes
            .iter()
            .find(|(_, singleton)| **singleton == r)
            .map(|(class, _)| *class)
            .unwrap_or(SymbolRef::NO_SYMBOL)
    }

    /// If `r` is a type-alias symbol (`class_flags::ALIAS`), walks
    /// `alias_target` links to the underlying definition. Bounded by
    /// `options().max_alias_walk`; returns `SymbolRef::NO_SYMBOL` rather
    /// than looping forever if the chain cycles back on itself.
    pub fn dealias(&self, r: SymbolRef) -> SymbolRef {
        let mut cur = r;
        for _ in 0..self.options.max_alias_walk {
            if !self.data.class(cur).has_flags(class_flags::ALIAS) {
                return cur;
            }
            let target = self.data.class(cur).alias_target;
            if !target.exists() {
                return cur;
            }
            cur = target;
        }
        SymbolRef::NO_SYMBOL
    }
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
