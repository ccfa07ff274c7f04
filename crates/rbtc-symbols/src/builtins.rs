//! The fixed set of class/module symbols every kernel starts with.
//!
//! These occupy the first entries of the class/module arena at known,
//! stable indices so that code elsewhere (dispatch, the lattice
//! operations) can refer to e.g. `builtins.integer` without a name
//! lookup. Index 0 is reserved by [`crate::SymbolRef::NO_SYMBOL`] and is
//! not a real class.

use crate::flags::class_flags;
use crate::symbol::ClassOrModuleSymbol;
use crate::symbol_ref::SymbolRef;
use rbtc_names::NameTable;

/// Handles to the builtin classes/modules, valid for the lifetime of the
/// `GlobalState` that created them.
#[derive(Clone, Copy, Debug)]
pub struct Builtins {
    pub root: SymbolRef,
    pub top: SymbolRef,
    pub bottom: SymbolRef,
    pub untyped: SymbolRef,
    pub basic_object: SymbolRef,
    pub object: SymbolRef,
    pub module: SymbolRef,
    pub class: SymbolRef,
    pub kernel: SymbolRef,
    pub standard_error: SymbolRef,
    pub exception: SymbolRef,
    pub true_class: SymbolRef,
    pub false_class: SymbolRef,
    pub nil_class: SymbolRef,
    pub integer: SymbolRef,
    pub float: SymbolRef,
    pub string: SymbolRef,
    pub symbol: SymbolRef,
    pub array: SymbolRef,
    pub hash: SymbolRef,
    pub set: SymbolRef,
    pub regexp: SymbolRef,
    pub range: SymbolRef,
    pub proc: SymbolRef,
    pub t: SymbolRef,
    pub t_array: SymbolRef,
    pub t_hash: SymbolRef,
    pub t_enumerable: SymbolRef,
    pub singleton: SymbolRef,
    pub struct_: SymbolRef,
    /// Stand-in for an unresolved module reference — never a dispatch
    /// target, only ever a placeholder so resolution can proceed.
    pub stub_module: SymbolRef,
    pub stub_mixin: SymbolRef,
    pub stub_super_class: SymbolRef,
    /// Owner for symbols with no meaningful lexical parent, e.g. `root`
    /// itself.
    pub magic: SymbolRef,
}

/// Entries are `(field name handled by caller, source text, flags,
/// superclass field index into the list itself)`. Declared as a flat list
/// so the install order matches the arena indices 1..=34 exactly.
struct Entry {
    name: &'static str,
    flags: u32,
    superclass: Option<usize>,
}

const ENTRIES: &[Entry] = &[
    Entry { name: "<root>", flags: class_flags::MODULE, superclass: None },
    Entry { name: "<top>", flags: class_flags::CLASS, superclass: None },
    Entry { name: "<bottom>", flags: class_flags::CLASS, superclass: None },
    Entry { name: "<untyped>", flags: class_flags::CLASS, superclass: None },
    Entry { name: "BasicObject", flags: class_flags::CLASS, superclass: None },
    Entry { name: "Object", flags: class_flags::CLASS, superclass: Some(4) },
    Entry { name: "Module", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "Class", flags: class_flags::CLASS, superclass: Some(6) },
    Entry { name: "Kernel", flags: class_flags::MODULE, superclass: None },
    Entry { name: "StandardError", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "Exception", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "TrueClass", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "FalseClass", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "NilClass", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "Integer", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "Float", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "String", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "Symbol", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "Array", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "Hash", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "Set", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "Regexp", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "Range", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "Proc", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "T", flags: class_flags::MODULE, superclass: None },
    Entry { name: "T::Array", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "T::Hash", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "T::Enumerable", flags: class_flags::MODULE, superclass: None },
    Entry { name: "Singleton", flags: class_flags::MODULE, superclass: None },
    Entry { name: "Struct", flags: class_flags::CLASS, superclass: Some(5) },
    Entry { name: "<StubModule>", flags: class_flags::MODULE, superclass: None },
    Entry { name: "<StubMixin>", flags: class_flags::MODULE, superclass: None },
    Entry { name: "<StubSuperClass>", flags: class_flags::CLASS, superclass: Some(4) },
    Entry { name: "<Magic>", flags: class_flags::CLASS, superclass: Some(4) },
];

/// Installs the builtin set into `arenas`, interning each name into
/// `names`. Must run before any user-declared symbol, since it relies on
/// arena indices 1..=34 being free.
pub(crate) fn install(
    names: &mut NameTable,
    push: &mut impl FnMut(ClassOrModuleSymbol) -> SymbolRef,
) -> Builtins {
    let mut refs: Vec<SymbolRef> = Vec::with_capacity(ENTRIES.len());
    for entry in ENTRIES {
        let name = names
            .enter_name_utf8(entry.name)
            .expect("builtin name table overflow");
        let superclass = entry
            .superclass
            .map(|i| refs[i])
            .unwrap_or(SymbolRef::NO_SYMBOL);
        let mut symbol = ClassOrModuleSymbol::new(SymbolRef::NO_SYMBOL, name, entry.flags);
        symbol.superclass = superclass;
        refs.push(push(symbol));
    }

    Builtins {
        root: refs[0],
        top: refs[1],
        bottom: refs[2],
        untyped: refs[3],
        basic_object: refs[4],
        object: refs[5],
        module: refs[6],
        class: refs[7],
        kernel: refs[8],
        standard_error: refs[9],
        exception: refs[10],
        true_class: refs[11],
        false_class: refs[12],
        nil_class: refs[13],
        integer: refs[14],
        float: refs[15],
        string: refs[16],
        symbol: refs[17],
        array: refs[18],
        hash: refs[19],
        set: refs[20],
        regexp: refs[21],
        range: refs[22],
        proc: refs[23],
        t: refs[24],
        t_array: refs[25],
        t_hash: refs[26],
        t_enumerable: refs[27],
        singleton: refs[28],
        struct_: refs[29],
        stub_module: refs[30],
        stub_mixin: refs[31],
        stub_super_class: refs[32],
        magic: refs[33],
    }
}
