//! Flag constants for symbol records, in the style of `tsz-checker`'s
//! `types::flags` module (bit constants grouped by the record they apply
//! to, rather than a `bitflags!`-generated type per kind).

/// Flags on a [`crate::ClassOrModuleSymbol`].
pub mod class_flags {
    pub const CLASS: u32 = 1 << 0;
    pub const MODULE: u32 = 1 << 1;
    pub const ABSTRACT: u32 = 1 << 2;
    pub const FINAL: u32 = 1 << 3;
    pub const SINGLETON: u32 = 1 << 4;
    /// Set on a symbol created to stand for a type alias (`Foo = Bar`);
    /// `alias_target` on the same symbol names what it resolves to.
    pub const ALIAS: u32 = 1 << 5;
}

/// Flags on a [`crate::MethodSymbol`].
pub mod method_flags {
    pub const ABSTRACT: u32 = 1 << 0;
    pub const FINAL: u32 = 1 << 1;
    pub const PRIVATE: u32 = 1 << 2;
    pub const PROTECTED: u32 = 1 << 3;
    pub const OVERLOADED: u32 = 1 << 4;
}

/// Flags on a [`crate::Argument`].
pub mod arg_flags {
    pub const KEYWORD: u32 = 1 << 0;
    pub const OPTIONAL: u32 = 1 << 1;
    pub const REPEATED: u32 = 1 << 2;
    pub const BLOCK: u32 = 1 << 3;
    pub const SHADOW: u32 = 1 << 4;
    pub const DEFAULT: u32 = 1 << 5;
}

/// Flags on a [`crate::FieldSymbol`].
pub mod field_flags {
    pub const STATIC: u32 = 1 << 0;
}
