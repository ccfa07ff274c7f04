//! Kernel-wide configuration.
//!
//! The kernel only exposes the handful of judgment calls that the
//! subtyping/dispatch algorithm leaves open to policy, plus the one
//! tunable that controls diagnostic noise.

/// How `AndType::dispatchCall` resolves a call against an intersection
/// receiver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AndDispatchStrategy {
    /// Only ever attempt the left component.
    LeftOnly,
    /// Attempt the left component; if it has no such method, fall back to
    /// the right. This is the default: it dispatches successfully whenever
    /// either mixed-in component defines the method, which is the common
    /// case for `Mixin & Mixin` receivers.
    #[default]
    TryBothPreferLeft,
}

/// Tunables for the subtyping/dispatch kernel.
#[derive(Clone, Copy, Debug)]
pub struct KernelOptions {
    /// Whether `Untyped` propagation posts an informational diagnostic.
    /// Defaults to off, so `T.untyped` noise doesn't flood output.
    pub report_untyped_propagation: bool,
    /// Strategy for `AndType::dispatchCall`.
    pub and_dispatch_strategy: AndDispatchStrategy,
    /// Upper bound on `derivesFrom`'s ancestor walk, so a malformed
    /// (cyclic) symbol table cannot hang the kernel.
    pub max_derives_from_walk: usize,
    /// Upper bound on `dealias`'s walk through `AliasType` targets, so a
    /// malformed (cyclic) alias chain cannot hang the kernel.
    pub max_alias_walk: usize,
    /// Maximum Levenshtein distance for "did you mean" suggestions on
    /// `UnknownMethod`.
    pub suggestion_max_distance: usize,
}

impl Default for KernelOptions {
    fn default() -> Self {
        KernelOptions {
            report_untyped_propagation: false,
            and_dispatch_strategy: AndDispatchStrategy::default(),
            max_derives_from_walk: 10_000,
            max_alias_walk: 1_000,
            suggestion_max_distance: 2,
        }
    }
}
