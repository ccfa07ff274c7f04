//! Shared foundation for the sorbet-rs type-checking kernel.
//!
//! This crate provides types used across every other `rbtc-*` crate:
//! - Source locations (`FileId`, `Loc`)
//! - Diagnostics (`Diagnostic`, `ErrorClass`, `ErrorSink`)
//! - Kernel-wide configuration (`KernelOptions`)
//! - A no-op-by-default metrics seam (`Metrics`)

pub mod diagnostics;
pub mod loc;
pub mod metrics;
pub mod options;
pub mod type_and_origins;
pub mod type_id;

pub use diagnostics::{Diagnostic, DiagnosticSection, ErrorClass, ErrorLine, ErrorSink, VecErrorSink};
pub use loc::{FileId, Loc};
pub use metrics::{Metrics, NoopMetrics};
pub use options::{AndDispatchStrategy, KernelOptions};
pub use type_and_origins::TypeAndOrigins;
pub use type_id::TypeId;
