//! Diagnostic types and the error sink the kernel posts to.
//!
//! A diagnostic carries a primary location, a header message, and zero or
//! more `(heading, [(loc, message)])` sections used to build multi-line
//! "Expected ... / Got ..." explanations.

use crate::loc::Loc;
use serde::Serialize;

/// The kernel's error classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorClass {
    UnknownMethod,
    MethodArgumentCountMismatch,
    MethodArgumentMismatch,
    UnknownKeyword,
    /// Informational: untyped propagation silently suppressed a check.
    Untyped,
}

impl ErrorClass {
    /// Whether this class is purely informational and safe to downgrade
    /// or suppress under [`crate::KernelOptions::report_untyped_propagation`].
    pub fn is_informational(self) -> bool {
        matches!(self, ErrorClass::Untyped)
    }
}

/// One line of a diagnostic section: a location plus explanatory text.
#[derive(Clone, Debug, Serialize)]
pub struct ErrorLine {
    pub loc: Loc,
    pub message: String,
}

impl ErrorLine {
    pub fn new(loc: Loc, message: impl Into<String>) -> Self {
        ErrorLine {
            loc,
            message: message.into(),
        }
    }
}

/// A named group of explanatory lines, e.g. `("Expected", [...])`.
#[derive(Clone, Debug, Serialize)]
pub struct DiagnosticSection {
    pub heading: String,
    pub lines: Vec<ErrorLine>,
}

impl DiagnosticSection {
    pub fn new(heading: impl Into<String>, lines: Vec<ErrorLine>) -> Self {
        DiagnosticSection {
            heading: heading.into(),
            lines,
        }
    }
}

/// A structured error the kernel posts. Never formatted to a single string
/// internally — rendering to text is a presentation concern for whatever
/// downstream consumes the sink.
#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    pub loc: Loc,
    pub error_class: ErrorClass,
    pub header: String,
    pub sections: Vec<DiagnosticSection>,
}

impl Diagnostic {
    pub fn new(loc: Loc, error_class: ErrorClass, header: impl Into<String>) -> Self {
        Diagnostic {
            loc,
            error_class,
            header: header.into(),
            sections: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_section(mut self, section: DiagnosticSection) -> Self {
        self.sections.push(section);
        self
    }
}

/// Where the kernel posts diagnostics. Typically a thread-local
/// accumulator the surrounding pipeline drains at phase boundaries; the
/// kernel itself never drops a posted error.
pub trait ErrorSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// The straightforward in-memory sink used by tests and the demo CLI.
#[derive(Debug, Default)]
pub struct VecErrorSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl VecErrorSink {
    pub fn new() -> Self {
        VecErrorSink::default()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn has_class(&self, class: ErrorClass) -> bool {
        self.diagnostics.iter().any(|d| d.error_class == class)
    }
}

impl ErrorSink for VecErrorSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
