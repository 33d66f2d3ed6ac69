//! Diagnostics — findings produced by the checks and the sinks that take them.
//!
//! Checks never print. They hand [`Diagnostic`]s to a [`Reporter`], which
//! renders them and keeps the running error count that decides the exit status.

mod collector;

pub use collector::DiagnosticCollector;

use std::fmt;
use std::sync::Arc;

use crate::base::{LineCol, Location};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic, highest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Fatal,
    Error,
    Warning,
    Info,
    None,
}

impl Severity {
    /// Short label used by the plain output format.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERR",
            Severity::Warning => "WRN",
            Severity::Info => "INF",
            Severity::None => "NON",
        }
    }

    /// Whether this severity counts toward the exit status.
    #[inline]
    pub fn is_error(self) -> bool {
        self <= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file this diagnostic is about.
    pub file: Arc<str>,
    /// Position inside the file, `None` for whole-file findings.
    pub pos: Option<LineCol>,
    /// Severity level.
    pub severity: Severity,
    /// Stable diagnostic code (see [`codes`]).
    pub code: Option<&'static str>,
    /// The diagnostic message.
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a diagnostic at a position.
    pub fn new(
        severity: Severity,
        file: impl Into<Arc<str>>,
        pos: Option<LineCol>,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            file: file.into(),
            pos,
            severity,
            code: None,
            message: message.into(),
        }
    }

    /// Create a diagnostic anchored at `loc`.
    pub fn at(severity: Severity, loc: &Location, message: impl Into<Arc<str>>) -> Self {
        Self::new(severity, loc.file.clone(), Some(loc.pos), message)
    }

    pub fn error(loc: &Location, message: impl Into<Arc<str>>) -> Self {
        Self::at(Severity::Error, loc, message)
    }

    pub fn warning(loc: &Location, message: impl Into<Arc<str>>) -> Self {
        Self::at(Severity::Warning, loc, message)
    }

    pub fn info(loc: &Location, message: impl Into<Arc<str>>) -> Self {
        Self::at(Severity::Info, loc, message)
    }

    /// Create a diagnostic about a whole file.
    pub fn for_file(
        severity: Severity,
        file: impl Into<Arc<str>>,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self::new(severity, file, None, message)
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    /// 1-indexed line, or 0 for whole-file findings.
    pub fn line(&self) -> u32 {
        self.pos.map_or(0, LineCol::line_one_indexed)
    }

    /// 1-indexed column, or 0 for whole-file findings.
    pub fn column(&self) -> u32 {
        self.pos.map_or(0, LineCol::col_one_indexed)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Stable diagnostic codes.
pub mod codes {
    /// Catalog file failed to parse.
    pub const CATALOG_SYNTAX: &str = "P0001";
    /// Same msgid twice in one domain.
    pub const DUPLICATE_KEY: &str = "P0002";
    /// Same msgstr under unrelated msgids.
    pub const DUPLICATE_VALUE: &str = "P0003";
    /// Same msgstr under near-identical msgids.
    pub const DUPLICATE_VALUE_SIMILAR_KEY: &str = "P0004";
    /// `{n}` present on one side of an entry only.
    pub const PLACEHOLDER_MISMATCH: &str = "P0005";
    /// msgid uses characters outside the allowed set.
    pub const INVALID_KEY: &str = "P0006";
    /// Locale directories disagree on their domains.
    pub const LOCALE_TOPOLOGY: &str = "P0007";
    /// Two plugins provide the same domain.
    pub const DUPLICATE_DOMAIN: &str = "P0008";

    /// Lookup call is structurally broken.
    pub const MALFORMED_CALL: &str = "P0100";
    /// Lookup call names a domain no catalog provides.
    pub const UNKNOWN_DOMAIN: &str = "P0101";
    /// Lookup call names a msgid its domain lacks.
    pub const UNKNOWN_KEY: &str = "P0102";
    /// Lookup call passes fewer arguments than the msgstr needs.
    pub const MISSING_ARGUMENT: &str = "P0103";
    /// Lookup call argument is double quoted.
    pub const QUOTE_STYLE: &str = "P0104";
}

// ============================================================================
// REPORTER
// ============================================================================

/// A sink for diagnostics.
///
/// Implementations render or buffer each diagnostic as it arrives and keep
/// count of the ones that fail the run.
pub trait Reporter {
    /// Take one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);

    /// Number of Fatal/Error diagnostics seen so far.
    fn error_count(&self) -> usize;

    /// Forward a batch in order.
    fn report_all(&mut self, diagnostics: Vec<Diagnostic>) {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }

    fn error_count(&self) -> usize {
        (**self).error_count()
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }

    fn error_count(&self) -> usize {
        (**self).error_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(Severity::Fatal < Severity::Error);
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
        assert!(Severity::Info < Severity::None);
    }

    #[test]
    fn test_only_fatal_and_error_count() {
        assert!(Severity::Fatal.is_error());
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
        assert!(!Severity::Info.is_error());
        assert!(!Severity::None.is_error());
    }

    #[test]
    fn test_diagnostic_error() {
        let loc = Location::new("a.po", LineCol::new(9, 4));
        let diag = Diagnostic::error(&loc, "test error").with_code(codes::DUPLICATE_KEY);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.line(), 10);
        assert_eq!(diag.column(), 5);
        assert_eq!(diag.code, Some("P0002"));
    }

    #[test]
    fn test_file_diagnostic_has_zero_position() {
        let diag = Diagnostic::for_file(Severity::Error, "a.po", "broken");
        assert_eq!((diag.line(), diag.column()), (0, 0));
    }
}
