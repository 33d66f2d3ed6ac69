//! Reporter implementations that render diagnostics.
//!
//! - [`PlainReporter`] - `file:line:col:LEVEL: message`
//! - [`GitLinkReporter`] - checklist lines linking to the remote source line

mod git;
mod plain;

pub use git::{web_url, GitInfo, GitLinkReporter};
pub use plain::PlainReporter;

use std::io::Write;

use crate::diagnostics::{Diagnostic, Severity};

/// Error count and display-path handling shared by the reporters.
#[derive(Clone, Debug, Default)]
pub struct ErrorCounter {
    errors: usize,
    strip_prefix: String,
}

impl ErrorCounter {
    pub fn new(strip_prefix: impl Into<String>) -> Self {
        Self {
            errors: 0,
            strip_prefix: strip_prefix.into(),
        }
    }

    /// Count `severity` if it fails the run.
    pub fn record(&mut self, severity: Severity) {
        if severity.is_error() {
            self.errors += 1;
        }
    }

    pub fn count(&self) -> usize {
        self.errors
    }

    /// Path as shown to the reader. Matching always uses the full path.
    pub fn display_name<'a>(&self, file: &'a str) -> &'a str {
        if self.strip_prefix.is_empty() {
            return file;
        }
        file.strip_prefix(self.strip_prefix.as_str()).unwrap_or(file)
    }
}

/// Write the plain line for a diagnostic.
pub(crate) fn write_plain<W: Write>(
    out: &mut W,
    name: &str,
    diagnostic: &Diagnostic,
) -> std::io::Result<()> {
    writeln!(
        out,
        "{}:{}:{}:{}: {}",
        name,
        diagnostic.line(),
        diagnostic.column(),
        diagnostic.severity.label(),
        diagnostic.message
    )
}
