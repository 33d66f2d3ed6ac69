//! # polint
//!
//! Consistency linter for gettext catalogs and the PHP lookup calls that use them.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project     → Plugin/locale loading, source walk, Linter runs
//!   ↓
//! check       → Domain indexes, catalog rules, call-site checks
//!   ↓
//! catalog     → Catalog lexer + parser (msgid/msgstr records)
//! source      → Source tokenizer, literal folding, call scanner
//!   ↓
//! diagnostics → Severity, Diagnostic, Reporter
//! report      → Plain and git-link reporters
//!   ↓
//! base        → Primitives (LineCol, LineIndex, Location, quoted runs)
//! ```

/// Foundation types: positions, locations, shared lexing helpers
pub mod base;

/// Catalog files: tokenizer and parser
pub mod catalog;

/// Catalog indexing and cross-validation rules
pub mod check;

/// Run configuration
pub mod config;

/// Diagnostics and the reporter seam
pub mod diagnostics;

/// Errors that abort a run
pub mod error;

/// Filesystem loading and run orchestration
pub mod project;

/// Diagnostic renderers
pub mod report;

/// Source files: tokenizer, folding, call scanner
pub mod source;

pub use base::{LineCol, LineIndex, Location};
pub use catalog::{parse_catalog, Entry};
pub use check::{CatalogSet, DomainIndex};
pub use config::LintConfig;
pub use diagnostics::{Diagnostic, DiagnosticCollector, Reporter, Severity};
pub use error::{CatalogSyntaxError, LintError};
pub use project::{Linter, RunSummary};
pub use report::{GitLinkReporter, PlainReporter};
