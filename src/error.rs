//! Error types.
//!
//! Only conditions that stop a run are errors here. Everything a run keeps
//! going after is a [`Diagnostic`](crate::diagnostics::Diagnostic).

use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::base::Location;

/// The first error of a catalog parse.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{location}: {message}")]
pub struct CatalogSyntaxError {
    pub location: Location,
    pub message: String,
}

/// A condition that aborts the run.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("catalog syntax error at {0}")]
    CatalogSyntax(#[from] CatalogSyntaxError),

    #[error(
        "locale directories of {} disagree: {} has domains {expected:?}, {} has {found:?}",
        .plugin.display(),
        .reference.display(),
        .locale.display()
    )]
    Topology {
        plugin: PathBuf,
        reference: PathBuf,
        locale: PathBuf,
        expected: BTreeSet<String>,
        found: BTreeSet<String>,
    },
}

impl LintError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::LineCol;

    #[test]
    fn test_syntax_error_display() {
        let err = CatalogSyntaxError {
            location: Location::new("ja/app.po", LineCol::new(4, 2)),
            message: "unexpected `x`, expected `msgid`".into(),
        };
        assert_eq!(err.to_string(), "ja/app.po:5:3: unexpected `x`, expected `msgid`");
        let lint: LintError = err.into();
        assert!(lint.to_string().starts_with("catalog syntax error at ja/app.po:5:3"));
    }

    #[test]
    fn test_topology_display() {
        let err = LintError::Topology {
            plugin: PathBuf::from("Cabinets"),
            reference: PathBuf::from("Cabinets/resources/locales/en_US"),
            locale: PathBuf::from("Cabinets/resources/locales/ja_JP"),
            expected: BTreeSet::from(["cabinets".to_string()]),
            found: BTreeSet::from(["cabinets".to_string(), "extra".to_string()]),
        };
        let text = err.to_string();
        assert!(text.contains("Cabinets/resources/locales/ja_JP has"));
        assert!(text.contains("\"extra\""));
    }
}
