//! Walks a source tree and checks every lookup call against the catalogs.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use super::file_loader::{collect_file_paths, display_name, read_text};
use crate::check::{check_source, CatalogSet};
use crate::config::LintConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCollector, Reporter};
use crate::error::LintError;

pub struct SourceScanner<'a> {
    config: &'a LintConfig,
    catalogs: &'a CatalogSet,
}

impl<'a> SourceScanner<'a> {
    pub fn new(config: &'a LintConfig, catalogs: &'a CatalogSet) -> Self {
        Self { config, catalogs }
    }

    /// Source files below `root` with a configured extension, sorted.
    pub fn source_files(&self, root: &Path) -> Result<Vec<PathBuf>, LintError> {
        collect_file_paths(root, |ext| self.config.is_source_extension(ext))
    }

    /// Diagnostics for one source file, in call order.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<Diagnostic>, LintError> {
        let file = display_name(path);
        debug!(file = %file, "scanning source");
        let text = read_text(path)?;
        let mut collector = DiagnosticCollector::new();
        check_source(&text, file, &self.config.lookup_function, self.catalogs, &mut collector);
        Ok(collector.take())
    }

    /// Scan every source file below `root`, reporting in path order.
    /// Returns the number of files scanned.
    pub fn scan_tree(&self, root: &Path, reporter: &mut dyn Reporter) -> Result<usize, LintError> {
        let files = self.source_files(root)?;
        if self.config.parallel {
            let results: Vec<_> = files.par_iter().map(|path| self.scan_file(path)).collect();
            for result in results {
                reporter.report_all(result?);
            }
        } else {
            for path in &files {
                reporter.report_all(self.scan_file(path)?);
            }
        }
        Ok(files.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog;
    use crate::check::{DomainIndex, InflectionSimilarity};
    use crate::diagnostics::codes;
    use std::fs;
    use tempfile::TempDir;

    fn catalogs() -> CatalogSet {
        let source = "msgid \"hello {0}\"\nmsgstr \"Hello {0}\"\n";
        let entries = parse_catalog(source, "app.po", "app").unwrap();
        let mut sink = DiagnosticCollector::new();
        let mut set = CatalogSet::new();
        set.merge_file(
            DomainIndex::from_file("app", "app.po", entries, &InflectionSimilarity, &mut sink),
            &InflectionSimilarity,
            &mut sink,
        );
        set
    }

    #[test]
    fn test_scan_tree_only_reads_configured_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.php"), "<?php __d('app', 'nope');").unwrap();
        fs::write(dir.path().join("b.txt"), "__d('app', 'nope');").unwrap();
        let config = LintConfig::default();
        let set = catalogs();
        let mut sink = DiagnosticCollector::new();
        let scanned = SourceScanner::new(&config, &set).scan_tree(dir.path(), &mut sink).unwrap();
        assert_eq!(scanned, 1);
        assert_eq!(sink.with_code(codes::UNKNOWN_KEY).len(), 1);
    }

    #[test]
    fn test_scan_file_checks_arguments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.php");
        let source = "<?php\n__d('app', 'hello {0}');\n__d('app', 'hello {0}', $name);\n";
        fs::write(&path, source).unwrap();
        let config = LintConfig::default();
        let set = catalogs();
        let found = SourceScanner::new(&config, &set).scan_file(&path).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, Some(codes::MISSING_ARGUMENT));
        assert_eq!(found[0].line(), 2);
    }

    #[test]
    fn test_parallel_scan_keeps_path_order() {
        let dir = TempDir::new().unwrap();
        for name in ["c", "a", "b"] {
            fs::write(dir.path().join(format!("{name}.php")), "<?php __d('zz', 'k');").unwrap();
        }
        let config = LintConfig::default().with_parallel(true);
        let set = catalogs();
        let mut sink = DiagnosticCollector::new();
        SourceScanner::new(&config, &set).scan_tree(dir.path(), &mut sink).unwrap();
        let files: Vec<_> = sink
            .diagnostics()
            .iter()
            .map(|d| Path::new(&*d.file).file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, vec!["a.php", "b.php", "c.php"]);
    }
}
