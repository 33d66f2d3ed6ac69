//! One lint run: load catalogs, then check sources against them.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::catalog_loader::CatalogLoader;
use super::source_loader::SourceScanner;
use crate::check::CatalogSet;
use crate::config::LintConfig;
use crate::diagnostics::Reporter;
use crate::error::LintError;

/// Counts describing a finished run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub domains: usize,
    pub entries: usize,
    pub source_files: usize,
    /// Sources were given but not scanned because the catalogs had errors.
    pub sources_skipped: bool,
    pub error_count: usize,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.error_count == 0
    }

    /// Process exit status for this run.
    pub fn exit_code(&self) -> u8 {
        if self.is_clean() { 0 } else { 1 }
    }
}

/// Drives a run, sending every diagnostic to `R`.
pub struct Linter<R> {
    config: LintConfig,
    reporter: R,
}

impl<R: Reporter> Linter<R> {
    pub fn new(config: LintConfig, reporter: R) -> Self {
        Self { config, reporter }
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Load and merge the catalogs of every plugin.
    pub fn load_catalogs(&mut self, plugins: &[PathBuf]) -> Result<CatalogSet, LintError> {
        CatalogLoader::new(&self.config).load_plugins(plugins, &mut self.reporter)
    }

    /// Check every source file below `root`. Returns the number of files scanned.
    pub fn scan_sources(&mut self, root: &Path, catalogs: &CatalogSet) -> Result<usize, LintError> {
        SourceScanner::new(&self.config, catalogs).scan_tree(root, &mut self.reporter)
    }

    /// Full run. Sources are only scanned when the catalogs loaded without errors.
    pub fn run(
        &mut self,
        plugins: &[PathBuf],
        sources: Option<&Path>,
    ) -> Result<RunSummary, LintError> {
        info!(plugins = plugins.len(), "loading catalogs");
        let catalogs = self.load_catalogs(plugins)?;
        let mut summary = RunSummary {
            domains: catalogs.len(),
            entries: catalogs.entry_count(),
            ..RunSummary::default()
        };
        info!(domains = summary.domains, entries = summary.entries, "catalogs loaded");

        let catalog_errors = self.reporter.error_count();
        match sources {
            Some(root) if catalog_errors > 0 => {
                warn!(
                    errors = catalog_errors,
                    root = %root.display(),
                    "catalog errors, source scan skipped"
                );
                summary.sources_skipped = true;
            }
            Some(root) => {
                info!(root = %root.display(), "scanning sources");
                summary.source_files = self.scan_sources(root, &catalogs)?;
            }
            None => {}
        }

        summary.error_count = self.reporter.error_count();
        info!(
            files = summary.source_files,
            errors = summary.error_count,
            "run finished"
        );
        Ok(summary)
    }
}
