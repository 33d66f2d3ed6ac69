//! Loads plugin locale trees into a [`CatalogSet`].
//!
//! A plugin keeps one directory per locale under its locale root, and every
//! catalog file below a locale directory is one domain named after the file
//! stem. All locales of a plugin must carry the same domains. The locale with
//! the most domains (then the most entries) stands in for the whole plugin.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::file_loader::{child_directories, collect_file_paths, display_name, read_text};
use crate::catalog::parse_catalog_with;
use crate::check::{CatalogSet, DomainIndex};
use crate::config::LintConfig;
use crate::diagnostics::{codes, Diagnostic, DiagnosticCollector, Reporter, Severity};
use crate::error::LintError;

/// One parsed and indexed catalog file, with the diagnostics indexing raised.
struct LoadedFile {
    index: DomainIndex,
    diagnostics: Vec<Diagnostic>,
}

/// Reads catalogs as configured by a [`LintConfig`].
pub struct CatalogLoader<'a> {
    config: &'a LintConfig,
}

impl<'a> CatalogLoader<'a> {
    pub fn new(config: &'a LintConfig) -> Self {
        Self { config }
    }

    /// Load every plugin and merge their domains.
    ///
    /// A domain provided by more than one plugin is reported and the first
    /// plugin's copy kept.
    pub fn load_plugins(
        &self,
        plugins: &[PathBuf],
        reporter: &mut dyn Reporter,
    ) -> Result<CatalogSet, LintError> {
        let mut catalogs = CatalogSet::new();
        for plugin in plugins {
            let loaded = self.load_plugin(plugin, reporter)?;
            for domain in loaded.into_domains() {
                if let Err(duplicate) = catalogs.insert(domain) {
                    reporter.report(
                        Diagnostic::for_file(
                            Severity::Error,
                            display_name(plugin),
                            format!(
                                "duplicate domain: {} is already provided by another plugin",
                                duplicate.name()
                            ),
                        )
                        .with_code(codes::DUPLICATE_DOMAIN),
                    );
                }
            }
        }
        Ok(catalogs)
    }

    /// Load the representative locale of one plugin.
    pub fn load_plugin(
        &self,
        plugin: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<CatalogSet, LintError> {
        let root = plugin.join(&self.config.locale_subdir);
        if !root.is_dir() {
            warn!(
                plugin = %plugin.display(),
                root = %root.display(),
                "no locale directory, plugin skipped"
            );
            return Ok(CatalogSet::new());
        }

        let mut reference: Option<(PathBuf, BTreeSet<String>)> = None;
        let mut best: Option<(PathBuf, CatalogSet)> = None;
        for locale in child_directories(&root)? {
            let files = self.catalog_files(&locale)?;
            if files.is_empty() {
                debug!(locale = %locale.display(), "no catalogs in locale");
                continue;
            }
            let loaded = self.load_locale(&files, reporter)?;
            debug!(
                locale = %locale.display(),
                domains = loaded.len(),
                entries = loaded.entry_count(),
                "locale loaded"
            );

            let found = loaded.domain_names();
            if let Some((reference_path, expected)) = &reference {
                if *expected != found {
                    reporter.report(
                        Diagnostic::for_file(
                            Severity::Fatal,
                            display_name(&locale),
                            format!(
                                "domains differ from {}: expected {expected:?}, found {found:?}",
                                reference_path.display()
                            ),
                        )
                        .with_code(codes::LOCALE_TOPOLOGY),
                    );
                    return Err(LintError::Topology {
                        plugin: plugin.to_path_buf(),
                        reference: reference_path.clone(),
                        locale,
                        expected: expected.clone(),
                        found,
                    });
                }
            } else {
                reference = Some((locale.clone(), found));
            }

            if best.as_ref().is_none_or(|(_, current)| outranks(&loaded, current)) {
                best = Some((locale, loaded));
            }
        }

        Ok(match best {
            Some((locale, catalogs)) => {
                info!(
                    plugin = %plugin.display(),
                    locale = %locale.display(),
                    domains = catalogs.len(),
                    "representative locale"
                );
                catalogs
            }
            None => CatalogSet::new(),
        })
    }

    /// Catalog files anywhere below `locale`.
    fn catalog_files(&self, locale: &Path) -> Result<Vec<PathBuf>, LintError> {
        collect_file_paths(locale, |ext| ext == self.config.catalog_extension)
    }

    /// Parse and index every file of one locale.
    ///
    /// Files are merged in path order whether or not they were parsed on the
    /// rayon pool.
    fn load_locale(
        &self,
        files: &[PathBuf],
        reporter: &mut dyn Reporter,
    ) -> Result<CatalogSet, LintError> {
        if self.config.parallel {
            let results: Vec<_> = files.par_iter().map(|path| self.load_file(path)).collect();
            self.merge_loaded(results, reporter)
        } else {
            self.merge_loaded(files.iter().map(|path| self.load_file(path)), reporter)
        }
    }

    fn merge_loaded(
        &self,
        results: impl IntoIterator<Item = Result<LoadedFile, LintError>>,
        reporter: &mut dyn Reporter,
    ) -> Result<CatalogSet, LintError> {
        let mut catalogs = CatalogSet::new();
        for result in results {
            let loaded = match result {
                Ok(loaded) => loaded,
                Err(LintError::CatalogSyntax(err)) => {
                    reporter.report(
                        Diagnostic::at(Severity::Error, &err.location, err.message.clone())
                            .with_code(codes::CATALOG_SYNTAX),
                    );
                    return Err(err.into());
                }
                Err(err) => return Err(err),
            };
            reporter.report_all(loaded.diagnostics);
            catalogs.merge_file(loaded.index, self.config.similarity.as_ref(), reporter);
        }
        Ok(catalogs)
    }

    fn load_file(&self, path: &Path) -> Result<LoadedFile, LintError> {
        let file = display_name(path);
        let domain = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(file = %file, domain = %domain, "parsing catalog");

        let text = read_text(path)?;
        let options = self.config.parse_options();
        let entries = parse_catalog_with(&text, file.clone(), domain.as_str(), options)?;

        let mut collector = DiagnosticCollector::new();
        let policy = self.config.similarity.as_ref();
        let index = DomainIndex::from_file(domain, file, entries, policy, &mut collector);
        Ok(LoadedFile {
            index,
            diagnostics: collector.take(),
        })
    }
}

/// More domains wins, then more entries. Ties keep the earlier locale.
fn outranks(candidate: &CatalogSet, current: &CatalogSet) -> bool {
    (candidate.len(), candidate.entry_count()) > (current.len(), current.entry_count())
}
