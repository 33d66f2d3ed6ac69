//! Run configuration.

use std::sync::Arc;

use crate::catalog::ParseOptions;
use crate::check::{InflectionSimilarity, SimilarityPolicy};

/// Default lookup function.
pub const DEFAULT_FUNCTION: &str = "__d";
/// Default locale root inside a plugin directory.
pub const DEFAULT_LOCALE_SUBDIR: &str = "resources/locales";

/// Settings for one lint run.
#[derive(Clone, Debug)]
pub struct LintConfig {
    /// Name of the translation lookup function.
    pub lookup_function: String,
    /// Extensions (without dot) of source files to scan.
    pub source_extensions: Vec<String>,
    /// Extension (without dot) of catalog files.
    pub catalog_extension: String,
    /// Locale root, relative to each plugin directory.
    pub locale_subdir: String,
    /// Parse and scan files on the rayon pool. Output order is unchanged.
    pub parallel: bool,
    /// Trace every catalog token and record.
    pub parse_trace: bool,
    /// When duplicate values under different keys are only informational.
    pub similarity: Arc<dyn SimilarityPolicy>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            lookup_function: DEFAULT_FUNCTION.to_string(),
            source_extensions: vec!["php".to_string()],
            catalog_extension: "po".to_string(),
            locale_subdir: DEFAULT_LOCALE_SUBDIR.to_string(),
            parallel: false,
            parse_trace: false,
            similarity: Arc::new(InflectionSimilarity),
        }
    }
}

impl LintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lookup_function(mut self, name: impl Into<String>) -> Self {
        self.lookup_function = name.into();
        self
    }

    /// Replace the scanned source extensions. An empty list keeps the current ones.
    pub fn with_source_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions: Vec<String> = extensions.into_iter().map(Into::into).collect();
        if !extensions.is_empty() {
            self.source_extensions = extensions;
        }
        self
    }

    pub fn with_catalog_extension(mut self, extension: impl Into<String>) -> Self {
        self.catalog_extension = extension.into();
        self
    }

    pub fn with_locale_subdir(mut self, subdir: impl Into<String>) -> Self {
        self.locale_subdir = subdir.into();
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_parse_trace(mut self, trace: bool) -> Self {
        self.parse_trace = trace;
        self
    }

    pub fn with_similarity(mut self, policy: impl SimilarityPolicy + 'static) -> Self {
        self.similarity = Arc::new(policy);
        self
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            trace: self.parse_trace,
        }
    }

    /// Whether `extension` names a source file to scan.
    pub fn is_source_extension(&self, extension: &str) -> bool {
        self.source_extensions.iter().any(|e| e == extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::ExactSimilarity;

    #[test]
    fn test_defaults() {
        let config = LintConfig::default();
        assert_eq!(config.lookup_function, "__d");
        assert!(config.is_source_extension("php"));
        assert!(!config.is_source_extension("js"));
        assert_eq!(config.locale_subdir, "resources/locales");
        assert!(config.similarity.similar("Cat", "Cats"));
    }

    #[test]
    fn test_builder() {
        let config = LintConfig::new()
            .with_lookup_function("t")
            .with_source_extensions(["php", "ctp"])
            .with_similarity(ExactSimilarity)
            .with_parse_trace(true);
        assert_eq!(config.lookup_function, "t");
        assert!(config.is_source_extension("ctp"));
        assert!(!config.similarity.similar("Cat", "Cats"));
        assert!(config.parse_options().trace);
    }

    #[test]
    fn test_empty_extension_list_keeps_defaults() {
        let config = LintConfig::new().with_source_extensions(Vec::<String>::new());
        assert_eq!(config.source_extensions, vec!["php".to_string()]);
    }
}
