//! Domain indexes.
//!
//! A [`DomainIndex`] maps msgids and msgstrs to the entry that first used
//! them. Later duplicates are diagnosed and dropped, never merged. The same
//! rules apply inside one file and across the files of a domain; only the
//! wording of the diagnostics differs.

use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::rules::{is_valid_key, placeholder_mismatches, SimilarityPolicy};
use crate::catalog::{placeholder, Entry};
use crate::diagnostics::{codes, Diagnostic, Reporter};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Whether a duplicate was found inside one file or across files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    WithinFile,
    CrossFile,
}

impl Scope {
    fn prefix(self) -> &'static str {
        match self {
            Scope::WithinFile => "",
            Scope::CrossFile => "cross-file ",
        }
    }
}

// ============================================================================
// DOMAIN INDEX
// ============================================================================

/// First-wins key and value maps for one domain.
#[derive(Clone, Debug, Default)]
pub struct DomainIndex {
    name: Arc<str>,
    by_key: FxIndexMap<Arc<str>, Arc<Entry>>,
    by_value: FxIndexMap<Arc<str>, Arc<Entry>>,
    files: Vec<Arc<str>>,
}

impl DomainIndex {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Index one file's entries, reporting in-file findings to `sink`.
    ///
    /// Per entry, in order: duplicate value, duplicate key, key charset,
    /// placeholder symmetry. The header record (empty msgid) is not indexed
    /// or checked.
    pub fn from_file(
        domain: impl Into<Arc<str>>,
        file: impl Into<Arc<str>>,
        entries: Vec<Entry>,
        policy: &dyn SimilarityPolicy,
        sink: &mut dyn Reporter,
    ) -> Self {
        let mut index = Self::new(domain);
        index.files.push(file.into());

        for entry in entries {
            if entry.is_header() {
                continue;
            }
            let entry = Arc::new(entry);
            index.add_value(&entry, Scope::WithinFile, policy, sink);
            index.add_key(&entry, Scope::WithinFile, sink);
            check_entry(&entry, sink);
        }
        index
    }

    /// Merge another file's index of the same domain into this one.
    pub fn merge(
        &mut self,
        other: DomainIndex,
        policy: &dyn SimilarityPolicy,
        sink: &mut dyn Reporter,
    ) {
        for entry in other.by_key.values() {
            self.add_key(entry, Scope::CrossFile, sink);
        }
        for entry in other.by_value.values() {
            self.add_value(entry, Scope::CrossFile, policy, sink);
        }
        self.files.extend(other.files);
    }

    fn add_key(&mut self, entry: &Arc<Entry>, scope: Scope, sink: &mut dyn Reporter) {
        if let Some(first) = self.by_key.get(&entry.msgid) {
            sink.report(
                Diagnostic::error(
                    &entry.location,
                    format!(
                        "{}duplicate msgid \"{}\" = \"{}\", first defined at {} = \"{}\"",
                        scope.prefix(),
                        entry.msgid,
                        entry.msgstr,
                        first.location,
                        first.msgstr
                    ),
                )
                .with_code(codes::DUPLICATE_KEY),
            );
            return;
        }
        self.by_key.insert(entry.msgid.clone(), entry.clone());
    }

    fn add_value(
        &mut self,
        entry: &Arc<Entry>,
        scope: Scope,
        policy: &dyn SimilarityPolicy,
        sink: &mut dyn Reporter,
    ) {
        let Some(first) = self.by_value.get(&entry.msgstr) else {
            self.by_value.insert(entry.msgstr.clone(), entry.clone());
            return;
        };
        let diagnostic = if policy.similar(&entry.msgid, &first.msgid) {
            Diagnostic::info(
                &entry.location,
                format!(
                    "{}duplicate msgstr \"{}\" with similar msgid \"{}\", also used by msgid \"{}\" at {}",
                    scope.prefix(),
                    entry.msgstr,
                    entry.msgid,
                    first.msgid,
                    first.location
                ),
            )
            .with_code(codes::DUPLICATE_VALUE_SIMILAR_KEY)
        } else {
            Diagnostic::warning(
                &entry.location,
                format!(
                    "{}duplicate msgstr \"{}\" for msgid \"{}\", also used by msgid \"{}\" at {}",
                    scope.prefix(),
                    entry.msgstr,
                    entry.msgid,
                    first.msgid,
                    first.location
                ),
            )
            .with_code(codes::DUPLICATE_VALUE)
        };
        sink.report(diagnostic);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry indexed under `msgid`.
    pub fn get(&self, msgid: &str) -> Option<&Arc<Entry>> {
        self.by_key.get(msgid)
    }

    /// Entry that first used `msgstr`.
    pub fn by_value(&self, msgstr: &str) -> Option<&Arc<Entry>> {
        self.by_value.get(msgstr)
    }

    /// Indexed entries in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = &Arc<Entry>> + '_ {
        self.by_key.values()
    }

    /// Catalog files that fed this domain.
    pub fn files(&self) -> &[Arc<str>] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Rules that look at one entry alone.
fn check_entry(entry: &Entry, sink: &mut dyn Reporter) {
    if !is_valid_key(&entry.msgid) {
        sink.report(
            Diagnostic::error(&entry.location, format!("invalid msgid: '{}'", entry.msgid))
                .with_code(codes::INVALID_KEY),
        );
    }
    for index in placeholder_mismatches(entry) {
        sink.report(
            Diagnostic::warning(
                &entry.location,
                format!(
                    "placeholder `{}` appears in only one of msgid<{}> and msgstr<{}>",
                    placeholder(index),
                    entry.msgid,
                    entry.msgstr
                ),
            )
            .with_code(codes::PLACEHOLDER_MISMATCH),
        );
    }
}

// ============================================================================
// CATALOG SET
// ============================================================================

/// Every domain known to a run, keyed by domain name.
#[derive(Clone, Debug, Default)]
pub struct CatalogSet {
    domains: FxIndexMap<Arc<str>, DomainIndex>,
}

impl CatalogSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a file's index into the domain of the same name.
    pub fn merge_file(
        &mut self,
        index: DomainIndex,
        policy: &dyn SimilarityPolicy,
        sink: &mut dyn Reporter,
    ) {
        match self.domains.get_mut(index.name()) {
            Some(existing) => existing.merge(index, policy, sink),
            None => {
                self.domains.insert(index.name.clone(), index);
            }
        }
    }

    /// Add a whole domain. Hands it back if the name is taken.
    pub fn insert(&mut self, index: DomainIndex) -> Result<(), DomainIndex> {
        if self.domains.contains_key(index.name()) {
            return Err(index);
        }
        self.domains.insert(index.name.clone(), index);
        Ok(())
    }

    pub fn domain(&self, name: &str) -> Option<&DomainIndex> {
        self.domains.get(name)
    }

    pub fn domains(&self) -> impl Iterator<Item = &DomainIndex> + '_ {
        self.domains.values()
    }

    /// Consume the set, yielding domains in insertion order.
    pub fn into_domains(self) -> impl Iterator<Item = DomainIndex> {
        self.domains.into_values()
    }

    pub fn domain_names(&self) -> BTreeSet<String> {
        self.domains.keys().map(|name| name.to_string()).collect()
    }

    /// Total indexed entries over all domains.
    pub fn entry_count(&self) -> usize {
        self.domains.values().map(DomainIndex::len).sum()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{LineCol, Location};
    use crate::check::rules::InflectionSimilarity;
    use crate::diagnostics::{DiagnosticCollector, Severity};

    fn entry(file: &str, line: u32, msgid: &str, msgstr: &str) -> Entry {
        Entry {
            msgid: Arc::from(msgid),
            msgstr: Arc::from(msgstr),
            location: Location::new(file, LineCol::new(line, 0)),
            domain: Arc::from("d"),
        }
    }

    fn index_file(
        file: &str,
        pairs: &[(&str, &str)],
        sink: &mut DiagnosticCollector,
    ) -> DomainIndex {
        let entries = pairs
            .iter()
            .enumerate()
            .map(|(i, (id, s))| entry(file, i as u32 * 3, id, s))
            .collect();
        DomainIndex::from_file("d", file, entries, &InflectionSimilarity, sink)
    }

    #[test]
    fn test_duplicate_key_first_wins() {
        let mut sink = DiagnosticCollector::new();
        let index = index_file("d.po", &[("k", "first"), ("k", "second")], &mut sink);

        let errors = sink.with_severity(Severity::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].pos, Some(LineCol::new(3, 0)));
        assert!(errors[0].message.contains("first defined at d.po:1:1"));
        assert_eq!(index.get("k").map(|e| e.msgstr.as_ref()), Some("first"));
    }

    #[test]
    fn test_duplicate_value_similar_key_is_info() {
        let mut sink = DiagnosticCollector::new();
        index_file("d.po", &[("Cat", "Neko"), ("Cats", "Neko")], &mut sink);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.diagnostics()[0].severity, Severity::Info);
    }

    #[test]
    fn test_duplicate_value_unrelated_key_is_warning() {
        let mut sink = DiagnosticCollector::new();
        let index = index_file("d.po", &[("Cat", "Animal"), ("Dog", "Animal")], &mut sink);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.diagnostics()[0].severity, Severity::Warning);
        assert_eq!(index.by_value("Animal").map(|e| e.msgid.as_ref()), Some("Cat"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_header_not_indexed() {
        let mut sink = DiagnosticCollector::new();
        let index = index_file("d.po", &[("", "Language: ja"), ("k", "v")], &mut sink);
        assert!(sink.is_empty());
        assert!(index.get("").is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_cross_file_merge() {
        let mut sink = DiagnosticCollector::new();
        let mut set = CatalogSet::new();
        let a = index_file("a.po", &[("k", "v"), ("Cat", "Neko")], &mut sink);
        let b = index_file("b.po", &[("k", "other"), ("Cats", "Neko"), ("Dog", "v")], &mut sink);
        assert!(sink.is_empty());

        set.merge_file(a, &InflectionSimilarity, &mut sink);
        set.merge_file(b, &InflectionSimilarity, &mut sink);

        let found: Vec<_> = sink.diagnostics().iter().map(|d| (d.severity, d.code)).collect();
        assert_eq!(
            found,
            vec![
                (Severity::Error, Some(codes::DUPLICATE_KEY)),
                (Severity::Info, Some(codes::DUPLICATE_VALUE_SIMILAR_KEY)),
                (Severity::Warning, Some(codes::DUPLICATE_VALUE)),
            ]
        );
        assert!(sink.diagnostics()[0].message.starts_with("cross-file duplicate msgid"));

        let d = set.domain("d").unwrap();
        assert_eq!(d.get("k").map(|e| e.msgstr.as_ref()), Some("v"));
        assert_eq!(d.by_value("Neko").map(|e| e.msgid.as_ref()), Some("Cat"));
        assert_eq!(d.files().len(), 2);
        assert_eq!(set.entry_count(), 4);
    }

    #[test]
    fn test_insert_rejects_taken_name() {
        let mut set = CatalogSet::new();
        assert!(set.insert(DomainIndex::new("d")).is_ok());
        assert!(set.insert(DomainIndex::new("d")).is_err());
        assert_eq!(set.domain_names(), BTreeSet::from(["d".to_string()]));
    }
}
