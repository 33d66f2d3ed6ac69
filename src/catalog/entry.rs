//! Parsed catalog records.

use std::sync::Arc;

use crate::base::Location;

/// Highest placeholder index that is checked.
pub const MAX_PLACEHOLDER: usize = 9;

/// One msgid/msgstr record with its origin.
///
/// Immutable once the parser has produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Lookup key, raw inter-quote content.
    pub msgid: Arc<str>,
    /// Translated value, raw inter-quote content.
    pub msgstr: Arc<str>,
    /// Where the record's `msgid` keyword sits.
    pub location: Location,
    /// Domain the file was loaded into.
    pub domain: Arc<str>,
}

impl Entry {
    /// The record with an empty msgid that carries the catalog header.
    pub fn is_header(&self) -> bool {
        self.msgid.is_empty()
    }

    /// Number of positional arguments a call must supply for this value.
    ///
    /// The highest `{n}` present in the msgstr plus one, or zero.
    pub fn required_arguments(&self) -> usize {
        highest_placeholder(&self.msgstr).map_or(0, |n| n + 1)
    }
}

/// `{n}` marker text for a placeholder index.
pub fn placeholder(index: usize) -> String {
    format!("{{{index}}}")
}

/// Highest placeholder index present in `text`, scanning `{9}` down to `{0}`.
pub fn highest_placeholder(text: &str) -> Option<usize> {
    (0..=MAX_PLACEHOLDER)
        .rev()
        .find(|&i| text.contains(&placeholder(i)))
}
