//! Per-entry rules and the duplicate-value similarity policy.

use std::fmt;

use crate::catalog::{placeholder, Entry, MAX_PLACEHOLDER};

/// Decides when two keys that share a value are variants of one another.
///
/// Duplicate values under similar keys are informational; under unrelated
/// keys they are warnings.
pub trait SimilarityPolicy: fmt::Debug + Send + Sync {
    fn similar(&self, a: &str, b: &str) -> bool;
}

/// Keys are similar when identical, or when one is the other plus a
/// trailing `.` or a trailing `s`.
#[derive(Clone, Copy, Debug, Default)]
pub struct InflectionSimilarity;

impl SimilarityPolicy for InflectionSimilarity {
    fn similar(&self, a: &str, b: &str) -> bool {
        a == b || extends(a, b) || extends(b, a)
    }
}

/// Only identical keys are similar.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactSimilarity;

impl SimilarityPolicy for ExactSimilarity {
    fn similar(&self, a: &str, b: &str) -> bool {
        a == b
    }
}

fn extends(longer: &str, shorter: &str) -> bool {
    longer
        .strip_prefix(shorter)
        .is_some_and(|rest| rest == "." || rest == "s")
}

/// Characters a msgid may use besides ASCII letters and digits.
///
/// Backslash is allowed because msgids are kept raw, so escapes such as
/// `\"` and `\n` appear verbatim.
const KEY_PUNCTUATION: &str = " {}()<>:/=%[]'\"?,._-\\";

pub fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || KEY_PUNCTUATION.contains(c)
}

/// Whether a msgid stays within the allowed character set.
pub fn is_valid_key(msgid: &str) -> bool {
    msgid.chars().all(is_key_char)
}

/// Placeholder indexes present on exactly one side of an entry.
pub fn placeholder_mismatches(entry: &Entry) -> Vec<usize> {
    (0..=MAX_PLACEHOLDER)
        .filter(|&i| {
            let tag = placeholder(i);
            entry.msgid.contains(&tag) != entry.msgstr.contains(&tag)
        })
        .collect()
}
