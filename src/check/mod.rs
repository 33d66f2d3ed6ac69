//! Cross-validation: catalog self-consistency and call sites against catalogs.

mod calls;
mod index;
mod rules;

pub use calls::{check_finding, check_source};
pub use index::{CatalogSet, DomainIndex};
pub use rules::{
    is_key_char, is_valid_key, placeholder_mismatches, ExactSimilarity, InflectionSimilarity,
    SimilarityPolicy,
};
