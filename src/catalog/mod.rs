//! Catalog format: lexer, parser and the records they produce.

mod entry;
pub mod lexer;
mod parser;

pub use entry::{highest_placeholder, placeholder, Entry, MAX_PLACEHOLDER};
pub use parser::{parse_catalog, parse_catalog_with, CatalogParser, ParseContext, ParseOptions};
