//! Filesystem side of a run: plugin locale trees, source trees and the
//! [`Linter`] that ties them together.

mod catalog_loader;
pub mod file_loader;
mod linter;
mod source_loader;

pub use catalog_loader::CatalogLoader;
pub use linter::{Linter, RunSummary};
pub use source_loader::SourceScanner;
