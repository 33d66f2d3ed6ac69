//! Foundation types for polint.
//!
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Location`] - A position inside a named file
//! - [`lex`] - Quoted runs, block comments and BOM handling shared by both lexers
//!
//! This module has NO dependencies on other polint modules.

pub mod lex;
mod span;

pub use span::{LineCol, LineIndex, Location};
