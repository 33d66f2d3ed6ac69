//! Source side: tokenizer, literal folding and the call-site scanner.

pub mod fold;
pub mod lexer;
pub mod scanner;

pub use fold::fold_literals;
pub use lexer::{Token, TokenKind};
pub use scanner::{count_arguments, scan_calls, CallFinding, CallSite};

/// Tokenize and fold a source file, ready for [`scan_calls`].
pub fn lex_source(source: &str) -> Vec<Token> {
    fold_literals(lexer::tokenize(source))
}
