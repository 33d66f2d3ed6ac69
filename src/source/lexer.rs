//! Source tokenizer.
//!
//! Recognises just enough of the host language to find lookup calls:
//! words, numbers, quoted literals and single-character symbols. Comments
//! are dropped. Literal contents are kept raw.

use logos::Logos;
use smol_str::SmolStr;

use crate::base::lex::{block_comment, char_at, quoted_content, quoted_run, strip_bom};
use crate::base::{LineCol, LineIndex};

/// Kind of a source token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Number,
    /// `'...'` literal.
    StringSingle,
    /// `"..."` literal, or a fold that mixed quote kinds.
    StringDouble,
    Symbol,
    Eof,
}

impl TokenKind {
    #[inline]
    pub fn is_string(self) -> bool {
        matches!(self, TokenKind::StringSingle | TokenKind::StringDouble)
    }
}

/// Reserved words, sorted for binary search.
pub const KEYWORDS: &[&str] = &[
    "abstract", "and", "array", "as", "break", "case", "catch", "class", "clone", "const",
    "continue", "declare", "default", "do", "echo", "else", "elseif", "empty", "enddeclare",
    "endfor", "endforeach", "endif", "endswitch", "endwhile", "enum", "extends", "final",
    "finally", "fn", "for", "foreach", "function", "global", "goto", "if", "implements",
    "include", "include_once", "instanceof", "insteadof", "interface", "isset", "list", "match",
    "namespace", "new", "or", "print", "private", "protected", "public", "readonly", "require",
    "require_once", "return", "static", "switch", "throw", "trait", "try", "unset", "use", "var",
    "while", "xor", "yield",
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.binary_search(&word).is_ok()
}

/// A source token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Word, number or symbol text; raw content for literals.
    pub text: SmolStr,
    pub pos: LineCol,
}

impl Token {
    #[inline]
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    #[inline]
    pub fn is_symbol(&self, text: &str) -> bool {
        self.is(TokenKind::Symbol, text)
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"#[^\n]*")]
enum RawToken {
    #[token("/*", block_comment)]
    BlockComment,

    #[regex("[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex("[0-9][0-9_]*")]
    #[regex("0[xX][0-9a-fA-F]+")]
    Number,

    #[token("'", |lex| quoted_run(lex, b'\''))]
    Single(usize),

    #[token("\"", |lex| quoted_run(lex, b'"'))]
    Double(usize),
}

/// Streaming tokenizer over one source file.
pub struct SourceLexer<'s> {
    source: &'s str,
    inner: logos::Lexer<'s, RawToken>,
    lines: LineIndex,
}

impl<'s> SourceLexer<'s> {
    /// A leading byte order mark is ignored.
    pub fn new(source: &'s str) -> Self {
        let source = strip_bom(source);
        Self {
            source,
            inner: RawToken::lexer(source),
            lines: LineIndex::new(source),
        }
    }

    /// Produce the next token. Returns `Eof` forever once input is exhausted.
    pub fn next_token(&mut self) -> Token {
        loop {
            let Some(raw) = self.inner.next() else {
                return Token {
                    kind: TokenKind::Eof,
                    text: SmolStr::default(),
                    pos: self.lines.line_col_at(self.source.len()),
                };
            };
            let span = self.inner.span();
            let pos = self.lines.line_col_at(span.start);

            let (kind, text) = match raw {
                Ok(RawToken::Word) => {
                    let word = &self.source[span];
                    let kind = if is_keyword(word) {
                        TokenKind::Keyword
                    } else {
                        TokenKind::Identifier
                    };
                    (kind, SmolStr::new(word))
                }
                Ok(RawToken::BlockComment) => continue,
                Ok(RawToken::Number) => (TokenKind::Number, SmolStr::new(&self.source[span])),
                Ok(RawToken::Single(len)) => (
                    TokenKind::StringSingle,
                    SmolStr::new(quoted_content(self.source, span.start, len)),
                ),
                Ok(RawToken::Double(len)) => (
                    TokenKind::StringDouble,
                    SmolStr::new(quoted_content(self.source, span.start, len)),
                ),
                Err(()) => match char_at(self.source, span.start) {
                    Some(c) => {
                        let mut buf = [0u8; 4];
                        (TokenKind::Symbol, SmolStr::new(c.encode_utf8(&mut buf)))
                    }
                    None => continue,
                },
            };
            return Token { kind, text, pos };
        }
    }
}

impl Iterator for SourceLexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

/// Tokenize without folding, `Eof` excluded.
pub fn tokenize(source: &str) -> Vec<Token> {
    SourceLexer::new(source).collect()
}
