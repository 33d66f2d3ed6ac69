//! Catalog lexer.
//!
//! Turns catalog text into keyword, string and single-character tokens.
//! The lexer never stops on its own: an unknown bare word is handed on as an
//! [`TokenKind::Other`] token and remembered as a lexical error, which the
//! parser picks up and decides on.

use logos::Logos;

use crate::base::lex::{char_at, quoted_content, quoted_run, strip_bom};
use crate::base::{LineCol, LineIndex};

/// Kind of a catalog token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Msgid,
    Msgstr,
    String,
    Other,
    Eof,
}

/// Reserved words of the catalog format.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("msgid", TokenKind::Msgid),
    ("msgstr", TokenKind::Msgstr),
];

/// Look up a bare word in the keyword table.
pub fn keyword(word: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(text, _)| *text == word)
        .map(|&(_, kind)| kind)
}

/// A catalog token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Keyword text, raw string content (no escape decoding), or the character.
    pub text: String,
    pub pos: LineCol,
}

/// A bare word that is not a keyword.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub pos: LineCol,
    pub message: String,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
enum RawToken {
    #[regex("[A-Za-z][A-Za-z0-9_]*")]
    Word,

    #[token("\"", |lex| quoted_run(lex, b'"'))]
    Quoted(usize),
}

/// Streaming lexer over one catalog file.
pub struct CatalogLexer<'s> {
    source: &'s str,
    inner: logos::Lexer<'s, RawToken>,
    lines: LineIndex,
    error: Option<LexError>,
}

impl<'s> CatalogLexer<'s> {
    /// A leading byte order mark is ignored.
    pub fn new(source: &'s str) -> Self {
        let source = strip_bom(source);
        Self {
            source,
            inner: RawToken::lexer(source),
            lines: LineIndex::new(source),
            error: None,
        }
    }

    /// Produce the next token. Returns `Eof` forever once input is exhausted.
    pub fn next_token(&mut self) -> Token {
        loop {
            let Some(raw) = self.inner.next() else {
                return Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    pos: self.lines.line_col_at(self.source.len()),
                };
            };
            let span = self.inner.span();
            let pos = self.lines.line_col_at(span.start);

            return match raw {
                Ok(RawToken::Word) => {
                    let word = &self.source[span];
                    match keyword(word) {
                        Some(kind) => Token {
                            kind,
                            text: word.to_string(),
                            pos,
                        },
                        None => {
                            self.error.get_or_insert_with(|| LexError {
                                pos,
                                message: format!("unknown keyword `{word}`"),
                            });
                            Token {
                                kind: TokenKind::Other,
                                text: word.to_string(),
                                pos,
                            }
                        }
                    }
                }
                Ok(RawToken::Quoted(len)) => Token {
                    kind: TokenKind::String,
                    text: quoted_content(self.source, span.start, len).to_string(),
                    pos,
                },
                Err(()) => match char_at(self.source, span.start) {
                    Some(c) => Token {
                        kind: TokenKind::Other,
                        text: c.to_string(),
                        pos,
                    },
                    None => continue,
                },
            };
        }
    }

    /// Take the pending lexical error, if any.
    pub fn take_error(&mut self) -> Option<LexError> {
        self.error.take()
    }
}

/// Lex a whole catalog, `Eof` excluded.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = CatalogLexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        if token.kind == TokenKind::Eof {
            return tokens;
        }
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords_and_strings() {
        let tokens = tokenize("msgid \"Hello\"\nmsgstr \"Bonjour\"\n");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Msgid, TokenKind::String, TokenKind::Msgstr, TokenKind::String]
        );
        assert_eq!(tokens[1].text, "Hello");
        assert_eq!(tokens[2].pos, LineCol::new(1, 0));
        assert_eq!(tokens[3].pos, LineCol::new(1, 7));
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            kinds("# translator note\n#: src/a.php:3\nmsgid \"a\" # trailing\n"),
            vec![TokenKind::Msgid, TokenKind::String]
        );
    }

    #[test]
    fn test_string_is_raw() {
        let tokens = tokenize(r#"msgid "say \"hi\"\n""#);
        assert_eq!(tokens[1].text, r#"say \"hi\"\n"#);
    }

    #[test]
    fn test_unknown_word_is_other_and_error() {
        let mut lexer = CatalogLexer::new("msgctxt \"menu\"");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Other);
        assert_eq!(token.text, "msgctxt");
        let err = lexer.take_error().unwrap();
        assert_eq!(err.message, "unknown keyword `msgctxt`");
        assert_eq!(lexer.next_token().kind, TokenKind::String);
    }

    #[test]
    fn test_other_characters() {
        let tokens = tokenize("msgid[0] é");
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["msgid", "[", "0", "]", "é"]);
        assert!(tokens[1..].iter().all(|t| t.kind == TokenKind::Other));
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = CatalogLexer::new("");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}
