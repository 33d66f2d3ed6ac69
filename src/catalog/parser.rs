//! Catalog parser.
//!
//! ```text
//! catalog := record*
//! record  := MSGID STRING+ MSGSTR STRING+
//! ```
//!
//! Consecutive strings after a keyword are concatenated without a delimiter.
//! The first unexpected token (or a lexical error) stops the parse; there is
//! no resynchronisation, so a catalog yields either every record or an error.

use std::sync::Arc;

use tracing::trace;

use super::entry::Entry;
use super::lexer::{CatalogLexer, Token, TokenKind};
use crate::base::{LineCol, Location};
use crate::error::CatalogSyntaxError;

/// Options for one parse.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
    /// Emit a `trace!` event per token and record.
    pub trace: bool,
}

/// State owned by a single parse: the records so far and the first error.
#[derive(Debug)]
pub struct ParseContext {
    file: Arc<str>,
    domain: Arc<str>,
    entries: Vec<Entry>,
    error: Option<CatalogSyntaxError>,
    options: ParseOptions,
}

impl ParseContext {
    pub fn new(
        file: impl Into<Arc<str>>,
        domain: impl Into<Arc<str>>,
        options: ParseOptions,
    ) -> Self {
        Self {
            file: file.into(),
            domain: domain.into(),
            entries: Vec::new(),
            error: None,
            options,
        }
    }

    /// Record an error unless one is already set.
    pub fn fail(&mut self, pos: LineCol, message: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some(CatalogSyntaxError {
                location: Location::new(self.file.clone(), pos),
                message: message.into(),
            });
        }
    }

    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    fn push(&mut self, msgid: String, msgstr: String, pos: LineCol) {
        if self.options.trace {
            trace!(file = %self.file, %pos, %msgid, "record");
        }
        self.entries.push(Entry {
            msgid: Arc::from(msgid),
            msgstr: Arc::from(msgstr),
            location: Location::new(self.file.clone(), pos),
            domain: self.domain.clone(),
        });
    }

    /// The records in file order, or the first error.
    pub fn finish(self) -> Result<Vec<Entry>, CatalogSyntaxError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.entries),
        }
    }
}

/// Recursive-descent parser over a [`CatalogLexer`].
pub struct CatalogParser<'s> {
    lexer: CatalogLexer<'s>,
    lookahead: Option<Token>,
    ctx: ParseContext,
}

impl<'s> CatalogParser<'s> {
    pub fn new(source: &'s str, ctx: ParseContext) -> Self {
        Self {
            lexer: CatalogLexer::new(source),
            lookahead: None,
            ctx,
        }
    }

    /// Parse every record.
    pub fn parse(mut self) -> Result<Vec<Entry>, CatalogSyntaxError> {
        loop {
            let token = self.bump();
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Msgid => {
                    if self.record(token.pos).is_none() {
                        break;
                    }
                }
                _ => {
                    self.unexpected(&token, "`msgid`");
                    break;
                }
            }
            if self.ctx.has_failed() {
                break;
            }
        }
        self.ctx.finish()
    }

    /// The rest of a record whose `msgid` sits at `pos`.
    fn record(&mut self, pos: LineCol) -> Option<()> {
        let msgid = self.strings("msgid")?;
        let token = self.bump();
        if token.kind != TokenKind::Msgstr {
            self.unexpected(&token, "`msgstr`");
            return None;
        }
        let msgstr = self.strings("msgstr")?;
        self.ctx.push(msgid, msgstr, pos);
        Some(())
    }

    /// One or more strings, concatenated.
    fn strings(&mut self, keyword: &str) -> Option<String> {
        let mut text = String::new();
        let mut seen = false;
        while self.peek_kind() == TokenKind::String {
            text.push_str(&self.bump().text);
            seen = true;
        }
        if !seen {
            let token = self.bump();
            self.unexpected(&token, &format!("a string after `{keyword}`"));
            return None;
        }
        Some(text)
    }

    fn peek_kind(&mut self) -> TokenKind {
        let token = self.bump();
        let kind = token.kind;
        self.lookahead = Some(token);
        kind
    }

    fn bump(&mut self) -> Token {
        match self.lookahead.take() {
            Some(token) => token,
            None => self.pull(),
        }
    }

    fn pull(&mut self) -> Token {
        let token = self.lexer.next_token();
        if self.ctx.options.trace {
            trace!(kind = ?token.kind, text = %token.text, pos = %token.pos, "token");
        }
        if let Some(err) = self.lexer.take_error() {
            self.ctx.fail(err.pos, err.message);
        }
        token
    }

    fn unexpected(&mut self, token: &Token, expected: &str) {
        let message = match token.kind {
            TokenKind::Eof => format!("unexpected end of input, expected {expected}"),
            _ => format!("unexpected `{}`, expected {expected}", token.text),
        };
        self.ctx.fail(token.pos, message);
    }
}

/// Parse one catalog file's text into entries for `domain`.
pub fn parse_catalog(
    source: &str,
    file: impl Into<Arc<str>>,
    domain: impl Into<Arc<str>>,
) -> Result<Vec<Entry>, CatalogSyntaxError> {
    parse_catalog_with(source, file, domain, ParseOptions::default())
}

/// [`parse_catalog`] with explicit options.
pub fn parse_catalog_with(
    source: &str,
    file: impl Into<Arc<str>>,
    domain: impl Into<Arc<str>>,
    options: ParseOptions,
) -> Result<Vec<Entry>, CatalogSyntaxError> {
    let ctx = ParseContext::new(file, domain, options);
    CatalogParser::new(source, ctx).parse()
}
