//! Lexing helpers shared by the catalog and source lexers.

use logos::{Lexer, Logos, Skip};

/// Consume a quoted run after its opening quote has been matched.
///
/// A backslash toggles the escape flag, so `\"` does not close the run but
/// `\\"` does. Nothing is decoded. An unterminated run stops silently at the
/// end of input. Returns the byte length of the content between the quotes.
pub fn quoted_run<'s, T>(lex: &mut Lexer<'s, T>, quote: u8) -> usize
where
    T: Logos<'s, Source = str>,
{
    let rest = lex.remainder().as_bytes();
    let mut escape = false;
    for (i, &b) in rest.iter().enumerate() {
        if b == quote && !escape {
            lex.bump(i + 1);
            return i;
        }
        escape = b == b'\\' && !escape;
    }
    let len = rest.len();
    lex.bump(len);
    len
}

/// Skip a `/* ... */` comment after its opener has been matched.
///
/// Comments do not nest. An unterminated comment runs to the end of input.
pub fn block_comment<'s, T>(lex: &mut Lexer<'s, T>) -> Skip
where
    T: Logos<'s, Source = str>,
{
    let rest = lex.remainder();
    let len = rest.find("*/").map_or(rest.len(), |end| end + 2);
    lex.bump(len);
    Skip
}

/// `source` without a leading byte order mark.
///
/// Positions are reported against the returned text, so the first column of
/// a file is the first character after the mark.
#[inline]
pub fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{FEFF}').unwrap_or(source)
}

/// Slice the content of a quoted token whose span starts at the opening quote.
#[inline]
pub fn quoted_content(source: &str, span_start: usize, len: usize) -> &str {
    &source[span_start + 1..span_start + 1 + len]
}

/// The character a lexer error starts on, if `offset` is a char boundary.
///
/// Lexers map unmatched input to single-character tokens; error spans that
/// begin inside a multi-byte character are continuation bytes of a character
/// already emitted and are dropped.
pub fn char_at(source: &str, offset: usize) -> Option<char> {
    if !source.is_char_boundary(offset) {
        return None;
    }
    source[offset..].chars().next()
}
