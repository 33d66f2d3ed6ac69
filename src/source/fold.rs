//! String-literal folding.
//!
//! The scanner only accepts a single literal per argument, while long
//! literals are routinely split across lines. Folding merges
//!
//! - two adjacent literals, and
//! - a literal, a `.` concatenation operator and a literal
//!
//! into one literal token at the first literal's position. A fold that mixes
//! quote kinds becomes [`TokenKind::StringDouble`]. Folding left to right on
//! an output stack reaches the fixed point in one pass, so
//! `'a' . 'b' . 'c'` ends up as a single `'abc'`.

use smol_str::SmolStr;

use super::lexer::{Token, TokenKind};

/// Fold literal concatenations in a token stream.
pub fn fold_literals(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token.kind.is_string() {
            if let Some(prev) = out.last_mut().filter(|t| t.kind.is_string()) {
                absorb(prev, &token);
                continue;
            }
            if ends_with_concatenation(&out) {
                out.pop();
                if let Some(prev) = out.last_mut() {
                    absorb(prev, &token);
                }
                continue;
            }
        }
        out.push(token);
    }
    out
}

/// `<string> .` at the end of the stack.
fn ends_with_concatenation(out: &[Token]) -> bool {
    match out {
        [.., lhs, dot] => lhs.kind.is_string() && dot.is_symbol("."),
        _ => false,
    }
}

fn absorb(into: &mut Token, next: &Token) {
    let mut text = String::with_capacity(into.text.len() + next.text.len());
    text.push_str(&into.text);
    text.push_str(&next.text);
    into.text = SmolStr::from(text);
    if into.kind != next.kind {
        into.kind = TokenKind::StringDouble;
    }
}
